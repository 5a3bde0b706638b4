//! Prefix listing with pagination.
//!
//! Drives repeated list-prefixes calls against the backend until the
//! listing is exhausted, accumulating common prefixes in backend page
//! order. A malformed backend that keeps answering truncated empty pages
//! with an unchanged token is cut off after a bounded number of stalled
//! pages instead of looping forever.

use tracing::debug;

use bucketry_model::ListPrefixesRequest;

use crate::client::ObjectClient;
use crate::error::ClientError;
use crate::key::PREFIX_DELIMITER;

impl ObjectClient {
    /// List the common prefixes under `bucket`/`prefix`.
    ///
    /// Issues one list request per page, feeding each page's continuation
    /// token into the next request, until the backend reports the listing
    /// is no longer truncated. Results follow backend page order; no
    /// client-side sorting is applied. The call is restartable: it holds no
    /// state beyond its own accumulator, and cancelling it simply discards
    /// the in-flight page.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ProtocolError`] when the backend repeats
    /// stalled pages (truncated, empty, unchanged token) more than the
    /// configured `max_stalled_pages` times in a row; backend failures are
    /// propagated unchanged.
    pub async fn list_prefixes(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<String>, ClientError> {
        let mut request = ListPrefixesRequest {
            bucket: bucket.to_owned(),
            prefix: prefix.to_owned(),
            delimiter: PREFIX_DELIMITER.to_string(),
            continuation_token: None,
        };

        let mut prefixes = Vec::new();
        let mut request_count = 0u32;
        let mut stalled_pages = 0u32;

        loop {
            let page = self.backend().list_prefixes_page(request.clone()).await?;
            request_count += 1;

            debug!(
                bucket,
                prefix,
                request_count,
                page_size = page.prefixes.len(),
                is_truncated = page.is_truncated,
                token = ?page.next_continuation_token,
                "retrieved prefix page"
            );

            let stalled = page.is_truncated
                && page.prefixes.is_empty()
                && page.next_continuation_token == request.continuation_token;

            prefixes.extend(page.prefixes);

            if !page.is_truncated {
                break;
            }

            if stalled {
                stalled_pages += 1;
                if stalled_pages >= self.config().max_stalled_pages {
                    return Err(ClientError::ProtocolError {
                        message: format!(
                            "listing of {bucket}/{prefix} stalled after {stalled_pages} \
                             identical empty truncated pages"
                        ),
                    });
                }
            } else {
                stalled_pages = 0;
            }

            request.continuation_token = page.next_continuation_token;
        }

        Ok(prefixes)
    }
}
