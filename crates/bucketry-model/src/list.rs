//! Listing request and page types.

use serde::{Deserialize, Serialize};

/// One paginated list-prefixes request.
///
/// The continuation token is `None` for the first page and carries the
/// opaque cursor from the previous [`PrefixPage`] on subsequent pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPrefixesRequest {
    /// Bucket to list.
    pub bucket: String,
    /// Key prefix scoping the listing.
    pub prefix: String,
    /// Delimiter used to group keys into common prefixes.
    pub delimiter: String,
    /// Opaque cursor from the previous page, if any.
    pub continuation_token: Option<String>,
}

/// One page of a paginated listing.
///
/// Produced once per list call and consumed immediately by the paginator;
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixPage {
    /// Common prefixes in backend page order.
    pub prefixes: Vec<String>,
    /// Cursor for the next page, if the backend supplied one.
    pub next_continuation_token: Option<String>,
    /// Whether more results are available beyond this page.
    pub is_truncated: bool,
}
