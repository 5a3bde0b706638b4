//! Client configuration.
//!
//! Provides [`ClientConfig`] for tuning the transfer chunk size, the
//! pagination stall bound, and the scratch directory used by the
//! filename-derived download helpers. Values can be loaded from environment
//! variables via [`ClientConfig::from_env`].

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default size in bytes of the download copy buffer.
///
/// A tunable constant, not a protocol requirement.
pub const DEFAULT_TRANSFER_CHUNK_SIZE: usize = 1024;

/// Default number of consecutive stalled listing pages tolerated before the
/// paginator fails with a protocol error.
pub const DEFAULT_MAX_STALLED_PAGES: u32 = 8;

/// Client configuration.
///
/// # Examples
///
/// ```
/// use bucketry_client::ClientConfig;
///
/// let config = ClientConfig::default();
/// assert_eq!(config.transfer_chunk_size, 1024);
///
/// let config = ClientConfig::builder().transfer_chunk_size(64 * 1024).build();
/// assert_eq!(config.transfer_chunk_size, 65_536);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Size in bytes of the buffer used by the chunked download loop.
    #[builder(default = DEFAULT_TRANSFER_CHUNK_SIZE)]
    pub transfer_chunk_size: usize,

    /// Consecutive stalled pages (truncated, empty, unchanged token)
    /// tolerated before pagination fails instead of looping forever.
    #[builder(default = DEFAULT_MAX_STALLED_PAGES)]
    pub max_stalled_pages: u32,

    /// Directory used by the filename-derived download helpers.
    #[builder(default = String::from("./tmp"))]
    pub scratch_dir: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transfer_chunk_size: DEFAULT_TRANSFER_CHUNK_SIZE,
            max_stalled_pages: DEFAULT_MAX_STALLED_PAGES,
            scratch_dir: String::from("./tmp"),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `BUCKETRY_TRANSFER_CHUNK_SIZE` | `1024` |
    /// | `BUCKETRY_MAX_STALLED_PAGES` | `8` |
    /// | `BUCKETRY_SCRATCH_DIR` | `./tmp` |
    ///
    /// # Examples
    ///
    /// ```
    /// use bucketry_client::ClientConfig;
    ///
    /// let config = ClientConfig::from_env();
    /// assert!(config.transfer_chunk_size > 0);
    /// ```
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("BUCKETRY_TRANSFER_CHUNK_SIZE") {
            if let Ok(n) = v.parse::<usize>() {
                if n > 0 {
                    config.transfer_chunk_size = n;
                }
            }
        }
        if let Ok(v) = std::env::var("BUCKETRY_MAX_STALLED_PAGES") {
            if let Ok(n) = v.parse::<u32>() {
                if n > 0 {
                    config.max_stalled_pages = n;
                }
            }
        }
        if let Ok(v) = std::env::var("BUCKETRY_SCRATCH_DIR") {
            if !v.is_empty() {
                config.scratch_dir = v;
            }
        }

        config
    }
}
