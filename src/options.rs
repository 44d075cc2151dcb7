//! Configuration options for extraction and fetching.
//!
//! `Options` controls how the landing page is tokenized; `ClientOptions`
//! controls how pages are fetched when the `http` feature is enabled.

use std::time::Duration;

use crate::patterns::{PageMarkers, DEFAULT_MARKERS};
use crate::tokenizer::DEFAULT_READ_BUFFER_SIZE;

/// Class search endpoint. The landing page, the search POST and the detail
/// pages all live under this URL.
pub const DEFAULT_BASE_URL: &str = "https://pisa.ucsc.edu/class_search/index.php";

/// Configuration options for option-list extraction.
///
/// # Example
///
/// ```rust
/// use rs_ucscclasses::Options;
///
/// let options = Options {
///     read_buffer_size: 512,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Bytes requested from the reader per read call.
    ///
    /// Results do not depend on this value.
    ///
    /// Default: `8192`
    pub read_buffer_size: usize,

    /// Comment vocabulary that delimits option groups.
    ///
    /// Override when the page template renames a marker.
    ///
    /// Default: [`DEFAULT_MARKERS`]
    pub markers: PageMarkers,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            markers: DEFAULT_MARKERS.clone(),
        }
    }
}

/// Configuration for [`CatalogClient`](crate::CatalogClient).
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Class search endpoint.
    ///
    /// Default: [`DEFAULT_BASE_URL`]
    pub base_url: String,

    /// Whole-request timeout.
    ///
    /// Default: 5 seconds
    pub timeout: Duration,

    /// `User-Agent` header sent with every request.
    ///
    /// Default: `rs-ucscclasses/<version>`
    pub user_agent: String,

    /// Extraction settings used for the landing page.
    pub extract: Options,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            user_agent: concat!("rs-ucscclasses/", env!("CARGO_PKG_VERSION")).to_string(),
            extract: Options::default(),
        }
    }
}
