//! Error types for rs-ucscclasses.
//!
//! Only I/O failures are fatal for option extraction. Markup that does not
//! match the expected template degrades to empty lists instead of erroring.
//! The detail-page parser is stricter because its numeric fields feed
//! enrollment math downstream.

use std::num::ParseIntError;

/// Error type for extraction and fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying reader failed before clean end of input.
    #[error("failed to read HTML stream: {0}")]
    StreamRead(#[from] std::io::Error),

    /// A class status label was not one of the known labels.
    #[error("unexpected class status: {0:?}")]
    UnexpectedStatus(String),

    /// A numeric field on a detail page did not parse.
    #[error("while parsing detail {field}: {source}")]
    InvalidNumber {
        /// Name of the field being parsed.
        field: &'static str,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The units field on a detail page did not contain `N units`.
    #[error("failed to parse class units")]
    MissingUnits,

    /// A details link could not be resolved against the base URL.
    #[cfg(feature = "http")]
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level HTTP failure.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[cfg(feature = "http")]
    #[error("HTTP {status} for {url}")]
    HttpStatus {
        /// Response status code.
        status: u16,
        /// Requested URL.
        url: String,
    },
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
