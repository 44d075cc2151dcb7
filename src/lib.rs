//! # rs-ucscclasses
//!
//! Scraper for the UC Santa Cruz class search site.
//!
//! The landing page carries the term, subject and GE option lists. Those are
//! pulled out by a streaming, comment-marker driven extractor that never builds
//! a DOM and stops reading at the end of the last list. Search results and
//! class detail pages are parsed with `dom_query`.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_ucscclasses::extract_options_from_str;
//!
//! let html = r#"<!-- Term --><option value="2248" selected>2024 Fall Quarter</option>
//! <!-- Subject --><option value="CSE">Computer Science and Engineering</option>
//! <!-- Course Units -->"#;
//!
//! let result = extract_options_from_str(html)?;
//! assert_eq!(result.terms[0].value, "2248");
//! assert_eq!(result.subjects.len(), 2); // synthetic "All" plus CSE
//! # Ok::<(), rs_ucscclasses::Error>(())
//! ```
//!
//! ## Features
//!
//! - `http` (default): [`CatalogClient`], a blocking client for the live site
//! - `cli`: the `ucscclasses` binary

mod error;
mod options;
mod result;

/// Page marker vocabulary and compiled field patterns.
pub mod patterns;

/// Character encoding detection and incremental decoding.
pub mod encoding;

/// Streaming markup tokenizer.
pub mod tokenizer;

/// Topic-tracked option extraction for the landing page.
pub mod option_extractor;

/// Class records, search results and detail pages.
pub mod classes;

/// Field cleanup helpers.
pub mod text;

/// DOM query adapter.
pub mod dom;

#[cfg(feature = "http")]
mod client;

// Public API - re-exports
pub use classes::{
    ClassBriefInfo, ClassDetails, ClassStatus, DiscussionSection, RegistrationStatus,
    SearchMethod, SearchOptions,
};
#[cfg(feature = "http")]
pub use client::CatalogClient;
pub use error::{Error, Result};
pub use options::{ClientOptions, Options, DEFAULT_BASE_URL};
pub use patterns::PageMarkers;
pub use result::{CatalogOption, ExtractionResult, Topic};

use std::io::Read;

/// Extracts the term, subject and GE option lists from a landing page stream.
///
/// Reading stops at the `Course Units` marker, so the rest of the page is
/// never pulled from the reader.
///
/// # Example
///
/// ```rust
/// use rs_ucscclasses::extract_options;
///
/// let html = b"<!--Geneds--><option value=\"IM\">Interpreting Arts and Media</option>";
/// let result = extract_options(&mut &html[..])?;
/// assert_eq!(result.ges[0].name, "Interpreting Arts and Media");
/// # Ok::<(), rs_ucscclasses::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::StreamRead`] if the reader fails.
pub fn extract_options<R: Read + ?Sized>(reader: &mut R) -> Result<ExtractionResult> {
    extract_options_with(reader, &Options::default())
}

/// Extracts option lists with custom options.
///
/// # Example
///
/// ```rust
/// use rs_ucscclasses::{extract_options_with, Options, PageMarkers};
///
/// let mut markers = PageMarkers::default();
/// markers.terminator = "Units".to_string();
/// let options = Options { markers, ..Options::default() };
///
/// let html = b"<!--Term--><option value=\"2250\">2025 Winter Quarter</option><!--Units-->";
/// let result = extract_options_with(&mut &html[..], &options)?;
/// assert_eq!(result.terms.len(), 1);
/// # Ok::<(), rs_ucscclasses::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::StreamRead`] if the reader fails.
pub fn extract_options_with<R: Read + ?Sized>(
    reader: &mut R,
    options: &Options,
) -> Result<ExtractionResult> {
    option_extractor::extract_options(reader, options)
}

/// Extracts option lists from an in-memory page.
///
/// # Errors
///
/// Infallible in practice; the signature matches the streaming variants.
pub fn extract_options_from_str(html: &str) -> Result<ExtractionResult> {
    extract_options(&mut html.as_bytes())
}

/// Parses a search results page.
#[must_use]
pub fn parse_search_results(html: &str) -> Vec<ClassBriefInfo> {
    classes::parse_search_results(html)
}

/// Parses a search results page from raw bytes with encoding detection.
#[must_use]
pub fn parse_search_results_bytes(html: &[u8]) -> Vec<ClassBriefInfo> {
    parse_search_results(&encoding::transcode_to_utf8(html))
}

/// Parses a class detail page.
///
/// # Errors
///
/// Fails on an unknown status label, a non-integer enrollment count or a
/// missing units field.
pub fn parse_class_details(html: &str) -> Result<ClassDetails> {
    classes::parse_class_details(html)
}

/// Parses a class detail page from raw bytes with encoding detection.
///
/// # Errors
///
/// See [`parse_class_details`].
pub fn parse_class_details_bytes(html: &[u8]) -> Result<ClassDetails> {
    parse_class_details(&encoding::transcode_to_utf8(html))
}
