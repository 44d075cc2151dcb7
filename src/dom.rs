//! DOM Query Adapter
//!
//! Positional helpers over `dom_query` selections. The search and detail pages
//! identify most fields only by their position among same-tag siblings (the
//! third `dd`, the second `div a`, ...), so these helpers return empty values
//! for missing positions instead of failing.

pub use dom_query::{Document, Selection};

/// Text of the node at `index` in `sel`, or an empty string.
#[must_use]
pub fn nth_text(sel: &Selection, index: usize) -> String {
    sel.nodes()
        .get(index)
        .map(|node| node.text().to_string())
        .unwrap_or_default()
}

/// Attribute of the node at `index` in `sel`.
#[must_use]
pub fn nth_attr(sel: &Selection, index: usize, name: &str) -> Option<String> {
    sel.nodes()
        .get(index)
        .and_then(|node| node.attr(name))
        .map(|value| value.to_string())
}

/// Concatenated text of every node in `sel`.
#[inline]
#[must_use]
pub fn text(sel: &Selection) -> String {
    sel.text().to_string()
}

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
