//! Scan state for topic-tracked option extraction.
//!
//! [`step`] is the whole state machine: it takes the current [`ScanState`]
//! and one token and returns the next state plus, at most, one option to
//! append. It performs no I/O, so the comment-driven topic logic can be
//! exercised token by token.

use crate::patterns::PageMarkers;
use crate::result::{CatalogOption, Topic};
use crate::tokenizer::MarkupToken;

/// Option whose start tag has been seen but whose label has not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingOption {
    /// `value` attribute, empty if absent.
    pub value: String,

    /// Whether the tag carried `selected`.
    pub selected: bool,
}

/// State carried between tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Topic set by the most recent marker comment.
    pub topic: Option<Topic>,

    /// Option tag waiting for its label.
    pub pending: PendingOption,

    /// Set after an `<option>` start tag, cleared once its label is consumed.
    pub awaiting_text: bool,

    /// Set once the terminator comment is seen. Terminal.
    pub finished: bool,
}

impl ScanState {
    /// Initial state: no topic, nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// An option to append to the list for its topic.
pub type Emission = (Topic, CatalogOption);

/// Advance the scan by one token.
///
/// - Comments switch topic, finish the scan, or clear the topic. Layout-hint
///   comments are ignored.
/// - An `<option>` start tag with attributes records its value.
/// - The next text token under an active topic becomes the label; the option
///   is emitted unless its value is a sentinel.
///
/// Tokens after the terminator leave the state unchanged.
#[must_use]
pub fn step(
    mut state: ScanState,
    token: &MarkupToken,
    markers: &PageMarkers,
) -> (ScanState, Option<Emission>) {
    if state.finished {
        return (state, None);
    }

    match token {
        MarkupToken::Comment(raw) => {
            let comment = raw.trim();
            if let Some(topic) = markers.topic_for(comment) {
                tracing::trace!(?topic, "topic marker");
                state.topic = Some(topic);
            } else if markers.is_terminator(comment) {
                tracing::trace!("terminator marker");
                state.finished = true;
            } else if !markers.is_layout_hint(comment) {
                state.topic = None;
            }
            (state, None)
        }
        MarkupToken::StartTag { name, attrs } if name == "option" && !attrs.is_empty() => {
            state.pending = PendingOption {
                value: token.attr("value").unwrap_or_default().to_string(),
                selected: token.has_attr("selected"),
            };
            state.awaiting_text = true;
            (state, None)
        }
        MarkupToken::Text(label) if state.awaiting_text => {
            let Some(topic) = state.topic else {
                return (state, None);
            };

            let pending = std::mem::take(&mut state.pending);
            state.awaiting_text = false;

            if markers.is_sentinel(&pending.value) {
                tracing::trace!(value = %pending.value.escape_debug(), "dropping sentinel option");
                return (state, None);
            }

            let option = CatalogOption {
                name: label.clone(),
                value: pending.value,
                selected: pending.selected,
            };
            (state, Some((topic, option)))
        }
        _ => (state, None),
    }
}
