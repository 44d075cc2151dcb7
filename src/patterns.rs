//! Compiled regex patterns and the landing-page marker vocabulary.
//!
//! All tables are built once on first use with `LazyLock` and never mutated
//! afterwards.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::result::Topic;

// =============================================================================
// Landing Page Markers
// =============================================================================

/// Comment vocabulary that delimits the option groups on the landing page.
///
/// The page has no nested `<select>` structure per group; each run of
/// `<option>` tags is introduced by a comment such as `<!-- Term -->` and the
/// useful part of the page ends at `<!-- Course Units -->`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMarkers {
    /// Exact (trimmed, case-sensitive) comment texts that open a topic.
    pub topics: Vec<(String, Topic)>,

    /// Comment text that ends extraction.
    pub terminator: String,

    /// Comments containing this fragment are layout hints and never reset
    /// the current topic.
    pub layout_hint: String,

    /// Option values that are never emitted.
    pub sentinels: Vec<String>,
}

impl PageMarkers {
    /// Topic opened by a trimmed comment text, if any.
    #[must_use]
    pub fn topic_for(&self, comment: &str) -> Option<Topic> {
        self.topics
            .iter()
            .find(|(marker, _)| marker == comment)
            .map(|(_, topic)| *topic)
    }

    /// Whether a trimmed comment text ends extraction.
    #[must_use]
    pub fn is_terminator(&self, comment: &str) -> bool {
        comment == self.terminator
    }

    /// Whether a comment is decorative markup that must not reset the topic.
    ///
    /// This is a substring heuristic tied to the current page template. If
    /// the template changes, this is the first rule to revisit.
    #[must_use]
    pub fn is_layout_hint(&self, comment: &str) -> bool {
        comment.contains(self.layout_hint.as_str())
    }

    /// Whether an option value must be dropped.
    #[must_use]
    pub fn is_sentinel(&self, value: &str) -> bool {
        self.sentinels.iter().any(|s| s == value)
    }
}

impl Default for PageMarkers {
    fn default() -> Self {
        Self {
            topics: vec![
                ("Term".to_string(), Topic::Term),
                ("Subject".to_string(), Topic::Subject),
                ("Geneds".to_string(), Topic::Ge),
            ],
            terminator: "Course Units".to_string(),
            layout_hint: "align".to_string(),
            sentinels: vec!["begins".to_string(), String::new(), "\n".to_string()],
        }
    }
}

/// Marker vocabulary of the UCSC class search landing page.
pub static DEFAULT_MARKERS: LazyLock<PageMarkers> = LazyLock::new(PageMarkers::default);

// =============================================================================
// Field Cleanup Patterns
// =============================================================================

/// Runs of decimal digits.
pub static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("NUMBER regex"));

/// Labelled field such as `"Instructor: Smith,J."`; captures the value.
pub static LABEL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]: (.+)").expect("LABEL_PREFIX regex"));

/// Units field on a detail page, e.g. `"5 units"`.
pub static UNITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+) units").expect("UNITS regex"));

/// Detail page heading, e.g. `"CSE 13S - 01 Comp Sys and C Prog"`.
///
/// Captures subject, catalog number, section and name.
pub static CLASS_FULL_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+) ([0-9][A-Za-z0-9]*) - ([0-9]+) (.+)$")
        .expect("CLASS_FULL_TITLE regex")
});

/// Discussion section header, e.g. `"#21490 DI 01A"`; captures id and name.
pub static SECTION_ID_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([0-9]+) (.+)").expect("SECTION_ID_NAME regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_markers_map_topics_case_sensitively() {
        let markers = PageMarkers::default();
        assert_eq!(markers.topic_for("Term"), Some(Topic::Term));
        assert_eq!(markers.topic_for("Subject"), Some(Topic::Subject));
        assert_eq!(markers.topic_for("Geneds"), Some(Topic::Ge));
        assert_eq!(markers.topic_for("term"), None);
        assert_eq!(markers.topic_for("GE"), None);
    }

    #[test]
    fn terminator_and_layout_hint() {
        let markers = &*DEFAULT_MARKERS;
        assert!(markers.is_terminator("Course Units"));
        assert!(!markers.is_terminator("Course Units "));
        assert!(markers.is_layout_hint("div align=center"));
        assert!(!markers.is_layout_hint("Instructor"));
    }

    #[test]
    fn sentinels() {
        let markers = &*DEFAULT_MARKERS;
        assert!(markers.is_sentinel("begins"));
        assert!(markers.is_sentinel(""));
        assert!(markers.is_sentinel("\n"));
        assert!(!markers.is_sentinel("CSE"));
    }

    #[test]
    fn class_full_title_captures_parts() {
        let caps = CLASS_FULL_TITLE
            .captures("CSE 13S - 01 Comp Sys and C Prog")
            .unwrap();
        assert_eq!(&caps[1], "CSE");
        assert_eq!(&caps[2], "13S");
        assert_eq!(&caps[3], "01");
        assert_eq!(&caps[4], "Comp Sys and C Prog");
    }

    #[test]
    fn label_prefix_does_not_cross_lines() {
        let caps = LABEL_PREFIX.captures("Location: Soc Sci 2 075\nnext").unwrap();
        assert_eq!(&caps[1], "Soc Sci 2 075");
    }
}
