//! Result types for option extraction.
//!
//! The landing page offers three option lists (terms, subjects and GE
//! categories). Each list is returned in document order, which is also the
//! order the registration site wants them shown in.

use serde::{Deserialize, Serialize};

/// One selectable entry from the landing page: a term, subject or GE category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogOption {
    /// Human-readable label, e.g. `"2024 Fall Quarter"`.
    pub name: String,

    /// Server-side code submitted with searches, e.g. `"2248"`.
    pub value: String,

    /// Whether the `<option>` tag carried a `selected` attribute.
    ///
    /// The site marks the current term this way.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl CatalogOption {
    /// Create an unselected option.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            selected: false,
        }
    }

    /// The synthetic "All" subject that every subject list starts with.
    #[must_use]
    pub fn all_subjects() -> Self {
        Self::new("All", "")
    }
}

/// Which option list parsed options are currently appended to.
///
/// "No topic" is expressed as `Option<Topic>::None` by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    /// Academic terms.
    Term,
    /// Course subjects (department codes).
    Subject,
    /// General education categories.
    Ge,
}

/// Option lists extracted from the class search landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Available terms.
    pub terms: Vec<CatalogOption>,

    /// Available subjects, always starting with the synthetic "All" entry.
    pub subjects: Vec<CatalogOption>,

    /// Available GE categories.
    pub ges: Vec<CatalogOption>,
}

impl ExtractionResult {
    /// Empty result with the subject list seeded.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            terms: Vec::new(),
            subjects: vec![CatalogOption::all_subjects()],
            ges: Vec::new(),
        }
    }

    /// Append an option to the list for `topic`.
    pub fn push(&mut self, topic: Topic, option: CatalogOption) {
        self.list_mut(topic).push(option);
    }

    /// Options collected for `topic`.
    #[must_use]
    pub fn list(&self, topic: Topic) -> &[CatalogOption] {
        match topic {
            Topic::Term => &self.terms,
            Topic::Subject => &self.subjects,
            Topic::Ge => &self.ges,
        }
    }

    fn list_mut(&mut self, topic: Topic) -> &mut Vec<CatalogOption> {
        match topic {
            Topic::Term => &mut self.terms,
            Topic::Subject => &mut self.subjects,
            Topic::Ge => &mut self.ges,
        }
    }

    /// The first term marked `selected`, if any.
    #[must_use]
    pub fn selected_term(&self) -> Option<&CatalogOption> {
        self.terms.iter().find(|t| t.selected)
    }

    /// Terms with the selected term moved to the front.
    ///
    /// The relative order of the remaining terms is unchanged. When no term
    /// is selected the list is returned as-is.
    #[must_use]
    pub fn terms_selected_first(&self) -> Vec<CatalogOption> {
        let mut terms = self.terms.clone();
        if let Some(idx) = terms.iter().position(|t| t.selected) {
            let selected = terms.remove(idx);
            terms.insert(0, selected);
        }
        terms
    }
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(name: &str, value: &str) -> CatalogOption {
        CatalogOption {
            selected: true,
            ..CatalogOption::new(name, value)
        }
    }

    #[test]
    fn seeded_result_has_only_all_subject() {
        let result = ExtractionResult::seeded();
        assert!(result.terms.is_empty());
        assert!(result.ges.is_empty());
        assert_eq!(result.subjects, vec![CatalogOption::new("All", "")]);
    }

    #[test]
    fn push_routes_by_topic() {
        let mut result = ExtractionResult::seeded();
        result.push(Topic::Term, CatalogOption::new("Fall", "2248"));
        result.push(Topic::Ge, CatalogOption::new("Pre-Collegiate", "PR"));
        result.push(Topic::Subject, CatalogOption::new("Computer Science", "CSE"));

        assert_eq!(result.list(Topic::Term).len(), 1);
        assert_eq!(result.list(Topic::Ge)[0].value, "PR");
        assert_eq!(result.list(Topic::Subject)[1].value, "CSE");
    }

    #[test]
    fn terms_selected_first_moves_selected_to_front() {
        let mut result = ExtractionResult::seeded();
        result.terms = vec![
            CatalogOption::new("Winter", "2250"),
            selected("Fall", "2248"),
            CatalogOption::new("Summer", "2244"),
        ];

        let ordered = result.terms_selected_first();
        let values: Vec<_> = ordered.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, ["2248", "2250", "2244"]);
        assert_eq!(result.selected_term().map(|t| t.value.as_str()), Some("2248"));
    }

    #[test]
    fn terms_selected_first_without_selection_is_identity() {
        let mut result = ExtractionResult::seeded();
        result.terms = vec![
            CatalogOption::new("Winter", "2250"),
            CatalogOption::new("Fall", "2248"),
        ];

        assert_eq!(result.terms_selected_first(), result.terms);
        assert!(result.selected_term().is_none());
    }

    #[test]
    fn unselected_flag_is_not_serialized() {
        let json = serde_json::to_string(&CatalogOption::new("Fall", "2248")).unwrap();
        assert_eq!(json, r#"{"name":"Fall","value":"2248"}"#);

        let json = serde_json::to_string(&selected("Fall", "2248")).unwrap();
        assert!(json.contains(r#""selected":true"#));
    }
}
