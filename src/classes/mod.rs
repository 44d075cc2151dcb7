//! Class records scraped from the search results and class detail pages.
//!
//! # Module Structure
//!
//! - `search`: search form fields and the results page parser
//! - `details`: class detail page parser

pub mod details;
pub mod search;

use serde::{Deserialize, Serialize};

pub use details::parse_class_details;
pub use search::parse_search_results;

/// Enrollment status of a class or section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassStatus {
    /// Seats available.
    Open,
    /// Full, wait list open.
    Waitlist,
    /// Full.
    Closed,
}

impl ClassStatus {
    /// Map the label the site renders (`"Open"`, `"Wait List"`, `"Closed"`).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Open" => Some(Self::Open),
            "Wait List" => Some(Self::Waitlist),
            "Closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Registrability filter for searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    /// Open and closed classes.
    #[default]
    All,
    /// Only open classes.
    Open,
}

impl RegistrationStatus {
    /// Form value submitted to the search endpoint.
    #[must_use]
    pub fn form_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Open => "O",
        }
    }
}

/// How the catalog number is matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMethod {
    /// Exact match.
    #[default]
    Equal,
    /// Substring match.
    Contains,
}

impl SearchMethod {
    /// Form value submitted to the search endpoint.
    #[must_use]
    pub fn form_value(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Contains => "contains",
        }
    }
}

/// Search filters. Only `term` is required; empty strings are ignored by the
/// server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Term code, e.g. `"2248"`.
    pub term: String,
    /// Subject code, e.g. `"CSE"`.
    pub subject: String,
    /// Catalog number, e.g. `"13S"`.
    pub number: String,
    /// How `number` is matched.
    pub number_search_method: SearchMethod,
    /// Registrability filter.
    pub registration_status: RegistrationStatus,
    /// GE category code.
    pub ge: String,
    /// Title keyword.
    pub title: String,
}

/// One class as listed on the search results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBriefInfo {
    /// Class number (not the catalog number).
    pub id: String,

    /// Link to the detail page as it appears in the page, usually relative.
    pub details_url: String,

    /// Title, e.g. `"CSE 13S - 01   Comp Sys and C Prog"`.
    pub full_title: String,

    /// Subject, catalog number and section, e.g. `"CSE 13S - 01"`.
    pub full_number: String,

    /// Short name, e.g. `"Comp Sys and C Prog"`.
    pub name: String,

    /// Subject code, e.g. `"CSE"`.
    pub subject: String,
    /// Catalog number, e.g. `"13S"`.
    pub number: String,
    /// Room, or `"Online"` / `"TBA"` as rendered.
    pub location: String,
    /// Meeting days and times, e.g. `"TuTh 01:30PM-03:05PM"`.
    pub time_day: String,
    /// Instructor names as listed.
    pub instructor: String,

    /// Enrollment status from the panel heading.
    pub status: ClassStatus,

    /// Seats taken.
    pub enrolled: u32,
    /// Seats offered.
    pub capacity: u32,
}

/// A discussion or lab section attached to a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionSection {
    /// Section class number.
    pub id: String,
    /// Section label, e.g. `"DI 01A"`.
    pub name: String,
    /// Enrollment status of the section.
    pub status: ClassStatus,
    /// Room.
    pub location: String,
    /// Section leader.
    pub instructor: String,
    /// Seats offered. Zero if the count was missing.
    pub capacity: u32,
    /// Seats taken. Zero if the count was missing.
    pub enrolled: u32,
    /// Meeting days and times.
    pub time_day: String,
    /// Students on the wait list.
    pub waitlist_total: u32,
    /// Wait list size.
    pub waitlist_capacity: u32,
}

/// Everything on a class detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDetails {
    /// Class number (not the catalog number).
    pub id: String,

    /// Heading, e.g. `"CSE 13S - 01 Comp Sys and C Prog"`.
    pub full_title: String,

    /// e.g. `"CSE 13S - 01"`. Empty if the heading did not match the usual
    /// shape; likewise `name`, `subject` and `number`.
    pub full_number: String,

    /// Short name, e.g. `"Comp Sys and C Prog"`.
    pub name: String,
    /// Subject code.
    pub subject: String,
    /// Catalog number.
    pub number: String,
    /// Enrollment status.
    pub status: ClassStatus,
    /// Seats offered.
    pub capacity: u32,
    /// Seats taken.
    pub enrolled: u32,
    /// Students on the wait list.
    pub waitlist_total: u32,
    /// Wait list size.
    pub waitlist_capacity: u32,
    /// Academic career, e.g. `"Undergraduate"`.
    pub career: String,
    /// Catalog description.
    pub description: String,
    /// Prerequisites and restrictions. Empty when the page has none.
    pub enrollment_requirements: String,
    /// Free-form notes. Empty when the page has none.
    pub class_notes: String,
    /// Credit units.
    pub units: u32,

    /// Observed values are `"Lecture"` and `"Seminar"`.
    pub class_type: String,

    /// General education code, e.g. `"PR-E"`.
    pub ge: String,
    /// Room of the primary meeting.
    pub location: String,
    /// Days and times of the primary meeting.
    pub time_day: String,
    /// Instructor names.
    pub instructor: String,
    /// Date range as rendered, e.g. `"09/26/24 - 12/06/24"`.
    pub meeting_dates: String,
    /// Discussion and lab sections, in page order.
    pub discussion_sections: Vec<DiscussionSection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels() {
        assert_eq!(ClassStatus::from_label("Open"), Some(ClassStatus::Open));
        assert_eq!(ClassStatus::from_label("Wait List"), Some(ClassStatus::Waitlist));
        assert_eq!(ClassStatus::from_label("Closed"), Some(ClassStatus::Closed));
        assert_eq!(ClassStatus::from_label("Waitlist"), None);
        assert_eq!(ClassStatus::from_label(" Open"), None);
    }

    #[test]
    fn form_values() {
        assert_eq!(RegistrationStatus::default().form_value(), "all");
        assert_eq!(RegistrationStatus::Open.form_value(), "O");
        assert_eq!(SearchMethod::default().form_value(), "=");
        assert_eq!(SearchMethod::Contains.form_value(), "contains");
    }
}
