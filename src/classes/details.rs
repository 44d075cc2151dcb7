//! Class detail page parser.
//!
//! The detail page is a stack of bootstrap panels. The summary fields live in
//! two definition lists whose `dd` elements carry no labels we can select on,
//! so they are read by position.

use tracing::debug;

use super::{ClassDetails, ClassStatus, DiscussionSection};
use crate::dom::{self, Selection};
use crate::error::{Error, Result};
use crate::patterns::{CLASS_FULL_TITLE, SECTION_ID_NAME, UNITS};
use crate::text::{clean_string, extract_numbers, remove_prefix};

/// Leading text of the meeting information panel. When a class has no
/// requirements or notes this panel slides into their position.
const MEETING_TABLE_HEADER: &str = "Days Times Room Instructor";

/// Positions among the page's `dd` elements.
mod dd {
    pub const CAREER: usize = 0;
    pub const CLASS_NUMBER: usize = 2;
    pub const CLASS_TYPE: usize = 3;
    pub const UNITS: usize = 5;
    pub const GE: usize = 6;
    pub const STATUS: usize = 7;
    pub const CAPACITY: usize = 9;
    pub const ENROLLED: usize = 10;
    pub const WAITLIST_CAPACITY: usize = 11;
    pub const WAITLIST_TOTAL: usize = 12;
}

/// Positions among `.panel > .panel-body` elements.
mod panel {
    pub const DESCRIPTION: usize = 2;
    pub const REQUIREMENTS: usize = 3;
    pub const NOTES: usize = 4;
}

/// Parse a class detail page.
///
/// # Errors
///
/// - [`Error::UnexpectedStatus`] if the status label is not recognized
/// - [`Error::InvalidNumber`] if an enrollment count is not an integer
/// - [`Error::MissingUnits`] if the units field has no `N units`
pub fn parse_class_details(html: &str) -> Result<ClassDetails> {
    let doc = dom::parse(html);
    let dds = doc.select("dd");

    let status_label = clean_string(&dom::nth_text(&dds, dd::STATUS));
    let status =
        ClassStatus::from_label(&status_label).ok_or_else(|| Error::UnexpectedStatus(status_label))?;

    let capacity = parse_count(&dds, dd::CAPACITY, "capacity")?;
    let enrolled = parse_count(&dds, dd::ENROLLED, "enrolled")?;
    let waitlist_total = parse_count(&dds, dd::WAITLIST_TOTAL, "waitlist total")?;
    let waitlist_capacity = parse_count(&dds, dd::WAITLIST_CAPACITY, "waitlist capacity")?;

    let units_text = dom::nth_text(&dds, dd::UNITS);
    let units = UNITS
        .captures(&units_text)
        .and_then(|c| c.get(1))
        .ok_or(Error::MissingUnits)?
        .as_str()
        .parse()
        .map_err(|source| Error::InvalidNumber {
            field: "units",
            source,
        })?;

    let full_title = clean_string(&dom::nth_text(&doc.select("h2"), 0));
    let (subject, number, full_number, name) = match CLASS_FULL_TITLE.captures(&full_title) {
        Some(caps) => {
            let subject = caps[1].to_string();
            let number = caps[2].to_string();
            let full_number = format!("{subject} {number} - {}", &caps[3]);
            (subject, number, full_number, caps[4].to_string())
        }
        None => {
            debug!(title = %full_title, "detail heading has an unexpected shape");
            Default::default()
        }
    };

    let bodies = doc.select(".panel > .panel-body");
    let tds = doc.select("td");

    let discussion_sections: Vec<DiscussionSection> = doc
        .select(".row-striped")
        .iter()
        .filter_map(|row| parse_section(&row))
        .collect();

    debug!(
        id = %clean_string(&dom::nth_text(&dds, dd::CLASS_NUMBER)),
        sections = discussion_sections.len(),
        "parsed class details"
    );

    Ok(ClassDetails {
        id: clean_string(&dom::nth_text(&dds, dd::CLASS_NUMBER)),
        full_title,
        full_number,
        name,
        subject,
        number,
        status,
        capacity,
        enrolled,
        waitlist_total,
        waitlist_capacity,
        career: clean_string(&dom::nth_text(&dds, dd::CAREER)),
        description: clean_string(&dom::nth_text(&bodies, panel::DESCRIPTION)),
        enrollment_requirements: unless_meeting_table(dom::nth_text(&bodies, panel::REQUIREMENTS)),
        class_notes: unless_meeting_table(dom::nth_text(&bodies, panel::NOTES)),
        units,
        class_type: clean_string(&dom::nth_text(&dds, dd::CLASS_TYPE)),
        ge: clean_string(&dom::nth_text(&dds, dd::GE)),
        location: clean_string(&dom::nth_text(&tds, 1)),
        time_day: clean_string(&dom::nth_text(&tds, 0)),
        instructor: clean_string(&dom::nth_text(&tds, 2)),
        meeting_dates: clean_string(&dom::nth_text(&tds, 3)),
        discussion_sections,
    })
}

fn parse_count(dds: &Selection, index: usize, field: &'static str) -> Result<u32> {
    dom::nth_text(dds, index)
        .trim()
        .parse()
        .map_err(|source| Error::InvalidNumber { field, source })
}

fn unless_meeting_table(text: String) -> String {
    let text = clean_string(&text);
    if text.starts_with(MEETING_TABLE_HEADER) {
        String::new()
    } else {
        text
    }
}

fn parse_section(row: &Selection) -> Option<DiscussionSection> {
    let divs = row.select("div");

    let header = dom::nth_text(&divs, 0);
    let Some(caps) = SECTION_ID_NAME.captures(&header) else {
        debug!(header = %clean_string(&header), "skipping section with malformed header");
        return None;
    };

    let status_label = clean_string(&dom::nth_text(&divs, 6));
    let Some(status) = ClassStatus::from_label(&status_label) else {
        debug!(id = &caps[1], status = %status_label, "skipping section with unknown status");
        return None;
    };

    let enrollment = extract_numbers(&dom::nth_text(&divs, 4), 2);
    let waitlist = extract_numbers(&dom::nth_text(&divs, 5), 2);

    Some(DiscussionSection {
        id: caps[1].to_string(),
        name: clean_string(&caps[2]),
        status,
        location: remove_prefix(&dom::nth_text(&divs, 3)),
        instructor: clean_string(&dom::nth_text(&divs, 2)),
        enrolled: enrollment[0],
        capacity: enrollment[1],
        time_day: clean_string(&dom::nth_text(&divs, 1)),
        waitlist_total: waitlist[0],
        waitlist_capacity: waitlist[1],
    })
}
