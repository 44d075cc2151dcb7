//! Search form submission fields and the search results page.
//!
//! Each result is a `div.panel-default`. Most fields are only identifiable by
//! position (hidden form inputs, grid columns), so a panel that does not have
//! the expected shape is skipped rather than partially filled.

use tracing::debug;

use super::{ClassBriefInfo, ClassStatus, SearchOptions};
use crate::dom::{self, Selection};
use crate::patterns::NUMBER;
use crate::text::{clean_string, remove_prefix};

/// Separator between the full number and the name in a result title.
const TITLE_SEPARATOR: &str = "\u{a0}\u{a0}\u{a0}";

/// A result panel's detail form carries at least this many hidden inputs.
const MIN_FORM_INPUTS: usize = 22;

/// Positions of the hidden inputs that carry data.
const INPUT_CLASS_NUMBER: usize = 2;
const INPUT_CATALOG_NUMBER: usize = 4;
const INPUT_SUBJECT: usize = 15;

impl SearchOptions {
    /// Search options for one term with no other filters.
    #[must_use]
    pub fn for_term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    /// Fields of the search form POST, in submission order.
    ///
    /// Filters the site supports but this crate does not expose (instructor,
    /// unit range, days, times, career) are submitted empty.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("action", "results".to_string()),
            ("binds[:term]", self.term.clone()),
            ("binds[:reg_status]", self.registration_status.form_value().to_string()),
            ("binds[:subject]", self.subject.clone()),
            ("binds[:catalog_nbr_op]", self.number_search_method.form_value().to_string()),
            ("binds[:catalog_nbr]", self.number.clone()),
            ("binds[:title]", self.title.clone()),
            ("binds[:instr_name_op]", "=".to_string()),
            ("binds[:instructor]", String::new()),
            ("binds[:ge]", self.ge.clone()),
            ("binds[:crse_units_op]", "=".to_string()),
            ("binds[:crse_units_from]", String::new()),
            ("binds[:crse_units_to]", String::new()),
            ("binds[:crse_units_exact]", String::new()),
            ("binds[:days]", String::new()),
            ("binds[:times]", String::new()),
            ("binds[:acad_career]", String::new()),
        ]
    }
}

/// Parse every well-formed result on a search results page.
///
/// Malformed panels are skipped and logged at debug level. A page with no
/// results yields an empty list.
#[must_use]
pub fn parse_search_results(html: &str) -> Vec<ClassBriefInfo> {
    let doc = dom::parse(html);
    let panels = doc.select("div.panel-default");

    let results: Vec<ClassBriefInfo> = panels
        .iter()
        .enumerate()
        .filter_map(|(index, panel)| match parse_panel(&panel) {
            Ok(info) => Some(info),
            Err(reason) => {
                debug!(index, reason, "skipping search result panel");
                None
            }
        })
        .collect();

    debug!(panels = panels.length(), results = results.len(), "parsed search results");
    results
}

fn parse_panel(panel: &Selection) -> Result<ClassBriefInfo, &'static str> {
    let inputs = panel.select("form input");
    if inputs.length() < MIN_FORM_INPUTS {
        return Err("too few form inputs");
    }

    let status_label = dom::text(&panel.select("span.sr-only"));
    let status = ClassStatus::from_label(&status_label).ok_or("unknown status")?;

    let title = dom::text(&panel.select("h2 > a"));
    let mut title_parts = title.split(TITLE_SEPARATOR);
    let (full_number, name) = match (title_parts.next(), title_parts.next()) {
        (Some(number), Some(name)) => (clean_string(number), clean_string(name)),
        _ => (String::new(), String::new()),
    };

    let enrollment = dom::nth_text(&panel.select("div.row").children(), 3);
    let counts = NUMBER
        .find_iter(&enrollment)
        .take(2)
        .map(|m| m.as_str().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| "enrollment count out of range")?;
    let [enrolled, capacity] = counts[..] else {
        return Err("missing enrollment counts");
    };

    let details_url = dom::nth_attr(&panel.select("div a"), 1, "href").ok_or("missing details link")?;

    let columns = panel.select(".col-xs-12 > .col-xs-6");

    Ok(ClassBriefInfo {
        id: dom::nth_attr(&inputs, INPUT_CLASS_NUMBER, "value").unwrap_or_default(),
        details_url,
        full_title: clean_string(&title),
        full_number,
        name,
        subject: dom::nth_attr(&inputs, INPUT_SUBJECT, "value").unwrap_or_default(),
        number: dom::nth_attr(&inputs, INPUT_CATALOG_NUMBER, "value").unwrap_or_default(),
        location: remove_prefix(&dom::nth_text(&columns, 0)),
        time_day: clean_string(&remove_prefix(&dom::nth_text(&columns, 1))),
        instructor: remove_prefix(&dom::nth_text(&panel.select("div.col-xs-6"), 1)),
        status,
        enrolled,
        capacity,
    })
}
