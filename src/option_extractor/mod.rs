//! Topic-tracked option extraction from the class search landing page.
//!
//! The landing page lists terms, subjects and GE categories as flat runs of
//! `<option>` tags, each run announced by a marker comment:
//!
//! ```html
//! <!-- Term -->
//! <option value="2248" selected>2024 Fall Quarter</option>
//! <!-- Subject -->
//! <option value="">All Subjects</option>
//! <option value="CSE">Computer Science and Engineering</option>
//! <!-- Course Units -->
//! ```
//!
//! The extractor streams tokens through [`state::step`] in a single forward
//! pass and never materializes a DOM.
//!
//! # Module Structure
//!
//! - `state`: scan state and the pure transition function

pub mod state;

use std::io::Read;

use crate::error::Result;
use crate::options::Options;
use crate::result::ExtractionResult;
use crate::tokenizer::TokenStream;

pub use state::{step, Emission, PendingOption, ScanState};

/// Extract option lists from an HTML stream.
///
/// Reading stops at the terminator comment or at end of input, whichever
/// comes first. The reader is borrowed and left open for the caller.
///
/// # Errors
///
/// Returns [`Error::StreamRead`](crate::Error::StreamRead) if the reader
/// fails before end of input. Partial results are discarded in that case.
pub fn extract_options<R: Read + ?Sized>(
    reader: &mut R,
    options: &Options,
) -> Result<ExtractionResult> {
    let mut result = ExtractionResult::seeded();
    let mut state = ScanState::new();

    for token in TokenStream::new(reader, options.read_buffer_size) {
        let token = token?;
        let (next, emission) = step(state, &token, &options.markers);
        state = next;

        if let Some((topic, option)) = emission {
            result.push(topic, option);
        }
        if state.finished {
            break;
        }
    }

    tracing::debug!(
        terms = result.terms.len(),
        subjects = result.subjects.len(),
        ges = result.ges.len(),
        terminated = state.finished,
        "extracted option lists"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::CatalogOption;

    fn extract(html: &str) -> ExtractionResult {
        extract_options(&mut html.as_bytes(), &Options::default()).unwrap()
    }

    #[test]
    fn single_term_scenario() {
        let result =
            extract(r#"<!--Term--><option value="2220">Fall 2024</option><!--Course Units-->"#);

        assert_eq!(result.terms, vec![CatalogOption::new("Fall 2024", "2220")]);
        assert_eq!(result.subjects, vec![CatalogOption::new("All", "")]);
        assert!(result.ges.is_empty());
    }

    #[test]
    fn subject_and_ge_scenario() {
        let result = extract(concat!(
            r#"<!--Subject--><option value="">All</option>"#,
            r#"<option value="CSE">Computer Science</option>"#,
            r#"<!--Geneds--><option value="PR">Pre-Collegiate</option><!--Course Units-->"#,
        ));

        assert_eq!(
            result.subjects,
            vec![
                CatalogOption::new("All", ""),
                CatalogOption::new("Computer Science", "CSE"),
            ]
        );
        assert_eq!(result.ges, vec![CatalogOption::new("Pre-Collegiate", "PR")]);
        assert!(result.terms.is_empty());
    }

    #[test]
    fn no_markers_yields_seed_only() {
        let result = extract(r#"<select><option value="CSE">CSE</option></select>"#);
        assert_eq!(result, ExtractionResult::seeded());
    }

    #[test]
    fn stops_reading_at_terminator() {
        struct OneShot<'a> {
            data: Option<&'a [u8]>,
        }
        impl Read for OneShot<'_> {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                let data = self.data.take().expect("read past terminator");
                buf[..data.len()].copy_from_slice(data);
                Ok(data.len())
            }
        }

        let html = r#"<!--Term--><option value="2220">Fall</option><!--Course Units--><p>rest"#;
        let mut reader = OneShot {
            data: Some(html.as_bytes()),
        };

        let result = extract_options(&mut reader, &Options::default()).unwrap();
        assert_eq!(result.terms.len(), 1);
    }
}
