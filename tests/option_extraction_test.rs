use std::io::{self, Read};

use rs_ucscclasses::{
    extract_options, extract_options_from_str, extract_options_with, CatalogOption, Error,
    ExtractionResult, Options, PageMarkers,
};

const LANDING_PAGE: &str = include_str!("fixtures/landing_page.html");

fn values(options: &[CatalogOption]) -> Vec<&str> {
    options.iter().map(|o| o.value.as_str()).collect()
}

fn extract_chunked(html: &str, read_buffer_size: usize) -> ExtractionResult {
    let options = Options {
        read_buffer_size,
        ..Options::default()
    };
    extract_options_with(&mut html.as_bytes(), &options).expect("extraction failed")
}

/// Reader that hands out at most `chunk` bytes per call.
struct Trickle<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Reader that fails after yielding its data.
struct FailAfter<'a> {
    data: &'a [u8],
}

impl Read for FailAfter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away"));
        }
        let n = buf.len().min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn landing_page_terms_in_document_order() {
    let result = extract_options_from_str(LANDING_PAGE).expect("extraction failed");

    assert_eq!(values(&result.terms), ["2250", "2248", "2244"]);
    assert_eq!(result.terms[0].name, "2025 Winter Quarter");
    assert!(!result.terms[0].selected);
    assert!(result.terms[1].selected);
    assert_eq!(result.selected_term().map(|t| t.value.as_str()), Some("2248"));
}

#[test]
fn landing_page_subjects_seeded_and_sentinel_dropped() {
    let result = extract_options_from_str(LANDING_PAGE).expect("extraction failed");

    assert_eq!(result.subjects[0], CatalogOption::new("All", ""));
    assert_eq!(values(&result.subjects), ["", "AM", "ART", "CSE", "MATH"]);
    assert_eq!(result.subjects[2].name, "Art & Design");
}

#[test]
fn layout_comment_keeps_subject_topic() {
    let result = extract_options_from_str(LANDING_PAGE).expect("extraction failed");
    assert!(result.subjects.iter().any(|s| s.value == "CSE"));
    assert!(result.subjects.iter().any(|s| s.value == "MATH"));
}

#[test]
fn landing_page_ges_and_nothing_after_terminator() {
    let result = extract_options_from_str(LANDING_PAGE).expect("extraction failed");

    assert_eq!(values(&result.ges), ["CC", "IM", "MF"]);
    assert_eq!(result.ges[2].name, "Mathematical and Formal Reasoning");

    let all = result.terms.iter().chain(&result.subjects).chain(&result.ges);
    for option in all {
        assert_ne!(option.value, "9999");
        assert_ne!(option.value, "between");
    }
}

#[test]
fn markers_inside_script_and_style_are_ignored() {
    let result = extract_options_from_str(LANDING_PAGE).expect("extraction failed");
    assert!(result.terms.iter().all(|t| t.value != "0000"));
}

#[test]
fn result_independent_of_read_size() {
    let baseline = extract_chunked(LANDING_PAGE, 8192);
    for size in [1, 2, 7, 64, 1000, 1024, 4096] {
        assert_eq!(extract_chunked(LANDING_PAGE, size), baseline, "read size {size}");
    }
}

#[test]
fn result_independent_of_reader_chunking() {
    let baseline = extract_options_from_str(LANDING_PAGE).expect("extraction failed");
    for chunk in [1, 3, 17, 512] {
        let mut reader = Trickle {
            data: LANDING_PAGE.as_bytes(),
            chunk,
        };
        let result = extract_options(&mut reader).expect("extraction failed");
        assert_eq!(result, baseline, "chunk {chunk}");
    }
}

#[test]
fn extraction_is_deterministic() {
    let first = extract_options_from_str(LANDING_PAGE).expect("extraction failed");
    let second = extract_options_from_str(LANDING_PAGE).expect("extraction failed");
    assert_eq!(first, second);
}

#[test]
fn empty_input_yields_seed_only() {
    let result = extract_options_from_str("").expect("extraction failed");
    assert_eq!(result, ExtractionResult::seeded());
    assert_eq!(result.subjects.len(), 1);
}

#[test]
fn read_error_before_terminator_is_reported() {
    let html = r#"<!--Term--><option value="2248">Fall</option>"#;
    let mut reader = FailAfter {
        data: html.as_bytes(),
    };

    let err = extract_options(&mut reader).expect_err("read error should surface");
    assert!(matches!(err, Error::StreamRead(ref e) if e.kind() == io::ErrorKind::ConnectionReset));
}

#[test]
fn read_error_after_terminator_is_never_seen() {
    let html = r#"<!--Term--><option value="2220">Fall 2024</option><!--Course Units--><p>rest"#;
    let mut reader = FailAfter {
        data: html.as_bytes(),
    };

    let result = extract_options(&mut reader).expect("terminator should end reading");
    assert_eq!(result.terms, vec![CatalogOption::new("Fall 2024", "2220")]);
}

#[test]
fn read_error_after_terminator_with_small_reads() {
    let html = concat!(
        "<html><head><meta charset=\"utf-8\"></head><body>",
        r#"<!--Geneds--><option value="CC">Cross-Cultural Analysis</option>"#,
        "<!--Course Units-->",
    );
    let mut reader = FailAfter {
        data: html.as_bytes(),
    };
    let options = Options {
        read_buffer_size: 5,
        ..Options::default()
    };

    let result = extract_options_with(&mut reader, &options).expect("terminator should end reading");
    assert_eq!(values(&result.ges), ["CC"]);
}

#[test]
fn read_error_after_terminator_behind_non_ascii_label() {
    let html = "<!--Subject--><option value=\"SPAN\">Espa\u{f1}ol</option><!--Course Units-->";
    let mut reader = FailAfter {
        data: html.as_bytes(),
    };

    let result = extract_options(&mut reader).expect("terminator should end reading");
    assert_eq!(result.subjects[1].name, "Espa\u{f1}ol");
}

#[test]
fn unknown_comment_clears_topic() {
    let result = extract_options_from_str(concat!(
        r#"<!--Term--><option value="2248">Fall</option>"#,
        r#"<!-- Reg Status --><option value="all">All Classes</option>"#,
    ))
    .expect("extraction failed");

    assert_eq!(values(&result.terms), ["2248"]);
    assert_eq!(result.subjects.len(), 1);
    assert!(result.ges.is_empty());
}

#[test]
fn marker_comments_are_trimmed_and_case_sensitive() {
    let result = extract_options_from_str(concat!(
        "<!--\n  Geneds\t-->",
        r#"<option value="PE-H">Perspectives: Human Behavior</option>"#,
        "<!-- term -->",
        r#"<option value="2248">Fall</option>"#,
    ))
    .expect("extraction failed");

    assert_eq!(values(&result.ges), ["PE-H"]);
    assert!(result.terms.is_empty());
}

#[test]
fn option_without_attributes_is_not_tracked() {
    let result = extract_options_from_str(concat!(
        "<!--Term--><option>Placeholder</option>",
        r#"<option value="2248">Fall</option>"#,
    ))
    .expect("extraction failed");

    assert_eq!(result.terms, vec![CatalogOption::new("Fall", "2248")]);
}

#[test]
fn label_is_kept_verbatim() {
    let result = extract_options_from_str(
        "<!--Subject--><option value=\"LIT\">\n  Literature  </option><!--Course Units-->",
    )
    .expect("extraction failed");

    assert_eq!(result.subjects[1].name, "\n  Literature  ");
}

#[test]
fn custom_markers() {
    let mut markers = PageMarkers::default();
    markers.terminator = "End Lists".to_string();
    markers.sentinels.push("none".to_string());
    let options = Options {
        markers,
        ..Options::default()
    };

    let html = concat!(
        r#"<!--Term--><option value="none">Pick one</option>"#,
        r#"<option value="2248">Fall</option>"#,
        r#"<!--Course Units--><option value="2250">Winter</option>"#,
        r#"<!--End Lists-->"#,
    );
    let result = extract_options_with(&mut html.as_bytes(), &options).expect("extraction failed");

    // "Course Units" is an ordinary comment here and clears the topic.
    assert_eq!(values(&result.terms), ["2248"]);
}

#[test]
fn serializes_to_json_lists() {
    let result = extract_options_from_str(
        r#"<!--Term--><option value="2248" selected>Fall</option><option value="2244">Summer</option>"#,
    )
    .expect("extraction failed");

    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(
        json["terms"],
        serde_json::json!([
            {"name": "Fall", "value": "2248", "selected": true},
            {"name": "Summer", "value": "2244"},
        ])
    );
    assert_eq!(json["subjects"][0]["name"], "All");
}
