#![cfg(feature = "diagnostics")]

use simai_rs::{
    diagnostics::{SimpleSource, ToAriadne, collect_parse_reports},
    simai::{
        error::{ParseError, ParseErrorKind},
        parse_simai,
    },
};

#[test]
fn test_reports_for_each_problem() {
    const SRC: &str = "&title=Report\n&bpm=abc\n(120){4}1,9,2h,xyz,E";
    let output = parse_simai(SRC);
    assert_eq!(output.errors.len(), 4);

    let reports = collect_parse_reports("report.txt", SRC, &output.errors);
    assert_eq!(reports.len(), output.errors.len());
}

#[test]
fn test_unpositioned_error_still_renders() {
    let source = SimpleSource::new("short.txt", "1h,E");
    let error = ParseError::new(ParseErrorKind::MissingHoldDuration);
    let report = error.to_report(&source);

    let mut rendered = Vec::new();
    report
        .write(
            (
                "short.txt".to_string(),
                ariadne::Source::from(source.text()),
            ),
            &mut rendered,
        )
        .unwrap();
    let rendered = String::from_utf8(rendered).unwrap();
    assert!(rendered.contains("hold has no duration"));
}

#[test]
fn test_span_beyond_text_is_clamped() {
    const SRC: &str = "1,E";
    let source = SimpleSource::new("short.txt", SRC);
    let mut error = ParseError::new(ParseErrorKind::UnrecognizedNote("zz".into()));
    error.span = Some(2..20);
    let report = error.to_report(&source);

    let mut rendered = Vec::new();
    report
        .write(
            ("short.txt".to_string(), ariadne::Source::from(SRC)),
            &mut rendered,
        )
        .unwrap();
    assert!(!rendered.is_empty());
}
