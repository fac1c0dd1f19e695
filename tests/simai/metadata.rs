use pretty_assertions::assert_eq;

use simai_rs::simai::{
    error::{ParseErrorKind, Severity},
    metadata::extract_metadata,
    parse_simai,
};

#[test]
fn test_all_recognized_headers() {
    const SRC: &str = r"&title=Sample Song
&artist=Sample Artist
&bpm=128.5
&des=Charter Name
&lv=12+
(128.5){4}1,2,E
";
    let output = parse_simai(SRC);
    assert_eq!(output.errors, vec![]);

    let metadata = output.chart.metadata();
    assert_eq!(metadata.title.as_deref(), Some("Sample Song"));
    assert_eq!(metadata.artist.as_deref(), Some("Sample Artist"));
    assert_eq!(metadata.bpm.map(|bpm| bpm.as_f64()), Some(128.5));
    assert_eq!(metadata.charter.as_deref(), Some("Charter Name"));
    assert_eq!(metadata.difficulty.as_deref(), Some("12+"));
    assert!(metadata.extra.is_empty());
}

#[test]
fn test_absent_fields_stay_none() {
    let output = parse_simai("(120){4}1,E");
    assert!(output.chart.metadata().is_empty());
    assert_eq!(output.chart.metadata().title, None);
}

#[test]
fn test_comment_style_headers() {
    let output = extract_metadata("# TITLE: Comment Song\n# WholeBPM = 99\n1,E");
    assert_eq!(output.errors, vec![]);
    assert_eq!(output.metadata.title.as_deref(), Some("Comment Song"));
    assert_eq!(output.metadata.bpm.map(|bpm| bpm.as_f64()), Some(99.0));
    assert_eq!(output.notes, "1,E");
}

#[test]
fn test_header_problems_are_positioned() {
    let output = extract_metadata("&title=ok\n&bpm=0\n&broken\n# note to self\n1,E");
    let found: Vec<_> = output
        .errors
        .iter()
        .map(|error| (error.kind.clone(), error.severity, error.line))
        .collect();
    assert_eq!(
        found,
        vec![
            (
                ParseErrorKind::NonPositiveHeaderBpm("0".into()),
                Severity::Error,
                Some(2)
            ),
            (
                ParseErrorKind::MalformedHeader("&broken".into()),
                Severity::Warning,
                Some(3)
            ),
            (
                ParseErrorKind::UnrecognizedHeaderComment("# note to self".into()),
                Severity::Warning,
                Some(4)
            ),
        ]
    );
    assert_eq!(output.notes, "&broken\n1,E");
}
