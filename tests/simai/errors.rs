use pretty_assertions::assert_eq;

use simai_rs::simai::{
    error::{ParseErrorKind, Severity},
    model::{ChartItem, NoteData},
    parse_simai,
};

#[test]
fn test_slide_without_duration_is_dropped() {
    let output = parse_simai("(120){4}1-5,E");
    assert_eq!(output.chart.notes().count(), 0);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(
        output.errors[0].kind,
        ParseErrorKind::MissingSlideDuration("-5".into())
    );
    assert_eq!(output.errors[0].severity, Severity::Error);
    assert!(output.errors[0].suggestion.is_some());
}

#[test]
fn test_each_keeps_surviving_members() {
    let output = parse_simai("(120){4}1/9/2-6,3/0,E");
    let items = output.chart.items();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1].notes().len(), 1);
    assert!(matches!(items[1], ChartItem::Note(NoteData::Tap { .. })));
    assert!(matches!(items[2], ChartItem::Note(NoteData::Tap { .. })));
    let kinds: Vec<_> = output.errors.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ParseErrorKind::LaneOutOfRange('9'),
            ParseErrorKind::MissingSlideDuration("-6".into()),
            ParseErrorKind::LaneOutOfRange('0'),
        ]
    );
}

#[test]
fn test_hold_fallbacks() {
    let output = parse_simai("(120){4}1h,2h[oops],Ch,E");
    let severities: Vec<_> = output
        .errors
        .iter()
        .map(|e| (e.kind.clone(), e.severity))
        .collect();
    assert_eq!(
        severities,
        vec![
            (ParseErrorKind::MissingHoldDuration, Severity::Warning),
            (
                ParseErrorKind::InvalidHoldDuration("oops".into()),
                Severity::Error
            ),
            (ParseErrorKind::MissingHoldDuration, Severity::Warning),
        ]
    );
    assert_eq!(output.chart.notes().count(), 3);
    assert!(
        output
            .chart
            .notes()
            .all(|note| note.duration().is_some_and(|d| d.division.get() == 8
                && d.division_count == 0))
    );
}

#[test]
fn test_bad_slide_geometry() {
    let output = parse_simai("(120){4}1w5[4:1],1V5[4:1],1-[4:1],1k5[4:1],1-9[4:1],E");
    assert_eq!(output.chart.notes().count(), 0);
    let kinds: Vec<_> = output.errors.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ParseErrorKind::InvalidWifiEndpoints { from: 1, to: 5 },
            ParseErrorKind::MissingSlideMidpoint("5".into()),
            ParseErrorKind::InvalidSlideEndpoints {
                shape: "-".into(),
                expected: 1,
                found: String::new(),
            },
            ParseErrorKind::UnknownSlideShape("k".into()),
            ParseErrorKind::DestinationOutOfRange('9'),
        ]
    );
    assert_eq!(
        output.errors[0].suggestion.as_deref(),
        Some("a WiFi slide from lane 1 may end at lane 4 or 6")
    );
}

#[test]
fn test_error_positions_point_at_token() {
    const SRC: &str = "&title=t\n(120){4}1,\n  2,xyz,3,E";
    let output = parse_simai(SRC);
    assert_eq!(output.errors.len(), 1);
    let error = &output.errors[0];
    assert_eq!(error.kind, ParseErrorKind::UnrecognizedNote("xyz".into()));
    assert_eq!(error.line, Some(3));
    assert_eq!(error.column, Some(5));
    let span = error.span.clone().unwrap();
    assert_eq!(&SRC[span], "xyz");
    assert_eq!(error.message(), "unrecognized note `xyz`");
}

#[test]
fn test_invalid_time_signature_parts() {
    let output = parse_simai("(fast){0}1,(-5)2,E");
    let kinds: Vec<_> = output.errors.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ParseErrorKind::InvalidBpm("fast".into()),
            ParseErrorKind::InvalidDivision("0".into()),
            ParseErrorKind::InvalidBpm("-5".into()),
        ]
    );
    assert!(
        output
            .chart
            .items()
            .iter()
            .all(|item| !matches!(item, ChartItem::TimeSignature(_)))
    );
    assert_eq!(output.chart.notes().count(), 2);
}
