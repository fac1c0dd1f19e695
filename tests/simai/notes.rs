use std::num::NonZeroU32;

use pretty_assertions::assert_eq;

use simai_rs::simai::{
    command::{Lane, NoteDuration, RotationDirection, SlideType, StarVisibility, TouchZone},
    model::{ChartItem, NoteData, Rest, TimeSignature},
    parse_simai, parse_simai_chart, parse_simai_chart_with_errors,
};

fn lane(n: u8) -> Lane {
    Lane::new(n).unwrap()
}

fn division(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

#[test]
fn test_item_sequence() {
    let items = parse_simai_chart("(120){4}1,2h[4:1],,,3-7[8:3],A1/B2/C,E");
    assert_eq!(items.len(), 6);
    assert!(matches!(items[0], ChartItem::TimeSignature(_)));
    assert_eq!(items[1], ChartItem::Note(NoteData::Tap { lane: lane(1) }));
    assert_eq!(
        items[2],
        ChartItem::Note(NoteData::Hold {
            lane: lane(2),
            duration: NoteDuration::new(division(4), 1),
        })
    );
    assert_eq!(items[3], ChartItem::Rest(Rest { division_count: 2 }));
    assert_eq!(
        items[4],
        ChartItem::Note(NoteData::Slide {
            lane: lane(3),
            duration: NoteDuration::new(division(8), 3),
            slide_type: SlideType::Straight,
            direction: RotationDirection::CounterClockwise,
            destination_lane: lane(7),
            via_lane: None,
            star_visibility: StarVisibility::Normal,
        })
    );
    let ChartItem::Each(members) = &items[5] else {
        panic!("expected EACH, got {:?}", items[5]);
    };
    assert_eq!(members.len(), 3);
    assert_eq!(
        members[2],
        NoteData::Touch {
            zone: TouchZone::C,
            position: None,
            is_hanabi: false
        }
    );
}

#[test]
fn test_whitespace_and_line_breaks_are_ignored() {
    let compact = parse_simai_chart("(120){4}1,2/3,E");
    let spaced = parse_simai_chart("(120) {4}\n  1 ,\r\n 2 / 3 ,\n\tE\n");
    assert_eq!(compact, spaced);
}

#[test]
fn test_terminator_ends_the_chart() {
    let items = parse_simai_chart("(120){4}1,E,2,3");
    assert_eq!(items.len(), 2);
}

#[test]
fn test_slide_variants() {
    let items = parse_simai_chart("(120){4}1^3[4:1],8^1[4:1],2V46[4:1],1w4[4:1],5!qq1[4:1],E");
    let slides: Vec<_> = items
        .iter()
        .flat_map(ChartItem::notes)
        .map(|note| match note {
            NoteData::Slide {
                slide_type,
                direction,
                via_lane,
                star_visibility,
                ..
            } => (*slide_type, *direction, via_lane.map(Lane::get), *star_visibility),
            other => panic!("expected a slide, got {other:?}"),
        })
        .collect();
    assert_eq!(
        slides,
        vec![
            (
                SlideType::Circle,
                RotationDirection::Clockwise,
                None,
                StarVisibility::Normal
            ),
            (
                SlideType::Circle,
                RotationDirection::Clockwise,
                None,
                StarVisibility::Normal
            ),
            (
                SlideType::L,
                RotationDirection::Clockwise,
                Some(4),
                StarVisibility::Normal
            ),
            (
                SlideType::WiFi,
                RotationDirection::CounterClockwise,
                None,
                StarVisibility::Normal
            ),
            (
                SlideType::Cup,
                RotationDirection::Clockwise,
                None,
                StarVisibility::Hidden
            ),
        ]
    );
}

#[test]
fn test_auto_circle_direction_follows_lane_numbers() {
    let items = parse_simai_chart("(120){4}3^2[4:1],5^1[4:1],2^7[4:1],1^8[4:1],E");
    let directions: Vec<_> = items
        .iter()
        .flat_map(ChartItem::notes)
        .map(|note| match note {
            NoteData::Slide { direction, .. } => *direction,
            other => panic!("expected a slide, got {other:?}"),
        })
        .collect();
    assert_eq!(
        directions,
        vec![
            RotationDirection::Clockwise,
            RotationDirection::Clockwise,
            RotationDirection::CounterClockwise,
            RotationDirection::Clockwise,
        ]
    );
}

#[test]
fn test_slide_with_own_bpm() {
    let items = parse_simai_chart("(120){4}1-5[160#8:3],E");
    let Some(NoteData::Slide { duration, .. }) = items[1].notes().first() else {
        panic!("expected a slide");
    };
    assert_eq!(duration.bpm.map(|bpm| bpm.as_f64()), Some(160.0));
    assert_eq!(duration.division, division(8));
    assert_eq!(duration.division_count, 3);
}

#[test]
fn test_touch_hold_and_hanabi() {
    let items = parse_simai_chart("(120){4}Ch[2:1],E3f,B5hf[4:3],E");
    assert_eq!(
        items[1],
        ChartItem::Note(NoteData::TouchHold {
            zone: TouchZone::C,
            position: None,
            duration: NoteDuration::new(division(2), 1),
            is_hanabi: false,
        })
    );
    assert_eq!(
        items[2],
        ChartItem::Note(NoteData::Touch {
            zone: TouchZone::E,
            position: Some(lane(3)),
            is_hanabi: true,
        })
    );
    assert!(matches!(
        items[3],
        ChartItem::Note(NoteData::TouchHold {
            zone: TouchZone::B,
            is_hanabi: true,
            ..
        })
    ));
}

#[test]
fn test_time_signature_changes() {
    let items = parse_simai_chart("(120){4}1,{8}2,(90)3,E");
    let signatures: Vec<_> = items
        .iter()
        .filter_map(|item| match item {
            ChartItem::TimeSignature(TimeSignature { bpm, division }) => {
                Some((bpm.map(|bpm| bpm.as_f64()), division.get()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        signatures,
        vec![(Some(120.0), 4), (None, 8), (Some(90.0), 8)]
    );
}

#[test]
fn test_invalid_token_does_not_stop_parsing() {
    let (items, errors) = parse_simai_chart_with_errors("(120){4}1,invalid,2,E");
    let lanes: Vec<_> = items
        .iter()
        .flat_map(ChartItem::notes)
        .filter_map(NoteData::lane)
        .map(Lane::get)
        .collect();
    assert_eq!(lanes, vec![1, 2]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_chart_is_read_only_view() {
    let output = parse_simai("&title=x\n(120){4}1/2,3,E");
    let chart = output.chart;
    assert_eq!(chart.items().len(), 3);
    assert_eq!(chart.notes().count(), 3);
    let (metadata, items) = chart.into_parts();
    assert_eq!(metadata.title.as_deref(), Some("x"));
    assert_eq!(items.len(), 3);
}
