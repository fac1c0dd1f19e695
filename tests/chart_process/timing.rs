use std::num::NonZeroU32;

use pretty_assertions::assert_eq;

use simai_rs::{
    chart_process::{
        ConvertError, convert_chart_visualization_data,
        convert_chart_visualization_data_with_config, tempo::ConvertConfig,
    },
    simai::{command::positive_bpm, model::NoteData, parse_simai},
};

use super::{assert_time_close, convert};

fn hit_times(source: &str) -> Vec<f64> {
    convert(source).iter().map(|note| note.hit_time).collect()
}

#[test]
fn test_constant_tempo_spacing() {
    for (bpm, expected) in [(120, 500.0), (60, 1000.0), (240, 250.0)] {
        let times = hit_times(&format!("({bpm}){{4}}1,2,3,E"));
        assert_eq!(times.len(), 3);
        for (idx, time) in times.iter().enumerate() {
            assert_time_close(expected * idx as f64, *time, &format!("bpm {bpm} note {idx}"));
        }
    }
}

#[test]
fn test_bpm_change() {
    let times = hit_times("(120){4}1,2,(140){4}3,4,E");
    let expected = [0.0, 500.0, 1000.0, 1000.0 + 60000.0 / 140.0];
    assert_eq!(times.len(), expected.len());
    for (expected, actual) in expected.into_iter().zip(times) {
        assert_time_close(expected, actual, "hit time after tempo change");
    }
}

#[test]
fn test_division_change_and_rests() {
    // 125ms per beat after {16}, rests advance by the ambient division.
    let times = hit_times("(120){4}1,,{16}2,,,3,E");
    assert_time_close(0.0, times[0], "first");
    assert_time_close(1000.0, times[1], "after rest");
    assert_time_close(1375.0, times[2], "after {16} rests");
}

#[test]
fn test_hold_durations() {
    let notes = convert("(120){4}1h[4:1],E");
    assert_eq!(notes.len(), 1);
    assert_time_close(0.0, notes[0].hit_time, "hold hit");
    assert_time_close(500.0, notes[0].duration.unwrap(), "hold [4:1]");

    let notes = convert("(120){4}1h[4:2],E");
    assert_time_close(1000.0, notes[0].duration.unwrap(), "hold [4:2]");

    let notes = convert("(120){4}Ch[8:3],E");
    assert_time_close(750.0, notes[0].duration.unwrap(), "touch hold [8:3]");
}

#[test]
fn test_slide_timing() {
    let notes = convert("(120){4}1-5[4:1],E");
    assert_eq!(notes.len(), 1);
    assert!(matches!(notes[0].note, NoteData::Slide { .. }));
    assert_time_close(0.0, notes[0].hit_time, "slide hit");
    assert_time_close(500.0, notes[0].start_time.unwrap(), "slide start");
    assert_time_close(500.0, notes[0].duration.unwrap(), "slide duration");
    assert_time_close(500.0, notes[0].end_time(), "slide end");
    assert_time_close(1000.0, notes[0].path_end_time(), "slide path end");
}

#[test]
fn test_slide_with_own_bpm() {
    let notes = convert("(120){4}1-5[60#4:1],E");
    assert_time_close(1000.0, notes[0].start_time.unwrap(), "slide start at 60 bpm");
    assert_time_close(1000.0, notes[0].duration.unwrap(), "slide duration at 60 bpm");
}

#[test]
fn test_each_shares_hit_time() {
    let notes = convert("(120){4}1/5,3,E");
    assert_eq!(notes.len(), 3);
    assert!(notes[0].is_each && notes[1].is_each);
    assert!(!notes[2].is_each);
    assert_time_close(notes[0].hit_time, notes[1].hit_time, "EACH members");
    assert_time_close(500.0, notes[2].hit_time, "after EACH");
}

#[test]
fn test_dropped_slide_leaves_no_note() {
    let output = parse_simai("(120){4}1-5,E");
    assert_eq!(output.errors.len(), 1);
    let notes = convert_chart_visualization_data(&output.chart).unwrap();
    assert!(notes.is_empty());
}

#[test]
fn test_ids_follow_emission_order() {
    let notes = convert("(120){4}1/2,3,4h[4:1],E");
    let ids: Vec<_> = notes.iter().map(|note| note.id.value()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn test_missing_initial_tempo() {
    let chart = parse_simai("1,2,E").chart;
    assert_eq!(
        convert_chart_visualization_data(&chart),
        Err(ConvertError::MissingInitialTempo)
    );

    let config = ConvertConfig::new().assume_tempo(
        positive_bpm(60.0).unwrap(),
        NonZeroU32::new(4).unwrap(),
    );
    let notes = convert_chart_visualization_data_with_config(&chart, &config).unwrap();
    assert_time_close(1000.0, notes[1].hit_time, "assumed tempo");
}

#[test]
fn test_header_bpm_seeds_tempo() {
    let notes = convert("&bpm=240\n1,{8}2,3,E");
    assert_time_close(250.0, notes[1].hit_time, "header bpm");
    assert_time_close(375.0, notes[2].hit_time, "header bpm with {8}");
}

#[test]
fn test_hit_times_never_decrease() {
    let notes = convert(
        "(120){4}1,2/3,,(180){8}4h[4:1],5-1[8:3],{16}A1,,,(90)6,7/8,{1}1,E4f,E",
    );
    for pair in notes.windows(2) {
        assert!(
            pair[0].hit_time <= pair[1].hit_time,
            "{} came after {}",
            pair[1].hit_time,
            pair[0].hit_time
        );
        if !(pair[0].is_each && pair[1].is_each) {
            assert!(pair[0].hit_time < pair[1].hit_time);
        }
    }
}
