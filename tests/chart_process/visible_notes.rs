use pretty_assertions::assert_eq;
use rand::{Rng, SeedableRng, rngs::StdRng};

use simai_rs::chart_process::{
    index::{TimeSortedIndex, create_time_sorted_index, get_visible_notes},
    types::NoteVisualization,
};

use super::convert;

fn sorted_ids<'a>(notes: impl IntoIterator<Item = &'a NoteVisualization>) -> Vec<usize> {
    let mut ids: Vec<_> = notes.into_iter().map(|note| note.id.value()).collect();
    ids.sort_unstable();
    ids
}

fn linear_scan(notes: &[NoteVisualization], time: f64, window: f64) -> Vec<usize> {
    sorted_ids(
        notes
            .iter()
            .filter(|note| note.end_time() >= time - window && note.hit_time <= time + window),
    )
}

fn random_chart(rng: &mut impl Rng, len: usize) -> String {
    let mut tokens = vec![format!("({}){{4}}", rng.random_range(60..=300))];
    for _ in 0..len {
        let lane = rng.random_range(1..=8u8);
        let token = match rng.random_range(0..10) {
            0 => String::new(),
            1 => format!("({})", rng.random_range(60..=300)),
            2 => format!("{lane}h[4:{}]", rng.random_range(1..=8)),
            3 => format!("{lane}-{}[8:{}]", lane % 8 + 1, rng.random_range(1..=6)),
            4 => format!("{lane}/{}", lane % 8 + 1),
            5 => format!("Ch[2:{}]", rng.random_range(1..=3)),
            _ => lane.to_string(),
        };
        tokens.push(token);
    }
    tokens.push("E".to_string());
    tokens.join(",")
}

#[test]
fn test_window_boundaries() {
    // Taps at 0, 500, 1000, 1500.
    let notes = convert("(120){4}1,2,3,4,E");
    let index = TimeSortedIndex::new(&notes);
    assert_eq!(sorted_ids(get_visible_notes(&index, 500.0, 0.0)), vec![1]);
    assert_eq!(sorted_ids(get_visible_notes(&index, 750.0, 250.0)), vec![1, 2]);
    assert_eq!(sorted_ids(get_visible_notes(&index, 750.0, 200.0)), Vec::<usize>::new());
    assert_eq!(sorted_ids(get_visible_notes(&index, -100.0, 100.0)), vec![0]);
    assert!(get_visible_notes(&index, 5000.0, 1000.0).is_empty());
}

#[test]
fn test_long_slide_stays_visible() {
    // The slide is hit at 0 and lasts 4000, so it ends at 4000.
    let notes = convert("(120){4}1-5[1:2],2,3,,,,,,,,4,E");
    let index = create_time_sorted_index(&notes);
    let visible = sorted_ids(get_visible_notes(&index, 4000.0, 100.0));
    assert_eq!(visible, vec![0]);
    assert_eq!(sorted_ids(get_visible_notes(&index, 4200.0, 100.0)), Vec::<usize>::new());
}

#[test]
fn test_slide_leaves_window_without_its_wait() {
    // Hit at 0, path moves from 500 to 1000, but the note ends at 500.
    let notes = convert("(120){4}1-5[4:1],E");
    let index = create_time_sorted_index(&notes);
    assert_eq!(sorted_ids(get_visible_notes(&index, 450.0, 100.0)), vec![0]);
    assert_eq!(sorted_ids(get_visible_notes(&index, 800.0, 100.0)), Vec::<usize>::new());
}

#[test]
fn test_empty_index() {
    let notes: Vec<NoteVisualization> = vec![];
    let index = TimeSortedIndex::new(&notes);
    assert!(index.is_empty());
    assert!(get_visible_notes(&index, 0.0, 1000.0).is_empty());
}

#[test]
fn test_matches_linear_scan_on_random_charts() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for len in [1, 10, 100, 500] {
        let source = random_chart(&mut rng, len);
        let notes = convert(&source);
        let index = TimeSortedIndex::new(&notes);
        let last = notes.iter().map(NoteVisualization::end_time).fold(0.0, f64::max);
        for _ in 0..200 {
            let time = rng.random_range(-500.0..last + 500.0);
            let window = rng.random_range(0.0..2000.0);
            assert_eq!(
                sorted_ids(get_visible_notes(&index, time, window)),
                linear_scan(&notes, time, window),
                "time {time}, window {window}, chart {source}"
            );
        }
    }
}
