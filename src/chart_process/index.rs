//! Per-frame lookup of the notes around a playback time.
//!
//! The converter emits notes in hit time order. [`TimeSortedIndex`] adds the order by end time,
//! so [`get_visible_notes`] can binary search for the notes still on screen instead of scanning
//! the whole chart each frame.

use super::types::NoteVisualization;

/// The notes of a chart ordered by hit time and by end time.
#[derive(Debug, Clone)]
pub struct TimeSortedIndex<'a> {
    /// Notes in hit time order, as emitted by the converter.
    notes: &'a [NoteVisualization],
    /// Indices into `notes` sorted by [`NoteVisualization::end_time`].
    by_end: Vec<usize>,
    /// End times in the order of `by_end`.
    end_times: Vec<f64>,
    /// The longest [`NoteVisualization::span`].
    max_span: f64,
}

impl<'a> TimeSortedIndex<'a> {
    /// Builds the index over notes in hit time order.
    #[must_use]
    pub fn new(notes: &'a [NoteVisualization]) -> Self {
        let mut by_end: Vec<usize> = (0..notes.len()).collect();
        by_end.sort_by(|&a, &b| {
            notes[a]
                .end_time()
                .total_cmp(&notes[b].end_time())
                .then(a.cmp(&b))
        });
        let end_times = by_end.iter().map(|&idx| notes[idx].end_time()).collect();
        let max_span = notes
            .iter()
            .map(NoteVisualization::span)
            .fold(0.0, f64::max);
        Self {
            notes,
            by_end,
            end_times,
            max_span,
        }
    }

    /// The notes in hit time order.
    #[must_use]
    pub const fn notes(&self) -> &'a [NoteVisualization] {
        self.notes
    }

    /// Iterates the notes in end time order.
    pub fn iter_by_end(&self) -> impl Iterator<Item = &'a NoteVisualization> + '_ {
        let notes = self.notes;
        self.by_end.iter().map(move |&idx| &notes[idx])
    }

    /// The number of indexed notes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether no note is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Same as [`TimeSortedIndex::new`].
#[must_use]
pub fn create_time_sorted_index(notes: &[NoteVisualization]) -> TimeSortedIndex<'_> {
    TimeSortedIndex::new(notes)
}

/// Returns the notes that overlap the window `[time - window, time + window]`, in end time order.
///
/// A note overlaps when it ends at or after the window start and is hit at or before the window
/// end. Only notes ending before `time + window` plus the longest note span are examined.
#[must_use]
pub fn get_visible_notes<'a>(
    index: &TimeSortedIndex<'a>,
    time: f64,
    window: f64,
) -> Vec<&'a NoteVisualization> {
    let window_start = time - window;
    let window_end = time + window;
    let notes = index.notes;
    let lower = index.end_times.partition_point(|&end| end < window_start);
    let upper = index
        .end_times
        .partition_point(|&end| end <= window_end + index.max_span);
    index.by_end[lower..upper.max(lower)]
        .iter()
        .map(|&idx| &notes[idx])
        .filter(|note| note.hit_time <= window_end)
        .collect()
}
