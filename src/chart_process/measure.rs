//! Splitting the conversion walk into measures.

use std::num::NonZeroU32;

use strict_num_extended::PositiveF64;

use super::{converter::BeatListener, tempo::TempoState, types::Measure};

/// Closes a measure every time `division` ambient beats pass.
///
/// A measure in progress is closed early right before a time signature that changes the tempo or
/// division, and at the end of the chart. Rests longer than the rest of a measure are split at
/// the boundary.
#[derive(Debug, Clone, Default)]
pub struct MeasureTracker {
    measures: Vec<Measure>,
    open: Option<OpenMeasure>,
}

#[derive(Debug, Clone)]
struct OpenMeasure {
    start_time: f64,
    beats: u32,
    bpm: PositiveF64,
    division: NonZeroU32,
}

impl MeasureTracker {
    /// Creates a tracker without measures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The measures closed so far.
    #[must_use]
    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    /// Leans the measures out of the tracker.
    #[must_use]
    pub fn into_measures(self) -> Vec<Measure> {
        self.measures
    }

    fn close(&mut self, end_time: f64) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        let measure = Measure {
            measure_number: self.measures.len() as u32 + 1,
            start_time: open.start_time,
            end_time,
            division: open.division,
            bpm: open.bpm,
        };
        log::trace!(
            "chart_process: measure {} {:.3}ms..{:.3}ms",
            measure.measure_number,
            measure.start_time,
            measure.end_time
        );
        self.measures.push(measure);
        open.start_time = end_time;
        open.beats = 0;
    }

    fn reopen(&mut self, state: &TempoState) {
        self.open = Some(OpenMeasure {
            start_time: state.time,
            beats: 0,
            bpm: state.bpm,
            division: state.division,
        });
    }
}

impl BeatListener for MeasureTracker {
    fn on_start(&mut self, state: &TempoState) {
        self.measures.clear();
        self.reopen(state);
    }

    fn on_time_signature(&mut self, before: &TempoState, after: &TempoState) {
        if !after.differs_from(before) {
            return;
        }
        if self.open.as_ref().is_some_and(|open| open.beats > 0) {
            self.close(before.time);
        }
        self.reopen(after);
    }

    fn on_advance(&mut self, from: &TempoState, beats: u32) {
        let beat_ms = from.beat_ms();
        let mut consumed = 0;
        while consumed < beats {
            let Some(open) = self.open.as_mut() else {
                return;
            };
            let room = open.division.get() - open.beats;
            let step = room.min(beats - consumed);
            open.beats += step;
            consumed += step;
            if open.beats == open.division.get() {
                self.close(from.time + beat_ms * f64::from(consumed));
            }
        }
    }

    fn on_finish(&mut self, state: &TempoState) {
        if self.open.as_ref().is_some_and(|open| open.beats > 0) {
            self.close(state.time);
        }
    }
}
