//! Output types of the beat-to-time conversion.

use std::num::NonZeroU32;

use strict_num_extended::PositiveF64;

use crate::simai::model::NoteData;

use super::tempo::beat_duration_ms;

/// Position of a note in the output of one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteId(pub usize);

impl NoteId {
    /// Wraps a raw index.
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// The raw index, which is the emission order of the note.
    #[must_use]
    pub const fn value(self) -> usize {
        self.0
    }
}

impl From<usize> for NoteId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<NoteId> for usize {
    fn from(id: NoteId) -> Self {
        id.0
    }
}

/// Hands out [`NoteId`]s in emission order while walking the chart.
#[derive(Debug, Clone, Default)]
pub struct NoteIdGenerator {
    next: usize,
}

impl NoteIdGenerator {
    /// A generator whose first id is `start`.
    #[must_use]
    pub const fn new(start: usize) -> Self {
        Self { next: start }
    }

    /// Takes the id for the next emitted note.
    #[must_use]
    pub const fn next_id(&mut self) -> NoteId {
        let id = NoteId(self.next);
        self.next += 1;
        id
    }
}

/// A note placed on the timeline, in milliseconds from the chart start.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteVisualization {
    /// Sequential id in emission order.
    pub id: NoteId,
    /// The parsed note.
    pub note: NoteData,
    /// When the note should be hit.
    pub hit_time: f64,
    /// How long a hold, touch hold or slide lasts.
    pub duration: Option<f64>,
    /// When the path of a slide starts moving, one quarter note after the hit.
    pub start_time: Option<f64>,
    /// Whether the note shares its beat with other notes.
    pub is_each: bool,
}

impl NoteVisualization {
    /// The hit time plus the duration. Taps and touches end where they are hit.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.hit_time + self.duration.unwrap_or(0.0)
    }

    /// When the movement of the note is over. For slides this is one wait later than
    /// [`Self::end_time`].
    #[must_use]
    pub fn path_end_time(&self) -> f64 {
        self.start_time.unwrap_or(self.hit_time) + self.duration.unwrap_or(0.0)
    }

    /// The time between the hit and [`Self::end_time`].
    #[must_use]
    pub fn span(&self) -> f64 {
        self.end_time() - self.hit_time
    }
}

/// A measure of the chart, the span of `division` ambient beats.
///
/// A measure is cut short when the tempo or division changes in its middle, and at the chart end.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measure {
    /// Sequential number, starts with 1.
    pub measure_number: u32,
    /// When the measure starts, in milliseconds.
    pub start_time: f64,
    /// When the measure ends, in milliseconds. Equals the start of the next measure.
    pub end_time: f64,
    /// The ambient division in the measure.
    pub division: NonZeroU32,
    /// The ambient tempo in the measure.
    pub bpm: PositiveF64,
}

impl Measure {
    /// The length of one ambient beat in this measure.
    #[must_use]
    pub fn beat_ms(&self) -> f64 {
        beat_duration_ms(self.bpm, self.division)
    }

    /// Whether `time` falls in `[start_time, end_time)`.
    #[must_use]
    pub fn contains(&self, time: f64) -> bool {
        self.start_time <= time && time < self.end_time
    }
}

/// Where a time falls in the measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurePosition {
    /// The [`Measure::measure_number`].
    pub measure_number: u32,
    /// The beat in the measure, starts with 1.
    pub beat: u32,
}

/// The notes and measures of a chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartTimeline {
    /// The notes in emission order.
    pub notes: Vec<NoteVisualization>,
    /// The measures in time order.
    pub measures: Vec<Measure>,
    /// The later of the walk end and the latest note end, in milliseconds.
    pub total_duration: f64,
}

impl ChartTimeline {
    /// Finds the measure and beat playing at `time`, for a "current measure/beat" display.
    ///
    /// Returns `None` before the chart starts and after the last measure.
    #[must_use]
    pub fn locate(&self, time: f64) -> Option<MeasurePosition> {
        let idx = self
            .measures
            .partition_point(|measure| measure.end_time <= time);
        let measure = self.measures.get(idx).filter(|m| m.contains(time))?;
        let elapsed = ((time - measure.start_time) / measure.beat_ms()).floor() as u32;
        Some(MeasurePosition {
            measure_number: measure.measure_number,
            beat: (elapsed + 1).min(measure.division.get()),
        })
    }
}
