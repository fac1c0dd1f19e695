//! Tempo arithmetic and the accumulator of the conversion walk.

use std::num::NonZeroU32;

use strict_num_extended::PositiveF64;

use crate::simai::{command::NoteDuration, model::TimeSignature};

/// Milliseconds in a minute.
const MS_PER_MINUTE: f64 = 60_000.0;

/// The length of one beat of `division`, in milliseconds.
///
/// A measure is four quarter notes, so one beat is `(60000 / bpm / division) * 4`. At 120 bpm a
/// beat of division 4 is 500 ms and a beat of division 8 is 250 ms.
#[must_use]
pub fn beat_duration_ms(bpm: PositiveF64, division: NonZeroU32) -> f64 {
    MS_PER_MINUTE / bpm.as_f64() / f64::from(division.get()) * 4.0
}

/// The length of a hold or slide, using `ambient` unless the duration overrides the tempo.
#[must_use]
pub fn note_duration_ms(duration: &NoteDuration, ambient: PositiveF64) -> f64 {
    let bpm = duration.bpm.unwrap_or(ambient);
    beat_duration_ms(bpm, duration.division) * f64::from(duration.division_count)
}

/// The wait between hitting a slide star and its path starting: one quarter note.
#[must_use]
pub fn slide_wait_ms(bpm: PositiveF64) -> f64 {
    MS_PER_MINUTE / bpm.as_f64()
}

/// The ambient tempo and the walked time. Each step returns a new state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoState {
    /// The time reached, in milliseconds.
    pub time: f64,
    /// The ambient tempo.
    pub bpm: PositiveF64,
    /// The ambient division.
    pub division: NonZeroU32,
}

impl TempoState {
    /// Starts at time zero.
    #[must_use]
    pub const fn new(bpm: PositiveF64, division: NonZeroU32) -> Self {
        Self {
            time: 0.0,
            bpm,
            division,
        }
    }

    /// The length of one ambient beat.
    #[must_use]
    pub fn beat_ms(&self) -> f64 {
        beat_duration_ms(self.bpm, self.division)
    }

    /// Applies a time signature. A missing bpm keeps the ambient one.
    #[must_use]
    pub fn apply(self, signature: &TimeSignature) -> Self {
        Self {
            bpm: signature.bpm.unwrap_or(self.bpm),
            division: signature.division,
            ..self
        }
    }

    /// Moves forward by `beats` ambient beats.
    #[must_use]
    pub fn advance(self, beats: u32) -> Self {
        Self {
            time: self.time + self.beat_ms() * f64::from(beats),
            ..self
        }
    }

    /// Whether the tempo or the division differs from `other`.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.bpm != other.bpm || self.division != other.division
    }
}

/// What to do when a chart gives no tempo before its first note.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum InitialTempoFallback {
    /// Fail with [`ConvertError::MissingInitialTempo`](super::ConvertError::MissingInitialTempo).
    #[default]
    Fail,
    /// Use this tempo and division, logging a warning.
    Assume {
        /// The assumed tempo.
        bpm: PositiveF64,
        /// The assumed division, used when the chart does not start with one.
        division: NonZeroU32,
    },
}

/// Options of the conversion.
///
/// The default is strict: a chart without an initial tempo is an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertConfig {
    /// What to do when a chart gives no tempo before its first note.
    pub initial_tempo: InitialTempoFallback,
}

impl ConvertConfig {
    /// Creates the strict configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_tempo: InitialTempoFallback::Fail,
        }
    }

    /// Sets what to do when a chart gives no initial tempo.
    #[must_use]
    pub const fn with_initial_tempo(mut self, fallback: InitialTempoFallback) -> Self {
        self.initial_tempo = fallback;
        self
    }

    /// Shorthand of [`Self::with_initial_tempo`] with [`InitialTempoFallback::Assume`].
    #[must_use]
    pub const fn assume_tempo(self, bpm: PositiveF64, division: NonZeroU32) -> Self {
        self.with_initial_tempo(InitialTempoFallback::Assume { bpm, division })
    }
}
