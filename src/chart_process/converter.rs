//! The walk over chart items that places notes on the timeline.
//!
//! The walk folds a [`TempoState`] over the items in order:
//!
//! - A time signature replaces the ambient tempo and division. Time does not move.
//! - A rest moves time by its count of ambient beats.
//! - A note or EACH places every note at the current time, then moves time by one ambient beat.
//!
//! Observers such as the [`MeasureTracker`](super::measure::MeasureTracker) see the walk through
//! [`BeatListener`].

use std::num::NonZeroU32;

use strict_num_extended::PositiveF64;

use crate::simai::{
    model::{Chart, ChartItem, NoteData},
    parse::DEFAULT_DIVISION,
};

use super::{
    ConvertError,
    tempo::{ConvertConfig, InitialTempoFallback, TempoState, note_duration_ms, slide_wait_ms},
    types::{NoteIdGenerator, NoteVisualization},
};

/// Observes the steps of the conversion walk. Every method does nothing by default.
pub trait BeatListener {
    /// Called once with the initial state.
    fn on_start(&mut self, _state: &TempoState) {}

    /// Called when a time signature is applied, before the walk continues with `after`.
    fn on_time_signature(&mut self, _before: &TempoState, _after: &TempoState) {}

    /// Called when time moves forward from `from` by `beats` ambient beats.
    fn on_advance(&mut self, _from: &TempoState, _beats: u32) {}

    /// Called for every emitted note.
    fn on_note(&mut self, _note: &NoteVisualization) {}

    /// Called once with the final state.
    fn on_finish(&mut self, _state: &TempoState) {}
}

impl BeatListener for () {}

/// Decides the initial state and the items left to walk.
fn initial_state<'a>(
    chart: &'a Chart,
    config: &ConvertConfig,
) -> Result<(TempoState, &'a [ChartItem]), ConvertError> {
    let items = chart.items();
    let metadata_bpm = chart.metadata().bpm;
    let assumed = match config.initial_tempo {
        InitialTempoFallback::Fail => None,
        InitialTempoFallback::Assume { bpm, division } => Some((bpm, division)),
    };
    let fallback = |division: NonZeroU32| -> Result<PositiveF64, ConvertError> {
        match assumed {
            Some((bpm, _)) => {
                log::warn!(
                    "chart_process: no initial tempo, assuming {} bpm {{{division}}}",
                    bpm.as_f64()
                );
                Ok(bpm)
            }
            None => {
                log::warn!("chart_process: no initial tempo and no fallback configured");
                Err(ConvertError::MissingInitialTempo)
            }
        }
    };

    match items.split_first() {
        Some((ChartItem::TimeSignature(signature), rest)) => {
            let bpm = match signature.bpm.or(metadata_bpm) {
                Some(bpm) => bpm,
                None => fallback(signature.division)?,
            };
            Ok((TempoState::new(bpm, signature.division), rest))
        }
        _ => match metadata_bpm {
            Some(bpm) => Ok((TempoState::new(bpm, DEFAULT_DIVISION), items)),
            None => {
                let division = assumed.map_or(DEFAULT_DIVISION, |(_, division)| division);
                Ok((TempoState::new(fallback(division)?, division), items))
            }
        },
    }
}

fn visualize(
    note: &NoteData,
    state: &TempoState,
    is_each: bool,
    ids: &mut NoteIdGenerator,
) -> NoteVisualization {
    let duration = note
        .duration()
        .map(|duration| note_duration_ms(duration, state.bpm));
    let start_time = match note {
        NoteData::Slide { duration, .. } => {
            Some(state.time + slide_wait_ms(duration.bpm.unwrap_or(state.bpm)))
        }
        _ => None,
    };
    NoteVisualization {
        id: ids.next_id(),
        note: note.clone(),
        hit_time: state.time,
        duration,
        start_time,
        is_each,
    }
}

/// Walks the chart, reporting each step to `listener`.
///
/// Returns the notes in emission order and the final state. A chart without items converts to
/// no notes even without a tempo.
pub fn walk(
    chart: &Chart,
    config: &ConvertConfig,
    listener: &mut impl BeatListener,
) -> Result<(Vec<NoteVisualization>, Option<TempoState>), ConvertError> {
    if chart.items().is_empty() {
        return Ok((vec![], None));
    }
    let (initial, items) = initial_state(chart, config)?;
    listener.on_start(&initial);

    let mut ids = NoteIdGenerator::default();
    let mut notes = Vec::new();
    let state = items.iter().fold(initial, |state, item| match item {
        ChartItem::TimeSignature(signature) => {
            let next = state.apply(signature);
            log::trace!(
                "chart_process: {:.3}ms tempo {} bpm {{{}}}",
                state.time,
                next.bpm.as_f64(),
                next.division
            );
            listener.on_time_signature(&state, &next);
            next
        }
        ChartItem::Rest(rest) => {
            listener.on_advance(&state, rest.division_count);
            state.advance(rest.division_count)
        }
        ChartItem::Note(_) | ChartItem::Each(_) => {
            let members = item.notes();
            let is_each = members.len() > 1;
            for note in members {
                let visualized = visualize(note, &state, is_each, &mut ids);
                listener.on_note(&visualized);
                notes.push(visualized);
            }
            log::trace!(
                "chart_process: {:.3}ms placed {} note(s)",
                state.time,
                members.len()
            );
            listener.on_advance(&state, 1);
            state.advance(1)
        }
    });
    listener.on_finish(&state);
    Ok((notes, Some(state)))
}
