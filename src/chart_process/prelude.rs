//! Chart Process module prelude
//!
//! This module provides re-exports of commonly used types and traits from the `chart_process` module,
//! allowing users to import all needed items in one go.

pub use super::{
    ConvertError, convert_chart_visualization_data, convert_chart_visualization_data_with_config,
    convert_chart_with_measures, convert_chart_with_measures_with_config,
    converter::{BeatListener, walk},
    index::{TimeSortedIndex, create_time_sorted_index, get_visible_notes},
    measure::MeasureTracker,
    tempo::{
        ConvertConfig, InitialTempoFallback, TempoState, beat_duration_ms, note_duration_ms,
        slide_wait_ms,
    },
    types::{
        ChartTimeline, Measure, MeasurePosition, NoteId, NoteIdGenerator, NoteVisualization,
    },
};
