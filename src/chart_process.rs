//! Beat-to-time conversion of parsed charts.
//!
//! - [`convert_chart_visualization_data`] places every note of a chart on the timeline in
//!   milliseconds.
//! - [`convert_chart_with_measures`] also splits the timeline into measures.
//! - [`index`] finds the notes around a playback time every frame.
//!
//! The conversion needs the tempo at the chart start. It is taken from the first item if that is
//! a time signature with a bpm, else from the `&bpm=` header. A chart giving neither fails with
//! [`ConvertError::MissingInitialTempo`] unless [`ConvertConfig`] assumes a tempo.

pub mod converter;
pub mod index;
pub mod measure;
pub mod prelude;
pub mod tempo;
pub mod types;

use thiserror::Error;

use crate::simai::model::Chart;

use self::{
    converter::walk,
    measure::MeasureTracker,
    tempo::ConvertConfig,
    types::{ChartTimeline, NoteVisualization},
};

/// An error occurred when converting a chart.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ConvertError {
    /// The chart does not start with a tempo and the metadata has no bpm.
    #[error(
        "no initial tempo: the chart must start with `(BPM)` or have a `&bpm=` header"
    )]
    MissingInitialTempo,
}

/// Places every note of `chart` on the timeline, using the strict configuration.
pub fn convert_chart_visualization_data(
    chart: &Chart,
) -> Result<Vec<NoteVisualization>, ConvertError> {
    convert_chart_visualization_data_with_config(chart, &ConvertConfig::default())
}

/// Places every note of `chart` on the timeline.
pub fn convert_chart_visualization_data_with_config(
    chart: &Chart,
    config: &ConvertConfig,
) -> Result<Vec<NoteVisualization>, ConvertError> {
    let (notes, _) = walk(chart, config, &mut ())?;
    log::debug!("chart_process: converted {} note(s)", notes.len());
    Ok(notes)
}

/// Places every note of `chart` on the timeline and splits it into measures, using the strict
/// configuration.
pub fn convert_chart_with_measures(chart: &Chart) -> Result<ChartTimeline, ConvertError> {
    convert_chart_with_measures_with_config(chart, &ConvertConfig::default())
}

/// Places every note of `chart` on the timeline and splits it into measures.
pub fn convert_chart_with_measures_with_config(
    chart: &Chart,
    config: &ConvertConfig,
) -> Result<ChartTimeline, ConvertError> {
    let mut tracker = MeasureTracker::new();
    let (notes, last) = walk(chart, config, &mut tracker)?;
    let walked = last.map_or(0.0, |state| state.time);
    let total_duration = notes
        .iter()
        .map(NoteVisualization::path_end_time)
        .fold(walked, f64::max);
    let measures = tracker.into_measures();
    log::debug!(
        "chart_process: converted {} note(s) in {} measure(s), {:.3}ms",
        notes.len(),
        measures.len(),
        total_duration
    );
    Ok(ChartTimeline {
        notes,
        measures,
        total_duration,
    })
}
