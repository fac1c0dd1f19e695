//! The simai chart notation parser and beat-to-time converter.
//!
//! simai is the text notation used to describe charts of a circular eight-lane rhythm game. A
//! chart consists of header lines (`&title=...`) and a note body such as
//! `(120){4}1,2h[4:1],3-7[8:3]/C,E`.
//!
//! The crate is split in two phases:
//!
//! - [`simai`] parses the source text into an immutable [`simai::model::Chart`] while collecting
//!   positioned [`simai::error::ParseError`]s instead of aborting on malformed input.
//! - [`chart_process`] walks a parsed chart under its tempo and division changes, emitting one
//!   [`chart_process::types::NoteVisualization`] per note with an absolute hit time in
//!   milliseconds, splitting the chart into measures, and indexing the notes for per-frame
//!   windowed queries.
//!
//! # Example
//!
//! ```
//! use simai_rs::{
//!     chart_process::{convert_chart_visualization_data, index::{TimeSortedIndex, get_visible_notes}},
//!     simai::{SimaiOutput, parse_simai},
//! };
//!
//! let SimaiOutput { chart, errors } = parse_simai("&title=Test\n(120){4}1,2,3/5,E");
//! assert!(errors.is_empty());
//!
//! let notes = convert_chart_visualization_data(&chart).unwrap();
//! let hit_times: Vec<f64> = notes.iter().map(|note| note.hit_time).collect();
//! assert_eq!(hit_times, vec![0.0, 500.0, 1000.0, 1000.0]);
//!
//! let index = TimeSortedIndex::new(&notes);
//! assert_eq!(get_visible_notes(&index, 500.0, 100.0).len(), 1);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod chart_process;
pub mod diagnostics;
pub mod simai;
