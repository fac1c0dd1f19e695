//! Prelude module for the simai parser.
//!
//! This module re-exports all public types from the simai module for convenient access.
//! You can use `use simai_rs::simai::prelude::*;` to import them at once.

#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{SimpleSource, ToAriadne, emit_parse_errors};

pub use super::{
    SimaiOutput,
    command::{
        LANE_COUNT, Lane, NoteDuration, RotationDirection, SlideType, StarVisibility, TouchZone,
        mixin::{SourcePosition, SourceRangeMixin},
        positive_bpm,
    },
    error::{ErrorCollector, ParseError, ParseErrorKind, Severity},
    lex::{LexOutput, TokenWithRange, tokenize},
    metadata::{BodyLine, MetadataOutput, extract_metadata},
    model::{Chart, ChartItem, ChartMetadata, NoteData, Rest, TimeSignature},
    parse::{DEFAULT_DIVISION, parse_items},
    parse_simai, parse_simai_chart, parse_simai_chart_with_errors,
    unparse::{export_chart, export_items, export_metadata},
};
