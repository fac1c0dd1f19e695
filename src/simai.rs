//! The simai notation parser.
//!
//! Parsing is split into phases:
//!
//! 1. [`metadata::extract_metadata`] separates the header lines from the note body.
//! 2. [`lex::tokenize`] splits the body on `,` into positioned tokens.
//! 3. [`lex::grammar`] matches each token against the prefix, touch and note patterns.
//! 4. [`parse::parse_items`] builds the typed [`model::ChartItem`]s.
//!
//! No phase aborts on malformed input. Every problem is collected in order as a
//! [`error::ParseError`], so a single output carries both the chart and its diagnostics.
//!
//! ```
//! use simai_rs::simai::{model::{ChartItem, NoteData}, parse_simai};
//!
//! let output = parse_simai("&title=Demo\n&bpm=150\n{4}1,2h,E");
//! assert_eq!(output.chart.metadata().title.as_deref(), Some("Demo"));
//! assert_eq!(output.chart.notes().count(), 2);
//! // The hold without a length is a warning.
//! assert_eq!(output.errors.len(), 1);
//! assert!(!output.errors[0].is_error());
//! ```

pub mod command;
pub mod error;
pub mod lex;
pub mod metadata;
pub mod model;
pub mod parse;
pub mod prelude;
pub mod unparse;

use self::{
    error::{ErrorCollector, ParseError},
    metadata::{MetadataOutput, extract_metadata, source_lines},
    model::{Chart, ChartItem},
};

/// The result of [`parse_simai`]: the chart and everything found wrong on the way.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct SimaiOutput {
    /// The parsed chart.
    pub chart: Chart,
    /// Errors and warnings in the order they were found, headers first.
    pub errors: Vec<ParseError>,
}

/// Parses a whole chart file, header lines and note body.
pub fn parse_simai(source: &str) -> SimaiOutput {
    let MetadataOutput {
        metadata,
        body,
        errors: header_errors,
        ..
    } = extract_metadata(source);
    let mut errors = ErrorCollector::new();
    errors.extend(header_errors);

    let lexed = lex::tokenize(&body);
    if !lexed.terminated {
        log::debug!("simai: note body has no `E` terminator");
    }
    let items = parse::parse_items(&lexed.tokens, &mut errors);
    SimaiOutput {
        chart: Chart::new(metadata, items),
        errors: errors.into_vec(),
    }
}

/// Parses note body text only, discarding the problems found.
///
/// Header lines are not recognized here. Use [`parse_simai`] for a whole file.
#[must_use]
pub fn parse_simai_chart(notes: &str) -> Vec<ChartItem> {
    parse_simai_chart_with_errors(notes).0
}

/// Parses note body text only, returning the problems found too.
#[must_use]
pub fn parse_simai_chart_with_errors(notes: &str) -> (Vec<ChartItem>, Vec<ParseError>) {
    let body: Vec<_> = source_lines(notes).collect();
    let lexed = lex::tokenize(&body);
    let mut errors = ErrorCollector::new();
    let items = parse::parse_items(&lexed.tokens, &mut errors);
    (items, errors.into_vec())
}
