//! Errors and warnings collected while parsing a chart.
//!
//! Parsing never stops at a malformed line or note. Every problem found is recorded as a
//! [`ParseError`] with its position and severity, and the offending part is skipped or replaced
//! with a fallback.

use std::ops::Range;

use thiserror::Error;

use super::command::mixin::{SourcePosition, SourceRangeMixin};

/// How serious a [`ParseError`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// An optional field was missing or a line was ignored, and a fallback was applied.
    Warning,
    /// The notation broke a hard rule, and the offending note or field was dropped.
    Error,
}

/// A problem found while parsing.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseErrorKind {
    /// A `&` line without `key=value` form. The line is kept as note body.
    #[error("malformed header line `{0}`, expected `&key=value`")]
    MalformedHeader(String),
    /// A `#` line without `key: value` form. The line is ignored.
    #[error("header comment `{0}` not recognized, expected `# key: value`")]
    UnrecognizedHeaderComment(String),
    /// The header bpm was not a number.
    #[error("bpm `{0}` is not a number")]
    InvalidHeaderBpm(String),
    /// The header bpm was zero or negative.
    #[error("bpm `{0}` must be positive")]
    NonPositiveHeaderBpm(String),
    /// The bpm of `(BPM)` was not a positive number.
    #[error("invalid bpm `({0})`")]
    InvalidBpm(String),
    /// The division of `{DIVISION}` was not a positive integer.
    #[error("invalid division `{{{0}}}`")]
    InvalidDivision(String),
    /// An event matched neither the touch nor the note pattern.
    #[error("unrecognized note `{0}`")]
    UnrecognizedNote(String),
    /// A lane outside of `1..=8`.
    #[error("lane `{0}` is out of range 1-8")]
    LaneOutOfRange(char),
    /// A slide destination or midpoint outside of `1..=8`.
    #[error("slide endpoint `{0}` is out of range 1-8")]
    DestinationOutOfRange(char),
    /// A touch sensor position outside of `1..=8`.
    #[error("touch position `{0}` is out of range 1-8")]
    TouchPositionOutOfRange(char),
    /// A hold written without its length.
    #[error("hold has no duration, using [8:0]")]
    MissingHoldDuration,
    /// A hold length that could not be read.
    #[error("invalid hold duration `[{0}]`, using [8:0]")]
    InvalidHoldDuration(String),
    /// A slide written without its length.
    #[error("slide `{0}` has no duration")]
    MissingSlideDuration(String),
    /// A slide length that could not be read.
    #[error("invalid slide duration `[{0}]`")]
    InvalidSlideDuration(String),
    /// A slide shape that is not known.
    #[error("unknown slide shape `{0}`")]
    UnknownSlideShape(String),
    /// The endpoint digits did not fit the slide shape.
    #[error("slide `{shape}` expects {expected} endpoint digit(s), found `{found}`")]
    InvalidSlideEndpoints {
        /// The shape characters.
        shape: String,
        /// The number of digits the shape needs.
        expected: usize,
        /// The written digits.
        found: String,
    },
    /// An `L` slide (`V`) without its midpoint lane.
    #[error("L slide `V{0}` has no midpoint lane")]
    MissingSlideMidpoint(String),
    /// A WiFi slide whose endpoints are not 3 or 5 lanes apart.
    #[error("WiFi slide from lane {from} to lane {to} must span 3 or 5 lanes")]
    InvalidWifiEndpoints {
        /// The source lane.
        from: u8,
        /// The destination lane.
        to: u8,
    },
}

impl ParseErrorKind {
    /// The severity this kind of problem is reported with.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::MalformedHeader(_)
            | Self::UnrecognizedHeaderComment(_)
            | Self::MissingHoldDuration => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A positioned problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Whether a fallback was applied or something was dropped.
    pub severity: Severity,
    /// The line position, starts with 1.
    pub line: Option<usize>,
    /// The column position of char count, starts with 1.
    pub column: Option<usize>,
    /// The byte range in the source text.
    pub span: Option<Range<usize>>,
    /// A human readable hint to fix the notation.
    pub suggestion: Option<String>,
}

impl ParseError {
    /// Creates an error without position, using the severity of `kind`.
    #[must_use]
    pub const fn new(kind: ParseErrorKind) -> Self {
        let severity = kind.severity();
        Self {
            kind,
            severity,
            line: None,
            column: None,
            span: None,
            suggestion: None,
        }
    }

    /// Attaches the position of the source range.
    #[must_use]
    pub fn at(mut self, start: SourcePosition, end: usize) -> Self {
        self.line = Some(start.line);
        self.column = Some(start.column);
        self.span = Some(start.index..end.max(start.index));
        self
    }

    /// Attaches the position of a wrapped value.
    #[must_use]
    pub fn at_wrapper<T>(self, wrapper: &SourceRangeMixin<T>) -> Self {
        let range = wrapper.range();
        self.at(wrapper.start(), range.end)
    }

    /// Attaches a hint to fix the notation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// The human readable message.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Whether this is a hard error rather than a warning.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<ParseErrorKind> for ParseError {
    fn from(kind: ParseErrorKind) -> Self {
        Self::new(kind)
    }
}

/// An append-only list of [`ParseError`]s shared by the parsing phases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorCollector {
    entries: Vec<ParseError>,
}

impl ErrorCollector {
    /// Creates an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a problem.
    pub fn push(&mut self, error: impl Into<ParseError>) {
        let error = error.into();
        log::debug!("simai: {} ({:?})", error.kind, error.severity);
        self.entries.push(error);
    }

    /// Appends all problems collected by another phase, keeping their order.
    pub fn extend(&mut self, errors: impl IntoIterator<Item = ParseError>) {
        self.entries.extend(errors);
    }

    /// The problems recorded so far, in the order they were found.
    #[must_use]
    pub fn as_slice(&self) -> &[ParseError] {
        &self.entries
    }

    /// Iterates the hard errors.
    pub fn errors(&self) -> impl Iterator<Item = &ParseError> {
        self.entries.iter().filter(|entry| entry.is_error())
    }

    /// Iterates the warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &ParseError> {
        self.entries.iter().filter(|entry| !entry.is_error())
    }

    /// Whether any hard error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Leans the problems out of the collector.
    #[must_use]
    pub fn into_vec(self) -> Vec<ParseError> {
        self.entries
    }
}
