//! Fancy diagnostics support using `ariadne`.
//!
//! This module converts the [`ParseError`]s collected while parsing into `ariadne::Report`s.
//! Each error carries the byte span of the offending token or header line, so ariadne can point
//! at the source and handle row/column calculations for display purposes. A suggestion, if any,
//! is shown as the help line.
//!
//! # Usage Example
//!
//! ```rust
//! # #[cfg(feature = "diagnostics")]
//! # {
//! use simai_rs::{diagnostics::emit_parse_errors, simai::parse_simai};
//!
//! let source = "&title=Test\n(120){4}1,9,2h,E";
//! let output = parse_simai(source);
//!
//! // Output all errors and warnings
//! emit_parse_errors("test.txt", source, &output.errors);
//! # }
//! ```

#[cfg(feature = "diagnostics")]
use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

#[cfg(feature = "diagnostics")]
use crate::simai::error::{ParseError, Severity};

/// Simple source container that holds the filename and source text.
/// Ariadne will automatically handle row/column calculations from byte offsets.
///
/// # Usage Example
///
/// ```rust
/// use simai_rs::diagnostics::SimpleSource;
///
/// let source_text = "&title=test\n1,2,E\n";
/// let source = SimpleSource::new("test.txt", source_text);
///
/// assert_eq!(source.text(), source_text);
/// assert_eq!(source.name(), "test.txt");
/// ```
pub struct SimpleSource<'a> {
    /// Name of the source file.
    name: &'a str,
    /// Source text content.
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Create a new source container instance.
    ///
    /// # Parameters
    /// * `name` - Name of the source file
    /// * `text` - Complete text content of the source file
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Get source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Get source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Trait for converting positioned errors to `ariadne::Report`.
#[cfg(feature = "diagnostics")]
pub trait ToAriadne {
    /// Convert error to ariadne Report.
    ///
    /// # Parameters
    /// * `src` - Source file container (used for filename, ariadne handles row/column calculation)
    fn to_report<'a>(&self, src: &SimpleSource<'a>)
    -> Report<'a, (String, std::ops::Range<usize>)>;
}

/// Helper to build a styled ariadne `Report` consistently.
#[cfg(feature = "diagnostics")]
#[must_use]
pub fn build_report<'a>(
    src: &SimpleSource<'a>,
    kind: ReportKind<'a>,
    range: std::ops::Range<usize>,
    title: &str,
    label_message: impl ToString,
    color: Color,
    help: Option<&str>,
) -> Report<'a, (String, std::ops::Range<usize>)> {
    let filename = src.name().to_string();
    let builder = Report::build(kind, (filename.clone(), range.clone()))
        .with_config(Config::new().with_index_type(IndexType::Byte))
        .with_message(title)
        .with_label(
            Label::new((filename, range))
                .with_message(label_message.to_string())
                .with_color(color),
        );
    match help {
        Some(help) => builder.with_help(help).finish(),
        None => builder.finish(),
    }
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for ParseError {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        let (kind, color, label) = match self.severity {
            Severity::Error => (ReportKind::Error, Color::Red, "dropped"),
            Severity::Warning => (ReportKind::Warning, Color::Yellow, "fallback applied"),
        };
        // Clamped to the text.
        let len = src.text().len();
        let range = self
            .span
            .clone()
            .map_or(0..0, |span| span.start.min(len)..span.end.min(len));
        build_report(
            src,
            kind,
            range,
            &self.message(),
            label,
            color,
            self.suggestion.as_deref(),
        )
    }
}

/// Convenience method: batch render a list of [`ParseError`]s to stderr.
///
/// # Parameters
/// * `name` - Name of the source file, used for display in diagnostic information
/// * `source` - Complete chart source text
/// * `errors` - List of errors and warnings to display
#[cfg(feature = "diagnostics")]
pub fn emit_parse_errors<'a>(
    name: &'a str,
    source: &'a str,
    errors: impl IntoIterator<Item = &'a ParseError>,
) {
    let simple = SimpleSource::new(name, source);
    let ariadne_source = Source::from(source);
    for error in errors {
        let report = error.to_report(&simple);
        let _ = report.eprint((name.to_string(), ariadne_source.clone()));
    }
}

/// Collect `ariadne::Report` instances for a list of [`ParseError`]s without printing.
///
/// This is useful in tests to verify diagnostics can be generated while keeping test output clean.
#[cfg(feature = "diagnostics")]
#[must_use]
pub fn collect_parse_reports<'a>(
    name: &'a str,
    source: &'a str,
    errors: impl IntoIterator<Item = &'a ParseError>,
) -> Vec<Report<'a, (String, std::ops::Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    errors
        .into_iter()
        .map(|error| error.to_report(&simple))
        .collect()
}
