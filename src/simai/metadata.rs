//! Splits header lines from the note body.
//!
//! This module handles the lines:
//!
//! - `&key=value` - A header. A line starting with `&` but without `=` is kept as note body.
//! - `# key: value` or `# key=value` - A comment-style header. Other `#` lines are skipped with a warning.
//!
//! The recognized keys (case-insensitive) are:
//!
//! - `title` - Title of the music.
//! - `artist` - Song author of the music.
//! - `bpm` (or `wholebpm`) - The default tempo.
//! - `charter` (or `mapper`, `author`, `des`) - Author of the chart.
//! - `difficulty` (or `level`, `lv`) - Level of the chart.
//!
//! Other well-formed headers are kept in [`ChartMetadata::extra`].

use super::{
    command::{mixin::SourcePosition, positive_bpm},
    error::{ErrorCollector, ParseError, ParseErrorKind},
    model::ChartMetadata,
};

/// A line of the note body with its place in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyLine<'a> {
    /// The line position, starts with 1.
    pub line: usize,
    /// The byte index of the line start in the source text.
    pub offset: usize,
    /// The line content without its line break.
    pub text: &'a str,
}

/// Result of [`extract_metadata`].
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct MetadataOutput<'a> {
    /// The recognized headers.
    pub metadata: ChartMetadata,
    /// The note body lines joined with `\n`.
    pub notes: String,
    /// The note body lines with their positions.
    pub body: Vec<BodyLine<'a>>,
    /// Problems found in the header lines.
    pub errors: Vec<ParseError>,
}

/// Iterates the lines of `source` as [`BodyLine`]s, handling CRLF.
pub fn source_lines(source: &str) -> impl Iterator<Item = BodyLine<'_>> {
    source
        .split_inclusive('\n')
        .scan(0usize, |offset, raw| {
            let start = *offset;
            *offset += raw.len();
            let text = raw.strip_suffix('\n').unwrap_or(raw);
            let text = text.strip_suffix('\r').unwrap_or(text);
            Some((start, text))
        })
        .enumerate()
        .map(|(idx, (offset, text))| BodyLine {
            line: idx + 1,
            offset,
            text,
        })
}

/// Splits `source` into the headers and the note body.
pub fn extract_metadata(source: &str) -> MetadataOutput<'_> {
    let mut metadata = ChartMetadata::default();
    let mut body = vec![];
    let mut errors = ErrorCollector::new();

    for line in source_lines(source) {
        let trimmed = line.text.trim_start();
        let indent = line.text.len() - trimmed.len();
        let start = SourcePosition {
            line: line.line,
            column: line.text[..indent].chars().count() + 1,
            index: line.offset + indent,
        };
        let end = line.offset + line.text.len();

        if let Some(header) = trimmed.strip_prefix('&') {
            match split_key_value(header, &['=']) {
                Some((key, value)) => apply_header(key, value, &mut metadata)
                    .unwrap_or_else(|kind| errors.push(ParseError::new(kind).at(start, end))),
                None => {
                    errors.push(
                        ParseError::new(ParseErrorKind::MalformedHeader(trimmed.trim_end().into()))
                            .at(start, end)
                            .with_suggestion("write headers as `&key=value`"),
                    );
                    body.push(line);
                }
            }
        } else if let Some(comment) = trimmed.strip_prefix('#') {
            match split_key_value(comment, &[':', '=']) {
                Some((key, value)) => apply_header(key, value, &mut metadata)
                    .unwrap_or_else(|kind| errors.push(ParseError::new(kind).at(start, end))),
                None => errors.push(
                    ParseError::new(ParseErrorKind::UnrecognizedHeaderComment(
                        trimmed.trim_end().into(),
                    ))
                    .at(start, end),
                ),
            }
        } else {
            body.push(line);
        }
    }

    let notes = body
        .iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n");
    MetadataOutput {
        metadata,
        notes,
        body,
        errors: errors.into_vec(),
    }
}

/// Splits `key<sep>value`. The key must be a non-empty word.
fn split_key_value<'a>(line: &'a str, separators: &[char]) -> Option<(&'a str, &'a str)> {
    let (key, value) = line.split_once(separators)?;
    let key = key.trim();
    let is_word = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    is_word.then(|| (key, value.trim()))
}

fn apply_header(
    key: &str,
    value: &str,
    metadata: &mut ChartMetadata,
) -> Result<(), ParseErrorKind> {
    let key = key.to_ascii_lowercase();
    if value.is_empty() {
        return Ok(());
    }
    match key.as_str() {
        "title" => metadata.title = Some(value.to_string()),
        "artist" => metadata.artist = Some(value.to_string()),
        "bpm" | "wholebpm" => {
            let bpm: f64 = value
                .parse()
                .map_err(|_| ParseErrorKind::InvalidHeaderBpm(value.to_string()))?;
            let bpm = positive_bpm(bpm)
                .ok_or_else(|| ParseErrorKind::NonPositiveHeaderBpm(value.to_string()))?;
            metadata.bpm = Some(bpm);
        }
        "charter" | "mapper" | "author" | "des" => metadata.charter = Some(value.to_string()),
        "difficulty" | "level" | "lv" => metadata.difficulty = Some(value.to_string()),
        _ => {
            metadata.extra.insert(key, value.to_string());
        }
    }
    Ok(())
}
