//! Reading `[DIV:COUNT]` and `[BPM#DIV:COUNT]` brackets.

use std::num::NonZeroU32;

use crate::simai::command::{NoteDuration, positive_bpm};

/// Parses the text inside a duration bracket. Returns `None` when it is malformed.
#[must_use]
pub fn parse_duration(body: &str) -> Option<NoteDuration> {
    let (bpm, length) = match body.split_once('#') {
        Some((bpm, length)) => (Some(bpm), length),
        None => (None, body),
    };
    let (division, count) = length.split_once(':')?;
    let division = NonZeroU32::new(division.trim().parse().ok()?)?;
    let count = count.trim().parse().ok()?;
    let duration = NoteDuration::new(division, count);
    match bpm {
        Some(bpm) => Some(duration.with_bpm(positive_bpm(bpm.trim().parse().ok()?)?)),
        None => Some(duration),
    }
}
