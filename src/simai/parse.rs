//! Builds the typed chart items from the tokens.
//!
//! Each token is matched with [`grammar`](super::lex::grammar) and its captures are converted
//! into [`ChartItem`]s. Problems are pushed to an [`ErrorCollector`] and only drop the offending
//! note or prefix part, so the remaining tokens are still built.
//!
//! - An empty token is a one-beat rest. Consecutive rests are merged.
//! - A token with sub-events separated by `/` becomes an [`ChartItem::Each`], or a
//!   [`ChartItem::Note`] if only one note survives.
//! - Same-origin slides `1-5[4:1]*-7[4:1]` become separate slides of the same EACH.

pub mod duration;
pub mod slide;

use std::num::NonZeroU32;

use self::{duration::parse_duration, slide::resolve_slide};
use super::{
    command::{Lane, NoteDuration, StarVisibility, TouchZone, positive_bpm},
    error::{ErrorCollector, ParseError, ParseErrorKind},
    lex::{
        TokenWithRange,
        grammar::{RawEvent, RawPrefix, RawSlidePath, RawSuffix, match_event, split_prefix},
    },
    model::{ChartItem, NoteData, Rest, TimeSignature},
};

/// The division in effect before any `{DIVISION}` is written.
pub const DEFAULT_DIVISION: NonZeroU32 = match NonZeroU32::new(4) {
    Some(division) => division,
    None => unreachable!(),
};

/// Converts the tokens into chart items, pushing problems to `errors`.
pub fn parse_items(tokens: &[TokenWithRange], errors: &mut ErrorCollector) -> Vec<ChartItem> {
    let mut builder = ItemBuilder {
        items: vec![],
        division: DEFAULT_DIVISION,
        pending_rest: 0,
        errors,
    };
    for token in tokens {
        builder.token(token);
    }
    builder.flush_rest();
    builder.items
}

struct ItemBuilder<'e> {
    items: Vec<ChartItem>,
    /// The ambient division carried by a prefix that omits `{DIVISION}`.
    division: NonZeroU32,
    pending_rest: u32,
    errors: &'e mut ErrorCollector,
}

impl ItemBuilder<'_> {
    fn flush_rest(&mut self) {
        if self.pending_rest > 0 {
            self.items.push(ChartItem::Rest(Rest {
                division_count: std::mem::take(&mut self.pending_rest),
            }));
        }
    }

    fn report(&mut self, error: impl Into<ParseError>, token: &TokenWithRange) {
        self.errors.push(error.into().at_wrapper(token));
    }

    fn token(&mut self, token: &TokenWithRange) {
        let (prefix, body) = split_prefix(token.content());
        if !prefix.is_empty() {
            self.time_signature(&prefix, token);
        }
        if body.is_empty() {
            self.pending_rest += 1;
            return;
        }

        let notes: Vec<NoteData> = body
            .split('/')
            .filter(|event| !event.is_empty())
            .flat_map(|event| self.event(event, token))
            .collect();
        log::trace!("simai: token {token} built {} note(s)", notes.len());
        match notes.len() {
            0 => {}
            1 => {
                self.flush_rest();
                self.items.extend(notes.into_iter().map(ChartItem::Note));
            }
            _ => {
                self.flush_rest();
                self.items.push(ChartItem::Each(notes));
            }
        }
    }

    fn time_signature(&mut self, prefix: &[RawPrefix<'_>], token: &TokenWithRange) {
        let mut bpm = None;
        let mut division = None;
        for part in prefix {
            match *part {
                RawPrefix::Bpm(text) => {
                    match text.trim().parse().ok().and_then(positive_bpm) {
                        Some(value) => bpm = Some(value),
                        None => self.report(ParseErrorKind::InvalidBpm(text.to_string()), token),
                    }
                }
                RawPrefix::Division(text) => {
                    match text.trim().parse().ok().and_then(NonZeroU32::new) {
                        Some(value) => division = Some(value),
                        None => self.report(
                            ParseError::new(ParseErrorKind::InvalidDivision(text.to_string()))
                                .with_suggestion("a division is a positive integer such as `{4}`"),
                            token,
                        ),
                    }
                }
            }
        }
        if bpm.is_none() && division.is_none() {
            return;
        }
        let division = division.unwrap_or(self.division);
        self.division = division;
        self.flush_rest();
        self.items
            .push(ChartItem::TimeSignature(TimeSignature { bpm, division }));
    }

    fn event(&mut self, event: &str, token: &TokenWithRange) -> Vec<NoteData> {
        let Some(raw) = match_event(event) else {
            self.report(
                ParseError::new(ParseErrorKind::UnrecognizedNote(event.to_string()))
                    .with_suggestion("a note starts with a lane 1-8 or a touch zone A-E"),
                token,
            );
            return vec![];
        };
        match raw {
            RawEvent::Touch {
                zone,
                position,
                hold,
                hanabi,
                duration,
            } => self.touch(zone, position, hold, hanabi, duration, token),
            RawEvent::Note {
                lane,
                visibility,
                suffix,
            } => {
                let Ok(lane) = Lane::try_from(lane) else {
                    self.report(ParseErrorKind::LaneOutOfRange(lane), token);
                    return vec![];
                };
                match suffix {
                    RawSuffix::Tap => vec![NoteData::Tap { lane }],
                    RawSuffix::Hold { duration } => vec![NoteData::Hold {
                        lane,
                        duration: self.hold_duration(duration, token),
                    }],
                    RawSuffix::Slides(paths) => {
                        let star_visibility = match visibility {
                            Some('?') => StarVisibility::FadeIn,
                            Some('!') => StarVisibility::Hidden,
                            _ => StarVisibility::Normal,
                        };
                        paths
                            .iter()
                            .filter_map(|path| self.slide(lane, star_visibility, path, token))
                            .collect()
                    }
                }
            }
        }
    }

    fn touch(
        &mut self,
        zone: char,
        position: Option<char>,
        hold: bool,
        is_hanabi: bool,
        duration: Option<&str>,
        token: &TokenWithRange,
    ) -> Vec<NoteData> {
        let Ok(zone) = TouchZone::try_from(zone) else {
            self.report(ParseErrorKind::UnrecognizedNote(zone.to_string()), token);
            return vec![];
        };
        let position = match position.map(Lane::try_from).transpose() {
            Ok(position) => position,
            Err(digit) => {
                self.report(ParseErrorKind::TouchPositionOutOfRange(digit), token);
                return vec![];
            }
        };
        if hold || duration.is_some() {
            vec![NoteData::TouchHold {
                zone,
                position,
                duration: self.hold_duration(duration, token),
                is_hanabi,
            }]
        } else {
            vec![NoteData::Touch {
                zone,
                position,
                is_hanabi,
            }]
        }
    }

    /// Reads a hold length, falling back to `[8:0]`.
    fn hold_duration(&mut self, bracket: Option<&str>, token: &TokenWithRange) -> NoteDuration {
        match bracket {
            None => {
                self.report(
                    ParseError::new(ParseErrorKind::MissingHoldDuration)
                        .with_suggestion("write the length such as `h[4:1]`"),
                    token,
                );
                NoteDuration::hold_fallback()
            }
            Some(body) => parse_duration(body).unwrap_or_else(|| {
                self.report(
                    ParseError::new(ParseErrorKind::InvalidHoldDuration(body.to_string()))
                        .with_suggestion("write `[DIV:COUNT]` or `[BPM#DIV:COUNT]`"),
                    token,
                );
                NoteDuration::hold_fallback()
            }),
        }
    }

    fn slide(
        &mut self,
        lane: Lane,
        star_visibility: StarVisibility,
        path: &RawSlidePath<'_>,
        token: &TokenWithRange,
    ) -> Option<NoteData> {
        let shape = match resolve_slide(lane, path.shape, path.endpoints) {
            Ok(shape) => shape,
            Err(error) => {
                self.report(error, token);
                return None;
            }
        };
        let written = format!("{}{}", path.shape, path.endpoints);
        let Some(body) = path.duration else {
            self.report(
                ParseError::new(ParseErrorKind::MissingSlideDuration(written))
                    .with_suggestion("slides need a length such as `[4:1]`"),
                token,
            );
            return None;
        };
        let Some(duration) = parse_duration(body) else {
            self.report(
                ParseError::new(ParseErrorKind::InvalidSlideDuration(body.to_string()))
                    .with_suggestion("write `[DIV:COUNT]` or `[BPM#DIV:COUNT]`"),
                token,
            );
            return None;
        };
        Some(NoteData::Slide {
            lane,
            duration,
            slide_type: shape.slide_type,
            direction: shape.direction,
            destination_lane: shape.destination,
            via_lane: shape.via,
            star_visibility,
        })
    }
}
