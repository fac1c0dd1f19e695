//! Pattern rules for a single token, using chumsky.
//!
//! The rules only capture the written characters. Checking lane ranges, reading durations and
//! resolving slide shapes is left to [`crate::simai::parse`].

use chumsky::prelude::*;

type Extra<'a> = extra::Err<Rich<'a, char>>;

/// A part of the `(BPM){DIVISION}` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawPrefix<'a> {
    /// The text inside `(...)`.
    Bpm(&'a str),
    /// The text inside `{...}`.
    Division(&'a str),
}

/// Captures of one sub-event, an event between `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawEvent<'a> {
    /// `C`, `B3`, `Ch[4:1]`, `E5f` and so on.
    Touch {
        /// The zone letter.
        zone: char,
        /// The position digit.
        position: Option<char>,
        /// Whether `h` was written.
        hold: bool,
        /// Whether `f` was written.
        hanabi: bool,
        /// The text inside `[...]`.
        duration: Option<&'a str>,
    },
    /// A note starting with a lane digit.
    Note {
        /// The lane digit.
        lane: char,
        /// `?` or `!`.
        visibility: Option<char>,
        /// What follows the lane.
        suffix: RawSuffix<'a>,
    },
}

/// What follows the lane of a [`RawEvent::Note`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawSuffix<'a> {
    /// Nothing.
    Tap,
    /// `h` with an optional `[...]`.
    Hold {
        /// The text inside `[...]`.
        duration: Option<&'a str>,
    },
    /// One or more paths separated by `*`.
    Slides(Vec<RawSlidePath<'a>>),
}

/// One path of a slide, such as `-5[4:1]` or `V35[8:3]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawSlidePath<'a> {
    /// The shape characters, such as `-` or `pp`.
    pub shape: &'a str,
    /// The endpoint digits.
    pub endpoints: &'a str,
    /// The text inside `[...]`.
    pub duration: Option<&'a str>,
}

fn bracket<'a>() -> impl Parser<'a, &'a str, &'a str, Extra<'a>> + Clone {
    none_of("]")
        .repeated()
        .to_slice()
        .delimited_by(just('['), just(']'))
}

/// Break, ex, star shaped and similar marks. They do not affect timing.
fn decorations<'a>() -> impl Parser<'a, &'a str, (), Extra<'a>> + Clone {
    one_of("bx$@").repeated().ignored()
}

fn digit<'a>() -> impl Parser<'a, &'a str, char, Extra<'a>> + Clone {
    one_of("0123456789")
}

fn prefix<'a>() -> impl Parser<'a, &'a str, (Vec<RawPrefix<'a>>, &'a str), Extra<'a>> {
    let bpm = none_of(")")
        .repeated()
        .to_slice()
        .delimited_by(just('('), just(')'))
        .map(RawPrefix::Bpm);
    let division = none_of("}")
        .repeated()
        .to_slice()
        .delimited_by(just('{'), just('}'))
        .map(RawPrefix::Division);
    choice((bpm, division))
        .repeated()
        .collect::<Vec<_>>()
        .then(any().repeated().to_slice())
        .then_ignore(end())
}

fn touch<'a>() -> impl Parser<'a, &'a str, RawEvent<'a>, Extra<'a>> {
    one_of("ABCDE")
        .then(digit().or_not())
        .then(one_of("hf").repeated().collect::<Vec<char>>())
        .then(bracket().or_not())
        .then_ignore(end())
        .map(|(((zone, position), flags), duration)| RawEvent::Touch {
            zone,
            position,
            hold: flags.contains(&'h'),
            hanabi: flags.contains(&'f'),
            duration,
        })
}

fn note<'a>() -> impl Parser<'a, &'a str, RawEvent<'a>, Extra<'a>> {
    let head = digit()
        .then_ignore(decorations())
        .then(one_of("?!").or_not())
        .then_ignore(decorations());

    let hold = just('h')
        .ignore_then(decorations())
        .ignore_then(bracket().or_not())
        .then_ignore(decorations())
        .then_ignore(end())
        .map(|duration| RawSuffix::Hold { duration });

    let shape = none_of("0123456789[]*?!bx$@").repeated().at_least(1).to_slice();
    let path = shape
        .then(digit().repeated().to_slice())
        .then_ignore(decorations())
        .then(bracket().or_not())
        .then_ignore(decorations())
        .map(|((shape, endpoints), duration)| RawSlidePath {
            shape,
            endpoints,
            duration,
        });
    let slides = path
        .separated_by(just('*'))
        .at_least(1)
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(RawSuffix::Slides);

    let tap = end().to(RawSuffix::Tap);

    head.then(choice((hold, slides, tap)))
        .map(|((lane, visibility), suffix)| RawEvent::Note {
            lane,
            visibility,
            suffix,
        })
}

/// Splits the leading `(BPM){DIVISION}` groups off a token, in written order.
///
/// An unclosed group is not a prefix and stays in the returned rest.
#[must_use]
pub fn split_prefix(token: &str) -> (Vec<RawPrefix<'_>>, &str) {
    prefix()
        .parse(token)
        .into_output()
        .unwrap_or((vec![], token))
}

/// Matches a sub-event against the touch pattern, then the note pattern.
#[must_use]
pub fn match_event(event: &str) -> Option<RawEvent<'_>> {
    touch().or(note()).parse(event).into_output()
}
