//! Definitions of note argument data.
//!
//! Structures in this module are used by the grammar captures, the chart model and the
//! converter output.

pub mod mixin;

use std::num::NonZeroU32;

use num::Integer;
use strict_num_extended::PositiveF64;

/// The number of lanes placed around the play field.
pub const LANE_COUNT: u8 = 8;

/// One of the eight lanes around the circular play field, numbered clockwise from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lane(u8);

impl Lane {
    /// Creates a lane if `number` is in `1..=8`.
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number <= LANE_COUNT {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Returns the lane number in `1..=8`.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Counts the clockwise steps needed to reach `to` from this lane, in `0..8`.
    #[must_use]
    pub fn forward_distance(self, to: Self) -> u8 {
        let diff = i16::from(to.0) - i16::from(self.0);
        diff.mod_floor(&i16::from(LANE_COUNT)) as u8
    }

    /// Absolute difference between the lane numbers, ignoring the circular wrap.
    #[must_use]
    pub const fn abs_difference(self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl TryFrom<u8> for Lane {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(value)
    }
}

impl TryFrom<char> for Lane {
    type Error = char;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        value
            .to_digit(10)
            .and_then(|digit| Self::new(digit as u8))
            .ok_or(value)
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A touch sensor area. `C` is the center area, the others are rings of eight sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TouchZone {
    /// The outer ring in front of the buttons.
    A,
    /// The inner ring.
    B,
    /// The center sensor.
    C,
    /// The outer ring between the buttons.
    D,
    /// The ring between `A` and `B`.
    E,
}

impl TryFrom<char> for TouchZone {
    type Error = char;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        Ok(match value {
            'A' => Self::A,
            'B' => Self::B,
            'C' => Self::C,
            'D' => Self::D,
            'E' => Self::E,
            _ => return Err(value),
        })
    }
}

impl std::fmt::Display for TouchZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ch = match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        };
        write!(f, "{ch}")
    }
}

/// A shape of the path traced by a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlideType {
    /// `-`, a straight line.
    Straight,
    /// `<`, `>` and `^`, an arc along the outer circle.
    Circle,
    /// `p` and `q`, a loop around the center.
    U,
    /// `pp` and `qq`, a loop around the opposite side.
    Cup,
    /// `s` and `z`, a zigzag through the center.
    Thunder,
    /// `v`, a path through the center.
    V,
    /// `V`, a path bending at a midpoint lane.
    L,
    /// `w`, a fan spreading to three lanes.
    WiFi,
}

/// A rotation direction around the play field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationDirection {
    /// Clockwise, in the increasing lane order.
    Clockwise,
    /// Counterclockwise, in the decreasing lane order.
    #[default]
    CounterClockwise,
}

/// How the star of a slide appears before its path starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StarVisibility {
    /// The star is shown normally.
    #[default]
    Normal,
    /// `?`, the star fades in.
    FadeIn,
    /// `!`, the star is not shown.
    Hidden,
}

/// Checks that `value` is a usable tempo, finite and greater than zero.
#[must_use]
pub fn positive_bpm(value: f64) -> Option<PositiveF64> {
    if value.is_finite() && value > 0.0 {
        PositiveF64::new(value).ok()
    } else {
        None
    }
}

/// A length of an event measured in subdivisions, such as `[4:1]` or `[150#8:3]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteDuration {
    /// Overrides the ambient tempo for this event only.
    pub bpm: Option<PositiveF64>,
    /// The subdivision of a measure, such as 4 for quarter notes.
    pub division: NonZeroU32,
    /// How many subdivisions the event spans.
    pub division_count: u32,
}

impl NoteDuration {
    /// Creates a duration using the ambient tempo.
    #[must_use]
    pub const fn new(division: NonZeroU32, division_count: u32) -> Self {
        Self {
            bpm: None,
            division,
            division_count,
        }
    }

    /// The duration applied to a hold written without its length, `[8:0]`.
    #[must_use]
    pub const fn hold_fallback() -> Self {
        const EIGHTH: NonZeroU32 = match NonZeroU32::new(8) {
            Some(division) => division,
            None => unreachable!(),
        };
        Self::new(EIGHTH, 0)
    }

    /// Sets the tempo override.
    #[must_use]
    pub fn with_bpm(mut self, bpm: PositiveF64) -> Self {
        self.bpm = Some(bpm);
        self
    }
}

impl std::fmt::Display for NoteDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.bpm {
            Some(bpm) => write!(
                f,
                "[{}#{}:{}]",
                bpm.as_f64(),
                self.division,
                self.division_count
            ),
            None => write!(f, "[{}:{}]", self.division, self.division_count),
        }
    }
}
