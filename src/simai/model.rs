//! Definitions of the parsed chart model.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use strict_num_extended::PositiveF64;

use super::command::{
    Lane, NoteDuration, RotationDirection, SlideType, StarVisibility, TouchZone,
};

/// Header information of the chart. Absent fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartMetadata {
    /// `&title=`, the song title.
    pub title: Option<String>,
    /// `&artist=`, the song composer.
    pub artist: Option<String>,
    /// `&bpm=`, the default tempo, used when the note body starts without one.
    pub bpm: Option<PositiveF64>,
    /// `&charter=` (or `mapper`, `author`, `des`), the author of the chart.
    pub charter: Option<String>,
    /// `&difficulty=` (or `level`, `lv`), a free-form level such as `13+`.
    pub difficulty: Option<String>,
    /// Other well-formed headers, keyed by their lowercase name.
    pub extra: BTreeMap<String, String>,
}

impl ChartMetadata {
    /// Whether no header was recognized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.bpm.is_none()
            && self.charter.is_none()
            && self.difficulty.is_none()
            && self.extra.is_empty()
    }
}

/// `(BPM){DIVISION}`, changes the ambient tempo and division from this point forward.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// The new tempo, or `None` to keep the previous one.
    pub bpm: Option<PositiveF64>,
    /// The new subdivision of a measure.
    pub division: NonZeroU32,
}

/// Silent advance by some ambient subdivisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rest {
    /// How many ambient subdivisions to skip.
    pub division_count: u32,
}

/// A playable note.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum NoteData {
    /// `1`, a tap on a lane.
    Tap {
        /// The lane to tap.
        lane: Lane,
    },
    /// `1h[4:1]`, a note held on a lane.
    Hold {
        /// The lane to hold.
        lane: Lane,
        /// How long to hold.
        duration: NoteDuration,
    },
    /// `1-5[4:1]`, a tap followed by tracing a path to another lane.
    Slide {
        /// The lane where the star appears.
        lane: Lane,
        /// How long tracing the path takes.
        duration: NoteDuration,
        /// The shape of the path.
        slide_type: SlideType,
        /// The rotation of the path.
        direction: RotationDirection,
        /// The lane where the path ends.
        destination_lane: Lane,
        /// The bending point of an `L` shaped path, `None` for the other shapes.
        via_lane: Option<Lane>,
        /// How the star is shown.
        star_visibility: StarVisibility,
    },
    /// `B3`, a tap on a touch sensor.
    Touch {
        /// The sensor area.
        zone: TouchZone,
        /// The sensor in the area, `None` for the center.
        position: Option<Lane>,
        /// `f`, whether the hit shows fireworks.
        is_hanabi: bool,
    },
    /// `Ch[4:1]`, a touch sensor held down.
    TouchHold {
        /// The sensor area.
        zone: TouchZone,
        /// The sensor in the area, `None` for the center.
        position: Option<Lane>,
        /// How long to hold.
        duration: NoteDuration,
        /// `f`, whether the hit shows fireworks.
        is_hanabi: bool,
    },
}

impl NoteData {
    /// The lane of the note, `None` for touch notes.
    #[must_use]
    pub const fn lane(&self) -> Option<Lane> {
        match self {
            Self::Tap { lane } | Self::Hold { lane, .. } | Self::Slide { lane, .. } => Some(*lane),
            Self::Touch { .. } | Self::TouchHold { .. } => None,
        }
    }

    /// The length of the note, `None` for taps and touches.
    #[must_use]
    pub const fn duration(&self) -> Option<&NoteDuration> {
        match self {
            Self::Hold { duration, .. }
            | Self::Slide { duration, .. }
            | Self::TouchHold { duration, .. } => Some(duration),
            Self::Tap { .. } | Self::Touch { .. } => None,
        }
    }
}

/// An entry of the note sequence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "data", rename_all = "camelCase"))]
pub enum ChartItem {
    /// A single note on its beat.
    Note(NoteData),
    /// A silent advance.
    Rest(Rest),
    /// A tempo or division change.
    TimeSignature(TimeSignature),
    /// Two or more notes sharing one onset beat, in written order.
    Each(Vec<NoteData>),
}

impl ChartItem {
    /// The notes placed by this item: one for a note, all members of an EACH, none otherwise.
    #[must_use]
    pub fn notes(&self) -> &[NoteData] {
        match self {
            Self::Note(note) => std::slice::from_ref(note),
            Self::Each(notes) => notes,
            Self::Rest(_) | Self::TimeSignature(_) => &[],
        }
    }
}

/// A parsed chart. It cannot be modified after parsing.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chart {
    metadata: ChartMetadata,
    items: Vec<ChartItem>,
}

impl Chart {
    /// Assembles a chart from its parts.
    #[must_use]
    pub const fn new(metadata: ChartMetadata, items: Vec<ChartItem>) -> Self {
        Self { metadata, items }
    }

    /// The header information.
    #[must_use]
    pub const fn metadata(&self) -> &ChartMetadata {
        &self.metadata
    }

    /// The note sequence in written order.
    #[must_use]
    pub fn items(&self) -> &[ChartItem] {
        &self.items
    }

    /// Iterates every note, flattening EACH groups.
    pub fn notes(&self) -> impl Iterator<Item = &NoteData> {
        self.items.iter().flat_map(ChartItem::notes)
    }

    /// Splits the chart back into its parts.
    #[must_use]
    pub fn into_parts(self) -> (ChartMetadata, Vec<ChartItem>) {
        (self.metadata, self.items)
    }
}
