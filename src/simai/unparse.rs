//! Writes the chart model back into simai notation.
//!
//! Parsing the output again gives back the same metadata and the same items, except that
//! consecutive rests come back merged and `^` slides come back as `<` or `>`.

use itertools::Itertools;

use super::{
    command::{RotationDirection, SlideType, StarVisibility},
    model::{Chart, ChartItem, ChartMetadata, NoteData},
};

/// Writes the metadata as `&key=value` lines, each terminated by `\n`.
#[must_use]
pub fn export_metadata(metadata: &ChartMetadata) -> String {
    let mut lines: Vec<(&str, String)> = Vec::new();
    if let Some(title) = metadata.title.as_deref() {
        lines.push(("title", title.to_string()));
    }
    if let Some(artist) = metadata.artist.as_deref() {
        lines.push(("artist", artist.to_string()));
    }
    if let Some(bpm) = metadata.bpm.as_ref() {
        lines.push(("bpm", bpm.as_f64().to_string()));
    }
    if let Some(charter) = metadata.charter.as_deref() {
        lines.push(("charter", charter.to_string()));
    }
    if let Some(difficulty) = metadata.difficulty.as_deref() {
        lines.push(("difficulty", difficulty.to_string()));
    }
    for (key, value) in &metadata.extra {
        lines.push((key.as_str(), value.clone()));
    }
    lines
        .into_iter()
        .map(|(key, value)| format!("&{key}={value}\n"))
        .collect()
}

/// Writes the items as a note body terminated by `E`.
#[must_use]
pub fn export_items(items: &[ChartItem]) -> String {
    let mut tokens: Vec<String> = Vec::new();
    let mut prefix = String::new();
    for item in items {
        match item {
            ChartItem::TimeSignature(signature) => {
                if let Some(bpm) = signature.bpm.as_ref() {
                    prefix.push_str(&format!("({})", bpm.as_f64()));
                }
                prefix.push_str(&format!("{{{}}}", signature.division));
            }
            ChartItem::Rest(rest) => {
                for _ in 0..rest.division_count {
                    tokens.push(std::mem::take(&mut prefix));
                }
            }
            ChartItem::Note(_) | ChartItem::Each(_) => {
                let notes = item.notes().iter().map(export_note).join("/");
                tokens.push(std::mem::take(&mut prefix) + &notes);
            }
        }
    }
    if !prefix.is_empty() {
        tokens.push(prefix);
    }
    tokens.push("E".to_string());
    tokens.join(",")
}

/// Writes the whole chart, headers first.
#[must_use]
pub fn export_chart(chart: &Chart) -> String {
    export_metadata(chart.metadata()) + &export_items(chart.items())
}

fn slide_shape(slide_type: SlideType, direction: RotationDirection) -> &'static str {
    let clockwise = direction == RotationDirection::Clockwise;
    match (slide_type, clockwise) {
        (SlideType::Straight, _) => "-",
        (SlideType::Circle, true) => ">",
        (SlideType::Circle, false) => "<",
        (SlideType::U, true) => "q",
        (SlideType::U, false) => "p",
        (SlideType::Cup, true) => "qq",
        (SlideType::Cup, false) => "pp",
        (SlideType::Thunder, true) => "z",
        (SlideType::Thunder, false) => "s",
        (SlideType::V, _) => "v",
        (SlideType::L, _) => "V",
        (SlideType::WiFi, _) => "w",
    }
}

fn export_note(note: &NoteData) -> String {
    match note {
        NoteData::Tap { lane } => lane.to_string(),
        NoteData::Hold { lane, duration } => format!("{lane}h{duration}"),
        NoteData::Slide {
            lane,
            duration,
            slide_type,
            direction,
            destination_lane,
            via_lane,
            star_visibility,
        } => {
            let visibility = match star_visibility {
                StarVisibility::Normal => "",
                StarVisibility::FadeIn => "?",
                StarVisibility::Hidden => "!",
            };
            let via = via_lane.map(|via| via.to_string()).unwrap_or_default();
            format!(
                "{lane}{visibility}{}{via}{destination_lane}{duration}",
                slide_shape(*slide_type, *direction)
            )
        }
        NoteData::Touch {
            zone,
            position,
            is_hanabi,
        } => {
            let position = position.map(|lane| lane.to_string()).unwrap_or_default();
            let hanabi = if *is_hanabi { "f" } else { "" };
            format!("{zone}{position}{hanabi}")
        }
        NoteData::TouchHold {
            zone,
            position,
            duration,
            is_hanabi,
        } => {
            let position = position.map(|lane| lane.to_string()).unwrap_or_default();
            let hanabi = if *is_hanabi { "f" } else { "" };
            format!("{zone}{position}h{hanabi}{duration}")
        }
    }
}
