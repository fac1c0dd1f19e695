//! Resolving the shape characters and endpoint digits of a slide path.

use itertools::Itertools;

use crate::simai::{
    command::{LANE_COUNT, Lane, RotationDirection, SlideType},
    error::{ParseError, ParseErrorKind},
};

/// The geometry of a slide path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideShape {
    /// The shape of the path.
    pub slide_type: SlideType,
    /// The rotation of the path.
    pub direction: RotationDirection,
    /// The lane where the path ends.
    pub destination: Lane,
    /// The bending point of an `L` shaped path.
    pub via: Option<Lane>,
}

/// How a shape decides its direction.
enum Rotation {
    Fixed(RotationDirection),
    /// `^`, the shorter way around.
    Auto,
    /// `V`, decided by the midpoint.
    ByMidpoint,
}

fn lookup_shape(shape: &str) -> Option<(SlideType, Rotation)> {
    use RotationDirection::{Clockwise as Cw, CounterClockwise as Ccw};
    use Rotation::Fixed;
    Some(match shape {
        "-" => (SlideType::Straight, Fixed(Ccw)),
        "<" => (SlideType::Circle, Fixed(Ccw)),
        ">" => (SlideType::Circle, Fixed(Cw)),
        "^" => (SlideType::Circle, Rotation::Auto),
        "p" => (SlideType::U, Fixed(Ccw)),
        "q" => (SlideType::U, Fixed(Cw)),
        "pp" => (SlideType::Cup, Fixed(Ccw)),
        "qq" => (SlideType::Cup, Fixed(Cw)),
        "s" => (SlideType::Thunder, Fixed(Ccw)),
        "z" => (SlideType::Thunder, Fixed(Cw)),
        "v" => (SlideType::V, Fixed(Ccw)),
        "V" => (SlideType::L, Rotation::ByMidpoint),
        "w" => (SlideType::WiFi, Fixed(Ccw)),
        _ => return None,
    })
}

fn endpoint(digit: char) -> Result<Lane, ParseError> {
    Lane::try_from(digit).map_err(|digit| ParseErrorKind::DestinationOutOfRange(digit).into())
}

/// Lanes a WiFi slide from `source` may end at.
fn wifi_destinations(source: Lane) -> impl Iterator<Item = Lane> {
    (1..=LANE_COUNT)
        .filter_map(Lane::new)
        .filter(move |&lane| matches!(source.abs_difference(lane), 3 | 5))
}

/// The rotation of `^`: clockwise when the destination is the lane just behind the source, or
/// when its number is less than four above the source lane number.
#[must_use]
pub fn auto_circle_direction(source: Lane, destination: Lane) -> RotationDirection {
    let difference = i16::from(destination.get()) - i16::from(source.get());
    if source.forward_distance(destination) == 7 || difference < 4 {
        RotationDirection::Clockwise
    } else {
        RotationDirection::CounterClockwise
    }
}

/// Resolves a slide path written from `source`.
pub fn resolve_slide(source: Lane, shape: &str, endpoints: &str) -> Result<SlideShape, ParseError> {
    let (slide_type, rotation) = lookup_shape(shape)
        .ok_or_else(|| ParseError::new(ParseErrorKind::UnknownSlideShape(shape.to_string())))?;
    let digits: Vec<char> = endpoints.chars().collect();
    let expected = if matches!(rotation, Rotation::ByMidpoint) {
        2
    } else {
        1
    };
    if matches!(rotation, Rotation::ByMidpoint) && digits.len() == 1 {
        return Err(
            ParseError::new(ParseErrorKind::MissingSlideMidpoint(endpoints.to_string()))
                .with_suggestion("write the midpoint lane before the destination, such as `V35`"),
        );
    }
    let (via, destination) = match (digits.as_slice(), expected) {
        ([mid, dest], 2) => (Some(endpoint(*mid)?), endpoint(*dest)?),
        ([dest], 1) => (None, endpoint(*dest)?),
        _ => {
            return Err(ParseErrorKind::InvalidSlideEndpoints {
                shape: shape.to_string(),
                expected,
                found: endpoints.to_string(),
            }
            .into());
        }
    };

    let direction = match rotation {
        Rotation::Fixed(direction) => direction,
        Rotation::Auto => auto_circle_direction(source, destination),
        Rotation::ByMidpoint => {
            let mid = via.unwrap_or(destination);
            if source.forward_distance(mid) == 2 {
                RotationDirection::Clockwise
            } else {
                RotationDirection::CounterClockwise
            }
        }
    };

    if slide_type == SlideType::WiFi && !matches!(source.abs_difference(destination), 3 | 5) {
        let valid = wifi_destinations(source).join(" or ");
        return Err(ParseError::new(ParseErrorKind::InvalidWifiEndpoints {
            from: source.get(),
            to: destination.get(),
        })
        .with_suggestion(format!("a WiFi slide from lane {source} may end at lane {valid}")));
    }

    Ok(SlideShape {
        slide_type,
        direction,
        destination,
        via,
    })
}
