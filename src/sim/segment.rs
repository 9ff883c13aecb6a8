//! Straight line segments, the only primitive a picture is made of

use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Fields in one encoded segment record
pub const FIELDS_PER_RECORD: usize = 7;

/// A coloured segment in canvas space (origin at the centre, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
    /// RGB, each channel in [0, 1]
    pub colour: Vec3,
}

impl LineSegment {
    pub fn new(start: Vec2, end: Vec2, colour: Vec3) -> Self {
        Self {
            start,
            end,
            colour: colour.clamp(Vec3::ZERO, Vec3::ONE),
        }
    }

    /// Zero-length marker at `at`
    pub fn degenerate(at: Vec2, colour: Vec3) -> Self {
        Self::new(at, at, colour)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn set_colour(&mut self, colour: Vec3) {
        self.colour = colour.clamp(Vec3::ZERO, Vec3::ONE);
    }

    /// Blend the current colour toward `target` by `t` (0 = unchanged, 1 = target)
    pub fn fade_toward(&mut self, target: Vec3, t: f32) {
        self.set_colour(self.colour.lerp(target, t.clamp(0.0, 1.0)));
    }

    /// Decode one record, `index` is only used for error reporting.
    ///
    /// Strict: fields must be bare numbers and colour channels in [0, 1].
    pub fn decode_record(record: &str, index: usize) -> Result<Self, ParseError> {
        let fields: Vec<&str> = record.split(',').collect();
        if fields.len() != FIELDS_PER_RECORD {
            return Err(ParseError::FieldCount {
                record: index,
                found: fields.len(),
            });
        }

        let mut values = [0.0f32; FIELDS_PER_RECORD];
        for (field, (slot, text)) in values.iter_mut().zip(&fields).enumerate() {
            *slot = text
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ParseError::InvalidNumber {
                    record: index,
                    field,
                    value: text.to_string(),
                })?;
        }

        let [sx, sy, ex, ey, r, g, b] = values;
        for (channel, value) in [r, g, b].into_iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParseError::ColourOutOfRange {
                    record: index,
                    channel,
                    value: fields[4 + channel].to_string(),
                });
            }
        }
        Ok(Self::new(
            Vec2::new(sx, sy),
            Vec2::new(ex, ey),
            Vec3::new(r, g, b),
        ))
    }
}

/// `start.x,start.y,end.x,end.y,r,g,b` using the shortest round-tripping float text
impl fmt::Display for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{}",
            self.start.x,
            self.start.y,
            self.end.x,
            self.end.y,
            self.colour.x,
            self.colour.y,
            self.colour.z
        )
    }
}

impl FromStr for LineSegment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode_record(s, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_plain_decimal_form() {
        let seg = LineSegment::new(
            Vec2::new(0.0, -3.5),
            Vec2::new(12.0, 7.25),
            Vec3::new(0.5, 0.5, 0.5),
        );
        assert_eq!(seg.to_string(), "0,-3.5,12,7.25,0.5,0.5,0.5");
    }

    #[test]
    fn test_parse_record() {
        let seg: LineSegment = "1,2,3,4,0.1,0.2,0.3".parse().unwrap();
        assert_eq!(seg.start, Vec2::new(1.0, 2.0));
        assert_eq!(seg.end, Vec2::new(3.0, 4.0));
        assert_eq!(seg.colour, Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert_eq!(
            "1,2,3".parse::<LineSegment>(),
            Err(ParseError::FieldCount {
                record: 0,
                found: 3
            })
        );
        assert!(matches!(
            LineSegment::decode_record("1,2,3,4,5,6,7,8", 4),
            Err(ParseError::FieldCount { record: 4, found: 8 })
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric_field() {
        assert_eq!(
            LineSegment::decode_record("1,2,x,4,0,0,0", 2),
            Err(ParseError::InvalidNumber {
                record: 2,
                field: 2,
                value: "x".to_string()
            })
        );
        assert!("1,2,3,4,NaN,0,0".parse::<LineSegment>().is_err());
    }

    #[test]
    fn test_parse_rejects_padded_fields_and_out_of_range_colour() {
        assert!(matches!(
            LineSegment::decode_record("1, 2,3,4,0,0,0", 0),
            Err(ParseError::InvalidNumber { field: 1, .. })
        ));
        assert_eq!(
            LineSegment::decode_record("1,2,3,4,0,1.5,0", 3),
            Err(ParseError::ColourOutOfRange {
                record: 3,
                channel: 1,
                value: "1.5".to_string()
            })
        );
        assert!("0,0,0,0,-0.1,0,0".parse::<LineSegment>().is_err());
        assert!("0,0,0,0,0,0,1".parse::<LineSegment>().is_ok());
    }

    #[test]
    fn test_fade_moves_toward_target() {
        let mut seg = LineSegment::degenerate(Vec2::ZERO, Vec3::ZERO);
        seg.fade_toward(Vec3::splat(0.5), 0.5);
        assert_eq!(seg.colour, Vec3::splat(0.25));
        seg.fade_toward(Vec3::splat(0.5), 1.0);
        assert_eq!(seg.colour, Vec3::splat(0.5));
    }

    #[test]
    fn test_colour_is_clamped() {
        let seg = LineSegment::new(Vec2::ZERO, Vec2::ONE, Vec3::new(1.5, -0.2, 0.3));
        assert_eq!(seg.colour, Vec3::new(1.0, 0.0, 0.3));
        assert!(!seg.is_degenerate());
    }
}
