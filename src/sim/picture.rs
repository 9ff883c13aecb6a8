//! The drawing: committed segments plus the one being extended
//!
//! Encoded as segment records joined by `:` (see [`LineSegment`]'s
//! `Display` for the record layout).

use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::segment::LineSegment;
use crate::error::ParseError;

/// Separator between encoded segment records
pub const RECORD_SEPARATOR: char = ':';

/// Ordered segments in draw order. Never empty: `active` always exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    committed: Vec<LineSegment>,
    active: LineSegment,
}

impl Picture {
    /// A single degenerate segment at `at`
    pub fn new(at: Vec2, colour: Vec3) -> Self {
        Self {
            committed: Vec::new(),
            active: LineSegment::degenerate(at, colour),
        }
    }

    /// Build from draw-ordered segments; the last one becomes active
    pub fn from_segments(mut segments: Vec<LineSegment>) -> Option<Self> {
        let active = segments.pop()?;
        Some(Self {
            committed: segments,
            active,
        })
    }

    pub fn active(&self) -> &LineSegment {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut LineSegment {
        &mut self.active
    }

    pub fn committed(&self) -> &[LineSegment] {
        &self.committed
    }

    /// Current pen position
    #[inline]
    pub fn pen(&self) -> Vec2 {
        self.active.end
    }

    /// Total segment count, including the active one
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.committed.len() + 1
    }

    /// Segments in draw order, active last
    pub fn segments(&self) -> impl Iterator<Item = &LineSegment> {
        self.committed.iter().chain(std::iter::once(&self.active))
    }

    pub fn segments_mut(&mut self) -> impl Iterator<Item = &mut LineSegment> {
        self.committed
            .iter_mut()
            .chain(std::iter::once(&mut self.active))
    }

    /// Freeze the active segment and start a degenerate one at its end
    pub fn commit_active(&mut self, colour: Vec3) {
        let next = LineSegment::degenerate(self.active.end, colour);
        let done = std::mem::replace(&mut self.active, next);
        self.committed.push(done);
    }

    /// Discard everything, leaving one degenerate segment at `at`
    pub fn reset(&mut self, at: Vec2, colour: Vec3) {
        *self = Self::new(at, colour);
    }

    /// Encode as `:`-joined records
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decode `:`-joined records. Empty (or all-whitespace) text yields no segments.
    pub fn decode(text: &str) -> Result<Vec<LineSegment>, ParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        text.split(RECORD_SEPARATOR)
            .enumerate()
            .map(|(i, record)| LineSegment::decode_record(record, i))
            .collect()
    }
}

impl fmt::Display for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments().enumerate() {
            if i > 0 {
                write!(f, "{RECORD_SEPARATOR}")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

/// Fails on empty text as well as malformed records
impl FromStr for Picture {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_segments(Self::decode(s)?).ok_or(ParseError::FieldCount {
            record: 0,
            found: 0,
        })
    }
}
