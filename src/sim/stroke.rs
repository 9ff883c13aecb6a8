//! Drawing-mode state machine
//!
//! Turns held direction buttons into pen movement. A change of heading
//! commits the active segment, so the picture is always a polyline of
//! straight (axis-aligned or diagonal) pieces.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::picture::Picture;
use crate::settings::Settings;

/// Set of movement letters held this frame, compared as a whole.
///
/// Bits are kept in the label order R, U, L, D, then `!` for a pen toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Heading(u8);

impl Heading {
    pub const NONE: Heading = Heading(0);
    pub const RIGHT: Heading = Heading(1 << 0);
    pub const UP: Heading = Heading(1 << 1);
    pub const LEFT: Heading = Heading(1 << 2);
    pub const DOWN: Heading = Heading(1 << 3);
    pub const TOGGLE: Heading = Heading(1 << 4);

    const LABELS: [(Heading, char); 5] = [
        (Heading::RIGHT, 'R'),
        (Heading::UP, 'U'),
        (Heading::LEFT, 'L'),
        (Heading::DOWN, 'D'),
        (Heading::TOGGLE, '!'),
    ];

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn contains(self, other: Heading) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub fn with(self, other: Heading) -> Heading {
        Heading(self.0 | other.0)
    }
}

/// Renders the label string, e.g. `RU` or `L!`
impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (bit, label) in Self::LABELS {
            if self.contains(bit) {
                write!(f, "{label}")?;
            }
        }
        Ok(())
    }
}

/// Buttons relevant to drawing for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrokeInput {
    pub right: bool,
    pub up: bool,
    pub left: bool,
    pub down: bool,
    /// One-shot pen toggle press
    pub toggle_pen: bool,
}

/// What a stroke step did to the picture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeOutcome {
    /// Nothing held, speed reset
    Idle,
    /// Pen moved (possibly after committing a segment)
    Moved { committed: bool },
    /// Candidate position hit the canvas edge and was discarded
    Blocked,
}

/// Pen motion state, only advanced while the device is right way up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrokeEngine {
    heading: Heading,
    speed: f32,
    etching: bool,
}

impl StrokeEngine {
    pub fn new(settings: &Settings) -> Self {
        Self {
            heading: Heading::RIGHT,
            speed: settings.min_speed,
            etching: true,
        }
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Pen down?
    pub fn is_etching(&self) -> bool {
        self.etching
    }

    /// Advance one frame
    pub fn step(
        &mut self,
        picture: &mut Picture,
        input: StrokeInput,
        settings: &Settings,
    ) -> StrokeOutcome {
        let mut heading = Heading::NONE;
        let mut candidate = picture.pen();

        if input.right {
            candidate.x += self.speed;
            heading = heading.with(Heading::RIGHT);
        }
        if input.up {
            candidate.y -= self.speed;
            heading = heading.with(Heading::UP);
        }
        if input.left {
            candidate.x -= self.speed;
            heading = heading.with(Heading::LEFT);
        }
        if input.down {
            candidate.y += self.speed;
            heading = heading.with(Heading::DOWN);
        }

        // The toggle applies even when the move below is rejected
        if input.toggle_pen {
            self.etching = !self.etching;
            heading = heading.with(Heading::TOGGLE);
        }

        if !inside_canvas(candidate, settings.screen_radius) {
            log::trace!("pen blocked at {candidate} heading {heading}");
            return StrokeOutcome::Blocked;
        }

        if heading.is_empty() {
            self.speed = settings.min_speed;
            return StrokeOutcome::Idle;
        }

        let committed = heading != self.heading && !picture.active().is_degenerate();
        if committed {
            log::debug!(
                "heading {} -> {}, committing segment {}",
                self.heading,
                heading,
                picture.active()
            );
            picture.commit_active(settings.line_colour);
        }
        self.heading = heading;
        self.speed = (self.speed + settings.acceleration).min(settings.max_speed);

        let active = picture.active_mut();
        active.end = candidate;
        if !self.etching {
            active.start = active.end;
        }

        StrokeOutcome::Moved { committed }
    }
}

/// Strictly inside the disk; the boundary circle itself is rejected
#[inline]
pub fn inside_canvas(point: Vec2, radius: f32) -> bool {
    point.length_squared() < radius * radius
}
