//! Orientation classification and roll compensation
//!
//! Acceleration is in g with the device's native axes: z is negative when
//! the screen faces the floor, y picks the side it leans toward.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which way the device is being held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Screen up: drawing mode
    #[default]
    RightWayUp,
    /// Upside down, leaning left
    TiltedLeft,
    /// Upside down, leaning right
    TiltedRight,
}

impl Orientation {
    /// Memoryless reading of a single sample
    pub fn classify(accel: Vec3) -> Self {
        if accel.z < 0.0 {
            if accel.y < 0.0 {
                Orientation::TiltedLeft
            } else {
                Orientation::TiltedRight
            }
        } else {
            Orientation::RightWayUp
        }
    }

    /// Transition for one frame.
    ///
    /// Entering upside-down uses [`classify`](Self::classify). Once upside
    /// down, the lean only flips when y strictly crosses zero, so a reading
    /// of exactly zero keeps the previous side.
    pub fn next(self, accel: Vec3) -> Self {
        if accel.z >= 0.0 {
            return Orientation::RightWayUp;
        }
        match self {
            Orientation::RightWayUp => Self::classify(accel),
            Orientation::TiltedLeft if accel.y > 0.0 => Orientation::TiltedRight,
            Orientation::TiltedRight if accel.y < 0.0 => Orientation::TiltedLeft,
            held => held,
        }
    }

    #[inline]
    pub fn is_upside_down(self) -> bool {
        self != Orientation::RightWayUp
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::RightWayUp => "RightWayUp",
            Orientation::TiltedLeft => "TiltedLeft",
            Orientation::TiltedRight => "TiltedRight",
        }
    }
}

/// Roll angle of the in-plane gravity vector.
///
/// Matches `atan2(y, x)` except on the axes: x == 0 gives +π/2 only for
/// y > 0 (so the origin maps to -π/2), and x < 0 with y == 0 gives +π
/// regardless of the sign of zero.
pub fn roll_angle(x: f32, y: f32) -> f32 {
    if x == 0.0 {
        if y > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 }
    } else if x < 0.0 && y == 0.0 {
        PI
    } else {
        y.atan2(x)
    }
}

/// Smoothed roll angle used to keep the picture level on screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TiltCompensator {
    angle: f32,
    damping: f32,
    flat_threshold: f32,
}

impl TiltCompensator {
    pub fn new(damping: f32, flat_threshold: f32) -> Self {
        Self {
            angle: 0.0,
            damping: damping.max(1.0),
            flat_threshold,
        }
    }

    /// Feed one sample. Frozen while the device lies flat.
    pub fn update(&mut self, accel: Vec3) {
        if accel.z >= self.flat_threshold {
            return;
        }
        let now = roll_angle(accel.x, accel.y);
        self.angle = (now + (self.damping - 1.0) * self.angle) / self.damping;
    }

    /// Smoothed roll angle (radians)
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Rotation to apply to the canvas before drawing
    pub fn rotation(&self) -> f32 {
        -self.angle
    }
}
