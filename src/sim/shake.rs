//! Shake-to-clear while the device is upside down
//!
//! Each left-to-right swing fades the picture a little further toward the
//! background. The fade is applied to the current colours, so it compounds
//! and speeds up as the shakes accumulate. At the threshold the picture is
//! wiped, keeping only the pen position.

use serde::{Deserialize, Serialize};

use super::picture::Picture;
use super::tilt::Orientation;
use crate::settings::Settings;

/// Result of registering one swing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShakeOutcome {
    /// Picture faded by `amount` (0..1)
    Faded { shakes: u32, amount: f32 },
    /// Threshold reached, picture wiped
    Cleared { shakes: u32 },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShakeDetector {
    shake_count: u32,
}

impl ShakeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shake_count(&self) -> u32 {
        self.shake_count
    }

    /// Forget previous swings; called on entering upside-down
    pub fn reset(&mut self) {
        self.shake_count = 0;
    }

    /// React to an orientation transition while upside down.
    ///
    /// Only TiltedLeft -> TiltedRight counts as a swing.
    pub fn observe(
        &mut self,
        from: Orientation,
        to: Orientation,
        picture: &mut Picture,
        settings: &Settings,
    ) -> Option<ShakeOutcome> {
        match (from, to) {
            (Orientation::TiltedLeft, Orientation::TiltedRight) => {
                Some(self.register_swing(picture, settings))
            }
            _ => None,
        }
    }

    /// Count one full swing and fade or wipe the picture
    pub fn register_swing(&mut self, picture: &mut Picture, settings: &Settings) -> ShakeOutcome {
        self.shake_count += 1;
        let threshold = settings.shakes_to_clear.max(1);

        if self.shake_count >= threshold {
            let pen = picture.pen();
            picture.reset(pen, settings.line_colour);
            log::info!("picture cleared after {} shakes", self.shake_count);
            return ShakeOutcome::Cleared {
                shakes: self.shake_count,
            };
        }

        let amount = self.shake_count as f32 / threshold as f32;
        for segment in picture.segments_mut() {
            segment.fade_toward(settings.background_colour, amount);
        }
        log::debug!("shake {}/{threshold}, fading by {amount:.2}", self.shake_count);

        ShakeOutcome::Faded {
            shakes: self.shake_count,
            amount,
        }
    }
}
