//! Etch Sketch - A tilt-and-button sketching surface
//!
//! Core modules:
//! - `sim`: Deterministic per-frame core (strokes, shake-to-clear, tilt)
//! - `renderer`: Draw command generation for an external canvas
//! - `platform`: Button/accelerometer abstraction and scripted input
//! - `persistence`: Picture file load/save
//! - `settings`: Tuning values injected at construction
//! - `ui`: Toast notifications

pub mod error;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::{ParseError, StorageError};
pub use settings::Settings;

/// Reference tuning constants
pub mod consts {
    use glam::Vec3;

    /// Canvas fill colour
    pub const BACKGROUND_COLOUR: Vec3 = Vec3::new(0.5, 0.5, 0.5);
    /// Colour of freshly drawn segments
    pub const LINE_COLOUR: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    /// Cursor colour while the pen is down
    pub const POINTER_COLOUR: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    /// Cursor colour while the pen is lifted
    pub const LIFTED_POINTER_COLOUR: Vec3 = Vec3::new(0.0, 1.0, 0.3);

    /// Drawable disk radius (pixels, centred on the origin)
    pub const SCREEN_RADIUS: f32 = 120.0;

    /// Pen speed bounds (pixels per frame)
    pub const MIN_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 5.0;
    /// Speed gained per frame of continuous movement
    pub const ACCELERATION: f32 = 0.5;

    /// Left-to-right swings needed to wipe the picture
    pub const SHAKES_TO_CLEAR: u32 = 10;

    /// Exponential smoothing divisor for the roll angle
    pub const TILT_DAMPING: f32 = 5.0;
    /// Above this z reading (g) the device counts as lying flat
    pub const FLAT_THRESHOLD: f32 = 0.9;

    /// Startup hint
    pub const HINT_MESSAGE: &str = "Shake upside down to clear";
    /// Seconds a notification stays up (aged at half the frame delta)
    pub const NOTIFICATION_SECONDS: f32 = 4.0;
}
