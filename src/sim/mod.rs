//! Deterministic per-frame core
//!
//! All drawing and gesture logic lives here. This module must stay pure:
//! - One `tick` per render frame, no internal clocks
//! - Input arrives through `TickInput`, output through `SketchState`
//! - No rendering, storage or platform dependencies

pub mod picture;
pub mod segment;
pub mod shake;
pub mod state;
pub mod stroke;
pub mod tick;
pub mod tilt;

pub use picture::{Picture, RECORD_SEPARATOR};
pub use segment::{FIELDS_PER_RECORD, LineSegment};
pub use shake::{ShakeDetector, ShakeOutcome};
pub use state::{SketchEvent, SketchState};
pub use stroke::{Heading, StrokeEngine, StrokeInput, StrokeOutcome, inside_canvas};
pub use tick::{TickInput, tick};
pub use tilt::{Orientation, TiltCompensator, roll_angle};
