//! Sketch state and core simulation types
//!
//! Everything the frame loop mutates lives here, owned by one `SketchState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::picture::Picture;
use super::shake::ShakeDetector;
use super::stroke::StrokeEngine;
use super::tilt::{Orientation, TiltCompensator};
use crate::error::StorageError;
use crate::settings::Settings;
use crate::ui::Notification;

/// Things the host may want to react to (drained each frame)
#[derive(Debug, Clone, PartialEq)]
pub enum SketchEvent {
    /// Orientation changed
    ModeChanged { from: Orientation, to: Orientation },
    /// A finished straight segment was frozen
    SegmentCommitted,
    /// Pen lifted (`etching == false`) or dropped
    PenToggled { etching: bool },
    /// One left-to-right swing while upside down
    ShakeRegistered { shakes: u32 },
    /// Picture wiped by shaking
    Cleared,
    /// Cancel pressed with no notification up: save and go to background
    MinimiseRequested,
}

/// Complete sketch state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchState {
    /// Tuning, fixed for the lifetime of the sketch
    pub settings: Settings,
    pub picture: Picture,
    pub orientation: Orientation,
    pub stroke: StrokeEngine,
    pub shake: ShakeDetector,
    pub tilt: TiltCompensator,
    pub notification: Option<Notification>,
    /// Frames processed
    pub frames: u64,
    #[serde(skip)]
    pub events: Vec<SketchEvent>,
}

impl SketchState {
    /// Fresh sketch: one degenerate segment at the centre, hint showing
    pub fn new(settings: Settings) -> Self {
        let picture = Picture::new(Vec2::ZERO, settings.line_colour);
        Self::with_picture(settings, picture)
    }

    /// Resume drawing on an existing picture
    pub fn with_picture(settings: Settings, picture: Picture) -> Self {
        let settings = settings.validated();
        let notification = Some(Notification::new(
            settings.hint_message.clone(),
            settings.notification_seconds,
        ));
        Self {
            stroke: StrokeEngine::new(&settings),
            shake: ShakeDetector::new(),
            tilt: TiltCompensator::new(settings.tilt_damping, settings.flat_threshold),
            orientation: Orientation::RightWayUp,
            picture,
            notification,
            frames: 0,
            events: Vec::new(),
            settings,
        }
    }

    /// Current pen position
    pub fn pen(&self) -> Vec2 {
        self.picture.pen()
    }

    pub fn is_etching(&self) -> bool {
        self.stroke.is_etching()
    }

    /// Show a storage failure instead of crashing the frame loop
    pub fn report_storage_error(&mut self, err: &StorageError) {
        log::warn!("{err}");
        self.notification = Some(Notification::new(
            err.summary(),
            self.settings.notification_seconds,
        ));
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<SketchEvent> {
        std::mem::take(&mut self.events)
    }
}
