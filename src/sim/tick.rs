//! Per-frame update
//!
//! Runs once per render tick, in order: notification ageing, cancel
//! handling, orientation transition, then either the stroke step (right way
//! up) or the shake step (upside down), and finally tilt compensation.

use glam::Vec3;

use super::shake::ShakeOutcome;
use super::state::{SketchEvent, SketchState};
use super::stroke::{StrokeInput, StrokeOutcome};
use super::tilt::Orientation;
use crate::platform::{Button, Buttons};

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Levels and pending press edges; edges are consumed by `tick`
    pub buttons: Buttons,
    /// Acceleration in g
    pub accel: Vec3,
}

impl TickInput {
    /// Map buttons onto drawing controls, consuming the pen toggle edge
    fn take_stroke_input(&mut self) -> StrokeInput {
        StrokeInput {
            right: self.buttons.is_held(Button::Confirm),
            up: self.buttons.is_held(Button::Up),
            left: self.buttons.is_held(Button::Left),
            down: self.buttons.is_held(Button::Down),
            toggle_pen: self.buttons.take_press(Button::Right),
        }
    }

    /// Drop the pen toggle edge on frames without a stroke step
    fn discard_stroke_edges(&mut self) {
        self.buttons.take_press(Button::Right);
    }
}

/// Advance the sketch by one frame
pub fn tick(state: &mut SketchState, input: &mut TickInput, dt: f32) {
    state.frames += 1;

    // Notifications age at half speed
    if let Some(note) = &mut state.notification {
        note.update(dt / 2.0);
        if !note.is_visible() {
            state.notification = None;
        }
    }

    if input.buttons.take_press(Button::Cancel) {
        if state.notification.take().is_some() {
            log::debug!("notification dismissed");
        } else {
            log::info!("minimise requested");
            // Presses made while backgrounded must not replay on return
            input.buttons.clear_presses();
            state.events.push(SketchEvent::MinimiseRequested);
        }
    }

    let from = state.orientation;
    let to = from.next(input.accel);
    if from != to {
        log::debug!("orientation {} -> {}", from.as_str(), to.as_str());
        state.events.push(SketchEvent::ModeChanged { from, to });
    }
    state.orientation = to;

    match (from, to) {
        (Orientation::RightWayUp, Orientation::RightWayUp) => step_stroke(state, input),
        (Orientation::RightWayUp, _) => {
            input.discard_stroke_edges();
            state.shake.reset();
        }
        _ => {
            input.discard_stroke_edges();
            step_shake(state, from, to);
        }
    }

    state.tilt.update(input.accel);
}

fn step_stroke(state: &mut SketchState, input: &mut TickInput) {
    let stroke_input = input.take_stroke_input();
    let was_etching = state.stroke.is_etching();

    let outcome = state
        .stroke
        .step(&mut state.picture, stroke_input, &state.settings);

    if state.stroke.is_etching() != was_etching {
        state.events.push(SketchEvent::PenToggled {
            etching: state.stroke.is_etching(),
        });
    }
    if let StrokeOutcome::Moved { committed: true } = outcome {
        state.events.push(SketchEvent::SegmentCommitted);
    }
}

fn step_shake(state: &mut SketchState, from: Orientation, to: Orientation) {
    let outcome = state
        .shake
        .observe(from, to, &mut state.picture, &state.settings);

    match outcome {
        Some(ShakeOutcome::Faded { shakes, .. }) => {
            state.events.push(SketchEvent::ShakeRegistered { shakes });
        }
        Some(ShakeOutcome::Cleared { shakes }) => {
            state.events.push(SketchEvent::ShakeRegistered { shakes });
            state.events.push(SketchEvent::Cleared);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;
    const UPRIGHT: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    const LEFT_DOWN: Vec3 = Vec3::new(0.0, -0.5, -0.8);
    const RIGHT_DOWN: Vec3 = Vec3::new(0.0, 0.5, -0.8);

    fn frame(held: &[Button], accel: Vec3) -> TickInput {
        let mut input = TickInput {
            accel,
            ..Default::default()
        };
        input.buttons.set_all(held);
        input
    }

    #[test]
    fn test_draws_when_upright() {
        let mut state = SketchState::new(Settings::default());
        let mut input = frame(&[Button::Confirm], UPRIGHT);
        for _ in 0..3 {
            tick(&mut state, &mut input, DT);
        }
        assert_eq!(state.pen(), Vec2::new(4.5, 0.0));
        assert_eq!(state.frames, 3);
    }

    #[test]
    fn test_flip_frame_does_not_draw() {
        let mut state = SketchState::new(Settings::default());
        let mut input = frame(&[Button::Confirm], LEFT_DOWN);
        tick(&mut state, &mut input, DT);
        assert_eq!(state.orientation, Orientation::TiltedLeft);
        assert_eq!(state.pen(), Vec2::ZERO);
        assert_eq!(
            state.drain_events(),
            vec![SketchEvent::ModeChanged {
                from: Orientation::RightWayUp,
                to: Orientation::TiltedLeft
            }]
        );

        // Buttons are ignored while upside down
        tick(&mut state, &mut input, DT);
        assert_eq!(state.pen(), Vec2::ZERO);

        // Coming back up is its own frame, drawing resumes after it
        input.accel = UPRIGHT;
        tick(&mut state, &mut input, DT);
        assert_eq!(state.orientation, Orientation::RightWayUp);
        assert_eq!(state.pen(), Vec2::ZERO);
        tick(&mut state, &mut input, DT);
        assert_eq!(state.pen(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_pen_toggle_fires_once_per_press() {
        let mut state = SketchState::new(Settings::default());
        let mut input = frame(&[Button::Right], UPRIGHT);
        tick(&mut state, &mut input, DT);
        assert!(!state.is_etching());
        assert!(state
            .drain_events()
            .contains(&SketchEvent::PenToggled { etching: false }));

        // Held for more frames: no further toggles
        input.buttons.set_all(&[Button::Right]);
        tick(&mut state, &mut input, DT);
        tick(&mut state, &mut input, DT);
        assert!(!state.is_etching());

        input.buttons.set_all(&[]);
        tick(&mut state, &mut input, DT);
        input.buttons.set_all(&[Button::Right]);
        tick(&mut state, &mut input, DT);
        assert!(state.is_etching());
    }

    #[test]
    fn test_toggle_pressed_upside_down_is_dropped() {
        let mut state = SketchState::new(Settings::default());
        let mut input = frame(&[], LEFT_DOWN);
        tick(&mut state, &mut input, DT);

        // Press and release the pen toggle while in shake mode
        input.buttons.set_all(&[Button::Right]);
        tick(&mut state, &mut input, DT);
        input.buttons.set_all(&[]);
        tick(&mut state, &mut input, DT);

        input.accel = UPRIGHT;
        tick(&mut state, &mut input, DT);
        tick(&mut state, &mut input, DT);
        assert!(state.is_etching());
        assert!(!state
            .drain_events()
            .iter()
            .any(|e| matches!(e, SketchEvent::PenToggled { .. })));
    }

    #[test]
    fn test_toggle_on_flip_frame_is_dropped() {
        let mut state = SketchState::new(Settings::default());
        let mut input = frame(&[Button::Right], LEFT_DOWN);
        tick(&mut state, &mut input, DT);
        assert_eq!(state.orientation, Orientation::TiltedLeft);

        input.buttons.set_all(&[]);
        input.accel = UPRIGHT;
        tick(&mut state, &mut input, DT);
        tick(&mut state, &mut input, DT);
        assert!(state.is_etching());
    }

    #[test]
    fn test_cancel_dismisses_notification_then_minimises() {
        let mut state = SketchState::new(Settings::default());
        let mut input = frame(&[Button::Cancel], UPRIGHT);
        tick(&mut state, &mut input, DT);
        assert!(state.notification.is_none());
        assert!(!state.drain_events().contains(&SketchEvent::MinimiseRequested));

        input.buttons.set_all(&[]);
        tick(&mut state, &mut input, DT);
        input.buttons.set_all(&[Button::Cancel]);
        tick(&mut state, &mut input, DT);
        assert!(state.drain_events().contains(&SketchEvent::MinimiseRequested));
    }

    #[test]
    fn test_notification_expires_at_half_speed() {
        let settings = Settings {
            notification_seconds: 1.0,
            ..Default::default()
        };
        let mut state = SketchState::new(settings);
        let mut input = frame(&[], UPRIGHT);
        tick(&mut state, &mut input, 1.5);
        assert!(state.notification.is_some());
        tick(&mut state, &mut input, 0.5);
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_shaking_clears_picture() {
        let settings = Settings {
            shakes_to_clear: 3,
            ..Default::default()
        };
        let mut state = SketchState::new(settings);
        let mut input = frame(&[Button::Down], UPRIGHT);
        for _ in 0..4 {
            tick(&mut state, &mut input, DT);
        }
        input.buttons.set_all(&[Button::Confirm]);
        for _ in 0..4 {
            tick(&mut state, &mut input, DT);
        }
        assert_eq!(state.picture.len(), 2);
        let pen = state.pen();
        state.drain_events();

        input.buttons.set_all(&[]);
        for _ in 0..3 {
            input.accel = LEFT_DOWN;
            tick(&mut state, &mut input, DT);
            input.accel = RIGHT_DOWN;
            tick(&mut state, &mut input, DT);
        }

        let events = state.drain_events();
        assert!(events.contains(&SketchEvent::ShakeRegistered { shakes: 3 }));
        assert!(events.contains(&SketchEvent::Cleared));
        assert_eq!(state.picture.len(), 1);
        assert_eq!(state.pen(), pen);
        assert!(state.picture.active().is_degenerate());
    }

    #[test]
    fn test_righting_resets_shake_count() {
        let mut state = SketchState::new(Settings::default());
        let mut input = frame(&[], LEFT_DOWN);
        tick(&mut state, &mut input, DT);
        input.accel = RIGHT_DOWN;
        tick(&mut state, &mut input, DT);
        assert_eq!(state.shake.shake_count(), 1);

        input.accel = UPRIGHT;
        tick(&mut state, &mut input, DT);
        // Count survives until the next flip
        assert_eq!(state.shake.shake_count(), 1);
        input.accel = RIGHT_DOWN;
        tick(&mut state, &mut input, DT);
        assert_eq!(state.shake.shake_count(), 0);
        assert_eq!(state.orientation, Orientation::TiltedRight);
    }

    #[test]
    fn test_tilt_tracks_every_frame() {
        let mut state = SketchState::new(Settings::default());
        let mut input = frame(&[], Vec3::new(0.0, 1.0, 0.0));
        tick(&mut state, &mut input, DT);
        assert!(state.tilt.rotation() < 0.0);

        let mut input = frame(&[], Vec3::new(0.0, -1.0, -0.5));
        let before = state.tilt.angle();
        tick(&mut state, &mut input, DT);
        assert!(state.tilt.angle() < before);
    }
}
