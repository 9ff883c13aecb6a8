//! Platform abstraction layer
//!
//! Handles the host side of a frame:
//! - Button levels and one-shot press edges
//! - Accelerometer samples and frame timing
//! - Scripted input for headless runs

pub mod script;

pub use script::ScriptedInput;

use glam::Vec3;

/// Physical buttons on the badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Moves the pen right
    Confirm,
    Up,
    Left,
    Down,
    /// Lifts or drops the pen
    Right,
    /// Dismisses the notification, then minimises
    Cancel,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::Confirm,
        Button::Up,
        Button::Left,
        Button::Down,
        Button::Right,
        Button::Cancel,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Script letter for this button
    pub fn letter(self) -> char {
        match self {
            Button::Confirm => 'c',
            Button::Up => 'u',
            Button::Left => 'l',
            Button::Down => 'd',
            Button::Right => 'r',
            Button::Cancel => 'x',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        Button::ALL
            .into_iter()
            .find(|b| b.letter() == c.to_ascii_lowercase())
    }
}

/// Polled button state.
///
/// Levels are updated by the host every frame. A press edge is recorded on
/// every up-to-down transition and stays latched until the core takes it,
/// so a one-shot action fires once per physical press.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buttons {
    held: [bool; 6],
    pressed: [bool; 6],
}

impl Buttons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current level of a button
    pub fn set(&mut self, button: Button, down: bool) {
        let i = button.index();
        if down && !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = down;
    }

    /// Set every level at once from the set of buttons currently down
    pub fn set_all(&mut self, down: &[Button]) {
        for button in Button::ALL {
            self.set(button, down.contains(&button));
        }
    }

    #[inline]
    pub fn is_held(&self, button: Button) -> bool {
        self.held[button.index()]
    }

    /// Consume the press edge, true at most once per press
    pub fn take_press(&mut self, button: Button) -> bool {
        std::mem::take(&mut self.pressed[button.index()])
    }

    /// Drop pending edges (e.g. presses made while backgrounded)
    pub fn clear_presses(&mut self) {
        self.pressed = [false; 6];
    }
}

/// One frame's worth of sensor data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Acceleration in g
    pub accel: Vec3,
    /// Seconds since the previous frame
    pub dt: f32,
}

/// Anything that can drive the frame loop
pub trait InputSource {
    /// Update `buttons` for the next frame and return its sensor sample,
    /// or `None` when input is exhausted.
    fn next_frame(&mut self, buttons: &mut Buttons) -> Option<FrameSample>;
}
