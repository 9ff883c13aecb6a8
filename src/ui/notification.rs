//! Toast notification with a fixed lifetime

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    message: String,
    /// Seconds left on screen
    remaining: f32,
}

impl Notification {
    pub fn new(message: impl Into<String>, seconds: f32) -> Self {
        Self {
            message: message.into(),
            remaining: seconds.max(0.0),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Age by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
    }

    pub fn is_visible(&self) -> bool {
        self.remaining > 0.0
    }
}
