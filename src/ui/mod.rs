//! On-screen feedback layered over the canvas

pub mod notification;

pub use notification::Notification;
