//! Draw command generation
//!
//! The canvas itself belongs to the host. This module turns a
//! `SketchState` into an ordered list of commands for it.

pub mod commands;

pub use commands::{Canvas, DrawCommand, Frame, build_frame};
