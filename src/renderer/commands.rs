//! Frame description consumed by an external drawing context

use glam::{Vec2, Vec3};

use crate::sim::SketchState;

/// One drawing operation, in canvas space (origin at the centre)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the canvas square enclosing the disk
    Clear { colour: Vec3, radius: f32 },
    /// Set colour, move to `start`, line to `end`, stroke
    Line { start: Vec2, end: Vec2, colour: Vec3 },
    /// 1x1 pen marker
    Cursor { at: Vec2, colour: Vec3 },
    /// Toast text
    Notice { message: String },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Rotation (radians) applied before all commands
    pub rotation: f32,
    pub commands: Vec<DrawCommand>,
}

/// An external drawing context
pub trait Canvas {
    fn draw(&mut self, frame: &Frame);
}

/// Build the frame: background, notification, segments in draw order, cursor
pub fn build_frame(state: &SketchState) -> Frame {
    let settings = &state.settings;
    let mut commands = Vec::with_capacity(state.picture.len() + 3);

    commands.push(DrawCommand::Clear {
        colour: settings.background_colour,
        radius: settings.screen_radius,
    });

    if let Some(note) = &state.notification {
        commands.push(DrawCommand::Notice {
            message: note.message().to_string(),
        });
    }

    commands.extend(state.picture.segments().map(|seg| DrawCommand::Line {
        start: seg.start,
        end: seg.end,
        colour: seg.colour,
    }));

    let cursor_colour = if state.is_etching() {
        settings.pointer_colour
    } else {
        settings.lifted_pointer_colour
    };
    commands.push(DrawCommand::Cursor {
        at: state.pen(),
        colour: cursor_colour,
    });

    Frame {
        rotation: state.tilt.rotation(),
        commands,
    }
}
