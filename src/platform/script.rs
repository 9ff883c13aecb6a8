//! Line-oriented frame scripts for headless runs
//!
//! One frame per line: `<buttons> <ax> <ay> <az> [dt]`. Buttons are the
//! letters `c u l d r x` in any order, or `-` for none. Blank lines and
//! `#` comments are skipped.

use std::io::BufRead;

use glam::Vec3;

use super::{Button, Buttons, FrameSample, InputSource};

/// Frame delta when a line omits it (60 Hz)
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// A decoded script line
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptFrame {
    pub held: Vec<Button>,
    pub sample: FrameSample,
}

impl ScriptFrame {
    /// Parse one line; `Ok(None)` for blank/comment lines
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            return Ok(None);
        }

        let mut fields = line.split_whitespace();
        let letters = fields.next().unwrap_or("-");
        let held = if letters == "-" {
            Vec::new()
        } else {
            letters
                .chars()
                .map(|c| Button::from_letter(c).ok_or_else(|| format!("unknown button `{c}`")))
                .collect::<Result<Vec<_>, _>>()?
        };

        let numbers = fields
            .map(|f| f.parse::<f32>().map_err(|_| format!("`{f}` is not a number")))
            .collect::<Result<Vec<_>, _>>()?;
        let (accel, dt) = match numbers.as_slice() {
            [x, y, z] => (Vec3::new(*x, *y, *z), DEFAULT_DT),
            [x, y, z, dt] => (Vec3::new(*x, *y, *z), *dt),
            other => return Err(format!("expected 3 or 4 numbers, found {}", other.len())),
        };

        Ok(Some(Self {
            held,
            sample: FrameSample { accel, dt },
        }))
    }
}

/// Replays a frame script as an [`InputSource`]
pub struct ScriptedInput<R> {
    reader: R,
    line_no: usize,
    skipped: usize,
}

impl<R: BufRead> ScriptedInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            skipped: 0,
        }
    }

    /// Malformed lines skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> InputSource for ScriptedInput<R> {
    fn next_frame(&mut self, buttons: &mut Buttons) -> Option<FrameSample> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    log::warn!("script read failed after line {}: {e}", self.line_no);
                    return None;
                }
            }
            self.line_no += 1;

            match ScriptFrame::parse(&line) {
                Ok(Some(frame)) => {
                    buttons.set_all(&frame.held);
                    return Some(frame.sample);
                }
                Ok(None) => {}
                Err(e) => {
                    self.skipped += 1;
                    log::warn!("skipping script line {}: {e}", self.line_no);
                }
            }
        }
    }
}
