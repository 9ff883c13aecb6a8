//! Picture file save/load
//!
//! Features:
//! - Plain text, `:`-joined segment records
//! - Parent directories created on first save
//! - Best-effort load: missing, empty or corrupt files fall back to a
//!   fresh picture, with the failure handed back for display

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glam::Vec2;

use crate::error::StorageError;
use crate::settings::Settings;
use crate::sim::Picture;

/// A picture file at a host-provided location
#[derive(Debug, Clone)]
pub struct PictureStore {
    path: PathBuf,
}

impl PictureStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored picture. `Ok(None)` when there is nothing stored.
    ///
    /// Loaded segments are used as-is: the last one becomes the active
    /// segment, with no extra bootstrap segment in front.
    pub fn load(&self) -> Result<Option<Picture>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No picture at {}, starting fresh", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        let segments = Picture::decode(&text).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })?;
        let count = segments.len();
        let picture = Picture::from_segments(segments);
        if picture.is_some() {
            log::info!("Loaded {count} segments from {}", self.path.display());
        }
        Ok(picture)
    }

    /// Load, falling back to a fresh picture on any failure
    pub fn load_or_default(&self, settings: &Settings) -> (Picture, Option<StorageError>) {
        match self.load() {
            Ok(Some(picture)) => (picture, None),
            Ok(None) => (Picture::new(Vec2::ZERO, settings.line_colour), None),
            Err(e) => {
                log::warn!("Ignoring stored picture: {e}");
                (Picture::new(Vec2::ZERO, settings.line_colour), Some(e))
            }
        }
    }

    /// Write the picture, creating parent directories as needed
    pub fn save(&self, picture: &Picture) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        }
        fs::write(&self.path, picture.encode()).map_err(|e| StorageError::io(&self.path, e))?;
        log::info!(
            "Picture saved ({} segments) to {}",
            picture.len(),
            self.path.display()
        );
        Ok(())
    }
}
