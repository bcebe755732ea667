//! Engine settings loaded from JSON.
//!
//! ```json
//! {
//!   "surface": { "width": 350.0, "height": 159.0 },
//!   "hit_threshold": 5.0,
//!   "min_selection_size": 10.0,
//!   "stroke_color": "rgb(208, 38, 38)"
//! }
//! ```
//!
//! Every field is optional; missing fields take the defaults above.

use crate::constants::{DEFAULT_STROKE_COLOR, HIT_THRESHOLD, MIN_SELECTION_SIZE};
use crate::session::ResizeLimits;
use crate::types::Surface;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Drawing area, fixed for one controller
    pub surface: Surface,
    /// Distance below which the pointer counts as on an edge
    pub hit_threshold: f32,
    /// Resizes never go below this on either axis
    pub min_selection_size: f32,
    /// Stroke for rectangles without their own colour
    pub stroke_color: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            surface: Surface::default(),
            hit_threshold: HIT_THRESHOLD,
            min_selection_size: MIN_SELECTION_SIZE,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
        }
    }
}

impl EngineSettings {
    /// Read and validate settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.surface.width) || !positive(self.surface.height) {
            return Err(SettingsError::Invalid(format!(
                "surface must be positive, got {}x{}",
                self.surface.width, self.surface.height
            )));
        }
        if !positive(self.hit_threshold) {
            return Err(SettingsError::Invalid(format!(
                "hit_threshold must be positive, got {}",
                self.hit_threshold
            )));
        }
        if !positive(self.min_selection_size)
            || self.min_selection_size > self.surface.width
            || self.min_selection_size > self.surface.height
        {
            return Err(SettingsError::Invalid(format!(
                "min_selection_size {} does not fit the surface",
                self.min_selection_size
            )));
        }
        Ok(())
    }

    pub fn resize_limits(&self) -> ResizeLimits {
        ResizeLimits {
            threshold: self.hit_threshold,
            min_size: self.min_selection_size,
        }
    }
}

/// `<config dir>/rectboard/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rectboard").join("settings.json"))
}
