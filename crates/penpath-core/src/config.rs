//! Pen tool configuration.

use crate::path::{PathStyle, SerializableColor};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Minimum pointer travel before a move or drag is reported.
pub const DEFAULT_MIN_DISTANCE: f64 = 10.0;

/// Handles shorter than this are considered absent and get no marker.
pub const HANDLE_MIN_LENGTH: f64 = 10.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for the pen tool and its handle overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenConfig {
    /// Minimum pointer travel between reported move/drag events.
    pub min_distance: f64,
    /// Minimum handle length that gets a tip marker.
    pub handle_min_length: f64,
    /// Radius of the anchor marker.
    pub anchor_radius: f64,
    /// Radius of handle tip markers.
    pub handle_radius: f64,
    /// Stroke width of the guide polyline.
    pub guide_width: f64,
    /// Style of the committed path.
    pub committed_style: PathStyle,
    /// Style of the preview path.
    pub preview_style: PathStyle,
    /// Stroke color of guides and markers.
    pub overlay_color: SerializableColor,
    /// Fill color of markers.
    pub marker_fill: SerializableColor,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            handle_min_length: HANDLE_MIN_LENGTH,
            anchor_radius: 5.0,
            handle_radius: 3.0,
            guide_width: 1.0,
            committed_style: PathStyle::committed(),
            preview_style: PathStyle::preview(),
            overlay_color: SerializableColor::light_blue(),
            marker_fill: SerializableColor::white(),
        }
    }
}

impl PenConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded pen config from {}", path.display());
        Ok(config)
    }
}
