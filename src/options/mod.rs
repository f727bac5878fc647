//! Centralized rope rendering options with TOML preset support.
//!
//! All tweakable settings (uv mapping, twist, thickness, smoothing) are
//! consolidated here. Options serialize to/from TOML so rope presets can be
//! stored alongside cross-section assets.

mod extrusion;
mod smoothing;

use std::path::Path;

pub use extrusion::ExtrusionOptions;
use serde::{Deserialize, Serialize};
pub use smoothing::SmoothingOptions;

use crate::error::CordageError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[smoothing]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Extruded-mesh generation options.
    pub extrusion: ExtrusionOptions,
    /// Curve smoothing and particle density options.
    pub smoothing: SmoothingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CordageError> {
        let content = std::fs::read_to_string(path).map_err(CordageError::Io)?;
        toml::from_str(&content)
            .map_err(|e| CordageError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CordageError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CordageError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CordageError::Io)?;
        }
        std::fs::write(path, content).map_err(CordageError::Io)
    }

    /// Clamp all fields to their valid ranges.
    pub fn validate(&mut self) {
        self.extrusion.validate();
        self.smoothing.validate();
    }
}
