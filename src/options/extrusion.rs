use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Extruded-mesh generation options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtrusionOptions {
    /// Normalized position of the texture coordinate origin along the rope.
    pub uv_anchor: f32,
    /// Scaling of texture coordinates along (y) and around (x) the rope.
    pub uv_scale: Vec2,
    /// When true, the V coordinate is normalized by the smoothed curve
    /// length; when false, by the smoothed-to-rest length ratio, so V
    /// stretches visibly where the rope stretches.
    pub normalize_v: bool,
    /// Twist applied at each curve section, in degrees.
    pub section_twist: f32,
    /// Scale applied on top of the per-section thickness.
    pub thickness_scale: f32,
    /// When true, section thickness comes from particle radii; when false,
    /// [`ExtrusionOptions::thickness`] is used for the whole rope.
    pub thickness_from_particles: bool,
    /// Constant rope thickness, used when `thickness_from_particles` is off.
    pub thickness: f32,
}

impl Default for ExtrusionOptions {
    fn default() -> Self {
        Self {
            uv_anchor: 0.0,
            uv_scale: Vec2::ONE,
            normalize_v: true,
            section_twist: 0.0,
            thickness_scale: 0.8,
            thickness_from_particles: true,
            thickness: 0.1,
        }
    }
}

impl ExtrusionOptions {
    /// Clamp fields to their valid ranges.
    pub fn validate(&mut self) {
        self.uv_anchor = self.uv_anchor.clamp(0.0, 1.0);
        self.thickness = self.thickness.max(0.0001);
        self.thickness_scale = self.thickness_scale.max(0.0);
    }
}
