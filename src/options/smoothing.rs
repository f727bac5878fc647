use serde::{Deserialize, Serialize};

/// Curve smoothing and particle density options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SmoothingOptions {
    /// Chaikin corner-cutting iterations applied to raw particle curves.
    /// Each iteration roughly doubles the section count.
    pub iterations: u32,
    /// Particle density along the rest path: 1.0 places one particle per
    /// thickness unit.
    pub resolution: f32,
}

impl Default for SmoothingOptions {
    fn default() -> Self {
        Self {
            iterations: 1,
            resolution: 1.0,
        }
    }
}

impl SmoothingOptions {
    /// Clamp fields to their valid ranges.
    pub fn validate(&mut self) {
        self.iterations = self.iterations.min(8);
        self.resolution = self.resolution.max(0.0001);
    }
}
