//! 2D cross-section polygons swept along rope curves.

use glam::Vec2;

use crate::error::CordageError;

/// An ordered 2D point ring defining a rope's cross-sectional shape.
///
/// The ring is implicitly closed; the extruder duplicates the first vertex
/// at the end of each ring to provide a UV seam. One cross-section asset is
/// reused for every frame along the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    vertices: Vec<Vec2>,
}

impl CrossSection {
    /// Minimum vertices for a ring with area.
    pub const MIN_POINTS: usize = 3;

    /// A cross-section from an ordered point ring. The first point should
    /// not be repeated at the end.
    pub fn from_points(vertices: Vec<Vec2>) -> Result<Self, CordageError> {
        if vertices.len() < Self::MIN_POINTS {
            return Err(CordageError::Configuration(format!(
                "cross-sections need at least {} points, got {}",
                Self::MIN_POINTS,
                vertices.len()
            )));
        }
        Ok(Self { vertices })
    }

    /// A unit circle approximated by `segments` vertices (minimum 3).
    #[must_use]
    pub fn circle(segments: usize) -> Self {
        let segments = segments.max(Self::MIN_POINTS);
        let vertices = (0..segments)
            .map(|i| {
                let angle =
                    i as f32 / segments as f32 * std::f32::consts::TAU;
                Vec2::new(angle.cos(), angle.sin())
            })
            .collect();
        Self { vertices }
    }

    /// Number of edges (== vertices) around the ring.
    #[must_use]
    pub fn segments(&self) -> usize {
        self.vertices.len()
    }

    /// Ring vertex `j`, wrapping past the end so `vertex(segments())`
    /// closes the ring.
    #[must_use]
    pub fn vertex(&self, j: usize) -> Vec2 {
        self.vertices[j % self.vertices.len()]
    }

    /// The raw point ring.
    #[must_use]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }
}
