//! Mesh generation from smoothed rope curves.
//!
//! Two renderers share one vertex format: the extruded renderer sweeps a 2D
//! cross-section along the curve for full tubes, the line renderer emits
//! camera-facing ribbons for cheap distant ropes. Both are pure functions of
//! curve state, rebuilt in full on every source change.

/// 2D cross-section polygons swept along the curve.
pub mod cross_section;
/// Cross-section sweep mesh generation.
pub mod extrude;
/// Camera-facing ribbon mesh generation.
pub mod line;

pub use cross_section::CrossSection;
pub use extrude::{ExtrudedRenderer, FrameEvent, FrameEventKind, FrameSnapshot};
pub use line::LineRenderer;

// ==================== VERTEX FORMAT ====================

/// 64-byte rope vertex shared by the extruded and line renderers.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RopeVertex {
    /// Vertex position in rope-local space.
    pub position: [f32; 3],
    /// Outward surface normal.
    pub normal: [f32; 3],
    /// Texture tangent; w carries handedness (−1).
    pub tangent: [f32; 4],
    /// Texture coordinates: u around the section, v along the rope.
    pub uv: [f32; 2],
    /// Vertex color (RGBA).
    pub color: [f32; 4],
}

/// Parallel vertex/index arrays, cleared and rewritten on every rebuild.
///
/// Buffers are exclusively owned by the renderer for the duration of one
/// rebuild pass; nothing persists between rebuilds.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    /// Vertex array.
    pub vertices: Vec<RopeVertex>,
    /// Triangle index triples into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// An empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all vertices and indices, keeping allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
