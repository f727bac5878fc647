//! Cross-section sweep: smoothed curves in, tube mesh out.

use glam::Vec3;

use super::cross_section::CrossSection;
use super::{MeshBuffers, RopeVertex};
use crate::curve::CurveFrame;
use crate::options::ExtrusionOptions;
use crate::rope::{SmoothedCurves, StructuralChain};

// ==================== FRAME EVENTS ====================

/// Where along the rope a frame snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEventKind {
    /// First frame of an open rope.
    Start,
    /// Last frame of an open rope.
    End,
    /// Trailing end of a curve that stops at a cut.
    CutEnd,
    /// Leading end of a curve that starts after a cut.
    CutStart,
}

/// A frame sampled at a rope end or cut, for placing caps and tear props.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot {
    /// Frame origin.
    pub position: Vec3,
    /// Forward direction at the frame.
    pub tangent: Vec3,
    /// Up direction at the frame.
    pub normal: Vec3,
}

impl FrameSnapshot {
    fn capture(frame: &CurveFrame) -> Self {
        Self {
            position: frame.position,
            tangent: frame.tangent,
            normal: frame.normal,
        }
    }
}

/// A frame snapshot tagged with its location kind. The list of events from
/// one rebuild is the input to the external "place object at curve frame"
/// collaborator.
#[derive(Debug, Clone, Copy)]
pub struct FrameEvent {
    /// Location along the rope.
    pub kind: FrameEventKind,
    /// Frame at that location.
    pub frame: FrameSnapshot,
}

// ==================== EXTRUDED RENDERER ====================

/// Sweeps a 2D cross-section along smoothed rope curves, producing a
/// triangulated tube mesh.
///
/// Stateless between rebuilds apart from the reusable curve frame and the
/// configured cross-section: every update clears and rewrites the target
/// buffers in full.
#[derive(Debug, Default)]
pub struct ExtrudedRenderer {
    frame: CurveFrame,
    events: Vec<FrameEvent>,
    cross_section: Option<CrossSection>,
}

impl ExtrudedRenderer {
    /// A renderer with no cross-section assigned yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign (or clear) the cross-section asset to sweep.
    pub fn set_cross_section(&mut self, section: Option<CrossSection>) {
        self.cross_section = section;
    }

    /// The configured cross-section, if any.
    #[must_use]
    pub fn cross_section(&self) -> Option<&CrossSection> {
        self.cross_section.as_ref()
    }

    /// Frame snapshots captured during the last rebuild.
    #[must_use]
    pub fn events(&self) -> &[FrameEvent] {
        &self.events
    }

    /// Rebuild `mesh` from smoothed curves.
    ///
    /// With no cross-section assigned or no usable curve data the update is
    /// a logged no-op and `mesh` is left untouched. `rest_length` is the
    /// rope's rest length, used to anchor the V texture coordinate and to
    /// visualize stretch when `normalize_v` is off.
    pub fn update<C: StructuralChain>(
        &mut self,
        chain: &C,
        smoothed: &SmoothedCurves,
        rest_length: f32,
        closed: bool,
        options: &ExtrusionOptions,
        mesh: &mut MeshBuffers,
    ) {
        let Some(section) = &self.cross_section else {
            log::debug!("extrusion skipped: no cross-section assigned");
            return;
        };
        if smoothed.is_empty() || smoothed.smooth_length <= f32::EPSILON {
            log::debug!("extrusion skipped: no smoothed curve data");
            return;
        }

        mesh.clear();
        self.events.clear();

        let actual_to_rest = if rest_length > f32::EPSILON {
            smoothed.smooth_length / rest_length
        } else {
            1.0
        };
        let v_divisor = if options.normalize_v {
            smoothed.smooth_length
        } else {
            actual_to_rest
        };

        let segments = section.segments();
        // The last vertex in each ring duplicates the first for the UV seam.
        let verts_per_ring = (segments + 1) as u32;

        let mut v_coord =
            -options.uv_scale.y * rest_length * options.uv_anchor;
        let mut ring_index: u32 = 0;
        let curve_count = smoothed.curves.len();

        for (c, curve) in smoothed.curves.iter().enumerate() {
            // Reinitialize the frame for each disjoint curve, re-anchoring
            // the twist origin at the uv anchor.
            self.frame.reset();
            self.frame.set_twist(
                -options.section_twist
                    * smoothed.total_sections as f32
                    * options.uv_anchor,
            );

            for (i, sample) in curve.iter().enumerate() {
                chain.transport_frame(
                    &mut self.frame,
                    sample,
                    options.section_twist,
                );

                capture_events(
                    &mut self.events,
                    &self.frame,
                    c,
                    i,
                    curve.len(),
                    curve_count,
                    closed,
                );

                let prev = i.saturating_sub(1);
                v_coord += options.uv_scale.y
                    * (sample.position().distance(curve[prev].position())
                        / v_divisor);

                let thickness = if options.thickness_from_particles {
                    sample.radius()
                } else {
                    options.thickness
                } * options.thickness_scale;

                self.emit_ring(
                    section,
                    thickness,
                    sample.color.into(),
                    v_coord,
                    options.uv_scale.x,
                    mesh,
                );

                if i < curve.len() - 1 {
                    emit_ring_indices(
                        ring_index,
                        verts_per_ring,
                        segments,
                        &mut mesh.indices,
                    );
                }
                ring_index += 1;
            }
        }
    }

    /// Emit one ring of `segments + 1` vertices at the current frame.
    fn emit_ring(
        &self,
        section: &CrossSection,
        thickness: f32,
        color: [f32; 4],
        v_coord: f32,
        u_scale: f32,
        mesh: &mut MeshBuffers,
    ) {
        let segments = section.segments();
        for j in 0..=segments {
            let p = section.vertex(j);
            let offset =
                (self.frame.normal * p.x + self.frame.binormal * p.y)
                    * thickness;
            let position = self.frame.position + offset;
            let normal = offset.normalize_or_zero();
            let tangent = normal.cross(self.frame.tangent);

            mesh.vertices.push(RopeVertex {
                position: position.into(),
                normal: normal.into(),
                tangent: tangent.extend(-1.0).into(),
                uv: [j as f32 / segments as f32 * u_scale, v_coord],
                color,
            });
        }
    }
}

/// Record start/end/cut frame snapshots for the current section.
fn capture_events(
    events: &mut Vec<FrameEvent>,
    frame: &CurveFrame,
    curve: usize,
    section: usize,
    curve_len: usize,
    curve_count: usize,
    closed: bool,
) {
    let last = curve_len - 1;
    if curve > 0 && section == 0 {
        events.push(FrameEvent {
            kind: FrameEventKind::CutStart,
            frame: FrameSnapshot::capture(frame),
        });
    }
    if curve < curve_count - 1 && section == last {
        events.push(FrameEvent {
            kind: FrameEventKind::CutEnd,
            frame: FrameSnapshot::capture(frame),
        });
    }
    if !closed {
        if curve == 0 && section == 0 {
            events.push(FrameEvent {
                kind: FrameEventKind::Start,
                frame: FrameSnapshot::capture(frame),
            });
        }
        if curve == curve_count - 1 && section == last {
            events.push(FrameEvent {
                kind: FrameEventKind::End,
                frame: FrameSnapshot::capture(frame),
            });
        }
    }
}

/// Two triangles per cross-section edge between ring `r` and ring `r + 1`.
fn emit_ring_indices(
    r: u32,
    verts_per_ring: u32,
    segments: usize,
    indices: &mut Vec<u32>,
) {
    let ring_a = r * verts_per_ring;
    let ring_b = (r + 1) * verts_per_ring;
    for j in 0..segments as u32 {
        indices.extend_from_slice(&[ring_a + j, ring_b + j, ring_a + j + 1]);
        indices.extend_from_slice(&[
            ring_a + j + 1,
            ring_b + j,
            ring_b + j + 1,
        ]);
    }
}
