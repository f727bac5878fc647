//! Camera-facing ribbon: a flat two-vertex strip that always turns its
//! face toward a viewer position, for thin ropes where a full tube is
//! wasted geometry.

use glam::Vec3;

use super::{MeshBuffers, RopeVertex};
use crate::curve::CurveFrame;
use crate::options::ExtrusionOptions;
use crate::rope::{SmoothedCurves, StructuralChain};

/// Sweeps a camera-facing line segment along smoothed rope curves,
/// producing a flat ribbon mesh (two vertices per curve section).
///
/// Unlike [`super::ExtrudedRenderer`] the ribbon carries no twist: the
/// frame is parallel-transported with zero twist and the section plane is
/// derived from the viewer position each rebuild.
#[derive(Debug, Default)]
pub struct LineRenderer {
    frame: CurveFrame,
}

impl LineRenderer {
    /// A ribbon renderer with a canonical starting frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild `mesh` as a ribbon facing `camera_local`, the viewer
    /// position expressed in the rope's local space.
    ///
    /// With no usable curve data the update is a logged no-op and `mesh`
    /// is left untouched. Of `options`, the twist field is ignored; the
    /// uv and thickness fields apply as in the extruded renderer.
    pub fn update<C: StructuralChain>(
        &mut self,
        chain: &C,
        smoothed: &SmoothedCurves,
        rest_length: f32,
        camera_local: Vec3,
        options: &ExtrusionOptions,
        mesh: &mut MeshBuffers,
    ) {
        if smoothed.is_empty() || smoothed.smooth_length <= f32::EPSILON {
            log::debug!("ribbon skipped: no smoothed curve data");
            return;
        }

        mesh.clear();

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

        let mut v_coord =
            -options.uv_scale.y * rest_length * options.uv_anchor;
        let mut section_index: u32 = 0;

        for curve in &smoothed.curves {
            self.frame.reset();

            for (i, sample) in curve.iter().enumerate() {
                chain.transport_frame(&mut self.frame, sample, 0.0);

                let prev = i.saturating_sub(1);
                v_coord += options.uv_scale.y
                    * (sample.position().distance(curve[prev].position())
                        / v_divisor);

                let thickness = if options.thickness_from_particles {
                    sample.radius()
                } else {
                    options.thickness
                } * options.thickness_scale;

                // Section plane faces the viewer; the ribbon edge runs
                // perpendicular to both the view ray and the curve.
                let facing = (self.frame.position - camera_local)
                    .normalize_or_zero();
                let bitangent = facing
                    .cross(self.frame.tangent)
                    .normalize_or_zero();

                let normal = -facing;
                let tangent = (-bitangent).extend(1.0);
                let color = sample.color.into();

                mesh.vertices.push(RopeVertex {
                    position: (self.frame.position
                        + bitangent * thickness)
                        .into(),
                    normal: normal.into(),
                    tangent: tangent.into(),
                    uv: [0.0, v_coord],
                    color,
                });
                mesh.vertices.push(RopeVertex {
                    position: (self.frame.position
                        - bitangent * thickness)
                        .into(),
                    normal: normal.into(),
                    tangent: tangent.into(),
                    uv: [1.0, v_coord],
                    color,
                });

                if i < curve.len() - 1 {
                    let s = section_index * 2;
                    mesh.indices.extend_from_slice(&[s, s + 2, s + 1]);
                    mesh.indices.extend_from_slice(&[s + 1, s + 2, s + 3]);
                }
                section_index += 1;
            }
        }
    }
}
