//! Orthonormal curve frames advanced by parallel transport.

use glam::{Quat, Vec3};

use super::section::CurveSection;

/// Mutable traversal state: an orthonormal (tangent, normal, binormal) frame
/// carried along consecutive curve sections.
///
/// One instance is reused across a whole rebuild pass and [`reset`] at the
/// start of every disjoint sub-curve so orientation never leaks across a
/// cut.
///
/// [`reset`]: CurveFrame::reset
#[derive(Clone, Copy, Debug)]
pub struct CurveFrame {
    /// Frame origin.
    pub position: Vec3,
    /// Forward direction.
    pub tangent: Vec3,
    /// Up direction.
    pub normal: Vec3,
    /// `tangent × normal`.
    pub binormal: Vec3,
    /// Twist consumed by the next transport step, in degrees. Pre-loaded via
    /// `set_twist` so the twist origin can sit mid-curve.
    pending_twist: f32,
    /// Total twist applied since the last reset, in degrees.
    accumulated_twist: f32,
}

impl Default for CurveFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveFrame {
    /// A frame at the canonical orientation (tangent = +Z, normal = +Y).
    #[must_use]
    pub fn new() -> Self {
        let tangent = Vec3::Z;
        let normal = Vec3::Y;
        Self {
            position: Vec3::ZERO,
            tangent,
            normal,
            binormal: tangent.cross(normal),
            pending_twist: 0.0,
            accumulated_twist: 0.0,
        }
    }

    /// Re-initialize to the canonical orientation, zeroing all twist state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Pre-load a twist offset (degrees) applied together with the next
    /// transport step. Anchors the twist origin at an arbitrary point along
    /// the rope instead of its start.
    pub fn set_twist(&mut self, degrees: f32) {
        self.pending_twist = degrees;
    }

    /// Total twist applied since the last reset, in degrees.
    #[must_use]
    pub fn accumulated_twist(&self) -> f32 {
        self.accumulated_twist
    }

    /// Advance the frame to `section` by parallel transport: rotate the
    /// frame by the shortest arc carrying the old tangent onto the section
    /// tangent, then twist about the new tangent by `twist_degrees` plus any
    /// pending offset.
    ///
    /// A zero-length section tangent keeps the previous orientation and only
    /// moves the frame origin.
    pub fn transport(&mut self, section: &CurveSection, twist_degrees: f32) {
        let new_tangent = section.tangent.normalize_or_zero();

        if new_tangent != Vec3::ZERO {
            let step = twist_degrees + self.pending_twist;
            self.pending_twist = 0.0;
            self.accumulated_twist += step;

            // from_rotation_arc falls back to a perpendicular axis when the
            // tangents are anti-parallel.
            let arc = Quat::from_rotation_arc(self.tangent, new_tangent);
            let twist = Quat::from_axis_angle(new_tangent, step.to_radians());
            let rotation = twist * arc;

            self.normal = (rotation * self.normal).normalize_or_zero();
            self.binormal = new_tangent.cross(self.normal);
            self.tangent = new_tangent;
        }

        self.position = section.position();
    }

    /// Adopt the section's own orientation directly, skipping parallel
    /// transport. Used for rods, whose oriented particles already carry a
    /// twist-aware frame.
    pub fn set_from_section(&mut self, section: &CurveSection) {
        let tangent = section.tangent.normalize_or_zero();
        if tangent != Vec3::ZERO {
            let normal =
                (section.normal - tangent * tangent.dot(section.normal))
                    .normalize_or_zero();
            if normal != Vec3::ZERO {
                self.tangent = tangent;
                self.normal = normal;
                self.binormal = tangent.cross(normal);
            }
        }
        self.position = section.position();
    }
}
