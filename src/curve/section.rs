//! Sampled curve sections: the unit of data flowing from particles to mesh.

use std::ops::{Add, Mul};

use glam::{Vec3, Vec4};

/// One sample along a rope curve: position + radius packed in a `Vec4`,
/// tangent, normal, and vertex color.
///
/// Sections form a linear space (`Add` + scalar `Mul`) so the corner-cutting
/// smoother can blend whole samples — radius, color and frame vectors
/// interpolate with the same weights as position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSection {
    /// Sample position (xyz) and section radius (w).
    pub position_and_radius: Vec4,
    /// Curve tangent at the sample.
    pub tangent: Vec3,
    /// Up vector at the sample.
    pub normal: Vec3,
    /// Vertex color (RGBA).
    pub color: Vec4,
}

impl CurveSection {
    /// Build a section from its components.
    #[must_use]
    pub fn new(
        position_and_radius: Vec4,
        tangent: Vec3,
        normal: Vec3,
        color: Vec4,
    ) -> Self {
        Self {
            position_and_radius,
            tangent,
            normal,
            color,
        }
    }

    /// Sample position without the radius component.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position_and_radius.truncate()
    }

    /// Section radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.position_and_radius.w
    }
}

impl Add for CurveSection {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            position_and_radius: self.position_and_radius
                + rhs.position_and_radius,
            tangent: self.tangent + rhs.tangent,
            normal: self.normal + rhs.normal,
            color: self.color + rhs.color,
        }
    }
}

impl Mul<f32> for CurveSection {
    type Output = Self;

    fn mul(self, f: f32) -> Self {
        Self {
            position_and_radius: self.position_and_radius * f,
            tangent: self.tangent * f,
            normal: self.normal * f,
            color: self.color * f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(pos: Vec3, radius: f32) -> CurveSection {
        CurveSection::new(
            pos.extend(radius),
            Vec3::Z,
            Vec3::Y,
            Vec4::ONE,
        )
    }

    #[test]
    fn weighted_blend_interpolates_all_attributes() {
        let a = section(Vec3::ZERO, 1.0);
        let b = section(Vec3::new(4.0, 0.0, 0.0), 3.0);

        let blended = a * 0.75 + b * 0.25;
        assert_eq!(blended.position(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(blended.radius(), 1.5);
        assert_eq!(blended.tangent, Vec3::Z);
        assert_eq!(blended.color, Vec4::ONE);
    }
}
