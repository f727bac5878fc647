//! Authored Bezier paths: ordered control points with tangent handles.
//!
//! Paths describe the rest shape of a rope. They are read-only to the
//! runtime pipeline; the mutators on [`ControlPoint`] are the discrete
//! "set position/tangent" commands an external editing tool issues.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::CordageError;

/// How a control point's tangent handles respond to edits.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum TangentMode {
    /// Handles move independently.
    Free,
    /// Handles are exact mirrors of each other.
    #[default]
    Mirrored,
    /// Handles share a direction but keep their own lengths.
    Aligned,
}

/// One authored point on a [`CurvePath`]: position, up vector, and in/out
/// tangent handles stored as offsets from the position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Point position.
    pub position: Vec3,
    /// Authored up vector, spherically interpolated along the span.
    pub normal: Vec3,
    /// Offset from `position` to the incoming tangent handle.
    pub in_tangent_offset: Vec3,
    /// Offset from `position` to the outgoing tangent handle.
    pub out_tangent_offset: Vec3,
    /// Handle coupling mode.
    pub tangent_mode: TangentMode,
}

impl ControlPoint {
    /// A control point with mirrored handles along `tangent`.
    #[must_use]
    pub fn new(position: Vec3, normal: Vec3, tangent: Vec3) -> Self {
        Self {
            position,
            normal,
            in_tangent_offset: -tangent,
            out_tangent_offset: tangent,
            tangent_mode: TangentMode::Mirrored,
        }
    }

    /// Incoming tangent handle in path space.
    #[must_use]
    pub fn in_tangent(&self) -> Vec3 {
        self.position + self.in_tangent_offset
    }

    /// Outgoing tangent handle in path space.
    #[must_use]
    pub fn out_tangent(&self) -> Vec3 {
        self.position + self.out_tangent_offset
    }

    /// Move the incoming handle, updating the outgoing one per the tangent
    /// mode.
    pub fn set_in_tangent_offset(&mut self, offset: Vec3) {
        self.in_tangent_offset = offset;
        match self.tangent_mode {
            TangentMode::Free => {}
            TangentMode::Mirrored => self.out_tangent_offset = -offset,
            TangentMode::Aligned => {
                self.out_tangent_offset = -offset.normalize_or_zero()
                    * self.out_tangent_offset.length();
            }
        }
    }

    /// Move the outgoing handle, updating the incoming one per the tangent
    /// mode.
    pub fn set_out_tangent_offset(&mut self, offset: Vec3) {
        self.out_tangent_offset = offset;
        match self.tangent_mode {
            TangentMode::Free => {}
            TangentMode::Mirrored => self.in_tangent_offset = -offset,
            TangentMode::Aligned => {
                self.in_tangent_offset = -offset.normalize_or_zero()
                    * self.in_tangent_offset.length();
            }
        }
    }
}

/// Cumulative arc-length sample used for length ↔ parameter lookups.
#[derive(Debug, Clone, Copy)]
struct LengthSample {
    mu: f32,
    length: f32,
}

/// An authored cubic Bezier path. Adjacent control-point pairs define one
/// span; closed paths wrap the last point back to the first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurvePath {
    /// Ordered control points. At least 2 are required for evaluation.
    pub control_points: Vec<ControlPoint>,
    /// Whether the last span wraps back to the first control point.
    pub closed: bool,
    #[serde(skip)]
    length_table: Vec<LengthSample>,
    #[serde(skip)]
    total_length: f32,
}

impl CurvePath {
    /// Minimum control points needed for the path to be evaluable.
    pub const MIN_POINTS: usize = 2;

    /// A path through the given control points.
    #[must_use]
    pub fn new(control_points: Vec<ControlPoint>, closed: bool) -> Self {
        Self {
            control_points,
            closed,
            length_table: Vec::new(),
            total_length: 0.0,
        }
    }

    /// Number of Bezier spans.
    #[must_use]
    pub fn num_spans(&self) -> usize {
        let n = self.control_points.len();
        if n < Self::MIN_POINTS {
            0
        } else if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Check the path has enough control points to be evaluated.
    pub fn validate(&self) -> Result<(), CordageError> {
        if self.control_points.len() < Self::MIN_POINTS {
            return Err(CordageError::Configuration(format!(
                "paths need at least {} control points, got {}",
                Self::MIN_POINTS,
                self.control_points.len()
            )));
        }
        Ok(())
    }

    /// Map a global parameter to `(span index, local fraction)`.
    fn span_at(&self, mu: f32) -> (usize, f32) {
        let spans = self.num_spans();
        let scaled = mu.clamp(0.0, 1.0) * spans as f32;
        let i = (scaled.floor() as usize).min(spans - 1);
        (i, scaled - i as f32)
    }

    /// Evaluate the path position at `mu` in `[0, 1]`.
    ///
    /// Paths with fewer than 2 control points are not evaluable; that is a
    /// reported configuration error, and a zero sample is returned so the
    /// caller can skip the update.
    #[must_use]
    pub fn evaluate(&self, mu: f32) -> Vec3 {
        if self.validate().is_err() {
            log::warn!("path not evaluable: fewer than 2 control points");
            return Vec3::ZERO;
        }
        let (i, t) = self.span_at(mu);
        let (p0, p1, p2, p3) = self.span_points(i);
        bezier(p0, p1, p2, p3, t)
    }

    /// Evaluate the path tangent (first derivative direction) at `mu`.
    #[must_use]
    pub fn tangent_at(&self, mu: f32) -> Vec3 {
        if self.validate().is_err() {
            log::warn!("path not evaluable: fewer than 2 control points");
            return Vec3::ZERO;
        }
        let (i, t) = self.span_at(mu);
        let (p0, p1, p2, p3) = self.span_points(i);
        bezier_derivative(p0, p1, p2, p3, t).normalize_or_zero()
    }

    /// Evaluate the authored up vector at `mu`, spherically interpolated
    /// between the span's control points.
    #[must_use]
    pub fn normal_at(&self, mu: f32) -> Vec3 {
        if self.validate().is_err() {
            return Vec3::Y;
        }
        let (i, t) = self.span_at(mu);
        let n = self.control_points.len();
        let a = self.control_points[i].normal.normalize_or_zero();
        let b = self.control_points[(i + 1) % n].normal.normalize_or_zero();
        if a == Vec3::ZERO || b == Vec3::ZERO {
            return Vec3::Y;
        }
        let arc = Quat::from_rotation_arc(a, b);
        (Quat::IDENTITY.slerp(arc, t) * a).normalize_or_zero()
    }

    /// Sample the path and rebuild the cumulative arc-length table used by
    /// [`CurvePath::mu_at_length`]. Returns the total length.
    pub fn recalculate_length(
        &mut self,
        samples_per_span: usize,
    ) -> Result<f32, CordageError> {
        self.validate()?;

        let samples = self.num_spans() * samples_per_span.max(1);
        self.length_table.clear();
        self.length_table.reserve(samples + 1);

        let mut length = 0.0;
        let mut prev = self.evaluate(0.0);
        self.length_table.push(LengthSample { mu: 0.0, length });

        for s in 1..=samples {
            let mu = s as f32 / samples as f32;
            let pos = self.evaluate(mu);
            length += prev.distance(pos);
            self.length_table.push(LengthSample { mu, length });
            prev = pos;
        }

        if length <= f32::EPSILON {
            self.length_table.clear();
            self.total_length = 0.0;
            return Err(CordageError::DegenerateGeometry(
                "path has zero arc length".into(),
            ));
        }

        self.total_length = length;
        Ok(length)
    }

    /// Total arc length from the last [`CurvePath::recalculate_length`]
    /// call.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.total_length
    }

    /// Inverse arc-length lookup: the parameter at which `length` units of
    /// curve have been traveled. Requires a prior `recalculate_length`.
    #[must_use]
    pub fn mu_at_length(&self, length: f32) -> f32 {
        if self.length_table.len() < 2 {
            return 0.0;
        }
        let target = length.clamp(0.0, self.total_length);
        let idx = self
            .length_table
            .partition_point(|s| s.length < target)
            .clamp(1, self.length_table.len() - 1);

        let lo = self.length_table[idx - 1];
        let hi = self.length_table[idx];
        let span = hi.length - lo.length;
        if span <= f32::EPSILON {
            return lo.mu;
        }
        let t = (target - lo.length) / span;
        lo.mu + (hi.mu - lo.mu) * t
    }

    /// The four Bezier points of span `i`: start position, out handle, in
    /// handle, end position. Closed paths wrap the end index.
    fn span_points(&self, i: usize) -> (Vec3, Vec3, Vec3, Vec3) {
        let n = self.control_points.len();
        let a = &self.control_points[i];
        let b = &self.control_points[(i + 1) % n];
        (a.position, a.out_tangent(), b.in_tangent(), b.position)
    }
}

/// Cubic Bezier basis.
fn bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u * u)
        + p1 * (3.0 * u * u * t)
        + p2 * (3.0 * u * t * t)
        + p3 * (t * t * t)
}

/// Cubic Bezier first derivative.
fn bezier_derivative(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    (p1 - p0) * (3.0 * u * u)
        + (p2 - p1) * (6.0 * u * t)
        + (p3 - p2) * (3.0 * t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straight path from the origin to (10, 0, 0) with handles at the
    /// thirds, so it reduces to uniform linear motion.
    fn straight_path() -> CurvePath {
        let d = Vec3::new(10.0 / 3.0, 0.0, 0.0);
        CurvePath::new(
            vec![
                ControlPoint::new(Vec3::ZERO, Vec3::Y, d),
                ControlPoint::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Y, d),
            ],
            false,
        )
    }

    #[test]
    fn evaluate_hits_first_and_last_control_points() {
        let path = straight_path();
        assert!(path.evaluate(0.0).abs_diff_eq(Vec3::ZERO, 1e-6));
        assert!(path
            .evaluate(1.0)
            .abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn straight_path_midpoint() {
        let path = straight_path();
        assert!(path
            .evaluate(0.5)
            .abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-5));
        assert!(path.tangent_at(0.5).abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn too_few_control_points_yield_default_sample() {
        let path = CurvePath::new(
            vec![ControlPoint::new(Vec3::ONE, Vec3::Y, Vec3::X)],
            false,
        );
        assert!(path.validate().is_err());
        assert_eq!(path.evaluate(0.5), Vec3::ZERO);
    }

    #[test]
    fn arc_length_of_straight_path() {
        let mut path = straight_path();
        let length = path.recalculate_length(10).unwrap();
        assert!((length - 10.0).abs() < 1e-3);
        assert!((path.mu_at_length(5.0) - 0.5).abs() < 1e-2);
        assert_eq!(path.mu_at_length(-1.0), 0.0);
        assert!((path.mu_at_length(100.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_path_reports_zero_length() {
        let mut path = CurvePath::new(
            vec![
                ControlPoint::new(Vec3::ZERO, Vec3::Y, Vec3::ZERO),
                ControlPoint::new(Vec3::ZERO, Vec3::Y, Vec3::ZERO),
            ],
            false,
        );
        assert!(matches!(
            path.recalculate_length(10),
            Err(CordageError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn closed_path_wraps_spans() {
        let h = Vec3::new(0.0, 0.0, 1.0);
        let path = CurvePath::new(
            vec![
                ControlPoint::new(Vec3::ZERO, Vec3::Y, h),
                ControlPoint::new(Vec3::X, Vec3::Y, h),
                ControlPoint::new(Vec3::new(1.0, 1.0, 0.0), Vec3::Y, h),
            ],
            true,
        );
        assert_eq!(path.num_spans(), 3);
        // The final span ends back at the first control point.
        assert!(path.evaluate(1.0).abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn mirrored_tangent_mode_mirrors_handles() {
        let mut cp = ControlPoint::new(Vec3::ZERO, Vec3::Y, Vec3::X);
        cp.set_out_tangent_offset(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(cp.in_tangent_offset, Vec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn aligned_tangent_mode_keeps_handle_length() {
        let mut cp = ControlPoint::new(Vec3::ZERO, Vec3::Y, Vec3::X);
        cp.tangent_mode = TangentMode::Aligned;
        cp.in_tangent_offset = Vec3::new(-3.0, 0.0, 0.0);
        cp.set_out_tangent_offset(Vec3::new(0.0, 1.0, 0.0));
        // Direction mirrored, magnitude preserved.
        assert!(cp
            .in_tangent_offset
            .abs_diff_eq(Vec3::new(0.0, -3.0, 0.0), 1e-6));
    }

    #[test]
    fn normal_interpolates_between_control_points() {
        let path = CurvePath::new(
            vec![
                ControlPoint::new(Vec3::ZERO, Vec3::Y, Vec3::X),
                ControlPoint::new(
                    Vec3::new(10.0, 0.0, 0.0),
                    Vec3::Z,
                    Vec3::X,
                ),
            ],
            false,
        );
        let mid = path.normal_at(0.5);
        // Halfway through a 90 degree rotation from +Y to +Z.
        let expected = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert!(mid.abs_diff_eq(expected, 1e-4));
    }
}
