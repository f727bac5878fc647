//! Chaikin corner-cutting subdivision for raw particle curves.

use super::section::CurveSection;

/// Smooth a polyline of curve sections by repeated corner cutting.
///
/// Each iteration replaces every edge `(A, B)` with the cut points
/// `0.75·A + 0.25·B` and `0.25·A + 0.75·B`. On open curves the endpoints
/// stay pinned, and the output grows as `m·2ⁿ − (2ⁿ − 1)` for `m` input
/// points and `n` iterations. On closed curves the wraparound edge is
/// subdivided too, so the point count never shrinks.
///
/// Zero iterations (or fewer than 2 input points) copies the input
/// unchanged. All section attributes blend with the same weights as
/// position.
pub fn chaikin(
    input: &[CurveSection],
    iterations: u32,
    closed: bool,
    output: &mut Vec<CurveSection>,
) {
    output.clear();
    output.extend_from_slice(input);

    if iterations == 0 || input.len() < 2 {
        return;
    }

    let mut scratch: Vec<CurveSection> = Vec::new();
    for _ in 0..iterations {
        scratch.clear();
        if closed {
            subdivide_closed(output, &mut scratch);
        } else {
            subdivide_open(output, &mut scratch);
        }
        std::mem::swap(output, &mut scratch);
    }
}

/// One open-curve iteration: `c` points become `2c − 1`, endpoints pinned.
fn subdivide_open(points: &[CurveSection], out: &mut Vec<CurveSection>) {
    let c = points.len();
    out.push(points[0]);
    for i in 0..c - 1 {
        if i > 0 {
            out.push(points[i] * 0.75 + points[i + 1] * 0.25);
        }
        out.push(points[i] * 0.25 + points[i + 1] * 0.75);
    }
    out.push(points[c - 1]);
}

/// One closed-curve iteration: `c` points become `2c`, including the
/// wraparound edge.
fn subdivide_closed(points: &[CurveSection], out: &mut Vec<CurveSection>) {
    let c = points.len();
    for i in 0..c {
        let a = points[i];
        let b = points[(i + 1) % c];
        out.push(a * 0.75 + b * 0.25);
        out.push(a * 0.25 + b * 0.75);
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;

    fn polyline(positions: &[Vec3]) -> Vec<CurveSection> {
        positions
            .iter()
            .map(|&p| {
                CurveSection::new(p.extend(0.1), Vec3::Z, Vec3::Y, Vec4::ONE)
            })
            .collect()
    }

    #[test]
    fn zero_iterations_is_identity() {
        let input =
            polyline(&[Vec3::ZERO, Vec3::X, Vec3::new(2.0, 1.0, 0.0)]);
        let mut out = Vec::new();
        chaikin(&input, 0, false, &mut out);
        assert_eq!(out, input);
    }

    #[test]
    fn open_curve_growth_law() {
        // m points after n iterations: m * 2^n - (2^n - 1)
        let input = polyline(&[
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(3.0, 1.0, 1.0),
        ]);
        let m = input.len();
        let mut out = Vec::new();
        for n in 1..=4_u32 {
            chaikin(&input, n, false, &mut out);
            let pow = 1_usize << n;
            assert_eq!(out.len(), m * pow - (pow - 1), "n = {n}");
        }
    }

    #[test]
    fn open_curve_endpoints_stay_pinned() {
        let input = polyline(&[
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(2.0, -1.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ]);
        let mut out = Vec::new();
        for n in 1..=3_u32 {
            chaikin(&input, n, false, &mut out);
            assert_eq!(out[0], input[0], "n = {n}");
            assert_eq!(out[out.len() - 1], input[input.len() - 1], "n = {n}");
        }
    }

    #[test]
    fn closed_curve_never_shrinks() {
        let input = polyline(&[
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::Y,
        ]);
        let mut out = Vec::new();
        for n in 0..=3_u32 {
            chaikin(&input, n, true, &mut out);
            assert!(out.len() >= input.len(), "n = {n}");
        }
    }

    #[test]
    fn cut_points_blend_radius_and_color() {
        let mut input = polyline(&[Vec3::ZERO, Vec3::X]);
        input[0].position_and_radius.w = 1.0;
        input[1].position_and_radius.w = 3.0;
        input[0].color = Vec4::ZERO;
        input[1].color = Vec4::ONE;

        let mut out = Vec::new();
        chaikin(&input, 1, false, &mut out);
        assert_eq!(out.len(), 3);

        // Middle point is the 0.25/0.75 cut of the single edge.
        assert_eq!(out[1].radius(), 1.0 * 0.25 + 3.0 * 0.75);
        assert!(out[1].color.abs_diff_eq(Vec4::splat(0.75), 1e-6));
    }

    #[test]
    fn two_point_curve_subdivides() {
        let input = polyline(&[Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)]);
        let mut out = Vec::new();
        chaikin(&input, 1, false, &mut out);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1].position(), Vec3::new(3.0, 0.0, 0.0));
    }
}
