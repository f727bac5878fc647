//! Particle ropes: constraint chains over particle storage, curve
//! extraction, and tearing.

/// Staged particle generation from an authored path.
pub mod builder;
/// Structural constraint chains (rope/rod variants).
pub mod chain;
/// SoA particle storage with a pooled tail.
pub mod particles;

pub use builder::{BuildProgress, RopeBuilder};
pub use chain::{RodChain, RopeChain, StructuralChain};
use glam::{Quat, Vec3};
pub use particles::ParticleStore;

use crate::curve::{chaikin, CurveSection};

/// Smoothed curves extracted from a rope's particles, one polyline per
/// continuous piece of rope.
#[derive(Debug, Clone, Default)]
pub struct SmoothedCurves {
    /// One smoothed section sequence per disjoint sub-curve.
    pub curves: Vec<Vec<CurveSection>>,
    /// Total segment count across all curves (`Σ len − 1`).
    pub total_sections: usize,
    /// Total smoothed arc length.
    pub smooth_length: f32,
}

impl SmoothedCurves {
    /// Whether no curve with at least two sections was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_sections == 0
    }
}

/// A rope: a structural chain over particle storage.
///
/// Particle positions and orientations are produced by an external solver;
/// the rope only reads them back to rebuild its smoothed curves every tick.
#[derive(Debug, Clone)]
pub struct Rope<C: StructuralChain> {
    /// Particle storage, including the pooled tail.
    pub particles: ParticleStore,
    /// Structural constraint chain.
    pub chain: C,
    /// Whether the rope forms a closed loop.
    pub closed: bool,
}

impl<C: StructuralChain> Rope<C> {
    /// Sum of structural constraint rest lengths.
    #[must_use]
    pub fn rest_length(&self) -> f32 {
        (0..self.chain.constraint_count())
            .map(|i| self.chain.constraint_rest_length(i))
            .sum()
    }

    /// Actual rope length including stretch: the sum of inter-particle
    /// distances along the chain.
    #[must_use]
    pub fn current_length(&self) -> f32 {
        (0..self.chain.constraint_count())
            .filter_map(|i| self.chain.constraint_particles(i))
            .map(|(p1, p2)| {
                self.particles
                    .position(p1)
                    .distance(self.particles.position(p2))
            })
            .sum()
    }

    /// Index of the structural constraint at a normalized rope coordinate.
    #[must_use]
    pub fn constraint_index_at(&self, coord: f32) -> Option<usize> {
        let count = self.chain.constraint_count();
        if count == 0 {
            return None;
        }
        let mu = coord.clamp(0.0, 1.0) * count as f32;
        Some((mu.floor() as usize).min(count - 1))
    }

    /// Rebuild smoothed curves from current particle state.
    ///
    /// Walks the constraint chain in order, starting a new raw curve at
    /// every discontinuity (a tear leaves the chain pointing at a duplicated
    /// particle, so consecutive constraints stop sharing one). Each raw
    /// curve gets one control point per particle — tangent from the
    /// neighboring segments, normal from the slerped particle orientations,
    /// radius and color straight from the particle — and is then
    /// Chaikin-smoothed with `iterations` corner cuts.
    #[must_use]
    pub fn smooth_curves_from_particles(
        &self,
        iterations: u32,
    ) -> SmoothedCurves {
        let mut result = SmoothedCurves::default();
        let mut raw: Vec<CurveSection> = Vec::new();

        let runs = self.continuous_runs();
        let single_run = runs.len() == 1;

        for pairs in runs {
            let closed = self.closed && single_run;
            self.control_points_for_run(&pairs, closed, &mut raw);

            let mut smoothed = Vec::new();
            chaikin(&raw, iterations, closed, &mut smoothed);

            // Close the loop with a seam section so the mesh wraps around,
            // after smoothing so the wraparound edge keeps its length.
            if closed {
                if let Some(&seam) = smoothed.first() {
                    smoothed.push(seam);
                }
            }

            if smoothed.len() > 1 {
                result.total_sections += smoothed.len() - 1;
                result.smooth_length += curve_length(&smoothed);
                result.curves.push(smoothed);
            }
        }

        result
    }

    /// Split the constraint chain into runs of continuously linked pairs.
    fn continuous_runs(&self) -> Vec<Vec<(usize, usize)>> {
        let mut runs = Vec::new();
        let mut current: Vec<(usize, usize)> = Vec::new();

        for i in 0..self.chain.constraint_count() {
            let Some((p1, p2)) = self.chain.constraint_particles(i) else {
                continue;
            };
            if let Some(&(_, last)) = current.last() {
                if p1 != last {
                    runs.push(std::mem::take(&mut current));
                }
            }
            current.push((p1, p2));
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    /// Build raw control points for one continuous run of constraints.
    ///
    /// Closed runs wrap: the first particle's tangent uses the final pair as
    /// its predecessor, and no duplicate endpoint is emitted (the smoother's
    /// wraparound edge would collapse to zero length).
    fn control_points_for_run(
        &self,
        run: &[(usize, usize)],
        closed: bool,
        out: &mut Vec<CurveSection>,
    ) {
        out.clear();
        let Some(&(first, _)) = run.first() else {
            return;
        };
        let mut last = if closed {
            run.last().map_or(first, |&(p1, _)| p1)
        } else {
            first
        };

        for &(p1, p2) in run {
            let prev_v =
                self.particles.position(p1) - self.particles.position(last);
            let next_v =
                self.particles.position(p2) - self.particles.position(p1);
            out.push(self.section_for_particle(
                p1,
                (prev_v + next_v).normalize_or_zero(),
                last,
            ));
            last = p1;
        }

        // The last segment of an open run contributes its second particle
        // too.
        if !closed {
            if let Some(&(p1, p2)) = run.last() {
                let tangent = (self.particles.position(p2)
                    - self.particles.position(p1))
                .normalize_or_zero();
                out.push(self.section_with_orientation(
                    p2,
                    tangent,
                    self.particles.orientation(p1),
                ));
            }
        }
    }

    fn section_for_particle(
        &self,
        particle: usize,
        tangent: Vec3,
        previous: usize,
    ) -> CurveSection {
        let orientation = self
            .particles
            .orientation(previous)
            .slerp(self.particles.orientation(particle), 0.5);
        self.section_with_orientation(particle, tangent, orientation)
    }

    fn section_with_orientation(
        &self,
        particle: usize,
        tangent: Vec3,
        orientation: Quat,
    ) -> CurveSection {
        CurveSection::new(
            self.particles
                .position(particle)
                .extend(self.particles.radius(particle)),
            tangent,
            orientation * Vec3::Y,
            self.particles.color(particle),
        )
    }
}

impl Rope<RopeChain> {
    /// Split the rope at a structural constraint by duplicating one of its
    /// particles, consuming a pooled particle.
    ///
    /// The heavier, unpinned side is preferred as the split particle, as
    /// long as the chain stays walkable from the other side. Returns `false`
    /// without modifying anything when the pool is exhausted or the
    /// constraint cannot be split — a documented no-op, not an error.
    pub fn tear(&mut self, constraint_index: usize) -> bool {
        let Some((p1, p2)) = self.chain.constraint_particles(constraint_index)
        else {
            return false;
        };

        let (mut split, mut intact) = (p1, p2);
        let continuous_at_intact =
            self.is_continuous_at(constraint_index, intact);
        let split_inv = self.particles.inv_mass(split);
        let intact_inv = self.particles.inv_mass(intact);

        // Prefer splitting the heavier (or unpinned) particle.
        if (split_inv > intact_inv || split_inv == 0.0) && continuous_at_intact
        {
            std::mem::swap(&mut split, &mut intact);
        }
        if self.particles.inv_mass(split) == 0.0 {
            log::debug!(
                "tear refused: constraint {constraint_index} joins pinned \
                 particles"
            );
            return false;
        }
        if !self.is_continuous_at(constraint_index, split) {
            log::debug!(
                "tear refused: rope already cut at constraint \
                 {constraint_index}"
            );
            return false;
        }

        let Ok(duplicate) = self.particles.duplicate(split) else {
            log::debug!("tear refused: particle pool exhausted");
            return false;
        };

        // The split particle's mass is shared between the two halves.
        let halved = self.particles.inv_mass(split) * 2.0;
        self.particles.set_inv_mass(split, halved);
        self.particles.set_inv_mass(duplicate, halved);

        let new_pair = if split == p1 {
            (duplicate, p2)
        } else {
            (p1, duplicate)
        };
        self.chain
            .set_constraint_particles(constraint_index, new_pair);
        true
    }

    /// Whether neighboring constraints also reference `particle`, i.e. the
    /// chain continues through it.
    fn is_continuous_at(&self, constraint_index: usize, particle: usize) -> bool {
        let before = constraint_index
            .checked_sub(1)
            .and_then(|i| self.chain.constraint_particles(i))
            .is_some_and(|(_, b)| b == particle);
        let after = self
            .chain
            .constraint_particles(constraint_index + 1)
            .is_some_and(|(a, _)| a == particle);
        before || after
    }
}

/// Sum of distances between consecutive sections.
fn curve_length(curve: &[CurveSection]) -> f32 {
    curve
        .windows(2)
        .map(|w| w[0].position().distance(w[1].position()))
        .sum()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    /// Straight 5-particle rope along +X, one unit apart.
    fn straight_rope() -> Rope<RopeChain> {
        let mut particles = ParticleStore::new(6);
        for i in 0..5 {
            let idx = particles.activate_next().unwrap();
            particles.set_position(idx, Vec3::X * i as f32);
            particles.set_radius(idx, 0.1);
        }
        Rope {
            particles,
            chain: RopeChain::linear(5, 1.0, false),
            closed: false,
        }
    }

    /// Closed 4-particle unit-square rope in the XY plane.
    fn closed_square_rope() -> Rope<RopeChain> {
        let mut particles = ParticleStore::new(4);
        let corners =
            [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y];
        for corner in corners {
            let idx = particles.activate_next().unwrap();
            particles.set_position(idx, corner);
            particles.set_radius(idx, 0.1);
        }
        Rope {
            particles,
            chain: RopeChain::linear(4, 1.0, true),
            closed: true,
        }
    }

    #[test]
    fn closed_rope_smooths_without_degenerate_sections() {
        let rope = closed_square_rope();
        let smoothed = rope.smooth_curves_from_particles(1);

        // 4 raw points double to 8, plus the seam section closing the loop.
        let curve = &smoothed.curves[0];
        assert_eq!(curve.len(), 9);
        assert_eq!(curve[0].position(), curve[8].position());

        // No coincident consecutive sections anywhere around the loop.
        for pair in curve.windows(2) {
            assert!(pair[0].position().distance(pair[1].position()) > 1e-6);
        }

        // Corner cutting a unit square yields an octagon: perimeter
        // 2 + sqrt(2).
        assert!((smoothed.smooth_length - 3.414).abs() < 1e-3);
    }

    #[test]
    fn rest_and_current_length() {
        let rope = straight_rope();
        assert!((rope.rest_length() - 4.0).abs() < 1e-6);
        assert!((rope.current_length() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn constraint_lookup_by_normalized_coordinate() {
        let rope = straight_rope();
        assert_eq!(rope.constraint_index_at(0.0), Some(0));
        assert_eq!(rope.constraint_index_at(0.5), Some(2));
        assert_eq!(rope.constraint_index_at(1.0), Some(3));
    }

    #[test]
    fn smooth_curves_single_continuous_piece() {
        let rope = straight_rope();
        let smoothed = rope.smooth_curves_from_particles(0);
        assert_eq!(smoothed.curves.len(), 1);
        assert_eq!(smoothed.curves[0].len(), 5);
        assert!((smoothed.smooth_length - 4.0).abs() < 1e-5);
        assert_eq!(smoothed.total_sections, 4);
    }

    #[test]
    fn smoothing_keeps_straight_rope_length() {
        let rope = straight_rope();
        let smoothed = rope.smooth_curves_from_particles(2);
        // Corner cutting on a straight polyline changes nothing but count.
        assert!((smoothed.smooth_length - 4.0).abs() < 1e-4);
        assert_eq!(smoothed.curves[0].len(), 5 * 4 - 3);
    }

    #[test]
    fn tear_splits_rope_into_two_curves() {
        let mut rope = straight_rope();
        assert!(rope.tear(2));

        let smoothed = rope.smooth_curves_from_particles(0);
        assert_eq!(smoothed.curves.len(), 2);
        // All five original particles still appear, plus the duplicate.
        let total_points: usize =
            smoothed.curves.iter().map(Vec::len).sum();
        assert_eq!(total_points, 6);
    }

    #[test]
    fn tear_halves_the_split_particle_mass() {
        let mut rope = straight_rope();
        let before = rope.particles.inv_mass(2);
        assert!(rope.tear(2));

        // Both copies carry double the inverse mass.
        assert_eq!(rope.particles.inv_mass(2), before * 2.0);
        assert_eq!(rope.particles.inv_mass(5), before * 2.0);
    }

    #[test]
    fn tear_refused_at_a_rope_end() {
        let mut rope = straight_rope();
        // The chain is not continuous past particle 0, so there is nothing
        // to split off.
        assert!(!rope.tear(0));
        assert_eq!(rope.particles.pooled(), 1);
    }

    #[test]
    fn tear_refused_when_pool_exhausted() {
        let mut rope = straight_rope();
        assert!(rope.tear(1)); // consumes the single pooled particle
        assert!(!rope.tear(3));

        // The refused tear left the chain untouched.
        let smoothed = rope.smooth_curves_from_particles(0);
        assert_eq!(smoothed.curves.len(), 2);
    }
}
