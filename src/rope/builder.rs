//! Staged particle generation along an authored path.
//!
//! Building a very long rope can mean tens of thousands of particles, so
//! generation is cooperative: [`RopeBuilder::step`] seeds a bounded chunk of
//! particles and reports a progress checkpoint, and the caller resumes until
//! completion. No threads are involved; it is resumable work-chunking.

use glam::{Quat, Vec3};

use super::chain::RopeChain;
use super::particles::ParticleStore;
use super::Rope;
use crate::curve::CurvePath;
use crate::error::CordageError;

/// Arc-length samples per span used to place particles along the path.
const LENGTH_SAMPLES_PER_SPAN: usize = 16;

/// Progress checkpoint reported after each generation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildProgress {
    /// Particles generated so far.
    pub generated: usize,
    /// Particles the finished rope will use.
    pub total: usize,
}

impl BuildProgress {
    /// Completion fraction in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.generated as f32 / self.total as f32
        }
    }
}

/// Incremental rope construction state.
#[derive(Debug)]
pub struct RopeBuilder {
    path: CurvePath,
    particles: ParticleStore,
    inter_particle_distance: f32,
    particle_radius: f32,
    used: usize,
    next: usize,
    closed: bool,
}

impl RopeBuilder {
    /// Start building a rope along `path`.
    ///
    /// `thickness` is the rope radius, `resolution` the particle density
    /// (1.0 places roughly one particle per thickness unit), and `pooled`
    /// the number of spare particles reserved for tearing.
    pub fn new(
        mut path: CurvePath,
        thickness: f32,
        resolution: f32,
        pooled: usize,
    ) -> Result<Self, CordageError> {
        if thickness <= 0.0 || resolution <= 0.0 {
            return Err(CordageError::Configuration(format!(
                "thickness and resolution must be positive, got {thickness} \
                 and {resolution}"
            )));
        }
        let rest_length = path.recalculate_length(LENGTH_SAMPLES_PER_SPAN)?;
        let closed = path.closed;

        let used = ((rest_length / thickness * resolution).ceil() as usize
            + usize::from(!closed))
        .max(2);
        let segments = used - usize::from(!closed);
        let inter_particle_distance = rest_length / segments as f32;
        let particle_radius = inter_particle_distance * resolution;

        Ok(Self {
            path,
            particles: ParticleStore::new(used + pooled),
            inter_particle_distance,
            particle_radius,
            used,
            next: 0,
            closed,
        })
    }

    /// Particles the finished rope will use.
    #[must_use]
    pub fn total_particles(&self) -> usize {
        self.used
    }

    /// Whether all particles have been generated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.next >= self.used
    }

    /// Generate up to `max_particles` more particles and report progress.
    pub fn step(&mut self, max_particles: usize) -> BuildProgress {
        let end = self
            .next
            .saturating_add(max_particles.max(1))
            .min(self.used);

        for i in self.next..end {
            let Ok(index) = self.particles.activate_next() else {
                break;
            };
            let mu = self
                .path
                .mu_at_length(self.inter_particle_distance * i as f32);
            self.particles.set_position(index, self.path.evaluate(mu));
            self.particles.set_radius(index, self.particle_radius);

            // Seed orientation from the authored up vector so rods start
            // with sensible frames.
            let normal = self.path.normal_at(mu);
            self.particles.set_orientation(
                index,
                Quat::from_rotation_arc(Vec3::Y, normal),
            );
        }

        self.next = end;
        BuildProgress {
            generated: self.next,
            total: self.used,
        }
    }

    /// Finish the build, producing a rope with a linear distance chain.
    ///
    /// Fails with a configuration error when generation has not completed;
    /// keep calling [`RopeBuilder::step`] until
    /// [`RopeBuilder::is_complete`].
    pub fn finish(self) -> Result<Rope<RopeChain>, CordageError> {
        if !self.is_complete() {
            return Err(CordageError::Configuration(format!(
                "rope build incomplete: {} of {} particles generated",
                self.next, self.used
            )));
        }
        Ok(Rope {
            chain: RopeChain::linear(
                self.used,
                self.inter_particle_distance,
                self.closed,
            ),
            particles: self.particles,
            closed: self.closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ControlPoint;
    use crate::rope::StructuralChain;

    fn straight_path(length: f32) -> CurvePath {
        let d = Vec3::new(length / 3.0, 0.0, 0.0);
        CurvePath::new(
            vec![
                ControlPoint::new(Vec3::ZERO, Vec3::Y, d),
                ControlPoint::new(
                    Vec3::new(length, 0.0, 0.0),
                    Vec3::Y,
                    d,
                ),
            ],
            false,
        )
    }

    #[test]
    fn builds_in_cooperative_chunks() {
        let mut builder =
            RopeBuilder::new(straight_path(10.0), 0.5, 1.0, 4).unwrap();
        let total = builder.total_particles();
        assert_eq!(total, 21); // ceil(10 / 0.5) + 1

        let mut checkpoints = 0;
        while !builder.is_complete() {
            let progress = builder.step(5);
            checkpoints += 1;
            assert!(progress.generated <= progress.total);
        }
        assert_eq!(checkpoints, 5); // 21 particles in chunks of 5

        let rope = builder.finish().unwrap();
        assert_eq!(rope.particles.used(), total);
        assert_eq!(rope.particles.pooled(), 4);
        assert_eq!(rope.chain.constraint_count(), total - 1);
        assert!((rope.rest_length() - 10.0).abs() < 1e-2);
    }

    #[test]
    fn particles_lie_on_the_path() {
        let mut builder =
            RopeBuilder::new(straight_path(10.0), 1.0, 1.0, 0).unwrap();
        let _ = builder.step(usize::MAX);
        let rope = builder.finish().unwrap();

        let first = rope.particles.position(0);
        let last =
            rope.particles.position(rope.particles.used() - 1);
        assert!(first.abs_diff_eq(Vec3::ZERO, 1e-3));
        assert!(last.abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-3));

        // Uniform spacing along a straight path.
        let spacing = rope.particles.position(1).distance(first);
        let expected = 10.0 / (rope.particles.used() - 1) as f32;
        assert!((spacing - expected).abs() < 1e-2);
    }

    #[test]
    fn finish_before_completion_is_rejected() {
        let mut builder =
            RopeBuilder::new(straight_path(10.0), 0.5, 1.0, 0).unwrap();
        let _ = builder.step(1);
        assert!(matches!(
            builder.finish(),
            Err(CordageError::Configuration(_))
        ));
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(RopeBuilder::new(straight_path(10.0), 0.0, 1.0, 0).is_err());
        let empty = CurvePath::new(Vec::new(), false);
        assert!(RopeBuilder::new(empty, 0.5, 1.0, 0).is_err());
    }
}
