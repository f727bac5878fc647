//! Particle storage backing a rope.
//!
//! Plain SoA arrays: positions and orientations are written every tick by
//! the external solver, everything else is set up once at build time. A
//! fixed-size pool of inactive particles at the tail supports tearing and
//! length changes without reallocation.

use glam::{Quat, Vec3, Vec4};

use crate::error::CordageError;

/// Default particle mass in kg; inverse masses start at `1 / mass`.
pub const DEFAULT_PARTICLE_MASS: f32 = 0.1;

/// SoA particle arrays with a used/pooled split.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    positions: Vec<Vec3>,
    orientations: Vec<Quat>,
    radii: Vec<f32>,
    inv_masses: Vec<f32>,
    colors: Vec<Vec4>,
    active: Vec<bool>,
    used: usize,
}

impl ParticleStore {
    /// Allocate `total` inactive particles with default attributes.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            positions: vec![Vec3::ZERO; total],
            orientations: vec![Quat::IDENTITY; total],
            radii: vec![0.0; total],
            inv_masses: vec![1.0 / DEFAULT_PARTICLE_MASS; total],
            colors: vec![Vec4::ONE; total],
            active: vec![false; total],
            used: 0,
        }
    }

    /// Total allocated particles, active or not.
    #[must_use]
    pub fn total(&self) -> usize {
        self.positions.len()
    }

    /// Number of active particles.
    #[must_use]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Number of inactive particles left in the pool.
    #[must_use]
    pub fn pooled(&self) -> usize {
        self.total() - self.used
    }

    /// Activate the next pooled particle, returning its index.
    pub fn activate_next(&mut self) -> Result<usize, CordageError> {
        if self.used >= self.total() {
            return Err(CordageError::ResourceExhaustion(
                "no pooled particles remain".into(),
            ));
        }
        let index = self.used;
        self.active[index] = true;
        self.used += 1;
        Ok(index)
    }

    /// Activate a pooled particle as a copy of `source`. Refused with
    /// [`CordageError::ResourceExhaustion`] when the pool is empty.
    pub fn duplicate(&mut self, source: usize) -> Result<usize, CordageError> {
        let index = self.activate_next()?;
        self.positions[index] = self.positions[source];
        self.orientations[index] = self.orientations[source];
        self.radii[index] = self.radii[source];
        self.inv_masses[index] = self.inv_masses[source];
        self.colors[index] = self.colors[source];
        Ok(index)
    }

    /// Whether particle `index` is active.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.active[index]
    }

    /// Particle position.
    #[must_use]
    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    /// All particle positions; the solver stream writes through this.
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    /// Set one particle position.
    pub fn set_position(&mut self, index: usize, position: Vec3) {
        self.positions[index] = position;
    }

    /// Particle orientation.
    #[must_use]
    pub fn orientation(&self, index: usize) -> Quat {
        self.orientations[index]
    }

    /// All particle orientations; oriented-particle solvers write through
    /// this.
    pub fn orientations_mut(&mut self) -> &mut [Quat] {
        &mut self.orientations
    }

    /// Set one particle orientation.
    pub fn set_orientation(&mut self, index: usize, orientation: Quat) {
        self.orientations[index] = orientation;
    }

    /// Particle radius.
    #[must_use]
    pub fn radius(&self, index: usize) -> f32 {
        self.radii[index]
    }

    /// Set one particle radius.
    pub fn set_radius(&mut self, index: usize, radius: f32) {
        self.radii[index] = radius;
    }

    /// Particle inverse mass; zero means fixed in place.
    #[must_use]
    pub fn inv_mass(&self, index: usize) -> f32 {
        self.inv_masses[index]
    }

    /// Set one particle inverse mass. Zero pins the particle.
    pub fn set_inv_mass(&mut self, index: usize, inv_mass: f32) {
        self.inv_masses[index] = inv_mass;
    }

    /// Particle color.
    #[must_use]
    pub fn color(&self, index: usize) -> Vec4 {
        self.colors[index]
    }

    /// Set one particle color.
    pub fn set_color(&mut self, index: usize, color: Vec4) {
        self.colors[index] = color;
    }
}
