//! Structural constraint chains: the rope/rod variant seam.
//!
//! Ropes and rods feed the same curve and mesh pipeline but differ in how
//! their structural constraints are laid out and how a curve frame advances
//! along them: ropes parallel-transport an external frame, rods adopt the
//! orientation their particles already carry.

use crate::curve::{CurveFrame, CurveSection};
use crate::error::CordageError;

/// A chain of structural constraints linking consecutive particles.
pub trait StructuralChain {
    /// Number of structural constraints.
    fn constraint_count(&self) -> usize;

    /// Particle pair affected by constraint `index`, in chain order.
    fn constraint_particles(&self, index: usize) -> Option<(usize, usize)>;

    /// Rest length of constraint `index`.
    fn constraint_rest_length(&self, index: usize) -> f32;

    /// Advance `frame` to `section` the way this chain variant requires.
    fn transport_frame(
        &self,
        frame: &mut CurveFrame,
        section: &CurveSection,
        twist_degrees: f32,
    );
}

/// Distance-constraint chain for ropes.
#[derive(Debug, Clone)]
pub struct RopeChain {
    pairs: Vec<(usize, usize)>,
    rest_lengths: Vec<f32>,
}

impl RopeChain {
    /// A chain from explicit particle pairs and matching rest lengths.
    pub fn new(
        pairs: Vec<(usize, usize)>,
        rest_lengths: Vec<f32>,
    ) -> Result<Self, CordageError> {
        if pairs.len() != rest_lengths.len() {
            return Err(CordageError::Configuration(format!(
                "{} constraint pairs but {} rest lengths",
                pairs.len(),
                rest_lengths.len()
            )));
        }
        Ok(Self {
            pairs,
            rest_lengths,
        })
    }

    /// A chain over `particle_count` consecutive particles with a uniform
    /// rest length. Closed chains link the last particle back to the first.
    #[must_use]
    pub fn linear(
        particle_count: usize,
        rest_length: f32,
        closed: bool,
    ) -> Self {
        if particle_count < 2 {
            return Self {
                pairs: Vec::new(),
                rest_lengths: Vec::new(),
            };
        }
        let mut pairs: Vec<(usize, usize)> =
            (0..particle_count - 1).map(|i| (i, i + 1)).collect();
        if closed {
            pairs.push((particle_count - 1, 0));
        }
        let rest_lengths = vec![rest_length; pairs.len()];
        Self {
            pairs,
            rest_lengths,
        }
    }

    /// Rewire one constraint to a new particle pair. Used by tearing to
    /// point a constraint at a duplicated particle.
    pub(crate) fn set_constraint_particles(
        &mut self,
        index: usize,
        pair: (usize, usize),
    ) {
        self.pairs[index] = pair;
    }
}

impl StructuralChain for RopeChain {
    fn constraint_count(&self) -> usize {
        self.pairs.len()
    }

    fn constraint_particles(&self, index: usize) -> Option<(usize, usize)> {
        self.pairs.get(index).copied()
    }

    fn constraint_rest_length(&self, index: usize) -> f32 {
        self.rest_lengths.get(index).copied().unwrap_or(0.0)
    }

    fn transport_frame(
        &self,
        frame: &mut CurveFrame,
        section: &CurveSection,
        twist_degrees: f32,
    ) {
        frame.transport(section, twist_degrees);
    }
}

/// Stretch/shear constraint chain for rods, whose oriented particles carry
/// their own twist-aware frames.
#[derive(Debug, Clone)]
pub struct RodChain {
    chain: RopeChain,
}

impl RodChain {
    /// A rod chain from explicit particle pairs and matching rest lengths.
    pub fn new(
        pairs: Vec<(usize, usize)>,
        rest_lengths: Vec<f32>,
    ) -> Result<Self, CordageError> {
        Ok(Self {
            chain: RopeChain::new(pairs, rest_lengths)?,
        })
    }

    /// A rod chain over consecutive particles with a uniform rest length.
    #[must_use]
    pub fn linear(
        particle_count: usize,
        rest_length: f32,
        closed: bool,
    ) -> Self {
        Self {
            chain: RopeChain::linear(particle_count, rest_length, closed),
        }
    }
}

impl StructuralChain for RodChain {
    fn constraint_count(&self) -> usize {
        self.chain.constraint_count()
    }

    fn constraint_particles(&self, index: usize) -> Option<(usize, usize)> {
        self.chain.constraint_particles(index)
    }

    fn constraint_rest_length(&self, index: usize) -> f32 {
        self.chain.constraint_rest_length(index)
    }

    fn transport_frame(
        &self,
        frame: &mut CurveFrame,
        section: &CurveSection,
        _twist_degrees: f32,
    ) {
        frame.set_from_section(section);
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;

    #[test]
    fn linear_chain_layout() {
        let chain = RopeChain::linear(4, 0.5, false);
        assert_eq!(chain.constraint_count(), 3);
        assert_eq!(chain.constraint_particles(0), Some((0, 1)));
        assert_eq!(chain.constraint_particles(2), Some((2, 3)));
        assert_eq!(chain.constraint_particles(3), None);
        assert_eq!(chain.constraint_rest_length(1), 0.5);
    }

    #[test]
    fn closed_chain_wraps() {
        let chain = RopeChain::linear(4, 0.5, true);
        assert_eq!(chain.constraint_count(), 4);
        assert_eq!(chain.constraint_particles(3), Some((3, 0)));
    }

    #[test]
    fn mismatched_rest_lengths_rejected() {
        assert!(matches!(
            RopeChain::new(vec![(0, 1)], vec![]),
            Err(CordageError::Configuration(_))
        ));
    }

    #[test]
    fn rod_chain_adopts_section_orientation() {
        let chain = RodChain::linear(2, 1.0, false);
        let mut frame = CurveFrame::new();
        let section = CurveSection::new(
            Vec3::X.extend(0.1),
            Vec3::X,
            Vec3::Z,
            Vec4::ONE,
        );
        chain.transport_frame(&mut frame, &section, 90.0);

        // Twist is ignored; the frame matches the section exactly.
        assert!(frame.tangent.abs_diff_eq(Vec3::X, 1e-6));
        assert!(frame.normal.abs_diff_eq(Vec3::Z, 1e-6));
    }
}
