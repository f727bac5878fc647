//! Particle-rope curve smoothing and swept-mesh extrusion.
//!
//! Cordage turns an ordered set of simulation particles into render-ready
//! geometry: raw particle positions are lifted into oriented curve
//! sections, smoothed with Chaikin corner cutting, and swept with a 2D
//! cross-section into a triangulated tube (or a camera-facing ribbon).
//! Ropes can be authored from cubic Bezier paths, torn at runtime into
//! multiple continuous pieces, and re-extruded every frame.
//!
//! # Key entry points
//!
//! - [`curve::CurvePath`] - editable cubic Bezier path used to author ropes
//! - [`rope::RopeBuilder`] - incremental particle generation from a path
//! - [`rope::Rope`] - particle store plus structural constraints; produces
//!   [`rope::SmoothedCurves`] each frame
//! - [`render::ExtrudedRenderer`] - sweeps a [`render::CrossSection`] along
//!   the smoothed curves into a [`render::MeshBuffers`]
//! - [`options::Options`] - TOML-backed tuning for smoothing and extrusion
//!
//! # Pipeline
//!
//! ```text
//! CurvePath -> RopeBuilder -> Rope -> SmoothedCurves -> ExtrudedRenderer
//!                                  \-> tear()        \-> LineRenderer
//! ```
//!
//! Rendering never panics on bad input: a renderer given no cross-section
//! or an empty rope logs the reason and leaves the previous mesh in place.

pub mod curve;
pub mod error;
pub mod options;
pub mod render;
pub mod rope;

pub use error::CordageError;
