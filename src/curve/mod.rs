//! Curve math: authored Bezier paths, sampled sections, transported frames,
//! and corner-cutting smoothing.
//!
//! Pure `glam` transforms with no renderer or particle dependencies.

/// Orthonormal frames advanced by parallel transport.
pub mod frame;
/// Authored Bezier paths with tangent handles.
pub mod path;
/// Sampled curve sections.
pub mod section;
/// Chaikin corner-cutting subdivision.
pub mod smoothing;

pub use frame::CurveFrame;
pub use path::{ControlPoint, CurvePath, TangentMode};
pub use section::CurveSection;
pub use smoothing::chaikin;
