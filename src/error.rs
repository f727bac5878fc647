//! Crate-level error types.

use std::fmt;

/// Errors produced by the cordage crate.
///
/// None of these escape the per-frame rebuild path: extrusion and smoothing
/// degrade to a logged no-op when preconditions are unmet. The error type
/// surfaces only on the explicitly fallible APIs (options I/O, path
/// validation, cross-section construction, rope building).
#[derive(Debug)]
pub enum CordageError {
    /// Missing or invalid configuration (too few control points, empty
    /// cross-section, absent mesh target).
    Configuration(String),
    /// Geometry collapsed to a degenerate state (zero-length span or
    /// tangent).
    DegenerateGeometry(String),
    /// A pooled resource ran out (no spare particles left to tear).
    ResourceExhaustion(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for CordageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => {
                write!(f, "configuration error: {msg}")
            }
            Self::DegenerateGeometry(msg) => {
                write!(f, "degenerate geometry: {msg}")
            }
            Self::ResourceExhaustion(msg) => {
                write!(f, "resource exhausted: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CordageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CordageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
