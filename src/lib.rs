//! Solar collector optics calculations
//!
//! This crate models the directional optical response of solar collectors.
//! The central piece is the incidence angle modifier (IAM) model: measured
//! calibration tables for the longitudinal and transversal collector axes
//! are fitted with cubic spline interpolants, and queries return the optical
//! loss multiplier for a given angle of incidence.

pub mod algo;
pub mod angle_grid;
pub mod optics;

// Re-exports for easier access
pub use algo::spline::{CubicSpline, SplineBoundary};
pub use optics::incidence::{AngleResponseModel, CalibrationTable, IncidenceError};
