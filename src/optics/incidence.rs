//! Incidence angle modifier models for solar collectors.
//!
//! The incidence angle modifier (IAM) is a dimensionless multiplier applied
//! to a collector's optical output to account for losses when light arrives
//! away from the collector normal. For collector geometries with asymmetric
//! optics the modifier is measured independently along two orthogonal axes:
//!
//! - **Longitudinal**: in the plane containing the collector axis
//! - **Transversal**: in the plane perpendicular to it
//!
//! Manufacturers publish one calibration table per axis, normalized so the
//! modifier equals 1 at normal incidence (0°). The combined directional
//! modifier for a sun position with components on both axes is the product
//! of the two single-axis modifiers.
//!
//! # Mathematical Representation
//!
//! Each table is fitted once with a not-a-knot cubic spline, so queries are
//! exact at the calibration angles and smooth between them. The fitted model
//! is immutable and safe to share across threads.
//!
//! Transversal tables for concentrating geometries routinely exceed 1.0 at
//! intermediate angles before dropping to 0 at 90°. That is measured
//! behavior and is reproduced as-is.
//!
//! # Examples
//!
//! ```rust
//! use collector_optics::optics::incidence::{AngleResponseModel, CalibrationTable};
//!
//! let angles = vec![0.0, 20.0, 40.0, 60.0, 90.0];
//! let longitudinal = CalibrationTable::new(angles.clone(), vec![1.0, 0.99, 0.97, 0.92, 0.0])?;
//! let transversal = CalibrationTable::new(angles, vec![1.0, 1.03, 1.08, 1.15, 0.0])?;
//!
//! let model = AngleResponseModel::from_tables(longitudinal, transversal)?;
//!
//! // Exact at a calibration angle
//! assert_eq!(model.longitudinal_modifier(20.0)?, 0.99);
//!
//! // Combined loss for a sun position at 20° longitudinal, 40° transversal
//! let combined = model.directional_modifier(20.0, 40.0)?;
//! assert!((combined - 0.99 * 1.08).abs() < 1e-12);
//! # Ok::<(), collector_optics::optics::incidence::IncidenceError>(())
//! ```

use thiserror::Error;

use crate::algo::spline::{CubicSpline, SplineBoundary, SplineError};

/// Minimum number of calibration points per axis. Four points are needed for
/// the not-a-knot cubic fit to be well defined.
pub const MIN_CALIBRATION_POINTS: usize = 4;

/// Errors from calibration table validation and modifier queries.
#[derive(Debug, Error)]
pub enum IncidenceError {
    /// Query angle outside the calibrated range. The calibration says
    /// nothing about the optics beyond its measured angles, and a cubic
    /// polynomial continued past its fit range diverges quickly, so
    /// out-of-range queries are refused rather than extrapolated.
    #[error("incidence angle {angle_deg}° is outside the calibrated range [{min_deg}°, {max_deg}°]")]
    OutOfDomain {
        angle_deg: f64,
        min_deg: f64,
        max_deg: f64,
    },

    /// Query angle is NaN or infinite.
    #[error("incidence angle must be finite, got {0}")]
    NonFinite(f64),

    /// Angle and modifier columns differ in length.
    #[error("calibration table columns must match (got {angles} angles and {modifiers} modifiers)")]
    LengthMismatch { angles: usize, modifiers: usize },

    /// Not enough calibration points for a cubic fit.
    #[error("calibration table needs at least {required} points, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    /// Calibration angles must be strictly increasing (and therefore
    /// duplicate-free) for interpolation to be well defined.
    #[error("calibration angles must be strictly increasing")]
    NotAscending,

    /// Calibration data contains NaN or infinite entries.
    #[error("calibration values must be finite")]
    NonFiniteCalibration,

    #[error(transparent)]
    Spline(#[from] SplineError),
}

/// Measured incidence angle modifier curve for a single collector axis.
///
/// Holds (angle, modifier) pairs with angles in degrees, validated at
/// construction so a fit over the table cannot fail downstream.
#[derive(Debug, Clone)]
pub struct CalibrationTable {
    angles_deg: Vec<f64>,
    modifiers: Vec<f64>,
}

impl CalibrationTable {
    /// Create a calibration table from angle and modifier columns.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The columns have different lengths
    /// - Fewer than [`MIN_CALIBRATION_POINTS`] points are given
    /// - Any entry is NaN or infinite
    /// - Angles are not strictly increasing
    pub fn new(angles_deg: Vec<f64>, modifiers: Vec<f64>) -> Result<Self, IncidenceError> {
        if angles_deg.len() != modifiers.len() {
            return Err(IncidenceError::LengthMismatch {
                angles: angles_deg.len(),
                modifiers: modifiers.len(),
            });
        }
        if angles_deg.len() < MIN_CALIBRATION_POINTS {
            return Err(IncidenceError::TooFewPoints {
                required: MIN_CALIBRATION_POINTS,
                actual: angles_deg.len(),
            });
        }
        if angles_deg
            .iter()
            .chain(modifiers.iter())
            .any(|v| !v.is_finite())
        {
            return Err(IncidenceError::NonFiniteCalibration);
        }
        if angles_deg.windows(2).any(|w| w[1] <= w[0]) {
            return Err(IncidenceError::NotAscending);
        }

        Ok(Self {
            angles_deg,
            modifiers,
        })
    }

    /// Calibration angles in degrees, strictly increasing.
    pub fn angles_deg(&self) -> &[f64] {
        &self.angles_deg
    }

    /// Modifier values, one per calibration angle.
    pub fn modifiers(&self) -> &[f64] {
        &self.modifiers
    }

    /// Number of calibration points.
    pub fn len(&self) -> usize {
        self.angles_deg.len()
    }

    /// Always false for a validated table; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.angles_deg.is_empty()
    }

    /// Calibrated angle range (min, max) in degrees.
    pub fn domain_deg(&self) -> (f64, f64) {
        (self.angles_deg[0], self.angles_deg[self.angles_deg.len() - 1])
    }
}

/// Directional optical response of a collector.
///
/// Owns one calibration table and fitted interpolant per axis. Construction
/// is the only fallible step; queries on a built model fail only for
/// malformed or out-of-range angles. The model is immutable and can be
/// shared freely between threads.
#[derive(Debug, Clone)]
pub struct AngleResponseModel {
    longitudinal: CalibrationTable,
    transversal: CalibrationTable,
    longitudinal_spline: CubicSpline,
    transversal_spline: CubicSpline,
}

impl AngleResponseModel {
    /// Fit a model from per-axis calibration tables.
    ///
    /// Each table is fitted with a not-a-knot cubic spline, matching the
    /// default cubic 1-D interpolant of common numerical tools so modifier
    /// values agree with calibrations processed there.
    pub fn from_tables(
        longitudinal: CalibrationTable,
        transversal: CalibrationTable,
    ) -> Result<Self, IncidenceError> {
        let longitudinal_spline = CubicSpline::new(
            longitudinal.angles_deg.clone(),
            longitudinal.modifiers.clone(),
            SplineBoundary::NotAKnot,
        )?;
        let transversal_spline = CubicSpline::new(
            transversal.angles_deg.clone(),
            transversal.modifiers.clone(),
            SplineBoundary::NotAKnot,
        )?;

        Ok(Self {
            longitudinal,
            transversal,
            longitudinal_spline,
            transversal_spline,
        })
    }

    /// Longitudinal modifier at the given angle of incidence.
    ///
    /// Exact at the calibration angles, interpolated between them.
    pub fn longitudinal_modifier(&self, angle_deg: f64) -> Result<f64, IncidenceError> {
        Self::eval(&self.longitudinal_spline, angle_deg)
    }

    /// Transversal modifier at the given angle of incidence.
    pub fn transversal_modifier(&self, angle_deg: f64) -> Result<f64, IncidenceError> {
        Self::eval(&self.transversal_spline, angle_deg)
    }

    /// Combined modifier for a sun position with the given angle components,
    /// the product of the two single-axis modifiers.
    pub fn directional_modifier(
        &self,
        angle_long_deg: f64,
        angle_transv_deg: f64,
    ) -> Result<f64, IncidenceError> {
        Ok(self.longitudinal_modifier(angle_long_deg)?
            * self.transversal_modifier(angle_transv_deg)?)
    }

    /// Longitudinal modifiers for a slice of angles, same order as the
    /// input. Fails on the first malformed or out-of-range angle.
    pub fn longitudinal_modifiers(&self, angles_deg: &[f64]) -> Result<Vec<f64>, IncidenceError> {
        angles_deg
            .iter()
            .map(|&a| self.longitudinal_modifier(a))
            .collect()
    }

    /// Transversal modifiers for a slice of angles.
    pub fn transversal_modifiers(&self, angles_deg: &[f64]) -> Result<Vec<f64>, IncidenceError> {
        angles_deg
            .iter()
            .map(|&a| self.transversal_modifier(a))
            .collect()
    }

    /// Calibrated angle range of the longitudinal axis in degrees.
    pub fn longitudinal_domain_deg(&self) -> (f64, f64) {
        self.longitudinal_spline.bounds()
    }

    /// Calibrated angle range of the transversal axis in degrees.
    pub fn transversal_domain_deg(&self) -> (f64, f64) {
        self.transversal_spline.bounds()
    }

    /// Longitudinal calibration data the model was fitted from.
    pub fn longitudinal_table(&self) -> &CalibrationTable {
        &self.longitudinal
    }

    /// Transversal calibration data the model was fitted from.
    pub fn transversal_table(&self) -> &CalibrationTable {
        &self.transversal
    }

    fn eval(spline: &CubicSpline, angle_deg: f64) -> Result<f64, IncidenceError> {
        if !angle_deg.is_finite() {
            return Err(IncidenceError::NonFinite(angle_deg));
        }
        let (min_deg, max_deg) = spline.bounds();
        if angle_deg < min_deg || angle_deg > max_deg {
            return Err(IncidenceError::OutOfDomain {
                angle_deg,
                min_deg,
                max_deg,
            });
        }
        Ok(spline.evaluate(angle_deg))
    }
}
