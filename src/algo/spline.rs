//! Cubic spline interpolation for smooth curve fitting
//!
//! Builds piecewise cubic polynomials through a set of strictly increasing
//! knots, producing a curve that passes exactly through every knot and is
//! continuous in value, first, and second derivative. Each segment between
//! adjacent knots has the form:
//!
//! S(x) = a + b(x-xi) + c(x-xi)² + d(x-xi)³
//!
//! Two boundary conditions are supported: natural (zero curvature at the
//! endpoints) and not-a-knot (third-derivative continuity across the second
//! and second-to-last knots). Not-a-knot is what the default cubic 1-D
//! interpolants of common numerical tools produce, so it is the right choice
//! when reproducing values computed with those tools.
//!
//! # Examples
//!
//! ```rust
//! use collector_optics::algo::spline::{CubicSpline, SplineBoundary};
//!
//! let x = vec![0.0, 1.0, 2.0, 3.0];
//! let y = vec![0.0, 1.0, 4.0, 9.0];
//! let spline = CubicSpline::new(x, y, SplineBoundary::Natural).unwrap();
//!
//! // Evaluate at an intermediate point
//! let interpolated = spline.evaluate(1.5);
//!
//! // Generate a smooth curve with 100 points
//! let (x_smooth, y_smooth) = spline.interpolate(100);
//! ```

use thiserror::Error;

/// Errors detected while constructing a spline.
#[derive(Debug, Error)]
pub enum SplineError {
    #[error("knot and value vectors must have the same length (got {knots} and {values})")]
    LengthMismatch { knots: usize, values: usize },

    #[error("at least {required} knots are required, got {actual}")]
    TooFewKnots { required: usize, actual: usize },

    #[error("knot positions must be strictly increasing")]
    NotAscending,

    #[error("knot positions and values must be finite")]
    NonFinite,
}

/// Boundary condition applied at the spline endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplineBoundary {
    /// Second derivative is zero at both endpoints.
    #[default]
    Natural,
    /// Third derivative is continuous across the second and second-to-last
    /// knots. Needs at least four knots.
    NotAKnot,
}

impl SplineBoundary {
    /// Minimum number of knots for the condition to be well defined.
    fn min_knots(self) -> usize {
        match self {
            SplineBoundary::Natural => 2,
            SplineBoundary::NotAKnot => 4,
        }
    }
}

/// Cubic spline interpolant through a fixed set of knots.
///
/// Coefficients are computed once at construction; evaluation locates the
/// containing segment by binary search and evaluates its polynomial.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    coeffs: Vec<[f64; 4]>, // a, b, c, d coefficients for each segment
}

impl CubicSpline {
    /// Fit a cubic spline through the given points.
    ///
    /// # Arguments
    /// * `x` - Knot positions, strictly increasing
    /// * `y` - Values at each knot
    /// * `boundary` - Endpoint condition for the fit
    ///
    /// # Errors
    /// Returns an error if the vectors differ in length, contain non-finite
    /// values, hold too few knots for the boundary condition, or if the knot
    /// positions are not strictly increasing.
    pub fn new(x: Vec<f64>, y: Vec<f64>, boundary: SplineBoundary) -> Result<Self, SplineError> {
        if x.len() != y.len() {
            return Err(SplineError::LengthMismatch {
                knots: x.len(),
                values: y.len(),
            });
        }
        let required = boundary.min_knots();
        if x.len() < required {
            return Err(SplineError::TooFewKnots {
                required,
                actual: x.len(),
            });
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(SplineError::NonFinite);
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SplineError::NotAscending);
        }

        let c = match boundary {
            SplineBoundary::Natural => natural_curvatures(&x, &y),
            SplineBoundary::NotAKnot => not_a_knot_curvatures(&x, &y),
        };

        let n = x.len();
        let mut coeffs = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let h = x[i + 1] - x[i];
            let b = (y[i + 1] - y[i]) / h - h * (2.0 * c[i] + c[i + 1]) / 3.0;
            let d = (c[i + 1] - c[i]) / (3.0 * h);
            coeffs.push([y[i], b, c[i], d]);
        }

        Ok(Self { x, y, coeffs })
    }

    /// Evaluate the spline at a given x value.
    ///
    /// For x outside the knot range the boundary knot's value is returned
    /// (no extrapolation).
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.x.len();
        if x <= self.x[0] {
            return self.y[0];
        }
        if x >= self.x[n - 1] {
            return self.y[n - 1];
        }

        let segment = self.find_segment(x);
        let dx = x - self.x[segment];
        let [a, b, c, d] = self.coeffs[segment];

        // Horner form of a + b*dx + c*dx^2 + d*dx^3
        a + dx * (b + dx * (c + dx * d))
    }

    /// Knot range covered by the spline.
    pub fn bounds(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Knot positions the spline was fitted through.
    pub fn knots(&self) -> &[f64] {
        &self.x
    }

    /// Values at the knots.
    pub fn values(&self) -> &[f64] {
        &self.y
    }

    /// Generate `n_points` evenly spaced interpolated values across the knot
    /// range. The first and last points match the boundary knots exactly.
    ///
    /// # Panics
    /// Panics if `n_points < 2`.
    pub fn interpolate(&self, n_points: usize) -> (Vec<f64>, Vec<f64>) {
        assert!(n_points >= 2, "Need at least 2 output points");

        let (x_min, x_max) = self.bounds();
        let dx = (x_max - x_min) / (n_points - 1) as f64;

        let mut x_out = Vec::with_capacity(n_points);
        let mut y_out = Vec::with_capacity(n_points);

        for i in 0..n_points {
            let x = x_min + i as f64 * dx;
            x_out.push(x);
            y_out.push(self.evaluate(x));
        }

        (x_out, y_out)
    }

    /// Binary search for the segment containing x. Returns the index of the
    /// segment's left knot.
    fn find_segment(&self, x: f64) -> usize {
        let mut left = 0;
        let mut right = self.x.len() - 1;

        while left < right - 1 {
            let mid = (left + right) / 2;
            if x < self.x[mid] {
                right = mid;
            } else {
                left = mid;
            }
        }
        left
    }
}

/// Segment curvatures for natural boundary conditions: curvature is pinned
/// to zero at both endpoints and the interior continuity equations form a
/// tridiagonal system.
fn natural_curvatures(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

    let mut lower = vec![0.0; n];
    let mut diag = vec![0.0; n];
    let mut upper = vec![0.0; n];
    let mut rhs = vec![0.0; n];

    diag[0] = 1.0;
    diag[n - 1] = 1.0;
    for i in 1..n - 1 {
        lower[i] = h[i - 1];
        diag[i] = 2.0 * (h[i - 1] + h[i]);
        upper[i] = h[i];
        rhs[i] = 3.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
    }

    solve_tridiagonal(&lower, &diag, &upper, &rhs)
}

/// Segment curvatures for not-a-knot boundary conditions.
///
/// The endpoint conditions couple three unknowns each, which would break
/// tridiagonality. Eliminating the outer curvatures folds both conditions
/// into the first and last interior rows; the reduced system over
/// c[1]..c[n-2] stays strictly diagonally dominant, and the outer values are
/// recovered from the coupling relations afterwards.
fn not_a_knot_curvatures(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

    let mut r = vec![0.0; n];
    for i in 1..n - 1 {
        r[i] = 3.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
    }

    let m = n - 2;
    let mut lower = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut upper = vec![0.0; m];
    let mut rhs = vec![0.0; m];

    for k in 0..m {
        let i = k + 1;
        if k == 0 {
            diag[k] = h[0] + 2.0 * h[1];
            upper[k] = h[1] - h[0];
            rhs[k] = h[1] * r[1] / (h[0] + h[1]);
        } else if k == m - 1 {
            lower[k] = h[n - 3] - h[n - 2];
            diag[k] = h[n - 2] + 2.0 * h[n - 3];
            rhs[k] = h[n - 3] * r[n - 2] / (h[n - 3] + h[n - 2]);
        } else {
            lower[k] = h[i - 1];
            diag[k] = 2.0 * (h[i - 1] + h[i]);
            upper[k] = h[i];
            rhs[k] = r[i];
        }
    }

    let inner = solve_tridiagonal(&lower, &diag, &upper, &rhs);

    let mut c = vec![0.0; n];
    c[1..n - 1].copy_from_slice(&inner);
    c[0] = c[1] + (h[0] / h[1]) * (c[1] - c[2]);
    c[n - 1] = c[n - 2] + (h[n - 2] / h[n - 3]) * (c[n - 2] - c[n - 3]);
    c
}

/// Thomas algorithm for tridiagonal systems. `lower[i]`, `diag[i]`, and
/// `upper[i]` are the coefficients of row `i`; `lower[0]` and the last
/// `upper` entry are unused. The spline systems solved here are strictly
/// diagonally dominant, so the forward sweep never hits a zero pivot.
fn solve_tridiagonal(lower: &[f64], diag: &[f64], upper: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    c_prime[0] = upper[0] / diag[0];
    d_prime[0] = rhs[0] / diag[0];
    for i in 1..n {
        let denom = diag[i] - lower[i] * c_prime[i - 1];
        if i < n - 1 {
            c_prime[i] = upper[i] / denom;
        }
        d_prime[i] = (rhs[i] - lower[i] * d_prime[i - 1]) / denom;
    }

    let mut out = vec![0.0; n];
    out[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        out[i] = d_prime[i] - c_prime[i] * out[i + 1];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_natural_spline_at_knots() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let y = vec![0.0, 1.0, 0.0, -1.0, 0.0];
        let spline = CubicSpline::new(x.clone(), y.clone(), SplineBoundary::Natural).unwrap();

        for i in 0..x.len() {
            assert_relative_eq!(spline.evaluate(x[i]), y[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_not_a_knot_spline_at_knots() {
        let x = vec![0.0, 10.0, 20.0, 30.0, 40.0];
        let y = vec![1.0, 0.97, 0.9, 0.6, 0.0];
        let spline = CubicSpline::new(x.clone(), y.clone(), SplineBoundary::NotAKnot).unwrap();

        for i in 0..x.len() {
            assert_relative_eq!(spline.evaluate(x[i]), y[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_two_point_natural_spline_is_linear() {
        let x = vec![0.0, 10.0];
        let y = vec![5.0, 15.0];
        let spline = CubicSpline::new(x, y, SplineBoundary::Natural).unwrap();

        assert_relative_eq!(spline.evaluate(2.5), 7.5, epsilon = 1e-10);
        assert_relative_eq!(spline.evaluate(5.0), 10.0, epsilon = 1e-10);
        assert_relative_eq!(spline.evaluate(7.5), 12.5, epsilon = 1e-10);
    }

    #[test]
    fn test_constant_data() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![5.0, 5.0, 5.0, 5.0];
        let spline = CubicSpline::new(x, y, SplineBoundary::Natural).unwrap();

        assert_relative_eq!(spline.evaluate(0.5), 5.0, epsilon = 1e-10);
        assert_relative_eq!(spline.evaluate(1.5), 5.0, epsilon = 1e-10);
        assert_relative_eq!(spline.evaluate(2.5), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_not_a_knot_reproduces_cubic_polynomial() {
        // A single cubic satisfies both not-a-knot conditions, so the fit
        // must recover it exactly between the knots, not just at them.
        let poly = |t: f64| 2.0 * t * t * t - 5.0 * t * t + 3.0 * t + 7.0;
        let x = vec![0.0, 0.7, 1.3, 2.9, 4.0, 5.5];
        let y: Vec<f64> = x.iter().map(|&t| poly(t)).collect();
        let spline = CubicSpline::new(x, y, SplineBoundary::NotAKnot).unwrap();

        for q in [0.1, 0.35, 1.0, 2.0, 3.3, 5.1] {
            assert_relative_eq!(spline.evaluate(q), poly(q), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_natural_endpoint_curvature_is_zero() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let y = vec![0.0, 1.0, 8.0, 27.0, 64.0];
        let spline = CubicSpline::new(x, y, SplineBoundary::Natural).unwrap();

        // Second difference of a cubic segment equals its second derivative
        // at the midpoint, which approaches zero towards a natural endpoint.
        let e = 1e-3;
        let d2_left = (spline.evaluate(0.0) - 2.0 * spline.evaluate(e) + spline.evaluate(2.0 * e))
            / (e * e);
        let d2_right = (spline.evaluate(4.0) - 2.0 * spline.evaluate(4.0 - e)
            + spline.evaluate(4.0 - 2.0 * e))
            / (e * e);
        assert!(d2_left.abs() < 0.1, "left curvature {d2_left}");
        assert!(d2_right.abs() < 0.1, "right curvature {d2_right}");
    }

    #[test]
    fn test_out_of_range_clamps_to_boundary_values() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![0.0, 1.0, 4.0, 9.0];
        let spline = CubicSpline::new(x, y, SplineBoundary::Natural).unwrap();

        assert_relative_eq!(spline.evaluate(-1.0), 0.0, epsilon = 1e-10);
        assert_relative_eq!(spline.evaluate(5.0), 9.0, epsilon = 1e-10);
    }

    #[test]
    fn test_interpolate_spacing_and_endpoints() {
        let x = vec![0.0, 2.0, 4.0];
        let y = vec![0.0, 1.0, 2.0];
        let spline = CubicSpline::new(x, y, SplineBoundary::Natural).unwrap();

        let (x_out, y_out) = spline.interpolate(5);
        assert_eq!(x_out.len(), 5);
        assert_eq!(y_out.len(), 5);
        assert_relative_eq!(x_out[0], 0.0, epsilon = 1e-10);
        assert_relative_eq!(x_out[4], 4.0, epsilon = 1e-10);
        assert_relative_eq!(y_out[0], 0.0, epsilon = 1e-10);
        assert_relative_eq!(y_out[4], 2.0, epsilon = 1e-10);
        for w in x_out.windows(2) {
            assert_relative_eq!(w[1] - w[0], 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_bounds_and_accessors() {
        let x = vec![1.0, 2.0, 5.0, 10.0];
        let y = vec![0.0, 1.0, 0.0, 1.0];
        let spline = CubicSpline::new(x.clone(), y.clone(), SplineBoundary::Natural).unwrap();

        assert_eq!(spline.bounds(), (1.0, 10.0));
        assert_eq!(spline.knots(), &x[..]);
        assert_eq!(spline.values(), &y[..]);
    }

    #[test]
    fn test_length_mismatch_error() {
        let result = CubicSpline::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0],
            SplineBoundary::Natural,
        );
        assert!(matches!(result, Err(SplineError::LengthMismatch { .. })));
    }

    #[test]
    fn test_too_few_knots_error() {
        let result = CubicSpline::new(vec![0.0], vec![1.0], SplineBoundary::Natural);
        assert!(matches!(
            result,
            Err(SplineError::TooFewKnots { required: 2, .. })
        ));

        let result = CubicSpline::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0],
            SplineBoundary::NotAKnot,
        );
        assert!(matches!(
            result,
            Err(SplineError::TooFewKnots { required: 4, .. })
        ));
    }

    #[test]
    fn test_not_ascending_error() {
        let result = CubicSpline::new(
            vec![0.0, 2.0, 1.0],
            vec![0.0, 4.0, 1.0],
            SplineBoundary::Natural,
        );
        assert!(matches!(result, Err(SplineError::NotAscending)));

        let result = CubicSpline::new(
            vec![0.0, 1.0, 1.0],
            vec![0.0, 1.0, 2.0],
            SplineBoundary::Natural,
        );
        assert!(matches!(result, Err(SplineError::NotAscending)));
    }

    #[test]
    fn test_non_finite_error() {
        let result = CubicSpline::new(
            vec![0.0, 1.0, f64::NAN],
            vec![0.0, 1.0, 2.0],
            SplineBoundary::Natural,
        );
        assert!(matches!(result, Err(SplineError::NonFinite)));

        let result = CubicSpline::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, f64::INFINITY, 2.0],
            SplineBoundary::Natural,
        );
        assert!(matches!(result, Err(SplineError::NonFinite)));
    }
}
