//! Angle sweep argument for command line tools
//!
//! Provides a clap-compatible "start:stop:step" type for sweeping the angle
//! of incidence in degrees.

use std::fmt;
use std::str::FromStr;

/// Inclusive forward sweep over angles in degrees with a fixed step.
#[derive(Debug, Clone)]
pub struct AngleGrid {
    start_deg: f64,
    stop_deg: f64,
    step_deg: f64,
}

impl AngleGrid {
    /// Create a validated sweep.
    ///
    /// # Errors
    /// Returns an error if any value is non-finite, the step is not
    /// positive, or start exceeds stop.
    pub fn new(start_deg: f64, stop_deg: f64, step_deg: f64) -> Result<Self, String> {
        if !(start_deg.is_finite() && stop_deg.is_finite() && step_deg.is_finite()) {
            return Err("Angle grid values must be finite".to_string());
        }
        if step_deg <= 0.0 {
            return Err("Step must be positive".to_string());
        }
        if start_deg > stop_deg {
            return Err("Start angle must not exceed stop angle".to_string());
        }

        Ok(Self {
            start_deg,
            stop_deg,
            step_deg,
        })
    }

    /// First angle of the sweep in degrees.
    pub fn start_deg(&self) -> f64 {
        self.start_deg
    }

    /// Last reachable angle of the sweep in degrees (inclusive).
    pub fn stop_deg(&self) -> f64 {
        self.stop_deg
    }

    /// Increment between angles in degrees.
    pub fn step_deg(&self) -> f64 {
        self.step_deg
    }

    /// Expand the sweep into concrete angles.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut values = Vec::new();
        let mut current = self.start_deg;
        while current <= self.stop_deg {
            values.push(current);
            current += self.step_deg;
        }
        values
    }
}

impl FromStr for AngleGrid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err("Angle grid must be in format 'start:stop:step'".to_string());
        }

        let start = parts[0]
            .trim()
            .parse::<f64>()
            .map_err(|_| "Invalid start angle".to_string())?;
        let stop = parts[1]
            .trim()
            .parse::<f64>()
            .map_err(|_| "Invalid stop angle".to_string())?;
        let step = parts[2]
            .trim()
            .parse::<f64>()
            .map_err(|_| "Invalid step".to_string())?;

        Self::new(start, stop, step)
    }
}

impl fmt::Display for AngleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start_deg, self.stop_deg, self.step_deg)
    }
}
