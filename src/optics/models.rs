//! Predefined collector calibrations

use once_cell::sync::Lazy;

use super::incidence::{AngleResponseModel, CalibrationTable};

/// Calibration grid shared by both axes of the reference collector, degrees.
const REFERENCE_ANGLES_DEG: [f64; 9] = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 90.0];

/// Longitudinal incidence angle modifiers of the reference collector.
const REFERENCE_LONGITUDINAL: [f64; 9] = [1.0, 1.0, 1.0, 0.99, 0.98, 0.96, 0.93, 0.87, 0.0];

/// Transversal incidence angle modifiers of the reference collector. The
/// curve exceeds unity towards grazing angles and peaks near 70°; this is a
/// measured property of the collector geometry, not a data error.
const REFERENCE_TRANSVERSAL: [f64; 9] = [1.0, 1.01, 1.04, 1.07, 1.09, 1.14, 1.22, 1.24, 0.0];

/// Manufacturer calibration of the reference stationary collector, measured
/// on a 0°..90° grid. Built once on first access and shared for the life of
/// the process.
pub static REFERENCE_COLLECTOR: Lazy<AngleResponseModel> = Lazy::new(|| {
    let longitudinal = CalibrationTable::new(
        REFERENCE_ANGLES_DEG.to_vec(),
        REFERENCE_LONGITUDINAL.to_vec(),
    )
    .expect("reference longitudinal calibration is valid");
    let transversal = CalibrationTable::new(
        REFERENCE_ANGLES_DEG.to_vec(),
        REFERENCE_TRANSVERSAL.to_vec(),
    )
    .expect("reference transversal calibration is valid");

    AngleResponseModel::from_tables(longitudinal, transversal)
        .expect("reference calibration fits a cubic interpolant")
});

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_collector_knot_values() {
        let model = &*REFERENCE_COLLECTOR;

        for (i, &angle) in REFERENCE_ANGLES_DEG.iter().enumerate() {
            assert_relative_eq!(
                model.longitudinal_modifier(angle).unwrap(),
                REFERENCE_LONGITUDINAL[i],
                epsilon = 1e-9
            );
            assert_relative_eq!(
                model.transversal_modifier(angle).unwrap(),
                REFERENCE_TRANSVERSAL[i],
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_reference_collector_domain() {
        let model = &*REFERENCE_COLLECTOR;
        assert_eq!(model.longitudinal_domain_deg(), (0.0, 90.0));
        assert_eq!(model.transversal_domain_deg(), (0.0, 90.0));
        assert_eq!(model.longitudinal_table().len(), 9);
        assert_eq!(model.transversal_table().len(), 9);
    }
}
