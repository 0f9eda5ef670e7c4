//! Collector optics models and utilities

pub mod incidence;
pub mod models;

pub use incidence::{AngleResponseModel, CalibrationTable, IncidenceError};
