//! Error types for the CAM tools crate.
//!
//! Path finding and route ordering never fail; a missing path is an ordinary
//! result. These errors cover planner parameters and input geometry.

use routekit_core::GeometryError;
use thiserror::Error;

/// Errors that can occur while setting up a planner.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// Input geometry failed validation.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to planner parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cam_tool_error_display() {
        let err = CamToolError::Parameter(ParameterError::InvalidValue {
            name: "tolerance".to_string(),
            reason: "must be positive".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Parameter error: Invalid value for 'tolerance': must be positive"
        );

        let err = CamToolError::Geometry(GeometryError::ZeroArea);
        assert!(err.to_string().starts_with("Geometry error: "));
    }

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::OutOfRange {
            name: "tolerance".to_string(),
            value: -5.0,
            min: 0.0,
            max: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'tolerance' out of range: -5 (valid: 0..10)"
        );

        let err = ParameterError::InvalidValue {
            name: "max_detour_percent".to_string(),
            reason: "must be at least 100".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'max_detour_percent': must be at least 100"
        );
    }

    #[test]
    fn test_error_conversion() {
        let param_err = ParameterError::InvalidValue {
            name: "max_detour_percent".to_string(),
            reason: "must be at least 100".to_string(),
        };
        let cam_err: CamToolError = param_err.into();
        assert!(matches!(cam_err, CamToolError::Parameter(_)));

        let geo_err = GeometryError::TooFewVertices { count: 2 };
        let cam_err: CamToolError = geo_err.into();
        assert!(matches!(cam_err, CamToolError::Geometry(_)));
    }
}
