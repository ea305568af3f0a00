//! Common validation utilities.

use validator::ValidationError;

fn range_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        Err(range_error(
            "latitude_range",
            "Latitude must be between -90 and 90",
        ))
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        Err(range_error(
            "longitude_range",
            "Longitude must be between -180 and 180",
        ))
    }
}

/// Validates that GPS accuracy is non-negative.
pub fn validate_accuracy(accuracy: f64) -> Result<(), ValidationError> {
    if accuracy >= 0.0 {
        Ok(())
    } else {
        Err(range_error(
            "accuracy_range",
            "Accuracy must be non-negative",
        ))
    }
}

/// Validates that speed is non-negative.
pub fn validate_speed(speed: f64) -> Result<(), ValidationError> {
    if speed >= 0.0 {
        Ok(())
    } else {
        Err(range_error("speed_range", "Speed must be non-negative"))
    }
}

/// Validates that a signal quality score is within 0 to 100.
pub fn validate_signal_quality(quality: f64) -> Result<(), ValidationError> {
    if (0.0..=100.0).contains(&quality) {
        Ok(())
    } else {
        Err(range_error(
            "signal_quality_range",
            "Signal quality must be between 0 and 100",
        ))
    }
}

/// Validates that a motion sensor value is a finite number.
///
/// NaN and infinities cannot be stored in a REAL column round-trip safely.
pub fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(range_error("not_finite", "Value must be a finite number"))
    }
}
