//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]` —
//! no `String` variants. The command loop in the `app` crate decides how a
//! rejection surfaces; the domain only reports *what* was rejected.

/// A command carried a value outside the accepted range of a device.
///
/// Rejected commands never alter device state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Fan speed must be 0 (off), 1 (low) or 2 (high).
    #[error("fan speed {level} is outside the accepted range 0..=2")]
    FanSpeedOutOfRange { level: u8 },

    /// Air-conditioner temperatures are accepted in 16..=30 °C.
    #[error("temperature {temperature}°C is outside the accepted range 16..=30")]
    TemperatureOutOfRange { temperature: i32 },
}

/// Top-level domain error.
#[derive(Debug, thiserror::Error)]
pub enum HomedeckError {
    /// A command was rejected by a device invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_include_offending_value_in_message() {
        let err = ValidationError::FanSpeedOutOfRange { level: 7 };
        assert!(err.to_string().contains('7'));

        let err = ValidationError::TemperatureOutOfRange { temperature: 42 };
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn should_convert_into_top_level_error() {
        let err: HomedeckError = ValidationError::FanSpeedOutOfRange { level: 3 }.into();
        assert!(matches!(err, HomedeckError::Validation(_)));
    }
}
