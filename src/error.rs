//! Error types for the Quote Engine.
//!
//! The pricing functions themselves never fail: they default missing or
//! out-of-range inputs instead. Errors only come from the boundaries of the
//! engine: loading configuration, parsing textual dates and times, and
//! validating an order before it is submitted.

use thiserror::Error;

/// The main error type for the Quote Engine.
///
/// # Example
///
/// ```
/// use quote_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tariff.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tariff.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A time-of-day string was not a valid `HH:MM` value.
    #[error("Invalid time '{value}': {message}")]
    InvalidTime {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        message: String,
    },

    /// A date string was not a valid calendar date.
    #[error("Invalid date '{value}': {message}")]
    InvalidDate {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        message: String,
    },

    /// An order failed validation before submission.
    #[error("Invalid order field '{field}': {message}")]
    InvalidOrder {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/tariff.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/tariff.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/tariff.yaml".to_string(),
            message: "morning band must start before it ends".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/tariff.yaml': morning band must start before it ends"
        );
    }

    #[test]
    fn test_invalid_time_displays_value_and_message() {
        let error = EngineError::InvalidTime {
            value: "25:00".to_string(),
            message: "hour out of range".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid time '25:00': hour out of range");
    }

    #[test]
    fn test_invalid_date_displays_value_and_message() {
        let error = EngineError::InvalidDate {
            value: "2024-02-30".to_string(),
            message: "no such calendar date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date '2024-02-30': no such calendar date"
        );
    }

    #[test]
    fn test_invalid_order_displays_field_and_message() {
        let error = EngineError::InvalidOrder {
            field: "persons".to_string(),
            message: "must be between 1 and 20".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid order field 'persons': must be between 1 and 20"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_time() -> EngineResult<()> {
            Err(EngineError::InvalidTime {
                value: "x".to_string(),
                message: "not a time".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_time()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
