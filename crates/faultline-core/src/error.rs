//! Error types for the triage engine.

use thiserror::Error;

/// Errors that can terminate an analysis run.
///
/// The pipeline itself is total over any valid text buffer; these errors only
/// arise at its edges (decoding the caller's bytes, loading configuration).
#[derive(Debug, Error)]
pub enum FaultlineError {
    /// The caller-supplied buffer is not valid UTF-8 text.
    #[error("input is not valid UTF-8 text (first invalid byte at offset {offset})")]
    InvalidEncoding {
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for triage operations.
pub type Result<T> = std::result::Result<T, FaultlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = FaultlineError::InvalidEncoding { offset: 17 };
        assert_eq!(
            err.to_string(),
            "input is not valid UTF-8 text (first invalid byte at offset 17)"
        );

        let err = FaultlineError::InvalidConfig("window_minutes must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: window_minutes must be positive"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FaultlineError>();
    }

    #[test]
    fn error_serialization_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: FaultlineError = json_err.into();
        assert!(err.to_string().starts_with("serialization error"));
    }

    #[test]
    fn result_type_err() {
        let result: Result<i32> = Err(FaultlineError::InvalidEncoding { offset: 0 });
        assert!(result.is_err());
    }
}
