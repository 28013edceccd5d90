//! Error types for the delegation guard
//!
//! This module defines the error hierarchy for the crate using `thiserror`.
//! Fallible internals return `Result<T, GuardError>`; the hook binary maps
//! every error onto a benign silent decision, because a hook failure must
//! never block the host's tool-call pipeline.
//!
//! Two variants support automatic conversion via the `?` operator:
//! - [`GuardError::JsonDecode`] from `serde_json::Error`
//! - [`GuardError::Io`] from `std::io::Error`

use thiserror::Error;

/// The error type for all delegation-guard operations
#[derive(Error, Debug)]
pub enum GuardError {
    /// Failed to serialize or deserialize JSON
    ///
    /// Raised when a persisted state record or a decision object cannot be
    /// encoded. Malformed *input* is handled leniently before this type is
    /// ever involved (see [`crate::event::HookInput::parse_lenient`]).
    #[error("Failed to encode or decode JSON: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// I/O operation failed
    ///
    /// Automatically converted from `std::io::Error` for state-file reads
    /// and writes.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let guard_err: GuardError = io_err.into();
        assert!(guard_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
        let guard_err: GuardError = json_err.into();
        assert!(matches!(guard_err, GuardError::JsonDecode(_)));
    }

    #[test]
    fn test_result_with_question_mark_io() {
        fn read_file() -> Result<String, GuardError> {
            Ok(std::fs::read_to_string("/nonexistent/file.txt")?)
        }

        let err = read_file().unwrap_err();
        assert!(matches!(err, GuardError::Io(_)));
    }
}
