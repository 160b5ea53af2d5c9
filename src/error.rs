// src/error.rs
//! Unified error handling for signal specification and loading
//!
//! Every failure the crate can raise is a [`SignalError`]. Validation failures
//! are produced while normalizing the caller's options, before any extraction
//! work starts. Failures reported by external collaborators (the trial-table
//! builder and the field-ordering utility) are wrapped with the stage that
//! produced them so the original error stays reachable through `source()`.

use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;

/// Boxed error type returned by external collaborators
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for the signal loading system
#[derive(Debug, Error)]
pub enum SignalError {
    /// Malformed or missing required option
    #[error("[ARGUMENT] Invalid value for '{field}': {reason}")]
    InvalidArgument {
        /// Option name
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// Paired sequences with different lengths
    #[error("[ARITY] '{field}' has {actual} entries, expected {expected} to match 'array_names'")]
    ArityMismatch {
        /// Option name
        field: String,
        /// Number of array names
        expected: usize,
        /// Number of entries given
        actual: usize,
    },

    /// Category or event token with no known label expansion
    #[error("[CATEGORY] Unresolved token '{token}' in '{field}'")]
    UnresolvedCategory {
        /// Option name
        field: String,
        /// Offending token
        token: String,
    },

    /// Failure reported by an external collaborator
    #[error("[CONVERTER] {stage} failed: {source}")]
    Converter {
        /// Stage that failed
        stage: ConverterStage,
        /// Collaborator error
        #[source]
        source: BoxError,
    },

    /// Option file loading failure
    #[error("[CONFIG] {0}")]
    Config(#[from] ConfigError),
}

/// External collaborator stages for error tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterStage {
    /// Trial table construction
    BuildTrials,
    /// Field reordering
    ReorderFields,
}

/// Flat error taxonomy for callers that only need the class of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`SignalError::InvalidArgument`]
    InvalidArgument,
    /// See [`SignalError::ArityMismatch`]
    ArityMismatch,
    /// See [`SignalError::UnresolvedCategory`]
    UnresolvedCategory,
    /// See [`SignalError::Converter`]
    Converter,
    /// See [`SignalError::Config`]
    Config,
}

impl fmt::Display for ConverterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterStage::BuildTrials => write!(f, "trial table construction"),
            ConverterStage::ReorderFields => write!(f, "field reordering"),
        }
    }
}

impl SignalError {
    /// Shorthand for an [`SignalError::InvalidArgument`]
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SignalError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a collaborator failure
    pub fn converter(stage: ConverterStage, source: impl Into<BoxError>) -> Self {
        SignalError::Converter {
            stage,
            source: source.into(),
        }
    }

    /// Class of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignalError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            SignalError::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            SignalError::UnresolvedCategory { .. } => ErrorKind::UnresolvedCategory,
            SignalError::Converter { .. } => ErrorKind::Converter,
            SignalError::Config(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias for signal operations
pub type SignalResult<T> = Result<T, SignalError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = SignalError::ArityMismatch {
            field: "source_array_names".to_string(),
            expected: 2,
            actual: 3,
        };

        let display = format!("{}", err);
        assert!(display.contains("ARITY"));
        assert!(display.contains("source_array_names"));
        assert!(display.contains('3'));
        assert!(display.contains('2'));
    }

    #[test]
    fn test_error_kind() {
        let err = SignalError::invalid_argument("bin_size", "must be numeric");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = SignalError::UnresolvedCategory {
            field: "continuous_names".to_string(),
            token: "gripforce".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::UnresolvedCategory);
    }

    #[test]
    fn test_converter_source_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "session missing");
        let err = SignalError::converter(ConverterStage::BuildTrials, io);

        assert_eq!(err.kind(), ErrorKind::Converter);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("trial table construction"));
        assert!(err.to_string().contains("session missing"));
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SignalError>();
    }
}
