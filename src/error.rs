//! Custom error types and handling
//!
//! This module defines the checker's error type. Per-sample failures
//! (wrong answer, runtime error, timeout) are verdicts, not errors; every
//! variant here ends the session it occurs in.

use std::path::PathBuf;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Session-fatal judge errors
    #[error("Unsupported language: no configuration for extension {0:?}")]
    UnsupportedLanguage(String),

    #[error("Compilation failed with exit code {exit_code}")]
    CompilationFailed { exit_code: i32, stderr: String },

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    // Workspace errors
    #[error("Cannot read source file {path}: {source}")]
    SourceFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Collaborator errors
    #[error("Failed to fetch samples: {0}")]
    SampleFetch(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage(_) => "UNSUPPORTED_LANGUAGE",
            Self::CompilationFailed { .. } => "COMPILATION_FAILED",
            Self::Spawn { .. } => "SPAWN_FAILED",
            Self::SourceFile { .. } => "SOURCE_FILE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::SampleFetch(_) => "SAMPLE_FETCH_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Short marker printed in place of a sample verdict when the session
    /// cannot continue.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage(_) => "Unknown language",
            Self::CompilationFailed { .. } => "Compilation Error",
            Self::Internal(_) => "Internal Error",
            _ => "Checker Error",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::SampleFetch(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_markers_are_distinct() {
        let unknown = AppError::UnsupportedLanguage("xyz".to_string());
        let compile = AppError::CompilationFailed {
            exit_code: 1,
            stderr: String::new(),
        };

        assert_eq!(unknown.marker(), "Unknown language");
        assert_eq!(compile.marker(), "Compilation Error");
        assert_ne!(unknown.error_code(), compile.error_code());
    }

    #[test]
    fn test_json_errors_become_configuration_errors() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
