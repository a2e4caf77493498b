// src/error.rs

//! Error types for recipe evaluation

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while evaluating a recipe
#[derive(Error, Debug)]
pub enum Error {
    /// The version-control query failed or the checkout is not a repository
    #[error("version resolution failed: {0}")]
    VersionResolutionError(String),

    /// The external build driver reported a failure
    ///
    /// `stderr` is the driver's output, unmodified.
    #[error("{phase} failed{}: {stderr}", exit_suffix(.code))]
    BuildError {
        phase: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A declared copy source does not exist
    #[error("packaging failed: {0}")]
    PackagingError(String),

    /// Recipe or profile could not be parsed or is invalid
    #[error("parse error: {0}")]
    ParseError(String),

    /// Invalid setting, option or command-line override
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// A required file or directory was not found
    #[error("not found: {0}")]
    NotFound(String),

    /// I/O failure with context
    #[error("I/O error: {0}")]
    IoError(String),

    /// Raw I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" with exit code {c}"),
        None => String::new(),
    }
}

impl Error {
    /// Build error raised before the driver could run or when it could not be spawned
    pub fn build(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BuildError {
            phase: phase.into(),
            code: None,
            stderr: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_display_includes_code() {
        let err = Error::BuildError {
            phase: "compile".to_string(),
            code: Some(2),
            stderr: "undefined reference to `SDL_Init'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "compile failed with exit code 2: undefined reference to `SDL_Init'"
        );
    }

    #[test]
    fn test_build_error_display_without_code() {
        let err = Error::build("configure", "cmake not found");
        assert_eq!(err.to_string(), "configure failed: cmake not found");
    }
}
