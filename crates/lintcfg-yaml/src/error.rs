/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for YAML parsing with source locations.

use thiserror::Error;

/// Result type alias for lintcfg-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during YAML parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// YAML syntax error reported by the scanner.
    #[error("YAML parse error at line {line}, column {col}: {message}")]
    ParseError {
        message: String,
        line: usize,
        col: usize,
    },

    /// The event stream did not describe a well-formed tree.
    #[error("Invalid YAML structure: {message}")]
    InvalidStructure { message: String },
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        let marker = err.marker();
        Error::ParseError {
            message: err.info().to_string(),
            line: marker.line() + 1,
            col: marker.col() + 1,
        }
    }
}
