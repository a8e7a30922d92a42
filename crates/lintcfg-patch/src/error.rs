/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Errors produced while building or applying patches.

use crate::YamlPath;
use crate::apply::OperationKind;
use thiserror::Error;

/// Result type alias for lintcfg-patch operations.
pub type Result<T> = std::result::Result<T, PatchError>;

/// Errors that can occur while addressing, building, or applying patches.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatchError {
    /// A structured path string is malformed.
    #[error("failed to parse YAML path {path:?}: {reason}")]
    PathParse {
        /// The offending path string
        path: String,
        reason: String,
    },

    /// The document being patched is not valid YAML.
    #[error("failed to read YAML document")]
    DocumentRead(#[from] lintcfg_yaml::Error),

    /// An operation could not be applied to the document.
    ///
    /// Builders never emit operations that trigger this for well-formed
    /// input, so seeing it usually means an operation was hand-written or the
    /// document changed shape between building and applying.
    #[error("failed to apply {op} operation at {path}: {reason}")]
    Apply {
        op: OperationKind,
        path: YamlPath,
        reason: String,
    },

    /// A builder was asked to target the document root.
    #[error("YAML path must have at least one segment after the root, but was {path}")]
    RootTarget { path: YamlPath },
}

impl PatchError {
    pub(crate) fn apply(op: OperationKind, path: &YamlPath, reason: impl Into<String>) -> Self {
        PatchError::Apply {
            op,
            path: path.clone(),
            reason: reason.into(),
        }
    }
}
