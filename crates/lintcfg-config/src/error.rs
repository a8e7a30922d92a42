/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

use lintcfg_patch::{PatchError, YamlPath};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading or merging configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The override configuration is not valid YAML or has the wrong shape.
    #[error("failed to parse override configuration")]
    Parse(#[from] serde_yaml::Error),

    /// The override configuration file could not be read.
    #[error("failed to read override configuration file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A settings mapping has a key that is not a string.
    #[error("mapping key {key} at {path} is not a string")]
    InvalidKey {
        /// Location of the mapping holding the key
        path: YamlPath,
        /// The key, rendered as YAML
        key: String,
    },

    /// The base document is not valid YAML.
    #[error("failed to read base configuration document")]
    DocumentRead(#[source] lintcfg_yaml::Error),

    /// Checking for or adding the `version` key failed.
    #[error("failed to set default version in config")]
    Version(#[source] PatchError),

    /// A merge step failed to build or apply its patch.
    #[error("failed to apply patch for {path}")]
    Step {
        path: YamlPath,
        #[source]
        source: PatchError,
    },

    /// One phase of a two-phase merge failed.
    #[error("{phase}")]
    Phase {
        phase: Phase,
        #[source]
        source: Box<ConfigError>,
    },
}

/// The phases of [`crate::merge_default_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ExcludeMatchers,
    Override,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::ExcludeMatchers => {
                f.write_str("failed to create default config with exclude matchers")
            }
            Phase::Override => {
                f.write_str("failed to merge override configuration with default config")
            }
        }
    }
}

impl ConfigError {
    pub(crate) fn in_phase(self, phase: Phase) -> Self {
        ConfigError::Phase {
            phase,
            source: Box::new(self),
        }
    }
}
