/*
 * types.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The override configuration a user supplies on top of a base config.
//!
//! Field names follow the linter's own configuration file, so an override is
//! written exactly like the matching subset of that file:
//!
//! ```yaml
//! linters:
//!   enable: [copyloopvar]
//!   settings:
//!     errcheck:
//!       check-blank: true
//!   exclusions:
//!     rules:
//!       - path: _test\.go
//!         linters: [errcheck]
//!     paths-except: [lib/keep.go]
//! ```

use crate::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;

/// Override configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OverrideConfig {
    pub linters: LintersConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LintersConfig {
    /// Linters appended to `linters.enable`.
    pub enable: Vec<String>,
    /// Linters appended to `linters.disable`.
    pub disable: Vec<String>,
    /// Per-linter settings merged into `linters.settings`, one key per linter.
    pub settings: serde_yaml::Mapping,
    pub exclusions: ExclusionsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExclusionsConfig {
    pub rules: Vec<ExclusionRule>,
    pub paths: Vec<String>,
    pub paths_except: Vec<String>,
}

/// A single `linters.exclusions.rules` entry. Empty fields are omitted when
/// the rule is written into a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExclusionRule {
    pub linters: Vec<String>,
    pub path: String,
    pub path_except: String,
    pub text: String,
    pub source: String,
}

impl OverrideConfig {
    /// Parse an override configuration from YAML text.
    ///
    /// An empty document (or one holding only comments or `null`) is the
    /// empty override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid YAML or does
    /// not have the shape of an override configuration.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }

    /// Read and parse an override configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] as for [`OverrideConfig::from_yaml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check if merging this override would change nothing beyond the
    /// version default.
    pub fn is_empty(&self) -> bool {
        let linters = &self.linters;
        linters.enable.is_empty()
            && linters.disable.is_empty()
            && linters.settings.is_empty()
            && linters.exclusions.rules.is_empty()
            && linters.exclusions.paths.is_empty()
            && linters.exclusions.paths_except.is_empty()
    }
}
