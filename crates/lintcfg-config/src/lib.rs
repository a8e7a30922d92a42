//! # lintcfg-config
//!
//! Merges a user's linter override configuration into a base YAML
//! configuration without disturbing the base's layout.
//!
//! The override is a small, typed subset of the linter's configuration file
//! ([`OverrideConfig`]). Merging appends to the base's lists, adds or
//! replaces settings keys, and creates whatever part of the path is missing.
//! Everything the override does not touch, comments included, is carried over
//! byte for byte.
//!
//! ## Example
//!
//! ```rust
//! use lintcfg_config::{OverrideConfig, merge_config};
//!
//! let base = "version: \"2\"\nlinters:\n  default: none # strict\n";
//! let config = OverrideConfig::from_yaml_str("linters:\n  enable: [copyloopvar]\n").unwrap();
//!
//! let merged = merge_config(base, Some(&config)).unwrap();
//! assert_eq!(
//!     merged,
//!     "version: \"2\"\nlinters:\n  default: none # strict\n  enable:\n    - copyloopvar\n"
//! );
//! ```

pub mod convert;
mod error;
mod matcher;
mod merge;
mod types;

pub use error::{ConfigError, Phase, Result};
pub use matcher::NamesPaths;
pub use merge::{
    DEFAULT_VERSION, default_version, merge_config, merge_default_config, merge_exclude_matchers,
};
pub use types::{ExclusionRule, ExclusionsConfig, LintersConfig, OverrideConfig};
