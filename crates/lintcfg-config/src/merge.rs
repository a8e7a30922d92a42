/*
 * merge.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Merging an override configuration into a base document.
//!
//! A merge always starts by making sure the document declares a `version`.
//! Then each override field is merged by its own step, in a fixed order,
//! each step working on the output of the one before:
//!
//! 1. `linters.enable` (append)
//! 2. `linters.disable` (append)
//! 3. `linters.settings` (shallow key merge)
//! 4. `linters.exclusions.rules` (append)
//! 5. `linters.exclusions.paths` (append)
//! 6. `linters.exclusions.paths-except` (append)
//!
//! Steps with nothing to merge leave the document untouched.

use crate::convert::mapping_from_yaml;
use crate::error::Phase;
use crate::{ConfigError, NamesPaths, OverrideConfig, Result};
use indexmap::IndexMap;
use lintcfg_patch::{
    Operation, Patch, PatchError, Value, YamlPath, apply, list_append_patch, map_merge_patch,
    node_exists,
};

/// Value written when a document has no `version` key.
pub const DEFAULT_VERSION: &str = "2";

enum Change {
    Append(Vec<Value>),
    Merge(IndexMap<String, Value>),
}

struct Step {
    path: YamlPath,
    change: Change,
}

impl Step {
    fn append(segments: &[&str], items: Vec<Value>) -> Self {
        Step {
            path: YamlPath::from_segments(segments.iter().copied()),
            change: Change::Append(items),
        }
    }

    fn build(&self, document: &str) -> lintcfg_patch::Result<Patch> {
        match &self.change {
            Change::Append(items) => list_append_patch(document, &self.path, items),
            Change::Merge(entries) => map_merge_patch(document, &self.path, entries),
        }
    }

    fn run(&self, document: &str) -> Result<String> {
        let wrap = |source: PatchError| ConfigError::Step {
            path: self.path.clone(),
            source,
        };
        let patch = self.build(document).map_err(wrap)?;
        if patch.is_empty() {
            return Ok(document.to_string());
        }
        tracing::debug!(path = %self.path, operations = patch.len(), "applying merge step");
        apply(document, &patch).map_err(wrap)
    }
}

fn strings(items: &[String]) -> Vec<Value> {
    items.iter().map(|s| Value::string(s.as_str())).collect()
}

/// The six merge steps for `config`, in order.
///
/// Settings are converted up front so an invalid key fails the merge before
/// any step runs.
fn steps(config: &OverrideConfig) -> Result<Vec<Step>> {
    let linters = &config.linters;
    let settings_path = YamlPath::from_segments(["linters", "settings"]);
    let settings = mapping_from_yaml(&linters.settings, &settings_path)?;

    Ok(vec![
        Step::append(&["linters", "enable"], strings(&linters.enable)),
        Step::append(&["linters", "disable"], strings(&linters.disable)),
        Step {
            path: settings_path,
            change: Change::Merge(settings),
        },
        Step::append(
            &["linters", "exclusions", "rules"],
            linters.exclusions.rules.iter().map(Value::from).collect(),
        ),
        Step::append(
            &["linters", "exclusions", "paths"],
            strings(&linters.exclusions.paths),
        ),
        Step::append(
            &["linters", "exclusions", "paths-except"],
            strings(&linters.exclusions.paths_except),
        ),
    ])
}

/// Add `version: "2"` at the root if the document has no `version` key.
///
/// # Errors
///
/// Returns [`ConfigError::DocumentRead`] if the document is not valid YAML
/// and [`ConfigError::Version`] if the version cannot be added to it.
pub fn default_version(document: &str) -> Result<String> {
    lintcfg_yaml::parse(document).map_err(ConfigError::DocumentRead)?;
    let path = YamlPath::from_segments(["version"]);
    if node_exists(document, &path).map_err(ConfigError::Version)? {
        return Ok(document.to_string());
    }
    tracing::debug!(version = DEFAULT_VERSION, "adding default version");
    apply(document, &[Operation::add(path, DEFAULT_VERSION)]).map_err(ConfigError::Version)
}

/// Merge `config` into the `base` document.
///
/// Without an override only the version default is applied. Lists are
/// appended to, never reordered or pruned, and settings replace only the
/// top-level keys they name.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidKey`] for a non-string settings key,
/// [`ConfigError::DocumentRead`] if `base` is not valid YAML, and
/// [`ConfigError::Step`] for the first step that fails. No partial result
/// is returned.
pub fn merge_config(base: &str, config: Option<&OverrideConfig>) -> Result<String> {
    let steps = config.map(steps).transpose()?.unwrap_or_default();

    let mut merged = default_version(base)?;
    for step in &steps {
        merged = step.run(&merged)?;
    }
    Ok(merged)
}

/// Merge the exclusion paths for `matchers` into the `base` document.
///
/// # Errors
///
/// Fails like [`merge_config`].
pub fn merge_exclude_matchers(base: &str, matchers: &NamesPaths) -> Result<String> {
    merge_config(base, matchers.to_override().as_ref())
}

/// Merge `matchers`, then `config`, into the `base` document.
///
/// # Errors
///
/// Returns [`ConfigError::Phase`] wrapping the error of the phase that
/// failed.
pub fn merge_default_config(
    base: &str,
    matchers: &NamesPaths,
    config: Option<&OverrideConfig>,
) -> Result<String> {
    let defaults =
        merge_exclude_matchers(base, matchers).map_err(|e| e.in_phase(Phase::ExcludeMatchers))?;
    merge_config(&defaults, config).map_err(|e| e.in_phase(Phase::Override))
}
