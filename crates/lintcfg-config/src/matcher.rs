/*
 * matcher.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Lowering of name and path exclusion matchers to exclusion regexes.

use crate::{ExclusionsConfig, LintersConfig, OverrideConfig};

/// Files to exclude, by base name or by path relative to the project root.
///
/// Entries are regular expression fragments and are embedded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamesPaths {
    pub names: Vec<String>,
    pub paths: Vec<String>,
}

impl NamesPaths {
    pub fn new(names: Vec<String>, paths: Vec<String>) -> Self {
        Self { names, paths }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.paths.is_empty()
    }

    /// The exclusion path regexes for these matchers.
    ///
    /// Each name matches a file of that name in any directory (`.+/{name}$`)
    /// or at the top level (`^{name}$`). Each path matches anything below it
    /// (`{path}/.*`) or the path itself (`^{path}$`). Names come first, then
    /// paths, each in input order.
    pub fn exclusion_paths(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.names.len() * 2 + self.paths.len() * 2);
        for name in &self.names {
            out.push(format!(".+/{name}$"));
            out.push(format!("^{name}$"));
        }
        for path in &self.paths {
            out.push(format!("{path}/.*"));
            out.push(format!("^{path}$"));
        }
        out
    }

    /// An override that only adds the exclusion paths for these matchers,
    /// or `None` when there are no matchers.
    pub fn to_override(&self) -> Option<OverrideConfig> {
        if self.is_empty() {
            return None;
        }
        Some(OverrideConfig {
            linters: LintersConfig {
                exclusions: ExclusionsConfig {
                    paths: self.exclusion_paths(),
                    ..Default::default()
                },
                ..Default::default()
            },
        })
    }
}
