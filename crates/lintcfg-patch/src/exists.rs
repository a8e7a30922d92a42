/*
 * exists.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Resolving structured paths against a parsed document.

use crate::path::parse_index;
use crate::{Result, YamlPath};
use lintcfg_yaml::{YamlArrayItem, YamlHashEntry, YamlNode};

/// Where a resolved node sits in its parent.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Slot<'a> {
    Root,
    MapValue {
        parent: &'a YamlNode,
        entry: &'a YamlHashEntry,
    },
    SeqItem {
        parent: &'a YamlNode,
        item: &'a YamlArrayItem,
    },
}

/// A node found by [`resolve`]. `node` is `None` only for the root of an
/// empty document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Target<'a> {
    pub node: Option<&'a YamlNode>,
    pub slot: Slot<'a>,
}

/// Walk `segments` down from `root`.
///
/// A segment selects a mapping key by exact match or a sequence item by
/// decimal index. Returns `None` as soon as a segment cannot be followed,
/// including descending into a scalar.
pub(crate) fn resolve<'a>(root: Option<&'a YamlNode>, segments: &[String]) -> Option<Target<'a>> {
    let mut target = Target {
        node: root,
        slot: Slot::Root,
    };
    for segment in segments {
        let node = target.node?;
        target = if node.is_hash() {
            let entry = node.get_hash_entry(segment)?;
            Target {
                node: Some(&entry.value),
                slot: Slot::MapValue {
                    parent: node,
                    entry,
                },
            }
        } else if node.is_array() {
            let item = node.get_array_item(parse_index(segment)?)?;
            Target {
                node: Some(&item.value),
                slot: Slot::SeqItem { parent: node, item },
            }
        } else {
            return None;
        };
    }
    Some(target)
}

/// Check whether `path` addresses a node in an already parsed document.
pub(crate) fn exists_in(root: Option<&YamlNode>, path: &YamlPath) -> bool {
    resolve(root, path.segments()).is_some()
}

/// Report whether `path` addresses an existing node of `document`.
///
/// The root path always exists, even in an empty document.
///
/// # Errors
///
/// Returns [`crate::PatchError::DocumentRead`] if `document` is not valid YAML.
pub fn node_exists(document: &str, path: &YamlPath) -> Result<bool> {
    let root = lintcfg_yaml::parse(document)?;
    Ok(exists_in(root.as_ref(), path))
}

/// Like [`node_exists`], taking the path as a string.
///
/// # Errors
///
/// Returns [`crate::PatchError::PathParse`] for a malformed path, or
/// [`crate::PatchError::DocumentRead`] if `document` is not valid YAML.
pub fn path_exists(document: &str, path: &str) -> Result<bool> {
    node_exists(document, &YamlPath::parse(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatchError;

    const DOC: &str = "\
version: \"2\"
linters:
  enable:
    - errcheck
  settings:
    gocritic:
  exclusions:
    rules:
      - path: _test\\.go
        linters: [gocritic]
";

    #[test]
    fn test_existing_paths() {
        for path in [
            "/",
            "/version",
            "/linters/enable/0",
            "/linters/settings/gocritic",
            "/linters/exclusions/rules/0/linters/0",
        ] {
            assert!(path_exists(DOC, path).unwrap(), "{path} should exist");
        }
    }

    #[test]
    fn test_missing_paths() {
        for path in [
            "/formatters",
            "/linters/enable/1",
            "/linters/enable/-",
            "/linters/enable/01",
            "/version/child",
            "/linters/settings/gocritic/disabled-checks",
        ] {
            assert!(!path_exists(DOC, path).unwrap(), "{path} should not exist");
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(path_exists("", "/").unwrap());
        assert!(!path_exists("", "/version").unwrap());
        assert!(!path_exists("# only a comment\n", "/linters").unwrap());
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            path_exists(DOC, "version"),
            Err(PatchError::PathParse { .. })
        ));
        assert!(matches!(
            path_exists("a: [1, 2", "/a"),
            Err(PatchError::DocumentRead(_))
        ));
    }
}
