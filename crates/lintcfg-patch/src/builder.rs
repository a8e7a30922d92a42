/*
 * builder.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Building patches that append to sequences and merge into mappings.
//!
//! Both builders look at the current document first. When the target node
//! exists they emit fine-grained operations against it; when it does not,
//! they emit a single `Add` at the deepest existing ancestor carrying the
//! whole missing subtree (see [`synthesize`]).

use crate::apply::{Operation, Patch, apply};
use crate::exists::exists_in;
use crate::{PatchError, Result, Value, YamlPath};
use indexmap::IndexMap;
use lintcfg_yaml::YamlNode;

/// Build the operations that append `items`, in order, to the sequence at
/// `path`.
///
/// An empty `items` yields an empty patch. If nothing exists at `path` yet,
/// the whole sequence is created in one operation.
///
/// # Errors
///
/// Returns [`PatchError::RootTarget`] for the root path and
/// [`PatchError::DocumentRead`] if `document` is not valid YAML.
pub fn list_append_patch(document: &str, path: &YamlPath, items: &[Value]) -> Result<Patch> {
    if items.is_empty() {
        return Ok(Patch::new());
    }
    let root = lintcfg_yaml::parse(document)?;
    let root = root.as_ref();

    let sequence = Value::Sequence(items.to_vec());
    if let Some(op) = synthesize_in(root, path, &sequence)? {
        return Ok(vec![op]);
    }

    let target = path.append_target();
    Ok(items
        .iter()
        .map(|item| Operation::add(target.clone(), item.clone()))
        .collect())
}

/// Build the operations that merge `entries` into the mapping at `path`.
///
/// Existing keys are replaced, other keys are added, and keys of the mapping
/// that are not in `entries` are left alone. The merge is shallow: a nested
/// mapping in `entries` replaces the existing value wholesale.
///
/// # Errors
///
/// Returns [`PatchError::RootTarget`] for the root path and
/// [`PatchError::DocumentRead`] if `document` is not valid YAML.
pub fn map_merge_patch(
    document: &str,
    path: &YamlPath,
    entries: &IndexMap<String, Value>,
) -> Result<Patch> {
    if entries.is_empty() {
        return Ok(Patch::new());
    }
    let root = lintcfg_yaml::parse(document)?;
    let root = root.as_ref();

    let mapping = Value::Mapping(entries.clone());
    if let Some(op) = synthesize_in(root, path, &mapping)? {
        return Ok(vec![op]);
    }

    Ok(entries
        .iter()
        .map(|(key, value)| {
            let child = path.child(key.as_str());
            if exists_in(root, &child) {
                Operation::replace(child, value.clone())
            } else {
                Operation::add(child, value.clone())
            }
        })
        .collect())
}

/// Build the single `Add` that creates `path` with `value` at its end.
///
/// Finds the shortest prefix of `path` that does not exist and targets it,
/// wrapping `value` in one single-key mapping per remaining segment. Returns
/// `None` when `path` already exists.
///
/// # Errors
///
/// Returns [`PatchError::RootTarget`] for the root path and
/// [`PatchError::DocumentRead`] if `document` is not valid YAML.
pub fn synthesize(document: &str, path: &YamlPath, value: &Value) -> Result<Option<Operation>> {
    let root = lintcfg_yaml::parse(document)?;
    synthesize_in(root.as_ref(), path, value)
}

fn synthesize_in(root: Option<&YamlNode>, path: &YamlPath, value: &Value) -> Result<Option<Operation>> {
    if path.is_root() {
        return Err(PatchError::RootTarget { path: path.clone() });
    }

    let missing = (1..=path.len()).find(|&len| {
        let exists = exists_in(root, &path.prefix(len));
        tracing::trace!(path = %path.prefix(len), exists, "probing path prefix");
        !exists
    });
    let Some(len) = missing else {
        return Ok(None);
    };

    let value = Value::nested(path.segments()[len..].iter().cloned(), value.clone());
    let target = path.prefix(len);
    tracing::debug!(path = %path, target = %target, "creating missing path");
    Ok(Some(Operation::Add {
        path: target,
        value,
    }))
}

/// Append `items` to the sequence at `path` and return the new document.
///
/// # Errors
///
/// Fails like [`list_append_patch`] and [`apply`].
pub fn append_to_sequence(document: &str, path: &YamlPath, items: &[Value]) -> Result<String> {
    let patch = list_append_patch(document, path, items)?;
    apply(document, &patch)
}

/// Merge `entries` into the mapping at `path` and return the new document.
///
/// # Errors
///
/// Fails like [`map_merge_patch`] and [`apply`].
pub fn merge_into_mapping(
    document: &str,
    path: &YamlPath,
    entries: &IndexMap<String, Value>,
) -> Result<String> {
    let patch = map_merge_patch(document, path, entries)?;
    apply(document, &patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> YamlPath {
        YamlPath::parse(s).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::string(*s)).collect()
    }

    #[test]
    fn test_list_append_existing_sequence() {
        let doc = "linters:\n  enable:\n    - errcheck\n";
        let patch = list_append_patch(doc, &path("/linters/enable"), &strings(&["a", "b"])).unwrap();
        assert_eq!(
            patch,
            vec![
                Operation::add(path("/linters/enable/-"), "a"),
                Operation::add(path("/linters/enable/-"), "b"),
            ]
        );
    }

    #[test]
    fn test_list_append_synthesizes_missing_path() {
        let doc = "version: \"2\"\n";
        let patch =
            list_append_patch(doc, &path("/linters/exclusions/paths"), &strings(&["a"])).unwrap();
        let expected = Value::mapping([(
            "exclusions",
            Value::mapping([("paths", Value::sequence(["a"]))]),
        )]);
        assert_eq!(patch, vec![Operation::add(path("/linters"), expected)]);
    }

    #[test]
    fn test_list_append_empty_is_noop() {
        let patch = list_append_patch("a: 1\n", &path("/"), &[]).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_root_target_rejected() {
        let err = list_append_patch("a: 1\n", &path("/"), &strings(&["x"])).unwrap_err();
        assert!(matches!(err, PatchError::RootTarget { .. }));
        let err = synthesize("a: 1\n", &YamlPath::root(), &Value::null()).unwrap_err();
        assert!(matches!(err, PatchError::RootTarget { .. }));
    }

    #[test]
    fn test_map_merge_existing_mapping() {
        let doc = "settings:\n  a: 1\n  b: 2\n";
        let entries: IndexMap<String, Value> =
            [("b".to_string(), Value::from(3i64)), ("c".to_string(), Value::from(4i64))]
                .into_iter()
                .collect();
        let patch = map_merge_patch(doc, &path("/settings"), &entries).unwrap();
        assert_eq!(
            patch,
            vec![
                Operation::replace(path("/settings/b"), 3i64),
                Operation::add(path("/settings/c"), 4i64),
            ]
        );
        assert_eq!(
            apply(doc, &patch).unwrap(),
            "settings:\n  a: 1\n  b: 3\n  c: 4\n"
        );
    }

    #[test]
    fn test_map_merge_missing_parent() {
        let doc = "linters:\n  default: none\n";
        let entries: IndexMap<String, Value> =
            [("errcheck".to_string(), Value::mapping([("check-blank", true)]))]
                .into_iter()
                .collect();
        let patch = map_merge_patch(doc, &path("/linters/settings"), &entries).unwrap();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch[0].path(), &path("/linters/settings"));

        insta::assert_snapshot!(apply(doc, &patch).unwrap(), @r"
        linters:
          default: none
          settings:
            errcheck:
              check-blank: true
        ");
    }

    #[test]
    fn test_synthesize_existing_path() {
        let doc = "a:\n  b: 1\n";
        assert_eq!(synthesize(doc, &path("/a/b"), &Value::null()).unwrap(), None);
    }

    #[test]
    fn test_synthesize_deep_path_from_root() {
        let doc = "other: true # untouched\n";
        let target = path("/a/b/c");
        let op = synthesize(doc, &target, &Value::from(1i64)).unwrap().unwrap();
        assert_eq!(op.path(), &path("/a"));

        let merged = apply(doc, &[op]).unwrap();
        assert_eq!(merged, "other: true # untouched\na:\n  b:\n    c: 1\n");
        assert!(crate::node_exists(&merged, &target).unwrap());
    }

    #[test]
    fn test_append_to_null_sequence() {
        let doc = "linters:\n  enable:\n";
        let merged = append_to_sequence(doc, &path("/linters/enable"), &strings(&["a", "b"])).unwrap();
        assert_eq!(merged, "linters:\n  enable:\n    - a\n    - b\n");
    }

    #[test]
    fn test_merge_into_mapping_keeps_base_keys() {
        let doc = "s:\n  keep: 1 # comment\n  change: old\n";
        let entries: IndexMap<String, Value> = [("change".to_string(), Value::string("new"))]
            .into_iter()
            .collect();
        let merged = merge_into_mapping(doc, &path("/s"), &entries).unwrap();
        assert_eq!(merged, "s:\n  keep: 1 # comment\n  change: new\n");
    }
}
