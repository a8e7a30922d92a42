/*
 * apply.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Applying patch operations by splicing text into the document.
//!
//! Each operation is planned against a fresh parse of the current text and
//! turns into a single [`Edit`]: a byte range to replace and the text to put
//! there. Everything outside that range, comments and blank lines included,
//! is left exactly as it was.

use crate::exists::{Slot, Target, resolve};
use crate::path::{APPEND_SEGMENT, parse_index};
use crate::render::{after_dash, after_key, entry_line, flow, item_line, key_text, root_body};
use crate::{PatchError, Result, Value, YamlPath};
use indexmap::IndexMap;
use lintcfg_yaml::YamlNode;
use lintcfg_yaml::scan::{line_break, line_end, line_start};
use std::fmt;

/// The kind of a patch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Add,
    Replace,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Add => f.write_str("add"),
            OperationKind::Replace => f.write_str("replace"),
        }
    }
}

/// A single patch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Insert `value` at `path`.
    ///
    /// The parent of `path` must exist. Under a mapping the last segment is
    /// the key to set; under a sequence it is an index to insert before, or
    /// `-` to append.
    Add { path: YamlPath, value: Value },
    /// Replace the existing node at `path` with `value`.
    Replace { path: YamlPath, value: Value },
}

/// An ordered list of operations, applied in sequence.
pub type Patch = Vec<Operation>;

impl Operation {
    pub fn add(path: YamlPath, value: impl Into<Value>) -> Self {
        Operation::Add {
            path,
            value: value.into(),
        }
    }

    pub fn replace(path: YamlPath, value: impl Into<Value>) -> Self {
        Operation::Replace {
            path,
            value: value.into(),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Add { .. } => OperationKind::Add,
            Operation::Replace { .. } => OperationKind::Replace,
        }
    }

    pub fn path(&self) -> &YamlPath {
        match self {
            Operation::Add { path, .. } | Operation::Replace { path, .. } => path,
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            Operation::Add { value, .. } | Operation::Replace { value, .. } => value,
        }
    }
}

/// Apply `patch` to `document`, one operation at a time.
///
/// Later operations see the result of earlier ones. An empty patch returns
/// the document unchanged.
///
/// # Errors
///
/// Returns [`PatchError::DocumentRead`] if the document (before any
/// operation) is not valid YAML, or [`PatchError::Apply`] for the first
/// operation whose target cannot be reached.
pub fn apply(document: &str, patch: &[Operation]) -> Result<String> {
    let mut current = document.to_string();
    for op in patch {
        current = apply_operation(&current, op)?;
    }
    Ok(current)
}

fn apply_operation(source: &str, op: &Operation) -> Result<String> {
    let root = lintcfg_yaml::parse(source)?;
    let editor = Editor {
        source,
        root: root.as_ref(),
    };
    let mut edit = match op {
        Operation::Add { path, value } => editor.plan_add(path, value)?,
        Operation::Replace { path, value } => {
            editor.plan_replace(path, value, OperationKind::Replace)?
        }
    };
    let terminator = line_break(source);
    if terminator != "\n" {
        edit.text = edit.text.replace('\n', terminator);
    }
    tracing::trace!(
        op = %op.kind(),
        path = %op.path(),
        start = edit.start,
        end = edit.end,
        "splicing patch operation"
    );
    Ok(edit.splice(source))
}

/// Replace `source[start..end]` with `text`.
#[derive(Debug)]
struct Edit {
    start: usize,
    end: usize,
    text: String,
}

impl Edit {
    fn insert(at: usize, text: String) -> Self {
        Edit {
            start: at,
            end: at,
            text,
        }
    }

    fn splice(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len() + self.text.len());
        out.push_str(&source[..self.start]);
        out.push_str(&self.text);
        out.push_str(&source[self.end..]);
        out
    }
}

struct Editor<'a> {
    source: &'a str,
    root: Option<&'a YamlNode>,
}

impl<'a> Editor<'a> {
    fn resolve(&self, path: &YamlPath, op: OperationKind) -> Result<Target<'a>> {
        resolve(self.root, path.segments())
            .ok_or_else(|| PatchError::apply(op, path, "no node exists at this path"))
    }

    fn plan_replace(&self, path: &YamlPath, value: &Value, op: OperationKind) -> Result<Edit> {
        let target = self.resolve(path, op)?;
        let edit = match target.slot {
            Slot::Root => self.replace_root(target.node, value),
            Slot::MapValue { parent, entry } => {
                let start = if self.source.as_bytes().get(entry.indicator) == Some(&b':') {
                    entry.indicator + 1
                } else {
                    entry.indicator
                };
                let text = if parent.is_flow() {
                    format!(" {}", flow(value))
                } else {
                    after_key(value, parent.source_info.indent())
                };
                if entry.value.is_implicit() && text.starts_with('\n') {
                    // `key: # note` keeps its comment on the key line
                    Edit::insert(line_end(self.source, start), text)
                } else {
                    Edit {
                        start,
                        end: entry.value.source_info.end_offset(),
                        text,
                    }
                }
            }
            Slot::SeqItem { parent, item } => match item.indicator {
                Some(dash) if !parent.is_flow() => Edit {
                    start: dash + 1,
                    end: item.value.source_info.end_offset(),
                    text: after_dash(value, parent.source_info.indent()),
                },
                _ => Edit {
                    start: item.value.source_info.offset,
                    end: item.value.source_info.end_offset(),
                    text: flow(value),
                },
            },
        };
        Ok(edit)
    }

    fn replace_root(&self, node: Option<&YamlNode>, value: &Value) -> Edit {
        match node {
            Some(node) if !node.is_implicit() => Edit {
                start: node.source_info.offset,
                end: node.source_info.end_offset(),
                text: root_body(value, node.source_info.indent()),
            },
            _ => {
                let mut text = String::new();
                if !self.source.is_empty() && !self.source.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str(&value.to_yaml());
                Edit::insert(self.source.len(), text)
            }
        }
    }

    fn plan_add(&self, path: &YamlPath, value: &Value) -> Result<Edit> {
        let Some((parent_path, key)) = path.split_last() else {
            return self.plan_replace(path, value, OperationKind::Add);
        };
        let parent = resolve(self.root, parent_path.segments()).ok_or_else(|| {
            PatchError::apply(OperationKind::Add, path, "parent node does not exist")
        })?;

        match parent.node {
            Some(node) if node.is_hash() => {
                if node.get_hash_entry(key).is_some() {
                    self.plan_replace(path, value, OperationKind::Add)
                } else {
                    Ok(self.insert_entry(node, key, value))
                }
            }
            Some(node) if node.is_array() => {
                let len = node.len();
                let index = if key == APPEND_SEGMENT {
                    len
                } else {
                    parse_index(key).ok_or_else(|| {
                        PatchError::apply(
                            OperationKind::Add,
                            path,
                            format!("{key:?} is not a sequence index"),
                        )
                    })?
                };
                if index > len {
                    return Err(PatchError::apply(
                        OperationKind::Add,
                        path,
                        format!("index {index} is out of bounds for a sequence of length {len}"),
                    ));
                }
                Ok(self.insert_item(node, index, value))
            }
            Some(node) if !node.is_null() => Err(PatchError::apply(
                OperationKind::Add,
                path,
                "parent node is a scalar",
            )),
            // A null (or absent) parent becomes a container holding the value.
            _ => {
                let container = if key == APPEND_SEGMENT {
                    Value::Sequence(vec![value.clone()])
                } else {
                    let mut map = IndexMap::with_capacity(1);
                    map.insert(key.to_string(), value.clone());
                    Value::Mapping(map)
                };
                self.plan_replace(&parent_path, &container, OperationKind::Add)
            }
        }
    }

    fn insert_entry(&self, node: &YamlNode, key: &str, value: &Value) -> Edit {
        if node.is_flow() {
            let entry = format!("{}: {}", key_text(key, true), flow(value));
            return match node.as_hash().and_then(|entries| entries.last()) {
                Some(last) => Edit::insert(last.value.source_info.end_offset(), format!(", {entry}")),
                None => Edit::insert(node.source_info.end_offset().saturating_sub(1), entry),
            };
        }
        let indent = node.source_info.indent();
        let at = line_end(self.source, node.source_info.end_offset());
        Edit::insert(at, format!("\n{}", entry_line(key, value, indent)))
    }

    fn insert_item(&self, node: &YamlNode, index: usize, value: &Value) -> Edit {
        let items = node.as_array().unwrap_or_default();
        if node.is_flow() {
            return match items.get(index) {
                Some(item) => Edit::insert(item.value.source_info.offset, format!("{}, ", flow(value))),
                None => match items.last() {
                    Some(last) => Edit::insert(
                        last.value.source_info.end_offset(),
                        format!(", {}", flow(value)),
                    ),
                    None => Edit::insert(node.source_info.end_offset().saturating_sub(1), flow(value)),
                },
            };
        }

        let indent = node.source_info.indent();
        match items.get(index) {
            None => {
                let at = line_end(self.source, node.source_info.end_offset());
                Edit::insert(at, format!("\n{}", item_line(value, indent)))
            }
            Some(item) => {
                let dash = item.indicator.unwrap_or(item.value.source_info.offset);
                let start = line_start(self.source, dash);
                if self.source[start..dash].trim().is_empty() {
                    Edit::insert(start, format!("{}\n", item_line(value, indent)))
                } else {
                    // The item shares its line with an outer indicator (`- - a`).
                    Edit::insert(
                        dash,
                        format!("-{}\n{}", after_dash(value, indent), " ".repeat(indent)),
                    )
                }
            }
        }
    }
}
