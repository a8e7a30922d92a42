/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! YAML node tree with exact source spans.

use crate::SourceInfo;
use yaml_rust2::Yaml;

/// How a collection is written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStyle {
    /// Indentation-based (`key: value` lines, `- item` lines).
    Block,
    /// Bracketed (`{a: 1}`, `[a, b]`).
    Flow,
}

/// How a scalar is written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
    /// An implicit null: `key:` with nothing after the indicator.
    Empty,
    /// An alias (`*anchor`); the referenced value is not resolved.
    Alias,
}

/// A parsed YAML node with its location in the source text.
///
/// The node is a read-only view: `source_info` spans from the first byte of
/// the node's content to the end of its content, excluding trailing blank
/// lines and comments. This is the region an in-place edit replaces.
///
/// ## Example
///
/// ```rust
/// use lintcfg_yaml::parse;
///
/// let source = "linters:\n  enable:\n    - errcheck\n";
/// let root = parse(source).unwrap().unwrap();
/// let enable = root.get_hash_value("linters").unwrap().get_hash_value("enable").unwrap();
/// assert_eq!(enable.text(source), "- errcheck");
/// ```
#[derive(Debug, Clone)]
pub struct YamlNode {
    /// Source location for this node.
    pub source_info: SourceInfo,

    children: Children,
}

#[derive(Debug, Clone)]
enum Children {
    Scalar {
        /// Scalar value as reported by the parser, before type inference.
        raw: String,
        yaml: Yaml,
        style: ScalarStyle,
    },
    Array {
        style: CollectionStyle,
        items: Vec<YamlArrayItem>,
    },
    Hash {
        style: CollectionStyle,
        entries: Vec<YamlHashEntry>,
    },
}

/// A key-value pair in a YAML mapping.
#[derive(Debug, Clone)]
pub struct YamlHashEntry {
    pub key: YamlNode,
    pub value: YamlNode,
    /// Byte offset of the `:` indicator, or of the key's end when the
    /// entry has no indicator.
    pub indicator: usize,
}

/// An item of a YAML sequence.
#[derive(Debug, Clone)]
pub struct YamlArrayItem {
    pub value: YamlNode,
    /// Byte offset of the `-` indicator (block sequences only).
    pub indicator: Option<usize>,
}

impl YamlNode {
    /// Create a scalar node.
    pub fn new_scalar(raw: String, yaml: Yaml, style: ScalarStyle, source_info: SourceInfo) -> Self {
        Self {
            source_info,
            children: Children::Scalar { raw, yaml, style },
        }
    }

    /// Create an implicit null occupying no source text.
    pub fn new_empty(source_info: SourceInfo) -> Self {
        Self::new_scalar(String::new(), Yaml::Null, ScalarStyle::Empty, source_info)
    }

    /// Create a sequence node.
    pub fn new_array(style: CollectionStyle, items: Vec<YamlArrayItem>, source_info: SourceInfo) -> Self {
        Self {
            source_info,
            children: Children::Array { style, items },
        }
    }

    /// Create a mapping node.
    pub fn new_hash(style: CollectionStyle, entries: Vec<YamlHashEntry>, source_info: SourceInfo) -> Self {
        Self {
            source_info,
            children: Children::Hash { style, entries },
        }
    }

    /// Check if this is a scalar value (not array or hash).
    pub fn is_scalar(&self) -> bool {
        matches!(self.children, Children::Scalar { .. })
    }

    /// Check if this is an array.
    pub fn is_array(&self) -> bool {
        matches!(self.children, Children::Array { .. })
    }

    /// Check if this is a hash.
    pub fn is_hash(&self) -> bool {
        matches!(self.children, Children::Hash { .. })
    }

    /// Check if this is a null scalar, explicit (`~`, `null`) or implicit.
    pub fn is_null(&self) -> bool {
        match &self.children {
            Children::Scalar { yaml, style, .. } => {
                *style == ScalarStyle::Empty
                    || (*style == ScalarStyle::Plain && matches!(yaml, Yaml::Null))
            }
            _ => false,
        }
    }

    /// Check if this node occupies no source text.
    pub fn is_implicit(&self) -> bool {
        matches!(
            self.children,
            Children::Scalar {
                style: ScalarStyle::Empty,
                ..
            }
        )
    }

    /// Style of a collection node, `None` for scalars.
    pub fn collection_style(&self) -> Option<CollectionStyle> {
        match &self.children {
            Children::Array { style, .. } | Children::Hash { style, .. } => Some(*style),
            Children::Scalar { .. } => None,
        }
    }

    /// Check if this node is a flow collection.
    pub fn is_flow(&self) -> bool {
        self.collection_style() == Some(CollectionStyle::Flow)
    }

    /// Style of a scalar node, `None` for collections.
    pub fn scalar_style(&self) -> Option<ScalarStyle> {
        match &self.children {
            Children::Scalar { style, .. } => Some(*style),
            _ => None,
        }
    }

    /// Raw scalar text as reported by the parser.
    pub fn as_str(&self) -> Option<&str> {
        match &self.children {
            Children::Scalar { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Typed scalar value.
    pub fn as_yaml(&self) -> Option<&Yaml> {
        match &self.children {
            Children::Scalar { yaml, .. } => Some(yaml),
            _ => None,
        }
    }

    /// Get array items if this is an array.
    pub fn as_array(&self) -> Option<&[YamlArrayItem]> {
        match &self.children {
            Children::Array { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Get hash entries if this is a hash.
    pub fn as_hash(&self) -> Option<&[YamlHashEntry]> {
        match &self.children {
            Children::Hash { entries, .. } => Some(entries),
            _ => None,
        }
    }

    /// Find a hash entry by key, comparing raw key text.
    pub fn get_hash_entry(&self, key: &str) -> Option<&YamlHashEntry> {
        self.as_hash()?
            .iter()
            .find(|entry| entry.key.as_str() == Some(key))
    }

    /// Get a value from a hash by key.
    pub fn get_hash_value(&self, key: &str) -> Option<&YamlNode> {
        self.get_hash_entry(key).map(|entry| &entry.value)
    }

    /// Get an array item by index.
    pub fn get_array_item(&self, index: usize) -> Option<&YamlArrayItem> {
        self.as_array()?.get(index)
    }

    /// Get the number of children (array length or hash entry count).
    pub fn len(&self) -> usize {
        match &self.children {
            Children::Scalar { .. } => 0,
            Children::Array { items, .. } => items.len(),
            Children::Hash { entries, .. } => entries.len(),
        }
    }

    /// Check if this node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The source text covered by this node.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.source_info.offset..self.source_info.end_offset()]
    }
}
