/*
 * source_info.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Source location information for YAML nodes.

use serde::{Deserialize, Serialize};

/// Source location of a YAML node.
///
/// `offset` and `len` are measured in bytes of the UTF-8 source, so a node's
/// text is always `&source[info.offset..info.end_offset()]`. `line` and `col`
/// are 1-based, with `col` counted in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Byte offset from start of source (0-based)
    pub offset: usize,

    /// Line number (1-based)
    pub line: usize,

    /// Column number (1-based, in characters not bytes)
    pub col: usize,

    /// Length in bytes
    pub len: usize,
}

impl SourceInfo {
    /// Create a new SourceInfo with all fields specified.
    pub fn new(offset: usize, line: usize, col: usize, len: usize) -> Self {
        Self {
            offset,
            line,
            col,
            len,
        }
    }

    /// Create an empty location at `offset`.
    pub fn empty_at(offset: usize, line: usize, col: usize) -> Self {
        Self::new(offset, line, col, 0)
    }

    /// Get the end offset (exclusive) of this location.
    pub fn end_offset(&self) -> usize {
        self.offset + self.len
    }

    /// Number of columns to the left of this location.
    pub fn indent(&self) -> usize {
        self.col.saturating_sub(1)
    }

    /// Return a copy of this location ending at `end` (exclusive).
    pub fn with_end(&self, end: usize) -> Self {
        Self {
            len: end.saturating_sub(self.offset),
            ..self.clone()
        }
    }
}

impl Default for SourceInfo {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            col: 1,
            len: 0,
        }
    }
}
