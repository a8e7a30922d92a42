/*
 * path.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Structured addressing of nodes within a YAML document.
//!
//! Paths use the JSON Pointer syntax: `/` is the root, `/linters/enable`
//! addresses the `enable` key of the root's `linters` mapping, and a segment
//! inside a sequence is a decimal index. The segment `-` addresses the
//! position after the last item of a sequence. Within a segment, `~0` stands
//! for `~` and `~1` for `/`.

use crate::{PatchError, Result};
use std::fmt;
use std::str::FromStr;

/// Segment that addresses the end of a sequence.
pub const APPEND_SEGMENT: &str = "-";

/// A parsed structured path. The empty path is the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct YamlPath {
    segments: Vec<String>,
}

impl YamlPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from unescaped segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a `/`-delimited path string.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::PathParse`] if the string does not start with
    /// `/` or contains a `~` that is not followed by `0` or `1`.
    pub fn parse(input: &str) -> Result<Self> {
        let rest = input.strip_prefix('/').ok_or_else(|| PatchError::PathParse {
            path: input.to_string(),
            reason: "path must start with '/'".into(),
        })?;
        if rest.is_empty() {
            return Ok(Self::root());
        }

        let segments = rest
            .split('/')
            .map(|segment| unescape(segment).ok_or_else(|| PatchError::PathParse {
                path: input.to_string(),
                reason: format!("invalid escape sequence in segment {segment:?}"),
            }))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path of a child of this node.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Path addressing the end of the sequence at this path.
    pub fn append_target(&self) -> Self {
        self.child(APPEND_SEGMENT)
    }

    /// The first `len` segments of this path.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }

    /// Split into the parent path and the last segment. `None` for the root.
    pub fn split_last(&self) -> Option<(Self, &str)> {
        let (last, parent) = self.segments.split_last()?;
        Some((
            Self {
                segments: parent.to_vec(),
            },
            last.as_str(),
        ))
    }
}

fn unescape(segment: &str) -> Option<String> {
    if !segment.contains('~') {
        return Some(segment.to_string());
    }
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

impl fmt::Display for YamlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

impl FromStr for YamlPath {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse a sequence index segment: decimal digits without leading zeros.
pub(crate) fn parse_index(segment: &str) -> Option<usize> {
    let valid = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if valid { segment.parse().ok() } else { None }
}
