/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! YAML parser that builds span-tracked `YamlNode` trees.

use crate::node::{CollectionStyle, ScalarStyle, YamlArrayItem, YamlHashEntry, YamlNode};
use crate::scan;
use crate::{Error, Result, SourceInfo};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};
use yaml_rust2::Yaml;

/// Parse YAML from a string, producing a span-tracked node tree.
///
/// Returns `Ok(None)` when the input holds no document (it is empty or
/// contains only comments). If the input contains multiple documents, only
/// the first one is parsed.
///
/// # Example
///
/// ```rust
/// use lintcfg_yaml::parse;
///
/// let yaml = parse("title: My Document").unwrap().unwrap();
/// assert!(yaml.is_hash());
/// assert!(parse("# nothing here\n").unwrap().is_none());
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid.
pub fn parse(content: &str) -> Result<Option<YamlNode>> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = YamlBuilder::new(content);

    parser.load(&mut builder, false)?;

    builder.result()
}

/// Builder that implements MarkedEventReceiver to construct YamlNode trees.
struct YamlBuilder<'a> {
    source: &'a str,

    /// Byte offset of every character, present only for non-ASCII input
    /// (yaml-rust2 markers count characters).
    char_offsets: Option<Vec<usize>>,

    /// Byte offset of the start of every line.
    line_starts: Vec<usize>,

    /// Stack of collections being constructed
    stack: Vec<BuildNode>,

    root: Option<YamlNode>,

    /// First structural problem seen; reported once parsing finishes.
    error: Option<Error>,
}

/// A collection being constructed during parsing.
enum BuildNode {
    Sequence {
        start: usize,
        style: CollectionStyle,
        items: Vec<YamlArrayItem>,
    },
    Mapping {
        /// Known up front only for `{`; a block mapping starts at its first key.
        start: Option<usize>,
        style: CollectionStyle,
        entries: Vec<YamlHashEntry>,
        pending_key: Option<YamlNode>,
    },
}

impl BuildNode {
    fn start(&self) -> Option<usize> {
        match self {
            BuildNode::Sequence { start, .. } => Some(*start),
            BuildNode::Mapping { start, .. } => *start,
        }
    }

    fn is_flow(&self) -> bool {
        match self {
            BuildNode::Sequence { style, .. } | BuildNode::Mapping { style, .. } => {
                *style == CollectionStyle::Flow
            }
        }
    }
}

impl<'a> YamlBuilder<'a> {
    fn new(source: &'a str) -> Self {
        let char_offsets = (!source.is_ascii()).then(|| {
            source
                .char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(source.len()))
                .collect()
        });
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            char_offsets,
            line_starts,
            stack: Vec::new(),
            root: None,
            error: None,
        }
    }

    fn result(self) -> Result<Option<YamlNode>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.root),
        }
    }

    fn fail(&mut self, message: &str) {
        if self.error.is_none() {
            self.error = Some(Error::InvalidStructure {
                message: message.to_string(),
            });
        }
    }

    fn byte_offset(&self, marker: &Marker) -> usize {
        let index = marker.index();
        match &self.char_offsets {
            Some(offsets) => offsets.get(index).copied().unwrap_or(self.source.len()),
            None => index.min(self.source.len()),
        }
    }

    fn make_source_info(&self, offset: usize, end: usize) -> SourceInfo {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let col = self.source[line_start..offset].chars().count() + 1;
        SourceInfo::new(offset, line, col, end.saturating_sub(offset))
    }

    /// Smallest indentation the content of a block scalar placed in the
    /// current collection may have.
    fn block_scalar_min_indent(&self) -> usize {
        self.stack
            .last()
            .and_then(BuildNode::start)
            .map_or(0, |start| self.make_source_info(start, start).col)
    }

    fn scalar_node(&self, value: String, style: TScalarStyle, at: usize) -> YamlNode {
        let style = match style {
            TScalarStyle::Plain => ScalarStyle::Plain,
            TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
            TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
            TScalarStyle::Literal => ScalarStyle::Literal,
            TScalarStyle::Folded => ScalarStyle::Folded,
        };
        let start = match style {
            ScalarStyle::Literal | ScalarStyle::Folded => {
                let has_content = value.chars().any(|c| c != '\n');
                scan::block_scalar_start(self.source, at, has_content)
            }
            _ => at,
        };
        let min_indent = self.block_scalar_min_indent();
        let end = scan::scalar_end(self.source, start, &value, style, min_indent).unwrap_or(start);
        let yaml = match style {
            ScalarStyle::Plain => parse_scalar_value(&value),
            _ => Yaml::String(value.clone()),
        };
        YamlNode::new_scalar(value, yaml, style, self.make_source_info(start, end))
    }

    /// Add a finished node to the collection on top of the stack.
    ///
    /// Implicit nulls arrive positioned at the token after them and are moved
    /// to just past the indicator that introduces them.
    fn push_complete(&mut self, node: YamlNode) {
        let source = self.source;
        let Some(parent) = self.stack.last() else {
            let node = if node.is_implicit() {
                YamlNode::new_empty(self.make_source_info(source.len(), source.len()))
            } else {
                node
            };
            self.root = Some(node);
            return;
        };

        match parent {
            BuildNode::Mapping {
                pending_key: None, ..
            } => {
                if let Some(BuildNode::Mapping {
                    start, pending_key, ..
                }) = self.stack.last_mut()
                {
                    start.get_or_insert(node.source_info.offset);
                    *pending_key = Some(node);
                }
            }
            BuildNode::Mapping {
                pending_key: Some(key),
                ..
            } => {
                let key_end = key.source_info.end_offset();
                let indicator = scan::find_indicator(source, key_end, b':').unwrap_or(key_end);
                let value = if node.is_implicit() {
                    let at = if indicator == key_end { key_end } else { indicator + 1 };
                    YamlNode::new_empty(self.make_source_info(at, at))
                } else {
                    node
                };
                if let Some(BuildNode::Mapping {
                    entries,
                    pending_key,
                    ..
                }) = self.stack.last_mut()
                {
                    if let Some(key) = pending_key.take() {
                        entries.push(YamlHashEntry {
                            key,
                            value,
                            indicator,
                        });
                    }
                }
            }
            BuildNode::Sequence {
                start,
                style,
                items,
            } => {
                let boundary = items
                    .last()
                    .map_or(*start, |item| item.value.source_info.end_offset());
                let indicator = match style {
                    CollectionStyle::Block => scan::find_indicator(source, boundary, b'-'),
                    CollectionStyle::Flow => None,
                };
                let value = match indicator {
                    Some(dash) if node.is_implicit() => {
                        YamlNode::new_empty(self.make_source_info(dash + 1, dash + 1))
                    }
                    _ => node,
                };
                if let Some(BuildNode::Sequence { items, .. }) = self.stack.last_mut() {
                    items.push(YamlArrayItem { value, indicator });
                }
            }
        }
    }

    /// Style of a collection reported at `at`. A mapping written as a bare
    /// `key: value` pair inside a flow sequence is a flow collection too.
    fn collection_style(&self, at: usize, open: u8) -> CollectionStyle {
        let in_flow = self.stack.last().is_some_and(BuildNode::is_flow);
        if self.source.as_bytes().get(at) == Some(&open) || in_flow {
            CollectionStyle::Flow
        } else {
            CollectionStyle::Block
        }
    }

    /// A sequence under a key without extra indentation is reported at the
    /// content of its first item, which may open a flow collection itself
    /// (`key:\n- [a]`).
    fn opens_unindented_sequence(&self, at: usize) -> bool {
        let awaiting_value = matches!(
            self.stack.last(),
            Some(BuildNode::Mapping {
                pending_key: Some(_),
                ..
            })
        );
        awaiting_value && self.source[scan::line_start(self.source, at)..at].trim() == "-"
    }

    fn collection_end(
        &self,
        style: CollectionStyle,
        start: usize,
        last_child_end: Option<usize>,
        marker: &Marker,
        (open, close): (u8, u8),
    ) -> usize {
        let bracketed = self.source.as_bytes().get(start) == Some(&open);
        match style {
            CollectionStyle::Flow if bracketed => {
                scan::find_flow_end(self.source, last_child_end.unwrap_or(start + 1), close)
                    .unwrap_or_else(|| (self.byte_offset(marker) + 1).min(self.source.len()))
            }
            _ => last_child_end.unwrap_or(start),
        }
    }
}

impl MarkedEventReceiver for YamlBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Nothing => {}

            Event::StreamStart => {}
            Event::StreamEnd => {}
            Event::DocumentStart => {}
            Event::DocumentEnd => {}

            Event::Scalar(value, style, _anchor_id, _tag) => {
                let at = self.byte_offset(&marker);
                // yaml-rust2 reports implicit nulls as empty plain scalars
                let node = if style == TScalarStyle::Plain && value.is_empty() {
                    YamlNode::new_empty(self.make_source_info(at, at))
                } else {
                    self.scalar_node(value, style, at)
                };
                self.push_complete(node);
            }

            Event::SequenceStart(_anchor_id, _tag) => {
                let at = self.byte_offset(&marker);
                let style = if self.opens_unindented_sequence(at) {
                    CollectionStyle::Block
                } else {
                    self.collection_style(at, b'[')
                };
                let start = match style {
                    CollectionStyle::Block => scan::sequence_start(self.source, at),
                    CollectionStyle::Flow => at,
                };
                self.stack.push(BuildNode::Sequence {
                    start,
                    style,
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => match self.stack.pop() {
                Some(BuildNode::Sequence {
                    start,
                    style,
                    items,
                }) => {
                    let last_end = items.last().map(|item| item.value.source_info.end_offset());
                    let end = self.collection_end(style, start, last_end, &marker, (b'[', b']'));
                    let source_info = self.make_source_info(start, end);
                    self.push_complete(YamlNode::new_array(style, items, source_info));
                }
                _ => self.fail("SequenceEnd without SequenceStart"),
            },

            Event::MappingStart(_anchor_id, _tag) => {
                let at = self.byte_offset(&marker);
                let bracketed = self.source.as_bytes().get(at) == Some(&b'{');
                self.stack.push(BuildNode::Mapping {
                    start: bracketed.then_some(at),
                    style: self.collection_style(at, b'{'),
                    entries: Vec::new(),
                    pending_key: None,
                });
            }

            Event::MappingEnd => match self.stack.pop() {
                Some(BuildNode::Mapping {
                    start,
                    style,
                    entries,
                    pending_key,
                }) => {
                    if pending_key.is_some() {
                        self.fail("Mapping entry without value");
                        return;
                    }
                    let start = start.unwrap_or_else(|| self.byte_offset(&marker));
                    let last_end = entries.last().map(|entry| {
                        if entry.value.is_implicit() {
                            entry.value.source_info.offset
                        } else {
                            entry.value.source_info.end_offset()
                        }
                    });
                    let end = self.collection_end(style, start, last_end, &marker, (b'{', b'}'));
                    let source_info = self.make_source_info(start, end);
                    self.push_complete(YamlNode::new_hash(style, entries, source_info));
                }
                _ => self.fail("MappingEnd without MappingStart"),
            },

            Event::Alias(_anchor_id) => {
                // Aliases are kept as opaque leaves; the anchored value is not resolved
                let start = self.byte_offset(&marker);
                let end = scan::scalar_end(self.source, start, "", ScalarStyle::Alias, 0).unwrap_or(start);
                let source_info = self.make_source_info(start, end);
                let raw = self.source[start..end].to_string();
                let node = YamlNode::new_scalar(raw, Yaml::Null, ScalarStyle::Alias, source_info);
                self.push_complete(node);
            }
        }
    }
}

/// Parse a plain scalar string into the appropriate Yaml type.
///
/// This handles type inference: integers, floats, booleans, null, and strings.
fn parse_scalar_value(value: &str) -> Yaml {
    if let Ok(i) = value.parse::<i64>() {
        return Yaml::Integer(i);
    }

    if value.parse::<f64>().is_ok() {
        return Yaml::Real(value.to_string());
    }

    match value {
        "true" | "True" | "TRUE" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" => {
            return Yaml::Boolean(true);
        }
        "false" | "False" | "FALSE" | "no" | "No" | "NO" | "off" | "Off" | "OFF" => {
            return Yaml::Boolean(false);
        }
        "null" | "Null" | "NULL" | "~" | "" => {
            return Yaml::Null;
        }
        _ => {}
    }

    Yaml::String(value.to_string())
}
