/*
 * scan.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Byte-level scanning helpers for computing exact node spans.
//!
//! yaml-rust2 reports one marker per event, and that marker is not always
//! where the node's text begins: block mappings are reported at their first
//! `:`, block scalars at their content. Node starts and ends and the position
//! of `:` / `-` indicators are recovered from the source.

use crate::ScalarStyle;

/// Offset of the first byte of the line containing `pos`.
pub fn line_start(source: &str, pos: usize) -> usize {
    source[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Offset of the line terminator of the line containing `pos`
/// (the `\r` of a `\r\n` pair), or `source.len()` on the last line.
pub fn line_end(source: &str, pos: usize) -> usize {
    let end = source[pos..].find('\n').map_or(source.len(), |i| pos + i);
    if end > pos && source.as_bytes()[end - 1] == b'\r' && end < source.len() {
        end - 1
    } else {
        end
    }
}

/// Offset just past the line terminator of the line containing `pos`.
fn next_line(source: &str, pos: usize) -> usize {
    source[pos..].find('\n').map_or(source.len(), |i| pos + i + 1)
}

/// Line terminator used by `source`: `\r\n` when its first line ends with
/// one, `\n` otherwise.
pub fn line_break(source: &str) -> &'static str {
    match source.find('\n') {
        Some(i) if i > 0 && source.as_bytes()[i - 1] == b'\r' => "\r\n",
        _ => "\n",
    }
}

/// Skip whitespace, line breaks, and comments starting at `pos`.
fn skip_trivia(source: &str, mut pos: usize) -> usize {
    let bytes = source.as_bytes();
    while pos < bytes.len() {
        match bytes[pos] {
            b' ' | b'\t' | b'\r' | b'\n' => pos += 1,
            b'#' if pos == 0 || bytes[pos - 1].is_ascii_whitespace() => {
                pos = next_line(source, pos);
            }
            _ => break,
        }
    }
    pos
}

/// Find `indicator` as the next significant character at or after `pos`.
pub fn find_indicator(source: &str, pos: usize, indicator: u8) -> Option<usize> {
    let pos = skip_trivia(source, pos);
    (source.as_bytes().get(pos) == Some(&indicator)).then_some(pos)
}

/// Find the closing bracket of a flow collection whose last child ends at
/// `pos`; returns the offset just past the bracket.
pub fn find_flow_end(source: &str, mut pos: usize, close: u8) -> Option<usize> {
    let bytes = source.as_bytes();
    loop {
        pos = skip_trivia(source, pos);
        match bytes.get(pos) {
            Some(b',') => pos += 1,
            Some(&b) if b == close => return Some(pos + 1),
            _ => return None,
        }
    }
}

/// Offset of the `-` that opens a block sequence reported at `pos`.
///
/// A sequence nested under a key without extra indentation (`key:\n- a`) is
/// reported at the content of its first item, past the `-` and any comment.
pub fn sequence_start(source: &str, pos: usize) -> usize {
    if source.as_bytes().get(pos) == Some(&b'-') {
        return pos;
    }
    let start = line_start(source, pos);
    let line = &source[start..pos];
    let dash = start + line.len() - line.trim_start_matches([' ', '\t']).len();
    if source.as_bytes().get(dash) == Some(&b'-') { dash } else { pos }
}

/// Offset of the `|` or `>` header of a block scalar reported at `pos`.
///
/// Block scalars are reported at their first content line. One without
/// content lines is reported at its header when it ends the input and at the
/// next token otherwise.
pub fn block_scalar_start(source: &str, pos: usize, has_content: bool) -> usize {
    if !has_content && matches!(source.as_bytes().get(pos), Some(b'|' | b'>')) {
        return pos;
    }
    let mut line = line_start(source, pos);
    while line > 0 {
        let prev = line_start(source, line - 1);
        let text = &source[prev..line - 1];
        if let Some(header) = block_header(text) {
            return prev + header;
        }
        if !text.trim().is_empty() {
            break;
        }
        line = prev;
    }
    pos
}

/// Position of a block scalar header in `line`: a `|` or `>` token, with
/// optional chomping and indentation indicators, that ends the line.
fn block_header(line: &str) -> Option<usize> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    for part in line.split([' ', '\t', '\r']) {
        if !part.is_empty() {
            tokens.push((offset, part));
        }
        offset += part.len() + 1;
    }
    tokens.iter().enumerate().find_map(|(i, &(at, token))| {
        let is_header = matches!(token.as_bytes()[0], b'|' | b'>')
            && token[1..].bytes().all(|b| matches!(b, b'+' | b'-' | b'1'..=b'9'));
        let ends_line = tokens
            .get(i + 1)
            .is_none_or(|(_, next)| next.starts_with('#'));
        (is_header && ends_line).then_some(at)
    })
}

/// Compute the end offset (exclusive) of a scalar starting at `start`.
///
/// `value` is the scalar's parsed value and `min_indent` the smallest
/// indentation a block scalar's content lines may have. Block scalars start
/// at their `|` or `>` header. Returns `None` when the source at `start`
/// does not hold the scalar.
pub fn scalar_end(source: &str, start: usize, value: &str, style: ScalarStyle, min_indent: usize) -> Option<usize> {
    match style {
        ScalarStyle::Plain => plain_end(source, start, value),
        ScalarStyle::SingleQuoted => single_quoted_end(source, start),
        ScalarStyle::DoubleQuoted => double_quoted_end(source, start),
        ScalarStyle::Literal | ScalarStyle::Folded => Some(block_scalar_end(source, start, min_indent)),
        ScalarStyle::Alias => Some(alias_end(source, start)),
        ScalarStyle::Empty => Some(start),
    }
}

/// Plain scalars carry no escapes, so their non-whitespace characters appear
/// verbatim in the source; whitespace runs may have been folded.
fn plain_end(source: &str, start: usize, value: &str) -> Option<usize> {
    let mut end = start;
    let mut chars = source[start..].char_indices();
    for expected in value.chars().filter(|c| !c.is_whitespace()) {
        loop {
            let (i, c) = chars.next()?;
            if c.is_whitespace() {
                continue;
            }
            if c != expected {
                return None;
            }
            end = start + i + c.len_utf8();
            break;
        }
    }
    Some(end)
}

fn single_quoted_end(source: &str, start: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut pos = start + 1;
    while pos < bytes.len() {
        if bytes[pos] == b'\'' {
            if bytes.get(pos + 1) == Some(&b'\'') {
                pos += 2;
                continue;
            }
            return Some(pos + 1);
        }
        pos += 1;
    }
    None
}

fn double_quoted_end(source: &str, start: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return Some(pos + 1),
            _ => pos += 1,
        }
    }
    None
}

fn block_scalar_end(source: &str, start: usize, min_indent: usize) -> usize {
    let mut end = line_end(source, start);
    let mut pos = next_line(source, start);
    let mut block_indent = None;

    while pos < source.len() {
        let line = &source[pos..line_end(source, pos)];
        let content = line.trim_start_matches(' ');
        let indent = line.len() - content.len();

        if content.trim().is_empty() {
            pos = next_line(source, pos);
            continue;
        }

        let required = *block_indent.get_or_insert(indent);
        if indent < required || indent < min_indent {
            break;
        }
        end = pos + line.trim_end().len();
        pos = next_line(source, pos);
    }
    end
}

fn alias_end(source: &str, start: usize) -> usize {
    source[start..]
        .find(|c: char| c.is_whitespace() || matches!(c, ',' | ']' | '}'))
        .map_or(source.len(), |i| start + i)
}
