//! # lintcfg-yaml
//!
//! YAML parsing with exact source spans.
//!
//! This crate provides [`YamlNode`], a read-only tree over a YAML document in
//! which every node knows the byte range of its content in the source text,
//! along with the position of the `:` and `-` indicators that introduce it.
//! That is enough to edit a document by splicing text, leaving comments,
//! blank lines, quoting and key order of every untouched region intact.
//!
//! ## Design
//!
//! Built on the `yaml-rust2` event parser. yaml-rust2 reports a single
//! position per event, so the span of every scalar is recovered by scanning
//! the source according to the scalar's style (see [`scan`]), and block
//! collection spans are derived from their children.
//!
//! ## Example
//!
//! ```rust
//! use lintcfg_yaml::parse;
//!
//! let content = "linters:\n  default: none # keep\n";
//!
//! let root = parse(content).unwrap().expect("document is not empty");
//! let linters = root.get_hash_value("linters").unwrap();
//! let default = linters.get_hash_value("default").unwrap();
//! assert_eq!(default.text(content), "none");
//! assert_eq!(default.source_info.line, 2);
//! ```

mod error;
mod node;
mod parser;
pub mod scan;
mod source_info;

pub use error::{Error, Result};
pub use node::{CollectionStyle, ScalarStyle, YamlArrayItem, YamlHashEntry, YamlNode};
pub use parser::parse;
pub use source_info::SourceInfo;
