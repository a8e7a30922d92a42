//! # lintcfg-patch
//!
//! Format-preserving patches for YAML documents.
//!
//! A [`Patch`] is a list of [`Operation`]s, each an `Add` or a `Replace` of a
//! [`Value`] at a [`YamlPath`]. [`apply`] turns every operation into a single
//! text splice located with the source spans from `lintcfg-yaml`, so comments,
//! blank lines, quoting and key order outside the edited region survive
//! byte for byte.
//!
//! The builders decide which operations a change needs:
//!
//! - [`list_append_patch`] appends items to a sequence,
//! - [`map_merge_patch`] adds or replaces keys of a mapping,
//!
//! and both fall back to [`synthesize`] when the target does not exist yet,
//! creating every missing level in one `Add`.
//!
//! ## Example
//!
//! ```rust
//! use lintcfg_patch::{Value, YamlPath, append_to_sequence};
//!
//! let base = "version: \"2\" # pinned\n";
//! let path = YamlPath::parse("/linters/enable").unwrap();
//! let merged = append_to_sequence(base, &path, &[Value::from("copyloopvar")]).unwrap();
//! assert_eq!(
//!     merged,
//!     "version: \"2\" # pinned\nlinters:\n  enable:\n    - copyloopvar\n"
//! );
//! ```

mod apply;
mod builder;
mod error;
mod exists;
mod path;
mod render;
mod value;

pub use apply::{Operation, OperationKind, Patch, apply};
pub use builder::{append_to_sequence, list_append_patch, map_merge_patch, merge_into_mapping, synthesize};
pub use error::{PatchError, Result};
pub use exists::{node_exists, path_exists};
pub use path::{APPEND_SEGMENT, YamlPath};
pub use value::{Scalar, Value};
