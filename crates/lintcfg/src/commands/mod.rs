//! Command implementations for the lintcfg CLI
//!
//! Each command module reads its inputs from disk and delegates to
//! lintcfg-config for the actual work.

pub mod merge;
