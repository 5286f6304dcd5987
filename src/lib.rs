//! # Amalgamator - single-file snapshots of a source tree
//!
//! Walks a directory, drops everything matched by gitignore-style patterns, and
//! concatenates the remaining files into one document, each record headed by its
//! path relative to the root.
//!
//! Amalgamator provides:
//! - Gitignore-compatible filtering (ignore file + built-in exclusions + extra patterns)
//! - Depth-first traversal that prunes excluded directories
//! - Lossy text decoding with per-file error substitution

pub mod ignore;
pub mod walker;
pub mod amalgamate;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use amalgamate::{Amalgamator, FileContents, ReadFailure, Summary};
pub use config::{AmalgamateOptions, AmalgamatorConfig};
pub use crate::ignore::IgnoreFilter;
pub use walker::FileRecord;

use std::path::PathBuf;

/// Result type alias for Amalgamator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Run-level failures. Per-file read errors never surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read ignore file {path}: {source}")]
    IgnoreFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid ignore pattern: {0}")]
    Pattern(#[from] ::ignore::Error),

    #[error("Invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("config already exists at {} (use --force to overwrite)", .0.display())]
    ConfigExists(PathBuf),
}
