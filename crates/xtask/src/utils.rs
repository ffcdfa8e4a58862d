//! Utility functions for xtask commands

use std::path::{Path, PathBuf};

/// Content directory shipped with `battle-content`.
pub fn default_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("battle")
        .join("content")
        .join("data")
}

/// Resolves an optional `--data-dir` argument.
pub fn data_dir(arg: Option<PathBuf>) -> PathBuf {
    arg.unwrap_or_else(default_data_dir)
}
