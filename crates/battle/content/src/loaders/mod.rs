//! Content loaders for reading battle data from files.
//!
//! Catalogs are RON, configuration is TOML. Every loader reports failures
//! with the offending file path so broken content fails loudly at load time.

pub mod abilities;
pub mod classes;
pub mod config;
pub mod encounters;
pub mod factory;
pub mod items;

pub use abilities::AbilityLoader;
pub use classes::ClassLoader;
pub use config::ConfigLoader;
pub use encounters::EncounterLoader;
pub use factory::ContentFactory;
pub use items::ItemLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses RON text, naming the file and catalog in the error.
pub(crate) fn parse_ron<T>(path: &Path, what: &str) -> LoadResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = read_file(path)?;
    ron::from_str(&content).map_err(|e| {
        anyhow::anyhow!(
            "Failed to parse {} RON {}: {}",
            what,
            path.display(),
            e
        )
    })
}
