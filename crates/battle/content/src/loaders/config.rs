//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Every field is optional; missing ones take their default values.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing BattleConfig
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<BattleConfig, toml::de::Error> {
        let config: BattleConfig = toml::from_str(content)?;
        let capacity = config.message_log_capacity;
        Ok(config.with_message_log_capacity(capacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::PhaseDurations;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            text_speed = 0

            [durations]
            flee = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.text_speed, 0);
        assert_eq!(config.durations.flee, 12);
        assert_eq!(config.durations.strike, PhaseDurations::DEFAULT_STRIKE);
        assert_eq!(
            config.message_log_capacity,
            BattleConfig::DEFAULT_MESSAGE_LOG_CAPACITY
        );
    }

    #[test]
    fn empty_log_capacity_is_raised_to_one() {
        let config = ConfigLoader::parse("message_log_capacity = 0").unwrap();
        assert_eq!(config.message_log_capacity, 1);
    }

    #[test]
    fn load_reports_path_on_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "text_speed = \"fast\"").unwrap();
        let err = ConfigLoader::load(file.path()).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config TOML"), "{err}");
    }
}
