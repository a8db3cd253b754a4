//! Shell configuration
//!
//! Configuration for the CLI shell, not the core: the engine itself takes
//! all inputs explicitly. Values come from an optional TOML file with
//! `MARKSIX_`-prefixed environment overrides on top.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::types::LotteryVariant;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Path to the draw-history JSON file.
    pub history_file: String,
    /// Lottery variant the shell operates on.
    pub variant: LotteryVariant,
    /// Where engine weights are persisted between runs. Optional: without
    /// it every run starts from the balanced prior.
    #[serde(default)]
    pub weights_file: Option<String>,
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("history_file", "history.json")?
            .set_default("variant", "hongkong")?
            .add_source(File::from(Path::new(path)).required(false))
            .add_source(Environment::with_prefix("MARKSIX"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load("does-not-exist.toml").unwrap();
        assert_eq!(config.history_file, "history.json");
        assert_eq!(config.variant, LotteryVariant::HongKong);
        assert!(config.weights_file.is_none());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "history_file = \"draws/macau.json\"").unwrap();
        writeln!(file, "variant = \"macau\"").unwrap();
        writeln!(file, "weights_file = \"weights.json\"").unwrap();

        let config = AppConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.history_file, "draws/macau.json");
        assert_eq!(config.variant, LotteryVariant::Macau);
        assert_eq!(config.weights_file.as_deref(), Some("weights.json"));
    }
}
