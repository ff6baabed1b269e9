// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;

fn default_true() -> bool {
    true
}

fn default_search_threshold() -> f64 {
    0.6
}

fn default_match_threshold() -> f64 {
    0.25
}

fn default_check_interval() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Loose cut-off for `cari`/`kapan` queries.
    #[serde(default = "default_search_threshold")]
    pub search_threshold: f64,
    /// Tight cut-off for picking the entry an edit or delete refers to.
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,

    #[serde(default = "default_check_interval")]
    pub reminder_check_interval_mins: u32,
    #[serde(default = "default_true")]
    pub notifications: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_threshold: 0.6,
            match_threshold: 0.25,
            reminder_check_interval_mins: 30,
            notifications: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults.
    /// A file that exists and cannot be parsed is still an error.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Whether an error from `load` means the config file was simply absent.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// `log_level` as a filter; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn missing_file_gives_defaults() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
        assert_eq!(Config::load_or_default(&ctx).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "search_threshold = 0.5\nlog_level = \"debug\"\n").unwrap();
        let cfg = Config::load(&ctx).unwrap();
        assert_eq!(cfg.search_threshold, 0.5);
        assert_eq!(cfg.match_threshold, 0.25);
        assert!(cfg.notifications);
        assert_eq!(cfg.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "search_threshold = [").unwrap();
        let err = Config::load_or_default(&ctx).unwrap_err();
        assert!(!Config::is_missing_config_error(&err));
    }

    #[test]
    fn save_then_load() {
        let ctx = TestContext::new();
        let cfg = Config {
            reminder_check_interval_mins: 5,
            notifications: false,
            ..Config::default()
        };
        cfg.save(&ctx).unwrap();
        assert_eq!(Config::load(&ctx).unwrap(), cfg);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let cfg = Config {
            log_level: "loud".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.level_filter(), LevelFilter::Info);
    }
}
