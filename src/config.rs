use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub(crate) const DB_ENV: &str = "EXPENSEBUDDY_DB";
pub(crate) const LOG_ENV: &str = "EXPENSEBUDDY_LOG";

const CONFIG_FILE: &str = "config.json";
const DB_FILE: &str = "expensebuddy.db";
const LOG_FILE: &str = "expensebuddy.log";

pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "expensebuddy", "ExpenseBuddy")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
}

/// User settings from `config.json`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Defaults to `expensebuddy.db` in the platform data directory.
    pub(crate) database_path: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `info` or `expensebuddy=debug`.
    pub(crate) log_level: String,
    pub(crate) auto_generate_recurring: bool,
    pub(crate) default_payment_method: String,
    pub(crate) trend_months: usize,
    pub(crate) expense_window_months: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            log_level: "info".into(),
            auto_generate_recurring: true,
            default_payment_method: "Card".into(),
            trend_months: 6,
            expense_window_months: 3,
        }
    }
}

impl Config {
    /// Load from the platform config directory, then apply environment overrides.
    pub(crate) fn load() -> Result<Self> {
        let dirs = project_dirs()?;
        let config = Self::load_from(&dirs.config_dir().join(CONFIG_FILE))?;
        Ok(config.with_overrides(
            std::env::var(DB_ENV).ok(),
            std::env::var(LOG_ENV).ok(),
        ))
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub(crate) fn with_overrides(mut self, database: Option<String>, log: Option<String>) -> Self {
        if let Some(db) = database.filter(|s| !s.trim().is_empty()) {
            self.database_path = Some(PathBuf::from(db));
        }
        if let Some(level) = log.filter(|s| !s.trim().is_empty()) {
            self.log_level = level;
        }
        self
    }

    pub(crate) fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(DB_FILE)),
        }
    }

    /// Log file for the TUI, next to the database.
    pub(crate) fn log_path(&self) -> Result<PathBuf> {
        let db = self.database_path()?;
        Ok(db.with_file_name(LOG_FILE))
    }
}
