//! Optional TOML configuration
//!
//! Looked up in order: `--config <path>`, `SQL_BUILDER_CONFIG`, then
//! `~/.config/sql-builder/config.toml`. A missing default file means
//! defaults; a missing explicit file is an error.
//!
//! ```toml
//! [refresh]
//! default_family = "IMIX"
//! target_types = ["Contact", "Account"]
//! dedupe = true
//! strict = false
//! preview_count = 25
//!
//! [procedures]
//! "Sandbox" = "[Dev].[dbo].[Entity_Process_Log__ManualInsert_Sandbox]"
//!
//! [validation]
//! code_pattern = "[A-Z0-9]+"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::constants::{DEFAULT_TARGET_TYPES, PREVIEW_COUNT, STORED_PROCEDURES};
use crate::ingest::{CodePattern, compile_pattern};
use crate::sql::ProcedureTable;

pub const CONFIG_ENV_VAR: &str = "SQL_BUILDER_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub refresh: RefreshConfig,
    /// Extra refresh families (family -> procedure), appended to the built-in table
    pub procedures: IndexMap<String, String>,
    pub validation: ValidationConfig,
}

/// Defaults for the refresh workflow
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefreshConfig {
    pub default_family: String,
    pub target_types: Vec<String>,
    pub dedupe: bool,
    pub strict: bool,
    pub preview_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Override for the identifier pattern
    pub code_pattern: Option<String>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            default_family: STORED_PROCEDURES[0].0.to_string(),
            target_types: DEFAULT_TARGET_TYPES.iter().map(|t| t.to_string()).collect(),
            dedupe: true,
            strict: false,
            preview_count: PREVIEW_COUNT,
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults when no file exists at the default location
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Self::from_file(Path::new(&path));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Built-in procedures plus the configured extras
    pub fn procedure_table(&self) -> ProcedureTable {
        ProcedureTable::with_extra(&self.procedures)
    }

    /// Configured code pattern, if any
    pub fn code_pattern(&self) -> Result<Option<CodePattern>> {
        compile_pattern(self.validation.code_pattern.as_deref()).context("Invalid [validation] code_pattern")
    }
}

/// `<config_dir>/sql-builder/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sql-builder").join("config.toml"))
}
