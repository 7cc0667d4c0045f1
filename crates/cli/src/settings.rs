//! Runtime settings of the `charity` binary.
//!
//! Sources are layered, later ones winning: built-in defaults, the optional
//! TOML file (`charity.toml` unless `--config` names another), `CHARITY_*`
//! environment variables (`CHARITY_DATABASE__PATH`, `CHARITY_LOG__LEVEL`) and
//! finally the global command-line flags.

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

use crate::{GlobalArgs, error::Result};

const DEFAULT_CONFIG_PATH: &str = "charity.toml";
const ENV_PREFIX: &str = "CHARITY";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    /// Use a throwaway in-memory store instead of `path`.
    #[serde(default)]
    pub memory: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub level: String,
}

impl DatabaseSettings {
    /// Connection string understood by sea-orm.
    pub fn url(&self) -> String {
        if self.memory {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite:{}?mode=rwc", self.path.display())
        }
    }

    /// Directory that must exist before the database file can be created.
    pub fn parent_dir(&self) -> Option<&Path> {
        if self.memory {
            return None;
        }
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }
}

impl Settings {
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let builder = defaults()?
            .add_source(File::with_name(config_path).required(args.config.is_some()))
            .add_source(environment());

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.apply_overrides(args);
        Ok(settings)
    }

    fn apply_overrides(&mut self, args: &GlobalArgs) {
        if let Some(path) = &args.database {
            self.database.path = path.clone();
        }
        if args.memory {
            self.database.memory = true;
        }
        if let Some(level) = &args.log_level {
            self.log.level = level.clone();
        }
    }

    /// `tracing` filter directive covering the binary and the crates it drives.
    pub fn log_filter(&self) -> String {
        format!(
            "charity={level},engine={level},migration={level}",
            level = self.log.level
        )
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    let builder = Config::builder()
        .set_default(
            "database.path",
            default_database_path().to_string_lossy().into_owned(),
        )?
        .set_default("database.memory", false)?
        .set_default("log.level", DEFAULT_LOG_LEVEL)?;
    Ok(builder)
}

/// `CHARITY_DATABASE__PATH` maps to `database.path`.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// `<data dir>/charity/charity.db`, or `./charity.db` when the platform has
/// no data directory.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("charity").join("charity.db"))
        .unwrap_or_else(|| PathBuf::from("charity.db"))
}
