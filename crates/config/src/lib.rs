//! Layered configuration for talenest.
//!
//! Values are merged in order, later layers winning:
//!
//! 1. Built-in defaults.
//! 2. A config file: the path given explicitly, or else the first of
//!    `config.toml`, `config.yaml`, `config.yml` or `config.json` found in the
//!    platform config directory.
//! 3. `TALENEST_`-prefixed environment variables, with `__` between nested
//!    keys (`TALENEST_PROBE__TIMEOUT_MS=1500`).

pub mod error;
mod sections;

pub use crate::sections::{LibraryConfig, MatchingConfig, ProbeConfig, TitleConfig};

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

pub const ENV_PREFIX: &str = "TALENEST_";
const CONFIG_FILE_NAMES: [&str; 4] = ["config.toml", "config.yaml", "config.yml", "config.json"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub probe: ProbeConfig,
    pub title: TitleConfig,
    pub matching: MatchingConfig,
    pub library: LibraryConfig,
}

impl Config {
    /// Loads and validates the configuration.
    ///
    /// An explicit `path` must exist. Without one, a missing config file is
    /// fine and only defaults and the environment apply.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) if !path.is_file() => {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            },
            Some(path) => Some(path.to_path_buf()),
            None => default_file(),
        };
        let config: Self = figment(file.as_deref())?.extract().or_raise(|| ErrorKind::Parse)?;
        config.validate()?;
        tracing::debug!(file = ?file, "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.probe.validate()?;
        self.library.validate()?;
        Ok(())
    }
}

fn figment(file: Option<&Path>) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(file) = file {
        figment = match file.extension().and_then(|e| e.to_str()) {
            Some("toml") => figment.merge(Toml::file(file)),
            Some("yaml" | "yml") => figment.merge(Yaml::file(file)),
            Some("json") => figment.merge(Json::file(file)),
            _ => {
                exn::bail!(ErrorKind::UnsupportedFormat(file.to_path_buf()));
            },
        };
    }
    Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
}

/// The platform config directory, e.g. `~/.config/talenest` on Linux.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "talenest").map(|dirs| dirs.config_dir().to_path_buf())
}

fn default_file() -> Option<PathBuf> {
    let dir = config_dir()?;
    CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).find(|path| path.is_file())
}
