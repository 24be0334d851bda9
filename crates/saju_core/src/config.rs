//! Layered configuration for the calculator.
//!
//! Sources, highest priority first:
//! 1. Environment variables prefixed `SAJU_` (`__` separates nested keys)
//! 2. `saju.toml` in the working directory, or an explicit file
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default project-local config file name.
pub const CONFIG_FILE: &str = "saju.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SajuConfig {
    /// External solar-term dataset. `None` uses the bundled table.
    #[serde(default)]
    pub solar_terms: Option<PathBuf>,

    /// Produce ten-god details by default.
    #[serde(default)]
    pub detailed: bool,
}

impl SajuConfig {
    /// Load defaults, `./saju.toml` if present, then `SAJU_*` variables.
    pub fn load() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }

    /// Like [`load`](Self::load) but reads the TOML layer from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self::figment_with(Some(path)).extract()?)
    }

    /// Provider chain with the default file location.
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    fn figment_with(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let file = path.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }

        figment.merge(Env::prefixed("SAJU_").split("__"))
    }
}
