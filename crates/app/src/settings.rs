//! Settings for the command line tool.
//!
//! Sources, later ones winning:
//! 1. `settings.toml` in the working directory (or the `--config` path)
//! 2. `SPLITLEDGER__*` environment variables, e.g. `SPLITLEDGER__SETTLEMENT__EPSILON`
//! 3. command line overrides
use std::path::Path;

use config::{Config, Environment, File};
use engine::{Money, RoundingMode, SettlementPolicy};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settlement {
    /// Parsed like user input: `.` or `,` separator, at most two decimals.
    pub epsilon: Money,
    pub rounding: RoundingMode,
}

impl Default for Settlement {
    fn default() -> Self {
        let policy = SettlementPolicy::default();
        Self {
            epsilon: policy.epsilon(),
            rounding: policy.rounding(),
        }
    }
}

impl Settlement {
    pub fn policy(&self) -> Result<SettlementPolicy> {
        Ok(SettlementPolicy::new(self.epsilon, self.rounding)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub settlement: Settlement,
}

impl Settings {
    pub fn new(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_PATH).required(false),
        };
        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("SPLITLEDGER").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
