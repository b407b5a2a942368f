//! Bootstrap configuration.
//!
//! Every field has a default, so the page works with no configuration at all.
//! A host that needs something else passes a JSON object to
//! [`crate::boot`], e.g. `{"canvas_id": "stage", "log_level": "debug"}`.

use serde::Deserialize;

use crate::consts::{DEFAULT_CANVAS_ID, DEFAULT_MODULE_PATH};
use crate::error::BootstrapError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Id of the canvas element to keep sized.
    pub canvas_id: String,
    /// Locator of the external module, relative to the page.
    pub module_path: String,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            module_path: DEFAULT_MODULE_PATH.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl BootstrapConfig {
    /// Parse and validate a JSON config. An empty or blank string means defaults.
    ///
    /// # Errors
    ///
    /// [`BootstrapError::Config`] on malformed JSON, unknown fields, an empty
    /// canvas id or module path, or an unknown log level.
    pub fn from_json(raw: &str) -> Result<Self, BootstrapError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_json::from_str(raw).map_err(|e| BootstrapError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// The parsed log level filter.
    ///
    /// # Errors
    ///
    /// [`BootstrapError::Config`] if `log_level` is not a known level.
    pub fn level_filter(&self) -> Result<log::LevelFilter, BootstrapError> {
        parse_level(&self.log_level)
    }

    fn validate(&self) -> Result<(), BootstrapError> {
        if self.canvas_id.trim().is_empty() {
            return Err(BootstrapError::Config("canvas_id must not be empty".into()));
        }
        if self.module_path.trim().is_empty() {
            return Err(BootstrapError::Config("module_path must not be empty".into()));
        }
        self.level_filter().map(drop)
    }
}

fn parse_level(raw: &str) -> Result<log::LevelFilter, BootstrapError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(log::LevelFilter::Off),
        "error" => Ok(log::LevelFilter::Error),
        "warn" => Ok(log::LevelFilter::Warn),
        "info" => Ok(log::LevelFilter::Info),
        "debug" => Ok(log::LevelFilter::Debug),
        "trace" => Ok(log::LevelFilter::Trace),
        other => Err(BootstrapError::Config(format!("unknown log level `{other}`"))),
    }
}
