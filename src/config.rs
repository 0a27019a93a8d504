//! Runtime settings
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `travelmate.toml` in the working directory, then `TRAVELMATE__*`
//! environment variables (e.g. `TRAVELMATE__PLANNER__API_KEY`). The planner
//! credential is never part of the defaults.

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::i18n::Language;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Conventional variable consulted when `planner.api_key` is unset
pub const FALLBACK_API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub planner: PlannerSettings,
    #[serde(default)]
    pub locale: LocaleSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LocaleSettings {
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    /// `EnvFilter` directives, e.g. `info,travelmate=debug`
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Write daily-rolling JSON logs here instead of stderr
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            directory: None,
            json: false,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Settings {
    /// Load settings from `travelmate.toml` (optional) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("travelmate")
    }

    /// Load settings from the named file (extension optional, file optional)
    /// and the environment
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix("TRAVELMATE").separator("__"))
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;
        if settings.planner.api_key.is_none() {
            settings.planner.api_key = env::var(FALLBACK_API_KEY_VAR).ok().filter(|key| !key.is_empty());
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.planner.model, DEFAULT_MODEL);
        assert_eq!(settings.planner.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.planner.timeout_secs, 60);
        assert!(settings.planner.api_key.is_none());
        assert_eq!(settings.locale.language, Language::En);
        assert_eq!(settings.log.filter, "info");
        assert!(settings.log.directory.is_none());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let settings = Settings::load_from("does/not/exist/travelmate").unwrap();
        assert_eq!(settings.planner.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = env::temp_dir().join(format!("travelmate-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(
            &path,
            "[planner]\nmodel = \"gemini-test\"\ntimeout_secs = 5\n\n[locale]\nlanguage = \"ar\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.planner.model, "gemini-test");
        assert_eq!(settings.planner.timeout_secs, 5);
        assert_eq!(settings.planner.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.locale.language, Language::Ar);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
