//! User settings: model name, API key and HTTP knobs.
//!
//! Stored as JSON in `{data_dir}/config.json`, keyed the same way the editor
//! settings are (`google.gemini.apiKey`, `google.gemini.textModel`).
//! Resolution order, lowest to highest: defaults, file, environment, CLI flags.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MODEL, ENV_API_KEY, ENV_MODEL};
use crate::{PipetError, PipetResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub google: GoogleSettings,
    /// Upper bound on the model call. `None` waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Base URL of the Gemini REST API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoogleSettings {
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GeminiSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub text_model: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// Load from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> PipetResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| {
            PipetError::Config(format!("invalid JSON in {}: {}", path.display(), e))
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(content)
    }

    /// Apply `GEMINI_API_KEY` / `PIPET_MODEL` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_API_KEY).ok(),
            std::env::var(ENV_MODEL).ok(),
        );
    }

    /// Override key and model when a non-empty value is given.
    pub fn apply_overrides(&mut self, api_key: Option<String>, model: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.google.gemini.api_key = Some(key);
        }
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.google.gemini.text_model = model;
        }
    }

    /// The configured API key; blank counts as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.google
            .gemini
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn model_name(&self) -> &str {
        let model = self.google.gemini.text_model.trim();
        if model.is_empty() {
            DEFAULT_MODEL
        } else {
            model
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref().filter(|e| !e.trim().is_empty())
    }
}

/// Hide all but the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Run `f` with the given variables set, restoring the previous values after.
    fn with_env<T>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> T) -> T {
        let saved: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(k, _)| (k.to_string(), std::env::var(k).ok()))
            .collect();
        for (k, v) in vars {
            match v {
                Some(v) => std::env::set_var(k, v),
                None => std::env::remove_var(k),
            }
        }
        let out = f();
        for (k, v) in saved {
            match v {
                Some(v) => std::env::set_var(&k, v),
                None => std::env::remove_var(&k),
            }
        }
        out
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.model_name(), "models/gemini-2.0-flash");
        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.timeout(), None);
        assert_eq!(settings.endpoint(), None);
    }

    #[test]
    fn test_from_json_camel_case_keys() {
        let settings = Settings::from_json(
            r#"{"google": {"gemini": {"apiKey": "abc123", "textModel": "models/gemini-1.5-pro"}},
                "timeout_secs": 30}"#,
        )
        .unwrap();
        assert_eq!(settings.api_key(), Some("abc123"));
        assert_eq!(settings.model_name(), "models/gemini-1.5-pro");
        assert_eq!(settings.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_json_keeps_default_model() {
        let settings =
            Settings::from_json(r#"{"google": {"gemini": {"apiKey": "k"}}}"#).unwrap();
        assert_eq!(settings.model_name(), DEFAULT_MODEL);
    }

    #[test]
    fn test_blank_values_treated_as_absent() {
        let mut settings = Settings::default();
        settings.google.gemini.api_key = Some("   ".into());
        settings.google.gemini.text_model = "".into();
        settings.timeout_secs = Some(0);
        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.model_name(), DEFAULT_MODEL);
        assert_eq!(settings.timeout(), None);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut settings =
            Settings::from_json(r#"{"google": {"gemini": {"apiKey": "file-key"}}}"#).unwrap();
        settings.apply_overrides(Some("flag-key".into()), None);
        assert_eq!(settings.api_key(), Some("flag-key"));
        settings.apply_overrides(Some("".into()), Some("gemini-exp".into()));
        assert_eq!(settings.api_key(), Some("flag-key"));
        assert_eq!(settings.model_name(), "gemini-exp");
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Settings::load(&path).unwrap_err();
        match err {
            PipetError::Config(msg) => assert!(msg.contains("config.json")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_serialize_skips_absent_key() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"google": {"gemini": {"textModel": DEFAULT_MODEL}}})
        );
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("AIzaSyABCDEF"), "********CDEF");
        assert_eq!(mask_secret("abc"), "***");
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let mut settings = Settings::from_json(
            r#"{"google": {"gemini": {"apiKey": "file-key", "textModel": "file-model"}}}"#,
        )
        .unwrap();
        with_env(
            &[(ENV_API_KEY, Some("env-key")), (ENV_MODEL, Some("env-model"))],
            || settings.apply_env(),
        );
        assert_eq!(settings.api_key(), Some("env-key"));
        assert_eq!(settings.model_name(), "env-model");
    }

    #[test]
    #[serial]
    fn test_unset_or_blank_env_keeps_file_values() {
        let mut settings =
            Settings::from_json(r#"{"google": {"gemini": {"apiKey": "file-key"}}}"#).unwrap();
        with_env(&[(ENV_API_KEY, Some("  ")), (ENV_MODEL, None)], || {
            settings.apply_env()
        });
        assert_eq!(settings.api_key(), Some("file-key"));
        assert_eq!(settings.model_name(), DEFAULT_MODEL);
    }

    #[test]
    #[serial]
    fn test_flags_override_env() {
        let mut settings =
            Settings::from_json(r#"{"google": {"gemini": {"apiKey": "file-key"}}}"#).unwrap();
        with_env(
            &[(ENV_API_KEY, Some("env-key")), (ENV_MODEL, Some("env-model"))],
            || settings.apply_env(),
        );
        settings.apply_overrides(Some("flag-key".into()), None);
        assert_eq!(settings.api_key(), Some("flag-key"));
        assert_eq!(settings.model_name(), "env-model");
    }
}
