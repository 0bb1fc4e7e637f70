use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Environment variable the API key is read from.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model used when deep reasoning is off, and for explanations.
    #[serde(default = "default_fast_model")]
    pub fast_model: String,

    #[serde(default = "default_reasoning_model")]
    pub reasoning_model: String,

    /// Thinking token budget sent with reasoning-tier requests
    #[serde(default = "default_reasoning_budget")]
    pub reasoning_budget: u32,

    #[serde(default = "default_deep_reasoning")]
    pub deep_reasoning: bool,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Language explanations are written in.
    #[serde(default = "default_explain_language")]
    pub explain_language: String,

    #[serde(default = "default_status_timeout_ms")]
    pub status_timeout_ms: u64,

    /// Overrides the platform data directory for workspace storage.
    #[serde(default)]
    pub data_dir: Option<String>,
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_fast_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_reasoning_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_reasoning_budget() -> u32 {
    4000
}

fn default_deep_reasoning() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_explain_language() -> String {
    "Arabic".to_string()
}

fn default_status_timeout_ms() -> u64 {
    2000
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key_env: default_api_key_env(),
            fast_model: default_fast_model(),
            reasoning_model: default_reasoning_model(),
            reasoning_budget: default_reasoning_budget(),
            deep_reasoning: default_deep_reasoning(),
            request_timeout_secs: default_request_timeout_secs(),
            explain_language: default_explain_language(),
            status_timeout_ms: default_status_timeout_ms(),
            data_dir: None,
        }
    }
}

/// Which model tier a generation request runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChoice {
    pub model: String,
    pub reasoning_budget: Option<u32>,
}

impl EditorSettings {
    /// Model and thinking budget for the deep-reasoning toggle.
    pub fn generation_model(&self, deep_reasoning: bool) -> ModelChoice {
        if deep_reasoning {
            ModelChoice {
                model: self.reasoning_model.clone(),
                reasoning_budget: Some(self.reasoning_budget),
            }
        } else {
            ModelChoice {
                model: self.fast_model.clone(),
                reasoning_budget: None,
            }
        }
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;

        Ok(())
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(AppError::Settings(format!(
                "API key not found; set the {} environment variable",
                self.api_key_env
            ))),
        }
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("tripad");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EditorSettings::default();
        assert_eq!(settings.fast_model, "gemini-3-flash-preview");
        assert_eq!(settings.reasoning_model, "gemini-3-pro-preview");
        assert_eq!(settings.reasoning_budget, 4000);
        assert!(settings.deep_reasoning);
        assert_eq!(settings.status_timeout_ms, 2000);
        assert_eq!(settings.api_key_env, "GEMINI_API_KEY");
        assert!(settings.data_dir.is_none());
    }

    #[test]
    fn test_partial_config() {
        // Older config files missing newer fields
        let json = r#"{"fast_model": "local-fast", "deep_reasoning": false}"#;
        let settings: EditorSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.fast_model, "local-fast");
        assert!(!settings.deep_reasoning);
        assert_eq!(settings.reasoning_budget, 4000);
    }

    #[test]
    fn test_generation_model_toggle() {
        let settings = EditorSettings::default();
        let deep = settings.generation_model(true);
        assert_eq!(deep.model, "gemini-3-pro-preview");
        assert_eq!(deep.reasoning_budget, Some(4000));

        let fast = settings.generation_model(false);
        assert_eq!(fast.model, "gemini-3-flash-preview");
        assert_eq!(fast.reasoning_budget, None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("settings.json");
        let settings = EditorSettings {
            explain_language: "English".to_string(),
            request_timeout_secs: 30,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(EditorSettings::load_from(&path), settings);
    }

    #[test]
    fn test_corrupt_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(EditorSettings::load_from(&path), EditorSettings::default());
    }

    #[test]
    fn test_missing_api_key_is_settings_error() {
        let settings = EditorSettings {
            api_key_env: "TRIPAD_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert!(matches!(settings.api_key(), Err(AppError::Settings(_))));
    }
}
