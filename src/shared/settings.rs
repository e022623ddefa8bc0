use serde::{Deserialize, Serialize};
use tokio::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use tracing::{debug, info, warn};

use crate::shared::error::{AppError, AppResult};
use crate::shared::types::{Action, Language, Provider};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/translate";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_ENDPOINT: &str = "TRANSLATION_BACKEND_URL";
const ENV_TIMEOUT: &str = "TRANSLATION_TIMEOUT_SECS";

/// Client settings. Provider credentials never live here; they belong to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub backend: BackendSettings,
    pub preferences: UserPreferences,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub default_language: Language,
    pub default_provider: Provider,
    pub default_action: Action,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backend: BackendSettings {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            preferences: UserPreferences {
                default_language: Language::default(),
                default_provider: Provider::default(),
                default_action: Action::default(),
            },
            log_level: default_log_level(),
        }
    }
}

impl AppSettings {
    pub fn get_settings_path() -> AppResult<PathBuf> {
        ProjectDirs::from("com", "translation-widget", "translation-widget")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| AppError::Config("Failed to determine config directory".to_string()))
    }

    /// Load settings from the platform config directory, writing defaults on first run.
    pub async fn load() -> AppResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            info!(path = %path.display(), "settings file missing, writing defaults");
            let settings = Self::default();
            settings.save_to(path).await?;
            return Ok(settings);
        }

        let content = fs::read_to_string(path).await
            .map_err(|e| AppError::Config(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Self = serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse settings: {}", e)))?;
        if settings.backend.timeout_secs == 0 {
            warn!(path = %path.display(), "timeout_secs must be positive, using {}", DEFAULT_TIMEOUT_SECS);
            settings.backend.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        debug!(path = %path.display(), endpoint = %settings.backend.endpoint, "settings loaded");
        Ok(settings)
    }

    pub async fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await
                .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;

        fs::write(path, content).await
            .map_err(|e| AppError::Config(format!("Failed to write settings file: {}", e)))
    }

    /// Apply `TRANSLATION_BACKEND_URL` / `TRANSLATION_TIMEOUT_SECS`.
    pub fn apply_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_ENDPOINT).ok(),
            std::env::var(ENV_TIMEOUT).ok(),
        )
    }

    pub fn with_overrides(mut self, endpoint: Option<String>, timeout_secs: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.backend.endpoint = endpoint.trim().to_string();
        }
        if let Some(raw) = timeout_secs {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.backend.timeout_secs = secs,
                _ => warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT),
            }
        }
        self
    }
}
