use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, path::PathBuf};

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

pub const DEFAULT_CITY: &str = "Mumbai";
pub const DEFAULT_RELAY_URL: &str = "https://api.allorigins.win/get";
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.weatherapi.com/v1/current.json";

/// Secret API key for the upstream weather provider.
///
/// `Debug` is redacted so the key never ends up in logs or panic messages.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Mumbai"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKey>,

    /// City searched automatically when the widget is mounted.
    pub default_city: String,

    /// Content-relay endpoint that wraps the upstream response in `contents`.
    pub relay_url: String,

    /// Upstream `current.json` endpoint.
    pub upstream_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_city: DEFAULT_CITY.to_string(),
            relay_url: DEFAULT_RELAY_URL.to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from the platform config dir and apply the environment override.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_env_override(std::env::var(API_KEY_ENV).ok());
        Ok(cfg)
    }

    /// Load config from `path`, or return defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config dir.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// A non-empty value from the environment wins over the stored key.
    pub fn apply_env_override(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|v| !v.trim().is_empty()) {
            self.api_key = Some(ApiKey::new(key.trim()));
        }
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.api_key = Some(ApiKey::new(key));
    }

    /// Returns the API key or a configuration error with a hint.
    pub fn require_api_key(&self) -> Result<&ApiKey> {
        self.api_key.as_ref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `cityweather configure` or set {API_KEY_ENV}."
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_endpoints() {
        let cfg = Config::default();

        assert_eq!(cfg.default_city, "Mumbai");
        assert_eq!(cfg.relay_url, DEFAULT_RELAY_URL);
        assert_eq!(cfg.upstream_url, DEFAULT_UPSTREAM_URL);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn require_api_key_errors_when_missing() {
        let cfg = Config::default();
        let err = cfg.require_api_key().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `cityweather configure`"));
    }

    #[test]
    fn env_override_replaces_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FROM_FILE");

        cfg.apply_env_override(Some(" FROM_ENV ".into()));

        assert_eq!(cfg.require_api_key().unwrap().expose(), "FROM_ENV");
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let mut cfg = Config::default();
        cfg.set_api_key("FROM_FILE");

        cfg.apply_env_override(Some("   ".into()));
        cfg.apply_env_override(None);

        assert_eq!(cfg.require_api_key().unwrap().expose(), "FROM_FILE");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("SUPER_SECRET");

        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("SUPER_SECRET"));
        assert!(dbg.contains("***"));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("api_key = \"K\"\n").unwrap();

        assert_eq!(cfg.require_api_key().unwrap().expose(), "K");
        assert_eq!(cfg.default_city, DEFAULT_CITY);
        assert_eq!(cfg.relay_url, DEFAULT_RELAY_URL);
    }
}
