use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECONDS, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the fantasy league API. Should include the https:// prefix.
    pub api_base_url: String,
    /// Path to the log file. If not specified, logs go to the default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Environment variables override config file values.
    ///
    /// # Environment Variables
    /// - `FPL_API_BASE_URL` - Override API base URL
    /// - `FPL_LOG_FILE` - Override log file path
    /// - `FPL_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// When no config file exists the base URL must come from
    /// `FPL_API_BASE_URL`; otherwise loading fails with a configuration
    /// error explaining both options.
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();
        Self::load_from_path(&config_path).await
    }

    /// Loads configuration from a specific path, applying the same
    /// environment overrides as [`Config::load`].
    pub async fn load_from_path(config_path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(config_path).exists() {
            let content = fs::read_to_string(config_path).await?;
            toml::from_str(&content)?
        } else if let Ok(api_base_url) = std::env::var(env_vars::API_BASE_URL) {
            Config {
                api_base_url,
                ..Default::default()
            }
        } else {
            return Err(AppError::config_error(format!(
                "No config file at {config_path} and {} is not set; \
                 run with --config <BASE_URL> or export the variable",
                env_vars::API_BASE_URL
            )));
        };

        // Environment variables take precedence over the config file
        if let Ok(api_base_url) = std::env::var(env_vars::API_BASE_URL) {
            config.api_base_url = api_base_url;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(AppError::config_error("API base URL must not be empty"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::config_error(format!(
                "API base URL must start with http:// or https://, got '{url}'"
            )));
        }
        if self.http_timeout_seconds == 0 {
            return Err(AppError::config_error(
                "HTTP timeout must be at least 1 second",
            ));
        }
        Ok(())
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        self.save_to_path(&get_config_path()).await
    }

    /// Saves current configuration to a specific path, creating parent
    /// directories as needed. Uses TOML format.
    pub async fn save_to_path(&self, config_path: &str) -> Result<(), AppError> {
        if let Some(parent) = Path::new(config_path).parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(config_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Prints the current configuration and where it was loaded from
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let config = Config::load().await?;
        println!("Config file: {config_path}");
        println!("API base URL: {}", config.api_base_url);
        println!(
            "Log file: {}",
            config
                .log_file_path
                .as_deref()
                .unwrap_or("(default location)")
        );
        println!("HTTP timeout: {}s", config.http_timeout_seconds);
        Ok(())
    }
}

/// Returns the platform-specific path for the config file.
///
/// Uses the platform config directory (e.g. ~/.config on Linux), falling
/// back to the current directory if it is unavailable.
pub fn get_config_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("fpl_gameweek")
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory
pub fn get_log_dir_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("fpl_gameweek")
        .join("logs")
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // set_var/remove_var are unsafe in edition 2024; these tests are
        // serialized so the process environment is not mutated concurrently
        unsafe {
            std::env::remove_var(env_vars::API_BASE_URL);
            std::env::remove_var(env_vars::LOG_FILE);
            std::env::remove_var(env_vars::HTTP_TIMEOUT);
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_save_and_load_round_trip() {
        clear_env();

        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join("config.toml")
            .to_string_lossy()
            .to_string();

        let config = Config {
            api_base_url: "https://example.com/api/".to_string(),
            log_file_path: Some("/tmp/fpl.log".to_string()),
            http_timeout_seconds: 10,
        };
        config.save_to_path(&path).await.unwrap();

        let loaded = Config::load_from_path(&path).await.unwrap();
        assert_eq!(loaded.api_base_url, "https://example.com/api/");
        assert_eq!(loaded.log_file_path.as_deref(), Some("/tmp/fpl.log"));
        assert_eq!(loaded.http_timeout_seconds, 10);
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_file_requires_env_var() {
        clear_env();

        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join("missing.toml")
            .to_string_lossy()
            .to_string();

        let result = Config::load_from_path(&path).await;
        assert!(matches!(result, Err(AppError::Config(_))));

        unsafe {
            std::env::set_var(env_vars::API_BASE_URL, "https://env.example.com/api/");
        }
        let loaded = Config::load_from_path(&path).await.unwrap();
        assert_eq!(loaded.api_base_url, "https://env.example.com/api/");
        assert_eq!(loaded.http_timeout_seconds, DEFAULT_HTTP_TIMEOUT_SECONDS);

        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn test_env_overrides_config_file() {
        clear_env();

        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join("config.toml")
            .to_string_lossy()
            .to_string();

        let config = Config {
            api_base_url: "https://file.example.com/api/".to_string(),
            log_file_path: None,
            http_timeout_seconds: 30,
        };
        config.save_to_path(&path).await.unwrap();

        unsafe {
            std::env::set_var(env_vars::API_BASE_URL, "https://env.example.com/api/");
            std::env::set_var(env_vars::HTTP_TIMEOUT, "5");
        }
        let loaded = Config::load_from_path(&path).await.unwrap();
        assert_eq!(loaded.api_base_url, "https://env.example.com/api/");
        assert_eq!(loaded.http_timeout_seconds, 5);

        clear_env();
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config {
            api_base_url: "example.com/api".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.api_base_url = String::new();
        assert!(config.validate().is_err());

        config.api_base_url = "https://example.com/api/".to_string();
        assert!(config.validate().is_ok());
    }
}
