use anyhow::{Context, Result};
use restkit::{Credentials, PollConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `environment_url`.
pub const URL_ENV: &str = "CFGCTL_URL";
/// Environment variable overriding the API token.
pub const TOKEN_ENV: &str = "CFGCTL_TOKEN";

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("cfgctl"))
}

/// Get the config file path
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the configuration API, e.g. `https://abc123.live.example.com/api/config/v1`
    pub environment_url: Option<String>,
    /// API token, stored in the file
    pub api_token: Option<String>,
    /// Name of an environment variable holding the API token
    pub api_token_env: Option<String>,
    /// Overall request timeout
    pub timeout_secs: Option<u64>,
    pub poll: PollSettings,
}

/// Creation polling for web applications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    pub attempts: u32,
    pub delay_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        let poll = PollConfig::default();
        Self {
            attempts: poll.max_attempts,
            delay_secs: poll.delay.as_secs(),
        }
    }
}

impl PollSettings {
    pub fn to_poll_config(&self) -> PollConfig {
        PollConfig::new(self.attempts, Duration::from_secs(self.delay_secs))
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load a config file from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Save the config file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply `CFGCTL_URL` / `CFGCTL_TOKEN` and command line overrides.
    ///
    /// `lookup` resolves environment variables; it is `std::env::var` outside tests.
    pub fn with_overrides(
        mut self,
        url: Option<String>,
        token: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        if let Some(env_url) = lookup(URL_ENV) {
            self.environment_url = Some(env_url);
        }
        if let Some(env_token) = lookup(TOKEN_ENV) {
            self.api_token = Some(env_token);
        } else if let Some(var) = &self.api_token_env {
            if let Some(env_token) = lookup(var) {
                self.api_token = Some(env_token);
            }
        }
        if url.is_some() {
            self.environment_url = url;
        }
        if token.is_some() {
            self.api_token = token;
        }
        self
    }

    /// The base URL, or an error telling the user how to set it
    pub fn url(&self) -> Result<&str> {
        self.environment_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .with_context(|| {
                format!("No environment URL configured. Set {URL_ENV}, pass --url, or add environment_url to the config file")
            })
    }

    /// The API token credentials
    pub fn credentials(&self) -> Result<Credentials> {
        let token = self
            .api_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .with_context(|| {
                format!("No API token configured. Set {TOKEN_ENV}, pass --token, or set api_token_env in the config file")
            })?;
        Ok(Credentials::api_token(token))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.poll.attempts, 40);
        assert_eq!(config.poll.delay_secs, 3);
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
environment_url = "https://abc.example.com/api/config/v1"
api_token_env = "MY_TOKEN"
timeout_secs = 10

[poll]
attempts = 5
delay_secs = 1
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.url().unwrap(), "https://abc.example.com/api/config/v1");
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.poll.to_poll_config().max_attempts, 5);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "environment_url = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            environment_url: Some("https://x/api/config/v1".to_string()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_env_overrides_file() {
        let config = Config {
            environment_url: Some("https://file".to_string()),
            api_token: Some("file-token".to_string()),
            ..Config::default()
        }
        .with_overrides(
            None,
            None,
            env(&[(URL_ENV, "https://env"), (TOKEN_ENV, "env-token")]),
        );
        assert_eq!(config.url().unwrap(), "https://env");
        assert_eq!(config.api_token.as_deref(), Some("env-token"));
    }

    #[test]
    fn test_token_from_named_variable() {
        let config = Config {
            api_token_env: Some("MY_TOKEN".to_string()),
            ..Config::default()
        }
        .with_overrides(None, None, env(&[("MY_TOKEN", "named")]));
        assert_eq!(config.api_token.as_deref(), Some("named"));
    }

    #[test]
    fn test_flags_win_over_env() {
        let config = Config::default().with_overrides(
            Some("https://flag".to_string()),
            Some("flag-token".to_string()),
            env(&[(URL_ENV, "https://env"), (TOKEN_ENV, "env-token")]),
        );
        assert_eq!(config.url().unwrap(), "https://flag");
        assert_eq!(config.api_token.as_deref(), Some("flag-token"));
    }

    #[test]
    fn test_missing_url_and_token_are_errors() {
        let config = Config::default();
        assert!(config.url().is_err());
        assert!(config.credentials().is_err());
    }
}
