//! Configuration management for jira2gh
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (JIRA2GH_*)
//! 3. Config file (~/.config/jira2gh/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default JIRA browse URL prefix matched by the URL reference rule
pub const DEFAULT_BROWSE_URL: &str = "https://java.net/jira/browse/";

/// Target repository settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Repository owner or organization
    pub owner: Option<String>,

    /// Repository name, `owner/name`, or a GitHub URL
    pub repository: Option<String>,
}

/// Source tracker settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JiraConfig {
    /// Prefix of issue URLs in the JIRA instance
    pub browse_url: String,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            browse_url: DEFAULT_BROWSE_URL.to_string(),
        }
    }
}

/// Pacing of the import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Fixed delay before each issue
    #[serde(with = "humantime_serde")]
    pub issue_delay: Duration,

    /// Timeout for a single request to the tracker
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Extra wait after a rate-limit window resets
    #[serde(with = "humantime_serde")]
    pub rate_limit_margin: Duration,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            issue_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(120),
            rate_limit_margin: Duration::from_secs(2),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub jira: JiraConfig,
    pub import: ImportSettings,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/jira2gh/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jira2gh").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - JIRA2GH_OWNER: repository owner
    /// - JIRA2GH_REPOSITORY: repository name
    /// - JIRA2GH_BROWSE_URL: JIRA browse URL prefix
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(owner) = std::env::var("JIRA2GH_OWNER") {
            self.github.owner = Some(owner);
        }

        if let Ok(repository) = std::env::var("JIRA2GH_REPOSITORY") {
            self.github.repository = Some(repository);
        }

        if let Ok(url) = std::env::var("JIRA2GH_BROWSE_URL") {
            self.jira.browse_url = url;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, owner: Option<String>, repository: Option<String>) -> Self {
        if let Some(owner) = owner {
            self.github.owner = Some(owner);
        }

        if let Some(repository) = repository {
            self.github.repository = Some(repository);
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        path: Option<&Path>,
        owner: Option<String>,
        repository: Option<String>,
    ) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };
        Ok(config
            .with_env_overrides()
            .with_cli_overrides(owner, repository))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github.owner.is_none());
        assert_eq!(config.jira.browse_url, DEFAULT_BROWSE_URL);
        assert_eq!(config.import.issue_delay, Duration::from_secs(2));
        assert_eq!(config.import.request_timeout, Duration::from_secs(120));
        assert_eq!(config.import.rate_limit_margin, Duration::from_secs(2));
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default()
            .with_cli_overrides(Some("acme".to_string()), Some("widgets".to_string()));

        assert_eq!(config.github.owner.as_deref(), Some("acme"));
        assert_eq!(config.github.repository.as_deref(), Some("widgets"));
    }

    #[test]
    fn test_cli_overrides_keep_file_values() {
        let mut config = Config::default();
        config.github.owner = Some("from-file".to_string());
        let config = config.with_cli_overrides(None, Some("widgets".to_string()));
        assert_eq!(config.github.owner.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[github]
owner = "acme"
repository = "widgets"

[jira]
browse_url = "https://issues.example.org/browse/"

[import]
issue_delay = "500ms"
request_timeout = "30s"
rate_limit_margin = "5s"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.github.owner.as_deref(), Some("acme"));
        assert_eq!(config.jira.browse_url, "https://issues.example.org/browse/");
        assert_eq!(config.import.issue_delay, Duration::from_millis(500));
        assert_eq!(config.import.request_timeout, Duration::from_secs(30));
        assert_eq!(config.import.rate_limit_margin, Duration::from_secs(5));
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[import]
issue_delay = "1s"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.import.issue_delay, Duration::from_secs(1));
        // the rest falls back to defaults
        assert_eq!(config.import.request_timeout, Duration::from_secs(120));
        assert_eq!(config.jira.browse_url, DEFAULT_BROWSE_URL);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[github]\nrepository = \"acme/widgets\"").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.github.repository.as_deref(), Some("acme/widgets"));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[import]\nissue_delay = \"soon\"").unwrap();

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
