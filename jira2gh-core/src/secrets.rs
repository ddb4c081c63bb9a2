//! Access token lookup
//!
//! The token is kept out of the config file. The secrets file is located at
//! `~/.config/jira2gh/secrets.toml` and must have restrictive permissions
//! (0600 on Unix).
//!
//! Loading priority:
//! 1. Explicit token (the `--access-token` flag)
//! 2. Environment variable (GITHUB_TOKEN)
//! 3. Secrets file (~/.config/jira2gh/secrets.toml)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    pub github: GitHubSecrets,
}

/// GitHub-related secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubSecrets {
    /// GitHub Personal Access Token
    pub token: Option<String>,
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_secrets_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &Path) -> Result<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mode = std::fs::metadata(path).map_err(Error::Io)?.permissions().mode();
            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        if let Some(ref mut token) = secrets.github.token {
            *token = token.trim().to_string();
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/jira2gh/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jira2gh").join("secrets.toml"))
    }

    /// Pick the token to use
    ///
    /// Priority: explicit token > GITHUB_TOKEN env var > secrets file
    pub fn github_token(&self, explicit: Option<&str>) -> Option<String> {
        let from_env = std::env::var("GITHUB_TOKEN").ok();
        pick_token(explicit, from_env.as_deref(), self.github.token.as_deref())
    }
}

fn pick_token(explicit: Option<&str>, env: Option<&str>, file: Option<&str>) -> Option<String> {
    let sources = [("flag", explicit), ("GITHUB_TOKEN", env), ("secrets file", file)];
    sources.into_iter().find_map(|(source, token)| {
        let token = token?.trim();
        if token.is_empty() {
            return None;
        }
        debug!(source, "Using GitHub token");
        Some(token.to_string())
    })
}
