//! GitHub API client using octocrab

use std::time::Duration;

use crate::{Error, Result};
use octocrab::Octocrab;
use tracing::{debug, info};

/// GitHub API client bound to one repository
pub struct GitHubClient {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Create a new GitHub client for the specified repository
    ///
    /// Every request is bounded by `timeout` (connect, read and write).
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();

        let client = Octocrab::builder()
            .personal_token(token.into())
            .set_connect_timeout(Some(timeout))
            .set_read_timeout(Some(timeout))
            .set_write_timeout(Some(timeout))
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!(owner = %owner, repo = %repo, timeout = ?timeout, "Created GitHub client");

        Ok(Self::from_octocrab(client, owner, repo))
    }

    /// Wrap an already configured octocrab client
    pub fn from_octocrab(
        client: Octocrab,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Create a client from the repository flags
    ///
    /// `repository` may be a bare name (then `owner` is required), `owner/repo`,
    /// or a GitHub URL in HTTPS or SSH form.
    pub fn for_repository(
        owner: Option<&str>,
        repository: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let (owner, repo) = resolve_repository(owner, repository)?;
        Self::new(owner, repo, token, timeout)
    }

    /// Get the repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    /// REST route below the repository, e.g. `issues/comments`
    pub(crate) fn route(&self, path: &str) -> String {
        format!("/repos/{}/{}/{}", self.owner, self.repo, path)
    }

    /// Test the connection by fetching repository info
    pub async fn test_connection(&self) -> Result<()> {
        debug!(
            owner = %self.owner,
            repo = %self.repo,
            "Testing GitHub connection"
        );

        self.client
            .repos(&self.owner, &self.repo)
            .get()
            .await
            .map_err(|e| {
                let message = match &e {
                    octocrab::Error::GitHub { source, .. } => source.message.clone(),
                    _ => String::new(),
                };
                if message.contains("Not Found") {
                    Error::Other(format!(
                        "Repository {}/{} not found or not accessible",
                        self.owner, self.repo
                    ))
                } else if message.contains("Bad credentials") {
                    Error::Auth("Invalid GitHub token".to_string())
                } else {
                    Error::Api(e)
                }
            })?;

        info!("GitHub connection successful");
        Ok(())
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

/// Combine the owner flag and the repository flag into (owner, repo)
fn resolve_repository(owner: Option<&str>, repository: &str) -> Result<(String, String)> {
    if !repository.contains('/') && !repository.contains(':') {
        return match owner {
            Some(owner) if !owner.is_empty() => Ok((owner.to_string(), repository.to_string())),
            _ => Err(Error::Parse(format!(
                "Repository '{}' needs an owner. Pass --owner or use owner/repo",
                repository
            ))),
        };
    }
    parse_github_url(repository)
}

/// Parse a GitHub URL into owner and repo
fn parse_github_url(url: &str) -> Result<(String, String)> {
    if !url.contains("://") && !url.contains('@') {
        // Simple owner/repo format
        let parts: Vec<&str> = url.split('/').collect();
        if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            return Ok((
                parts[0].to_string(),
                parts[1].trim_end_matches(".git").to_string(),
            ));
        }
        return Err(Error::Parse(format!(
            "Invalid repository format: {}. Expected owner/repo",
            url
        )));
    }

    // Handle HTTPS URL: https://github.com/owner/repo
    if url.starts_with("https://") || url.starts_with("http://") {
        let url = url::Url::parse(url).map_err(|e| Error::Parse(e.to_string()))?;
        let path = url.path().trim_start_matches('/').trim_end_matches(".git");
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() >= 2 {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
        return Err(Error::Parse(format!("Invalid GitHub URL path: {}", path)));
    }

    // Handle SSH URL: git@github.com:owner/repo.git
    if url.starts_with("git@") {
        if let Some(path) = url.split(':').nth(1) {
            let path = path.trim_end_matches(".git");
            let parts: Vec<&str> = path.split('/').collect();
            if parts.len() >= 2 {
                return Ok((parts[0].to_string(), parts[1].to_string()));
            }
        }
        return Err(Error::Parse(format!("Invalid SSH URL: {}", url)));
    }

    Err(Error::Parse(format!("Unrecognized URL format: {}", url)))
}
