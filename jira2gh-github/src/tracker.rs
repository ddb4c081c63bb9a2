//! GitHub as the migration target

use async_trait::async_trait;
use jira2gh_core::{CommentPage, IssueTracker, NewIssue, RateLimit, RemoteComment};

use crate::GitHubClient;

// Inherent methods are named after the trait methods; the calls below go
// through the type path so they never recurse into the trait.
#[async_trait]
impl IssueTracker for GitHubClient {
    async fn rate_limit(&self) -> jira2gh_core::Result<RateLimit> {
        Ok(GitHubClient::rate_limit(self).await?)
    }

    async fn create_milestone(&self, title: &str) -> jira2gh_core::Result<u64> {
        Ok(GitHubClient::create_milestone(self, title).await?)
    }

    async fn create_label(&self, name: &str, color: &str) -> jira2gh_core::Result<()> {
        Ok(GitHubClient::create_label(self, name, color).await?)
    }

    async fn create_issue(&self, issue: &NewIssue) -> jira2gh_core::Result<u64> {
        Ok(GitHubClient::create_issue(self, issue).await?)
    }

    async fn create_comment(&self, issue: u64, body: &str) -> jira2gh_core::Result<u64> {
        Ok(GitHubClient::create_comment(self, issue, body).await?)
    }

    async fn close_issue(&self, issue: u64) -> jira2gh_core::Result<()> {
        Ok(GitHubClient::close_issue(self, issue).await?)
    }

    async fn list_comments(&self, cursor: Option<&str>) -> jira2gh_core::Result<CommentPage> {
        Ok(GitHubClient::list_comments(self, cursor).await?)
    }

    async fn patch_comment(
        &self,
        comment: &RemoteComment,
        body: &str,
    ) -> jira2gh_core::Result<()> {
        Ok(GitHubClient::patch_comment(self, comment, body).await?)
    }
}
