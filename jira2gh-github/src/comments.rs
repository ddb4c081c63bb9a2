//! Repository-wide comment listing and patching

use crate::{GitHubClient, Result};
use chrono::{DateTime, Utc};
use jira2gh_core::{CommentPage, RateLimit, RemoteComment};
use octocrab::models::issues::Comment;
use octocrab::models::CommentId;
use octocrab::Page;
use serde::Deserialize;
use tracing::debug;

/// Comments requested per page
const PER_PAGE: u8 = 100;

#[derive(Debug, Deserialize)]
struct RateLimitResponse {
    resources: RateLimitResources,
}

#[derive(Debug, Deserialize)]
struct RateLimitResources {
    core: CoreRate,
}

#[derive(Debug, Deserialize)]
struct CoreRate {
    remaining: u64,
    /// Unix timestamp of the window reset
    reset: i64,
}

impl From<CoreRate> for RateLimit {
    fn from(rate: CoreRate) -> Self {
        RateLimit {
            remaining: rate.remaining,
            reset: DateTime::<Utc>::from_timestamp(rate.reset, 0).unwrap_or_else(Utc::now),
        }
    }
}

fn remote_comment(comment: Comment) -> RemoteComment {
    RemoteComment {
        id: comment.id.0,
        url: comment.url.to_string(),
        body: comment.body.unwrap_or_default(),
    }
}

impl GitHubClient {
    /// Current core rate limit window
    pub async fn rate_limit(&self) -> Result<RateLimit> {
        let response: RateLimitResponse = self
            .client()
            .get("/rate_limit", None::<&()>)
            .await?;

        Ok(response.resources.core.into())
    }

    /// Fetch one page of the repository's issue comments
    ///
    /// Without a cursor the first page is fetched; otherwise the cursor is
    /// the `next` link GitHub returned with the previous page.
    pub async fn list_comments(&self, cursor: Option<&str>) -> Result<CommentPage> {
        let route = match cursor {
            Some(next) => next.to_string(),
            None => format!("{}?per_page={}", self.route("issues/comments"), PER_PAGE),
        };
        debug!(route = %route, "Listing comments");

        let page: Page<Comment> = self.client().get(route, None::<&()>).await?;

        Ok(CommentPage {
            next: page.next.as_ref().map(|uri| uri.to_string()),
            comments: page.items.into_iter().map(remote_comment).collect(),
        })
    }

    /// Replace a comment body
    pub async fn patch_comment(&self, comment: &RemoteComment, body: &str) -> Result<()> {
        debug!(url = %comment.url, "Patching comment");

        self.client()
            .issues(self.owner(), self.repo())
            .update_comment(CommentId(comment.id), body)
            .await?;

        Ok(())
    }
}
