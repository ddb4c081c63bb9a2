//! Target issue tracker interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Current request budget of the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Calls left in the current window
    pub remaining: u64,
    /// When the window resets
    pub reset: DateTime<Utc>,
}

/// An issue to be created
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    /// Milestone number on the tracker
    pub milestone: Option<u64>,
    pub labels: Vec<String>,
}

/// A comment that already exists on the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteComment {
    pub id: u64,
    /// Addressable location of the comment
    pub url: String,
    pub body: String,
}

/// One page of a comment listing
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub comments: Vec<RemoteComment>,
    /// Cursor for the following page; `None` on the last page
    pub next: Option<String>,
}

/// Operations the migration needs from the target tracker
///
/// Every failure is surfaced as an error; deciding whether it is fatal is up
/// to the caller.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Current rate limit window
    async fn rate_limit(&self) -> Result<RateLimit>;

    /// Create a milestone, or find the existing one with this title
    async fn create_milestone(&self, title: &str) -> Result<u64>;

    /// Create a label with a six hex digit color
    async fn create_label(&self, name: &str, color: &str) -> Result<()>;

    /// Create an issue and return its number
    async fn create_issue(&self, issue: &NewIssue) -> Result<u64>;

    /// Add a comment to an issue and return the comment id
    async fn create_comment(&self, issue: u64, body: &str) -> Result<u64>;

    /// Close an issue
    async fn close_issue(&self, issue: u64) -> Result<()>;

    /// List one page of the repository's comments
    ///
    /// `None` asks for the first page; later pages use the cursor from the
    /// previous [`CommentPage::next`].
    async fn list_comments(&self, cursor: Option<&str>) -> Result<CommentPage>;

    /// Replace the body of an existing comment
    async fn patch_comment(&self, comment: &RemoteComment, body: &str) -> Result<()>;
}
