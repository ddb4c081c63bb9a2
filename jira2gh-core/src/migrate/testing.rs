//! In-memory tracker and clock for pipeline tests

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use super::Clock;
use crate::tracker::{CommentPage, IssueTracker, NewIssue, RateLimit, RemoteComment};
use crate::{Error, Result};

/// Records every call and fails where told to
#[derive(Default)]
pub struct FakeTracker {
    pub remaining: u64,
    pub reset: i64,
    pub fail_milestones: Vec<String>,
    pub fail_labels: Vec<String>,
    pub fail_issues: Vec<String>,
    /// Comment bodies containing this text fail
    pub fail_comment_containing: Option<String>,
    /// Listing the page at this index fails
    pub fail_list_at: Option<usize>,
    pub fail_patch_id: Option<u64>,
    pub pages: Vec<Vec<RemoteComment>>,
    pub state: Mutex<Recorded>,
}

#[derive(Default, Debug)]
pub struct Recorded {
    pub calls: Vec<String>,
    pub milestones: Vec<String>,
    pub labels: Vec<(String, String)>,
    pub issues: Vec<NewIssue>,
    pub comments: Vec<(u64, String)>,
    pub closed: Vec<u64>,
    pub listed: Vec<Option<String>>,
    pub patched: Vec<(u64, String)>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self {
            remaining: 5000,
            ..Default::default()
        }
    }

    pub fn with_pages(pages: Vec<Vec<RemoteComment>>) -> Self {
        Self {
            pages,
            ..Self::new()
        }
    }

    pub fn recorded<R>(&self, f: impl FnOnce(&Recorded) -> R) -> R {
        f(&self.state.lock().unwrap())
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

fn failure(status: u16, message: &str) -> Error {
    Error::Tracker {
        status: Some(status),
        message: message.to_string(),
    }
}

pub fn remote(id: u64, body: &str) -> RemoteComment {
    RemoteComment {
        id,
        url: format!("https://api.example.org/comments/{}", id),
        body: body.to_string(),
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn rate_limit(&self) -> Result<RateLimit> {
        self.record("rate_limit".to_string());
        Ok(RateLimit {
            remaining: self.remaining,
            reset: at(self.reset),
        })
    }

    async fn create_milestone(&self, title: &str) -> Result<u64> {
        self.record(format!("create_milestone {}", title));
        if self.fail_milestones.iter().any(|m| m == title) {
            return Err(failure(500, "milestone failed"));
        }
        let mut state = self.state.lock().unwrap();
        state.milestones.push(title.to_string());
        Ok(state.milestones.len() as u64)
    }

    async fn create_label(&self, name: &str, color: &str) -> Result<()> {
        self.record(format!("create_label {}", name));
        if self.fail_labels.iter().any(|l| l == name) {
            return Err(failure(422, "already_exists"));
        }
        self.state
            .lock()
            .unwrap()
            .labels
            .push((name.to_string(), color.to_string()));
        Ok(())
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<u64> {
        self.record(format!("create_issue {}", issue.title));
        if self.fail_issues.contains(&issue.title) {
            return Err(failure(500, "issue failed"));
        }
        let mut state = self.state.lock().unwrap();
        state.issues.push(issue.clone());
        Ok(state.issues.len() as u64)
    }

    async fn create_comment(&self, issue: u64, body: &str) -> Result<u64> {
        self.record(format!("create_comment {}", issue));
        if let Some(ref needle) = self.fail_comment_containing {
            if body.contains(needle.as_str()) {
                return Err(failure(500, "comment failed"));
            }
        }
        let mut state = self.state.lock().unwrap();
        state.comments.push((issue, body.to_string()));
        Ok(state.comments.len() as u64)
    }

    async fn close_issue(&self, issue: u64) -> Result<()> {
        self.record(format!("close_issue {}", issue));
        self.state.lock().unwrap().closed.push(issue);
        Ok(())
    }

    async fn list_comments(&self, cursor: Option<&str>) -> Result<CommentPage> {
        self.state
            .lock()
            .unwrap()
            .listed
            .push(cursor.map(str::to_string));

        let index = match cursor {
            None => 0,
            Some(c) => c
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| failure(400, "bad cursor"))?,
        };
        if self.fail_list_at == Some(index) {
            return Err(failure(502, "listing failed"));
        }

        let comments = self.pages.get(index).cloned().unwrap_or_default();
        let next = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));
        Ok(CommentPage { comments, next })
    }

    async fn patch_comment(&self, comment: &RemoteComment, body: &str) -> Result<()> {
        if self.fail_patch_id == Some(comment.id) {
            return Err(failure(500, "patch failed"));
        }
        self.state
            .lock()
            .unwrap()
            .patched
            .push((comment.id, body.to_string()));
        Ok(())
    }
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Clock frozen at a fixed instant that records sleeps
pub struct ManualClock {
    pub now: DateTime<Utc>,
    pub sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn at(secs: i64) -> Self {
        Self {
            now: at(secs),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
