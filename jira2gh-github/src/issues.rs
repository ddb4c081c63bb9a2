//! Milestone, label, issue and comment creation

use crate::{Error, GitHubClient, Result};
use jira2gh_core::NewIssue;
use octocrab::models::IssueState;
use octocrab::Page;
use serde::Deserialize;
use tracing::{debug, info};

/// Milestone fields we read back from GitHub
#[derive(Debug, Clone, Deserialize)]
struct Milestone {
    number: u64,
    title: String,
}

impl GitHubClient {
    /// Create a milestone, or find the existing one with this title
    ///
    /// GitHub answers 422 when the title is taken; the milestone is then
    /// looked up among open and closed milestones.
    pub async fn create_milestone(&self, title: &str) -> Result<u64> {
        debug!(title, "Creating milestone");

        let created: std::result::Result<Milestone, octocrab::Error> = self
            .client()
            .post(
                self.route("milestones"),
                Some(&serde_json::json!({ "title": title })),
            )
            .await;

        match created {
            Ok(milestone) => Ok(milestone.number),
            Err(e) => {
                let err = Error::Api(e);
                if err.status() != Some(422) {
                    return Err(err);
                }
                info!(title, "Milestone already exists, looking it up");
                self.find_milestone(title)
                    .await?
                    .ok_or_else(|| Error::Other(format!("Could not find milestone: {}", title)))
            }
        }
    }

    /// Look a milestone up by title, following every page of the listing
    async fn find_milestone(&self, title: &str) -> Result<Option<u64>> {
        let first: Page<Milestone> = self
            .client()
            .get(
                self.route("milestones"),
                Some(&[("state", "all"), ("per_page", "100")]),
            )
            .await?;
        let milestones = self.client().all_pages(first).await?;

        Ok(milestones
            .into_iter()
            .find(|m| m.title == title)
            .map(|m| m.number))
    }

    /// Create a label
    pub async fn create_label(&self, name: &str, color: &str) -> Result<()> {
        debug!(name, color, "Creating label");

        self.client()
            .issues(self.owner(), self.repo())
            .create_label(name, color, "")
            .await?;

        Ok(())
    }

    /// Create an issue and return its number
    pub async fn create_issue(&self, issue: &NewIssue) -> Result<u64> {
        debug!(title = %issue.title, "Creating issue");

        let created = self
            .client()
            .issues(self.owner(), self.repo())
            .create(&issue.title)
            .body(&issue.body)
            .labels(issue.labels.clone())
            .milestone(issue.milestone)
            .send()
            .await?;

        info!(number = created.number, title = %issue.title, "Created issue");
        Ok(created.number)
    }

    /// Add a comment to an issue and return the comment id
    pub async fn create_comment(&self, number: u64, body: &str) -> Result<u64> {
        let comment = self
            .client()
            .issues(self.owner(), self.repo())
            .create_comment(number, body)
            .await?;

        Ok(comment.id.0)
    }

    /// Close an issue
    pub async fn close_issue(&self, number: u64) -> Result<()> {
        debug!(number, "Closing issue");

        self.client()
            .issues(self.owner(), self.repo())
            .update(number)
            .state(IssueState::Closed)
            .send()
            .await?;

        Ok(())
    }
}
