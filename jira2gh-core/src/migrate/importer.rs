//! Best-effort import of milestones, labels, issues and comments

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{wait_for_rate_limit, Clock, MigrationContext};
use crate::model::{Issue, Project};
use crate::resolve::{resolve_issue, ReferenceRewriter};
use crate::tracker::{IssueTracker, NewIssue};
use crate::Error;

/// Result of importing a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    /// Milestone name -> milestone number
    pub milestones: HashMap<String, u64>,
    /// Number of labels created
    pub labels: usize,
    /// JIRA key -> issue number
    pub issues: HashMap<String, u64>,
    /// Number of comments created
    pub comments: usize,
    /// Number of issues closed after import
    pub closed: usize,
    /// Every failure that was logged and skipped
    pub errors: Vec<String>,
}

/// Creates a project's milestones, labels and issues on the tracker
///
/// Every failure here is logged, recorded in the report and skipped; the
/// import always runs to the end.
pub struct Importer<'a, T: ?Sized, C: ?Sized> {
    ctx: MigrationContext<'a, T, C>,
    rewriter: ReferenceRewriter,
}

impl<'a, T, C> Importer<'a, T, C>
where
    T: IssueTracker + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(ctx: MigrationContext<'a, T, C>, rewriter: ReferenceRewriter) -> Self {
        Self { ctx, rewriter }
    }

    /// Run milestones, labels and issues in that order
    pub async fn import_project(&self, project: Project) -> ImportReport {
        let mut report = ImportReport::default();
        self.import_milestones(&project, &mut report).await;
        self.import_labels(&project, &mut report).await;
        self.import_issues(project.issues, &mut report).await;

        info!(
            issues = report.issues.len(),
            comments = report.comments,
            errors = report.errors.len(),
            "Import finished"
        );
        report
    }

    /// Create every milestone and remember its number
    pub async fn import_milestones(&self, project: &Project, report: &mut ImportReport) {
        info!(count = project.milestones.len(), "Importing milestones");
        for title in &project.milestones {
            match self.ctx.tracker.create_milestone(title).await {
                Ok(number) => {
                    debug!(title = %title, number, "Created milestone");
                    report.milestones.insert(title.clone(), number);
                }
                Err(e) => record(report, format!("Failed to create milestone '{}'", title), e),
            }
        }
    }

    /// Create every label with a random color
    pub async fn import_labels(&self, project: &Project, report: &mut ImportReport) {
        info!(count = project.labels.len(), "Importing labels");
        for name in &project.labels {
            match self.ctx.tracker.create_label(name, &random_color()).await {
                Ok(()) => {
                    debug!(name = %name, "Created label");
                    report.labels += 1;
                }
                Err(e) => record(report, format!("Failed to import label '{}'", name), e),
            }
        }
    }

    /// Resolve and create each issue with its comments, one at a time
    pub async fn import_issues(&self, issues: Vec<Issue>, report: &mut ImportReport) {
        info!(count = issues.len(), "Importing issues");
        for mut issue in issues {
            self.ctx.clock.sleep(self.ctx.settings.issue_delay).await;
            resolve_issue(&mut issue, &self.rewriter);
            self.import_issue(issue, report).await;
        }
    }

    async fn import_issue(&self, issue: Issue, report: &mut ImportReport) {
        info!(key = %issue.key, comments = issue.comments.len(), "Importing issue");

        let new_issue = NewIssue {
            milestone: issue
                .milestone
                .as_ref()
                .and_then(|m| report.milestones.get(m).copied()),
            title: issue.title,
            body: issue.body,
            labels: issue.labels,
        };

        let number = match self.create_issue(&new_issue).await {
            Ok(number) => number,
            Err(e) => {
                record(report, format!("Failed to create issue {}", issue.key), e);
                return;
            }
        };
        report.issues.insert(issue.key.clone(), number);

        for comment in &issue.comments {
            match self.create_comment(number, &comment.body).await {
                Ok(id) => {
                    debug!(issue = number, comment = id, "Created comment");
                    report.comments += 1;
                }
                Err(e) => record(
                    report,
                    format!("Failed to add a comment to issue {} (#{})", issue.key, number),
                    e,
                ),
            }
        }

        if issue.closed {
            match self.ctx.tracker.close_issue(number).await {
                Ok(()) => report.closed += 1,
                Err(e) => record(report, format!("Failed to close issue #{}", number), e),
            }
        }
    }

    async fn create_issue(&self, issue: &NewIssue) -> crate::Result<u64> {
        self.wait_for_rate_limit().await?;
        self.ctx.tracker.create_issue(issue).await
    }

    async fn create_comment(&self, issue: u64, body: &str) -> crate::Result<u64> {
        self.wait_for_rate_limit().await?;
        self.ctx.tracker.create_comment(issue, body).await
    }

    async fn wait_for_rate_limit(&self) -> crate::Result<()> {
        wait_for_rate_limit(
            self.ctx.tracker,
            self.ctx.clock,
            self.ctx.settings.rate_limit_margin,
        )
        .await
    }
}

fn record(report: &mut ImportReport, what: String, err: Error) {
    warn!(status = ?err.status(), error = %err, "{}", what);
    report.errors.push(format!("{}: {}", what, err));
}

/// Random six hex digit label color
fn random_color() -> String {
    format!("{:06x}", rand::thread_rng().gen_range(0..=0xff_ffffu32))
}
