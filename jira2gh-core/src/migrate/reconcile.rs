//! Placeholder Reconciler
//!
//! Walks every comment of the repository page by page and rewrites
//! placeholder-wrapped references into their final form. Unlike the import,
//! this phase is not best-effort: the first failed listing or patch aborts
//! the walk, leaving the remaining placeholders for a rerun.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::placeholder;
use crate::tracker::IssueTracker;
use crate::{Error, Result};

/// Result of a reconciliation walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Pages fetched
    pub pages: usize,
    /// Comments looked at
    pub scanned: usize,
    /// Comments written back
    pub patched: usize,
}

/// Patches placeholder references in existing comments
pub struct Reconciler<'a, T: ?Sized> {
    tracker: &'a T,
}

impl<'a, T> Reconciler<'a, T>
where
    T: IssueTracker + ?Sized,
{
    pub fn new(tracker: &'a T) -> Self {
        Self { tracker }
    }

    /// Visit every comment once, following next-page cursors until none is left
    pub async fn run(&self) -> Result<ReconcileReport> {
        info!("Post-processing comments");
        let mut report = ReconcileReport::default();
        let mut cursor: Option<String> = None;

        loop {
            debug!(cursor = ?cursor, "Listing comments");
            let page = self
                .tracker
                .list_comments(cursor.as_deref())
                .await
                .map_err(|e| Error::Protocol {
                    location: cursor.clone().unwrap_or_else(|| "first comment page".to_string()),
                    source: Box::new(e),
                })?;
            report.pages += 1;

            for comment in &page.comments {
                report.scanned += 1;
                if !placeholder::has_placeholder(&comment.body) {
                    continue;
                }

                let body = placeholder::strip(&comment.body);
                if body == comment.body {
                    warn!(url = %comment.url, "Comment has a placeholder that cannot be resolved");
                    continue;
                }

                debug!(url = %comment.url, "Patching comment");
                self.tracker
                    .patch_comment(comment, &body)
                    .await
                    .map_err(|e| Error::Protocol {
                        location: comment.url.clone(),
                        source: Box::new(e),
                    })?;
                report.patched += 1;
            }

            match page.next {
                Some(next) => cursor = Some(next),
                None => {
                    debug!(pages = report.pages, "No more comment pages");
                    break;
                }
            }
        }

        info!(
            pages = report.pages,
            scanned = report.scanned,
            patched = report.patched,
            "Reconciliation finished"
        );
        Ok(report)
    }
}
