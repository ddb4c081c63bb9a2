//! Conversion of issue relationships into comments

use tracing::debug;

use super::ReferenceRewriter;
use crate::model::{Comment, Issue, RelationKind};

/// Append one comment per relationship and drop the relationship sets
///
/// Comments are emitted kind by kind (duplicates, is-duplicated-by,
/// relates-to, depends-on, blocks), keeping export order within a kind.
/// The sets are taken out of the issue, so a second call adds nothing.
/// Returns the number of comments added.
pub fn convert_relationships(issue: &mut Issue) -> usize {
    let Some(relationships) = issue.relationships.take() else {
        return 0;
    };

    let before = issue.comments.len();
    for kind in RelationKind::ALL {
        for key in relationships.get(kind) {
            issue
                .comments
                .push(Comment::new(format!("{}{}", kind.label(), key)));
        }
    }

    let added = issue.comments.len() - before;
    if added > 0 {
        debug!(key = %issue.key, added, "Converted relationships to comments");
    }
    added
}

/// Prepare an issue for creation
///
/// Converts relationships into comments, then rewrites JIRA references in
/// every comment body into placeholder-wrapped GitHub keys.
pub fn resolve_issue(issue: &mut Issue, rewriter: &ReferenceRewriter) {
    convert_relationships(issue);
    for comment in &mut issue.comments {
        comment.body = rewriter.rewrite(&comment.body);
    }
}
