//! jira2gh core - migrate a JIRA XML export into GitHub issues
//!
//! Issues are read from the export, their relationships and references are
//! rewritten into placeholder-tagged comments ([`resolve`]), everything is
//! created on the target tracker ([`migrate::Importer`]), and finally the
//! placeholders are patched in place ([`migrate::Reconciler`]).

pub mod config;
pub mod error;
pub mod jira;
pub mod migrate;
pub mod model;
pub mod placeholder;
pub mod resolve;
pub mod secrets;
pub mod tracker;

pub use config::{Config, ImportSettings};
pub use error::{Error, Result};
pub use migrate::{ImportReport, Importer, MigrationContext, ReconcileReport, Reconciler, SystemClock};
pub use model::{Comment, Issue, Project, RelationKind, Relationships};
pub use resolve::{resolve_issue, ReferenceRewriter, ReferenceRule};
pub use secrets::Secrets;
pub use tracker::{CommentPage, IssueTracker, NewIssue, RateLimit, RemoteComment};
