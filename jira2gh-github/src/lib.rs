//! jira2gh GitHub - GitHub backend for the JIRA migration
//!
//! This crate implements [`jira2gh_core::IssueTracker`] on top of GitHub's
//! REST API: creating milestones, labels, issues and comments, reading the
//! rate limit, and walking and patching the repository's comments.

mod client;
mod comments;
mod error;
mod issues;
mod tracker;

#[cfg(test)]
mod testing;

pub use client::GitHubClient;
pub use error::{Error, Result};
