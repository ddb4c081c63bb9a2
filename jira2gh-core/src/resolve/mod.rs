//! Relationship Resolver
//!
//! Turns JIRA relationships and references into text that is independent of
//! GitHub numbering: relationships become comments, and every reference to
//! a JIRA key becomes a placeholder-wrapped `GH-<n>` that the reconciler
//! patches once all issues exist.

mod references;
mod relationships;

pub use references::{ReferenceRewriter, ReferenceRule};
pub use relationships::{convert_relationships, resolve_issue};
