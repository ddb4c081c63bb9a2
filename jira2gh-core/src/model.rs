//! Issues and projects read from a JIRA export

use serde::{Deserialize, Serialize};

/// Kind of relationship between two JIRA issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    Duplicates,
    IsDuplicatedBy,
    RelatesTo,
    DependsOn,
    Blocks,
}

impl RelationKind {
    /// All kinds, in the order their comments are emitted
    pub const ALL: [RelationKind; 5] = [
        RelationKind::Duplicates,
        RelationKind::IsDuplicatedBy,
        RelationKind::RelatesTo,
        RelationKind::DependsOn,
        RelationKind::Blocks,
    ];

    /// Prefix of the comment synthesized for one relationship
    pub fn label(self) -> &'static str {
        match self {
            RelationKind::Duplicates => "Duplicates: ",
            RelationKind::IsDuplicatedBy => "Is duplicated by: ",
            RelationKind::RelatesTo => "Is related to: ",
            RelationKind::DependsOn => "Depends on: ",
            RelationKind::Blocks => "Blocks: ",
        }
    }

    /// Map a JIRA link description (e.g. "is duplicated by") to a kind
    pub fn from_link_description(description: &str) -> Option<Self> {
        match description.trim().to_lowercase().as_str() {
            "duplicates" => Some(RelationKind::Duplicates),
            "is duplicated by" => Some(RelationKind::IsDuplicatedBy),
            "relates to" | "is related to" => Some(RelationKind::RelatesTo),
            "depends on" => Some(RelationKind::DependsOn),
            "blocks" => Some(RelationKind::Blocks),
            _ => None,
        }
    }
}

/// The five relationship sets of an issue, each in export order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationships {
    pub duplicates: Vec<String>,
    pub is_duplicated_by: Vec<String>,
    pub relates_to: Vec<String>,
    pub depends_on: Vec<String>,
    pub blocks: Vec<String>,
}

impl Relationships {
    /// Keys of one relationship set
    pub fn get(&self, kind: RelationKind) -> &[String] {
        match kind {
            RelationKind::Duplicates => &self.duplicates,
            RelationKind::IsDuplicatedBy => &self.is_duplicated_by,
            RelationKind::RelatesTo => &self.relates_to,
            RelationKind::DependsOn => &self.depends_on,
            RelationKind::Blocks => &self.blocks,
        }
    }

    /// Add a key to a set, ignoring repeats
    pub fn add(&mut self, kind: RelationKind, key: impl Into<String>) {
        let key = key.into();
        let set = match kind {
            RelationKind::Duplicates => &mut self.duplicates,
            RelationKind::IsDuplicatedBy => &mut self.is_duplicated_by,
            RelationKind::RelatesTo => &mut self.relates_to,
            RelationKind::DependsOn => &mut self.depends_on,
            RelationKind::Blocks => &mut self.blocks,
        };
        if !set.contains(&key) {
            set.push(key);
        }
    }

    /// Total number of referenced issues across all sets
    pub fn len(&self) -> usize {
        RelationKind::ALL.iter().map(|k| self.get(*k).len()).sum()
    }

    /// Whether every set is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A comment on an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub body: String,
}

impl Comment {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// A JIRA issue on its way to GitHub
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Issue {
    /// Source key, e.g. "PROJ-123"
    pub key: String,
    pub title: String,
    pub body: String,
    /// Name of the milestone (JIRA fix version)
    pub milestone: Option<String>,
    pub labels: Vec<String>,
    pub comments: Vec<Comment>,
    /// Relationship sets; `None` once converted to comments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationships>,
    /// Whether the issue is resolved in JIRA
    pub closed: bool,
}

impl Issue {
    /// Numeric part of the key ("PROJ-123" -> 123)
    pub fn key_number(&self) -> Option<u64> {
        self.key.rsplit('-').next()?.parse().ok()
    }
}

/// Everything read from one JIRA export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    /// JIRA project name used in issue keys
    pub name: String,
    pub issues: Vec<Issue>,
    /// Distinct milestone names, first-seen order
    pub milestones: Vec<String>,
    /// Distinct label names, first-seen order
    pub labels: Vec<String>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an issue and record its milestone and labels
    pub fn add_issue(&mut self, issue: Issue) {
        if let Some(ref milestone) = issue.milestone {
            if !self.milestones.contains(milestone) {
                self.milestones.push(milestone.clone());
            }
        }
        for label in &issue.labels {
            if !self.labels.contains(label) {
                self.labels.push(label.clone());
            }
        }
        self.issues.push(issue);
    }

    /// Sort issues by the numeric part of their key
    ///
    /// Keys without a number sort last, in their original order.
    pub fn sort_issues(&mut self) {
        self.issues
            .sort_by_key(|issue| issue.key_number().unwrap_or(u64::MAX));
    }
}
