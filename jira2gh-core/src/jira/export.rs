//! JIRA XML (RSS) export reader

use std::path::Path;

use roxmltree::{Document, Node};
use tracing::{debug, info};

use super::markup::to_plain_text;
use crate::model::{Comment, Issue, Project, RelationKind, Relationships};
use crate::{Error, Result};

/// Statuses treated as resolved
const CLOSED_STATUSES: [&str; 3] = ["closed", "resolved", "done"];

/// Read a JIRA export file into a project
pub fn read_export(project_name: &str, path: &Path) -> Result<Project> {
    debug!(path = %path.display(), "Reading JIRA export");
    let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse_export(project_name, &contents)
}

/// Parse the text of a JIRA export
///
/// Issues come back sorted by key number so that creating them in order
/// in an empty repository reproduces the JIRA numbering.
pub fn parse_export(project_name: &str, xml: &str) -> Result<Project> {
    let doc = Document::parse(xml).map_err(|e| Error::Export(e.to_string()))?;

    let channel = doc
        .root_element()
        .descendants()
        .find(|n| n.has_tag_name("channel"))
        .ok_or_else(|| Error::Export("no <channel> element in export".to_string()))?;

    let mut project = Project::new(project_name);
    for item in elements(channel, "item") {
        project.add_issue(parse_item(item)?);
    }
    project.sort_issues();

    info!(
        project = %project.name,
        issues = project.issues.len(),
        milestones = project.milestones.len(),
        labels = project.labels.len(),
        "Parsed JIRA export"
    );

    Ok(project)
}

fn parse_item(item: Node<'_, '_>) -> Result<Issue> {
    let key = child_text(item, "key")
        .ok_or_else(|| Error::Export("<item> without a <key>".to_string()))?;

    let title = child_text(item, "summary")
        .or_else(|| child_text(item, "title").map(|t| strip_key_prefix(&t, &key)))
        .unwrap_or_default();

    let description = child(item, "description")
        .and_then(|n| n.text())
        .map(to_plain_text)
        .unwrap_or_default();
    let body = if description.is_empty() {
        format!("Imported from JIRA issue {}", key)
    } else {
        format!("{}\n\nImported from JIRA issue {}", description, key)
    };

    let mut labels: Vec<String> = Vec::new();
    let names = elements(item, "component").chain(
        child(item, "labels")
            .into_iter()
            .flat_map(|n| elements(n, "label")),
    );
    for name in names.filter_map(|n| n.text()).map(str::trim) {
        if !name.is_empty() && !labels.iter().any(|l| l == name) {
            labels.push(name.to_string());
        }
    }

    let closed = child_text(item, "status")
        .map(|s| CLOSED_STATUSES.contains(&s.to_lowercase().as_str()))
        .unwrap_or(false);

    let comments = child(item, "comments")
        .into_iter()
        .flat_map(|n| elements(n, "comment"))
        .filter_map(|n| n.text())
        .map(to_plain_text)
        .filter(|body| !body.is_empty())
        .map(Comment::new)
        .collect();

    Ok(Issue {
        relationships: Some(parse_links(item, &key)),
        milestone: child_text(item, "fixVersion"),
        key,
        title,
        body,
        labels,
        comments,
        closed,
    })
}

/// Collect `issuelinks` into relationship sets
fn parse_links(item: Node<'_, '_>, key: &str) -> Relationships {
    let mut relationships = Relationships::default();
    let link_types = child(item, "issuelinks")
        .into_iter()
        .flat_map(|n| elements(n, "issuelinktype"));

    for link_type in link_types {
        let groups = link_type
            .children()
            .filter(|n| n.has_tag_name("outwardlinks") || n.has_tag_name("inwardlinks"));
        for group in groups {
            let description = group.attribute("description").unwrap_or_default();
            let Some(kind) = RelationKind::from_link_description(description) else {
                debug!(key, description, "Ignoring unsupported link type");
                continue;
            };
            for link in elements(group, "issuelink") {
                if let Some(target) = child_text(link, "issuekey") {
                    relationships.add(kind, target);
                }
            }
        }
    }

    relationships
}

/// Remove a leading "[KEY] " from an RSS title
fn strip_key_prefix(title: &str, key: &str) -> String {
    title
        .strip_prefix(&format!("[{}]", key))
        .unwrap_or(title)
        .trim()
        .to_string()
}

fn elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |n| n.has_tag_name(name))
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
