//! Rewriting of JIRA issue references into placeholder-wrapped GitHub keys

use regex::{Captures, Regex};

use crate::placeholder::{self, GITHUB_ISSUE_PREFIX};
use crate::Result;

/// One pattern -> template rewrite
///
/// The template uses `regex` expansion syntax (`${1}`), and every expansion
/// is wrapped in placeholder markers.
#[derive(Debug, Clone)]
pub struct ReferenceRule {
    pattern: Regex,
    template: String,
}

impl ReferenceRule {
    /// Compile a rule; an invalid pattern is a configuration error
    pub fn new(pattern: &str, template: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            template: template.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| {
                let mut key = String::new();
                caps.expand(&self.template, &mut key);
                placeholder::wrap(&key)
            })
            .into_owned()
    }
}

/// Ordered list of reference rules
///
/// Rules run in declaration order, each on the output of the previous one.
/// Text already inside a placeholder is skipped, so a broad later rule can
/// never rewrite what an earlier rule produced.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRewriter {
    rules: Vec<ReferenceRule>,
}

impl ReferenceRewriter {
    pub fn new(rules: Vec<ReferenceRule>) -> Self {
        Self { rules }
    }

    /// Standard rules for a JIRA project
    ///
    /// 1. a browse URL, e.g. `https://java.net/jira/browse/PROJ-12`
    /// 2. a bare key, e.g. `PROJ-12`
    /// 3. a phrase like `Issue 12`
    ///
    /// Each becomes `@PSTARTGH-12@PEND`.
    pub fn for_project(project: &str, browse_url: &str) -> Result<Self> {
        let template = format!("{}${{1}}", GITHUB_ISSUE_PREFIX);
        let project = regex::escape(project);
        Ok(Self::new(vec![
            ReferenceRule::new(
                &format!(r"{}{}-(\d+)", regex::escape(browse_url), project),
                template.clone(),
            )?,
            ReferenceRule::new(&format!(r"\b{}-(\d+)\b", project), template.clone())?,
            ReferenceRule::new(r"\bIssue (\d+)\b", template)?,
        ]))
    }

    pub fn rules(&self) -> &[ReferenceRule] {
        &self.rules
    }

    /// Rewrite every matching reference in `text`
    pub fn rewrite(&self, text: &str) -> String {
        self.rules.iter().fold(text.to_string(), |acc, rule| {
            placeholder::map_unwrapped(&acc, |segment| rule.apply(segment))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> ReferenceRewriter {
        ReferenceRewriter::for_project("PROJ", "https://java.net/jira/browse/").unwrap()
    }

    #[test]
    fn test_rule_order() {
        let rw = rewriter();
        assert_eq!(rw.rules().len(), 3);
        assert!(rw.rules()[0].pattern().starts_with("https://java"));
        assert_eq!(rw.rules()[2].pattern(), r"\bIssue (\d+)\b");
        assert_eq!(rw.rules()[1].template(), "GH-${1}");
    }

    #[test]
    fn test_rewrite_url() {
        assert_eq!(
            rewriter().rewrite("See https://java.net/jira/browse/PROJ-11 for details"),
            "See @PSTARTGH-11@PEND for details"
        );
    }

    #[test]
    fn test_rewrite_bare_key() {
        assert_eq!(
            rewriter().rewrite("Fixed together with PROJ-7 and PROJ-8."),
            "Fixed together with @PSTARTGH-7@PEND and @PSTARTGH-8@PEND."
        );
    }

    #[test]
    fn test_rewrite_issue_phrase() {
        assert_eq!(
            rewriter().rewrite("Same as Issue 42"),
            "Same as @PSTARTGH-42@PEND"
        );
    }

    #[test]
    fn test_raw_reference_removed() {
        let out = rewriter().rewrite("https://java.net/jira/browse/PROJ-3 PROJ-4 Issue 5");
        assert!(!out.contains("PROJ-"));
        assert!(!out.contains("Issue 5"));
        assert!(!out.contains("java.net"));
    }

    #[test]
    fn test_other_projects_untouched() {
        let text = "See OTHER-12 and XPROJ-3";
        assert_eq!(rewriter().rewrite(text), text);
    }

    #[test]
    fn test_no_references() {
        assert_eq!(rewriter().rewrite("plain text"), "plain text");
        assert_eq!(rewriter().rewrite(""), "");
    }

    #[test]
    fn test_wrapped_span_not_rewritten_again() {
        // A project named "GH" would make rule 2 match its own output
        let rw = ReferenceRewriter::for_project("GH", "https://example.org/browse/").unwrap();
        assert_eq!(rw.rewrite("GH-5"), "@PSTARTGH-5@PEND");
        assert_eq!(
            rw.rewrite("https://example.org/browse/GH-6"),
            "@PSTARTGH-6@PEND"
        );
    }

    #[test]
    fn test_rewrite_is_stable_on_output() {
        let rw = rewriter();
        let once = rw.rewrite("PROJ-1 and Issue 2");
        assert_eq!(rw.rewrite(&once), once);
    }

    #[test]
    fn test_project_name_is_escaped() {
        let rw = ReferenceRewriter::for_project("A.B", "https://x/").unwrap();
        assert_eq!(rw.rewrite("A.B-1 AxB-2"), "@PSTARTGH-1@PEND AxB-2");
    }

    #[test]
    fn test_invalid_rule_is_error() {
        assert!(ReferenceRule::new(r"(\d+", "GH-${1}").is_err());
    }

    #[test]
    fn test_custom_rule_template() {
        let rule = ReferenceRule::new(r"#(\d+)", "${1}").unwrap();
        let rw = ReferenceRewriter::new(vec![rule]);
        assert_eq!(rw.rewrite("see #9"), "see @PSTART9@PEND");
    }
}
