//! Placeholder markers for references whose final form is patched later
//!
//! References to other issues are written as `@PSTART<payload>@PEND` while
//! issues are being created. Once every issue exists, the reconciler strips
//! the wrapper so the payload (`GH-<n>` or a bare `<n>`) remains.

use std::sync::LazyLock;

use regex::Regex;

/// Opening marker of a placeholder-wrapped reference
pub const PLACEHOLDER_PREFIX: &str = "@PSTART";

/// Closing marker of a placeholder-wrapped reference
pub const PLACEHOLDER_SUFFIX: &str = "@PEND";

/// Prefix GitHub autolinks as an issue reference
pub const GITHUB_ISSUE_PREFIX: &str = "GH-";

// Hard-coded patterns; a failure here is a programming error caught by the tests below.
static WRAPPED_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"@PSTART.*?@PEND") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });
static WRAPPED_GH_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"@PSTARTGH-(\d+)@PEND") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });
static WRAPPED_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"@PSTART(\d+)@PEND") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });

/// Wrap a reference in placeholder markers
pub fn wrap(payload: &str) -> String {
    format!("{}{}{}", PLACEHOLDER_PREFIX, payload, PLACEHOLDER_SUFFIX)
}

/// Whether the text carries at least one placeholder marker
pub fn has_placeholder(text: &str) -> bool {
    text.contains(PLACEHOLDER_PREFIX)
}

/// Strip placeholder wrappers, leaving `GH-<n>` or `<n>` in their place
///
/// Runs the `GH-` pass before the bare-number pass. The two patterns never
/// overlap, so the result does not depend on that order, and a second call
/// on the output is a no-op.
pub fn strip(text: &str) -> String {
    if !has_placeholder(text) {
        return text.to_string();
    }
    let text = WRAPPED_GH_RE.replace_all(text, "GH-${1}");
    WRAPPED_NUMBER_RE.replace_all(&text, "${1}").into_owned()
}

/// Apply `rewrite` to every part of `text` not already inside a placeholder
///
/// Wrapped spans are copied through untouched, so a later reference rule can
/// never match inside the output of an earlier one.
pub fn map_unwrapped<F>(text: &str, mut rewrite: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for span in WRAPPED_SPAN_RE.find_iter(text) {
        out.push_str(&rewrite(&text[last..span.start()]));
        out.push_str(span.as_str());
        last = span.end();
    }
    out.push_str(&rewrite(&text[last..]));
    out
}
