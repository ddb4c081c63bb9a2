//! Conversion of JIRA's HTML fragments to plain text

use std::sync::LazyLock;

use regex::Regex;

static BREAK_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"(?i)<br\s*/?>") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});
static PARAGRAPH_END_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"(?i)</p\s*>") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"<[^>]+>") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });
static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"\n{3,}") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});

/// Turn a description or comment fragment into plain text
///
/// The XML reader only undoes one layer of escaping. What remains is the
/// HTML JIRA renders, so tags are dropped and its entities decoded last.
pub fn to_plain_text(html: &str) -> String {
    let text = html.replace("\r\n", "\n");
    let text = BREAK_RE.replace_all(&text, "\n");
    let text = PARAGRAPH_END_RE.replace_all(&text, "\n\n");
    let text = TAG_RE.replace_all(&text, "");
    let text = decode_entities(&text);
    let text: Vec<&str> = text.lines().map(str::trim_end).collect();
    BLANK_LINES_RE
        .replace_all(&text.join("\n"), "\n\n")
        .trim()
        .to_string()
}

/// Decode named and numeric character references, leaving unknown ones as is
fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => numeric_entity(entity),
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}
