//! HTML text helpers

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Escape text for use in element content or a quoted attribute
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Undo the entity escaping the markdown renderer applies to text
fn unescape_basic(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Strip HTML tags from content
pub fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                // Tags separate words ("<p>a</p><p>b</p>" is "a b")
                result.push(' ');
            }
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Plain-text excerpt of rendered HTML, pruned to at most `max_len` characters
///
/// Cuts at the last word boundary that fits and appends "…", which counts
/// toward the limit.
pub fn prune_excerpt(html: &str, max_len: usize) -> String {
    let text = unescape_basic(&strip_html(html));
    let text = WHITESPACE.replace_all(text.trim(), " ");

    if text.chars().count() <= max_len {
        return text.into_owned();
    }
    if max_len == 0 {
        return String::new();
    }

    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_len - 1).collect();
    let at_boundary = chars.next().is_some_and(char::is_whitespace);
    let cut = match head.rfind(' ') {
        _ if at_boundary => head.as_str(),
        Some(pos) if pos > 0 => &head[..pos],
        _ => head.as_str(),
    };
    format!("{}…", cut.trim_end_matches([' ', ',', '.', ';', ':']))
}
