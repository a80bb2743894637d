// src/core/html.rs
// Tolerant HTML helpers. Listings are hand-authored post bodies, not well-formed
// documents, so everything here scans text instead of building a DOM.

use super::sanitize::{decode_entities, normalize_lines, normalize_ws};

/// Tags that start a new line in the plain-text rendering.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "ol",
    "p", "pre", "section", "table", "tbody", "thead", "tr", "ul",
];

/// Tags that separate words but not lines.
const CELL_TAGS: &[&str] = &["td", "th", "img", "input", "label", "option", "select"];

/// Elements whose body is never visible text.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Find the next complete `<tag ...> ... </tag>` block from `from` onwards, case-insensitive.
/// Returns byte offsets of the opening `<` and one past the closing `>`.
pub fn next_tag_block_ci(s: &str, open_tag: &str, close_tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open_lc = to_lower(open_tag);
    let close_lc = to_lower(close_tag);

    let start = lc.get(from..)?.find(&open_lc)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&close_lc)?;
    let end = open_end + end_rel + close_tag.len();
    Some((start, end))
}

/// Remove all `<...>` tags, collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Visible text of a markup fragment on one line: tags stripped, entities decoded.
pub fn inner_text(fragment: &str) -> String {
    normalize_ws(&decode_entities(&strip_tags(fragment)))
}

/// Plain-text rendering of a post body.
///
/// Hidden elements are dropped with their content, block-level tags become line
/// breaks, table cells become spaces, inline tags vanish. Entities are decoded
/// after tags are gone so an encoded `&lt;` never opens a tag.
pub fn to_plain_text(html: &str) -> String {
    let visible = drop_hidden_elements(html);

    let mut out = String::with_capacity(visible.len());
    let mut rest = visible.as_str();

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];
        let opens_tag = matches!(tail[1..].chars().next(), Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!');
        let len = match tag_len(tail) {
            Some(len) if opens_tag => len,
            // A bare '<' in prose ("under < 50k miles") is text.
            _ => {
                out.push('<');
                rest = &tail[1..];
                continue;
            }
        };
        let name = tag_name(&tail[..len]);
        if BLOCK_TAGS.contains(&name.as_str()) {
            out.push('\n');
        } else if CELL_TAGS.contains(&name.as_str()) {
            out.push(' ');
        }
        rest = &tail[len..];
    }
    out.push_str(rest);

    normalize_lines(&decode_entities(&out))
}

fn drop_hidden_elements(html: &str) -> String {
    let mut doc = html.to_string();
    for name in HIDDEN_ELEMENTS {
        let open = join!("<", name);
        let close = join!("</", name, ">");
        while let Some((s, e)) = next_tag_block_ci(&doc, &open, &close, 0) {
            doc.replace_range(s..e, " ");
        }
    }
    doc
}

/// Length in bytes of the tag starting at `s[0] == '<'`, quotes respected.
fn tag_len(s: &str) -> Option<usize> {
    let mut in_s = false;
    let mut in_d = false;
    for (i, b) in s.bytes().enumerate().skip(1) {
        match b {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Lower-cased element name of a tag like `<BR/>`, `</p>` or `<img src=..>`.
fn tag_name(tag: &str) -> String {
    let inner = tag.trim_start_matches('<').trim_start_matches('/');
    let end = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    to_lower(&inner[..end])
}
