// src/core/sanitize.rs

use html_escape::decode_html_entities;

pub fn decode_entities(s: &str) -> String {
    decode_html_entities(s).into_owned()
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Collapse whitespace within each line, drop blank lines.
pub fn normalize_lines(s: &str) -> String {
    s.lines()
        .map(normalize_ws)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// First `max` whitespace-separated words, joined by single spaces.
/// `marker` is appended only when words were actually dropped.
pub fn trim_words(s: &str, max: usize, marker: &str) -> String {
    let words: Vec<&str> = s.split_whitespace().collect();
    if words.len() <= max {
        return words.join(" ");
    }
    join!(&words[..max].join(" "), marker)
}

/// Remove thousands separators, then drop dangling sentence dots.
/// `"12,345."` → `"12345"`.
pub fn strip_thousands(s: &str) -> String {
    let digits: String = s.chars().filter(|c| *c != ',').collect();
    digits.trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_words_marks_truncation_only() {
        assert_eq!(trim_words("one  two\nthree", 5, "..."), "one two three");
        assert_eq!(trim_words("a b c d", 2, "..."), "a b...");
    }

    #[test]
    fn strip_thousands_keeps_decimals() {
        assert_eq!(strip_thousands("12,345"), "12345");
        assert_eq!(strip_thousands("1,299.99"), "1299.99");
        assert_eq!(strip_thousands("18,500."), "18500");
    }

    #[test]
    fn normalize_lines_drops_blanks() {
        assert_eq!(normalize_lines("  a  b \n\n \t\n c"), "a b\nc");
    }
}
