//! HTML helper functions

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").expect("valid tag regex");
}

/// Words per minute assumed by [`reading_time`]
pub const WORDS_PER_MINUTE: usize = 200;

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

/// Truncate text at a word boundary, appending `omission` when shortened
///
/// # Examples
/// ```ignore
/// truncate("Hello brave new world", 12, None) // -> "Hello brave..."
/// ```
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        return s.to_string();
    }

    let cut: String = s.chars().take(length).collect();
    let cut = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}{}", cut.trim_end(), omission)
}

/// Estimated reading time in minutes of an HTML fragment, at least 1
pub fn reading_time(html: &str) -> usize {
    let words = strip_html(html).split_whitespace().count();
    let minutes = (words as f64 / WORDS_PER_MINUTE as f64).round() as usize;
    minutes.max(1)
}

/// Escape `text` and wrap every case-insensitive occurrence of a query term in `<mark>`
pub fn highlight_terms(text: &str, query: &str) -> String {
    let terms: Vec<String> = query.split_whitespace().map(regex::escape).collect();
    if terms.is_empty() {
        return html_escape(text);
    }

    let re = match RegexBuilder::new(&terms.join("|"))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            tracing::debug!("Could not build highlight pattern: {}", e);
            return html_escape(text);
        }
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&html_escape(&text[last..m.start()]));
        out.push_str("<mark>");
        out.push_str(&html_escape(m.as_str()));
        out.push_str("</mark>");
        last = m.end();
    }
    out.push_str(&html_escape(&text[last..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello brave new world", 12, None), "Hello brave...");
        assert_eq!(truncate("Hi", 10, None), "Hi");
        assert_eq!(truncate("abcdefghij", 4, Some("…")), "abcd…");
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time("<p>short</p>"), 1);
        let long = "word ".repeat(1000);
        assert_eq!(reading_time(&long), 5);
    }

    #[test]
    fn test_highlight_terms() {
        assert_eq!(
            highlight_terms("Learning Rust & Go", "rust"),
            "Learning <mark>Rust</mark> &amp; Go"
        );
        assert_eq!(
            highlight_terms("a <b> tag", "b"),
            "a &lt;<mark>b</mark>&gt; tag"
        );
        assert_eq!(highlight_terms("plain", "  "), "plain");
        assert_eq!(highlight_terms("x &lt y", "lt"), "x &amp;<mark>lt</mark> y");
    }
}
