//! Front-matter parsing

use serde::{Deserialize, Deserializer};
use std::fmt;

use super::LoadError;

/// Convert a YAML scalar into its string form, `None` for anything else
fn scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accept any scalar (strings, numbers, booleans) as an optional string
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_string))
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<serde_yaml::Value>()? {
                if let Some(s) = scalar_to_string(item) {
                    vec.push(s);
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Metadata header of a post
///
/// Only the keys the blog understands are kept; anything else in the
/// block is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Raw date value, resolved later by [`crate::helpers::resolve_date`]
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub author: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub excerpt: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), LoadError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        match split_block(content) {
            Some((yaml, body)) if looks_like_yaml(yaml) => {
                let fm = serde_yaml::from_str::<FrontMatter>(yaml)?;
                Ok((fm, body))
            }
            Some((yaml, body)) if yaml.trim().is_empty() => Ok((FrontMatter::default(), body)),
            _ => Ok((FrontMatter::default(), content)),
        }
    }
}

/// Split a `---` delimited block off the start of `content`
fn split_block(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    // The opening fence must be alone on its line
    let rest = rest.trim_start_matches([' ', '\t']);
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    // An immediately closing fence means an empty block
    if let Some(body) = rest.strip_prefix("---") {
        return Some(("", body.trim_start_matches(['\n', '\r'])));
    }

    let end_pos = rest.find("\n---")?;
    let yaml = &rest[..end_pos];
    let body = &rest[end_pos + 4..];
    // Drop the rest of the closing fence line
    let body = match body.find('\n') {
        Some(nl) if body[..nl].trim().is_empty() => &body[nl + 1..],
        Some(_) => body,
        None => "",
    };
    Some((yaml, body.trim_start_matches(['\n', '\r'])))
}

/// Whether a block has at least one `key: value` line
///
/// Keeps a leading markdown horizontal rule from being taken for metadata.
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
author: Alice
category: Tech
tags:
  - rust
  - web
excerpt: A short intro
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert_eq!(fm.author.as_deref(), Some("Alice"));
        assert_eq!(fm.category.as_deref(), Some("Tech"));
        assert_eq!(fm.tags, vec!["rust", "web"]);
        assert_eq!(fm.excerpt.as_deref(), Some("A short intro"));
        assert_eq!(remaining.trim(), "This is the content.");
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: Single Tag Post\ntags: Notes\n---\n\nContent here.\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_scalar_values_become_strings() {
        let content = "---\ntitle: 2024\ntags: [1, rust]\ncategory: true\n---\nBody\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("2024"));
        assert_eq!(fm.tags, vec!["1", "rust"]);
        assert_eq!(fm.category.as_deref(), Some("true"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let content = "---\ntitle: X\nlayout: post\ndraft: true\n---\nBody\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("X"));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo metadata here.";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert!(fm.tags.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, body) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\ntags: rust\n---\nBody\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Some random text with a link https://example.com
- Item 1

---
More content here.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert!(remaining.contains("Some random text"));
        assert!(remaining.contains("More content here."));
    }
}
