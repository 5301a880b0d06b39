//! Markdown rendering with syntax highlighting and heading anchors

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::html_escape;

const DEFAULT_THEME: &str = "base16-ocean.dark";

/// One heading of a rendered document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
    pub anchor: String,
}

/// Output of [`MarkdownRenderer::render`]
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Option<Theme>,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(DEFAULT_THEME, false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let selected = theme_set.themes.remove(theme).or_else(|| {
            tracing::warn!("Unknown highlight theme {:?}, using {}", theme, DEFAULT_THEME);
            theme_set.themes.remove(DEFAULT_THEME)
        });

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme: selected,
            line_numbers,
        }
    }

    /// Render markdown to HTML, collecting a table of contents on the way
    pub fn render(&self, markdown: &str) -> Rendered {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut toc = Vec::new();
        let mut anchors = AnchorSet::default();

        // Some(lang) while inside a code block
        let mut code_block: Option<Option<String>> = None;
        let mut code_content = String::new();

        // Buffered heading: (start tag, inner events, plain text)
        let mut heading: Option<(Tag, Vec<Event>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) => lang
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some(lang);
                    code_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let lang = code_block.take().flatten();
                    let highlighted = self.highlight_code(&code_content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                }
                Event::Text(text) if code_block.is_some() => {
                    code_content.push_str(&text);
                }
                Event::Start(tag @ Tag::Heading { .. }) => {
                    heading = Some((tag, Vec::new(), String::new()));
                }
                Event::End(TagEnd::Heading(level)) => {
                    let Some((tag, inner, text)) = heading.take() else {
                        continue;
                    };
                    let Tag::Heading {
                        id, classes, attrs, ..
                    } = tag
                    else {
                        continue;
                    };

                    let anchor = match id {
                        Some(id) => anchors.claim(&id),
                        None => anchors.claim(&slug::slugify(&text)),
                    };
                    toc.push(TocEntry {
                        level: level as u8,
                        title: text.trim().to_string(),
                        anchor: anchor.clone(),
                    });

                    events.push(Event::Start(Tag::Heading {
                        level,
                        id: Some(CowStr::from(anchor)),
                        classes,
                        attrs,
                    }));
                    events.extend(inner);
                    events.push(Event::End(TagEnd::Heading(level)));
                }
                other => match heading.as_mut() {
                    Some((_, inner, text)) => {
                        if let Event::Text(t) | Event::Code(t) = &other {
                            text.push_str(t);
                        }
                        inner.push(other);
                    }
                    None => events.push(other),
                },
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Rendered {
            html: html_output,
            toc,
        }
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted = self.theme.as_ref().and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme)
                .map_err(|e| tracing::debug!("Highlighting failed for {}: {}", lang, e))
                .ok()
        });

        match highlighted {
            Some(html) if self.line_numbers => self.add_line_numbers(&html, code, lang),
            Some(html) => format!(r#"<div class="highlight language-{}">{}</div>"#, lang, html),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// Add a line-number gutter next to highlighted code
    fn add_line_numbers(&self, highlighted: &str, code: &str, lang: &str) -> String {
        let gutter = (1..=code.lines().count().max(1))
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            lang, gutter, highlighted
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands out unique heading anchors within one document
#[derive(Default)]
struct AnchorSet {
    // Next suffix to try per base name
    next: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl AnchorSet {
    /// Reserve a unique anchor for `base`, suffixing `-1`, `-2`, ... when taken
    fn claim(&mut self, base: &str) -> String {
        let base = if base.is_empty() { "section" } else { base };
        let mut anchor = base.to_string();
        if self.issued.contains(&anchor) {
            let n = self.next.entry(base.to_string()).or_insert(1);
            loop {
                anchor = format!("{}-{}", base, n);
                *n += 1;
                if !self.issued.contains(&anchor) {
                    break;
                }
            }
        }
        self.issued.insert(anchor.clone());
        anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("# Hello World\n\nThis is a test.");
        assert!(out.html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(out.html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_heading_toc() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("# Intro\n\n## Setup `cargo`\n\n## Intro\n\n### Intro\n");
        let anchors: Vec<_> = out.toc.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["intro", "setup-cargo", "intro-1", "intro-2"]);
        assert_eq!(out.toc[1].level, 2);
        assert_eq!(out.toc[1].title, "Setup cargo");
        assert!(out.html.contains(r#"<h2 id="intro-1">Intro</h2>"#));
        assert!(out.html.contains("<code>cargo</code>"));
    }

    #[test]
    fn test_heading_anchors_never_repeat() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("# Intro\n\n# Intro\n\n# Intro 1\n");
        let anchors: Vec<_> = out.toc.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["intro", "intro-1", "intro-1-1"]);

        let out = renderer.render("# Intro 1\n\n# Intro\n\n# Intro\n");
        let anchors: Vec<_> = out.toc.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["intro-1", "intro", "intro-2"]);

        let out = renderer.render("## Custom {#setup}\n\n## Setup\n");
        let anchors: Vec<_> = out.toc.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["setup", "setup-1"]);
    }

    #[test]
    fn test_explicit_heading_id() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("## Custom {#my-id}\n");
        assert_eq!(out.toc[0].anchor, "my-id");
        assert!(out.html.contains(r#"id="my-id""#));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("```rust\nfn main() {}\n```");
        assert!(out.html.contains("highlight"));
        assert!(out.html.contains("language-rust"));
        assert!(out.html.contains("main"));
        assert!(!out.html.contains("```"));
    }

    #[test]
    fn test_render_code_block_with_line_numbers() {
        let renderer = MarkdownRenderer::with_options(DEFAULT_THEME, true);
        let out = renderer.render("```\na\nb\n```");
        assert!(out.html.contains(r#"<span class="line-number">2</span>"#));
    }

    #[test]
    fn test_render_table() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(out.html.contains("<table>"));
        assert!(out.html.contains("<td>1</td>"));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let renderer = MarkdownRenderer::with_options("no-such-theme", false);
        let out = renderer.render("```python\nprint(1)\n```");
        assert!(out.html.contains("highlight"));
    }
}
