//! HTML views
//!
//! Pages are assembled from small string-building functions, the same way
//! the list helpers build tag and category markup.

use indexmap::IndexMap;

use crate::config::BlogConfig;
use crate::content::{Post, TocEntry};
use crate::helpers::{
    category_url, highlight_terms, html_escape, pagination::DEFAULT_WINDOW, post_url, tag_url,
    truncate, Paginator, BLOG_ROOT,
};
use crate::index::{IndexStats, ScoredPost};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

/// Length of the plain-text preview used when a post has no excerpt
const PREVIEW_CHARS: usize = 150;

/// Currently selected filter of a listing
#[derive(Debug, Clone, Copy, Default)]
pub struct Filter<'a> {
    pub category: Option<&'a str>,
    pub tag: Option<&'a str>,
}

impl Filter<'_> {
    fn heading(&self) -> String {
        match (self.category, self.tag) {
            (Some(c), _) => format!("Category: {}", html_escape(c)),
            (None, Some(t)) => format!("Tag: {}", html_escape(t)),
            (None, None) => "All posts".to_string(),
        }
    }

    fn path(&self) -> String {
        match (self.category, self.tag) {
            (Some(c), _) => category_url(c),
            (None, Some(t)) => tag_url(t),
            (None, None) => BLOG_ROOT.to_string(),
        }
    }

    fn query(&self) -> String {
        match (self.category, self.tag) {
            (Some(c), _) => format!("category={}&", crate::helpers::encode_segment(c)),
            (None, Some(t)) => format!("tag={}&", crate::helpers::encode_segment(t)),
            (None, None) => String::new(),
        }
    }
}

/// Wrap a page body in the site layout
///
/// `path` is the page's own path; it is joined to the configured site URL
/// for the canonical link.
pub fn layout(config: &BlogConfig, title: &str, path: Option<&str>, body: &str) -> String {
    let page_title = if title.is_empty() {
        html_escape(&config.title)
    } else {
        format!("{} | {}", html_escape(title), html_escape(&config.title))
    };

    let canonical = match path {
        Some(path) => format!(
            "\n<link rel=\"canonical\" href=\"{}\">",
            html_escape(&absolute_url(&config.url, path))
        ),
        None => String::new(),
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="{description}">
<title>{page_title}</title>{canonical}
<link rel="stylesheet" href="/static/css/style.css">
<script src="{htmx}"></script>
</head>
<body>
<header class="site-header">
<a class="site-title" href="/">{site_title}</a>
<nav><a href="{blog}">Blog</a></nav>
<input class="search" type="search" name="q" placeholder="Search..."
  hx-get="/htmx/search" hx-trigger="keyup changed delay:300ms" hx-target="#search-results">
</header>
<div id="search-results"></div>
<main>
{body}
</main>
<footer class="site-footer">{site_title}</footer>
</body>
</html>
"##,
        description = html_escape(&config.description),
        page_title = page_title,
        canonical = canonical,
        htmx = HTMX_SRC,
        site_title = html_escape(&config.title),
        blog = BLOG_ROOT,
        body = body,
    )
}

/// Home page: totals and the latest posts
pub fn home(config: &BlogConfig, stats: &IndexStats<'_>, latest: &[&Post]) -> String {
    let body = format!(
        r#"<section class="hero">
<h1>{title}</h1>
<p>{description}</p>
<ul class="stats">
<li><span class="stats-count">{posts}</span> posts</li>
<li><span class="stats-count">{categories}</span> categories</li>
<li><span class="stats-count">{tags}</span> tags</li>
</ul>
</section>
<section class="latest">
<h2>Latest posts</h2>
{list}
<a href="{blog}">All posts</a>
</section>"#,
        title = html_escape(&config.title),
        description = html_escape(&config.description),
        posts = stats.total_posts,
        categories = stats.total_categories,
        tags = stats.total_tags,
        list = post_list(latest),
        blog = BLOG_ROOT,
    );
    layout(config, "", Some("/"), &body)
}

/// Listing page with filter sidebar and pagination
pub fn blog_index(
    config: &BlogConfig,
    posts: &[&Post],
    paginator: &Paginator,
    filter: Filter<'_>,
    categories: &IndexMap<String, usize>,
    tags: &IndexMap<String, usize>,
) -> String {
    let body = format!(
        r#"<div class="blog">
<section class="posts">
<h1>{heading}</h1>
{list}
{pager}
</section>
<aside class="sidebar">
{categories}
{tags}
</aside>
</div>"#,
        heading = filter.heading(),
        list = post_list(paginator.slice(posts)),
        pager = pager(paginator, &filter.query()),
        categories = list_categories(categories, filter.category),
        tags = list_tags(tags, filter.tag),
    );
    layout(config, &filter.heading(), Some(&filter.path()), &body)
}

/// Post detail page
pub fn post_detail(
    config: &BlogConfig,
    post: &Post,
    related: &[ScoredPost<'_>],
    newer: Option<&Post>,
    older: Option<&Post>,
) -> String {
    let mut body = format!(
        r#"<article class="post">
<header>
<h1>{title}</h1>
<p class="post-meta"><time datetime="{datetime}">{date}</time> · {author} · {minutes} min read</p>
{category}{tags}
</header>
{toc}
<div class="post-content">
{content}
</div>
</article>"#,
        title = html_escape(&post.title),
        datetime = post.date.format("%Y-%m-%d"),
        date = html_escape(&post.formatted_date),
        author = html_escape(&post.author),
        minutes = post.reading_time,
        category = category_link(&post.category),
        tags = tag_links(&post.tags),
        toc = toc(&post.toc),
        content = post.content,
    );

    if !related.is_empty() {
        body.push_str(r#"<section class="related"><h2>Related posts</h2><ul>"#);
        for item in related {
            body.push_str(&format!(
                r#"<li><a href="{}">{}</a></li>"#,
                item.post.url,
                html_escape(&item.post.title)
            ));
        }
        body.push_str("</ul></section>");
    }

    body.push_str(r#"<nav class="post-nav">"#);
    if let Some(p) = newer {
        body.push_str(&format!(
            r#"<a class="newer" href="{}">&larr; {}</a>"#,
            p.url,
            html_escape(&p.title)
        ));
    }
    if let Some(p) = older {
        body.push_str(&format!(
            r#"<a class="older" href="{}">{} &rarr;</a>"#,
            p.url,
            html_escape(&p.title)
        ));
    }
    body.push_str("</nav>");

    layout(config, &post.title, Some(&post.url), &body)
}

/// Not-found page
pub fn not_found(config: &BlogConfig) -> String {
    let body = format!(
        r#"<section class="not-found">
<h1>404</h1>
<p>The page you are looking for does not exist.</p>
<a href="{}">Back to the blog</a>
</section>"#,
        BLOG_ROOT
    );
    layout(config, "Not Found", None, &body)
}

/// Post cards, also served on their own as an HTMX fragment
pub fn post_list(posts: &[&Post]) -> String {
    if posts.is_empty() {
        return r#"<p class="empty">No posts found.</p>"#.to_string();
    }

    let mut html = String::from(r#"<ul class="post-list">"#);
    for post in posts {
        html.push_str(&format!(
            r#"<li class="post-card">
<a class="post-card-title" href="{url}">{title}</a>
<time>{date}</time>{category}
<p class="post-card-excerpt">{excerpt}</p>
{tags}
</li>"#,
            url = post_url(&post.slug),
            title = html_escape(&post.title),
            date = html_escape(&post.formatted_date),
            category = category_link(&post.category),
            excerpt = html_escape(&preview(post)),
            tags = tag_links(&post.tags),
        ));
    }
    html.push_str("</ul>");
    html
}

/// Search results fragment with matched terms highlighted
pub fn search_results(posts: &[&Post], query: &str) -> String {
    if query.trim().is_empty() {
        return String::new();
    }
    if posts.is_empty() {
        return format!(
            r#"<p class="empty">No results for “{}”.</p>"#,
            html_escape(query.trim())
        );
    }

    let mut html = String::from(r#"<ul class="search-results">"#);
    for post in posts {
        html.push_str(&format!(
            r#"<li><a href="{}">{}</a><p>{}</p></li>"#,
            post.url,
            highlight_terms(&post.title, query),
            highlight_terms(&preview(post), query),
        ));
    }
    html.push_str("</ul>");
    html
}

fn absolute_url(site_url: &str, path: &str) -> String {
    format!("{}{}", site_url.trim_end_matches('/'), path)
}

/// Excerpt, or the start of the body text
fn preview(post: &Post) -> String {
    match &post.excerpt {
        Some(excerpt) => excerpt.clone(),
        None => truncate(
            crate::helpers::strip_html(&post.content).trim(),
            PREVIEW_CHARS,
            None,
        ),
    }
}

fn category_link(category: &str) -> String {
    if category.is_empty() {
        return String::new();
    }
    format!(
        r#" <a class="category" href="{}">{}</a>"#,
        category_url(category),
        html_escape(category)
    )
}

fn tag_links(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let links: Vec<String> = tags
        .iter()
        .map(|t| format!(r##"<a class="tag" href="{}">#{}</a>"##, tag_url(t), html_escape(t)))
        .collect();
    format!(r#"<div class="tags">{}</div>"#, links.join(" "))
}

fn toc(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut html = String::from(r#"<nav class="toc"><ul>"#);
    for entry in entries {
        html.push_str(&format!(
            r##"<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
            entry.level,
            entry.anchor,
            html_escape(&entry.title)
        ));
    }
    html.push_str("</ul></nav>");
    html
}

fn pager(paginator: &Paginator, query: &str) -> String {
    if paginator.total_pages <= 1 {
        return String::new();
    }

    let link = |page: usize| format!("{}?{}page={}", BLOG_ROOT, query, page);
    let mut html = String::from(r#"<nav class="pager">"#);

    if let Some(prev) = paginator.prev_page() {
        html.push_str(&format!(r#"<a class="prev" href="{}">&laquo;</a>"#, link(prev)));
    }
    for page in paginator.page_range(DEFAULT_WINDOW) {
        if page == paginator.page {
            html.push_str(&format!(r#"<span class="current">{}</span>"#, page));
        } else {
            html.push_str(&format!(r#"<a href="{}">{}</a>"#, link(page), page));
        }
    }
    if let Some(next) = paginator.next_page() {
        html.push_str(&format!(r#"<a class="next" href="{}">&raquo;</a>"#, link(next)));
    }

    html.push_str("</nav>");
    html
}

/// Generate a list of categories as HTML
fn list_categories(categories: &IndexMap<String, usize>, current: Option<&str>) -> String {
    taxonomy_list("Categories", "category-list", categories, current, category_url)
}

/// Generate a list of tags as HTML
fn list_tags(tags: &IndexMap<String, usize>, current: Option<&str>) -> String {
    taxonomy_list("Tags", "tag-list", tags, current, tag_url)
}

fn taxonomy_list(
    title: &str,
    class: &str,
    counts: &IndexMap<String, usize>,
    current: Option<&str>,
    url: fn(&str) -> String,
) -> String {
    if counts.is_empty() {
        return String::new();
    }

    let current = current.map(str::to_lowercase);
    let mut html = format!(r#"<h2>{}</h2><ul class="{}">"#, title, class);
    for (name, count) in counts {
        let active = if current.as_deref() == Some(name.as_str()) {
            " active"
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<li class="{class}-item{active}"><a class="{class}-link" href="{url}">{name}</a><span class="{class}-count">{count}</span></li>"#,
            class = class,
            active = active,
            url = url(name),
            name = html_escape(name),
            count = count,
        ));
    }
    html.push_str("</ul>");
    html
}
