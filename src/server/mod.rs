//! Blog server with optional reload on content changes

mod api;
pub mod views;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard};
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::BlogConfig;
use crate::content::{Post, PostLoader};
use crate::helpers::Paginator;
use crate::index::{PostIndex, DEFAULT_RELATED};
use crate::Staticle;

use views::Filter;

/// Number of posts on the home page
const HOME_POSTS: usize = 5;

/// Shared server state
///
/// The index sits behind a lock only so the watcher can swap in a freshly
/// loaded collection; requests never write to it.
pub struct AppState {
    pub config: BlogConfig,
    loader: PostLoader,
    index: RwLock<PostIndex>,
}

impl AppState {
    pub fn new(config: BlogConfig, loader: PostLoader, index: PostIndex) -> Self {
        Self {
            config,
            loader,
            index: RwLock::new(index),
        }
    }

    /// Read access to the current index
    pub fn index(&self) -> RwLockReadGuard<'_, PostIndex> {
        self.index.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Rebuild the index from disk and swap it in
    ///
    /// Loading happens outside the lock, so readers keep the old collection
    /// until the new one is complete.
    pub fn reload(&self) {
        let Some(dir) = self.index().source_dir().map(|p| p.to_path_buf()) else {
            return;
        };
        let fresh = PostIndex::load(&self.loader, &dir);
        *self.index.write().unwrap_or_else(|e| e.into_inner()) = fresh;
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FragmentQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Build the application router
pub fn router(state: Arc<AppState>, static_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/blog", get(blog_index))
        .route("/blog/category/:category", get(blog_category))
        .route("/blog/tag/:tag", get(blog_tag))
        .route("/blog/:slug", get(blog_post))
        .route("/htmx/posts", get(htmx_posts))
        .route("/htmx/search", get(htmx_search))
        .route("/api/posts", get(api::posts))
        .route("/api/posts/:slug", get(api::post))
        .route("/api/categories", get(api::categories))
        .route("/api/tags", get(api::tags))
        .route("/api/search", get(api::search))
        .route("/up", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the blog server
pub async fn start(app: &Staticle, host: &str, port: u16, watch: bool) -> Result<()> {
    let loader = app.loader();
    let index = PostIndex::load(&loader, &app.posts_dir);
    let state = Arc::new(AppState::new(app.config.clone(), loader, index));

    if watch {
        let posts_dir = app.posts_dir.clone();
        let state = Arc::clone(&state);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(posts_dir, state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let router = router(state, app.static_dir.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if host == "localhost" { "127.0.0.1" } else { host };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", host, port);
    if watch {
        println!("Watching {} for changes...", app.posts_dir.display());
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Watch the posts directory and reload the index on changes
fn watch_and_reload(posts_dir: PathBuf, state: Arc<AppState>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid reloads
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if !posts_dir.exists() {
        tracing::warn!("Not watching {:?}: directory does not exist", posts_dir);
        return Ok(());
    }
    debouncer
        .watcher()
        .watch(&posts_dir, RecursiveMode::NonRecursive)?;
    tracing::debug!("Watching: {:?}", posts_dir);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    let name = e.path.to_string_lossy();
                    !name.contains(".DS_Store") && !name.ends_with('~')
                });
                if !relevant {
                    continue;
                }

                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }
                state.reload();
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    let index = state.index();
    let latest: Vec<&Post> = index.all().iter().take(HOME_POSTS).collect();
    Html(views::home(&state.config, &index.stats(), &latest))
}

async fn blog_index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Html<String> {
    // Empty query values count as absent
    let category = params.category.as_deref().filter(|c| !c.is_empty());
    let tag = params.tag.as_deref().filter(|t| !t.is_empty());
    render_listing(&state, Filter { category, tag }, params.page)
}

async fn blog_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(params): Query<ListQuery>,
) -> Html<String> {
    let filter = Filter {
        category: Some(category.as_str()),
        tag: None,
    };
    render_listing(&state, filter, params.page)
}

async fn blog_tag(
    State(state): State<Arc<AppState>>,
    Path(tag): Path<String>,
    Query(params): Query<ListQuery>,
) -> Html<String> {
    let filter = Filter {
        category: None,
        tag: Some(tag.as_str()),
    };
    render_listing(&state, filter, params.page)
}

fn render_listing(state: &AppState, filter: Filter<'_>, page: Option<usize>) -> Html<String> {
    let index = state.index();
    let posts = filtered(&index, filter.category, filter.tag);
    let paginator = Paginator::new(posts.len(), page.unwrap_or(1), state.config.per_page);
    Html(views::blog_index(
        &state.config,
        &posts,
        &paginator,
        filter,
        &index.category_counts(),
        &index.tag_counts(),
    ))
}

async fn blog_post(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let index = state.index();
    let Some(post) = index.get(&slug) else {
        return not_found_page(&state.config);
    };

    let related = index.related(post, DEFAULT_RELATED);
    let html = views::post_detail(
        &state.config,
        post,
        &related,
        post.prev(index.all()),
        post.next(index.all()),
    );
    Html(html).into_response()
}

async fn htmx_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FragmentQuery>,
) -> Html<String> {
    let index = state.index();
    let category = params.category.as_deref().filter(|c| !c.is_empty());
    let tag = params.tag.as_deref().filter(|t| !t.is_empty());

    let mut posts = filtered(&index, category, tag);
    if let Some(limit) = params.limit.filter(|l| *l > 0) {
        posts.truncate(limit);
    }
    Html(views::post_list(&posts))
}

async fn htmx_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Html<String> {
    let index = state.index();
    let posts = index.search(&params.q);
    Html(views::search_results(&posts, &params.q))
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    not_found_page(&state.config)
}

fn not_found_page(config: &BlogConfig) -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found(config))).into_response()
}

/// Posts for a listing: category filter wins over tag filter
fn filtered<'a>(index: &'a PostIndex, category: Option<&str>, tag: Option<&str>) -> Vec<&'a Post> {
    match (category, tag) {
        (Some(c), _) => index.by_category(c),
        (None, Some(t)) => index.by_tag(t),
        (None, None) => index.all().iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::post;

    fn state() -> Arc<AppState> {
        let config = BlogConfig::default();
        let loader = PostLoader::new(&config);
        let index = PostIndex::new(vec![
            post("a", 2, "tech", &["go", "rust"]),
            post("b", 1, "tech", &["rust"]),
            post("c", 3, "life", &[]),
        ]);
        Arc::new(AppState::new(config, loader, index))
    }

    #[test]
    fn test_filtered_prefers_category() {
        let state = state();
        let index = state.index();
        let slugs: Vec<_> = filtered(&index, Some("TECH"), Some("nothing"))
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["a", "b"]);
        assert_eq!(filtered(&index, None, Some("Rust")).len(), 2);
        assert_eq!(filtered(&index, None, None).len(), 3);
    }

    #[tokio::test]
    async fn test_post_page() {
        let response = blog_post(State(state()), Path("a".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_home_page_uses_layout() {
        let Html(html) = home(State(state())).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r##"hx-target="#search-results""##));
        assert!(html.contains(r#"<link rel="canonical" href="http://localhost:5001/">"#));
        assert!(html.contains("/blog/c"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[tokio::test]
    async fn test_missing_post_is_404() {
        let response = blog_post(State(state()), Path("missing".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = api::post(State(state()), Path("missing".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_listing_clamps_page() {
        let Html(html) = blog_index(
            State(state()),
            Query(ListQuery {
                page: Some(99),
                ..Default::default()
            }),
        )
        .await;
        assert!(html.contains("All posts"));
        assert!(html.contains("/blog/c"));
    }

    #[tokio::test]
    async fn test_htmx_fragments() {
        let Html(html) = htmx_posts(
            State(state()),
            Query(FragmentQuery {
                tag: Some("rust".to_string()),
                limit: Some(1),
                ..Default::default()
            }),
        )
        .await;
        assert!(html.contains("/blog/a"));
        assert!(!html.contains("/blog/b\""));

        let Html(html) = htmx_search(State(state()), Query(SearchQuery { q: String::new() })).await;
        assert!(html.is_empty());
    }

    #[test]
    fn test_reload_without_source_keeps_index() {
        let state = state();
        state.reload();
        assert_eq!(state.index().len(), 3);
    }
}
