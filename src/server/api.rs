//! JSON endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use super::{AppState, SearchQuery};
use crate::content::Post;
use crate::index::DEFAULT_RELATED;

/// Listing shape of a post, without its rendered body
#[derive(Debug, Serialize)]
pub struct PostSummary<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub author: &'a str,
    pub date: String,
    pub formatted_date: &'a str,
    pub category: &'a str,
    pub tags: &'a [String],
    pub excerpt: Option<&'a str>,
    pub url: &'a str,
    pub reading_time: usize,
}

impl<'a> From<&'a Post> for PostSummary<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            slug: &post.slug,
            title: &post.title,
            author: &post.author,
            date: post.date.to_rfc3339(),
            formatted_date: &post.formatted_date,
            category: &post.category,
            tags: &post.tags,
            excerpt: post.excerpt.as_deref(),
            url: &post.url,
            reading_time: post.reading_time,
        }
    }
}

fn summaries<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Vec<PostSummary<'a>> {
    posts.into_iter().map(PostSummary::from).collect()
}

pub async fn posts(State(state): State<Arc<AppState>>) -> Response {
    let index = state.index();
    Json(summaries(index.all())).into_response()
}

pub async fn post(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let index = state.index();
    match index.get(&slug) {
        Some(post) => {
            let related: Vec<_> = index
                .related(post, DEFAULT_RELATED)
                .into_iter()
                .map(|s| json!({ "post": PostSummary::from(s.post), "score": s.score }))
                .collect();
            Json(json!({ "post": post, "related": related })).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Post not found", "slug": slug })),
        )
            .into_response(),
    }
}

pub async fn categories(State(state): State<Arc<AppState>>) -> Response {
    Json(state.index().category_counts()).into_response()
}

pub async fn tags(State(state): State<Arc<AppState>>) -> Response {
    Json(state.index().tag_counts()).into_response()
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Response {
    let index = state.index();
    Json(summaries(index.search(&params.q))).into_response()
}
