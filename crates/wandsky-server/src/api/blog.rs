use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use wandsky_backend::{BlogQuery, NewBlogPost, NewComment};
use wandsky_core::validation::require;

use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::{success, ApiError, AppState, Success};
use crate::auth::RequireSession;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreatePostBody {
    title: Option<String>,
    content: Option<String>,
    excerpt: Option<String>,
    category: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    cover_image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommentBody {
    post_id: Option<String>,
    content: Option<String>,
    parent_id: Option<String>,
}

impl CommentBody {
    fn into_comment(self) -> Result<NewComment, ApiError> {
        let content = require("content", self.content.as_deref())?.to_owned();
        Ok(NewComment {
            content,
            parent_id: self.parent_id.filter(|p| !p.trim().is_empty()),
        })
    }
}

/// GET /api/blog
pub(super) async fn list_posts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BlogQuery>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.backend.list_blog_posts(&query).await?))
}

/// GET /api/blog/{id}
pub(super) async fn get_post(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.backend.get_blog_post(&post_id).await?))
}

/// POST /api/blog
pub(super) async fn create_post(
    State(state): State<AppState>,
    session: RequireSession,
    ApiJson(body): ApiJson<CreatePostBody>,
) -> Result<(StatusCode, Json<Success<Value>>), ApiError> {
    let title = require("title", body.title.as_deref())?.to_owned();
    let content = require("content", body.content.as_deref())?.to_owned();

    let post = NewBlogPost {
        title,
        content,
        excerpt: body.excerpt,
        category: body.category,
        tags: body.tags,
        cover_image: body.cover_image,
    };
    let created = state
        .backend
        .create_blog_post(&session.access_token, &post)
        .await?;
    Ok((StatusCode::CREATED, success(created)))
}

/// GET /api/blog/{id}/comments
pub(super) async fn list_comments(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.backend.list_comments(&post_id).await?))
}

/// POST /api/blog/{id}/comments
pub(super) async fn create_comment(
    State(state): State<AppState>,
    session: RequireSession,
    ApiPath(post_id): ApiPath<String>,
    ApiJson(body): ApiJson<CommentBody>,
) -> Result<(StatusCode, Json<Success<Value>>), ApiError> {
    let comment = body.into_comment()?;
    let created = state
        .backend
        .create_comment(&session.access_token, &post_id, &comment)
        .await?;
    Ok((StatusCode::CREATED, success(created)))
}

/// POST /api/blog/comments: the post id travels in the body.
pub(super) async fn create_comment_for_post(
    State(state): State<AppState>,
    session: RequireSession,
    ApiJson(body): ApiJson<CommentBody>,
) -> Result<(StatusCode, Json<Success<Value>>), ApiError> {
    let post_id = require("postId", body.post_id.as_deref())?.to_owned();
    let comment = body.into_comment()?;
    let created = state
        .backend
        .create_comment(&session.access_token, &post_id, &comment)
        .await?;
    Ok((StatusCode::CREATED, success(created)))
}
