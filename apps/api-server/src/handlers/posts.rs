//! Post handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use byline_core::domain::{NewPost, PostDraft};
use byline_shared::dto::{CreatePostRequest, MessageResponse, UpdatePostRequest};

use crate::handlers::{post_response, post_with_author_response};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Filter query parameters for post listings.
#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    pub author_id: Option<i32>,
}

fn validate_text(title: &str, content: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Post title must not be empty".to_string(),
        ));
    }
    if content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Post content must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_text(&req.title, &req.content)?;

    let post = state
        .posts
        .create(NewPost {
            title: req.title,
            content: req.content,
            author_id: req.author_id,
        })
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// GET /posts
///
/// Every returned post embeds its author; `?author_id=` narrows the list.
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list(query.author_id).await?;
    let body: Vec<_> = posts.into_iter().map(post_with_author_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let joined = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(post_with_author_response(joined)))
}

/// PUT /posts/{id}
///
/// Overwrites title and content; the author reference never changes.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    validate_text(&req.title, &req.content)?;

    let post = state
        .posts
        .update(
            id,
            PostDraft {
                title: req.title,
                content: req.content,
            },
        )
        .await
        .map_err(|err| AppError::from_repo(err, "Post not found"))?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state
        .posts
        .delete(id)
        .await
        .map_err(|err| AppError::from_repo(err, "Post not found"))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted")))
}
