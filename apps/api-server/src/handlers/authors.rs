//! Author handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use byline_core::domain::AuthorDraft;
use byline_core::ports::{DEFAULT_PAGE_LIMIT, Page};
use byline_shared::dto::{AuthorRequest, MessageResponse, PostResponse};

use crate::handlers::{author_response, post_response};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Pagination query parameters for author listings.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Author name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// POST /authors
pub async fn create_author(
    state: web::Data<AppState>,
    body: web::Json<AuthorRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_name(&req.name)?;

    let author = state
        .authors
        .create(AuthorDraft::new(req.name, req.email))
        .await?;

    Ok(HttpResponse::Ok().json(author_response(author)))
}

/// GET /authors
pub async fn list_authors(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = Page {
        offset: query.offset.unwrap_or(0),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
    };

    let authors = state.authors.list(page).await?;
    let body: Vec<_> = authors.into_iter().map(author_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /authors/{id}
pub async fn get_author(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let author = state
        .authors
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;

    Ok(HttpResponse::Ok().json(author_response(author)))
}

/// PUT /authors/{id}
pub async fn update_author(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<AuthorRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    validate_name(&req.name)?;

    let author = state
        .authors
        .update(id, AuthorDraft::new(req.name, req.email))
        .await
        .map_err(|err| AppError::from_repo(err, "Author not found"))?;

    Ok(HttpResponse::Ok().json(author_response(author)))
}

/// DELETE /authors/{id}
///
/// Removing an author also removes every post that references them.
pub async fn delete_author(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state
        .authors
        .delete(id)
        .await
        .map_err(|err| AppError::from_repo(err, "Author not found"))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Author and associated posts deleted")))
}

/// GET /authors/{id}/posts
pub async fn list_author_posts(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if state.authors.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound("Author not found".to_string()));
    }

    let posts = state.posts.list_by_author(id).await?;
    let body: Vec<PostResponse> = posts.into_iter().map(post_response).collect();

    Ok(HttpResponse::Ok().json(body))
}
