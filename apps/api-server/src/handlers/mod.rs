//! HTTP handlers and route configuration.

mod authors;
mod health;
mod posts;


use actix_web::web;

use byline_core::domain::{Author, Post, PostWithAuthor};
use byline_shared::dto::{AuthorResponse, PostResponse, PostWithAuthorResponse};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/authors")
                .route("", web::post().to(authors::create_author))
                .route("", web::get().to(authors::list_authors))
                .route("/{id}", web::get().to(authors::get_author))
                .route("/{id}", web::put().to(authors::update_author))
                .route("/{id}", web::delete().to(authors::delete_author))
                .route("/{id}/posts", web::get().to(authors::list_author_posts)),
        )
        .service(
            web::scope("/posts")
                .route("", web::post().to(posts::create_post))
                .route("", web::get().to(posts::list_posts))
                .route("/{id}", web::get().to(posts::get_post))
                .route("/{id}", web::put().to(posts::update_post))
                .route("/{id}", web::delete().to(posts::delete_post)),
        );
}

// Domain-to-DTO mapping, shared by the author and post handlers.

fn author_response(author: Author) -> AuthorResponse {
    AuthorResponse {
        id: author.id,
        name: author.name,
        email: author.email,
    }
}

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        author_id: post.author_id,
    }
}

fn post_with_author_response(joined: PostWithAuthor) -> PostWithAuthorResponse {
    PostWithAuthorResponse {
        id: joined.post.id,
        title: joined.post.title,
        content: joined.post.content,
        author_id: joined.post.author_id,
        author: author_response(joined.author),
    }
}
