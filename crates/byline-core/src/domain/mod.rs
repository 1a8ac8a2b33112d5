//! Domain entities - the records the service persists.

mod author;

mod post;

pub use author::{Author, AuthorDraft};
pub use post::{NewPost, Post, PostDraft, PostWithAuthor};
