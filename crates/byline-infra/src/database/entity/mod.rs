//! SeaORM entities for the two-table relational shape.
//!
//! The relationship between them carries the cascade rule: an author owns
//! its posts, and deleting the author deletes the posts.

pub mod author;
pub mod post;
