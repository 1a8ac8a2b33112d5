use serde::{Deserialize, Serialize};

use super::Author;

/// Post entity - belongs to exactly one author.
///
/// `author_id` must always resolve to an existing author and is immutable
/// after creation; there is no reassign operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

/// Fields for creating a post. The referenced author must exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

/// Fields an update may overwrite. The author reference is not among them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

/// A post together with its author, fetched in the same round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Author,
}
