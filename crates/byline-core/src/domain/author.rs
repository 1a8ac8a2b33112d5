use serde::{Deserialize, Serialize};

/// Author entity - owns a collection of posts.
///
/// The id is assigned by the store on insert and is immutable afterwards.
/// No two authors may share an email; the store's UNIQUE constraint is the
/// final authority on that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Fields a caller supplies when creating or overwriting an author.
///
/// Used for both create and update: an update overwrites name and email in
/// place and leaves the id untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDraft {
    pub name: String,
    pub email: String,
}

impl AuthorDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
