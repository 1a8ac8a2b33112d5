//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Body for creating an author, and for overwriting one via PUT
/// (both fields are replaced; the id comes from the path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRequest {
    pub name: String,
    pub email: String,
}

/// An author as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Body for creating a post. The referenced author must already exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

/// Body for updating a post. The author reference cannot be changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
}

/// A post as returned by list/update operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

/// A post with its author embedded, for reads that eager-load the author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithAuthorResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub author: AuthorResponse,
}

/// Confirmation body for delete operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_with_author_nests_the_author_object() {
        let body = PostWithAuthorResponse {
            id: 7,
            title: "Hi".to_string(),
            content: "World".to_string(),
            author_id: 1,
            author: AuthorResponse {
                id: 1,
                name: "Bob".to_string(),
                email: "b@x.com".to_string(),
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["author_id"], 1);
        assert_eq!(json["author"]["email"], "b@x.com");
    }

    #[test]
    fn author_request_round_trips() {
        let parsed: AuthorRequest =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@x.com"}"#).unwrap();
        assert_eq!(parsed.name, "Ada");
        assert_eq!(parsed.email, "ada@x.com");
    }
}
