use async_trait::async_trait;

use crate::domain::{Author, AuthorDraft, NewPost, Post, PostDraft, PostWithAuthor};
use crate::error::RepoError;

/// Default page size for author listings, matching the service's fixed
/// offset/limit pagination (no total-count metadata).
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// An offset/limit window over an insertion-ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Author persistence operations.
///
/// Mutations are transactional: a failure mid-operation leaves no partial
/// record, and the check-then-act flows (duplicate email on create, the
/// cascade on delete) execute against the same transaction they commit in.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find an author by id. No side effects.
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, RepoError>;

    /// Find an author by email. Exists for duplicate detection; it is not
    /// part of the public HTTP surface.
    async fn find_by_email(&self, email: &str) -> Result<Option<Author>, RepoError>;

    /// List authors in insertion order, windowed by `page`.
    async fn list(&self, page: Page) -> Result<Vec<Author>, RepoError>;

    /// Insert a new author and return it with its store-assigned id.
    ///
    /// Fails with [`RepoError::DuplicateEmail`] when the email is already
    /// registered, whether the pre-check catches it or the store's UNIQUE
    /// constraint rejects a racing insert at commit time.
    async fn create(&self, draft: AuthorDraft) -> Result<Author, RepoError>;

    /// Overwrite name and email in place; the id never changes.
    ///
    /// Fails with [`RepoError::NotFound`] when the id is absent. Email
    /// uniqueness is not re-checked here (a known gap kept on purpose);
    /// the store constraint still rejects a collision.
    async fn update(&self, id: i32, draft: AuthorDraft) -> Result<Author, RepoError>;

    /// Delete the author and every post it owns, atomically.
    ///
    /// Fails with [`RepoError::NotFound`] when the id is absent. A crash
    /// mid-cascade leaves either both author and posts in place or both
    /// gone, never an orphaned post.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Post persistence operations.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post after confirming the author exists.
    ///
    /// Fails with [`RepoError::InvalidReference`] when `author_id` does not
    /// resolve, either from the pre-check or from the store's foreign-key
    /// constraint rejecting a racing insert.
    async fn create(&self, new: NewPost) -> Result<Post, RepoError>;

    /// Find a post with its author eager-loaded in the same round trip.
    async fn find_by_id(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError>;

    /// List posts, optionally restricted to one author, each with its
    /// author eager-loaded. One SQL round trip regardless of result size.
    async fn list(&self, author_id: Option<i32>) -> Result<Vec<PostWithAuthor>, RepoError>;

    /// List a single author's posts without the author view (the caller
    /// already knows the author).
    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Post>, RepoError>;

    /// Overwrite title and content; the author reference is never mutated.
    async fn update(&self, id: i32, draft: PostDraft) -> Result<Post, RepoError>;

    /// Delete one post. Fails with [`RepoError::NotFound`] when absent.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}
