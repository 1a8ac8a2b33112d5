//! Application state - shared across all handlers.

use std::sync::Arc;

use byline_core::ports::{AuthorRepository, PostRepository};
use byline_infra::{DatabaseConnections, PostgresAuthorRepository, PostgresPostRepository};

/// Shared application state.
///
/// Handlers depend on the repository traits, so tests can swap in
/// in-memory implementations without a database.
#[derive(Clone)]
pub struct AppState {
    pub authors: Arc<dyn AuthorRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub db: Arc<DatabaseConnections>,
}

impl AppState {
    /// Build the application state over an established connection pool.
    pub fn new(connections: DatabaseConnections) -> Self {
        let db = Arc::new(connections);

        Self {
            authors: Arc::new(PostgresAuthorRepository::new(db.main.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.main.clone())),
            db,
        }
    }
}
