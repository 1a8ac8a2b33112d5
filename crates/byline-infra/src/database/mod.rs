//! Database layer: schema entities, connection management, repositories.

mod author_repo;
mod connections;
mod guard;
mod post_repo;

pub mod entity;

pub use author_repo::PostgresAuthorRepository;
pub use connections::{DatabaseConfig, DatabaseConnections};
pub use post_repo::PostgresPostRepository;

#[cfg(test)]
mod tests;
