//! # Byline Infrastructure
//!
//! Concrete implementations of the ports defined in `byline-core`:
//! SeaORM schema entities for the two tables, the Postgres repositories,
//! and connection management.

pub mod database;

pub use database::{
    DatabaseConfig, DatabaseConnections, PostgresAuthorRepository, PostgresPostRepository,
};
