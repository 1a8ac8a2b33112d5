//! Database connection management.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Connection-pool configuration for the store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// The service's pooled connection to the relational store.
///
/// The repositories and the health endpoint all hold this one pool through
/// the shared handle; no other shared mutable state exists in the process.
pub struct DatabaseConnections {
    pub main: Arc<DbConn>,
}

impl DatabaseConnections {
    /// Build the pool from configuration and connect.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Arc::new(Database::connect(opts).await?);
        tracing::info!(
            pool_max = config.max_connections,
            "database connected"
        );

        Ok(Self { main })
    }

    /// One round trip to the store, for the health endpoint.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.main.ping().await
    }
}
