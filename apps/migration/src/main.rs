//! Schema migration CLI.
//!
//! Run `cargo run -p migration -- up` against `DATABASE_URL`. The API
//! server also applies pending migrations on boot, so this binary is
//! mostly useful for `down`, `status`, and `fresh` during development.

use sea_orm_migration::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    cli::run_cli(migration::Migrator).await;
}
