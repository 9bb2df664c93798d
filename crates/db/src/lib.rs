//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - The database connection helper

pub mod entities;
pub mod repositories;

pub use repositories::{NewSign, SignError, SignRepository};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use signtrack_shared::config::DatabaseConfig;

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.as_str());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);

    let db = Database::connect(options).await?;
    tracing::info!(
        max_connections = config.max_connections,
        "Connected to database"
    );

    Ok(db)
}
