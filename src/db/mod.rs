//! Database operations for the purchases store.
//!
//! # Tables
//!
//! - `customer` - Customers (`id`, `name`, `address`, `date_created`)
//! - `purchases` - Purchases tied to a customer (`id`, `purchase_name`,
//!   `quantity`, `customer_id`, `date_created`, `last_updated`)
//!
//! The schema is created once at startup if absent and never migrated.
//! Referential integrity between the two tables is enforced by an explicit
//! existence check in the handlers, not a store-level foreign key.

pub mod customers;
pub mod purchases;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use customers::CustomerRepository;
pub use purchases::PurchaseRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created on first boot if it does not exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create the `customer` and `purchases` tables if they do not exist.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a statement fails.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS customer (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT,
            date_created TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS purchases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            purchase_name TEXT NOT NULL,
            quantity INTEGER DEFAULT 0,
            customer_id INTEGER NOT NULL,
            date_created TEXT NOT NULL,
            last_updated TEXT
        )
        ",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{RepositoryError, init_schema};
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory pool for repository tests.
    ///
    /// Capped at one connection so every statement sees the same in-memory
    /// database.
    pub async fn memory_pool() -> Result<SqlitePool, RepositoryError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        init_schema(&pool).await?;
        Ok(pool)
    }
}
