//! Customer repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::{Customer, CustomerId};

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new customer; the store assigns the id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        address: Option<&str>,
        date_created: DateTime<Utc>,
    ) -> Result<Customer, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO customer (name, address, date_created)
            VALUES (?, ?, ?)
            ",
        )
        .bind(name)
        .bind(address)
        .bind(date_created)
        .execute(self.pool)
        .await?;

        Ok(Customer {
            id: CustomerId::new(result.last_insert_rowid()),
            name: name.to_owned(),
            address: address.map(str::to_owned),
            date_created,
        })
    }

    /// Check whether a customer with the given id exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT count(*) FROM customer WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(count >= 1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let pool = memory_pool().await.unwrap();
        let repo = CustomerRepository::new(&pool);

        let first = repo
            .create("Alice", Some("1 Main St"), Utc::now())
            .await
            .unwrap();
        let second = repo.create("Bob", None, Utc::now()).await.unwrap();

        assert!(first.id.as_i64() >= 1);
        assert!(second.id.as_i64() > first.id.as_i64());
        assert_eq!(second.address, None);
    }

    #[tokio::test]
    async fn test_exists() {
        let pool = memory_pool().await.unwrap();
        let repo = CustomerRepository::new(&pool);

        let customer = repo.create("Alice", None, Utc::now()).await.unwrap();

        assert!(repo.exists(customer.id).await.unwrap());
        assert!(
            !repo
                .exists(CustomerId::new(customer.id.as_i64() + 1))
                .await
                .unwrap()
        );
    }
}
