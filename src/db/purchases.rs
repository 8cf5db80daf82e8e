//! Purchase repository for database operations.
//!
//! Deletion by explicit ids and the partial update both build their SQL with
//! `QueryBuilder`, since the `IN` list length and the set of updated columns
//! are only known per request.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::RepositoryError;
use crate::models::{CustomerId, Purchase, PurchaseId, PurchaseUpdate};

/// Repository for purchase database operations.
pub struct PurchaseRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PurchaseRepository<'a> {
    /// Create a new purchase repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new purchase with `last_updated` unset.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        customer_id: CustomerId,
        purchase_name: &str,
        quantity: i64,
        date_created: DateTime<Utc>,
    ) -> Result<Purchase, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO purchases (purchase_name, quantity, date_created, customer_id)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(purchase_name)
        .bind(quantity)
        .bind(date_created)
        .bind(customer_id)
        .execute(self.pool)
        .await?;

        Ok(Purchase {
            id: PurchaseId::new(result.last_insert_rowid()),
            purchase_name: purchase_name.to_owned(),
            quantity,
            customer_id,
            date_created,
            last_updated: None,
        })
    }

    /// Fetch a purchase by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: PurchaseId) -> Result<Option<Purchase>, RepositoryError> {
        let row = sqlx::query_as::<_, Purchase>(
            r"
            SELECT id, purchase_name, quantity, customer_id, date_created, last_updated
            FROM purchases
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// List all purchases belonging to a customer, oldest id first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Purchase>, RepositoryError> {
        let rows = sqlx::query_as::<_, Purchase>(
            r"
            SELECT id, purchase_name, quantity, customer_id, date_created, last_updated
            FROM purchases
            WHERE customer_id = ?
            ORDER BY id ASC
            ",
        )
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Delete every purchase belonging to a customer.
    ///
    /// Returns the number of rows removed; zero is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete_all_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM purchases WHERE customer_id = ?
            ",
        )
        .bind(customer_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete the purchases matching the customer AND any of the given ids.
    ///
    /// Ids that do not exist or belong to another customer are skipped.
    /// An empty id list matches nothing and skips the store round-trip.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete_by_ids(
        &self,
        customer_id: CustomerId,
        ids: &[PurchaseId],
    ) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut builder =
            QueryBuilder::<Sqlite>::new("DELETE FROM purchases WHERE customer_id = ");
        builder.push_bind(customer_id);
        builder.push(" AND id IN (");
        {
            let mut list = builder.separated(", ");
            for id in ids {
                list.push_bind(*id);
            }
        }
        builder.push(")");

        let result = builder.build().execute(self.pool).await?;

        Ok(result.rows_affected())
    }

    /// Apply a partial update to a purchase.
    ///
    /// Writes whichever columns are present in `changes` and always sets
    /// `last_updated`. Returns the number of rows affected; a missing
    /// purchase affects zero rows silently.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn update(
        &self,
        id: PurchaseId,
        changes: &PurchaseUpdate,
        last_updated: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE purchases SET ");
        {
            let mut columns = builder.separated(", ");
            if let Some(purchase_name) = &changes.purchase_name {
                columns.push("purchase_name = ");
                columns.push_bind_unseparated(purchase_name.as_str());
            }
            if let Some(quantity) = changes.quantity {
                columns.push("quantity = ");
                columns.push_bind_unseparated(quantity);
            }
            columns.push("last_updated = ");
            columns.push_bind_unseparated(last_updated);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);

        let result = builder.build().execute(self.pool).await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::CustomerRepository;
    use crate::db::test_support::memory_pool;

    async fn seed_customer(pool: &SqlitePool) -> CustomerId {
        CustomerRepository::new(pool)
            .create("Alice", None, Utc::now())
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let pool = memory_pool().await.unwrap();
        let repo = PurchaseRepository::new(&pool);
        let customer_id = seed_customer(&pool).await;

        let phone = repo
            .create(customer_id, "Phone", 2, Utc::now())
            .await
            .unwrap();
        let laptop = repo
            .create(customer_id, "Laptop", 1, Utc::now())
            .await
            .unwrap();

        let listed = repo.list_for_customer(customer_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, phone.id);
        assert_eq!(listed[1].id, laptop.id);
        assert!(listed.iter().all(|p| p.last_updated.is_none()));
    }

    #[tokio::test]
    async fn test_delete_by_ids_skips_foreign_and_unknown_ids() {
        let pool = memory_pool().await.unwrap();
        let repo = PurchaseRepository::new(&pool);
        let alice = seed_customer(&pool).await;
        let bob = CustomerRepository::new(&pool)
            .create("Bob", None, Utc::now())
            .await
            .unwrap()
            .id;

        let mine = repo.create(alice, "Phone", 1, Utc::now()).await.unwrap();
        let theirs = repo.create(bob, "Laptop", 1, Utc::now()).await.unwrap();

        let deleted = repo
            .delete_by_ids(alice, &[mine.id, theirs.id, PurchaseId::new(9999)])
            .await
            .unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(repo.list_for_customer(bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_ids_empty_list_is_noop() {
        let pool = memory_pool().await.unwrap();
        let repo = PurchaseRepository::new(&pool);
        let customer_id = seed_customer(&pool).await;
        repo.create(customer_id, "Phone", 1, Utc::now())
            .await
            .unwrap();

        let deleted = repo.delete_by_ids(customer_id, &[]).await.unwrap();

        assert_eq!(deleted, 0);
        assert_eq!(repo.list_for_customer(customer_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_all_for_customer() {
        let pool = memory_pool().await.unwrap();
        let repo = PurchaseRepository::new(&pool);
        let customer_id = seed_customer(&pool).await;
        repo.create(customer_id, "Phone", 1, Utc::now())
            .await
            .unwrap();
        repo.create(customer_id, "Laptop", 1, Utc::now())
            .await
            .unwrap();

        assert_eq!(repo.delete_all_for_customer(customer_id).await.unwrap(), 2);
        assert_eq!(repo.delete_all_for_customer(customer_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let pool = memory_pool().await.unwrap();
        let repo = PurchaseRepository::new(&pool);
        let customer_id = seed_customer(&pool).await;
        let purchase = repo
            .create(customer_id, "Phone", 2, Utc::now())
            .await
            .unwrap();

        let changes = PurchaseUpdate {
            purchase_name: None,
            quantity: Some(7),
        };
        let affected = repo
            .update(purchase.id, &changes, Utc::now())
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let updated = repo.get(purchase.id).await.unwrap().unwrap();
        assert_eq!(updated.purchase_name, "Phone");
        assert_eq!(updated.quantity, 7);
        let last_updated = updated.last_updated.unwrap();
        assert!(last_updated >= updated.date_created);
    }

    #[tokio::test]
    async fn test_update_missing_row_affects_nothing() {
        let pool = memory_pool().await.unwrap();
        let repo = PurchaseRepository::new(&pool);

        let affected = repo
            .update(
                PurchaseId::new(404),
                &PurchaseUpdate::default(),
                Utc::now(),
            )
            .await
            .unwrap();

        assert_eq!(affected, 0);
    }
}
