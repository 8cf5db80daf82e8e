//! Customer domain model.

use chrono::{DateTime, Utc};

use super::CustomerId;

/// A customer row.
///
/// Customers are created by the API but never updated or deleted through it;
/// `id` and `date_created` are immutable once assigned by the store.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub address: Option<String>,
    pub date_created: DateTime<Utc>,
}
