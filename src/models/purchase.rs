//! Purchase domain model.

use chrono::{DateTime, Utc};

use super::{CustomerId, PurchaseId};

/// A purchase row.
///
/// A purchase belongs to exactly one customer for its lifetime; there is no
/// reassignment operation. `last_updated` stays `NULL` until the first
/// update.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Purchase {
    pub id: PurchaseId,
    pub purchase_name: String,
    pub quantity: i64,
    pub customer_id: CustomerId,
    pub date_created: DateTime<Utc>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// The mutable fields of a purchase.
///
/// Only the fields that are `Some` are written; the update always touches
/// `last_updated` even when both are absent.
#[derive(Debug, Clone, Default)]
pub struct PurchaseUpdate {
    pub purchase_name: Option<String>,
    pub quantity: Option<i64>,
}
