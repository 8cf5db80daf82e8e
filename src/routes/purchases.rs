//! Purchase route handlers.
//!
//! Creating and listing purchases check that the customer exists first and
//! answer a business rejection at HTTP 200 when it does not. The check and
//! the dependent statement are separate round-trips to the store; a customer
//! deleted in between is a known, unmitigated race.

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::Envelope;
use crate::db::{CustomerRepository, PurchaseRepository};
use crate::error::{ApiJson, AppError};
use crate::models::{CustomerId, Purchase, PurchaseId, PurchaseUpdate, format_timestamp};
use crate::state::AppState;

const CUSTOMER_MISSING: &str = "Customer doesn't exist";
const QUANTITY_TOO_SMALL: &str = "Quantity can't be less than 1";

/// Request body for creating a purchase.
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseRequest {
    pub purchase_name: String,
    pub quantity: i64,
}

/// Response data for a created purchase.
#[derive(Debug, Serialize)]
pub struct PurchaseCreated {
    pub id: PurchaseId,
    pub purchase_name: String,
    pub quantity: i64,
    pub customer_id: CustomerId,
    pub purchased_on: String,
}

/// One purchase in a customer's listing.
#[derive(Debug, Serialize)]
pub struct PurchaseListItem {
    pub purchase_id: PurchaseId,
    pub purchase_name: String,
    pub quantity: i64,
    pub purchased_on: String,
    pub last_updated_on: Option<String>,
}

impl From<Purchase> for PurchaseListItem {
    fn from(purchase: Purchase) -> Self {
        Self {
            purchase_id: purchase.id,
            purchase_name: purchase.purchase_name,
            quantity: purchase.quantity,
            purchased_on: format_timestamp(purchase.date_created),
            last_updated_on: purchase.last_updated.map(format_timestamp),
        }
    }
}

/// Request body for deleting purchases.
#[derive(Debug, Deserialize)]
pub struct DeletePurchasesRequest {
    pub purchase_ids: Vec<PurchaseId>,
    pub delete_all: bool,
}

/// Response body for a deletion: `{"status":"ok","deleted_count":n}`.
#[derive(Debug, Serialize)]
pub struct PurchasesDeleted {
    pub status: &'static str,
    pub deleted_count: u64,
}

/// Request body for updating a purchase; both fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdatePurchaseRequest {
    pub purchase_name: Option<String>,
    pub quantity: Option<i64>,
}

/// Response data for an updated purchase, reflecting the post-update row.
#[derive(Debug, Serialize)]
pub struct PurchaseDetail {
    pub id: PurchaseId,
    pub purchase_name: String,
    pub quantity: i64,
    pub purchased_on: String,
    pub last_updated_on: Option<String>,
}

impl From<Purchase> for PurchaseDetail {
    fn from(purchase: Purchase) -> Self {
        Self {
            id: purchase.id,
            purchase_name: purchase.purchase_name,
            quantity: purchase.quantity,
            purchased_on: format_timestamp(purchase.date_created),
            last_updated_on: purchase.last_updated.map(format_timestamp),
        }
    }
}

/// Create a new purchase for a customer.
///
/// POST /api/v1/purchase/{customer_id}
///
/// Rejects at HTTP 200 when the customer does not exist or the quantity is
/// below 1; neither rejection inserts a row.
///
/// # Errors
///
/// Returns `AppError` if the body is malformed or the store fails.
#[instrument(skip(state, body), fields(customer_id = %customer_id))]
pub async fn create(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
    ApiJson(body): ApiJson<CreatePurchaseRequest>,
) -> Result<Json<Envelope<PurchaseCreated>>, AppError> {
    if !CustomerRepository::new(state.pool())
        .exists(customer_id)
        .await?
    {
        tracing::debug!("purchase creation rejected, no such customer");
        return Ok(Json(Envelope::Failed {
            data: CUSTOMER_MISSING,
        }));
    }

    if body.quantity < 1 {
        tracing::debug!(quantity = body.quantity, "purchase creation rejected");
        return Ok(Json(Envelope::Failed {
            data: QUANTITY_TOO_SMALL,
        }));
    }

    let purchased_on = Utc::now();
    let purchase = PurchaseRepository::new(state.pool())
        .create(customer_id, &body.purchase_name, body.quantity, purchased_on)
        .await?;

    tracing::info!(purchase_id = %purchase.id, "purchase created");

    Ok(Json(Envelope::Ok {
        data: PurchaseCreated {
            id: purchase.id,
            purchase_name: purchase.purchase_name,
            quantity: purchase.quantity,
            customer_id: purchase.customer_id,
            purchased_on: format_timestamp(purchase.date_created),
        },
    }))
}

/// List a customer's purchases.
///
/// GET /api/v1/purchase/{customer_id}
///
/// Rejects at HTTP 200 when the customer does not exist. A customer with no
/// purchases gets an empty list.
///
/// # Errors
///
/// Returns `AppError` if the store fails.
#[instrument(skip(state), fields(customer_id = %customer_id))]
pub async fn list(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
) -> Result<Json<Envelope<Vec<PurchaseListItem>>>, AppError> {
    if !CustomerRepository::new(state.pool())
        .exists(customer_id)
        .await?
    {
        return Ok(Json(Envelope::Failed {
            data: CUSTOMER_MISSING,
        }));
    }

    let purchases = PurchaseRepository::new(state.pool())
        .list_for_customer(customer_id)
        .await?;

    Ok(Json(Envelope::Ok {
        data: purchases.into_iter().map(PurchaseListItem::from).collect(),
    }))
}

/// Delete purchases for a customer, by id list or all at once.
///
/// DELETE /api/v1/purchase/{customer_id}
///
/// `delete_all: true` ignores `purchase_ids`. No customer existence check is
/// performed; a count of zero is a normal outcome.
///
/// # Errors
///
/// Returns `AppError` if the body is malformed or the store fails.
#[instrument(skip(state, body), fields(customer_id = %customer_id, delete_all = body.delete_all))]
pub async fn remove(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
    ApiJson(body): ApiJson<DeletePurchasesRequest>,
) -> Result<Json<PurchasesDeleted>, AppError> {
    let repo = PurchaseRepository::new(state.pool());

    let deleted_count = if body.delete_all {
        repo.delete_all_for_customer(customer_id).await?
    } else {
        repo.delete_by_ids(customer_id, &body.purchase_ids).await?
    };

    tracing::info!(deleted_count, "purchases deleted");

    Ok(Json(PurchasesDeleted {
        status: "ok",
        deleted_count,
    }))
}

/// Update a purchase's mutable fields.
///
/// PATCH /api/v1/purchase/{purchase_id}
///
/// Writes whichever of `purchase_name`/`quantity` are present and stamps
/// `last_updated`, then re-fetches the row. The UPDATE itself runs without
/// an existence check; a missing purchase only surfaces on the re-fetch.
///
/// # Errors
///
/// Returns `AppError::PurchaseNotFound` if no such purchase exists, or
/// `AppError` for a malformed body or store failure.
#[instrument(skip(state, body), fields(purchase_id = %purchase_id))]
pub async fn update(
    State(state): State<AppState>,
    Path(purchase_id): Path<PurchaseId>,
    ApiJson(body): ApiJson<UpdatePurchaseRequest>,
) -> Result<Json<Envelope<PurchaseDetail>>, AppError> {
    let repo = PurchaseRepository::new(state.pool());

    let changes = PurchaseUpdate {
        purchase_name: body.purchase_name,
        quantity: body.quantity,
    };
    repo.update(purchase_id, &changes, Utc::now()).await?;

    let purchase = repo
        .get(purchase_id)
        .await?
        .ok_or(AppError::PurchaseNotFound(purchase_id))?;

    tracing::info!("purchase updated");

    Ok(Json(Envelope::Ok {
        data: purchase.into(),
    }))
}
