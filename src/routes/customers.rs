//! Customer route handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::Envelope;
use crate::db::CustomerRepository;
use crate::error::{ApiJson, AppError};
use crate::models::{CustomerId, format_timestamp};
use crate::state::AppState;

/// Request body for creating a customer.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub address: Option<String>,
}

/// Response data for a created customer.
#[derive(Debug, Serialize)]
pub struct CustomerCreated {
    pub id: CustomerId,
    pub name: String,
    pub address: Option<String>,
    pub created_on: String,
}

/// Create a new customer.
///
/// POST /api/v1/customer
///
/// # Errors
///
/// Returns `AppError` if the body is malformed, `name` is missing, or the
/// insert fails.
#[instrument(skip(state, body), fields(name = %body.name))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateCustomerRequest>,
) -> Result<Json<Envelope<CustomerCreated>>, AppError> {
    let date_created = Utc::now();
    let customer = CustomerRepository::new(state.pool())
        .create(&body.name, body.address.as_deref(), date_created)
        .await?;

    tracing::info!(customer_id = %customer.id, "customer created");

    Ok(Json(Envelope::Ok {
        data: CustomerCreated {
            id: customer.id,
            name: customer.name,
            address: customer.address,
            created_on: format_timestamp(customer.date_created),
        },
    }))
}
