//! HTTP route handlers for the purchases server.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                          - Health check
//!
//! # Customers
//! POST   /api/v1/customer           - Create a customer
//!
//! # Purchases
//! POST   /api/v1/purchase/{id}      - Create a purchase for customer {id}
//! GET    /api/v1/purchase/{id}      - List purchases for customer {id}
//! DELETE /api/v1/purchase/{id}      - Delete purchases for customer {id}
//! PATCH  /api/v1/purchase/{id}      - Update purchase {id}
//! ```
//!
//! The `/purchase/{id}` path carries a customer id for POST/GET/DELETE and a
//! purchase id for PATCH; the handlers extract the matching newtype.

pub mod customers;
pub mod home;
pub mod purchases;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// The uniform response wrapper.
///
/// Success carries a payload; a business rejection carries a human-readable
/// message. Both serialize at HTTP 200 — rejections are expected outcomes,
/// not protocol errors.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Ok { data: T },
    Failed { data: &'static str },
}

/// Create the `/api/v1` routes router.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/customer", post(customers::create))
        .route(
            "/purchase/{id}",
            post(purchases::create)
                .get(purchases::list)
                .delete(purchases::remove)
                .patch(purchases::update),
        )
}

/// Create all routes for the purchases server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .nest("/api/v1", api_routes())
}
