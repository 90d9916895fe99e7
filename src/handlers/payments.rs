use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Payment, PaymentCard, PaymentMethod};
use crate::services::payment as payment_service;
use crate::state::AppState;

// POST /api/payments
#[derive(Deserialize)]
pub struct ProcessPaymentRequest {
    pub booking_id: String,
    pub payment_method: PaymentMethod,
    pub card: Option<PaymentCard>,
}

pub async fn process_payment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ProcessPaymentRequest>,
) -> Result<Json<Payment>, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        queries::get_booking(&db, &body.booking_id)?
    }
    .ok_or_else(|| AppError::NotFound("booking not found".to_string()))?;

    let payment =
        payment_service::process_payment(&state, &booking, body.payment_method, body.card.as_ref())
            .await?;

    Ok(Json(payment))
}

// GET /api/payments
#[derive(Deserialize)]
pub struct PaymentsQuery {
    pub client_id: Option<String>,
    pub limit: Option<i64>,
}

pub async fn get_payments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaymentsQuery>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let db = state.db.lock().unwrap();

    let payments = match query.client_id.as_deref() {
        Some(client_id) => queries::get_payments_by_client(&db, client_id)?,
        None => queries::get_all_payments(&db, query.limit.unwrap_or(50))?,
    };

    Ok(Json(payments))
}
