pub mod simulated;

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::queries;
use crate::models::{Booking, Payment, PaymentCard, PaymentMethod, PaymentStatus};
use crate::state::AppState;

/// Settlement seam. The production wiring plugs in the simulated gateway;
/// tests substitute deterministic fakes.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn settle(&self, payment: &Payment) -> anyhow::Result<PaymentStatus>;
}

#[derive(Debug)]
pub enum PaymentError {
    MissingCard,
    InvalidCard,
    Gateway(anyhow::Error),
    Storage(anyhow::Error),
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentError::MissingCard => write!(f, "Card details are required for this method"),
            PaymentError::InvalidCard => write!(f, "Invalid card details"),
            PaymentError::Gateway(e) => write!(f, "payment gateway error: {e}"),
            PaymentError::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl From<PaymentError> for crate::errors::AppError {
    fn from(e: PaymentError) -> Self {
        use crate::errors::AppError;
        match e {
            PaymentError::MissingCard | PaymentError::InvalidCard => {
                AppError::Validation(e.to_string())
            }
            PaymentError::Gateway(inner) => AppError::Gateway(inner.to_string()),
            PaymentError::Storage(inner) => AppError::Storage(inner),
        }
    }
}

/// Run a settlement attempt for a booking. A PENDING record is persisted
/// before the gateway is consulted, then overwritten with the resolved
/// outcome; the returned record's status is authoritative for the caller.
pub async fn process_payment(
    state: &Arc<AppState>,
    booking: &Booking,
    method: PaymentMethod,
    card: Option<&PaymentCard>,
) -> Result<Payment, PaymentError> {
    if method.requires_card() {
        let card = card.ok_or(PaymentError::MissingCard)?;
        if !card.is_valid() {
            return Err(PaymentError::InvalidCard);
        }
    }

    let created_at = crate::now_ms();
    let payment = Payment {
        id: uuid::Uuid::new_v4().to_string(),
        booking_id: booking.id.clone(),
        client_id: booking.client_id.clone(),
        client_name: booking.client_name.clone(),
        amount: booking.total_amount,
        payment_method: method,
        status: PaymentStatus::Pending,
        transaction_id: format!("TXN{created_at}"),
        created_at,
        processed_at: 0,
    };

    {
        let db = state.db.lock().unwrap();
        queries::insert_payment(&db, &payment).map_err(PaymentError::Storage)?;
    }

    let status = state
        .gateway
        .settle(&payment)
        .await
        .map_err(PaymentError::Gateway)?;
    let processed_at = crate::now_ms();

    {
        let db = state.db.lock().unwrap();
        queries::mark_payment_resolved(&db, &payment.id, status, processed_at)
            .map_err(PaymentError::Storage)?;
    }

    tracing::info!(
        payment_id = %payment.id,
        booking_id = %payment.booking_id,
        status = status.as_str(),
        "payment resolved"
    );

    Ok(Payment {
        status,
        processed_at,
        ..payment
    })
}
