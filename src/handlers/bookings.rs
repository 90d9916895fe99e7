use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::response::sse::{Event, Sse};
use axum::Json;
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, Studio};
use crate::services::booking::{self as booking_service, BookingDraft};
use crate::state::{AppState, ChangedCollection};

// POST /api/bookings
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub client_id: String,
    pub client_name: String,
    pub studio: Studio,
    pub date: i64,
    pub start_time: String,
    pub end_time: String,
    pub equipment_ids: Vec<String>,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        booking_service::create_booking(
            &db,
            BookingDraft {
                client_id: body.client_id,
                client_name: body.client_name,
                studio: body.studio,
                date: body.date,
                start_time: body.start_time,
                end_time: body.end_time,
                equipment_ids: body.equipment_ids,
            },
        )?
    };

    let _ = state.changes_tx.send(ChangedCollection::Bookings);
    tracing::info!(
        booking_id = %booking.id,
        studio = booking.studio.as_str(),
        total_amount = booking.total_amount,
        "booking created"
    );

    Ok(Json(booking))
}

// GET /api/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub client_id: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let db = state.db.lock().unwrap();

    let bookings = match query.client_id.as_deref() {
        Some(client_id) => {
            let mut list = queries::get_bookings_by_client(&db, client_id)?;
            if let Some(status) = query.status.as_deref() {
                list.retain(|b| b.status.as_str() == status);
            }
            list
        }
        None => queries::get_all_bookings(&db, query.status.as_deref(), query.limit.unwrap_or(50))?,
    };

    Ok(Json(bookings))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        queries::get_booking(&db, &id)?
    };

    booking
        .map(Json)
        .ok_or_else(|| AppError::NotFound("booking not found".to_string()))
}

// POST /api/bookings/:id/status
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        booking_service::change_status(&db, &id, body.status)?
    };

    let _ = state.changes_tx.send(ChangedCollection::Bookings);
    tracing::info!(booking_id = %id, status = body.status.as_str(), "booking status updated");

    Ok(Json(booking))
}

// GET /api/bookings/events — SSE stream that re-sends the full list on
// every bookings write. No diffing.
#[derive(Deserialize)]
pub struct EventsQuery {
    pub client_id: Option<String>,
}

pub async fn bookings_stream(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventsQuery>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let snapshot = {
        let state = state.clone();
        let client_id = query.client_id.clone();
        move || {
            let db = state.db.lock().unwrap();
            let bookings = match client_id.as_deref() {
                Some(id) => queries::get_bookings_by_client(&db, id),
                // negative LIMIT disables the cap in SQLite
                None => queries::get_all_bookings(&db, None, -1),
            }
            .unwrap_or_default();
            serde_json::to_string(&bookings).unwrap_or_default()
        }
    };

    let initial = tokio_stream::once(Ok::<_, Infallible>(
        Event::default().data(snapshot()).event("bookings"),
    ));

    let rx = state.changes_tx.subscribe();
    let live = BroadcastStream::new(rx).filter_map(move |result| match result {
        Ok(ChangedCollection::Bookings) => {
            Some(Ok(Event::default().data(snapshot()).event("bookings")))
        }
        Ok(_) => None,
        // A lagged receiver just re-delivers the current full list
        Err(_) => Some(Ok(Event::default().data(snapshot()).event("bookings"))),
    });

    let keepalive = tokio_stream::StreamExt::map(
        tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(Duration::from_secs(30))),
        |_| Ok(Event::default().comment("keepalive")),
    );

    let merged = StreamExt::merge(initial.chain(live), keepalive);
    Sse::new(merged)
}
