use rusqlite::Connection;

use crate::db::queries;
use crate::models::{Booking, BookingStatus, Equipment, Studio};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug)]
pub enum BookingError {
    Validation(String),
    SlotTaken,
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
    NotFound,
    Storage(anyhow::Error),
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::Validation(msg) => write!(f, "{msg}"),
            BookingError::SlotTaken => {
                write!(f, "That studio is already booked for the selected time slot")
            }
            BookingError::InvalidTransition { from, to } => {
                write!(
                    f,
                    "Cannot move a booking from {} to {}",
                    from.as_str(),
                    to.as_str()
                )
            }
            BookingError::NotFound => write!(f, "Booking not found"),
            BookingError::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl From<anyhow::Error> for BookingError {
    fn from(e: anyhow::Error) -> Self {
        BookingError::Storage(e)
    }
}

impl From<BookingError> for crate::errors::AppError {
    fn from(e: BookingError) -> Self {
        use crate::errors::AppError;
        match e {
            BookingError::Validation(_) => AppError::Validation(e.to_string()),
            BookingError::SlotTaken | BookingError::InvalidTransition { .. } => {
                AppError::Conflict(e.to_string())
            }
            BookingError::NotFound => AppError::NotFound("booking not found".to_string()),
            BookingError::Storage(inner) => AppError::Storage(inner),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub client_id: String,
    pub client_name: String,
    pub studio: Studio,
    pub date: i64,
    pub start_time: String,
    pub end_time: String,
    pub equipment_ids: Vec<String>,
}

/// Whole hours between two "HH:MM" strings, taken from the leading hour
/// field only and clamped to at least 1. Either side failing to parse
/// yields the 2-hour fallback. Minutes never enter the calculation.
pub fn calculate_hours(start_time: &str, end_time: &str) -> i64 {
    let leading_hour = |s: &str| s.split(':').next().and_then(|h| h.parse::<i64>().ok());

    match (leading_hour(start_time), leading_hour(end_time)) {
        (Some(start), Some(end)) => (end - start).max(1),
        _ => 2,
    }
}

pub fn calculate_total_amount(equipment: &[Equipment], hours: i64) -> f64 {
    equipment.iter().map(|e| e.price_per_hour).sum::<f64>() * hours as f64
}

/// Price and persist a new booking. The amount is fixed here, once: later
/// catalog price changes do not flow back into existing bookings.
pub fn create_booking(conn: &Connection, draft: BookingDraft) -> Result<Booking, BookingError> {
    if draft.client_id.trim().is_empty() {
        return Err(BookingError::Validation("client_id is required".to_string()));
    }
    if draft.client_name.trim().is_empty() {
        return Err(BookingError::Validation(
            "client_name is required".to_string(),
        ));
    }
    if draft.equipment_ids.is_empty() {
        return Err(BookingError::Validation(
            "select at least one equipment item".to_string(),
        ));
    }

    let mut equipment = Vec::with_capacity(draft.equipment_ids.len());
    for id in &draft.equipment_ids {
        match queries::get_equipment(conn, id)? {
            Some(item) => equipment.push(item),
            None => {
                return Err(BookingError::Validation(format!("unknown equipment: {id}")));
            }
        }
    }

    check_slot_free(conn, &draft)?;

    let total_hours = calculate_hours(&draft.start_time, &draft.end_time);
    let total_amount = calculate_total_amount(&equipment, total_hours);

    let booking = Booking {
        id: uuid::Uuid::new_v4().to_string(),
        client_id: draft.client_id,
        client_name: draft.client_name,
        studio: draft.studio,
        equipment,
        date: draft.date,
        start_time: draft.start_time,
        end_time: draft.end_time,
        total_hours,
        total_amount,
        status: BookingStatus::Pending,
        created_at: crate::now_ms(),
    };

    queries::insert_booking(conn, &booking)?;
    Ok(booking)
}

/// Apply a status change, holding the lifecycle line: only the intended
/// transitions go through, and re-applying the current status is a no-op
/// success.
pub fn change_status(
    conn: &Connection,
    id: &str,
    new_status: BookingStatus,
) -> Result<Booking, BookingError> {
    let mut booking = queries::get_booking(conn, id)?.ok_or(BookingError::NotFound)?;

    if booking.status == new_status {
        return Ok(booking);
    }
    if !booking.status.can_transition_to(new_status) {
        return Err(BookingError::InvalidTransition {
            from: booking.status,
            to: new_status,
        });
    }

    queries::update_booking_status(conn, id, new_status)?;
    booking.status = new_status;
    Ok(booking)
}

/// Reject a draft whose [start,end) window overlaps a non-cancelled booking
/// of the same studio on the same day. Windows with unparsable endpoints
/// are not checked; the pricing fallback already tolerates them.
fn check_slot_free(conn: &Connection, draft: &BookingDraft) -> Result<(), BookingError> {
    let (new_start, new_end) = match (
        time_to_minutes(&draft.start_time),
        time_to_minutes(&draft.end_time),
    ) {
        (Some(s), Some(e)) => (s, e),
        _ => return Ok(()),
    };

    let day_start = draft.date - draft.date.rem_euclid(DAY_MS);
    let existing =
        queries::get_studio_bookings_for_day(conn, draft.studio.as_str(), day_start, day_start + DAY_MS)?;

    for booking in &existing {
        let (start, end) = match (
            time_to_minutes(&booking.start_time),
            time_to_minutes(&booking.end_time),
        ) {
            (Some(s), Some(e)) => (s, e),
            _ => continue,
        };
        // Overlap: existing starts before the new window ends AND ends after it starts
        if start < new_end && end > new_start {
            return Err(BookingError::SlotTaken);
        }
    }

    Ok(())
}

fn time_to_minutes(s: &str) -> Option<i64> {
    let mut parts = s.split(':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    Some(hours * 60 + minutes)
}
