use serde::{Deserialize, Serialize};

use super::Equipment;

/// A reservation of a studio plus the equipment selected for it.
///
/// `total_amount` is priced once at creation time; later edits to the
/// equipment catalog do not retroactively change it. All timestamps are
/// epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub studio: Studio,
    pub equipment: Vec<Equipment>,
    pub date: i64,
    pub start_time: String,
    pub end_time: String,
    pub total_hours: i64,
    pub total_amount: f64,
    pub status: BookingStatus,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Studio {
    StudioA,
    StudioB,
    StudioC,
    StudioD,
}

impl Studio {
    pub fn as_str(&self) -> &'static str {
        match self {
            Studio::StudioA => "STUDIO_A",
            Studio::StudioB => "STUDIO_B",
            Studio::StudioC => "STUDIO_C",
            Studio::StudioD => "STUDIO_D",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "STUDIO_B" => Studio::StudioB,
            "STUDIO_C" => Studio::StudioC,
            "STUDIO_D" => Studio::StudioD,
            _ => Studio::StudioA,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::InProgress => "IN_PROGRESS",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "CONFIRMED" => BookingStatus::Confirmed,
            "IN_PROGRESS" => BookingStatus::InProgress,
            "COMPLETED" => BookingStatus::Completed,
            "CANCELLED" => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }

    /// Lifecycle: PENDING → {CONFIRMED, CANCELLED}; CONFIRMED →
    /// {IN_PROGRESS, CANCELLED}; IN_PROGRESS → COMPLETED. Re-applying the
    /// current status is allowed so repeated updates stay idempotent.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, InProgress)
                | (Confirmed, Cancelled)
                | (InProgress, Completed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}
