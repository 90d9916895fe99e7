use serde::{Deserialize, Serialize};

/// Items whose `maintenance_due` falls inside this window are surfaced as
/// needing service.
pub const MAINTENANCE_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// A rentable item with an hourly rate. `maintenance_due` is epoch
/// milliseconds, 0 meaning no maintenance is scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price_per_hour: f64,
    pub is_available: bool,
    pub maintenance_due: i64,
}

impl Equipment {
    /// Maintenance is due within the warning window (or already overdue).
    pub fn maintenance_due_soon(&self, now_ms: i64) -> bool {
        self.maintenance_due > 0 && self.maintenance_due < now_ms + MAINTENANCE_WINDOW_MS
    }

    /// A past-due maintenance date marks the item as needing urgent service.
    pub fn needs_urgent_service(&self, now_ms: i64) -> bool {
        self.maintenance_due > 0 && self.maintenance_due < now_ms
    }
}
