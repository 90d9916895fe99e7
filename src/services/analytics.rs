use chrono::{DateTime, Datelike, Months, Utc};
use rusqlite::Connection;
use serde::Serialize;

use crate::db::queries;
use crate::models::equipment::MAINTENANCE_WINDOW_MS;
use crate::models::BookingStatus;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Last7Days,
    Last30Days,
    Last90Days,
    ThisMonth,
    LastMonth,
}

impl DateRange {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "last_7_days" => Some(DateRange::Last7Days),
            "last_30_days" => Some(DateRange::Last30Days),
            "last_90_days" => Some(DateRange::Last90Days),
            "this_month" => Some(DateRange::ThisMonth),
            "last_month" => Some(DateRange::LastMonth),
            _ => None,
        }
    }

    /// Inclusive lower bound of the range as epoch milliseconds.
    pub fn start_ms(&self, now: DateTime<Utc>) -> i64 {
        match self {
            DateRange::Last7Days => now.timestamp_millis() - 7 * DAY_MS,
            DateRange::Last30Days => now.timestamp_millis() - 30 * DAY_MS,
            DateRange::Last90Days => now.timestamp_millis() - 90 * DAY_MS,
            DateRange::ThisMonth => start_of_month_ms(now),
            DateRange::LastMonth => {
                let first = now.date_naive().with_day(1).unwrap_or(now.date_naive());
                let prev = first.checked_sub_months(Months::new(1)).unwrap_or(first);
                midnight_ms(prev)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    BookingAnalytics,
    Revenue,
    EquipmentUsage,
    ClientActivity,
    StaffPerformance,
}

impl ReportKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "booking_analytics" => Some(ReportKind::BookingAnalytics),
            "revenue" => Some(ReportKind::Revenue),
            "equipment_usage" => Some(ReportKind::EquipmentUsage),
            "client_activity" => Some(ReportKind::ClientActivity),
            "staff_performance" => Some(ReportKind::StaffPerformance),
            _ => None,
        }
    }
}

// ── Report payloads ──

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub monthly_revenue: f64,
    pub total_bookings: i64,
    pub total_users: i64,
    pub available_equipment: i64,
}

#[derive(Debug, Serialize)]
pub struct SystemStats {
    pub pending_bookings: i64,
    pub completed_today: i64,
    pub maintenance_due: i64,
    pub active_clients: i64,
}

#[derive(Debug, Serialize)]
pub struct BookingAnalytics {
    pub total_bookings: i64,
    pub completed_bookings: i64,
    pub cancelled_bookings: i64,
    pub cancellation_rate: f64,
    pub avg_booking_value: f64,
    pub peak_hours: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RevenueReport {
    pub total_revenue: f64,
    pub revenue_growth: f64,
    pub avg_revenue_per_booking: f64,
    pub most_profitable_studio: String,
    pub equipment_revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct EquipmentUsageReport {
    pub most_used_equipment: &'static str,
    pub equipment_utilization: i64,
    pub maintenance_required: i64,
    pub revenue_per_equipment: i64,
    pub availability_rate: i64,
}

#[derive(Debug, Serialize)]
pub struct ClientActivityReport {
    pub total_clients: i64,
    pub active_clients: i64,
    pub new_clients: i64,
    pub repeat_client_rate: i64,
    pub avg_bookings_per_client: f64,
}

#[derive(Debug, Serialize)]
pub struct StaffPerformanceReport {
    pub total_staff: i64,
    pub avg_bookings_processed: i64,
    pub response_time: &'static str,
    pub client_satisfaction: i64,
    pub efficiency_rating: i64,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReportData {
    Booking(BookingAnalytics),
    Revenue(RevenueReport),
    Equipment(EquipmentUsageReport),
    Clients(ClientActivityReport),
    Staff(StaffPerformanceReport),
}

// ── Computation ──

pub fn dashboard_summary(conn: &Connection, now: DateTime<Utc>) -> anyhow::Result<DashboardSummary> {
    let start_of_month = start_of_month_ms(now);
    Ok(DashboardSummary {
        monthly_revenue: queries::sum_revenue_since(conn, start_of_month)?,
        total_bookings: queries::count_bookings(conn)?,
        total_users: queries::count_users(conn)?,
        available_equipment: queries::count_available_equipment(conn)?,
    })
}

pub fn system_stats(conn: &Connection, now: DateTime<Utc>) -> anyhow::Result<SystemStats> {
    let start_of_day = midnight_ms(now.date_naive());
    Ok(SystemStats {
        pending_bookings: queries::count_bookings_with_status(conn, BookingStatus::Pending)?,
        completed_today: queries::count_bookings_with_status_since(
            conn,
            BookingStatus::Completed,
            start_of_day,
        )?,
        maintenance_due: queries::count_maintenance_due(
            conn,
            now.timestamp_millis() + MAINTENANCE_WINDOW_MS,
        )?,
        active_clients: queries::count_active_clients(conn)?,
    })
}

pub fn report(
    conn: &Connection,
    kind: ReportKind,
    range: DateRange,
    now: DateTime<Utc>,
) -> anyhow::Result<ReportData> {
    let since = range.start_ms(now);
    match kind {
        ReportKind::BookingAnalytics => Ok(ReportData::Booking(booking_analytics(conn, since)?)),
        ReportKind::Revenue => Ok(ReportData::Revenue(revenue_report(conn, since)?)),
        ReportKind::EquipmentUsage => Ok(ReportData::Equipment(equipment_usage(conn, now)?)),
        ReportKind::ClientActivity => Ok(ReportData::Clients(client_activity(conn)?)),
        ReportKind::StaffPerformance => Ok(ReportData::Staff(staff_performance())),
    }
}

fn booking_analytics(conn: &Connection, since: i64) -> anyhow::Result<BookingAnalytics> {
    let total = queries::count_bookings_since(conn, since)?;
    let completed =
        queries::count_bookings_with_status_since(conn, BookingStatus::Completed, since)?;
    let cancelled =
        queries::count_bookings_with_status_since(conn, BookingStatus::Cancelled, since)?;
    let revenue = queries::sum_revenue_since(conn, since)?;

    let cancellation_rate = if total > 0 {
        cancelled as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    let avg_booking_value = if total > 0 { revenue / total as f64 } else { 0.0 };

    Ok(BookingAnalytics {
        total_bookings: total,
        completed_bookings: completed,
        cancelled_bookings: cancelled,
        cancellation_rate,
        avg_booking_value,
        peak_hours: "2:00 PM - 6:00 PM", // placeholder
    })
}

fn revenue_report(conn: &Connection, since: i64) -> anyhow::Result<RevenueReport> {
    let total_revenue = queries::sum_revenue_since(conn, since)?;
    let total = queries::count_bookings_since(conn, since)?;
    let avg_revenue_per_booking = if total > 0 {
        total_revenue / total as f64
    } else {
        0.0
    };
    let most_profitable_studio = queries::most_profitable_studio(conn, since)?
        .unwrap_or_else(|| "N/A".to_string());

    Ok(RevenueReport {
        total_revenue,
        revenue_growth: 15.2, // placeholder
        avg_revenue_per_booking,
        most_profitable_studio,
        // 60/40 equipment-to-studio split heuristic
        equipment_revenue: total_revenue * 0.6,
    })
}

fn equipment_usage(conn: &Connection, now: DateTime<Utc>) -> anyhow::Result<EquipmentUsageReport> {
    let maintenance_required =
        queries::count_maintenance_due(conn, now.timestamp_millis() + MAINTENANCE_WINDOW_MS)?;

    // Utilization figures are placeholders; only the maintenance count is live
    Ok(EquipmentUsageReport {
        most_used_equipment: "Canon EOS R5",
        equipment_utilization: 72,
        maintenance_required,
        revenue_per_equipment: 1250,
        availability_rate: 85,
    })
}

fn client_activity(conn: &Connection) -> anyhow::Result<ClientActivityReport> {
    Ok(ClientActivityReport {
        total_clients: queries::count_clients(conn)?,
        active_clients: queries::count_active_clients(conn)?,
        new_clients: 5,            // placeholder
        repeat_client_rate: 65,    // placeholder
        avg_bookings_per_client: 2.3, // placeholder
    })
}

fn staff_performance() -> StaffPerformanceReport {
    // No staff activity is recorded anywhere; the whole report is canned
    StaffPerformanceReport {
        total_staff: 3,
        avg_bookings_processed: 12,
        response_time: "2.3 hours",
        client_satisfaction: 94,
        efficiency_rating: 88,
    }
}

fn start_of_month_ms(now: DateTime<Utc>) -> i64 {
    midnight_ms(now.date_naive().with_day(1).unwrap_or(now.date_naive()))
}

fn midnight_ms(date: chrono::NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}
