use rusqlite::{params, Connection};

use crate::models::{
    Booking, BookingStatus, Equipment, Payment, PaymentMethod, PaymentStatus, Studio, SystemConfig,
    User, UserRole, UserSettings,
};

// ── Bookings ──

pub fn insert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let equipment_json = serde_json::to_string(&booking.equipment)?;

    conn.execute(
        "INSERT INTO bookings (id, client_id, client_name, studio, equipment, date, start_time, end_time, total_hours, total_amount, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            booking.id,
            booking.client_id,
            booking.client_name,
            booking.studio.as_str(),
            equipment_json,
            booking.date,
            booking.start_time,
            booking.end_time,
            booking.total_hours,
            booking.total_amount,
            booking.status.as_str(),
            booking.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_booking(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, client_id, client_name, studio, equipment, date, start_time, end_time, total_hours, total_amount, status, created_at
         FROM bookings WHERE id = ?1",
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_all_bookings(
    conn: &Connection,
    status_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<Vec<Booking>> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match status_filter {
        Some(status) => (
            "SELECT id, client_id, client_name, studio, equipment, date, start_time, end_time, total_hours, total_amount, status, created_at \
             FROM bookings WHERE status = ?1 ORDER BY date DESC LIMIT ?2"
                .to_string(),
            vec![
                Box::new(status.to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(limit),
            ],
        ),
        None => (
            "SELECT id, client_id, client_name, studio, equipment, date, start_time, end_time, total_hours, total_amount, status, created_at \
             FROM bookings ORDER BY date DESC LIMIT ?1"
                .to_string(),
            vec![Box::new(limit) as Box<dyn rusqlite::types::ToSql>],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_bookings_by_client(conn: &Connection, client_id: &str) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, client_id, client_name, studio, equipment, date, start_time, end_time, total_hours, total_amount, status, created_at
         FROM bookings WHERE client_id = ?1 ORDER BY date DESC",
    )?;

    let rows = stmt.query_map(params![client_id], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Non-cancelled bookings for one studio within a day window, used for
/// slot-conflict checks.
pub fn get_studio_bookings_for_day(
    conn: &Connection,
    studio: &str,
    day_start: i64,
    day_end: i64,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, client_id, client_name, studio, equipment, date, start_time, end_time, total_hours, total_amount, status, created_at
         FROM bookings WHERE studio = ?1 AND date >= ?2 AND date < ?3 AND status != 'CANCELLED'",
    )?;

    let rows = stmt.query_map(params![studio, day_start, day_end], |row| {
        Ok(parse_booking_row(row))
    })?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let client_id: String = row.get(1)?;
    let client_name: String = row.get(2)?;
    let studio_str: String = row.get(3)?;
    let equipment_json: String = row.get(4)?;
    let date: i64 = row.get(5)?;
    let start_time: String = row.get(6)?;
    let end_time: String = row.get(7)?;
    let total_hours: i64 = row.get(8)?;
    let total_amount: f64 = row.get(9)?;
    let status_str: String = row.get(10)?;
    let created_at: i64 = row.get(11)?;

    let equipment: Vec<Equipment> = serde_json::from_str(&equipment_json).unwrap_or_default();

    Ok(Booking {
        id,
        client_id,
        client_name,
        studio: Studio::parse(&studio_str),
        equipment,
        date,
        start_time,
        end_time,
        total_hours,
        total_amount,
        status: BookingStatus::parse(&status_str),
        created_at,
    })
}

// ── Booking stats ──

pub fn sum_revenue_since(conn: &Connection, since: i64) -> anyhow::Result<f64> {
    let total: f64 = conn.query_row(
        "SELECT COALESCE(SUM(total_amount), 0) FROM bookings WHERE date >= ?1",
        params![since],
        |row| row.get(0),
    )?;
    Ok(total)
}

pub fn count_bookings(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))?;
    Ok(count)
}

pub fn count_bookings_since(conn: &Connection, since: i64) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE date >= ?1",
        params![since],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn count_bookings_with_status(conn: &Connection, status: BookingStatus) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE status = ?1",
        params![status.as_str()],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn count_bookings_with_status_since(
    conn: &Connection,
    status: BookingStatus,
    since: i64,
) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE status = ?1 AND date >= ?2",
        params![status.as_str(), since],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn most_profitable_studio(conn: &Connection, since: i64) -> anyhow::Result<Option<String>> {
    let result = conn.query_row(
        "SELECT studio FROM bookings WHERE date >= ?1
         GROUP BY studio ORDER BY SUM(total_amount) DESC LIMIT 1",
        params![since],
        |row| row.get::<_, String>(0),
    );

    match result {
        Ok(studio) => Ok(Some(studio)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Equipment ──

pub fn insert_equipment(conn: &Connection, item: &Equipment) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO equipment (id, name, category, description, price_per_hour, is_available, maintenance_due)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            item.id,
            item.name,
            item.category,
            item.description,
            item.price_per_hour,
            item.is_available as i32,
            item.maintenance_due,
        ],
    )?;
    Ok(())
}

pub fn get_equipment(conn: &Connection, id: &str) -> anyhow::Result<Option<Equipment>> {
    let result = conn.query_row(
        "SELECT id, name, category, description, price_per_hour, is_available, maintenance_due
         FROM equipment WHERE id = ?1",
        params![id],
        |row| Ok(parse_equipment_row(row)),
    );

    match result {
        Ok(item) => Ok(Some(item?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_all_equipment(conn: &Connection) -> anyhow::Result<Vec<Equipment>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, category, description, price_per_hour, is_available, maintenance_due
         FROM equipment ORDER BY name ASC",
    )?;

    let rows = stmt.query_map([], |row| Ok(parse_equipment_row(row)))?;

    let mut items = vec![];
    for row in rows {
        items.push(row??);
    }
    Ok(items)
}

pub fn set_equipment_availability(
    conn: &Connection,
    id: &str,
    is_available: bool,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE equipment SET is_available = ?1 WHERE id = ?2",
        params![is_available as i32, id],
    )?;
    Ok(count > 0)
}

pub fn get_maintenance_due(conn: &Connection, before: i64) -> anyhow::Result<Vec<Equipment>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, category, description, price_per_hour, is_available, maintenance_due
         FROM equipment WHERE maintenance_due > 0 AND maintenance_due <= ?1
         ORDER BY maintenance_due ASC",
    )?;

    let rows = stmt.query_map(params![before], |row| Ok(parse_equipment_row(row)))?;

    let mut items = vec![];
    for row in rows {
        items.push(row??);
    }
    Ok(items)
}

pub fn count_maintenance_due(conn: &Connection, before: i64) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM equipment WHERE maintenance_due > 0 AND maintenance_due <= ?1",
        params![before],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn count_available_equipment(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM equipment WHERE is_available = 1",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn parse_equipment_row(row: &rusqlite::Row) -> anyhow::Result<Equipment> {
    Ok(Equipment {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        description: row.get(3)?,
        price_per_hour: row.get(4)?,
        is_available: row.get::<_, i32>(5)? != 0,
        maintenance_due: row.get(6)?,
    })
}

// ── Users ──

pub fn insert_user(conn: &Connection, user: &User) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO users (id, email, full_name, phone, role, created_at, is_active, total_bookings, total_spent, last_booking_date, average_rating)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            user.id,
            user.email,
            user.full_name,
            user.phone,
            user.role.as_str(),
            user.created_at,
            user.is_active as i32,
            user.total_bookings,
            user.total_spent,
            user.last_booking_date,
            user.average_rating,
        ],
    )?;
    Ok(())
}

pub fn get_user(conn: &Connection, id: &str) -> anyhow::Result<Option<User>> {
    let result = conn.query_row(
        "SELECT id, email, full_name, phone, role, created_at, is_active, total_bookings, total_spent, last_booking_date, average_rating
         FROM users WHERE id = ?1",
        params![id],
        |row| Ok(parse_user_row(row)),
    );

    match result {
        Ok(user) => Ok(Some(user?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn email_exists(conn: &Connection, email: &str) -> anyhow::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE email = ?1 COLLATE NOCASE",
        params![email],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn get_users(conn: &Connection, search: Option<&str>) -> anyhow::Result<Vec<User>> {
    list_users(conn, None, search)
}

pub fn get_clients(conn: &Connection, search: Option<&str>) -> anyhow::Result<Vec<User>> {
    list_users(conn, Some(UserRole::Client), search)
}

fn list_users(
    conn: &Connection,
    role: Option<UserRole>,
    search: Option<&str>,
) -> anyhow::Result<Vec<User>> {
    let mut sql = String::from(
        "SELECT id, email, full_name, phone, role, created_at, is_active, total_bookings, total_spent, last_booking_date, average_rating
         FROM users WHERE 1=1",
    );
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = vec![];

    if let Some(role) = role {
        params_vec.push(Box::new(role.as_str().to_string()));
        sql.push_str(&format!(" AND role = ?{}", params_vec.len()));
    }
    if let Some(q) = search {
        let pattern = format!("%{q}%");
        params_vec.push(Box::new(pattern));
        let idx = params_vec.len();
        sql.push_str(&format!(
            " AND (full_name LIKE ?{idx} OR email LIKE ?{idx} OR phone LIKE ?{idx})"
        ));
    }
    sql.push_str(" ORDER BY full_name ASC");

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| Ok(parse_user_row(row)))?;

    let mut users = vec![];
    for row in rows {
        users.push(row??);
    }
    Ok(users)
}

pub fn update_user_role(conn: &Connection, id: &str, role: UserRole) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE users SET role = ?1 WHERE id = ?2",
        params![role.as_str(), id],
    )?;
    Ok(count > 0)
}

pub fn update_user_active(conn: &Connection, id: &str, is_active: bool) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE users SET is_active = ?1 WHERE id = ?2",
        params![is_active as i32, id],
    )?;
    Ok(count > 0)
}

pub fn count_users(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    Ok(count)
}

pub fn count_active_clients(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE role = 'CLIENT' AND is_active = 1",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn count_clients(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE role = 'CLIENT'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn parse_user_row(row: &rusqlite::Row) -> anyhow::Result<User> {
    let role_str: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        full_name: row.get(2)?,
        phone: row.get(3)?,
        role: UserRole::parse(&role_str),
        created_at: row.get(5)?,
        is_active: row.get::<_, i32>(6)? != 0,
        total_bookings: row.get(7)?,
        total_spent: row.get(8)?,
        last_booking_date: row.get(9)?,
        average_rating: row.get(10)?,
    })
}

// ── Payments ──

pub fn insert_payment(conn: &Connection, payment: &Payment) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO payments (id, booking_id, client_id, client_name, amount, payment_method, status, transaction_id, created_at, processed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            payment.id,
            payment.booking_id,
            payment.client_id,
            payment.client_name,
            payment.amount,
            payment.payment_method.as_str(),
            payment.status.as_str(),
            payment.transaction_id,
            payment.created_at,
            payment.processed_at,
        ],
    )?;
    Ok(())
}

pub fn mark_payment_resolved(
    conn: &Connection,
    id: &str,
    status: PaymentStatus,
    processed_at: i64,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE payments SET status = ?1, processed_at = ?2 WHERE id = ?3",
        params![status.as_str(), processed_at, id],
    )?;
    Ok(count > 0)
}

pub fn get_payment(conn: &Connection, id: &str) -> anyhow::Result<Option<Payment>> {
    let result = conn.query_row(
        "SELECT id, booking_id, client_id, client_name, amount, payment_method, status, transaction_id, created_at, processed_at
         FROM payments WHERE id = ?1",
        params![id],
        |row| Ok(parse_payment_row(row)),
    );

    match result {
        Ok(payment) => Ok(Some(payment?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_all_payments(conn: &Connection, limit: i64) -> anyhow::Result<Vec<Payment>> {
    let mut stmt = conn.prepare(
        "SELECT id, booking_id, client_id, client_name, amount, payment_method, status, transaction_id, created_at, processed_at
         FROM payments ORDER BY created_at DESC LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], |row| Ok(parse_payment_row(row)))?;

    let mut payments = vec![];
    for row in rows {
        payments.push(row??);
    }
    Ok(payments)
}

pub fn get_payments_by_client(conn: &Connection, client_id: &str) -> anyhow::Result<Vec<Payment>> {
    let mut stmt = conn.prepare(
        "SELECT id, booking_id, client_id, client_name, amount, payment_method, status, transaction_id, created_at, processed_at
         FROM payments WHERE client_id = ?1 ORDER BY created_at DESC",
    )?;

    let rows = stmt.query_map(params![client_id], |row| Ok(parse_payment_row(row)))?;

    let mut payments = vec![];
    for row in rows {
        payments.push(row??);
    }
    Ok(payments)
}

fn parse_payment_row(row: &rusqlite::Row) -> anyhow::Result<Payment> {
    let method_str: String = row.get(5)?;
    let status_str: String = row.get(6)?;
    Ok(Payment {
        id: row.get(0)?,
        booking_id: row.get(1)?,
        client_id: row.get(2)?,
        client_name: row.get(3)?,
        amount: row.get(4)?,
        payment_method: PaymentMethod::parse(&method_str),
        status: PaymentStatus::parse(&status_str),
        transaction_id: row.get(7)?,
        created_at: row.get(8)?,
        processed_at: row.get(9)?,
    })
}

// ── User settings ──

pub fn get_user_settings(conn: &Connection, user_id: &str) -> anyhow::Result<Option<UserSettings>> {
    let result = conn.query_row(
        "SELECT data FROM user_settings WHERE user_id = ?1",
        params![user_id],
        |row| row.get::<_, String>(0),
    );

    match result {
        Ok(json) => Ok(Some(serde_json::from_str(&json).unwrap_or_default())),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save_user_settings(
    conn: &Connection,
    user_id: &str,
    settings: &UserSettings,
) -> anyhow::Result<()> {
    let json = serde_json::to_string(settings)?;
    conn.execute(
        "INSERT INTO user_settings (user_id, data) VALUES (?1, ?2)
         ON CONFLICT(user_id) DO UPDATE SET data = excluded.data",
        params![user_id, json],
    )?;
    Ok(())
}

// ── System config ──

pub fn get_system_config(conn: &Connection) -> anyhow::Result<Option<SystemConfig>> {
    let result = conn.query_row(
        "SELECT data FROM system_config WHERE id = 'main'",
        [],
        |row| row.get::<_, String>(0),
    );

    match result {
        Ok(json) => Ok(Some(serde_json::from_str(&json).unwrap_or_default())),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save_system_config(conn: &Connection, config: &SystemConfig) -> anyhow::Result<()> {
    let json = serde_json::to_string(config)?;
    conn.execute(
        "INSERT INTO system_config (id, data) VALUES ('main', ?1)
         ON CONFLICT(id) DO UPDATE SET data = excluded.data",
        params![json],
    )?;
    Ok(())
}
