use serde::{Deserialize, Serialize};

/// A principal mirrored from the external identity provider. The
/// client-stat fields (`total_bookings` onward) are denormalized copies
/// kept on the document; nothing recomputes them on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub role: UserRole,
    pub created_at: i64,
    pub is_active: bool,
    pub total_bookings: i64,
    pub total_spent: f64,
    pub last_booking_date: i64,
    pub average_rating: f64,
}

impl User {
    pub fn is_vip(&self) -> bool {
        self.total_bookings > 10
    }

    pub fn client_tier(&self) -> ClientTier {
        match self.total_bookings {
            n if n >= 20 => ClientTier::Platinum,
            n if n >= 10 => ClientTier::Gold,
            n if n >= 5 => ClientTier::Silver,
            _ => ClientTier::Bronze,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Client,
    Staff,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Client => "CLIENT",
            UserRole::Staff => "STAFF",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "STAFF" => UserRole::Staff,
            "ADMIN" => UserRole::Admin,
            _ => UserRole::Client,
        }
    }

    /// Which dashboard composition a principal of this role lands on.
    pub fn dashboard(&self) -> Dashboard {
        match self {
            UserRole::Client => Dashboard::Client,
            UserRole::Staff => Dashboard::Staff,
            UserRole::Admin => Dashboard::Admin,
        }
    }

    /// The action set exposed to this role. Staff see everything a client
    /// sees plus operations; admins additionally manage users and config.
    pub fn allowed_actions(&self) -> &'static [&'static str] {
        const CLIENT: &[&str] = &[
            "create_booking",
            "view_own_bookings",
            "make_payment",
            "edit_profile",
        ];
        const STAFF: &[&str] = &[
            "create_booking",
            "view_own_bookings",
            "make_payment",
            "edit_profile",
            "view_all_bookings",
            "update_booking_status",
            "view_equipment_status",
            "view_clients",
        ];
        const ADMIN: &[&str] = &[
            "create_booking",
            "view_own_bookings",
            "make_payment",
            "edit_profile",
            "view_all_bookings",
            "update_booking_status",
            "view_equipment_status",
            "view_clients",
            "manage_users",
            "manage_equipment",
            "view_reports",
            "edit_system_config",
        ];
        match self {
            UserRole::Client => CLIENT,
            UserRole::Staff => STAFF,
            UserRole::Admin => ADMIN,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Dashboard {
    Client,
    Staff,
    Admin,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClientTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}
