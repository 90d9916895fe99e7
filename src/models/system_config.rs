use serde::{Deserialize, Serialize};

/// The single `system_config/main` document. Most switches are
/// informational for the dashboards; `allow_new_registrations` is the one
/// the service enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub studio_a_enabled: bool,
    pub studio_b_enabled: bool,
    pub studio_c_enabled: bool,
    pub studio_d_enabled: bool,
    pub operating_hours: String,

    pub max_booking_hours: i64,
    pub advance_booking_days: i64,
    pub auto_confirm_bookings: bool,
    pub require_staff_approval: bool,

    pub payment_required: bool,
    pub security_deposit: f64,
    pub accept_cards: bool,
    pub accept_bank_transfer: bool,
    pub accept_cash: bool,

    pub email_notifications: bool,
    pub sms_alerts: bool,
    pub maintenance_alerts: bool,
    pub booking_reminders: bool,

    pub maintenance_mode: bool,
    pub allow_new_registrations: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            studio_a_enabled: true,
            studio_b_enabled: true,
            studio_c_enabled: true,
            studio_d_enabled: true,
            operating_hours: "9:00 AM - 10:00 PM".to_string(),

            max_booking_hours: 8,
            advance_booking_days: 30,
            auto_confirm_bookings: false,
            require_staff_approval: true,

            payment_required: true,
            security_deposit: 100.0,
            accept_cards: true,
            accept_bank_transfer: true,
            accept_cash: true,

            email_notifications: true,
            sms_alerts: false,
            maintenance_alerts: true,
            booking_reminders: true,

            maintenance_mode: false,
            allow_new_registrations: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SystemConfig::default();
        assert!(config.studio_a_enabled);
        assert_eq!(config.max_booking_hours, 8);
        assert_eq!(config.advance_booking_days, 30);
        assert_eq!(config.security_deposit, 100.0);
        assert!(config.allow_new_registrations);
        assert!(!config.maintenance_mode);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: SystemConfig =
            serde_json::from_str(r#"{"allow_new_registrations":false}"#).unwrap();
        assert!(!config.allow_new_registrations);
        assert_eq!(config.operating_hours, "9:00 AM - 10:00 PM");
    }
}
