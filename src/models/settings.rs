use serde::{Deserialize, Serialize};

/// Per-user preferences document, stored whole under the user's id.
/// Unknown users read back the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub push_notifications: bool,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub dark_mode: bool,
    pub biometric_login: bool,
    pub language: String,
    pub auto_sync: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            push_notifications: true,
            email_notifications: true,
            sms_notifications: false,
            dark_mode: false,
            biometric_login: false,
            language: "en-US".to_string(),
            auto_sync: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = UserSettings::default();
        assert!(settings.push_notifications);
        assert!(settings.email_notifications);
        assert!(!settings.sms_notifications);
        assert!(!settings.dark_mode);
        assert_eq!(settings.language, "en-US");
        assert!(settings.auto_sync);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"dark_mode":true}"#).unwrap();
        assert!(settings.dark_mode);
        assert!(settings.push_notifications);
        assert_eq!(settings.language, "en-US");
    }
}
