//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Settings for outbound notification mail.
///
/// Delivery itself is handled by an external relay; these settings only
/// shape the messages Trackify hands to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether outbound mail is enabled at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// From address used on all messages.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Login page URL included in credential and reset mails.
    #[serde(default = "default_login_url")]
    pub login_url: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            from_address: default_from(),
            login_url: default_login_url(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_from() -> String {
    "no-reply@trackify.local".to_string()
}

fn default_login_url() -> String {
    "http://localhost:5173/login".to_string()
}
