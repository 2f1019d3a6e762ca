//! Configuration types, read from environment variables at startup.

use std::time::Duration;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Port for the HTTP surface.
    pub port: u16,
    /// Base URL of the inventory/logistics lookup service.
    pub integrations_url: String,
    /// Per-request timeout for lookup calls.
    pub lookup_timeout: Duration,
    /// Consecutive unrecognized messages before escalating to a human.
    pub escalation_threshold: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            integrations_url: "http://integrations:8000".to_string(),
            lookup_timeout: Duration::from_secs(10),
            escalation_threshold: 2,
        }
    }
}

impl BotConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port: u16 = std::env::var("ORION_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let integrations_url = std::env::var("ORION_INTEGRATIONS_URL")
            .unwrap_or(defaults.integrations_url)
            .trim_end_matches('/')
            .to_string();

        let lookup_timeout = std::env::var("ORION_LOOKUP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.lookup_timeout);

        let escalation_threshold: u32 = std::env::var("ORION_ESCALATION_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.escalation_threshold);

        Self {
            port,
            integrations_url,
            lookup_timeout,
            escalation_threshold,
        }
    }
}

/// SMTP configuration for escalation alerts.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub to_address: String,
    pub subject_prefix: String,
}

impl MailConfig {
    /// Build config from environment variables.
    /// Returns `None` when `MAIL_USERNAME`/`MAIL_PASSWORD` are unset
    /// (escalation email disabled).
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("MAIL_USERNAME").ok()?;
        let password = std::env::var("MAIL_PASSWORD").ok()?;
        if username.is_empty() || password.is_empty() {
            return None;
        }

        let server = std::env::var("MAIL_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string());

        let port: u16 = std::env::var("MAIL_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);

        let from_address = std::env::var("MAIL_FROM").unwrap_or_else(|_| username.clone());
        let to_address = std::env::var("MAIL_TO").unwrap_or_else(|_| "soporte@ejemplo.com".to_string());
        let subject_prefix =
            std::env::var("MAIL_SUBJECT_PREFIX").unwrap_or_else(|_| "[ORION]".to_string());

        Some(Self {
            server,
            port,
            username,
            password,
            from_address,
            to_address,
            subject_prefix,
        })
    }
}
