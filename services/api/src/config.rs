use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;

use ritmofit_core::config::Config;

use crate::domain::types::REMINDER_WINDOW_SECS;

/// API service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// MySQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server. Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Access-token lifetime in seconds.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// Offset of the gym's wall clock from UTC. Class dates and times are stored in it.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    /// Period of the class-reminder sweep. Defaults to the reminder window width.
    #[serde(default = "default_reminder_interval_secs")]
    pub reminder_interval_secs: u64,
    /// Expo-compatible push endpoint.
    #[serde(default = "default_push_api_url")]
    pub push_api_url: String,
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    #[serde(default = "default_smtp_from")]
    pub smtp_from: String,
    /// Allowed CORS origin. Any origin when unset.
    pub cors_origin: Option<String>,
}

impl Config for ApiConfig {}

impl ApiConfig {
    /// Gym wall-clock offset. Out-of-range values fall back to UTC.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours.saturating_mul(3600))
            .unwrap_or_else(|| Utc.fix())
    }
}

fn default_api_port() -> u16 {
    3000
}

fn default_token_ttl_secs() -> u64 {
    7 * 24 * 3600
}

fn default_utc_offset_hours() -> i32 {
    -3
}

fn default_reminder_interval_secs() -> u64 {
    REMINDER_WINDOW_SECS
}

fn default_push_api_url() -> String {
    "https://exp.host/--/api/v2/push/send".to_owned()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_from() -> String {
    "RitmoFit <no-reply@ritmofit.app>".to_owned()
}
