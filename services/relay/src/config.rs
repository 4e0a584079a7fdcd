use std::env;
use std::time::Duration;

/// Which orchestration shape `/webhook` uses. Single-user is the default:
/// it matches the validated schema's `user_id` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// One recordings call for the validated `user_id`.
    Single,
    /// List every user under the token, then fetch recordings per user.
    FanOut,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub zoom_api_url: String,
    pub fetch_mode: FetchMode,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
    pub development: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("RELAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid port number"),
            zoom_api_url: env::var("ZOOM_API_URL")
                .unwrap_or_else(|_| zoom_connector::config::ZOOM_API_BASE_URL.to_string()),
            fetch_mode: match env::var("FETCH_MODE").as_deref() {
                Ok("fan_out") => FetchMode::FanOut,
                _ => FetchMode::Single,
            },
            rate_limit_max_requests: env::var("RATE_LIMIT_MAX_REQUESTS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("RATE_LIMIT_MAX_REQUESTS must be a number"),
            rate_limit_window: Duration::from_secs(
                env::var("RATE_LIMIT_WINDOW_SECS")
                    .unwrap_or_else(|_| "900".to_string())
                    .parse()
                    .expect("RATE_LIMIT_WINDOW_SECS must be a number"),
            ),
            development: env::var("APP_ENV")
                .map(|v| v == "development")
                .unwrap_or(false),
        }
    }
}
