pub const ZOOM_API_BASE_URL: &str = "https://api.zoom.us/v2";

/// Every outbound call is bounded by this timeout and made exactly once.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const USER_AGENT: &str = concat!("zoom-recordings-relay/", env!("CARGO_PKG_VERSION"));

/// In-flight cap for fan-out recording fetches.
pub const MAX_CONCURRENT_FETCHES: usize = 4;
