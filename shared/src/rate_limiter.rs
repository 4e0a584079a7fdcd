use governor::clock::DefaultClock;
use governor::state::keyed::DashMapStateStore;
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Per-client request limiter. Each client address gets its own GCRA cell,
/// allowing `max_requests` in a burst and replenishing one slot every
/// `window / max_requests`.
#[derive(Clone)]
pub struct ClientRateLimiter {
    limiter: Arc<GovernorRateLimiter<String, DashMapStateStore<String>, DefaultClock>>,
    max_requests: u32,
    window: Duration,
}

impl ClientRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let burst = NonZeroU32::new(max_requests).expect(
            format!(
                "Invalid max_requests for ClientRateLimiter: {}",
                max_requests
            )
            .as_str(),
        );
        let quota = Quota::with_period(window / max_requests)
            .expect("Invalid window for ClientRateLimiter")
            .allow_burst(burst);
        let limiter = Arc::new(GovernorRateLimiter::keyed(quota));

        debug!(
            "Creating client rate limiter: {} requests per {:?} per client",
            max_requests, window
        );
        Self {
            limiter,
            max_requests,
            window,
        }
    }

    /// Returns false once the client has exhausted its quota for the window.
    pub fn try_acquire(&self, client: &str) -> bool {
        self.limiter.check_key(&client.to_string()).is_ok()
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
