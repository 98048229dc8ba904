use std::net::IpAddr;
use std::num::NonZeroU32;

use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};

/// Sliding-window request cap keyed by client address. Shared across requests
/// through `AppState`; this is the only cross-request state in the system.
pub struct ClientRateLimiter {
    per_client: RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>,
}

impl ClientRateLimiter {
    pub fn new(per_minute: u32) -> Self {
        let cells = NonZeroU32::new(per_minute.max(1)).unwrap_or(NonZeroU32::MIN);
        Self {
            per_client: RateLimiter::dashmap(Quota::per_minute(cells)),
        }
    }

    /// Spend one cell for `addr`. The error message carries a retry hint.
    pub fn check(&self, addr: IpAddr) -> Result<(), String> {
        match self.per_client.check_key(&addr) {
            Ok(_) => Ok(()),
            Err(negative) => {
                let wait = negative.wait_time_from(DefaultClock::default().now());
                Err(format!(
                    "rate limit exceeded, retry in {}s",
                    wait.as_secs().max(1)
                ))
            }
        }
    }
}
