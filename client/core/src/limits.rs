//! Token bucket limiting outbound requests from one client.
use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::Result;
use governor::DefaultDirectRateLimiter;
use governor::Quota;
use governor::RateLimiter;

use crate::errors::WaitCancelled;

/// Sustained rate of outbound requests allowed per client.
const RATE_PER_SECOND: NonZeroU32 = match NonZeroU32::new(10) {
    Some(rate) => rate,
    None => panic!("sustained rate must be non-zero"),
};

/// Requests that may be dispatched back to back before waiting.
const BURST: NonZeroU32 = match NonZeroU32::new(3) {
    Some(burst) => burst,
    None => panic!("burst must be non-zero"),
};

/// Token bucket shared by every outbound call issued by one client.
///
/// Exhaustion is backpressure, not an error: acquiring suspends the calling
/// operation until a slot is available.  Only a wait cut short by the caller
/// deadline produces an error, and no request is dispatched in that case.
pub(crate) struct RequestLimits {
    bucket: DefaultDirectRateLimiter,
}

impl RequestLimits {
    pub fn new() -> RequestLimits {
        let quota = Quota::per_second(RATE_PER_SECOND).allow_burst(BURST);
        RequestLimits {
            bucket: RateLimiter::direct(quota),
        }
    }

    /// Wait for a dispatch slot, giving up once the deadline expires.
    pub async fn acquire(&self, deadline: Option<Duration>) -> Result<()> {
        match deadline {
            None => {
                self.bucket.until_ready().await;
                Ok(())
            }
            Some(deadline) => tokio::time::timeout(deadline, self.bucket.until_ready())
                .await
                .map_err(|_| WaitCancelled.into()),
        }
    }
}
