//! Artificial network latency for the mock auth provider.
//!
//! Browser builds wait on a `gloo-timers` future; server renders and native
//! tests complete immediately.

#![allow(clippy::unused_async)]

use std::time::Duration;

/// Delay applied to login and registration before they resolve.
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(1000);

/// Wait for `delay` on the browser event loop.
pub async fn simulate(delay: Duration) {
    #[cfg(feature = "hydrate")]
    {
        if !delay.is_zero() {
            gloo_timers::future::sleep(delay).await;
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = delay;
    }
}
