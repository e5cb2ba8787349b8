use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    middleware::NoOpMiddleware,
    state::keyed::DashMapStateStore,
};
use std::{num::NonZeroU32, time::Duration};
use uuid::Uuid;

/// Per-author write quota, shared process-wide. GCRA with burst equal to the
/// full quota, so an author gets `max` immediate writes and then one more as
/// each `window / max` slice elapses.
///
/// Generic over the governor clock so tests can drive time by hand.
pub struct PostRateLimiter<C: Clock = DefaultClock> {
    limiter: RateLimiter<Uuid, DashMapStateStore<Uuid>, C, NoOpMiddleware<C::Instant>>,
}

impl PostRateLimiter<DefaultClock> {
    pub fn new(max: NonZeroU32, window: Duration) -> Self {
        Self::with_clock(max, window, &DefaultClock::default())
    }
}

impl<C: Clock + Clone> PostRateLimiter<C> {
    pub fn with_clock(max: NonZeroU32, window: Duration, clock: &C) -> Self {
        let quota = Quota::with_period(window / max.get())
            .expect("rate limit window must be non-zero")
            .allow_burst(max);
        Self {
            limiter: RateLimiter::new(quota, DashMapStateStore::default(), clock.clone()),
        }
    }

    /// Allow/deny decision for one write attempt. An allowed call consumes
    /// one quota cell; a denied call consumes nothing.
    pub fn check(&self, author_id: Uuid) -> bool {
        self.limiter.check_key(&author_id).is_ok()
    }
}
