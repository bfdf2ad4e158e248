use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Shared limiter for calls to the hosted route service.
pub fn route_limiter(per_minute: NonZeroU32) -> Limiter {
    let quota = Quota::per_minute(per_minute);
    Arc::new(RateLimiter::direct(quota))
}
