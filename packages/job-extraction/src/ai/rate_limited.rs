//! Rate-limited generator wrapper.
//!
//! Wraps any TextGenerator with rate limiting using the governor crate, so
//! model calls respect the provider's requests-per-second ceiling.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ProviderResult;
use crate::traits::generator::TextGenerator;

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A generator wrapper that enforces a token-bucket rate limit.
pub struct RateLimitedGenerator<G: TextGenerator> {
    inner: G,
    limiter: Arc<DefaultRateLimiter>,
}

impl<G: TextGenerator> RateLimitedGenerator<G> {
    /// Allow one call per `interval`, with no burst.
    ///
    /// A zero interval disables limiting.
    pub fn new(generator: G, interval: Duration) -> Self {
        let quota = Quota::with_period(interval)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MAX));
        Self::with_quota(generator, quota)
    }

    /// Create with a custom quota.
    pub fn with_quota(generator: G, quota: Quota) -> Self {
        Self {
            inner: generator,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Sustained requests per second with a burst allowance.
    pub fn per_second(generator: G, requests_per_second: NonZeroU32, burst: NonZeroU32) -> Self {
        Self::with_quota(
            generator,
            Quota::per_second(requests_per_second).allow_burst(burst),
        )
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for RateLimitedGenerator<G> {
    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        self.limiter.until_ready().await;
        self.inner.generate(prompt).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Extension trait for easy rate limiting.
pub trait GeneratorExt: TextGenerator + Sized {
    /// Wrap this generator so calls are at least `interval` apart.
    fn rate_limited(self, interval: Duration) -> RateLimitedGenerator<Self> {
        RateLimitedGenerator::new(self, interval)
    }
}

impl<G: TextGenerator + Sized> GeneratorExt for G {}
