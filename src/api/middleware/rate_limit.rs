//! Per-IP rate limiting using the token bucket from `tower_governor`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Rate limiter layer type shared by both limiters.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for redirects.
///
/// # Limits
///
/// - **Rate**: one token every 50 ms (20 requests per second)
/// - **Burst**: 200 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Limits apply per client IP taken from the socket peer address, so the
/// server must be started with connect info.
pub fn layer() -> RateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(50)
            .burst_size(200)
            .finish()
            .expect("redirect rate limit config is valid"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a stricter rate limiter for the management API.
///
/// # Limits
///
/// - **Rate**: one token per second
/// - **Burst**: 30 requests
pub fn secure_layer() -> RateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(1)
            .burst_size(30)
            .finish()
            .expect("api rate limit config is valid"),
    );

    GovernorLayer::new(governor_conf)
}
