//! Application Assembly
//!
//! Wraps the mission routes in the middleware pipeline. Order, outermost
//! first: CORS, Recovery, Logging, RateLimiter.
//!
//! - CORS headers land on every response, including 429s and recovered 500s
//! - A fault in Logging, the limiter or a handler is caught by Recovery
//! - Rejected requests still produce an access-log line
//! - Preflight requests are answered by CORS and never counted

use axum::Router;
use platform::middleware::{CorsConfig, CorsStage, LoggingStage, RecoveryStage};
use platform::pipeline::Pipeline;
use platform::rate_limit::{FixedWindowRateLimiter, RateLimitStage};
use std::sync::Arc;

pub fn build_pipeline(cors: CorsConfig, limiter: Arc<FixedWindowRateLimiter>) -> Pipeline {
    Pipeline::new()
        .stage(CorsStage::new(cors))
        .stage(RecoveryStage::new())
        .stage(LoggingStage::new())
        .stage(RateLimitStage::new(limiter))
}

/// Final application router
pub fn build_app(routes: Router, cors: CorsConfig, limiter: Arc<FixedWindowRateLimiter>) -> Router {
    build_pipeline(cors, limiter).wrap(routes)
}
