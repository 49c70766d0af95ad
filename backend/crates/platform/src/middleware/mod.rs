//! Cross-cutting pipeline stages
//!
//! Conventional order, outermost first: CORS, Recovery, Logging, then the
//! rate limiter from [`crate::rate_limit`].

pub mod cors;
pub mod logging;
pub mod recovery;

pub use cors::{CorsConfig, CorsStage};
pub use logging::LoggingStage;
pub use recovery::RecoveryStage;
