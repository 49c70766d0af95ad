//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client identification
//! - The middleware pipeline and its `Stage` contract
//! - CORS, fault recovery and access logging stages
//! - Fixed-window rate limiting

pub mod client;
pub mod middleware;
pub mod pipeline;
pub mod rate_limit;

#[cfg(test)]
mod test_support;
