//! Application Layer - Use Cases
//!
//! Orchestrates domain logic over a store implementation.

pub mod config;
pub mod mission_service;

pub use mission_service::MissionService;
