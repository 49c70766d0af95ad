//! Mission Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Mission and Profile entities, store contract, profile aggregation
//! - `application/` - Mission service and its configuration
//! - `infra/` - In-memory and PostgreSQL stores
//! - `presentation/` - HTTP handlers, DTOs and router
//!
//! ## Store Model
//! - Ids are assigned by the store, strictly increasing and never reused
//! - `list` returns a snapshot; callers may mutate it freely
//! - Update and Delete of a missing id fail with NotFound in every backend
//! - Reads of the full list are bounded by a deadline (504 when exceeded)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::MissionService;
pub use application::config::MissionConfig;
pub use domain::repository::MissionRepository;
pub use error::{MissionError, MissionResult};
pub use infra::memory::InMemoryMissionRepository;
pub use infra::postgres::PgMissionRepository;
pub use presentation::router::mission_router;
