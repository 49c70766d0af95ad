//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Mission, Profile)
//! - Domain value objects (MissionDraft, Level, Achievement)
//! - Domain services (profile aggregation)
//! - Repository traits (the store contract)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
