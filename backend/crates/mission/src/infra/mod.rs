//! Infrastructure Layer
//!
//! Store implementations: in-memory and PostgreSQL.

pub mod memory;
pub mod postgres;
