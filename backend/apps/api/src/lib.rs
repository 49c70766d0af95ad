//! API application library
//!
//! Configuration and router assembly, kept out of `main` so integration
//! tests can build the same application the binary serves.

pub mod app;
pub mod config;

