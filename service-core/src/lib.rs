//! service-core: Shared infrastructure for the analyzer workspace.
pub mod config;
pub mod error;
pub mod observability;
