//! Business services for the analyzer.

pub mod extract;
pub mod providers;
