//! CLI command implementations.

pub mod segment;
