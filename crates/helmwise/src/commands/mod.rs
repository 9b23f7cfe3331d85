//! Command implementations for the helmwise CLI
//!
//! Each command module handles the CLI interface and delegates to the
//! library crates for actual implementation.

pub mod apply;
pub mod context;
