//! Test utilities shared across the ghrest workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary home directories holding a `.netrc` ([`NetrcGuard`])
//! - Temporary configuration directories ([`ConfigDirGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod netrc;

// Re-export commonly used items
pub use config::ConfigDirGuard;
pub use netrc::NetrcGuard;
