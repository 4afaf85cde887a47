//! Common test utilities and fixtures for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: quotes app runners and config files
//! - `logger`: per-test phase logging

pub mod fixtures;
pub mod logger;
