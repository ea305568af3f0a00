//! Shared utilities and common types for the Vital Monitor backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Common validation logic for sensor readings
//! - Rounding and time-bucketing helpers

pub mod numeric;
pub mod validation;
