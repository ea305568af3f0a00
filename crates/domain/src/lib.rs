//! Domain layer for Vital Monitor.
//!
//! This crate contains:
//! - Domain models (Patient, sensor readings, stream messages)
//! - Sensor simulators and history aggregation
//! - Heart rate assessment and dashboard client state

pub mod models;
pub mod services;
