//! Persistence layer for Vital Monitor.
//!
//! This crate contains:
//! - The `VitalsStore` abstraction and its error type
//! - An in-memory store for development and tests
//! - A PostgreSQL store built from entities and repositories
//! - Database connection management and query metrics

pub mod db;
pub mod entities;
pub mod memory;
pub mod metrics;
pub mod pg;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use pg::PgStore;
pub use store::{StoreError, StoreResult, VitalsStore};
