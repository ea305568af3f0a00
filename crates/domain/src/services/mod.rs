//! Domain services for Vital Monitor.
//!
//! Pure logic over the domain models: sensor simulation, history
//! aggregation, age-adjusted assessment and the dashboard client state.

pub mod dashboard;
pub mod history;
pub mod sensors;
pub mod vitals;

pub use dashboard::{ChartPoint, ConnectionState, DashboardState};
pub use history::{aggregate_by_minute, summarize};
pub use vitals::{assess, check_alert, patient_vitals, zones};
