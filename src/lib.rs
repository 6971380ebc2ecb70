//! # Employee Roster
//!
//! An in-memory employee roster served over HTTP. Employees are addressed by
//! their 1-based position in the roster. A companion endpoint summarizes
//! database change-feed batches by operation kind.

pub mod changes;
pub mod config;
pub mod employees;
pub mod server;

pub use changes::{summarize, ChangeOperation, ChangeSummary, EmployeeChange, Tally};
pub use config::{ConfigError, ServiceConfig};
pub use employees::{DuplicatePolicy, Employee, EmployeeStore, StoreError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
