//! Employee records and the positional store that owns them.
//!
//! # Modules
//!
//! - [`employee`] — `Employee` and the startup roster
//! - [`store`] — `EmployeeStore`, the list/get/create/replace/delete engine
//! - [`error`] — `StoreError`

pub mod employee;
pub mod error;
pub mod store;

pub use employee::{seed_employees, Employee};
pub use error::StoreError;
pub use store::{Created, Deleted, DuplicatePolicy, EmployeeStore, Replaced};
