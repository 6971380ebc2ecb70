//! Employee store errors.

use thiserror::Error;

/// Errors returned by [`EmployeeStore`](super::EmployeeStore) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The position lies outside `1..=size`.
    ///
    /// `size` is the collection size at the time of the failed call, so the
    /// message always reports the range that is valid right now.
    #[error("No employee was found with ID: {position}\n\n{}", range_hint(.size))]
    NotFound { position: i64, size: usize },

    /// An employee matching the store's duplicate policy already exists.
    #[error("Employee with the name '{name}' already exists")]
    Conflict { name: String },

    /// Any other rejected request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

fn range_hint(size: &usize) -> String {
    if *size == 0 {
        "The employee list is empty".to_string()
    } else {
        format!("Please enter a number from: 1 - {}", size)
    }
}
