//! Ordered, position-addressed employee collection.
//!
//! Positions are 1-based and are the only identity a record has. Every
//! structural change shifts the positions of the records after it, so callers
//! sharing a store must serialize access through a single lock (see
//! [`AppState`](crate::server::AppState)).

use serde::{Deserialize, Serialize};

use super::employee::{seed_employees, Employee};
use super::error::StoreError;

/// Rule used by [`EmployeeStore::create`] to reject duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Reject when any record has the same name (case-sensitive).
    #[default]
    Name,
    /// Reject only when both name and occupation match.
    NameAndOccupation,
}

impl DuplicatePolicy {
    fn matches(self, existing: &Employee, name: &str, occupation: &str) -> bool {
        match self {
            Self::Name => existing.name == name,
            Self::NameAndOccupation => existing.name == name && existing.occupation == occupation,
        }
    }
}

/// Result of a successful [`EmployeeStore::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Created {
    pub employee: Employee,
    /// Position assigned to the new record (the new size).
    pub position: usize,
}

/// Result of a successful [`EmployeeStore::replace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replaced {
    pub employee: Employee,
    pub message: String,
}

/// Result of a successful [`EmployeeStore::delete`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub name: String,
    /// Collection size after the removal.
    pub remaining: usize,
}

impl Deleted {
    pub fn message(&self) -> String {
        format!(
            "Employee: {} has been deleted. There are now: {} employees left!",
            self.name, self.remaining
        )
    }
}

/// In-memory employee roster.
#[derive(Debug, Clone, Default)]
pub struct EmployeeStore {
    employees: Vec<Employee>,
    policy: DuplicatePolicy,
}

impl EmployeeStore {
    /// Create an empty store with the default duplicate policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `employees` in the given order.
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees,
            policy: DuplicatePolicy::default(),
        }
    }

    /// Create a store holding the startup roster.
    pub fn seeded() -> Self {
        Self::with_employees(seed_employees())
    }

    /// Set the duplicate policy used by [`create`](Self::create).
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// All employees in position order.
    pub fn list(&self) -> &[Employee] {
        &self.employees
    }

    /// Employee at the 1-based `position`.
    pub fn get(&self, position: i64) -> Result<&Employee, StoreError> {
        let index = self.index_of(position)?;
        self.employees.get(index).ok_or_else(|| {
            StoreError::InvalidRequest(format!(
                "position {} resolved to a missing record",
                position
            ))
        })
    }

    /// Append a new employee.
    pub fn create(&mut self, name: &str, occupation: &str) -> Result<Created, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidRequest(
                "employee name must not be empty".to_string(),
            ));
        }
        if self
            .employees
            .iter()
            .any(|e| self.policy.matches(e, name, occupation))
        {
            return Err(StoreError::Conflict {
                name: name.to_string(),
            });
        }

        let employee = Employee::new(name, occupation);
        self.employees.push(employee.clone());
        tracing::debug!(name, size = self.employees.len(), "employee appended");

        Ok(Created {
            employee,
            position: self.employees.len(),
        })
    }

    /// Insert a new employee in front of the one at `position`.
    ///
    /// This does not overwrite: the record previously at `position` moves to
    /// `position + 1` and the collection grows by one. Clients of the roster
    /// depend on this behavior.
    pub fn replace(
        &mut self,
        position: i64,
        name: &str,
        occupation: &str,
    ) -> Result<Replaced, StoreError> {
        let index = self.index_of(position)?;
        let employee = Employee::new(name, occupation);
        self.employees.insert(index, employee.clone());
        tracing::debug!(name, position, size = self.employees.len(), "employee inserted");

        Ok(Replaced {
            message: format!("{} has been updated!", employee.name),
            employee,
        })
    }

    /// Remove the employee at `position`.
    pub fn delete(&mut self, position: i64) -> Result<Deleted, StoreError> {
        let index = self.index_of(position)?;
        if index >= self.employees.len() {
            return Err(StoreError::InvalidRequest(format!(
                "Error deleting employee at position {}",
                position
            )));
        }
        let removed = self.employees.remove(index);

        Ok(Deleted {
            name: removed.name,
            remaining: self.employees.len(),
        })
    }

    /// Translate a 1-based position into a vector index.
    fn index_of(&self, position: i64) -> Result<usize, StoreError> {
        let size = self.employees.len();
        usize::try_from(position)
            .ok()
            .filter(|p| (1..=size).contains(p))
            .map(|p| p - 1)
            .ok_or(StoreError::NotFound { position, size })
    }
}
