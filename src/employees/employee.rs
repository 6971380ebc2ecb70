//! The employee record and the roster's seed data.

use serde::{Deserialize, Serialize};

/// A single employee record.
///
/// Records carry no identifier of their own: an employee is addressed by its
/// 1-based position in the [`EmployeeStore`](super::EmployeeStore) at the
/// time of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Display name. Unique within a store under the default policy.
    #[serde(alias = "Name")]
    pub name: String,
    /// Job title. May be blank.
    #[serde(default, alias = "Occupation")]
    pub occupation: String,
}

impl Employee {
    pub fn new(name: impl Into<String>, occupation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            occupation: occupation.into(),
        }
    }
}

/// The roster loaded at startup, in position order.
pub fn seed_employees() -> Vec<Employee> {
    [
        ("Sang", "Team Lead & Project Manager"),
        ("Michael", "Backend Developer"),
        ("Mohamed", "Backend Developer Intern"),
        ("Simon", "Robotics Engineer"),
        ("Nikolaj", "Robotics Engineer"),
        ("Emil Asgeirsson", "Product Manager | Analytics"),
        ("Asbjørn", "Acoustic Specialist"),
        ("Kristian Larsen", "Head of Development"),
        ("Frederik Hex", "Head of Marketing"),
        ("Mads Helle", "Chief Technology Officer"),
        ("Gert Nielsen", "Chief Executive Officer"),
    ]
    .into_iter()
    .map(|(name, occupation)| Employee::new(name, occupation))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_eleven_unique_names() {
        let seed = seed_employees();
        assert_eq!(seed.len(), 11);
        assert_eq!(seed[0], Employee::new("Sang", "Team Lead & Project Manager"));
        assert_eq!(seed[10].name, "Gert Nielsen");

        let mut names: Vec<&str> = seed.iter().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_missing_occupation_deserializes_blank() {
        let employee: Employee = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(employee, Employee::new("Ada", ""));
    }
}
