//! Employee model and the reconciliation applied on every scan.

use serde::Serialize;
use uuid::Uuid;

use crate::validation::employee_id_for;

/// Name given to employees created by a scan without a name.
pub const PLACEHOLDER_NAME: &str = "Unnamed";

/// Represents a row of the `employees` table.
///
/// # Invariants
///
/// - `national_id` is exactly 11 digits (also enforced by a CHECK constraint)
/// - `employee_id` equals the last 5 digits of `national_id`; drift is
///   repaired by [`reconcile`] the next time the employee scans
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Employee {
    pub id: Uuid,

    pub name: String,

    /// Short badge identifier derived from the CPF
    pub employee_id: String,

    /// Normalized CPF, the natural key used for lookups
    pub national_id: String,
}

/// Field values to write back when an existing employee drifted from the
/// submitted data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub name: String,
    pub employee_id: String,
}

/// Compare an existing employee with a scan submission.
///
/// - a non-empty (trimmed) name replaces the stored one
/// - `employee_id` is re-derived from `national_id`
///
/// Returns `None` when nothing would change, so callers skip the write.
pub fn reconcile(employee: &Employee, submitted_name: Option<&str>) -> Option<EmployeeUpdate> {
    let name = submitted_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(employee.name.as_str());
    let employee_id = employee_id_for(&employee.national_id);

    if name == employee.name && employee_id == employee.employee_id {
        return None;
    }

    Some(EmployeeUpdate {
        name: name.to_string(),
        employee_id,
    })
}

/// Name to store for a brand-new employee.
pub fn initial_name(submitted_name: Option<&str>) -> String {
    submitted_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(PLACEHOLDER_NAME)
        .to_string()
}
