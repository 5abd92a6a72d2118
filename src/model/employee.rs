use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display as StrumDisplay, EnumString};

use crate::error::DirectoryError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

/// A roster entry. `Display` renders the full name, which is also the name
/// snapshot written onto attendance entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[display(fmt = "{} {}", first_name, last_name)]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    /// Annual.
    pub salary: f64,
    pub start_date: NaiveDate,
    pub status: EmployeeStatus,
}

const REQUIRED: &str = "is required";

/// Employee fields without the id, as entered on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub salary: f64,
    pub start_date: NaiveDate,
    pub status: EmployeeStatus,
}

impl EmployeeDraft {
    /// Presence checks only, formats are not validated.
    pub fn validate(&self) -> Result<(), DirectoryError> {
        if self.first_name.trim().is_empty() {
            return Err(DirectoryError::InvalidDraft {
                field: "firstName",
                reason: REQUIRED,
            });
        }
        if self.last_name.trim().is_empty() {
            return Err(DirectoryError::InvalidDraft {
                field: "lastName",
                reason: REQUIRED,
            });
        }
        if self.salary.is_nan() || self.salary < 0.0 {
            return Err(DirectoryError::InvalidDraft {
                field: "salary",
                reason: "must be a non-negative number",
            });
        }
        Ok(())
    }
}

impl Employee {
    pub fn from_draft(id: String, draft: EmployeeDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            department: draft.department,
            position: draft.position,
            salary: draft.salary,
            start_date: draft.start_date,
            status: draft.status,
        }
    }

    pub fn full_name(&self) -> String {
        self.to_string()
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// The fields free-text search looks at.
    pub fn searchable_fields(&self) -> [&str; 4] {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.department.as_str(),
        ]
    }
}

/// Department selector of the roster listing. `"all"` disables the
/// department constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentFilter {
    All,
    Only(String),
}

impl DepartmentFilter {
    pub const ALL_SENTINEL: &'static str = "all";

    pub fn admits(&self, department: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == department,
        }
    }
}

impl From<&str> for DepartmentFilter {
    fn from(raw: &str) -> Self {
        if raw == Self::ALL_SENTINEL {
            Self::All
        } else {
            Self::Only(raw.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    pub active_count: usize,
    /// Sum over every record, inactive ones included.
    pub total_annual_salary: f64,
}
