use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    error::DirectoryError,
    model::employee::{DepartmentFilter, Employee, EmployeeDraft, EmployeeStatus, RosterSummary},
    store::{self, EMPLOYEES_KEY, Loaded, Storage},
    utils::search::Matcher,
};

/// The employee roster, mirrored to the store after every mutation.
///
/// If the stored roster cannot be loaded the directory starts empty and
/// never writes, leaving the stored document as it was.
pub struct EmployeeDirectory {
    store: Arc<dyn Storage>,
    employees: Vec<Employee>,
    writable: bool,
}

impl EmployeeDirectory {
    /// Loads the roster; a never-written key gives an empty roster.
    pub fn load(store: Arc<dyn Storage>) -> Self {
        let loaded = store::load_collection(store.as_ref(), EMPLOYEES_KEY);
        Self {
            writable: loaded.is_writable(),
            employees: loaded.into_items(),
            store,
        }
    }

    /// Like [`load`](Self::load), but a never-written key is filled with the
    /// sample roster and persisted right away.
    pub fn load_or_seed(store: Arc<dyn Storage>) -> Self {
        match store::load_collection(store.as_ref(), EMPLOYEES_KEY) {
            Loaded::Missing => {
                let directory = Self {
                    store,
                    employees: sample_roster(),
                    writable: true,
                };
                info!(count = directory.employees.len(), "Seeded sample roster");
                directory.persist();
                directory
            }
            loaded => Self {
                writable: loaded.is_writable(),
                employees: loaded.into_items(),
                store,
            },
        }
    }

    /// False when the stored roster failed to load; changes then stay in
    /// memory only.
    pub fn is_persisting(&self) -> bool {
        self.writable
    }

    pub fn add(&mut self, draft: EmployeeDraft) -> Result<Employee, DirectoryError> {
        draft.validate()?;

        let employee = Employee::from_draft(Uuid::new_v4().to_string(), draft);
        self.employees.push(employee.clone());
        self.persist();

        info!(employee_id = %employee.id, name = %employee, "Employee added");
        Ok(employee)
    }

    /// Replaces every field but the id. `Ok(None)` when no record has `id`,
    /// in which case nothing is written.
    pub fn update(
        &mut self,
        id: &str,
        draft: EmployeeDraft,
    ) -> Result<Option<Employee>, DirectoryError> {
        draft.validate()?;

        let Some(slot) = self.employees.iter_mut().find(|e| e.id == id) else {
            debug!(employee_id = id, "Update skipped, employee not found");
            return Ok(None);
        };

        *slot = Employee::from_draft(id.to_string(), draft);
        let updated = slot.clone();
        self.persist();

        info!(employee_id = id, name = %updated, "Employee updated");
        Ok(Some(updated))
    }

    /// Idempotent; returns the removed record, if there was one.
    pub fn remove(&mut self, id: &str) -> Option<Employee> {
        let index = self.employees.iter().position(|e| e.id == id)?;
        let removed = self.employees.remove(index);
        self.persist();

        info!(employee_id = id, name = %removed, "Employee removed");
        Some(removed)
    }

    /// Lazily yields, in roster order, the employees whose first name, last
    /// name, email or department contains `search` (ignoring case) and whose
    /// department passes `department`. Call again to restart.
    pub fn filter<'a>(
        &'a self,
        search: &str,
        department: DepartmentFilter,
    ) -> impl Iterator<Item = &'a Employee> + Clone + use<'a> {
        let matcher = Matcher::new(search);
        self.employees.iter().filter(move |employee| {
            matcher.matches_any(employee.searchable_fields()) && department.admits(&employee.department)
        })
    }

    /// Distinct departments in first-seen order.
    pub fn departments(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.employees
            .iter()
            .map(|e| e.department.as_str())
            .filter(|department| seen.insert(*department))
            .collect()
    }

    pub fn aggregate(&self) -> RosterSummary {
        self.employees
            .iter()
            .fold(RosterSummary::default(), |mut summary, employee| {
                if employee.is_active() {
                    summary.active_count += 1;
                }
                summary.total_annual_salary += employee.salary;
                summary
            })
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Employee> {
        self.employees.iter()
    }

    pub fn as_slice(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    fn persist(&self) {
        if !self.writable {
            warn!(key = EMPLOYEES_KEY, "Roster not persisted, stored copy failed to load");
            return;
        }
        store::persist_collection(self.store.as_ref(), EMPLOYEES_KEY, &self.employees);
    }
}

fn sample_roster() -> Vec<Employee> {
    vec![
        sample_employee(
            "1",
            ("John", "Doe"),
            ("Engineering", "Software Developer"),
            75000.0,
            NaiveDate::from_ymd_opt(2023, 1, 15),
        ),
        sample_employee(
            "2",
            ("Jane", "Smith"),
            ("Marketing", "Marketing Manager"),
            65000.0,
            NaiveDate::from_ymd_opt(2023, 3, 20),
        ),
    ]
}

fn sample_employee(
    id: &str,
    (first_name, last_name): (&str, &str),
    (department, position): (&str, &str),
    salary: f64,
    start_date: Option<NaiveDate>,
) -> Employee {
    Employee {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@company.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        department: department.to_string(),
        position: position.to_string(),
        salary,
        start_date: start_date.unwrap_or_default(),
        status: EmployeeStatus::Active,
    }
}
