use std::sync::Arc;

use chrono::NaiveDate;
use hrm_core::model::{DepartmentFilter, Employee, EmployeeDraft, EmployeeStatus};
use hrm_core::{DirectoryError, EmployeeDirectory, MemoryStore, Storage};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn draft(first: &str, last: &str, department: &str, status: EmployeeStatus) -> EmployeeDraft {
    EmployeeDraft {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@corp.example", first.to_lowercase(), last.to_lowercase()),
        department: department.to_string(),
        position: "Staff".to_string(),
        salary: 50_000.0,
        start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        status,
    }
}

fn empty_directory() -> (Arc<dyn Storage>, EmployeeDirectory) {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let directory = EmployeeDirectory::load(store.clone());
    (store, directory)
}

fn ids<'a>(employees: impl Iterator<Item = &'a Employee>) -> Vec<String> {
    employees.map(|e| e.id.clone()).collect()
}

#[test]
fn add_assigns_unique_ids_and_persists() {
    let (store, mut directory) = empty_directory();

    let a = directory.add(draft("Ada", "Lovelace", "Engineering", EmployeeStatus::Active)).unwrap();
    let b = directory.add(draft("Alan", "Turing", "Research", EmployeeStatus::Active)).unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(directory.len(), 2);

    let persisted: Vec<Employee> = serde_json::from_str(&store.get("employees").unwrap().unwrap()).unwrap();
    assert_eq!(persisted, vec![a, b]);
}

#[test]
fn add_rejects_blank_names() {
    let (store, mut directory) = empty_directory();

    let result = directory.add(draft("", "Nobody", "Sales", EmployeeStatus::Active));

    assert_eq!(
        result,
        Err(DirectoryError::InvalidDraft {
            field: "firstName",
            reason: "is required",
        })
    );
    assert!(directory.is_empty());
    assert_eq!(store.get("employees").unwrap(), None);
}

#[test]
fn negative_salary_is_reported_as_such() {
    let (_, mut directory) = empty_directory();
    let mut underpaid = draft("Ada", "Lovelace", "Engineering", EmployeeStatus::Active);
    underpaid.salary = -5.0;

    let err = directory.add(underpaid).unwrap_err();

    assert_eq!(err.to_string(), "employee field `salary` must be a non-negative number");
    assert!(directory.is_empty());
}

#[test]
fn update_replaces_record_and_keeps_id() {
    let (_, mut directory) = empty_directory();
    let original = directory.add(draft("Grace", "Hopper", "Navy", EmployeeStatus::Active)).unwrap();

    let mut changed = draft("Grace", "Hopper", "Engineering", EmployeeStatus::Inactive);
    changed.salary = 90_000.0;
    let updated = directory.update(&original.id, changed).unwrap().unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.department, "Engineering");
    assert_eq!(updated.status, EmployeeStatus::Inactive);
    assert_eq!(directory.get(&original.id), Some(&updated));
}

#[test]
fn update_of_unknown_id_changes_nothing() {
    let (store, mut directory) = empty_directory();
    directory.add(draft("Ada", "Lovelace", "Engineering", EmployeeStatus::Active)).unwrap();
    let before = store.get("employees").unwrap();

    let result = directory.update("missing", draft("X", "Y", "Z", EmployeeStatus::Active));

    assert_eq!(result, Ok(None));
    assert_eq!(store.get("employees").unwrap(), before);
}

#[test]
fn remove_is_idempotent() {
    let (_, mut directory) = empty_directory();
    let a = directory.add(draft("Ada", "Lovelace", "Engineering", EmployeeStatus::Active)).unwrap();
    let b = directory.add(draft("Alan", "Turing", "Research", EmployeeStatus::Active)).unwrap();

    assert_eq!(directory.remove(&a.id).map(|e| e.id), Some(a.id.clone()));
    assert_eq!(directory.remove(&a.id), None);

    let listed = ids(directory.filter("", DepartmentFilter::All));
    assert_eq!(listed, vec![b.id]);
}

#[test]
fn filter_matches_any_field_case_insensitively() {
    let (_, mut directory) = empty_directory();
    let ada = directory.add(draft("Ada", "Lovelace", "Engineering", EmployeeStatus::Active)).unwrap();
    let alan = directory.add(draft("Alan", "Turing", "Research", EmployeeStatus::Active)).unwrap();
    let jane = directory.add(draft("Jane", "Smith", "Marketing", EmployeeStatus::Inactive)).unwrap();

    assert_eq!(ids(directory.filter("LOVE", DepartmentFilter::All)), vec![ada.id.clone()]);
    assert_eq!(ids(directory.filter("research", DepartmentFilter::All)), vec![alan.id.clone()]);
    assert_eq!(ids(directory.filter("jane.smith@", DepartmentFilter::All)), vec![jane.id.clone()]);
    assert_eq!(ids(directory.filter("a", DepartmentFilter::All)), vec![ada.id, alan.id, jane.id]);
    assert_eq!(directory.filter("zzz", DepartmentFilter::All).count(), 0);
}

#[test]
fn filter_intersects_with_exact_department() {
    let (_, mut directory) = empty_directory();
    directory.add(draft("Ada", "Lovelace", "Engineering", EmployeeStatus::Active)).unwrap();
    let alan = directory.add(draft("Alan", "Turing", "Research", EmployeeStatus::Active)).unwrap();

    assert_eq!(ids(directory.filter("a", "Research".into())), vec![alan.id]);
    assert_eq!(directory.filter("", "research".into()).count(), 0);
    assert_eq!(directory.filter("", "all".into()).count(), 2);
}

#[test]
fn filter_is_restartable() {
    let (_, mut directory) = empty_directory();
    directory.add(draft("Ada", "Lovelace", "Engineering", EmployeeStatus::Active)).unwrap();
    directory.add(draft("Alan", "Turing", "Research", EmployeeStatus::Active)).unwrap();

    let listing = directory.filter("a", DepartmentFilter::All);
    let first_pass: Vec<_> = listing.clone().collect();
    let second_pass: Vec<_> = listing.collect();

    assert_eq!(first_pass.len(), 2);
    assert_eq!(first_pass, second_pass);
}

#[test]
fn departments_are_distinct() {
    let (_, mut directory) = empty_directory();
    for (first, department) in [("A", "Sales"), ("B", "Ops"), ("C", "Sales")] {
        directory.add(draft(first, "Person", department, EmployeeStatus::Active)).unwrap();
    }

    let mut departments = directory.departments();
    departments.sort_unstable();
    assert_eq!(departments, vec!["Ops", "Sales"]);
}

#[test]
fn aggregate_counts_active_and_sums_all_salaries() {
    let (_, mut directory) = empty_directory();
    assert_eq!(directory.aggregate().active_count, 0);
    assert_eq!(directory.aggregate().total_annual_salary, 0.0);

    directory.add(draft("A", "One", "Ops", EmployeeStatus::Active)).unwrap();
    directory.add(draft("B", "Two", "Ops", EmployeeStatus::Inactive)).unwrap();
    let mut rich = draft("C", "Three", "Ops", EmployeeStatus::Active);
    rich.salary = 120_000.0;
    directory.add(rich).unwrap();

    let summary = directory.aggregate();
    assert_eq!(summary.active_count, 2);
    assert_eq!(summary.total_annual_salary, 220_000.0);
}

proptest! {
    #[test]
    fn prop_search_matches_iff_substring_of_a_searchable_field(
        first in "[A-Za-z]{1,8}",
        last in "[A-Za-z]{1,8}",
        department in "[A-Za-z]{1,8}",
        term in "[A-Za-z]{0,3}",
    ) {
        let (_, mut directory) = empty_directory();
        let employee = directory.add(draft(&first, &last, &department, EmployeeStatus::Active)).unwrap();

        prop_assert_eq!(directory.filter("", DepartmentFilter::All).count(), 1);

        let needle = term.to_lowercase();
        let expected = [&employee.first_name, &employee.last_name, &employee.email, &employee.department]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
        let found = directory.filter(&term, DepartmentFilter::All).any(|e| e.id == employee.id);

        prop_assert_eq!(found, expected);
    }
}
