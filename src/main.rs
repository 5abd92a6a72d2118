use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use tracing::{info, warn};

use hrm_core::{
    AttendanceLedger, Config, EmployeeDirectory, FileStore, SessionService, Storage, logging,
};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let _guard = logging::init(&config)?;

    info!(data_dir = %config.data_dir.display(), "HRM starting...");

    let store: Arc<dyn Storage> = Arc::new(
        FileStore::open(&config.data_dir)
            .with_context(|| format!("cannot open data dir {}", config.data_dir.display()))?,
    );

    let session = SessionService::new(store.clone());
    match session.current()? {
        Some(token) => info!(email = %token.email, "Active session"),
        None => warn!("No active session, protected views stay locked"),
    }

    let directory = if config.seed_sample_roster {
        EmployeeDirectory::load_or_seed(store.clone())
    } else {
        EmployeeDirectory::load(store.clone())
    };
    let ledger = AttendanceLedger::load(store, config.policy);

    if !directory.is_persisting() || !ledger.is_persisting() {
        warn!(
            roster = directory.is_persisting(),
            attendance = ledger.is_persisting(),
            "Stored data failed to load, changes will not be saved"
        );
    }
    info!(
        late_after_hour = ledger.policy().late_after_hour,
        partial_day_hours = ledger.policy().partial_day_hours,
        "Attendance policy"
    );

    let today = Local::now().date_naive();
    let roster = directory.aggregate();
    let stats = ledger.daily_stats(today, directory.len());

    info!(
        employees = directory.len(),
        active = roster.active_count,
        total_salary = roster.total_annual_salary,
        departments = ?directory.departments(),
        "Roster loaded"
    );
    info!(
        %today,
        present = stats.present_count,
        late = stats.late_count,
        absent = stats.absent_count,
        "Attendance for today"
    );

    println!(
        "{} employees ({} active), ${:.0}/year payroll",
        directory.len(),
        roster.active_count,
        roster.total_annual_salary
    );
    println!(
        "{today}: {} present, {} late, {} absent",
        stats.present_count, stats.late_count, stats.absent_count
    );

    Ok(())
}
