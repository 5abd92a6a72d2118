use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::Rejection,
    model::attendance::{AttendanceEntry, AttendancePolicy, AttendanceStatus, ClockState, DailyStats},
    store::{self, ATTENDANCE_KEY, Storage},
    utils::time_fmt::truncate_to_minute,
};

/// Daily clock-in/clock-out entries, mirrored to the store after every
/// mutation. Holds at most one entry per employee and date.
///
/// A ledger whose stored copy failed to load keeps working in memory but
/// never writes it back.
pub struct AttendanceLedger {
    store: Arc<dyn Storage>,
    policy: AttendancePolicy,
    entries: Vec<AttendanceEntry>,
    writable: bool,
}

impl AttendanceLedger {
    pub fn load(store: Arc<dyn Storage>, policy: AttendancePolicy) -> Self {
        let loaded = store::load_collection(store.as_ref(), ATTENDANCE_KEY);
        Self {
            writable: loaded.is_writable(),
            entries: loaded.into_items(),
            store,
            policy,
        }
    }

    pub fn is_persisting(&self) -> bool {
        self.writable
    }

    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Starts the day for `employee_id`. The status is fixed here: late when
    /// `now` falls in an hour past the policy cutoff, present otherwise.
    #[instrument(name = "clock_in", skip(self, employee_name), fields(name = employee_name))]
    pub fn clock_in(
        &mut self,
        employee_id: &str,
        employee_name: &str,
        now: NaiveDateTime,
    ) -> Result<AttendanceEntry, Rejection> {
        let today = now.date();
        let time = truncate_to_minute(now.time());
        let existing = self.position(employee_id, today);

        if let Some(at) = existing.and_then(|index| self.entries[index].clock_in) {
            let rejection = Rejection::AlreadyClockedIn { at };
            warn!(%rejection, "Clock-in rejected");
            return Err(rejection);
        }

        let status = if now.hour() > self.policy.late_after_hour {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        };

        let entry = match existing {
            // An entry without a clock-in keeps its id and clock-out.
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.employee_name = employee_name.to_string();
                entry.clock_in = Some(time);
                entry.status = status;
                entry.clone()
            }
            None => {
                let entry = AttendanceEntry {
                    id: Uuid::new_v4().to_string(),
                    employee_id: employee_id.to_string(),
                    employee_name: employee_name.to_string(),
                    date: today,
                    clock_in: Some(time),
                    clock_out: None,
                    status,
                    total_hours: None,
                };
                self.entries.push(entry.clone());
                entry
            }
        };

        self.persist();
        info!(entry_id = %entry.id, %status, clock_in = %time.format("%H:%M"), "Clocked in");
        Ok(entry)
    }

    /// Closes the day for `employee_id`, recording worked hours. Fewer hours
    /// than the policy minimum turn the day partial whatever the clock-in
    /// status was. A clock-out earlier than the clock-in yields negative
    /// hours, which are kept.
    #[instrument(name = "clock_out", skip(self, employee_name), fields(name = employee_name))]
    pub fn clock_out(
        &mut self,
        employee_id: &str,
        employee_name: &str,
        now: NaiveDateTime,
    ) -> Result<AttendanceEntry, Rejection> {
        let today = now.date();
        let time = truncate_to_minute(now.time());

        let Some(index) = self.position(employee_id, today) else {
            warn!("Clock-out rejected, no entry today");
            return Err(Rejection::NoClockInRecord);
        };

        let entry = &mut self.entries[index];
        let Some(clock_in) = entry.clock_in else {
            warn!("Clock-out rejected, entry has no clock-in");
            return Err(Rejection::NoClockInRecord);
        };
        if let Some(at) = entry.clock_out {
            let rejection = Rejection::AlreadyClockedOut { at };
            warn!(%rejection, "Clock-out rejected");
            return Err(rejection);
        }

        let worked = worked_hours(clock_in, time);
        entry.clock_out = Some(time);
        entry.total_hours = Some(round_hours(worked));
        if worked < self.policy.partial_day_hours {
            entry.status = AttendanceStatus::Partial;
        }
        let entry = entry.clone();

        self.persist();
        info!(
            entry_id = %entry.id,
            status = %entry.status,
            total_hours = entry.total_hours,
            "Clocked out"
        );
        Ok(entry)
    }

    /// Entries recorded for `date`, in ledger order.
    pub fn entries_for_date(
        &self,
        date: NaiveDate,
    ) -> impl Iterator<Item = &AttendanceEntry> + Clone + '_ {
        self.entries.iter().filter(move |entry| entry.date == date)
    }

    pub fn entry_for(&self, employee_id: &str, date: NaiveDate) -> Option<&AttendanceEntry> {
        self.entries
            .iter()
            .find(|entry| entry.belongs_to(employee_id, date))
    }

    pub fn clock_state(&self, employee_id: &str, date: NaiveDate) -> ClockState {
        self.entry_for(employee_id, date)
            .map_or(ClockState::NotClockedIn, AttendanceEntry::clock_state)
    }

    /// Counts for `date`. Absent is the roster size minus the entries of the
    /// day and is not clamped at zero.
    pub fn daily_stats(&self, date: NaiveDate, total_employee_count: usize) -> DailyStats {
        let mut stats = DailyStats::default();
        let mut recorded: i64 = 0;

        for entry in self.entries_for_date(date) {
            recorded += 1;
            match entry.status {
                AttendanceStatus::Present => stats.present_count += 1,
                AttendanceStatus::Late => stats.late_count += 1,
                AttendanceStatus::Absent | AttendanceStatus::Partial => {}
            }
        }

        stats.absent_count = i64::try_from(total_employee_count).unwrap_or(i64::MAX) - recorded;
        stats
    }

    pub fn as_slice(&self) -> &[AttendanceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, employee_id: &str, date: NaiveDate) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.belongs_to(employee_id, date))
    }

    fn persist(&self) {
        if !self.writable {
            warn!(key = ATTENDANCE_KEY, "Ledger not persisted, stored copy failed to load");
            return;
        }
        store::persist_collection(self.store.as_ref(), ATTENDANCE_KEY, &self.entries);
    }
}

/// Hours between two times of the same day; negative if `end` is earlier.
fn worked_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    end.signed_duration_since(start).num_seconds() as f64 / 3600.0
}

/// Two decimals, halves rounded up.
fn round_hours(hours: f64) -> f64 {
    (hours * 100.0 + 0.5).floor() / 100.0
}
