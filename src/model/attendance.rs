use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::utils::time_fmt::clock_opt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    Partial,
}

/// One employee's attendance for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub id: String,
    pub employee_id: String,
    /// Name as it was at clock-in; later renames do not touch it.
    pub employee_name: String,
    pub date: NaiveDate,
    #[serde(default, with = "clock_opt", skip_serializing_if = "Option::is_none")]
    pub clock_in: Option<NaiveTime>,
    #[serde(default, with = "clock_opt", skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
}

impl AttendanceEntry {
    pub fn belongs_to(&self, employee_id: &str, date: NaiveDate) -> bool {
        self.employee_id == employee_id && self.date == date
    }

    pub fn clock_state(&self) -> ClockState {
        match (self.clock_in, self.clock_out) {
            (Some(_), Some(_)) => ClockState::ClockedOut,
            (Some(_), None) => ClockState::ClockedIn,
            (None, _) => ClockState::NotClockedIn,
        }
    }
}

/// Per (employee, day) progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ClockState {
    NotClockedIn,
    ClockedIn,
    ClockedOut,
}

impl ClockState {
    pub fn can_clock_in(self) -> bool {
        self == Self::NotClockedIn
    }

    pub fn can_clock_out(self) -> bool {
        self == Self::ClockedIn
    }
}

/// Thresholds used to derive an entry's status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendancePolicy {
    /// Clock-ins in any hour after this one are late; the whole of this hour
    /// still counts as on time.
    pub late_after_hour: u32,
    /// Worked hours below this make the day partial.
    pub partial_day_hours: f64,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            late_after_hour: 9,
            partial_day_hours: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub present_count: usize,
    pub late_count: usize,
    /// Roster size minus entries for the day. Goes negative when entries
    /// remain for employees that have since been removed.
    pub absent_count: i64,
}
