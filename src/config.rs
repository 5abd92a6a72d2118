use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use tracing::Level;

use crate::model::attendance::AttendancePolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: Level,
    pub seed_sample_roster: bool,

    // Attendance thresholds
    pub policy: AttendancePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = AttendancePolicy::default();

        Ok(Self {
            data_dir: env::var("HRM_DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),
            log_dir: env::var("HRM_LOG_DIR")
                .unwrap_or_else(|_| "logs".to_string())
                .into(),
            log_level: parse_var("HRM_LOG_LEVEL", Level::INFO)?,
            seed_sample_roster: parse_var("SEED_SAMPLE_ROSTER", true)?,
            policy: checked_policy(
                parse_var("LATE_AFTER_HOUR", defaults.late_after_hour)?,
                parse_var("PARTIAL_DAY_HOURS", defaults.partial_day_hours)?,
            )?,
        })
    }
}

fn checked_policy(late_after_hour: u32, partial_day_hours: f64) -> Result<AttendancePolicy> {
    if late_after_hour > 23 {
        bail!("LATE_AFTER_HOUR must be an hour between 0 and 23, got {late_after_hour}");
    }
    if !partial_day_hours.is_finite() || partial_day_hours < 0.0 {
        bail!("PARTIAL_DAY_HOURS must be a finite non-negative number, got {partial_day_hours}");
    }

    Ok(AttendancePolicy {
        late_after_hour,
        partial_day_hours,
    })
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value `{raw}`")),
        Err(_) => Ok(default),
    }
}
