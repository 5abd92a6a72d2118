use chrono::{NaiveTime, ParseError, Timelike};

/// Wire format for clock times, e.g. `09:05`.
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Accepts `HH:MM`, falling back to `HH:MM:SS`.
pub fn parse_clock(raw: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(raw, CLOCK_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
}

/// Drops seconds and sub-seconds; clock times are kept at minute precision.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// serde adapter for `Option<NaiveTime>` stored as `HH:MM`.
pub mod clock_opt {
    use super::{CLOCK_FORMAT, parse_clock};
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&time.format(CLOCK_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_clock(&raw).map_err(de::Error::custom))
            .transpose()
    }
}
