use chrono::NaiveTime;
use thiserror::Error;

/// Why a clock-in or clock-out was refused. Surfaced to the caller as-is,
/// nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("already clocked in today at {}", .at.format("%H:%M"))]
    AlreadyClockedIn { at: NaiveTime },

    #[error("already clocked out today at {}", .at.format("%H:%M"))]
    AlreadyClockedOut { at: NaiveTime },

    #[error("no clock-in record, must clock in first")]
    NoClockInRecord,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io failed for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage lock poisoned")]
    Lock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("employee field `{field}` {reason}")]
    InvalidDraft {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("session encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
