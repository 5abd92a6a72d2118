//! Employee roster and daily attendance bookkeeping over a pluggable
//! key-value store.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod utils;

pub use api::attendance::AttendanceLedger;
pub use api::employee::EmployeeDirectory;
pub use auth::session::SessionService;
pub use config::Config;
pub use error::{DirectoryError, Rejection, SessionError, StoreError};
pub use store::{FileStore, MemoryStore, Storage};
