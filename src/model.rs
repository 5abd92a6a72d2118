pub mod attendance;
pub mod employee;
pub mod session;

pub use attendance::{AttendanceEntry, AttendancePolicy, AttendanceStatus, ClockState, DailyStats};
pub use employee::{DepartmentFilter, Employee, EmployeeDraft, EmployeeStatus, RosterSummary};
pub use session::SessionToken;
