pub mod search;
pub mod time_fmt;
