//! Structured diagnostics
//!
//! Problems found in document content are never returned as `Err`. They are
//! appended to an [`ErrorLog`] as immutable [`ErrorRecord`]s so that one read
//! pass reports everything it can find.

pub mod codes;
pub mod log;
pub mod record;

pub use codes::{Category, ErrorCode, Severity};
pub use log::ErrorLog;
pub use record::ErrorRecord;
