//! Audit logging for notice generation
//!
//! Every generation attempt, successful or not, is appended to a
//! line-delimited JSON log (JSONL).
//!
//! - `AuditEntry`: one attempt with timestamp, outcome, account, period,
//!   total and output file or error message.
//! - `AuditLogger`: appends entries and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use billing_notice::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::generated(&notice, &path))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Outcome};
pub use logger::AuditLogger;
