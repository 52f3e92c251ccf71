//! JSONL audit log
//!
//! One entry per line, appended and flushed per attempt. Blank lines are
//! ignored when reading; an unparsable line is an error naming its line number.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::PathBuf;

use crate::error::{BillingError, BillingResult};

use super::entry::AuditEntry;

/// Append-only log of notice generation attempts
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> BillingResult<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| BillingError::Json(format!("Cannot encode audit entry: {}", e)))?;
        line.push('\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| {
                file.write_all(line.as_bytes())?;
                file.flush()
            })
            .map_err(|e| self.io_error(e))
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> BillingResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.for_each_entry(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> BillingResult<Vec<AuditEntry>> {
        let mut tail = VecDeque::with_capacity(count.min(256));
        self.for_each_entry(|entry| {
            if count == 0 {
                return;
            }
            if tail.len() == count {
                tail.pop_front();
            }
            tail.push_back(entry);
        })?;
        Ok(tail.into())
    }

    /// Number of recorded attempts
    pub fn entry_count(&self) -> BillingResult<usize> {
        let mut count = 0;
        self.for_each_line(|_, _| {
            count += 1;
            Ok(())
        })?;
        Ok(count)
    }

    fn for_each_entry(&self, mut f: impl FnMut(AuditEntry)) -> BillingResult<()> {
        self.for_each_line(|number, line| {
            let entry = serde_json::from_str(line).map_err(|e| {
                BillingError::Json(format!(
                    "Bad audit entry at {} line {}: {}",
                    self.log_path.display(),
                    number,
                    e
                ))
            })?;
            f(entry);
            Ok(())
        })
    }

    /// Visit each non-blank line with its 1-based line number
    fn for_each_line(
        &self,
        mut f: impl FnMut(usize, &str) -> BillingResult<()>,
    ) -> BillingResult<()> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(self.io_error(e)),
        };

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_error(e))?;
            if !line.trim().is_empty() {
                f(index + 1, &line)?;
            }
        }
        Ok(())
    }

    fn io_error(&self, err: std::io::Error) -> BillingError {
        BillingError::Io(format!("Audit log {}: {}", self.log_path.display(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Outcome;
    use crate::models::{AccountCode, BillingPeriod};
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn failed_entry(account: u32) -> AuditEntry {
        AuditEntry::failed(
            AccountCode::new(account),
            None,
            BillingPeriod::new(2025, 1).unwrap(),
            &BillingError::account_not_found(AccountCode::new(account).to_string()),
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();

        logger.log(&failed_entry(1)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].outcome, Outcome::Failed);
        assert_eq!(entries[0].account, AccountCode::new(1));
    }

    #[test]
    fn test_read_recent_keeps_tail() {
        let (logger, _temp) = create_test_logger();

        for i in 0..10 {
            logger.log(&failed_entry(i)).unwrap();
        }

        assert_eq!(logger.entry_count().unwrap(), 10);

        let recent = logger.read_recent(3).unwrap();
        let accounts: Vec<u32> = recent.iter().map(|e| e.account.value()).collect();
        assert_eq!(accounts, vec![7, 8, 9]);

        assert_eq!(logger.read_recent(50).unwrap().len(), 10);
        assert!(logger.read_recent(0).unwrap().is_empty());
    }

    #[test]
    fn test_missing_log_is_empty() {
        let (logger, temp) = create_test_logger();

        assert_eq!(logger.entry_count().unwrap(), 0);
        assert!(logger.read_all().unwrap().is_empty());
        assert!(!temp.path().join("audit.log").exists());
    }

    #[test]
    fn test_blank_lines_skipped_and_bad_line_numbered() {
        let (logger, temp) = create_test_logger();
        let path = temp.path().join("audit.log");
        logger.log(&failed_entry(1)).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .and_then(|mut f| writeln!(f, "\n"))
            .unwrap();
        logger.log(&failed_entry(2)).unwrap();

        assert_eq!(logger.entry_count().unwrap(), 2);
        assert_eq!(logger.read_all().unwrap().len(), 2);

        std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .and_then(|mut f| writeln!(f, "not json"))
            .unwrap();
        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 5"));
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger.log(&failed_entry(1)).unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(reopened.read_all().unwrap().len(), 1);
    }
}
