//! Ordered, cumulative diagnostic log

use super::codes::{ErrorCode, Severity};
use super::record::ErrorRecord;
use crate::error::Result;
use serde::Serialize;
use std::fmt;

/// Ordered log of every diagnostic produced while reading or validating a document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorLog {
    records: Vec<ErrorRecord>,
}

impl ErrorLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its index
    pub fn log(&mut self, record: ErrorRecord) -> usize {
        tracing::trace!(code = record.code().number(), "logged {}", record.code().name());
        self.records.push(record);
        self.records.len() - 1
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been logged
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records with exactly this severity
    pub fn count(&self, severity: Severity) -> usize {
        self.records
            .iter()
            .filter(|r| r.severity() == severity)
            .count()
    }

    /// Number of records with this code
    pub fn count_code(&self, code: ErrorCode) -> usize {
        self.records.iter().filter(|r| r.code() == code).count()
    }

    /// True if any record carries `code`
    pub fn contains(&self, code: ErrorCode) -> bool {
        self.records.iter().any(|r| r.code() == code)
    }

    /// Remove every record carrying `code`, returning how many were removed
    pub fn remove(&mut self, code: ErrorCode) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.code() != code);
        before - self.records.len()
    }

    /// Record at index `n`
    pub fn get(&self, n: usize) -> Option<&ErrorRecord> {
        self.records.get(n)
    }

    /// Remove and return the record at index `n`
    pub fn take(&mut self, n: usize) -> Option<ErrorRecord> {
        if n < self.records.len() {
            Some(self.records.remove(n))
        } else {
            None
        }
    }

    /// Iterate in logging order
    pub fn iter(&self) -> std::slice::Iter<'_, ErrorRecord> {
        self.records.iter()
    }

    /// Records whose severity is at least `severity`
    pub fn errors_at_least(&self, severity: Severity) -> impl Iterator<Item = &ErrorRecord> {
        self.records.iter().filter(move |r| r.severity() >= severity)
    }

    /// True if any fatal record is present
    pub fn has_fatal(&self) -> bool {
        self.records.iter().any(|r| r.severity() == Severity::Fatal)
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Serialize the log as a pretty-printed JSON array
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a ErrorLog {
    type Item = &'a ErrorRecord;
    type IntoIter = std::slice::Iter<'a, ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}
