//! A single diagnostic

use super::codes::{Category, ErrorCode, Severity};
use serde::Serialize;
use std::fmt;

/// One structured, position-tagged diagnostic
///
/// Records are built once and never modified; the remap pattern removes a record
/// from the log and logs a new one instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    code: ErrorCode,
    number: u32,
    severity: Severity,
    category: Category,
    line: u32,
    column: u32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
}

impl ErrorRecord {
    /// Create a record for `code` with a free-text detail message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            number: code.number(),
            severity: code.severity(),
            category: code.category(),
            line: 0,
            column: 0,
            message: message.into(),
            level: None,
            version: None,
        }
    }

    /// Set the 1-based source position
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    /// Set the level/version that was active when the record was produced
    pub fn for_version(mut self, level: u32, version: u32) -> Self {
        self.level = Some(level);
        self.version = Some(version);
        self
    }

    /// Diagnostic code
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Severity, fixed by the code
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Category, fixed by the code
    pub fn category(&self) -> Category {
        self.category
    }

    /// Source line (0 when unknown)
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Source column (0 when unknown)
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Free-text detail
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Level active when the record was produced
    pub fn level(&self) -> Option<u32> {
        self.level
    }

    /// Version active when the record was produced
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// True for `Error` and `Fatal` records
    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}:{}: ({} [{}]) {}",
            self.line,
            self.column,
            self.number,
            self.severity,
            self.code.short_message()
        )?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}
