//! Error types for sbml-binding
//!
//! Two disciplines live side by side. [`Error`] is returned by operations that can
//! genuinely fail as a whole (constructing a document for an unsupported
//! level/version, writing a file). Problems found in document *content* never use
//! it: they become entries in the [`ErrorLog`](crate::diagnostics::ErrorLog).
//! [`OperationError`] is the status returned by attribute and child setters.

use crate::versions::Format;
use thiserror::Error;

/// Result type alias using the library [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sbml-binding operations
#[derive(Error, Debug)]
pub enum Error {
    /// The (format, level, version, package version) combination is not supported
    #[error("{format} level {level} version {version} (package version {package_version}) is not supported")]
    InvalidLevelVersion {
        /// Document format
        format: Format,
        /// Requested level
        level: u32,
        /// Requested version
        version: u32,
        /// Requested package version
        package_version: u32,
    },

    /// No rule set is registered for an element at the active version
    #[error("no rules registered for <{element}> at {version}")]
    UnsupportedVariant {
        /// Element name
        element: &'static str,
        /// Human readable version key
        version: String,
    },

    /// Name error (invalid identifier syntax)
    #[error("name error: {0}")]
    Name(String),

    /// Namespace error
    #[error("namespace error: {0}")]
    Namespace(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// XML tokenizer or writer error
    #[error("XML error: {message}")]
    Xml {
        /// Error message
        message: String,
        /// 1-based line of the failure, when known
        line: u32,
        /// 1-based column of the failure, when known
        column: u32,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A setter rejected a value while building a document
    #[error("operation error: {0}")]
    Operation(#[from] OperationError),
}

impl Error {
    /// Create an XML error without position information
    pub fn xml(message: impl Into<String>) -> Self {
        Error::Xml {
            message: message.into(),
            line: 0,
            column: 0,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::xml(err.to_string())
    }
}

/// Status of a setter, unsetter or child mutation on an element node
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// The value does not satisfy the attribute's syntax or domain
    #[error("invalid attribute value")]
    InvalidAttributeValue,

    /// The operation could not be completed
    #[error("operation failed")]
    OperationFailed,

    /// The element has no attribute of that name
    #[error("unexpected attribute")]
    UnexpectedAttribute,

    /// A list index was out of range
    #[error("index out of range")]
    IndexOutOfRange,

    /// The object belongs to a different level/version than its new parent
    #[error("level/version mismatch")]
    LevelVersionMismatch,
}

/// Result of a setter or unsetter
pub type OperationResult = std::result::Result<(), OperationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_version_display() {
        let err = Error::InvalidLevelVersion {
            format: Format::Sbml,
            level: 2,
            version: 9,
            package_version: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("SBML level 2 version 9"));
        assert!(msg.contains("not supported"));
    }

    #[test]
    fn test_xml_error_without_position() {
        let err = Error::xml("unexpected end of file");
        match err {
            Error::Xml { line, column, .. } => {
                assert_eq!(line, 0);
                assert_eq!(column, 0);
            }
            other => panic!("expected Error::Xml, got {other:?}"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_operation_error_display() {
        assert_eq!(
            OperationError::InvalidAttributeValue.to_string(),
            "invalid attribute value"
        );
        let status: OperationResult = Err(OperationError::OperationFailed);
        assert!(status.is_err());
    }
}
