//! Explicit read context
//!
//! Carries everything an element needs while it is being read: the active schema
//! version, the document's error log and the identifiers seen so far. Elements
//! never reach up to their document for any of this.

use super::coercion::AttributeKind;
use crate::diagnostics::{ErrorCode, ErrorLog, ErrorRecord};
use crate::versions::SchemaVersion;
use crate::xml::XmlElement;
use std::collections::HashSet;

/// State threaded through one read pass
#[derive(Debug)]
pub struct ReadContext {
    version: SchemaVersion,
    log: ErrorLog,
    ids: HashSet<String>,
    unit_ids: HashSet<String>,
    metaids: HashSet<String>,
}

impl ReadContext {
    /// Start a read at `version`, appending to `log`
    pub fn new(version: SchemaVersion, log: ErrorLog) -> Self {
        Self {
            version,
            log,
            ids: HashSet::new(),
            unit_ids: HashSet::new(),
            metaids: HashSet::new(),
        }
    }

    /// Active schema version
    pub fn version(&self) -> &SchemaVersion {
        &self.version
    }

    /// The log
    pub fn log(&self) -> &ErrorLog {
        &self.log
    }

    /// The log, mutably
    pub fn log_mut(&mut self) -> &mut ErrorLog {
        &mut self.log
    }

    /// Finish the pass and hand the log back
    pub fn into_log(self) -> ErrorLog {
        self.log
    }

    /// Log `code` at the position of `element`, returning the record's index
    pub fn report(&mut self, code: ErrorCode, message: impl Into<String>, element: &XmlElement) -> usize {
        let record = ErrorRecord::new(code, message)
            .at(element.line(), element.column())
            .for_version(self.version.level(), self.version.version());
        self.log.log(record)
    }

    /// Log `code` carrying the position and message of an earlier record
    pub fn relog(&mut self, code: ErrorCode, original: &ErrorRecord) -> usize {
        self.relog_with(code, original.message().to_string(), original)
    }

    /// Log `code` with a new message at the position of an earlier record
    pub fn relog_with(&mut self, code: ErrorCode, message: String, original: &ErrorRecord) -> usize {
        tracing::trace!(
            from = original.code().number(),
            to = code.number(),
            "remapped diagnostic"
        );
        let record = ErrorRecord::new(code, message)
            .at(original.line(), original.column())
            .for_version(self.version.level(), self.version.version());
        self.log.log(record)
    }

    /// Record an identifier value, logging a duplicate if it was seen before
    pub fn register_identifier(&mut self, kind: AttributeKind, value: &str, element: &XmlElement) {
        let (seen, code) = match kind {
            AttributeKind::SId => (&mut self.ids, ErrorCode::DuplicateComponentId),
            AttributeKind::UnitSId => (&mut self.unit_ids, ErrorCode::DuplicateUnitDefinitionId),
            AttributeKind::MetaId => (&mut self.metaids, ErrorCode::DuplicateMetaId),
            _ => return,
        };
        if !seen.insert(value.to_string()) {
            self.report(
                code,
                format!(
                    "The identifier '{}' on the <{}> element is already used by another component.",
                    value,
                    element.name()
                ),
                element,
            );
        }
    }
}
