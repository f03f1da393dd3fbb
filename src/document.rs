//! Documents
//!
//! A document owns the root element, the active schema version and the error
//! log. Reading always produces a document: anything that goes wrong, from an
//! unreadable file to a misspelled attribute, ends up in the log.

use crate::binding::{bind_element, write_element_with, AttributeBindable, ChildBindable, Node, ReadContext};
use crate::diagnostics::{ErrorCode, ErrorLog, ErrorRecord, Severity};
use crate::error::{Error, OperationResult, Result};
use crate::limits::Limits;
use crate::sbml::Sbml;
use crate::sedml::SedMl;
use crate::versions::{Format, SchemaVersion};
use crate::xml::{AttributeList, WriteOptions, XmlDocument, XmlElement, XmlOutputStream};
use std::fmt;
use std::path::Path;

/// Root element of a document format
pub trait RootElement: AttributeBindable + ChildBindable + Default + Clone + fmt::Debug {
    /// Format this element is the root of
    const FORMAT: Format;

    /// Write `version`'s level and version into the root's attributes
    fn stamp_version(&mut self, version: &SchemaVersion) -> OperationResult;
}

/// A document of one format
#[derive(Debug, Clone)]
pub struct Document<R: RootElement> {
    root: R,
    version: SchemaVersion,
    log: ErrorLog,
}

/// SBML document
pub type SbmlDocument = Document<Sbml>;

/// SED-ML document
pub type SedDocument = Document<SedMl>;

impl<R: RootElement> Document<R> {
    /// Create an empty document at the given level and version
    pub fn new(level: u32, version: u32) -> Result<Self> {
        let version = SchemaVersion::new(R::FORMAT, level, version, 1)?;
        Self::with_version(version)
    }

    /// Create an empty document at `version`
    pub fn with_version(version: SchemaVersion) -> Result<Self> {
        if version.format() != R::FORMAT {
            return Err(Error::InvalidLevelVersion {
                format: R::FORMAT,
                level: version.level(),
                version: version.version(),
                package_version: version.package_version(),
            });
        }
        let mut root = R::default();
        root.stamp_version(&version)?;
        Ok(Self {
            root,
            version,
            log: ErrorLog::new(),
        })
    }

    /// Read a document from text with default limits
    pub fn read_from_str(xml: &str) -> Self {
        Self::read_from_str_with_limits(xml, &Limits::default())
    }

    /// Read a document from text
    pub fn read_from_str_with_limits(xml: &str, limits: &Limits) -> Self {
        Self::from_parsed(XmlDocument::parse(xml, limits))
    }

    /// Read a document from a file with default limits
    pub fn read_from_file(path: impl AsRef<Path>) -> Self {
        Self::read_from_file_with_limits(path, &Limits::default())
    }

    /// Read a document from a file
    pub fn read_from_file_with_limits(path: impl AsRef<Path>, limits: &Limits) -> Self {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading document");
        Self::from_parsed(read_file(path, limits))
    }

    fn from_parsed(parsed: Result<XmlDocument>) -> Self {
        match parsed {
            Ok(xml) => Self::bind_root(xml.root(), ErrorLog::new()),
            Err(err) => {
                let mut log = ErrorLog::new();
                log.log(record_for_error(&err));
                Self {
                    root: R::default(),
                    version: SchemaVersion::latest(R::FORMAT),
                    log,
                }
            }
        }
    }

    fn bind_root(element: &XmlElement, mut log: ErrorLog) -> Self {
        let latest = SchemaVersion::latest(R::FORMAT);
        let expected = R::FORMAT.root_element();
        if element.name() != expected {
            log.log(
                ErrorRecord::new(
                    ErrorCode::BadXmlDocumentStructure,
                    format!(
                        "The root element must be <{}>, not <{}>.",
                        expected,
                        element.name()
                    ),
                )
                .at(element.line(), element.column()),
            );
            return Self {
                root: R::default(),
                version: latest,
                log,
            };
        }

        let (version, fell_back) = detect_version(R::FORMAT, element, &mut log);
        if !fell_back && element.namespace() != Some(version.namespace_uri()) {
            log.log(
                ErrorRecord::new(
                    ErrorCode::InvalidRootNamespace,
                    format!(
                        "The namespace '{}' does not match {}; expected '{}'.",
                        element.namespace().unwrap_or_default(),
                        version,
                        version.namespace_uri()
                    ),
                )
                .at(element.line(), element.column())
                .for_version(version.level(), version.version()),
            );
        }

        let mut ctx = ReadContext::new(version, log);
        let mut root = R::default();
        bind_element(&mut root, element, &mut ctx);
        let log = ctx.into_log();

        if fell_back {
            if let Err(err) = root.stamp_version(&version) {
                tracing::warn!(%err, "could not stamp fallback version on root");
            }
        }

        tracing::debug!(%version, diagnostics = log.len(), "document read");
        Self { root, version, log }
    }

    /// Write the document with default options
    pub fn write_to_string(&self) -> Result<String> {
        self.write_to_string_with(&WriteOptions::default())
    }

    /// Write the document
    pub fn write_to_string_with(&self, options: &WriteOptions) -> Result<String> {
        let mut out = XmlOutputStream::new(options)?;
        let mut leading = AttributeList::new();
        leading.push_text("xmlns", None, self.version.namespace_uri());
        write_element_with(&self.root, &mut out, &self.version, leading)?;
        tracing::debug!(version = %self.version, "document written");
        out.into_string()
    }

    /// Write the document to a file
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = self.write_to_string()?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }

    /// Root element
    pub fn root(&self) -> &R {
        &self.root
    }

    /// Root element, mutably
    pub fn root_mut(&mut self) -> &mut R {
        &mut self.root
    }

    /// Active schema version
    pub fn version(&self) -> &SchemaVersion {
        &self.version
    }

    /// Diagnostics collected so far
    pub fn error_log(&self) -> &ErrorLog {
        &self.log
    }

    /// Diagnostics, mutably
    pub fn error_log_mut(&mut self) -> &mut ErrorLog {
        &mut self.log
    }

    /// Number of diagnostics, optionally only those of one severity
    pub fn num_errors(&self, severity: Option<Severity>) -> usize {
        match severity {
            Some(severity) => self.log.count(severity),
            None => self.log.len(),
        }
    }

    /// Every required attribute in the tree is set
    pub fn has_required_attributes(&self) -> bool {
        self.root.has_required_attributes(&self.version)
    }

    /// Every required child element in the tree is present
    pub fn has_required_elements(&self) -> bool {
        self.root.has_required_elements(&self.version)
    }
}

/// Determine the version of a root element
///
/// `level`/`version` attributes win, then the namespace, then the format's most
/// recent version. Returns `true` alongside the version when an unsupported
/// pair forced the fallback.
fn detect_version(format: Format, element: &XmlElement, log: &mut ErrorLog) -> (SchemaVersion, bool) {
    let parse = |name: &str| element.attribute(name).and_then(|v| v.trim().parse::<u32>().ok());
    if let (Some(level), Some(version)) = (parse("level"), parse("version")) {
        return match SchemaVersion::new(format, level, version, 1) {
            Ok(version) => (version, false),
            Err(err) => {
                let latest = SchemaVersion::latest(format);
                log.log(
                    ErrorRecord::new(
                        ErrorCode::InvalidLevelVersion,
                        format!("{}; reading as {} instead.", err, latest),
                    )
                    .at(element.line(), element.column()),
                );
                (latest, true)
            }
        };
    }

    let from_namespace = element
        .namespace()
        .and_then(SchemaVersion::from_namespace)
        .filter(|version| version.format() == format);
    (from_namespace.unwrap_or_else(|| SchemaVersion::latest(format)), false)
}

fn read_file(path: &Path, limits: &Limits) -> Result<XmlDocument> {
    let metadata = std::fs::metadata(path)?;
    limits.check_input_size(metadata.len() as usize)?;
    let text = std::fs::read_to_string(path)?;
    XmlDocument::parse(&text, limits)
}

fn record_for_error(err: &Error) -> ErrorRecord {
    match err {
        Error::Xml {
            message,
            line,
            column,
        } => ErrorRecord::new(ErrorCode::BadlyFormedXml, message.clone()).at(*line, *column),
        Error::LimitExceeded(message) => {
            ErrorRecord::new(ErrorCode::XmlResourceLimitExceeded, message.clone())
        }
        Error::Io(io) => ErrorRecord::new(ErrorCode::XmlFileUnreadable, io.to_string()),
        other => ErrorRecord::new(ErrorCode::XmlUnknownError, other.to_string()),
    }
}

/// A document of either format, chosen by its root element
#[derive(Debug, Clone)]
pub enum AnyDocument {
    /// `<sbml>` root
    Sbml(SbmlDocument),
    /// `<sedML>` root
    SedMl(SedDocument),
}

impl AnyDocument {
    /// Read text with default limits
    pub fn read_from_str(xml: &str) -> Self {
        Self::read_from_str_with_limits(xml, &Limits::default())
    }

    /// Read text
    pub fn read_from_str_with_limits(xml: &str, limits: &Limits) -> Self {
        Self::from_parsed(XmlDocument::parse(xml, limits))
    }

    /// Read a file with default limits
    pub fn read_from_file(path: impl AsRef<Path>) -> Self {
        Self::read_from_file_with_limits(path, &Limits::default())
    }

    /// Read a file
    pub fn read_from_file_with_limits(path: impl AsRef<Path>, limits: &Limits) -> Self {
        Self::from_parsed(read_file(path.as_ref(), limits))
    }

    // Anything that is not recognisably SED-ML is read as SBML so the
    // failure lands in a log
    fn from_parsed(parsed: Result<XmlDocument>) -> Self {
        match parsed {
            Ok(xml) if xml.root().name() == Format::SedMl.root_element() => {
                AnyDocument::SedMl(SedDocument::bind_root(xml.root(), ErrorLog::new()))
            }
            other => AnyDocument::Sbml(SbmlDocument::from_parsed(other)),
        }
    }

    /// Format of the document
    pub fn format(&self) -> Format {
        match self {
            AnyDocument::Sbml(_) => Format::Sbml,
            AnyDocument::SedMl(_) => Format::SedMl,
        }
    }

    /// Active schema version
    pub fn version(&self) -> &SchemaVersion {
        match self {
            AnyDocument::Sbml(doc) => doc.version(),
            AnyDocument::SedMl(doc) => doc.version(),
        }
    }

    /// Diagnostics
    pub fn error_log(&self) -> &ErrorLog {
        match self {
            AnyDocument::Sbml(doc) => doc.error_log(),
            AnyDocument::SedMl(doc) => doc.error_log(),
        }
    }

    /// Number of diagnostics, optionally only those of one severity
    pub fn num_errors(&self, severity: Option<Severity>) -> usize {
        match self {
            AnyDocument::Sbml(doc) => doc.num_errors(severity),
            AnyDocument::SedMl(doc) => doc.num_errors(severity),
        }
    }

    /// Root element as a tree node
    pub fn root_node(&self) -> &dyn Node {
        match self {
            AnyDocument::Sbml(doc) => doc.root() as &dyn Node,
            AnyDocument::SedMl(doc) => doc.root() as &dyn Node,
        }
    }

    /// Every required attribute in the tree is set
    pub fn has_required_attributes(&self) -> bool {
        self.root_node().has_required_attributes(self.version())
    }

    /// Every required child element in the tree is present
    pub fn has_required_elements(&self) -> bool {
        self.root_node().has_required_elements(self.version())
    }

    /// Write the document with default options
    pub fn write_to_string(&self) -> Result<String> {
        match self {
            AnyDocument::Sbml(doc) => doc.write_to_string(),
            AnyDocument::SedMl(doc) => doc.write_to_string(),
        }
    }

    /// Write the document to a file
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        match self {
            AnyDocument::Sbml(doc) => doc.write_to_file(path),
            AnyDocument::SedMl(doc) => doc.write_to_file(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_unsupported_pair() {
        assert!(SbmlDocument::new(3, 2).is_ok());
        assert!(matches!(
            SbmlDocument::new(2, 4),
            Err(Error::InvalidLevelVersion { level: 2, .. })
        ));
        assert!(SedDocument::new(3, 2).is_err());
    }

    #[test]
    fn test_with_version_rejects_other_format() {
        let sedml = SchemaVersion::latest(Format::SedMl);
        assert!(SbmlDocument::with_version(sedml).is_err());
    }

    #[test]
    fn test_detect_version_from_namespace() {
        let element = XmlElement::new("sbml").in_namespace("http://www.sbml.org/sbml/level3/version1/core");
        let mut log = ErrorLog::new();
        let (version, fell_back) = detect_version(Format::Sbml, &element, &mut log);
        assert_eq!((version.level(), version.version()), (3, 1));
        assert!(!fell_back);
        assert!(log.is_empty());
    }

    #[test]
    fn test_record_for_error() {
        let record = record_for_error(&Error::Xml {
            message: "bad".into(),
            line: 4,
            column: 2,
        });
        assert_eq!(record.code(), ErrorCode::BadlyFormedXml);
        assert_eq!((record.line(), record.column()), (4, 2));
        assert_eq!(
            record_for_error(&Error::LimitExceeded("deep".into())).code(),
            ErrorCode::XmlResourceLimitExceeded
        );
    }
}
