//! Level/version/package-version bookkeeping
//!
//! Every rule set in the binding engine is keyed by a (level, version, package
//! version) triple. A [`SchemaVersion`] can only be constructed for a triple that
//! appears in [`SUPPORTED_VERSIONS`], so the rest of the engine may treat a missing
//! rule set as a schema-generation defect rather than a data problem.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Markup format family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Format {
    /// Systems Biology Markup Language
    Sbml,
    /// Simulation Experiment Description Markup Language
    SedMl,
}

impl Format {
    /// Name of the root element of a document in this format
    pub fn root_element(&self) -> &'static str {
        match self {
            Format::Sbml => "sbml",
            Format::SedMl => "sedML",
        }
    }

    /// Get the format as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Sbml => "SBML",
            Format::SedMl => "SED-ML",
        }
    }

    /// Names that are core attributes at some level/version of this format
    pub fn core_attribute_names(&self) -> &'static [&'static str] {
        match self {
            Format::Sbml => &["metaid", "sboTerm", "id", "name"],
            Format::SedMl => &["metaid", "id", "name"],
        }
    }

    /// Attribute names every element of this format may carry at the given
    /// level/version, in write order
    fn core_attributes(&self, level: u32, version: u32) -> &'static [&'static str] {
        match (self, level, version) {
            (Format::Sbml, 3, 1) => &["metaid", "sboTerm"],
            (Format::Sbml, _, _) => &["metaid", "sboTerm", "id", "name"],
            (Format::SedMl, _, _) => &["metaid", "id", "name"],
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key used by rule tables: an exact (level, version, package version) triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionKey {
    /// Level
    pub level: u32,
    /// Version within the level
    pub version: u32,
    /// Package version
    pub package_version: u32,
}

impl VersionKey {
    /// Create a new key
    pub const fn new(level: u32, version: u32, package_version: u32) -> Self {
        Self {
            level,
            version,
            package_version,
        }
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L{}V{} (package version {})",
            self.level, self.version, self.package_version
        )
    }
}

/// SBML Level 3 Version 1
pub const SBML_L3V1: VersionKey = VersionKey::new(3, 1, 1);
/// SBML Level 3 Version 2
pub const SBML_L3V2: VersionKey = VersionKey::new(3, 2, 1);
/// SED-ML Level 1 Version 2
pub const SEDML_L1V2: VersionKey = VersionKey::new(1, 2, 1);
/// SED-ML Level 1 Version 3
pub const SEDML_L1V3: VersionKey = VersionKey::new(1, 3, 1);

/// Supported (format, key, namespace URI) combinations
pub const SUPPORTED_VERSIONS: &[(Format, VersionKey, &str)] = &[
    (
        Format::Sbml,
        SBML_L3V1,
        "http://www.sbml.org/sbml/level3/version1/core",
    ),
    (
        Format::Sbml,
        SBML_L3V2,
        "http://www.sbml.org/sbml/level3/version2/core",
    ),
    (
        Format::SedMl,
        SEDML_L1V2,
        "http://sed-ml.org/sed-ml/level1/version2",
    ),
    (
        Format::SedMl,
        SEDML_L1V3,
        "http://sed-ml.org/sed-ml/level1/version3",
    ),
];

/// The active schema version of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaVersion {
    format: Format,
    key: VersionKey,
    namespace: &'static str,
}

impl SchemaVersion {
    /// Create a schema version, failing for unsupported combinations
    pub fn new(format: Format, level: u32, version: u32, package_version: u32) -> Result<Self> {
        let key = VersionKey::new(level, version, package_version);
        SUPPORTED_VERSIONS
            .iter()
            .find(|(f, k, _)| *f == format && *k == key)
            .map(|(format, key, namespace)| Self {
                format: *format,
                key: *key,
                namespace: *namespace,
            })
            .ok_or(Error::InvalidLevelVersion {
                format,
                level,
                version,
                package_version,
            })
    }

    /// The most recent supported version of a format
    pub fn latest(format: Format) -> Self {
        let (format, key, namespace) = SUPPORTED_VERSIONS
            .iter()
            .rev()
            .find(|(f, _, _)| *f == format)
            .copied()
            .unwrap_or(SUPPORTED_VERSIONS[0]);
        Self {
            format,
            key,
            namespace,
        }
    }

    /// Find the version whose namespace URI matches
    pub fn from_namespace(uri: &str) -> Option<Self> {
        SUPPORTED_VERSIONS
            .iter()
            .find(|(_, _, ns)| *ns == uri)
            .map(|(format, key, namespace)| Self {
                format: *format,
                key: *key,
                namespace: *namespace,
            })
    }

    /// Document format
    pub fn format(&self) -> Format {
        self.format
    }

    /// Level
    pub fn level(&self) -> u32 {
        self.key.level
    }

    /// Version within the level
    pub fn version(&self) -> u32 {
        self.key.version
    }

    /// Package version
    pub fn package_version(&self) -> u32 {
        self.key.package_version
    }

    /// Rule-table key
    pub fn key(&self) -> VersionKey {
        self.key
    }

    /// Namespace URI of the core namespace
    pub fn namespace_uri(&self) -> &'static str {
        self.namespace
    }

    /// Attribute names every element may carry at this version
    pub fn core_attributes(&self) -> &'static [&'static str] {
        self.format
            .core_attributes(self.key.level, self.key.version)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format, self.key)
    }
}
