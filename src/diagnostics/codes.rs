//! Diagnostic codes
//!
//! Every code is declared exactly once in the table below together with its
//! number, severity, category and short message. Numbers are namespaced by range:
//! `0..10000` for the XML layer, `10000..100000` for SBML core and the generic
//! binder, `300000..` for SED-ML.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    /// Informational
    Info,
    /// Suspicious but legal content
    Warning,
    /// Invalid content; reading continued
    Error,
    /// Reading could not produce a meaningful tree
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        };
        f.write_str(s)
    }
}

/// Broad classification of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// Defect in the rule tables themselves
    Internal,
    /// Operating system problem (file access)
    System,
    /// XML well-formedness and tokenizer problems
    Xml,
    /// Problems shared by every element type
    General,
    /// Identifier syntax and uniqueness
    Identifier,
    /// SBML element rules
    Sbml,
    /// SED-ML element rules
    SedMl,
}

macro_rules! error_codes {
    ($($name:ident = $number:literal, $severity:ident, $category:ident, $message:literal;)*) => {
        /// Closed set of diagnostic codes
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum ErrorCode {
            $(
                #[doc = $message]
                $name,
            )*
        }

        impl ErrorCode {
            /// Every code, in table order
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$name),*];

            /// Numeric code
            pub fn number(self) -> u32 {
                match self {
                    $(ErrorCode::$name => $number,)*
                }
            }

            /// Fixed severity
            pub fn severity(self) -> Severity {
                match self {
                    $(ErrorCode::$name => Severity::$severity,)*
                }
            }

            /// Fixed category
            pub fn category(self) -> Category {
                match self {
                    $(ErrorCode::$name => Category::$category,)*
                }
            }

            /// One-line description
            pub fn short_message(self) -> &'static str {
                match self {
                    $(ErrorCode::$name => $message,)*
                }
            }

            /// Symbolic name
            pub fn name(self) -> &'static str {
                match self {
                    $(ErrorCode::$name => stringify!($name),)*
                }
            }
        }
    };
}

error_codes! {
    // XML layer
    XmlUnknownError = 0, Fatal, Xml, "Unknown XML error";
    XmlFileUnreadable = 2, Fatal, System, "File unreadable";
    XmlFileUnwritable = 3, Fatal, System, "File unwritable";
    XmlResourceLimitExceeded = 7, Fatal, Xml, "Reader resource limit exceeded";
    BadlyFormedXml = 1006, Fatal, Xml, "Badly formed XML";
    XmlAttributeTypeMismatch = 1016, Error, Xml, "Attribute value has the wrong type";
    BadXmlDocumentStructure = 1028, Fatal, Xml, "Bad XML document structure";

    // Shared by every element type
    UnrecognizedElement = 10102, Error, General, "Unrecognized element";
    DuplicateComponentId = 10301, Error, Identifier, "Duplicate 'id' attribute value";
    DuplicateUnitDefinitionId = 10302, Error, Identifier, "Duplicate unit definition 'id' value";
    DuplicateMetaId = 10307, Error, Identifier, "Duplicate 'metaid' attribute value";
    InvalidSboTermSyntax = 10308, Error, Identifier, "Invalid 'sboTerm' attribute syntax";
    InvalidMetaidSyntax = 10309, Error, Identifier, "Invalid 'metaid' attribute syntax";
    InvalidIdSyntax = 10310, Error, Identifier, "Invalid 'id' attribute syntax";
    InvalidUnitIdSyntax = 10311, Error, Identifier, "Invalid unit identifier syntax";
    EmptyStringIdentifier = 10313, Info, Identifier, "Empty string used as an identifier";
    MultipleAnnotationElements = 10404, Error, General, "Only one <annotation> element is permitted";
    ListOfAllowedCoreAttributes = 10501, Error, General, "Attribute not allowed on a listOf element";
    ListOfAllowedAttributes = 10502, Error, General, "Attribute not allowed on a listOf element";
    ListOfAllowedElements = 10503, Error, General, "Element not allowed inside this listOf element";
    MultipleNotesElements = 10805, Error, General, "Only one <notes> element is permitted";
    InvalidRootNamespace = 20101, Error, General, "Root element namespace does not match its level and version";
    InvalidLevelVersion = 20102, Error, General, "Unsupported level and version";
    UnknownCoreAttribute = 99994, Error, General, "Unknown core attribute";
    UnknownAttribute = 99995, Error, General, "Unknown attribute";
    UnsupportedSchemaVariant = 99999, Fatal, Internal, "No rule set for this level, version and package version";

    // SBML <sbml>
    SbmlAllowedCoreAttributes = 20111, Error, Sbml, "Core attribute not allowed on <sbml>";
    SbmlAllowedElements = 20112, Error, Sbml, "Element not allowed on <sbml>";
    SbmlAllowedAttributes = 20113, Error, Sbml, "Attribute not allowed on <sbml> or required attribute missing";
    SbmlLevelMustBeNonNegativeInteger = 20114, Error, Sbml, "The 'level' attribute must be a non-negative integer";
    SbmlVersionMustBeNonNegativeInteger = 20115, Error, Sbml, "The 'version' attribute must be a non-negative integer";

    // SBML <model>
    ModelAllowedCoreAttributes = 20221, Error, Sbml, "Core attribute not allowed on <model>";
    ModelAllowedElements = 20222, Error, Sbml, "Element not allowed on <model>";
    ModelAllowedAttributes = 20223, Error, Sbml, "Attribute not allowed on <model> or required attribute missing";
    ModelTimeUnitsMustBeUnitSId = 20224, Error, Sbml, "The 'timeUnits' attribute must be a UnitSIdRef";
    ModelExtentUnitsMustBeUnitSId = 20225, Error, Sbml, "The 'extentUnits' attribute must be a UnitSIdRef";
    ModelConversionFactorMustBeSId = 20226, Error, Sbml, "The 'conversionFactor' attribute must be an SIdRef";

    // SBML <unitDefinition> and <unit>
    UnitDefinitionAllowedCoreAttributes = 20419, Error, Sbml, "Core attribute not allowed on <unitDefinition>";
    UnitDefinitionAllowedElements = 20420, Error, Sbml, "Element not allowed on <unitDefinition>";
    UnitDefinitionAllowedAttributes = 20421, Error, Sbml, "Attribute not allowed on <unitDefinition> or required attribute missing";
    UnitAllowedCoreAttributes = 20426, Error, Sbml, "Core attribute not allowed on <unit>";
    UnitAllowedAttributes = 20427, Error, Sbml, "Attribute not allowed on <unit> or required attribute missing";
    UnitKindMustBeUnitKind = 20428, Error, Sbml, "The 'kind' attribute must be a predefined unit kind";
    UnitExponentMustBeDouble = 20429, Error, Sbml, "The 'exponent' attribute must be a double";
    UnitScaleMustBeInteger = 20430, Error, Sbml, "The 'scale' attribute must be an integer";
    UnitMultiplierMustBeDouble = 20431, Error, Sbml, "The 'multiplier' attribute must be a double";

    // SBML <compartment>
    CompartmentAllowedCoreAttributes = 20517, Error, Sbml, "Core attribute not allowed on <compartment>";
    CompartmentAllowedAttributes = 20518, Error, Sbml, "Attribute not allowed on <compartment> or required attribute missing";
    CompartmentSpatialDimensionsMustBeDouble = 20519, Error, Sbml, "The 'spatialDimensions' attribute must be a double";
    CompartmentSizeMustBeDouble = 20520, Error, Sbml, "The 'size' attribute must be a double";
    CompartmentUnitsMustBeUnitSId = 20521, Error, Sbml, "The 'units' attribute must be a UnitSIdRef";
    CompartmentConstantMustBeBoolean = 20522, Error, Sbml, "The 'constant' attribute must be a boolean";

    // SBML <parameter>
    ParameterAllowedCoreAttributes = 20701, Error, Sbml, "Core attribute not allowed on <parameter>";
    ParameterAllowedAttributes = 20702, Error, Sbml, "Attribute not allowed on <parameter> or required attribute missing";
    ParameterValueMustBeDouble = 20703, Error, Sbml, "The 'value' attribute must be a double";
    ParameterUnitsMustBeUnitSId = 20704, Error, Sbml, "The 'units' attribute must be a UnitSIdRef";
    ParameterConstantMustBeBoolean = 20705, Error, Sbml, "The 'constant' attribute must be a boolean";

    // SBML <event>, <trigger>, <eventAssignment>
    EventAllowedCoreAttributes = 21101, Error, Sbml, "Core attribute not allowed on <event>";
    EventAllowedElements = 21102, Error, Sbml, "Element not allowed on <event>";
    EventAllowedAttributes = 21103, Error, Sbml, "Attribute not allowed on <event> or required attribute missing";
    EventUseValuesFromTriggerTimeMustBeBoolean = 21104, Error, Sbml, "The 'useValuesFromTriggerTime' attribute must be a boolean";
    EventAssignmentAllowedCoreAttributes = 21211, Error, Sbml, "Core attribute not allowed on <eventAssignment>";
    EventAssignmentAllowedAttributes = 21212, Error, Sbml, "Attribute not allowed on <eventAssignment> or required attribute missing";
    EventAssignmentVariableMustBeSId = 21213, Error, Sbml, "The 'variable' attribute must be an SIdRef";
    TriggerAllowedCoreAttributes = 21226, Error, Sbml, "Core attribute not allowed on <trigger>";
    TriggerAllowedAttributes = 21227, Error, Sbml, "Attribute not allowed on <trigger> or required attribute missing";
    TriggerInitialValueMustBeBoolean = 21228, Error, Sbml, "The 'initialValue' attribute must be a boolean";
    TriggerPersistentMustBeBoolean = 21229, Error, Sbml, "The 'persistent' attribute must be a boolean";

    // SED-ML <sedML>
    SedmlAllowedCoreAttributes = 320101, Error, SedMl, "Core attribute not allowed on <sedML>";
    SedmlAllowedAttributes = 320102, Error, SedMl, "Attribute not allowed on <sedML> or required attribute missing";
    SedmlAllowedElements = 320103, Error, SedMl, "Element not allowed on <sedML>";
    SedmlLevelMustBeInteger = 320104, Error, SedMl, "The 'level' attribute must be a non-negative integer";
    SedmlVersionMustBeInteger = 320105, Error, SedMl, "The 'version' attribute must be a non-negative integer";

    // SED-ML <uniformTimeCourse>
    UniformTimeCourseAllowedCoreAttributes = 320501, Error, SedMl, "Core attribute not allowed on <uniformTimeCourse>";
    UniformTimeCourseAllowedAttributes = 320502, Error, SedMl, "Attribute not allowed on <uniformTimeCourse> or required attribute missing";
    UniformTimeCourseAllowedElements = 320503, Error, SedMl, "Element not allowed on <uniformTimeCourse>";
    UniformTimeCourseInitialTimeMustBeDouble = 320504, Error, SedMl, "The 'initialTime' attribute must be a double";
    UniformTimeCourseOutputStartTimeMustBeDouble = 320505, Error, SedMl, "The 'outputStartTime' attribute must be a double";
    UniformTimeCourseOutputEndTimeMustBeDouble = 320506, Error, SedMl, "The 'outputEndTime' attribute must be a double";
    UniformTimeCourseNumberOfPointsMustBeInteger = 320507, Error, SedMl, "The 'numberOfPoints' attribute must be a non-negative integer";
    UniformTimeCourseNumberOfStepsMustBeInteger = 320508, Error, SedMl, "The 'numberOfSteps' attribute must be a non-negative integer";

    // SED-ML <algorithm>
    AlgorithmAllowedCoreAttributes = 320601, Error, SedMl, "Core attribute not allowed on <algorithm>";
    AlgorithmAllowedAttributes = 320602, Error, SedMl, "Attribute not allowed on <algorithm> or required attribute missing";
    AlgorithmKisaoIdMustBeKisaoTerm = 320603, Error, SedMl, "The 'kisaoID' attribute must be a KiSAO term reference";
}

lazy_static! {
    static ref BY_NUMBER: HashMap<u32, ErrorCode> = ErrorCode::ALL
        .iter()
        .map(|code| (code.number(), *code))
        .collect();
}

impl ErrorCode {
    /// Look a code up by its number
    pub fn from_number(number: u32) -> Option<ErrorCode> {
        BY_NUMBER.get(&number).copied()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
