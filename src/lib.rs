//! # sbml-binding
//!
//! Attribute/element binding and validation for SBML and SED-ML documents.
//!
//! Every element type declares its attributes and children once, per
//! level/version, and delegates reading, validation and writing to a generic
//! engine. Problems in document content never abort a read: they are collected
//! as structured, position-tagged diagnostics in the document's error log.
//!
//! ## Features
//!
//! - Typed attribute records with sentinel values and explicit `is_set` state
//! - Identifier syntax (SId, UnitSId, XML ID, SBO and KiSAO terms) and uniqueness checks
//! - Per-version rule tables with exact level/version dispatch
//! - Generic diagnostics remapped to element-specific codes
//! - Notes and annotations passed through verbatim
//! - Protection against oversized or deeply nested input
//!
//! ## Example
//!
//! ```rust
//! use sbml_binding::{ErrorCode, SbmlDocument};
//!
//! let xml = r#"<sbml xmlns="http://www.sbml.org/sbml/level3/version2/core" level="3" version="2">
//!   <model id="m">
//!     <listOfParameters>
//!       <parameter id="k" value="abc" constant="true"/>
//!     </listOfParameters>
//!   </model>
//! </sbml>"#;
//!
//! let doc = SbmlDocument::read_from_str(xml);
//! assert!(doc.error_log().contains(ErrorCode::ParameterValueMustBeDouble));
//!
//! let parameter = doc.root().model().unwrap().parameters().get_by_id("k").unwrap();
//! assert!(!parameter.is_set_value());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

#[macro_use]
mod macros;

// Foundation
pub mod error;
pub mod limits;
pub mod versions;

// Utilities
pub mod names;
pub mod namespaces;

// Diagnostics and the XML stream layer
pub mod diagnostics;
pub mod xml;

// Binding engine
pub mod binding;

// Element types and documents
pub mod document;
pub mod sbml;
pub mod sedml;

// Re-exports for convenience
pub use diagnostics::{ErrorCode, ErrorLog, ErrorRecord, Severity};
pub use document::{AnyDocument, Document, RootElement, SbmlDocument, SedDocument};
pub use error::{Error, OperationError, OperationResult, Result};
pub use limits::Limits;
pub use versions::{Format, SchemaVersion};
pub use xml::WriteOptions;

/// Version of the sbml-binding library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
