//! XML stream layer
//!
//! Input is tokenized into an owned element tree, output goes through a writer
//! stream. The generic attribute checks that run before any element-specific
//! logic live in [`attributes`].

pub mod attributes;
pub mod input;
pub mod output;

pub use input::{ChildCursor, XmlAttribute, XmlContent, XmlDocument, XmlElement};
pub use output::{AttributeList, WriteOptions, XmlOutputStream};
