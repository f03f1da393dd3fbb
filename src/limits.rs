//! Reader limits
//!
//! Checked while the input is tokenized. Input that crosses a limit (a huge
//! file, runaway nesting, an attribute or element flood) ends the read with a
//! single `XmlResourceLimitExceeded` record instead of exhausting memory.

use crate::error::{Error, Result};

/// Resource ceilings for one read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Deepest element nesting accepted
    pub max_depth: usize,

    /// Largest input accepted, in bytes
    pub max_input_bytes: usize,

    /// Most attributes on a single element
    pub max_attributes_per_element: usize,

    /// Most namespace declarations across the whole document
    pub max_namespace_declarations: usize,

    /// Most elements in the whole document, passthrough content included
    pub max_elements: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            max_input_bytes: 100 * 1024 * 1024,
            max_attributes_per_element: 1000,
            max_namespace_declarations: 1000,
            max_elements: 5_000_000,
        }
    }
}

impl Limits {
    /// Default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Tighter limits for untrusted input
    pub fn strict() -> Self {
        Self {
            max_depth: 100,
            max_input_bytes: 10 * 1024 * 1024,
            max_attributes_per_element: 100,
            max_namespace_declarations: 100,
            max_elements: 500_000,
        }
    }

    /// Looser limits for very large whole-genome models
    pub fn permissive() -> Self {
        Self {
            max_depth: 10_000,
            max_input_bytes: 1024 * 1024 * 1024,
            max_attributes_per_element: 10_000,
            max_namespace_declarations: 10_000,
            max_elements: usize::MAX,
        }
    }

    /// Look up a named preset (`default`, `strict`, `permissive`)
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "strict" => Some(Self::strict()),
            "permissive" => Some(Self::permissive()),
            _ => None,
        }
    }

    /// Nesting depth of the element being opened
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        within("element depth", depth, self.max_depth)
    }

    /// Size of the whole input in bytes
    pub fn check_input_size(&self, bytes: usize) -> Result<()> {
        within("input size in bytes", bytes, self.max_input_bytes)
    }

    /// Attribute count of one element
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        within("attributes on one element", count, self.max_attributes_per_element)
    }

    /// Namespace declarations seen so far
    pub fn check_namespaces(&self, count: usize) -> Result<()> {
        within("namespace declarations", count, self.max_namespace_declarations)
    }

    /// Elements seen so far
    pub fn check_elements(&self, count: usize) -> Result<()> {
        within("elements", count, self.max_elements)
    }
}

fn within(what: &str, value: usize, max: usize) -> Result<()> {
    if value > max {
        return Err(Error::LimitExceeded(format!(
            "{} {} exceeds the limit of {}",
            what, value, max
        )));
    }
    Ok(())
}
