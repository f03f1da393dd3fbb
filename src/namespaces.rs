//! Namespace scoping for the reader
//!
//! Each start tag opens a scope inheriting its parent's declarations. Element and
//! attribute names are resolved against the innermost scope as they are read, so
//! the element tree only ever carries resolved namespace URIs.

use crate::error::{Error, Result};
use crate::names::{is_valid_qname, split_qname};
use indexmap::IndexMap;

/// The namespace bound to the `xml` prefix
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A name after prefix resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Prefix as written, if any
    pub prefix: Option<String>,
    /// Namespace URI in force (none for unprefixed attributes)
    pub namespace: Option<String>,
    /// Local part
    pub local: String,
}

/// Prefix bindings visible at one point in the document
#[derive(Debug, Clone, Default)]
pub struct NamespaceScope {
    prefixes: IndexMap<String, String>,
    default_namespace: Option<String>,
}

impl NamespaceScope {
    /// An empty top-level scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a child scope that inherits every binding of this one
    pub fn child(&self) -> Self {
        self.clone()
    }

    /// Bind `prefix` to `namespace`, shadowing any outer binding
    pub fn bind_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the namespace of unprefixed element names
    pub fn bind_default(&mut self, namespace: impl Into<String>) {
        self.default_namespace = Some(namespace.into());
    }

    /// Namespace of unprefixed element names
    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Namespace bound to `prefix`
    pub fn lookup(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Resolve an element name; unprefixed names take the default namespace
    pub fn resolve_element(&self, name: &str) -> Result<ResolvedName> {
        self.resolve(name, self.default_namespace.as_deref())
    }

    /// Resolve an attribute name; unprefixed attributes are in no namespace
    pub fn resolve_attribute(&self, name: &str) -> Result<ResolvedName> {
        self.resolve(name, None)
    }

    fn resolve(&self, name: &str, unprefixed: Option<&str>) -> Result<ResolvedName> {
        if !is_valid_qname(name) {
            return Err(Error::Namespace(format!("'{}' is not a qualified name", name)));
        }
        let (prefix, local) = split_qname(name);
        let namespace = match prefix {
            Some(prefix) => Some(
                self.lookup(prefix)
                    .ok_or_else(|| Error::Namespace(format!("Unknown prefix: {}", prefix)))?,
            ),
            None => unprefixed,
        };
        Ok(ResolvedName {
            prefix: prefix.map(str::to_string),
            namespace: namespace.map(str::to_string),
            local: local.to_string(),
        })
    }
}
