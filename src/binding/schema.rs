//! Expected-attribute declarations

use indexmap::IndexMap;

/// One expected attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDeclaration {
    /// Local name
    pub name: String,
    /// Namespace URI, when the attribute must be qualified
    pub namespace_uri: Option<String>,
    /// Preferred prefix for a qualified attribute
    pub prefix: Option<String>,
}

/// Ordered, name-unique set of expected attributes for one element
///
/// Insertion order is the order attributes are written in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSchema {
    declarations: IndexMap<String, AttributeDeclaration>,
}

impl AttributeSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an expected attribute
    ///
    /// Registering a name twice keeps the first declaration and its position.
    pub fn register_expected(
        &mut self,
        name: &str,
        namespace_uri: Option<&str>,
        prefix: Option<&str>,
    ) {
        self.declarations
            .entry(name.to_string())
            .or_insert_with(|| AttributeDeclaration {
                name: name.to_string(),
                namespace_uri: namespace_uri.map(str::to_string),
                prefix: prefix.map(str::to_string),
            });
    }

    /// Whether an attribute with this local name and namespace is expected
    pub fn is_expected(&self, local_name: &str, namespace: Option<&str>) -> bool {
        self.declarations
            .get(local_name)
            .is_some_and(|d| d.namespace_uri.as_deref() == namespace)
    }

    /// Declaration for a name
    pub fn get(&self, name: &str) -> Option<&AttributeDeclaration> {
        self.declarations.get(name)
    }

    /// Declarations in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &AttributeDeclaration> {
        self.declarations.values()
    }

    /// Declared names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// True when nothing is declared
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
