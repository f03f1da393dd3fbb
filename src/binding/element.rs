//! Element capabilities
//!
//! Concrete element types implement [`AttributeBindable`] for their attribute
//! records and [`ChildBindable`] for their owned children. Everything else
//! (reading, writing, the required-content predicates) is provided generically.

use super::coercion::TypedValue;
use super::context::ReadContext;
use super::record::{MetaId, Plain, SId, SboTerm, TextAttribute};
use super::rules::ElementRules;
use crate::error::{OperationError, OperationResult, Result};
use crate::versions::SchemaVersion;
use crate::xml::{XmlElement, XmlOutputStream};

/// Attributes and passthrough content shared by every element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Core {
    metaid: TextAttribute<MetaId>,
    sbo_term: TextAttribute<SboTerm>,
    id: TextAttribute<SId>,
    name: TextAttribute<Plain>,
    notes: Option<XmlElement>,
    annotation: Option<XmlElement>,
}

impl Core {
    /// `metaid` (empty when unset)
    pub fn metaid(&self) -> &str {
        self.metaid.get()
    }

    /// Whether `metaid` is set
    pub fn is_set_metaid(&self) -> bool {
        self.metaid.is_set()
    }

    /// Set `metaid`; must be an XML ID
    pub fn set_metaid(&mut self, metaid: &str) -> OperationResult {
        self.metaid.set(metaid)
    }

    /// Unset `metaid`
    pub fn unset_metaid(&mut self) -> OperationResult {
        self.metaid.unset()
    }

    /// `sboTerm` (empty when unset)
    pub fn sbo_term(&self) -> &str {
        self.sbo_term.get()
    }

    /// Whether `sboTerm` is set
    pub fn is_set_sbo_term(&self) -> bool {
        self.sbo_term.is_set()
    }

    /// Set `sboTerm`; must look like `SBO:0000000`
    pub fn set_sbo_term(&mut self, term: &str) -> OperationResult {
        self.sbo_term.set(term)
    }

    /// Unset `sboTerm`
    pub fn unset_sbo_term(&mut self) -> OperationResult {
        self.sbo_term.unset()
    }

    /// `id` (empty when unset)
    pub fn id(&self) -> &str {
        self.id.get()
    }

    /// Whether `id` is set
    pub fn is_set_id(&self) -> bool {
        self.id.is_set()
    }

    /// Set `id`; must be an SId
    pub fn set_id(&mut self, id: &str) -> OperationResult {
        self.id.set(id)
    }

    /// Unset `id`
    pub fn unset_id(&mut self) -> OperationResult {
        self.id.unset()
    }

    /// `name` (empty when unset)
    pub fn name(&self) -> &str {
        self.name.get()
    }

    /// Whether `name` is set
    pub fn is_set_name(&self) -> bool {
        self.name.is_set()
    }

    /// Set `name`
    pub fn set_name(&mut self, name: &str) -> OperationResult {
        self.name.set(name)
    }

    /// Unset `name`
    pub fn unset_name(&mut self) -> OperationResult {
        self.name.unset()
    }

    /// Captured `<notes>` subtree
    pub fn notes(&self) -> Option<&XmlElement> {
        self.notes.as_ref()
    }

    /// Replace the `<notes>` subtree, returning the previous one
    pub fn set_notes(&mut self, notes: XmlElement) -> Option<XmlElement> {
        self.notes.replace(notes)
    }

    /// Drop the `<notes>` subtree
    pub fn unset_notes(&mut self) -> OperationResult {
        self.notes = None;
        Ok(())
    }

    /// Captured `<annotation>` subtree
    pub fn annotation(&self) -> Option<&XmlElement> {
        self.annotation.as_ref()
    }

    /// Replace the `<annotation>` subtree, returning the previous one
    pub fn set_annotation(&mut self, annotation: XmlElement) -> Option<XmlElement> {
        self.annotation.replace(annotation)
    }

    /// Drop the `<annotation>` subtree
    pub fn unset_annotation(&mut self) -> OperationResult {
        self.annotation = None;
        Ok(())
    }

    /// Whether notes or an annotation are present
    pub fn has_content(&self) -> bool {
        self.notes.is_some() || self.annotation.is_some()
    }

    /// Whether any core attribute or passthrough content is present
    pub fn is_empty(&self) -> bool {
        !(self.has_content()
            || self.metaid.is_set()
            || self.sbo_term.is_set()
            || self.id.is_set()
            || self.name.is_set())
    }

    /// Assign a core attribute by name
    pub fn assign(&mut self, name: &str, value: TypedValue) -> OperationResult {
        let text = match &value {
            TypedValue::Text(text) => text.as_str(),
            _ => return Err(OperationError::InvalidAttributeValue),
        };
        match name {
            "metaid" => self.metaid.set(text),
            "sboTerm" => self.sbo_term.set(text),
            "id" => self.id.set(text),
            "name" => self.name.set(text),
            _ => Err(OperationError::UnexpectedAttribute),
        }
    }

    /// Value of a core attribute, if set
    pub fn value_of(&self, name: &str) -> Option<TypedValue> {
        let value = match name {
            "metaid" => self.metaid.as_option(),
            "sboTerm" => self.sbo_term.as_option(),
            "id" => self.id.as_option(),
            "name" => self.name.as_option(),
            _ => None,
        };
        value.map(|text| TypedValue::Text(text.to_string()))
    }
}

/// An element whose attributes are driven by rule tables
pub trait AttributeBindable {
    /// XML element name
    fn element_name(&self) -> &'static str;

    /// Rules in force at `version`, `None` if the tables have no entry
    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules>;

    /// Shared attributes
    fn core(&self) -> &Core;

    /// Shared attributes, mutably
    fn core_mut(&mut self) -> &mut Core;

    /// Store a coerced value in the record named `name`
    fn assign(&mut self, name: &str, value: TypedValue) -> OperationResult {
        self.core_mut().assign(name, value)
    }

    /// Current value of the record named `name`, `None` when unset
    fn value_of(&self, name: &str) -> Option<TypedValue> {
        self.core().value_of(name)
    }

    /// Element-specific checks once attributes and children are read
    fn check_after_read(&mut self, _element: &XmlElement, _ctx: &mut ReadContext) {}
}

/// An element that owns child elements
pub trait ChildBindable {
    /// Read one child; `false` if the name is not one of this element's children
    fn read_child(&mut self, _child: &XmlElement, _ctx: &mut ReadContext) -> bool {
        false
    }

    /// Write owned children in their fixed order
    fn write_children(&self, _out: &mut XmlOutputStream, _version: &SchemaVersion) -> Result<()> {
        Ok(())
    }

    /// Whether any child would be written
    fn has_children(&self) -> bool {
        false
    }

    /// Whether this element's own required children are present at `version`
    fn own_required_elements(&self, _version: &SchemaVersion) -> bool {
        true
    }

    /// Owned child nodes, for tree walks
    fn child_nodes(&self) -> Vec<&dyn Node> {
        Vec::new()
    }
}

/// Object-safe view of any element node
pub trait Node {
    /// XML element name
    fn name(&self) -> &'static str;

    /// Every required attribute of this node and its descendants is set
    fn has_required_attributes(&self, version: &SchemaVersion) -> bool;

    /// Every required child of this node and its descendants is present
    fn has_required_elements(&self, version: &SchemaVersion) -> bool;

    /// Owned child nodes
    fn children(&self) -> Vec<&dyn Node>;
}

impl<T: AttributeBindable + ChildBindable> Node for T {
    fn name(&self) -> &'static str {
        self.element_name()
    }

    fn has_required_attributes(&self, version: &SchemaVersion) -> bool {
        let own = match self.rules(version) {
            Some(rules) => rules
                .required(version)
                .all(|name| self.value_of(name).is_some()),
            None => false,
        };
        let children = self
            .child_nodes()
            .iter()
            .all(|child| child.has_required_attributes(version));
        own && children
    }

    fn has_required_elements(&self, version: &SchemaVersion) -> bool {
        let own = self.own_required_elements(version);
        let children = self
            .child_nodes()
            .iter()
            .all(|child| child.has_required_elements(version));
        own && children
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.child_nodes()
    }
}
