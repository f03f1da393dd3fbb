//! Homogeneous child containers (`listOfX`)

use super::binder::{bind_element, write_element};
use super::context::ReadContext;
use super::element::{AttributeBindable, ChildBindable, Core, Node};
use super::rules::{ElementCodes, ElementRules, RuleTable, VariantTable};
use crate::diagnostics::ErrorCode;
use crate::error::{OperationError, OperationResult, Result};
use crate::versions::{SchemaVersion, SBML_L3V1, SBML_L3V2, SEDML_L1V2, SEDML_L1V3};
use crate::xml::{XmlElement, XmlOutputStream};

static LIST_OF_RULES: ElementRules = ElementRules {
    codes: ElementCodes {
        allowed_attributes: ErrorCode::ListOfAllowedAttributes,
        allowed_core_attributes: ErrorCode::ListOfAllowedCoreAttributes,
    },
    attributes: &[],
};

static LIST_OF_VARIANTS: RuleTable = VariantTable {
    entries: &[
        (SBML_L3V1, &LIST_OF_RULES),
        (SBML_L3V2, &LIST_OF_RULES),
        (SEDML_L1V2, &LIST_OF_RULES),
        (SEDML_L1V3, &LIST_OF_RULES),
    ],
};

/// An element that can live in a [`ListOf`]
pub trait Listable: AttributeBindable + ChildBindable + Default {
    /// Container element name, e.g. `listOfParameters`
    const LIST_NAME: &'static str;
    /// Item element name, e.g. `parameter`
    const ITEM_NAME: &'static str;

    /// Identifier used by [`ListOf::get_by_id`]
    fn identifier(&self) -> &str {
        self.core().id()
    }
}

/// Ordered container of one element type
#[derive(Debug, Clone)]
pub struct ListOf<T> {
    core: Core,
    items: Vec<T>,
    // Set once a container element has been read into this list
    seen: bool,
}

impl<T> Default for ListOf<T> {
    fn default() -> Self {
        Self {
            core: Core::default(),
            items: Vec::new(),
            seen: false,
        }
    }
}

impl<T: PartialEq> PartialEq for ListOf<T> {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core && self.items == other.items
    }
}

impl<T: Listable> ListOf<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `n`
    pub fn get(&self, n: usize) -> Option<&T> {
        self.items.get(n)
    }

    /// Item at `n`, mutably
    pub fn get_mut(&mut self, n: usize) -> Option<&mut T> {
        self.items.get_mut(n)
    }

    /// First item whose identifier is `id`
    pub fn get_by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.identifier() == id)
    }

    /// Append an item
    pub fn append(&mut self, item: T) -> OperationResult {
        self.items.push(item);
        Ok(())
    }

    /// Append a default item and return it for editing
    pub fn create(&mut self) -> &mut T {
        self.items.push(T::default());
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Remove and return the item at `n`
    pub fn remove(&mut self, n: usize) -> std::result::Result<T, OperationError> {
        if n >= self.items.len() {
            return Err(OperationError::IndexOutOfRange);
        }
        Ok(self.items.remove(n))
    }

    /// Items in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Items in order, mutably
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Whether the container carries anything worth writing
    pub fn should_write(&self) -> bool {
        !self.items.is_empty() || !self.core.is_empty()
    }

    /// Write the container if it carries anything
    pub fn write_if_present(&self, out: &mut XmlOutputStream, version: &SchemaVersion) -> Result<()> {
        if self.should_write() {
            write_element(self, out, version)?;
        }
        Ok(())
    }
}

/// Read a `listOfX` child of `parent` into `list`
///
/// A second container logs `duplicate`; its items are appended to the first's.
pub fn bind_list<T: Listable>(
    list: &mut ListOf<T>,
    parent: &str,
    duplicate: ErrorCode,
    child: &XmlElement,
    ctx: &mut ReadContext,
) {
    if list.seen {
        ctx.report(
            duplicate,
            format!(
                "Only one <{}> element is permitted inside <{}>.",
                T::LIST_NAME,
                parent
            ),
            child,
        );
    }
    list.seen = true;
    bind_element(list, child, ctx);
}

impl<'a, T> IntoIterator for &'a ListOf<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Listable> AttributeBindable for ListOf<T> {
    fn element_name(&self) -> &'static str {
        T::LIST_NAME
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        LIST_OF_VARIANTS.rules(version)
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }
}

impl<T: Listable> ChildBindable for ListOf<T> {
    fn read_child(&mut self, child: &XmlElement, ctx: &mut ReadContext) -> bool {
        if child.name() == T::ITEM_NAME {
            let mut item = T::default();
            bind_element(&mut item, child, ctx);
            self.items.push(item);
        } else {
            ctx.report(
                ErrorCode::ListOfAllowedElements,
                format!(
                    "The <{}> element may only contain <{}> elements, not <{}>.",
                    T::LIST_NAME,
                    T::ITEM_NAME,
                    child.name()
                ),
                child,
            );
        }
        true
    }

    fn write_children(&self, out: &mut XmlOutputStream, version: &SchemaVersion) -> Result<()> {
        for item in &self.items {
            write_element(item, out, version)?;
        }
        Ok(())
    }

    fn has_children(&self) -> bool {
        !self.items.is_empty()
    }

    fn child_nodes(&self) -> Vec<&dyn Node> {
        self.items.iter().map(|item| item as &dyn Node).collect()
    }
}
