//! Binding records
//!
//! The per-attribute `(is_set, value)` pair and the owning slot used for
//! singleton children. Numeric records keep an explicit flag and fall back to a
//! sentinel value when unset; text records derive `is_set` from the value being
//! non-empty.

use super::coercion::AttributeKind;
use crate::error::{OperationError, OperationResult};
use crate::names;
use std::fmt;
use std::marker::PhantomData;

/// A value type with a defined "unset" sentinel
pub trait Sentinel: Copy + PartialEq + fmt::Debug {
    /// Value held while the record is unset
    fn sentinel() -> Self;

    /// Whether `self` is an acceptable value for `set`
    fn is_valid(&self) -> bool {
        true
    }

    /// Equality under which the sentinel compares equal to itself
    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}

impl Sentinel for f64 {
    fn sentinel() -> Self {
        f64::NAN
    }

    fn same_as(&self, other: &Self) -> bool {
        (self.is_nan() && other.is_nan()) || self == other
    }
}

impl Sentinel for i32 {
    fn sentinel() -> Self {
        i32::MAX
    }
}

impl Sentinel for u32 {
    fn sentinel() -> Self {
        2_147_483_647
    }
}

impl Sentinel for bool {
    fn sentinel() -> Self {
        false
    }
}

/// Numeric, boolean or enumeration attribute
#[derive(Debug, Clone, Copy)]
pub struct Attribute<T: Sentinel> {
    value: T,
    set: bool,
}

impl<T: Sentinel> Attribute<T> {
    /// Create an unset record
    pub fn new() -> Self {
        Self {
            value: T::sentinel(),
            set: false,
        }
    }

    /// Create a set record
    pub fn with_value(value: T) -> Self {
        Self { value, set: true }
    }

    /// Current value (the sentinel when unset)
    pub fn get(&self) -> T {
        self.value
    }

    /// Whether a value has been set
    pub fn is_set(&self) -> bool {
        self.set
    }

    /// The value if set
    pub fn as_option(&self) -> Option<T> {
        self.set.then_some(self.value)
    }

    /// Set the value; invalid values leave the record unchanged
    pub fn set(&mut self, value: T) -> OperationResult {
        if !value.is_valid() {
            return Err(OperationError::InvalidAttributeValue);
        }
        self.value = value;
        self.set = true;
        Ok(())
    }

    /// Reset to the sentinel
    pub fn unset(&mut self) -> OperationResult {
        self.value = T::sentinel();
        self.set = false;
        Ok(())
    }
}

impl<T: Sentinel> Default for Attribute<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sentinel> PartialEq for Attribute<T> {
    fn eq(&self, other: &Self) -> bool {
        self.set == other.set && self.value.same_as(&other.value)
    }
}

/// Syntax role of a text attribute
pub trait TextRole: Copy + Default + fmt::Debug + PartialEq {
    /// Kind used for diagnostics
    const KIND: AttributeKind;

    /// Whether non-empty `text` is acceptable
    fn accepts(text: &str) -> bool;
}

macro_rules! text_roles {
    ($($(#[$meta:meta])* $role:ident => $kind:ident, $check:expr;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $role;

            impl TextRole for $role {
                const KIND: AttributeKind = AttributeKind::$kind;

                fn accepts(text: &str) -> bool {
                    let check: fn(&str) -> bool = $check;
                    check(text)
                }
            }
        )*
    };
}

text_roles! {
    /// Free text
    Plain => String, |_| true;
    /// XML ID
    MetaId => MetaId, names::is_valid_xml_id;
    /// Component identifier
    SId => SId, names::is_valid_sid;
    /// Unit definition identifier
    UnitSId => UnitSId, names::is_valid_unit_sid;
    /// Reference to a component
    SIdRef => SIdRef, names::is_valid_sid;
    /// Reference to a unit
    UnitSIdRef => UnitSIdRef, names::is_valid_unit_sid;
    /// SBO term
    SboTerm => SboTerm, names::is_valid_sbo_term;
}

/// String-typed attribute; empty means unset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextAttribute<R: TextRole> {
    value: String,
    role: PhantomData<R>,
}

impl<R: TextRole> TextAttribute<R> {
    /// Create an unset record
    pub fn new() -> Self {
        Self {
            value: String::new(),
            role: PhantomData,
        }
    }

    /// Current value (empty when unset)
    pub fn get(&self) -> &str {
        &self.value
    }

    /// Whether a non-empty value is held
    pub fn is_set(&self) -> bool {
        !self.value.is_empty()
    }

    /// The value if set
    pub fn as_option(&self) -> Option<&str> {
        self.is_set().then_some(self.value.as_str())
    }

    /// Set the value
    ///
    /// Empty input clears the record. Non-empty input failing the role's syntax
    /// is rejected and the previous value kept.
    pub fn set(&mut self, value: &str) -> OperationResult {
        if !value.is_empty() && !R::accepts(value) {
            return Err(OperationError::InvalidAttributeValue);
        }
        self.value = value.to_string();
        Ok(())
    }

    /// Clear the record
    pub fn unset(&mut self) -> OperationResult {
        self.value.clear();
        Ok(())
    }
}

/// Owning slot for a 0-or-1 child element
#[derive(Debug, Clone, PartialEq)]
pub struct Singleton<T> {
    slot: Option<T>,
}

impl<T> Default for Singleton<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> Singleton<T> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a child is present
    pub fn is_set(&self) -> bool {
        self.slot.is_some()
    }

    /// The child, if present
    pub fn get(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    /// The child, mutably
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slot.as_mut()
    }

    /// Store `child`, returning the previous occupant
    pub fn replace(&mut self, child: T) -> Option<T> {
        self.slot.replace(child)
    }

    /// Remove and return the child
    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    /// Drop the child
    pub fn unset(&mut self) -> OperationResult {
        self.slot = None;
        Ok(())
    }
}

impl<T: Clone> Singleton<T> {
    /// Store a deep copy of `child`
    pub fn set(&mut self, child: &T) -> OperationResult {
        self.slot = Some(child.clone());
        Ok(())
    }
}

impl<T: Default> Singleton<T> {
    /// Replace the slot with a default child and return it
    pub fn create(&mut self) -> &mut T {
        self.slot.insert(T::default())
    }
}
