//! Attribute and element binding
//!
//! The generic engine every concrete element goes through: typed attribute
//! records, per-version rule tables, the read context and the binder that drives
//! reading and writing.

pub mod binder;
pub mod coercion;
pub mod context;
pub mod element;
pub mod list;
pub mod record;
pub mod rules;
pub mod schema;

pub use binder::{bind_element, bind_singleton, write_element, write_element_with, ReadState};
pub use coercion::{AttributeKind, CoercionFailure, TypedValue};
pub use context::ReadContext;
pub use element::{AttributeBindable, ChildBindable, Core, Node};
pub use list::{bind_list, ListOf, Listable};
pub use record::{Attribute, Sentinel, Singleton, TextAttribute, TextRole};
pub use rules::{AttributeRule, ElementCodes, ElementRules, RuleTable, VariantTable};
pub use schema::{AttributeDeclaration, AttributeSchema};
