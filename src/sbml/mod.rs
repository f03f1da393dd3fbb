//! SBML Level 3 core elements
//!
//! A subset of the core object model: enough element types to exercise every
//! path of the binder (typed records, identifier kinds, singleton and list
//! children, and attribute sets that differ between L3V1 and L3V2).

pub mod compartment;
pub mod event;
pub mod model;
pub mod parameter;
pub mod root;
pub mod unit;

pub use compartment::Compartment;
pub use event::{Event, EventAssignment, Trigger};
pub use model::Model;
pub use parameter::Parameter;
pub use root::Sbml;
pub use unit::{Unit, UnitDefinition, UnitKind};
