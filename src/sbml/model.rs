//! `<model>`

use super::compartment::Compartment;
use super::event::Event;
use super::parameter::Parameter;
use super::unit::UnitDefinition;
use crate::binding::record::{SIdRef, UnitSIdRef};
use crate::binding::{
    bind_list, AttributeBindable, AttributeKind, AttributeRule, ChildBindable, Core, ElementCodes,
    ElementRules, ListOf, Node, ReadContext, RuleTable, TextAttribute, VariantTable,
};
use crate::diagnostics::ErrorCode;
use crate::error::{OperationResult, Result};
use crate::versions::{SchemaVersion, SBML_L3V1, SBML_L3V2};
use crate::xml::{XmlElement, XmlOutputStream};

static MODEL_RULES: ElementRules = ElementRules {
    codes: ElementCodes {
        allowed_attributes: ErrorCode::ModelAllowedAttributes,
        allowed_core_attributes: ErrorCode::ModelAllowedCoreAttributes,
    },
    attributes: &[
        AttributeRule::optional("id", AttributeKind::SId, ErrorCode::InvalidIdSyntax),
        AttributeRule::text("name"),
        AttributeRule::optional("timeUnits", AttributeKind::UnitSIdRef, ErrorCode::ModelTimeUnitsMustBeUnitSId),
        AttributeRule::optional(
            "extentUnits",
            AttributeKind::UnitSIdRef,
            ErrorCode::ModelExtentUnitsMustBeUnitSId,
        ),
        AttributeRule::optional(
            "conversionFactor",
            AttributeKind::SIdRef,
            ErrorCode::ModelConversionFactorMustBeSId,
        ),
    ],
};

static MODEL_VARIANTS: RuleTable = VariantTable {
    entries: &[(SBML_L3V1, &MODEL_RULES), (SBML_L3V2, &MODEL_RULES)],
};

/// The model itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    core: Core,
    time_units: TextAttribute<UnitSIdRef>,
    extent_units: TextAttribute<UnitSIdRef>,
    conversion_factor: TextAttribute<SIdRef>,
    unit_definitions: ListOf<UnitDefinition>,
    compartments: ListOf<Compartment>,
    parameters: ListOf<Parameter>,
    events: ListOf<Event>,
}

impl Model {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier
    pub fn id(&self) -> &str {
        self.core.id()
    }

    /// Set the identifier
    pub fn set_id(&mut self, id: &str) -> OperationResult {
        self.core.set_id(id)
    }

    text_accessors! {
        time_units => time_units, is_set_time_units, set_time_units, unset_time_units;
        extent_units => extent_units, is_set_extent_units, set_extent_units, unset_extent_units;
        conversion_factor => conversion_factor, is_set_conversion_factor, set_conversion_factor, unset_conversion_factor;
    }

    /// Unit definitions
    pub fn unit_definitions(&self) -> &ListOf<UnitDefinition> {
        &self.unit_definitions
    }

    /// Unit definitions, mutably
    pub fn unit_definitions_mut(&mut self) -> &mut ListOf<UnitDefinition> {
        &mut self.unit_definitions
    }

    /// Append a default unit definition and return it
    pub fn create_unit_definition(&mut self) -> &mut UnitDefinition {
        self.unit_definitions.create()
    }

    /// Compartments
    pub fn compartments(&self) -> &ListOf<Compartment> {
        &self.compartments
    }

    /// Compartments, mutably
    pub fn compartments_mut(&mut self) -> &mut ListOf<Compartment> {
        &mut self.compartments
    }

    /// Append a default compartment and return it
    pub fn create_compartment(&mut self) -> &mut Compartment {
        self.compartments.create()
    }

    /// Parameters
    pub fn parameters(&self) -> &ListOf<Parameter> {
        &self.parameters
    }

    /// Parameters, mutably
    pub fn parameters_mut(&mut self) -> &mut ListOf<Parameter> {
        &mut self.parameters
    }

    /// Append a default parameter and return it
    pub fn create_parameter(&mut self) -> &mut Parameter {
        self.parameters.create()
    }

    /// Events
    pub fn events(&self) -> &ListOf<Event> {
        &self.events
    }

    /// Events, mutably
    pub fn events_mut(&mut self) -> &mut ListOf<Event> {
        &mut self.events
    }

    /// Append a default event and return it
    pub fn create_event(&mut self) -> &mut Event {
        self.events.create()
    }
}

impl AttributeBindable for Model {
    fn element_name(&self) -> &'static str {
        "model"
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        MODEL_VARIANTS.rules(version)
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    bind_records! {
        values {}
        texts {
            "timeUnits" => time_units,
            "extentUnits" => extent_units,
            "conversionFactor" => conversion_factor,
        }
    }
}

impl ChildBindable for Model {
    fn read_child(&mut self, child: &XmlElement, ctx: &mut ReadContext) -> bool {
        let duplicate = ErrorCode::ModelAllowedElements;
        match child.name() {
            "listOfUnitDefinitions" => {
                bind_list(&mut self.unit_definitions, "model", duplicate, child, ctx)
            }
            "listOfCompartments" => bind_list(&mut self.compartments, "model", duplicate, child, ctx),
            "listOfParameters" => bind_list(&mut self.parameters, "model", duplicate, child, ctx),
            "listOfEvents" => bind_list(&mut self.events, "model", duplicate, child, ctx),
            _ => return false,
        }
        true
    }

    fn write_children(&self, out: &mut XmlOutputStream, version: &SchemaVersion) -> Result<()> {
        self.unit_definitions.write_if_present(out, version)?;
        self.compartments.write_if_present(out, version)?;
        self.parameters.write_if_present(out, version)?;
        self.events.write_if_present(out, version)
    }

    fn has_children(&self) -> bool {
        self.unit_definitions.should_write()
            || self.compartments.should_write()
            || self.parameters.should_write()
            || self.events.should_write()
    }

    fn child_nodes(&self) -> Vec<&dyn Node> {
        let lists: [(&dyn Node, bool); 4] = [
            (&self.unit_definitions, self.unit_definitions.should_write()),
            (&self.compartments, self.compartments.should_write()),
            (&self.parameters, self.parameters.should_write()),
            (&self.events, self.events.should_write()),
        ];
        lists
            .into_iter()
            .filter(|(_, present)| *present)
            .map(|(node, _)| node)
            .collect()
    }
}
