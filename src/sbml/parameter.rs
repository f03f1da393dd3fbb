//! `<parameter>`

use crate::binding::record::UnitSIdRef;
use crate::binding::{
    Attribute, AttributeBindable, AttributeKind, AttributeRule, ChildBindable, Core, ElementCodes,
    ElementRules, Listable, RuleTable, TextAttribute, VariantTable,
};
use crate::diagnostics::ErrorCode;
use crate::error::OperationResult;
use crate::versions::{SchemaVersion, SBML_L3V1, SBML_L3V2};

static PARAMETER_RULES: ElementRules = ElementRules {
    codes: ElementCodes {
        allowed_attributes: ErrorCode::ParameterAllowedAttributes,
        allowed_core_attributes: ErrorCode::ParameterAllowedCoreAttributes,
    },
    attributes: &[
        AttributeRule::required("id", AttributeKind::SId, ErrorCode::InvalidIdSyntax),
        AttributeRule::text("name"),
        AttributeRule::optional("value", AttributeKind::Double, ErrorCode::ParameterValueMustBeDouble),
        AttributeRule::optional("units", AttributeKind::UnitSIdRef, ErrorCode::ParameterUnitsMustBeUnitSId),
        AttributeRule::required("constant", AttributeKind::Boolean, ErrorCode::ParameterConstantMustBeBoolean),
    ],
};

static PARAMETER_VARIANTS: RuleTable = VariantTable {
    entries: &[(SBML_L3V1, &PARAMETER_RULES), (SBML_L3V2, &PARAMETER_RULES)],
};

/// Named quantity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    core: Core,
    value: Attribute<f64>,
    units: TextAttribute<UnitSIdRef>,
    constant: Attribute<bool>,
}

impl Parameter {
    /// Create a parameter with nothing set
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

    value_accessors! {
        value: f64 => value, is_set_value, set_value, unset_value;
        constant: bool => constant, is_set_constant, set_constant, unset_constant;
    }

    text_accessors! {
        units => units, is_set_units, set_units, unset_units;
    }
}

impl AttributeBindable for Parameter {
    fn element_name(&self) -> &'static str {
        "parameter"
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        PARAMETER_VARIANTS.rules(version)
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    bind_records! {
        values {
            "value" => value: Double,
            "constant" => constant: Boolean,
        }
        texts {
            "units" => units,
        }
    }
}

impl ChildBindable for Parameter {}

impl Listable for Parameter {
    const LIST_NAME: &'static str = "listOfParameters";
    const ITEM_NAME: &'static str = "parameter";
}
