//! `<compartment>`

use crate::binding::record::UnitSIdRef;
use crate::binding::{
    Attribute, AttributeBindable, AttributeKind, AttributeRule, ChildBindable, Core, ElementCodes,
    ElementRules, Listable, RuleTable, TextAttribute, VariantTable,
};
use crate::diagnostics::ErrorCode;
use crate::error::OperationResult;
use crate::versions::{SchemaVersion, SBML_L3V1, SBML_L3V2};

static COMPARTMENT_RULES: ElementRules = ElementRules {
    codes: ElementCodes {
        allowed_attributes: ErrorCode::CompartmentAllowedAttributes,
        allowed_core_attributes: ErrorCode::CompartmentAllowedCoreAttributes,
    },
    attributes: &[
        AttributeRule::required("id", AttributeKind::SId, ErrorCode::InvalidIdSyntax),
        AttributeRule::text("name"),
        AttributeRule::optional(
            "spatialDimensions",
            AttributeKind::Double,
            ErrorCode::CompartmentSpatialDimensionsMustBeDouble,
        ),
        AttributeRule::optional("size", AttributeKind::Double, ErrorCode::CompartmentSizeMustBeDouble),
        AttributeRule::optional("units", AttributeKind::UnitSIdRef, ErrorCode::CompartmentUnitsMustBeUnitSId),
        AttributeRule::required("constant", AttributeKind::Boolean, ErrorCode::CompartmentConstantMustBeBoolean),
    ],
};

static COMPARTMENT_VARIANTS: RuleTable = VariantTable {
    entries: &[(SBML_L3V1, &COMPARTMENT_RULES), (SBML_L3V2, &COMPARTMENT_RULES)],
};

/// Bounded container in which species are located
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compartment {
    core: Core,
    spatial_dimensions: Attribute<f64>,
    size: Attribute<f64>,
    units: TextAttribute<UnitSIdRef>,
    constant: Attribute<bool>,
}

impl Compartment {
    /// Create a compartment with nothing set
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
        spatial_dimensions: f64 => spatial_dimensions, is_set_spatial_dimensions, set_spatial_dimensions, unset_spatial_dimensions;
        size: f64 => size, is_set_size, set_size, unset_size;
        constant: bool => constant, is_set_constant, set_constant, unset_constant;
    }

    text_accessors! {
        units => units, is_set_units, set_units, unset_units;
    }
}

impl AttributeBindable for Compartment {
    fn element_name(&self) -> &'static str {
        "compartment"
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        COMPARTMENT_VARIANTS.rules(version)
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    bind_records! {
        values {
            "spatialDimensions" => spatial_dimensions: Double,
            "size" => size: Double,
            "constant" => constant: Boolean,
        }
        texts {
            "units" => units,
        }
    }
}

impl ChildBindable for Compartment {}

impl Listable for Compartment {
    const LIST_NAME: &'static str = "listOfCompartments";
    const ITEM_NAME: &'static str = "compartment";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Node, TypedValue};
    use crate::error::OperationError;
    use crate::versions::Format;

    #[test]
    fn test_size_unset_is_nan() {
        let mut compartment = Compartment::new();
        compartment.set_size(3.5).unwrap();
        assert_eq!(compartment.value_of("size"), Some(TypedValue::Double(3.5)));

        compartment.unset_size().unwrap();
        compartment.unset_size().unwrap();
        assert!(compartment.size().is_nan());
        assert!(!compartment.is_set_size());
        assert_eq!(compartment.value_of("size"), None);
    }

    #[test]
    fn test_units_rejects_bad_reference() {
        let mut compartment = Compartment::new();
        compartment.set_units("litre").unwrap();
        assert_eq!(
            compartment.set_units("1litre"),
            Err(OperationError::InvalidAttributeValue)
        );
        assert_eq!(compartment.units(), "litre");
    }

    #[test]
    fn test_required_attributes() {
        let version = SchemaVersion::latest(Format::Sbml);
        let mut compartment = Compartment::new();
        compartment.set_id("cell").unwrap();
        assert!(!compartment.has_required_attributes(&version));
        compartment.set_constant(true).unwrap();
        assert!(compartment.has_required_attributes(&version));
        compartment.unset_constant().unwrap();
        assert!(!compartment.has_required_attributes(&version));
    }
}
