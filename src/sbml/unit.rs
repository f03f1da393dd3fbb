//! `<unitDefinition>` and `<unit>`

use crate::binding::{
    bind_list, Attribute, AttributeBindable, AttributeKind, AttributeRule, ChildBindable, Core,
    ElementCodes, ElementRules, ListOf, Listable, Node, ReadContext, RuleTable, Sentinel,
    TypedValue, VariantTable,
};
use crate::diagnostics::ErrorCode;
use crate::error::{OperationError, OperationResult, Result};
use crate::versions::{SchemaVersion, SBML_L3V1, SBML_L3V2};
use crate::xml::{XmlElement, XmlOutputStream};
use std::fmt;

macro_rules! unit_kinds {
    ($($variant:ident => $name:literal,)*) => {
        /// Base unit named by `<unit kind="...">`
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum UnitKind {
            $(
                #[doc = $name]
                $variant,
            )*
            /// No valid kind; the value of an unset record
            Invalid,
        }

        impl UnitKind {
            /// Every valid kind
            pub const ALL: &'static [UnitKind] = &[$(UnitKind::$variant),*];

            /// Name as written in XML
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(UnitKind::$variant => $name,)*
                    UnitKind::Invalid => "invalid",
                }
            }

            /// Kind for an XML name, case-sensitive
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(UnitKind::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

unit_kinds! {
    Ampere => "ampere",
    Avogadro => "avogadro",
    Becquerel => "becquerel",
    Candela => "candela",
    Coulomb => "coulomb",
    Dimensionless => "dimensionless",
    Farad => "farad",
    Gram => "gram",
    Gray => "gray",
    Henry => "henry",
    Hertz => "hertz",
    Item => "item",
    Joule => "joule",
    Katal => "katal",
    Kelvin => "kelvin",
    Kilogram => "kilogram",
    Litre => "litre",
    Lumen => "lumen",
    Lux => "lux",
    Metre => "metre",
    Mole => "mole",
    Newton => "newton",
    Ohm => "ohm",
    Pascal => "pascal",
    Radian => "radian",
    Second => "second",
    Siemens => "siemens",
    Sievert => "sievert",
    Steradian => "steradian",
    Tesla => "tesla",
    Volt => "volt",
    Watt => "watt",
    Weber => "weber",
}

impl Sentinel for UnitKind {
    fn sentinel() -> Self {
        UnitKind::Invalid
    }

    fn is_valid(&self) -> bool {
        *self != UnitKind::Invalid
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit kind names accepted in L3V1
pub const UNIT_KIND_NAMES_L3V1: &[&str] = &[
    "ampere", "avogadro", "becquerel", "candela", "coulomb", "dimensionless", "farad", "gram",
    "gray", "henry", "hertz", "item", "joule", "katal", "kelvin", "kilogram", "litre", "lumen",
    "lux", "metre", "mole", "newton", "ohm", "pascal", "radian", "second", "siemens", "sievert",
    "steradian", "tesla", "volt", "watt", "weber",
];

/// Unit kind names accepted in L3V2, where `avogadro` was withdrawn
pub const UNIT_KIND_NAMES_L3V2: &[&str] = &[
    "ampere", "becquerel", "candela", "coulomb", "dimensionless", "farad", "gram", "gray",
    "henry", "hertz", "item", "joule", "katal", "kelvin", "kilogram", "litre", "lumen", "lux",
    "metre", "mole", "newton", "ohm", "pascal", "radian", "second", "siemens", "sievert",
    "steradian", "tesla", "volt", "watt", "weber",
];

const UNIT_CODES: ElementCodes = ElementCodes {
    allowed_attributes: ErrorCode::UnitAllowedAttributes,
    allowed_core_attributes: ErrorCode::UnitAllowedCoreAttributes,
};

static UNIT_RULES_L3V1: ElementRules = ElementRules {
    codes: UNIT_CODES,
    attributes: &[
        AttributeRule::required(
            "kind",
            AttributeKind::Enumeration(UNIT_KIND_NAMES_L3V1),
            ErrorCode::UnitKindMustBeUnitKind,
        ),
        AttributeRule::required("exponent", AttributeKind::Double, ErrorCode::UnitExponentMustBeDouble),
        AttributeRule::required("scale", AttributeKind::Integer, ErrorCode::UnitScaleMustBeInteger),
        AttributeRule::required("multiplier", AttributeKind::Double, ErrorCode::UnitMultiplierMustBeDouble),
    ],
};

static UNIT_RULES_L3V2: ElementRules = ElementRules {
    codes: UNIT_CODES,
    attributes: &[
        AttributeRule::required(
            "kind",
            AttributeKind::Enumeration(UNIT_KIND_NAMES_L3V2),
            ErrorCode::UnitKindMustBeUnitKind,
        ),
        AttributeRule::required("exponent", AttributeKind::Double, ErrorCode::UnitExponentMustBeDouble),
        AttributeRule::required("scale", AttributeKind::Integer, ErrorCode::UnitScaleMustBeInteger),
        AttributeRule::required("multiplier", AttributeKind::Double, ErrorCode::UnitMultiplierMustBeDouble),
    ],
};

static UNIT_VARIANTS: RuleTable = VariantTable {
    entries: &[(SBML_L3V1, &UNIT_RULES_L3V1), (SBML_L3V2, &UNIT_RULES_L3V2)],
};

/// One factor of a unit definition: `(multiplier * 10^scale * kind)^exponent`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unit {
    core: Core,
    kind: Attribute<UnitKind>,
    exponent: Attribute<f64>,
    scale: Attribute<i32>,
    multiplier: Attribute<f64>,
}

impl Unit {
    /// Create a unit with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    value_accessors! {
        kind: UnitKind => kind, is_set_kind, set_kind, unset_kind;
        exponent: f64 => exponent, is_set_exponent, set_exponent, unset_exponent;
        scale: i32 => scale, is_set_scale, set_scale, unset_scale;
        multiplier: f64 => multiplier, is_set_multiplier, set_multiplier, unset_multiplier;
    }
}

impl AttributeBindable for Unit {
    fn element_name(&self) -> &'static str {
        "unit"
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        UNIT_VARIANTS.rules(version)
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn assign(&mut self, name: &str, value: TypedValue) -> OperationResult {
        match (name, value) {
            ("kind", TypedValue::Text(text)) => match UnitKind::from_name(&text) {
                Some(kind) => self.kind.set(kind),
                None => Err(OperationError::InvalidAttributeValue),
            },
            ("exponent", TypedValue::Double(v)) => self.exponent.set(v),
            ("scale", TypedValue::Integer(v)) => self.scale.set(v),
            ("multiplier", TypedValue::Double(v)) => self.multiplier.set(v),
            ("kind" | "exponent" | "scale" | "multiplier", _) => {
                Err(OperationError::InvalidAttributeValue)
            }
            (name, value) => self.core.assign(name, value),
        }
    }

    fn value_of(&self, name: &str) -> Option<TypedValue> {
        match name {
            "kind" => self
                .kind
                .as_option()
                .map(|kind| TypedValue::Text(kind.as_str().to_string())),
            "exponent" => self.exponent.as_option().map(TypedValue::Double),
            "scale" => self.scale.as_option().map(TypedValue::Integer),
            "multiplier" => self.multiplier.as_option().map(TypedValue::Double),
            _ => self.core.value_of(name),
        }
    }
}

impl ChildBindable for Unit {}

impl Listable for Unit {
    const LIST_NAME: &'static str = "listOfUnits";
    const ITEM_NAME: &'static str = "unit";
}

static UNIT_DEFINITION_RULES: ElementRules = ElementRules {
    codes: ElementCodes {
        allowed_attributes: ErrorCode::UnitDefinitionAllowedAttributes,
        allowed_core_attributes: ErrorCode::UnitDefinitionAllowedCoreAttributes,
    },
    attributes: &[
        AttributeRule::required("id", AttributeKind::UnitSId, ErrorCode::InvalidUnitIdSyntax),
        AttributeRule::text("name"),
    ],
};

static UNIT_DEFINITION_VARIANTS: RuleTable = VariantTable {
    entries: &[
        (SBML_L3V1, &UNIT_DEFINITION_RULES),
        (SBML_L3V2, &UNIT_DEFINITION_RULES),
    ],
};

/// Named derived unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitDefinition {
    core: Core,
    units: ListOf<Unit>,
}

impl UnitDefinition {
    /// Create a definition with nothing set
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

    /// Name
    pub fn name(&self) -> &str {
        self.core.name()
    }

    /// Set the name
    pub fn set_name(&mut self, name: &str) -> OperationResult {
        self.core.set_name(name)
    }

    /// Constituent units
    pub fn units(&self) -> &ListOf<Unit> {
        &self.units
    }

    /// Constituent units, mutably
    pub fn units_mut(&mut self) -> &mut ListOf<Unit> {
        &mut self.units
    }

    /// Append a default unit and return it
    pub fn create_unit(&mut self) -> &mut Unit {
        self.units.create()
    }
}

impl AttributeBindable for UnitDefinition {
    fn element_name(&self) -> &'static str {
        "unitDefinition"
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        UNIT_DEFINITION_VARIANTS.rules(version)
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }
}

impl ChildBindable for UnitDefinition {
    fn read_child(&mut self, child: &XmlElement, ctx: &mut ReadContext) -> bool {
        match child.name() {
            "listOfUnits" => {
                bind_list(
                    &mut self.units,
                    "unitDefinition",
                    ErrorCode::UnitDefinitionAllowedElements,
                    child,
                    ctx,
                );
                true
            }
            _ => false,
        }
    }

    fn write_children(&self, out: &mut XmlOutputStream, version: &SchemaVersion) -> Result<()> {
        self.units.write_if_present(out, version)
    }

    fn has_children(&self) -> bool {
        self.units.should_write()
    }

    fn own_required_elements(&self, version: &SchemaVersion) -> bool {
        // L3V2 relaxed the one-unit minimum
        version.key() != SBML_L3V1 || !self.units.is_empty()
    }

    fn child_nodes(&self) -> Vec<&dyn Node> {
        vec![&self.units as &dyn Node]
    }
}

impl Listable for UnitDefinition {
    const LIST_NAME: &'static str = "listOfUnitDefinitions";
    const ITEM_NAME: &'static str = "unitDefinition";
}
