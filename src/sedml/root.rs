//! `<sedML>` document root

use super::simulation::UniformTimeCourse;
use crate::binding::{
    bind_list, Attribute, AttributeBindable, AttributeKind, AttributeRule, ChildBindable, Core,
    ElementCodes, ElementRules, ListOf, Node, ReadContext, RuleTable, VariantTable,
};
use crate::diagnostics::ErrorCode;
use crate::document::RootElement;
use crate::error::{OperationError, OperationResult, Result};
use crate::versions::{Format, SchemaVersion, SEDML_L1V2, SEDML_L1V3};
use crate::xml::{XmlElement, XmlOutputStream};

static SEDML_RULES: ElementRules = ElementRules {
    codes: ElementCodes {
        allowed_attributes: ErrorCode::SedmlAllowedAttributes,
        allowed_core_attributes: ErrorCode::SedmlAllowedCoreAttributes,
    },
    attributes: &[
        AttributeRule::required("level", AttributeKind::UnsignedInteger, ErrorCode::SedmlLevelMustBeInteger),
        AttributeRule::required(
            "version",
            AttributeKind::UnsignedInteger,
            ErrorCode::SedmlVersionMustBeInteger,
        ),
    ],
};

static SEDML_VARIANTS: RuleTable = VariantTable {
    entries: &[(SEDML_L1V2, &SEDML_RULES), (SEDML_L1V3, &SEDML_RULES)],
};

/// Root element of a SED-ML document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SedMl {
    core: Core,
    level: Attribute<u32>,
    version: Attribute<u32>,
    simulations: ListOf<UniformTimeCourse>,
}

impl SedMl {
    /// Create a root with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    value_accessors! {
        level: u32 => level, is_set_level, set_level, unset_level;
        version: u32 => version, is_set_version, set_version, unset_version;
    }

    /// Simulations
    pub fn simulations(&self) -> &ListOf<UniformTimeCourse> {
        &self.simulations
    }

    /// Simulations, mutably
    pub fn simulations_mut(&mut self) -> &mut ListOf<UniformTimeCourse> {
        &mut self.simulations
    }

    /// Append a default simulation and return it
    pub fn create_simulation(&mut self) -> &mut UniformTimeCourse {
        self.simulations.create()
    }
}

impl AttributeBindable for SedMl {
    fn element_name(&self) -> &'static str {
        "sedML"
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        SEDML_VARIANTS.rules(version)
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    bind_records! {
        values {
            "level" => level: UnsignedInteger,
            "version" => version: UnsignedInteger,
        }
        texts {}
    }
}

impl ChildBindable for SedMl {
    fn read_child(&mut self, child: &XmlElement, ctx: &mut ReadContext) -> bool {
        if child.name() != "listOfSimulations" {
            return false;
        }
        bind_list(
            &mut self.simulations,
            "sedML",
            ErrorCode::SedmlAllowedElements,
            child,
            ctx,
        );
        true
    }

    fn write_children(&self, out: &mut XmlOutputStream, version: &SchemaVersion) -> Result<()> {
        self.simulations.write_if_present(out, version)
    }

    fn has_children(&self) -> bool {
        self.simulations.should_write()
    }

    fn child_nodes(&self) -> Vec<&dyn Node> {
        if self.simulations.should_write() {
            vec![&self.simulations as &dyn Node]
        } else {
            Vec::new()
        }
    }
}

impl RootElement for SedMl {
    const FORMAT: Format = Format::SedMl;

    fn stamp_version(&mut self, version: &SchemaVersion) -> OperationResult {
        if version.format() != Self::FORMAT {
            return Err(OperationError::LevelVersionMismatch);
        }
        self.level.set(version.level())?;
        self.version.set(version.version())
    }
}
