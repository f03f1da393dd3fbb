//! `<sbml>` document root

use super::model::Model;
use crate::binding::{
    bind_singleton, write_element, Attribute, AttributeBindable, AttributeKind, AttributeRule,
    ChildBindable, Core, ElementCodes, ElementRules, Node, ReadContext, RuleTable, Singleton,
    VariantTable,
};
use crate::diagnostics::ErrorCode;
use crate::document::RootElement;
use crate::error::{OperationError, OperationResult, Result};
use crate::versions::{Format, SchemaVersion, SBML_L3V1, SBML_L3V2};
use crate::xml::{XmlElement, XmlOutputStream};

static SBML_RULES: ElementRules = ElementRules {
    codes: ElementCodes {
        allowed_attributes: ErrorCode::SbmlAllowedAttributes,
        allowed_core_attributes: ErrorCode::SbmlAllowedCoreAttributes,
    },
    attributes: &[
        AttributeRule::required(
            "level",
            AttributeKind::UnsignedInteger,
            ErrorCode::SbmlLevelMustBeNonNegativeInteger,
        ),
        AttributeRule::required(
            "version",
            AttributeKind::UnsignedInteger,
            ErrorCode::SbmlVersionMustBeNonNegativeInteger,
        ),
    ],
};

static SBML_VARIANTS: RuleTable = VariantTable {
    entries: &[(SBML_L3V1, &SBML_RULES), (SBML_L3V2, &SBML_RULES)],
};

/// Root element of an SBML document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sbml {
    core: Core,
    level: Attribute<u32>,
    version: Attribute<u32>,
    model: Singleton<Model>,
}

impl Sbml {
    /// Create a root with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    value_accessors! {
        level: u32 => level, is_set_level, set_level, unset_level;
        version: u32 => version, is_set_version, set_version, unset_version;
    }

    singleton_accessors! {
        model: Model => model, model_mut, create_model, set_model, unset_model;
    }
}

impl AttributeBindable for Sbml {
    fn element_name(&self) -> &'static str {
        "sbml"
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        SBML_VARIANTS.rules(version)
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

impl ChildBindable for Sbml {
    fn read_child(&mut self, child: &XmlElement, ctx: &mut ReadContext) -> bool {
        if child.name() != "model" {
            return false;
        }
        bind_singleton(&mut self.model, "sbml", ErrorCode::SbmlAllowedElements, child, ctx);
        true
    }

    fn write_children(&self, out: &mut XmlOutputStream, version: &SchemaVersion) -> Result<()> {
        match self.model.get() {
            Some(model) => write_element(model, out, version),
            None => Ok(()),
        }
    }

    fn has_children(&self) -> bool {
        self.model.is_set()
    }

    fn child_nodes(&self) -> Vec<&dyn Node> {
        self.model.get().map(|m| m as &dyn Node).into_iter().collect()
    }
}

impl RootElement for Sbml {
    const FORMAT: Format = Format::Sbml;

    fn stamp_version(&mut self, version: &SchemaVersion) -> OperationResult {
        if version.format() != Self::FORMAT {
            return Err(OperationError::LevelVersionMismatch);
        }
        self.level.set(version.level())?;
        self.version.set(version.version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::TypedValue;

    #[test]
    fn test_stamp_version() {
        let mut root = Sbml::new();
        root.stamp_version(&SchemaVersion::latest(Format::Sbml)).unwrap();
        assert_eq!((root.level(), root.version()), (3, 2));
        assert_eq!(root.value_of("level"), Some(TypedValue::UnsignedInteger(3)));
    }

    #[test]
    fn test_stamp_foreign_version() {
        let mut root = Sbml::new();
        assert_eq!(
            root.stamp_version(&SchemaVersion::latest(Format::SedMl)),
            Err(OperationError::LevelVersionMismatch)
        );
        assert!(!root.is_set_level());
    }

    #[test]
    fn test_model_slot() {
        let mut root = Sbml::new();
        assert!(root.model().is_none());
        root.create_model().set_id("m").unwrap();
        assert_eq!(root.model().map(|m| m.id()), Some("m"));
        assert_eq!(root.children().len(), 1);
    }
}
