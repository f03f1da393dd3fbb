//! Attribute rules and level/version dispatch
//!
//! Each element type owns a [`VariantTable`] mapping every supported
//! (level, version, package version) triple to an [`ElementRules`] value. Lookup is
//! exact equality with no fallback: a missing entry is a defect in the tables,
//! reported by the binder as `UnsupportedSchemaVariant`.

use super::coercion::AttributeKind;
use super::schema::AttributeSchema;
use crate::diagnostics::ErrorCode;
use crate::versions::{SchemaVersion, VersionKey};

/// Rule for one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRule {
    /// Attribute name
    pub name: &'static str,
    /// Declared type
    pub kind: AttributeKind,
    /// Whether the attribute must be present
    pub required: bool,
    /// Code logged when the value has the wrong type or identifier syntax
    pub invalid: ErrorCode,
}

impl AttributeRule {
    /// Optional attribute
    pub const fn optional(name: &'static str, kind: AttributeKind, invalid: ErrorCode) -> Self {
        Self {
            name,
            kind,
            required: false,
            invalid,
        }
    }

    /// Required attribute
    pub const fn required(name: &'static str, kind: AttributeKind, invalid: ErrorCode) -> Self {
        Self {
            name,
            kind,
            required: true,
            invalid,
        }
    }

    /// Optional free-text attribute; text never fails coercion
    pub const fn text(name: &'static str) -> Self {
        Self::optional(name, AttributeKind::String, ErrorCode::XmlAttributeTypeMismatch)
    }
}

/// Element-specific codes the binder remaps generic problems to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementCodes {
    /// Unknown attribute, or required attribute missing
    pub allowed_attributes: ErrorCode,
    /// Core attribute not permitted on this element at this version
    pub allowed_core_attributes: ErrorCode,
}

/// Attribute rules for one element at one level/version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRules {
    /// Remap targets
    pub codes: ElementCodes,
    /// Element-specific attributes, in write order
    pub attributes: &'static [AttributeRule],
}

/// Rules for the attributes every element of a format may carry
static CORE_RULES: &[AttributeRule] = &[
    AttributeRule::optional("metaid", AttributeKind::MetaId, ErrorCode::InvalidMetaidSyntax),
    AttributeRule::optional("sboTerm", AttributeKind::SboTerm, ErrorCode::InvalidSboTermSyntax),
    AttributeRule::optional("id", AttributeKind::SId, ErrorCode::InvalidIdSyntax),
    AttributeRule::text("name"),
];

impl ElementRules {
    /// Every rule in force at `version`: the version's core attributes the element
    /// does not re-declare, then the element's own attributes
    pub fn effective(&self, version: &SchemaVersion) -> Vec<&'static AttributeRule> {
        let own = self.attributes;
        let core = version.core_attributes();
        CORE_RULES
            .iter()
            .filter(|rule| core.contains(&rule.name))
            .filter(|rule| !own.iter().any(|r| r.name == rule.name))
            .chain(own.iter())
            .collect()
    }

    /// Expected-attribute schema at `version`
    pub fn schema(&self, version: &SchemaVersion) -> AttributeSchema {
        let mut schema = AttributeSchema::new();
        for rule in self.effective(version) {
            schema.register_expected(rule.name, None, None);
        }
        schema
    }

    /// Attribute names to attempt on write, in order
    pub fn write_order(&self, version: &SchemaVersion) -> Vec<&'static str> {
        self.effective(version).iter().map(|r| r.name).collect()
    }

    /// Required attribute names at `version`
    pub fn required(&self, version: &SchemaVersion) -> impl Iterator<Item = &'static str> {
        self.effective(version)
            .into_iter()
            .filter(|r| r.required)
            .map(|r| r.name)
    }
}

/// Static table of per-version values with exact-match lookup
#[derive(Debug)]
pub struct VariantTable<T: 'static> {
    pub(crate) entries: &'static [(VersionKey, T)],
}

impl<T: 'static> VariantTable<T> {
    /// Entry for exactly `key`
    pub fn select(&self, key: VersionKey) -> Option<&T> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    /// Supported keys
    pub fn keys(&self) -> impl Iterator<Item = VersionKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}

/// Rule table for elements available at a single set of versions
pub type RuleTable = VariantTable<&'static ElementRules>;

impl RuleTable {
    /// Rules for `version`
    pub fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        self.select(version.key()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::versions::{Format, SBML_L3V1, SBML_L3V2};

    static SAMPLE: ElementRules = ElementRules {
        codes: ElementCodes {
            allowed_attributes: ErrorCode::ParameterAllowedAttributes,
            allowed_core_attributes: ErrorCode::ParameterAllowedCoreAttributes,
        },
        attributes: &[
            AttributeRule::required("id", AttributeKind::SId, ErrorCode::InvalidIdSyntax),
            AttributeRule::optional("value", AttributeKind::Double, ErrorCode::ParameterValueMustBeDouble),
        ],
    };

    static SAMPLE_TABLE: RuleTable = VariantTable {
        entries: &[(SBML_L3V2, &SAMPLE)],
    };

    #[test]
    fn test_effective_rules_core_first() {
        let v1 = SchemaVersion::new(Format::Sbml, 3, 1, 1).unwrap();
        let v2 = SchemaVersion::new(Format::Sbml, 3, 2, 1).unwrap();

        assert_eq!(SAMPLE.write_order(&v1), vec!["metaid", "sboTerm", "id", "value"]);
        // the element's own `id` replaces the core one
        assert_eq!(
            SAMPLE.write_order(&v2),
            vec!["metaid", "sboTerm", "name", "id", "value"]
        );
        assert_eq!(SAMPLE.required(&v2).collect::<Vec<_>>(), vec!["id"]);
        assert!(SAMPLE.schema(&v2).is_expected("name", None));
        assert!(!SAMPLE.schema(&v1).is_expected("name", None));
    }

    #[test]
    fn test_select_is_exact() {
        assert!(SAMPLE_TABLE.select(SBML_L3V2).is_some());
        assert!(SAMPLE_TABLE.select(SBML_L3V1).is_none());
        assert!(SAMPLE_TABLE.select(VersionKey::new(3, 2, 2)).is_none());
        assert_eq!(SAMPLE_TABLE.keys().count(), 1);
    }
}
