//! Attribute value coercion
//!
//! Text to typed value and back. Coercion is pure: it never logs. The XML layer
//! in [`crate::xml::attributes`] wraps it and turns type mismatches into
//! diagnostics.

use crate::names;
use std::fmt;
use thiserror::Error;

/// A coerced attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// `true` / `false`
    Boolean(bool),
    /// Signed 32-bit integer
    Integer(i32),
    /// Unsigned 32-bit integer
    UnsignedInteger(u32),
    /// Double, including NaN and the infinities
    Double(f64),
    /// String, identifier or enumeration literal
    Text(String),
}

impl TypedValue {
    /// The boolean, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The signed integer, if this is one
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            TypedValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The unsigned integer, if this is one
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            TypedValue::UnsignedInteger(u) => Some(*u),
            _ => None,
        }
    }

    /// The double, if this is one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// The text, if this is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_value(self))
    }
}

/// Declared type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// `true` / `false`
    Boolean,
    /// Signed 32-bit integer
    Integer,
    /// Unsigned 32-bit integer
    UnsignedInteger,
    /// Double
    Double,
    /// Free text
    String,
    /// XML ID (`metaid`)
    MetaId,
    /// Component identifier
    SId,
    /// Unit definition identifier
    UnitSId,
    /// Reference to a component identifier
    SIdRef,
    /// Reference to a unit identifier
    UnitSIdRef,
    /// Systems Biology Ontology term
    SboTerm,
    /// Closed, case-sensitive set of literals
    Enumeration(&'static [&'static str]),
}

impl AttributeKind {
    /// Human-readable description used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            AttributeKind::Boolean => "a boolean ('true' or 'false')",
            AttributeKind::Integer => "an integer",
            AttributeKind::UnsignedInteger => "a non-negative integer",
            AttributeKind::Double => "a double",
            AttributeKind::String => "a string",
            AttributeKind::MetaId => "an XML ID",
            AttributeKind::SId => "an SId",
            AttributeKind::UnitSId => "a UnitSId",
            AttributeKind::SIdRef => "an SIdRef",
            AttributeKind::UnitSIdRef => "a UnitSIdRef",
            AttributeKind::SboTerm => "an SBO term",
            AttributeKind::Enumeration(_) => "one of the enumerated values",
        }
    }

    /// True for identifier and reference kinds, whose syntax is checked after coercion
    pub fn is_identifier(&self) -> bool {
        matches!(
            self,
            AttributeKind::MetaId
                | AttributeKind::SId
                | AttributeKind::UnitSId
                | AttributeKind::SIdRef
                | AttributeKind::UnitSIdRef
                | AttributeKind::SboTerm
        )
    }

    /// Syntax check for identifier kinds; every other kind accepts any text
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            AttributeKind::MetaId => names::is_valid_xml_id(text),
            AttributeKind::SId | AttributeKind::SIdRef => names::is_valid_sid(text),
            AttributeKind::UnitSId | AttributeKind::UnitSIdRef => names::is_valid_unit_sid(text),
            AttributeKind::SboTerm => names::is_valid_sbo_term(text),
            _ => true,
        }
    }
}

/// Why coercion produced no value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionFailure {
    /// The attribute is absent from the input
    #[error("attribute is missing")]
    Missing,

    /// The attribute is present but its text does not parse as the declared type
    #[error("'{text}' is not {expected}")]
    TypeMismatch {
        /// Offending text, verbatim
        text: String,
        /// Description of the declared type
        expected: &'static str,
        /// Index of the generic diagnostic the XML layer logged for this failure
        logged: Option<usize>,
    },
}

/// Coerce raw attribute text to `kind`
pub fn coerce(raw: Option<&str>, kind: AttributeKind) -> Result<TypedValue, CoercionFailure> {
    let text = raw.ok_or(CoercionFailure::Missing)?;
    let mismatch = || CoercionFailure::TypeMismatch {
        text: text.to_string(),
        expected: kind.describe(),
        logged: None,
    };

    match kind {
        AttributeKind::Boolean => match text.trim() {
            "true" => Ok(TypedValue::Boolean(true)),
            "false" => Ok(TypedValue::Boolean(false)),
            _ => Err(mismatch()),
        },
        AttributeKind::Integer => text
            .trim()
            .parse::<i32>()
            .map(TypedValue::Integer)
            .map_err(|_| mismatch()),
        AttributeKind::UnsignedInteger => text
            .trim()
            .parse::<u32>()
            .map(TypedValue::UnsignedInteger)
            .map_err(|_| mismatch()),
        AttributeKind::Double => parse_double(text.trim())
            .map(TypedValue::Double)
            .ok_or_else(mismatch),
        AttributeKind::Enumeration(values) => {
            let trimmed = text.trim();
            if values.contains(&trimmed) {
                Ok(TypedValue::Text(trimmed.to_string()))
            } else {
                Err(mismatch())
            }
        }
        AttributeKind::String
        | AttributeKind::MetaId
        | AttributeKind::SId
        | AttributeKind::UnitSId
        | AttributeKind::SIdRef
        | AttributeKind::UnitSIdRef
        | AttributeKind::SboTerm => Ok(TypedValue::Text(text.to_string())),
    }
}

fn parse_double(text: &str) -> Option<f64> {
    match text {
        "NaN" => Some(f64::NAN),
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        // Rust also accepts "inf"/"infinity"; only the spellings above are numerals here
        _ if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => None,
        _ => text.parse::<f64>().ok(),
    }
}

/// Format a double the way it is written to XML
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else if value != 0.0 && (value.abs() < 1e-5 || value.abs() >= 1e15) {
        format!("{:e}", value)
    } else {
        value.to_string()
    }
}

/// Format a typed value as attribute text
pub fn format_value(value: &TypedValue) -> String {
    match value {
        TypedValue::Boolean(b) => (if *b { "true" } else { "false" }).to_string(),
        TypedValue::Integer(i) => i.to_string(),
        TypedValue::UnsignedInteger(u) => u.to_string(),
        TypedValue::Double(d) => format_double(*d),
        TypedValue::Text(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLOURS: &[&str] = &["red", "green"];

    fn is_mismatch(result: Result<TypedValue, CoercionFailure>) -> bool {
        matches!(result, Err(CoercionFailure::TypeMismatch { .. }))
    }

    #[test]
    fn test_missing_is_distinct_from_mismatch() {
        assert_eq!(
            coerce(None, AttributeKind::Boolean),
            Err(CoercionFailure::Missing)
        );
        assert!(is_mismatch(coerce(Some("yes"), AttributeKind::Boolean)));
    }

    #[test]
    fn test_boolean_literals() {
        assert_eq!(
            coerce(Some("true"), AttributeKind::Boolean),
            Ok(TypedValue::Boolean(true))
        );
        assert_eq!(
            coerce(Some(" false "), AttributeKind::Boolean),
            Ok(TypedValue::Boolean(false))
        );
        assert!(is_mismatch(coerce(Some("True"), AttributeKind::Boolean)));
        assert!(is_mismatch(coerce(Some("1"), AttributeKind::Boolean)));
    }

    #[test]
    fn test_integers_parse_completely() {
        assert_eq!(
            coerce(Some("-3"), AttributeKind::Integer),
            Ok(TypedValue::Integer(-3))
        );
        assert!(is_mismatch(coerce(Some("3abc"), AttributeKind::Integer)));
        assert!(is_mismatch(coerce(Some("2.5"), AttributeKind::Integer)));
        assert!(is_mismatch(coerce(Some("-1"), AttributeKind::UnsignedInteger)));
        assert_eq!(
            coerce(Some("4294967295"), AttributeKind::UnsignedInteger),
            Ok(TypedValue::UnsignedInteger(u32::MAX))
        );
        assert!(is_mismatch(coerce(Some("abc"), AttributeKind::UnsignedInteger)));
    }

    #[test]
    fn test_doubles() {
        assert_eq!(
            coerce(Some("3.5"), AttributeKind::Double),
            Ok(TypedValue::Double(3.5))
        );
        assert_eq!(
            coerce(Some("1e-3"), AttributeKind::Double),
            Ok(TypedValue::Double(0.001))
        );
        assert_eq!(
            coerce(Some("-INF"), AttributeKind::Double),
            Ok(TypedValue::Double(f64::NEG_INFINITY))
        );
        let nan = coerce(Some("NaN"), AttributeKind::Double).unwrap();
        assert!(nan.as_f64().unwrap().is_nan());
        assert!(is_mismatch(coerce(Some("inf"), AttributeKind::Double)));
        assert!(is_mismatch(coerce(Some("1.5x"), AttributeKind::Double)));
    }

    #[test]
    fn test_enumeration_is_case_sensitive() {
        let kind = AttributeKind::Enumeration(COLOURS);
        assert_eq!(
            coerce(Some("red"), kind),
            Ok(TypedValue::Text("red".into()))
        );
        assert!(is_mismatch(coerce(Some("Red"), kind)));
    }

    #[test]
    fn test_enumeration_ignores_surrounding_whitespace() {
        let kind = AttributeKind::Enumeration(COLOURS);
        assert_eq!(
            coerce(Some(" red\n"), kind),
            Ok(TypedValue::Text("red".into()))
        );
        assert!(is_mismatch(coerce(Some("r ed"), kind)));
    }

    #[test]
    fn test_identifiers_coerce_as_text() {
        // syntax is checked separately
        assert_eq!(
            coerce(Some("1bad"), AttributeKind::SId),
            Ok(TypedValue::Text("1bad".into()))
        );
        assert!(!AttributeKind::SId.accepts("1bad"));
        assert!(AttributeKind::SboTerm.accepts("SBO:0000001"));
        assert!(AttributeKind::Double.accepts("anything"));
    }

    #[test]
    fn test_format_double() {
        assert_eq!(format_double(f64::NAN), "NaN");
        assert_eq!(format_double(f64::INFINITY), "INF");
        assert_eq!(format_double(f64::NEG_INFINITY), "-INF");
        assert_eq!(format_double(3.5), "3.5");
        assert_eq!(format_double(0.0), "0");
        assert_eq!(format_double(1e-7), "1e-7");
        assert_eq!(format_double(2.5e20), "2.5e20");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&TypedValue::Boolean(true)), "true");
        assert_eq!(format_value(&TypedValue::Integer(-4)), "-4");
        assert_eq!(format_value(&TypedValue::UnsignedInteger(7)), "7");
        assert_eq!(format_value(&TypedValue::Text("x".into())), "x");
    }

    #[test]
    fn test_mismatch_message() {
        let err = coerce(Some("abc"), AttributeKind::UnsignedInteger).unwrap_err();
        assert_eq!(err.to_string(), "'abc' is not a non-negative integer");
    }
}
