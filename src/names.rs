//! Identifier and reference syntax
//!
//! Pure predicates for the identifier grammars used across the format family.
//! None of these functions log anything: reporting a bad identifier is the job of
//! whoever asked.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static SID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("SId pattern is valid")
});

static SBO_TERM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^SBO:[0-9]{7}$").expect("SBO term pattern is valid"));

static KISAO_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^KISAO:[0-9]{7}$").expect("KiSAO pattern is valid"));

/// Check if a string is a valid SId (`letter | '_'` then `letter | digit | '_'`*)
pub fn is_valid_sid(text: &str) -> bool {
    SID.is_match(text)
}

/// Check if a string is a valid UnitSId (same grammar as SId)
pub fn is_valid_unit_sid(text: &str) -> bool {
    SID.is_match(text)
}

/// Check if a string is a valid SBO term reference such as `SBO:0000064`
pub fn is_valid_sbo_term(text: &str) -> bool {
    SBO_TERM.is_match(text)
}

/// Check if a string is a valid KiSAO term reference such as `KISAO:0000019`
pub fn is_valid_kisao_id(text: &str) -> bool {
    KISAO_ID.is_match(text)
}

fn is_name_start_char(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || c.is_numeric()
        || c == '-'
        || c == '.'
        || c == '\u{B7}'
        || ('\u{300}'..='\u{36F}').contains(&c)
        || ('\u{203F}'..='\u{2040}').contains(&c)
}

/// Check if a string is a valid XML `ID` (the grammar of `metaid`)
pub fn is_valid_xml_id(text: &str) -> bool {
    is_valid_ncname(text)
}

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Check if a string is a valid QName (qualified name)
pub fn is_valid_qname(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }

    // QName can be "prefix:localName" or just "localName"
    if let Some((prefix, local)) = name.split_once(':') {
        is_valid_ncname(prefix) && is_valid_ncname(local)
    } else {
        is_valid_ncname(name)
    }
}

/// Validate an SId and return an error if invalid
pub fn validate_sid(text: &str) -> Result<()> {
    if is_valid_sid(text) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid SId: '{}'", text)))
    }
}

/// Validate an XML ID and return an error if invalid
pub fn validate_xml_id(text: &str) -> Result<()> {
    if is_valid_xml_id(text) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid XML ID: '{}'", text)))
    }
}

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_sid() {
        assert!(is_valid_sid("compartment"));
        assert!(is_valid_sid("_c1"));
        assert!(is_valid_sid("k_cat_2"));

        assert!(!is_valid_sid(""));
        assert!(!is_valid_sid("1abc"));
        assert!(!is_valid_sid("a-b"));
        assert!(!is_valid_sid("a.b"));
        assert!(!is_valid_sid("sp ace"));
        assert!(!is_valid_sid("caf\u{e9}"));
    }

    #[test]
    fn test_is_valid_xml_id() {
        assert!(is_valid_xml_id("meta_1"));
        assert!(is_valid_xml_id("m-1.2"));
        assert!(is_valid_xml_id("caf\u{e9}"));

        assert!(!is_valid_xml_id(""));
        assert!(!is_valid_xml_id("1meta"));
        assert!(!is_valid_xml_id("-meta"));
        assert!(!is_valid_xml_id("a:b"));
    }

    #[test]
    fn test_sbo_and_kisao_terms() {
        assert!(is_valid_sbo_term("SBO:0000064"));
        assert!(!is_valid_sbo_term("SBO:64"));
        assert!(!is_valid_sbo_term("sbo:0000064"));

        assert!(is_valid_kisao_id("KISAO:0000019"));
        assert!(!is_valid_kisao_id("KISAO_0000019"));
        assert!(!is_valid_kisao_id("KISAO:00000190"));
    }

    #[test]
    fn test_is_valid_qname() {
        assert!(is_valid_qname("element"));
        assert!(is_valid_qname("prefix:element"));

        assert!(!is_valid_qname(""));
        assert!(!is_valid_qname(":element"));
        assert!(!is_valid_qname("element:"));
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("element"), (None, "element"));
        assert_eq!(split_qname("xs:element"), (Some("xs"), "element"));
    }

    #[test]
    fn test_validate_sid() {
        assert!(validate_sid("c1").is_ok());
        assert!(matches!(validate_sid("1c"), Err(Error::Name(_))));
        assert!(validate_xml_id("9").is_err());
    }
}
