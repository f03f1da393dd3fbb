//! Property-based tests for identifier grammars and value coercion

use proptest::prelude::*;
use sbml_binding::binding::coercion::{coerce, format_double};
use sbml_binding::binding::{AttributeKind, CoercionFailure, TypedValue};
use sbml_binding::names::{is_valid_kisao_id, is_valid_sbo_term, is_valid_sid, is_valid_unit_sid};

proptest! {
    #[test]
    fn sid_grammar_accepts_letter_or_underscore_start(id in "[A-Za-z_][A-Za-z0-9_]{0,30}") {
        prop_assert!(is_valid_sid(&id));
        prop_assert!(is_valid_unit_sid(&id));
    }

    #[test]
    fn sid_grammar_rejects_digit_start(id in "[0-9][A-Za-z0-9_]{0,30}") {
        prop_assert!(!is_valid_sid(&id));
    }

    #[test]
    fn sid_grammar_rejects_punctuation(
        head in "[A-Za-z_]{1,5}",
        bad in "[-.: /]",
        tail in "[A-Za-z0-9_]{0,5}",
    ) {
        let id = format!("{}{}{}", head, bad, tail);
        prop_assert!(!is_valid_sid(&id));
    }

    #[test]
    fn sbo_terms_need_seven_digits(digits in "[0-9]{1,10}") {
        let term = format!("SBO:{}", digits);
        prop_assert_eq!(is_valid_sbo_term(&term), digits.len() == 7);
    }

    #[test]
    fn kisao_ids_need_seven_digits(digits in "[0-9]{1,10}") {
        let term = format!("KISAO:{}", digits);
        prop_assert_eq!(is_valid_kisao_id(&term), digits.len() == 7);
    }

    #[test]
    fn written_doubles_read_back(value in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        let text = format_double(value);
        match coerce(Some(&text), AttributeKind::Double) {
            Ok(TypedValue::Double(parsed)) => prop_assert_eq!(parsed, value),
            other => prop_assert!(false, "'{}' coerced to {:?}", text, other),
        }
    }

    #[test]
    fn words_are_not_doubles(word in "[a-zA-Z]{2,8}") {
        prop_assume!(!matches!(word.as_str(), "NaN" | "INF"));
        let coerced = coerce(Some(&word), AttributeKind::Double);
        let is_mismatch = matches!(coerced, Err(CoercionFailure::TypeMismatch { .. }));
        prop_assert!(is_mismatch);
    }

    #[test]
    fn unsigned_integers_parse(value in any::<u32>()) {
        let coerced = coerce(Some(&value.to_string()), AttributeKind::UnsignedInteger);
        prop_assert_eq!(coerced, Ok(TypedValue::UnsignedInteger(value)));
    }
}

#[test]
fn test_special_double_spellings() {
    let read = |text: &str| coerce(Some(text), AttributeKind::Double);
    assert!(matches!(read("INF"), Ok(TypedValue::Double(v)) if v == f64::INFINITY));
    assert!(matches!(read("-INF"), Ok(TypedValue::Double(v)) if v == f64::NEG_INFINITY));
    assert!(matches!(read("NaN"), Ok(TypedValue::Double(v)) if v.is_nan()));
    assert!(read("inf").is_err());
    assert!(read("infinity").is_err());
    assert!(read("1e3").is_ok());
}
