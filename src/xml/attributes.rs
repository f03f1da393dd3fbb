//! Generic attribute handling
//!
//! This is the layer below the element binder. It knows nothing about specific
//! elements: it flags attributes the schema does not expect and turns coercion
//! failures into the generic type-mismatch diagnostic. Both return the log
//! indices of what they logged so the binder can replace those records with
//! element-specific ones.

use super::input::XmlElement;
use crate::binding::coercion::{coerce, AttributeKind, CoercionFailure, TypedValue};
use crate::binding::context::ReadContext;
use crate::binding::schema::AttributeSchema;
use crate::diagnostics::ErrorCode;

/// Log `UnknownAttribute` / `UnknownCoreAttribute` for every local attribute of
/// `element` that `schema` does not expect
///
/// Attributes qualified with a foreign namespace belong to other packages and are
/// passed through. Returns the indices of the logged records, in order.
pub fn flag_unknown_attributes(
    element: &XmlElement,
    schema: &AttributeSchema,
    ctx: &mut ReadContext,
) -> Vec<usize> {
    let core_names = ctx.version().format().core_attribute_names();
    let mut flagged = Vec::new();
    for attribute in element.attributes() {
        if !element.is_local(attribute) {
            continue;
        }
        if schema.is_expected(attribute.name(), None) {
            continue;
        }
        let code = if core_names.contains(&attribute.name()) {
            ErrorCode::UnknownCoreAttribute
        } else {
            ErrorCode::UnknownAttribute
        };
        let index = ctx.report(
            code,
            format!(
                "The attribute '{}' is not permitted on the <{}> element.",
                attribute.qualified_name(),
                element.name()
            ),
            element,
        );
        flagged.push(index);
    }
    flagged
}

/// Read and coerce one attribute of `element`
///
/// On a type mismatch the generic `XmlAttributeTypeMismatch` is logged and its
/// index returned inside the failure.
pub fn read_attribute(
    element: &XmlElement,
    name: &str,
    kind: AttributeKind,
    ctx: &mut ReadContext,
) -> Result<TypedValue, CoercionFailure> {
    match coerce(element.attribute(name), kind) {
        Err(CoercionFailure::TypeMismatch { text, expected, .. }) => {
            let index = ctx.report(
                ErrorCode::XmlAttributeTypeMismatch,
                format!("The value '{}' of attribute '{}' is not {}.", text, name, expected),
                element,
            );
            Err(CoercionFailure::TypeMismatch {
                text,
                expected,
                logged: Some(index),
            })
        }
        other => other,
    }
}
