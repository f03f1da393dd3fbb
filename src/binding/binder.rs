//! Element binder
//!
//! Drives one element through its read and write paths. Reading never aborts:
//! every problem becomes a diagnostic and the affected record stays unset.

use super::coercion::CoercionFailure;
use super::context::ReadContext;
use super::element::{AttributeBindable, ChildBindable};
use super::record::Singleton;
use super::rules::{AttributeRule, ElementCodes};
use crate::diagnostics::{ErrorCode, ErrorRecord};
use crate::error::{Error, Result};
use crate::versions::SchemaVersion;
use crate::xml::attributes::{flag_unknown_attributes, read_attribute};
use crate::xml::{AttributeList, XmlElement, XmlOutputStream};

/// Progress of one element through the read path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    /// Start tag seen, attributes not yet examined
    AwaitingAttributes,
    /// Every declared attribute processed
    AttributesConsumed,
    /// Reading child elements
    AwaitingChildren,
    /// Done, possibly with diagnostics
    Complete,
}

impl ReadState {
    fn advance(&mut self, next: ReadState, element: &str) {
        tracing::trace!(element, from = ?*self, to = ?next, "read state");
        *self = next;
    }
}

/// Read `element` into `node`
pub fn bind_element<E>(node: &mut E, element: &XmlElement, ctx: &mut ReadContext)
where
    E: AttributeBindable + ChildBindable,
{
    let name = node.element_name();
    let version = *ctx.version();
    let mut state = ReadState::AwaitingAttributes;

    let Some(rules) = node.rules(&version) else {
        tracing::warn!(element = name, %version, "no rule set registered");
        ctx.report(
            ErrorCode::UnsupportedSchemaVariant,
            format!("The <{}> element has no rules for {}.", name, version),
            element,
        );
        state.advance(ReadState::Complete, name);
        return;
    };

    // Unknown attributes are remapped before any attribute is processed
    let flagged = flag_unknown_attributes(element, &rules.schema(&version), ctx);
    remap_unknown_attributes(&flagged, &rules.codes, ctx);

    for rule in rules.effective(&version) {
        bind_attribute(node, rule, &rules.codes, element, ctx);
    }
    state.advance(ReadState::AttributesConsumed, name);

    state.advance(ReadState::AwaitingChildren, name);
    for child in element.cursor() {
        bind_child(node, element, child, ctx);
    }

    node.check_after_read(element, ctx);
    state.advance(ReadState::Complete, name);
}

fn remap_unknown_attributes(flagged: &[usize], codes: &ElementCodes, ctx: &mut ReadContext) {
    // Take from the back so earlier indices stay valid
    let mut originals: Vec<ErrorRecord> = flagged
        .iter()
        .rev()
        .filter_map(|&index| ctx.log_mut().take(index))
        .collect();
    originals.reverse();

    for original in &originals {
        let code = match original.code() {
            ErrorCode::UnknownCoreAttribute => codes.allowed_core_attributes,
            _ => codes.allowed_attributes,
        };
        ctx.relog(code, original);
    }
}

fn bind_attribute<E>(
    node: &mut E,
    rule: &AttributeRule,
    codes: &ElementCodes,
    element: &XmlElement,
    ctx: &mut ReadContext,
) where
    E: AttributeBindable,
{
    let name = node.element_name();
    match read_attribute(element, rule.name, rule.kind, ctx) {
        Err(CoercionFailure::Missing) => {
            if rule.required {
                ctx.report(
                    codes.allowed_attributes,
                    format!(
                        "The required attribute '{}' is missing from the <{}> element.",
                        rule.name, name
                    ),
                    element,
                );
            }
        }
        Err(CoercionFailure::TypeMismatch {
            text,
            expected,
            logged,
        }) => match logged.and_then(|index| ctx.log_mut().take(index)) {
            Some(generic) => {
                ctx.relog(rule.invalid, &generic);
            }
            None => {
                ctx.report(
                    rule.invalid,
                    format!("The value '{}' of attribute '{}' is not {}.", text, rule.name, expected),
                    element,
                );
            }
        },
        Ok(value) => {
            if rule.kind.is_identifier() {
                let text = value.as_str().unwrap_or_default();
                if text.is_empty() {
                    ctx.report(
                        ErrorCode::EmptyStringIdentifier,
                        format!(
                            "The '{}' attribute on the <{}> element is empty and is treated as unset.",
                            rule.name, name
                        ),
                        element,
                    );
                    return;
                }
                if !rule.kind.accepts(text) {
                    ctx.report(
                        rule.invalid,
                        format!(
                            "The value '{}' of the '{}' attribute on the <{}> element is not {}.",
                            text,
                            rule.name,
                            name,
                            rule.kind.describe()
                        ),
                        element,
                    );
                    return;
                }
                ctx.register_identifier(rule.kind, text, element);
            }
            if let Err(err) = node.assign(rule.name, value) {
                tracing::warn!(element = name, attribute = rule.name, %err, "rule table and element disagree");
            }
        }
    }
}

fn bind_child<E>(node: &mut E, parent: &XmlElement, child: &XmlElement, ctx: &mut ReadContext)
where
    E: AttributeBindable + ChildBindable,
{
    let name = node.element_name();
    if child.namespace() != parent.namespace() {
        ctx.report(
            ErrorCode::UnrecognizedElement,
            format!(
                "The <{}> element in namespace '{}' is not permitted inside <{}>.",
                child.qualified_name(),
                child.namespace().unwrap_or_default(),
                name
            ),
            child,
        );
        return;
    }

    match child.name() {
        "notes" => {
            if node.core_mut().set_notes(child.clone()).is_some() {
                ctx.report(
                    ErrorCode::MultipleNotesElements,
                    format!("The <{}> element has more than one <notes> child.", name),
                    child,
                );
            }
        }
        "annotation" => {
            if node.core_mut().set_annotation(child.clone()).is_some() {
                ctx.report(
                    ErrorCode::MultipleAnnotationElements,
                    format!("The <{}> element has more than one <annotation> child.", name),
                    child,
                );
            }
        }
        _ => {
            if !node.read_child(child, ctx) {
                ctx.report(
                    ErrorCode::UnrecognizedElement,
                    format!("The <{}> element is not permitted inside <{}>.", child.name(), name),
                    child,
                );
            }
        }
    }
}

/// Read a 0-or-1 child into `slot`
///
/// A second occurrence logs `duplicate` and replaces the first.
pub fn bind_singleton<E>(
    slot: &mut Singleton<E>,
    parent: &str,
    duplicate: ErrorCode,
    child: &XmlElement,
    ctx: &mut ReadContext,
) where
    E: AttributeBindable + ChildBindable + Default,
{
    if slot.is_set() {
        ctx.report(
            duplicate,
            format!(
                "Only one <{}> element is permitted inside <{}>; the later one replaces the earlier.",
                child.name(),
                parent
            ),
            child,
        );
    }
    let mut node = E::default();
    bind_element(&mut node, child, ctx);
    slot.replace(node);
}

/// Write `node` and its subtree
pub fn write_element<E>(node: &E, out: &mut XmlOutputStream, version: &SchemaVersion) -> Result<()>
where
    E: AttributeBindable + ChildBindable,
{
    write_element_with(node, out, version, AttributeList::new())
}

/// Write `node`, placing `leading` (namespace declarations) before its attributes
pub fn write_element_with<E>(
    node: &E,
    out: &mut XmlOutputStream,
    version: &SchemaVersion,
    leading: AttributeList,
) -> Result<()>
where
    E: AttributeBindable + ChildBindable,
{
    let name = node.element_name();
    let rules = node.rules(version).ok_or_else(|| Error::UnsupportedVariant {
        element: name,
        version: version.key().to_string(),
    })?;

    let mut attributes = leading;
    for attribute in rules.write_order(version) {
        if let Some(value) = node.value_of(attribute) {
            attributes.push(attribute, None, &value);
        }
    }

    let core = node.core();
    if !core.has_content() && !node.has_children() {
        return out.empty_element(name, &attributes);
    }

    out.start_element(name, &attributes)?;
    if let Some(notes) = core.notes() {
        out.write_verbatim(notes)?;
    }
    if let Some(annotation) = core.annotation() {
        out.write_verbatim(annotation)?;
    }
    node.write_children(out, version)?;
    out.end_element(name)
}
