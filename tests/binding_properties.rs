//! Behavioral properties of the binding engine, exercised through documents

use pretty_assertions::assert_eq;
use sbml_binding::sbml::{Compartment, Event, Trigger};
use sbml_binding::{ErrorCode, OperationError, SbmlDocument, SedDocument, Severity};

const SBML_L3V2: &str = "http://www.sbml.org/sbml/level3/version2/core";
const SEDML_L1V3: &str = "http://sed-ml.org/sed-ml/level1/version3";

fn sbml_with_model(model_body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sbml xmlns="{}" level="3" version="2">
  <model id="m">
{}
  </model>
</sbml>"#,
        SBML_L3V2, model_body
    )
}

// ============================================================================
// Set attributes survive a write/read cycle
// ============================================================================

#[test]
fn test_set_attributes_round_trip() {
    let mut doc = SbmlDocument::new(3, 2).unwrap();
    let model = doc.root_mut().create_model();
    model.set_id("m").unwrap();
    let compartment = model.create_compartment();
    compartment.set_id("cell").unwrap();
    compartment.set_constant(true).unwrap();
    compartment.set_size(3.5).unwrap();

    let xml = doc.write_to_string().unwrap();
    let reread = SbmlDocument::read_from_str(&xml);
    assert_eq!(reread.num_errors(None), 0, "{}", reread.error_log());

    let compartment = reread
        .root()
        .model()
        .unwrap()
        .compartments()
        .get_by_id("cell")
        .unwrap();
    assert!(compartment.is_set_constant());
    assert!(compartment.constant());
    assert_eq!(compartment.size(), 3.5);
    assert!(!compartment.is_set_spatial_dimensions());
}

// ============================================================================
// Unset records report their sentinel
// ============================================================================

#[test]
fn test_unset_restores_sentinel() {
    let mut compartment = Compartment::new();
    compartment.set_size(2.0).unwrap();
    assert!(compartment.is_set_size());

    compartment.unset_size().unwrap();
    assert!(!compartment.is_set_size());
    assert!(compartment.size().is_nan());

    compartment.set_constant(false).unwrap();
    compartment.unset_constant().unwrap();
    assert!(!compartment.is_set_constant());
    assert!(!compartment.constant());
}

#[test]
fn test_unset_is_idempotent() {
    let mut compartment = Compartment::new();
    compartment.set_units("litre").unwrap();
    assert_eq!(compartment.unset_units(), Ok(()));
    assert_eq!(compartment.unset_units(), Ok(()));
    assert!(!compartment.is_set_units());

    let mut event = Event::new();
    assert_eq!(event.unset_trigger(), Ok(()));
    assert_eq!(event.unset_trigger(), Ok(()));
    assert!(event.trigger().is_none());
}

// ============================================================================
// Generic diagnostics are replaced, never duplicated
// ============================================================================

#[test]
fn test_type_mismatch_is_remapped_exclusively() {
    let xml = format!(
        r#"<sedML xmlns="{}" level="1" version="3">
  <listOfSimulations>
    <uniformTimeCourse id="s" initialTime="0" outputStartTime="0" outputEndTime="10" numberOfSteps="abc">
      <algorithm kisaoID="KISAO:0000019"/>
    </uniformTimeCourse>
  </listOfSimulations>
</sedML>"#,
        SEDML_L1V3
    );
    let doc = SedDocument::read_from_str(&xml);
    let log = doc.error_log();

    assert_eq!(
        log.count_code(ErrorCode::UniformTimeCourseNumberOfStepsMustBeInteger),
        1
    );
    assert_eq!(log.count_code(ErrorCode::XmlAttributeTypeMismatch), 0);
    assert_eq!(log.len(), 1);

    let simulation = doc.root().simulations().get_by_id("s").unwrap();
    assert!(!simulation.is_set_number_of_steps());
    assert!(simulation.is_set_output_end_time());
}

#[test]
fn test_root_level_mismatch_is_remapped() {
    let xml = format!(r#"<sbml xmlns="{}" level="abc" version="2"/>"#, SBML_L3V2);
    let doc = SbmlDocument::read_from_str(&xml);
    let log = doc.error_log();

    assert_eq!(log.count_code(ErrorCode::SbmlLevelMustBeNonNegativeInteger), 1);
    assert_eq!(log.count_code(ErrorCode::XmlAttributeTypeMismatch), 0);
    assert!(!doc.root().is_set_level());
    assert_eq!(doc.version().version(), 2);
}

#[test]
fn test_unknown_attributes_are_remapped_in_order() {
    let xml = sbml_with_model(
        r#"    <listOfParameters>
      <parameter id="k" constant="true" colour="red" shade="dark"/>
    </listOfParameters>"#,
    );
    let doc = SbmlDocument::read_from_str(&xml);
    let log = doc.error_log();

    assert_eq!(log.count_code(ErrorCode::ParameterAllowedAttributes), 2);
    assert_eq!(log.count_code(ErrorCode::UnknownAttribute), 0);
    let messages: Vec<&str> = log.iter().map(|record| record.message()).collect();
    let colour = messages.iter().position(|m| m.contains("colour")).unwrap();
    let shade = messages.iter().position(|m| m.contains("shade")).unwrap();
    assert!(colour < shade);
}

// ============================================================================
// Required-attribute predicate
// ============================================================================

#[test]
fn test_required_attributes_conjunction() {
    let xml = sbml_with_model(
        r#"    <listOfParameters>
      <parameter id="k"/>
    </listOfParameters>"#,
    );
    let mut doc = SbmlDocument::read_from_str(&xml);
    assert!(doc.error_log().contains(ErrorCode::ParameterAllowedAttributes));
    assert!(!doc.has_required_attributes());

    let parameter = doc
        .root_mut()
        .model_mut()
        .unwrap()
        .parameters_mut()
        .get_mut(0)
        .unwrap();
    parameter.set_constant(false).unwrap();
    assert!(doc.has_required_attributes());

    doc.root_mut().unset_level().unwrap();
    assert!(!doc.has_required_attributes());
}

// ============================================================================
// Copies are independent
// ============================================================================

#[test]
fn test_clone_is_independent() {
    let mut original = Compartment::new();
    original.set_id("c1").unwrap();
    original.set_size(1.0).unwrap();

    let mut copy = original.clone();
    copy.set_size(9.0).unwrap();
    copy.set_id("c2").unwrap();

    assert_eq!(original.size(), 1.0);
    assert_eq!(original.id(), "c1");
    assert_eq!(copy.id(), "c2");

    let mut event = Event::new();
    let mut trigger = Trigger::new();
    trigger.set_persistent(true).unwrap();
    event.set_trigger(&trigger).unwrap();
    trigger.set_persistent(false).unwrap();
    assert!(event.trigger().unwrap().persistent());
}

// ============================================================================
// Identifier references
// ============================================================================

#[test]
fn test_empty_reference_is_informational_and_unset() {
    let xml = sbml_with_model(
        r#"    <listOfCompartments>
      <compartment id="c" constant="true" units=""/>
    </listOfCompartments>"#,
    );
    let doc = SbmlDocument::read_from_str(&xml);
    let log = doc.error_log();

    assert_eq!(log.count_code(ErrorCode::EmptyStringIdentifier), 1);
    assert_eq!(log.count(Severity::Info), 1);
    assert_eq!(log.count(Severity::Warning), 0);
    assert_eq!(log.errors_at_least(Severity::Error).count(), 0);

    let compartment = doc.root().model().unwrap().compartments().get(0).unwrap();
    assert!(!compartment.is_set_units());
}

#[test]
fn test_invalid_reference_rejected() {
    let xml = sbml_with_model(
        r#"    <listOfCompartments>
      <compartment id="c" constant="true" units="1litre"/>
    </listOfCompartments>"#,
    );
    let doc = SbmlDocument::read_from_str(&xml);
    assert_eq!(
        doc.error_log().count_code(ErrorCode::CompartmentUnitsMustBeUnitSId),
        1
    );
    let compartment = doc.root().model().unwrap().compartments().get(0).unwrap();
    assert!(!compartment.is_set_units());

    let mut compartment = Compartment::new();
    assert_eq!(
        compartment.set_units("1litre"),
        Err(OperationError::InvalidAttributeValue)
    );
    assert!(!compartment.is_set_units());
}

#[test]
fn test_duplicate_ids_reported() {
    let xml = sbml_with_model(
        r#"    <listOfCompartments>
      <compartment id="x" constant="true"/>
    </listOfCompartments>
    <listOfParameters>
      <parameter id="x" constant="true"/>
    </listOfParameters>"#,
    );
    let doc = SbmlDocument::read_from_str(&xml);
    assert_eq!(doc.error_log().count_code(ErrorCode::DuplicateComponentId), 1);
}

// ============================================================================
// Singleton children
// ============================================================================

#[test]
fn test_duplicate_singleton_child() {
    let xml = sbml_with_model(
        r#"    <listOfEvents>
      <event id="e" useValuesFromTriggerTime="true">
        <trigger initialValue="true" persistent="true"/>
        <trigger initialValue="false" persistent="false"/>
      </event>
    </listOfEvents>"#,
    );
    let doc = SbmlDocument::read_from_str(&xml);
    assert_eq!(doc.error_log().count_code(ErrorCode::EventAllowedElements), 1);

    let event = doc.root().model().unwrap().events().get_by_id("e").unwrap();
    let trigger = event.trigger().unwrap();
    assert!(!trigger.initial_value());
    assert!(!trigger.persistent());
}

#[test]
fn test_notes_and_annotation_kept_verbatim() {
    let xml = sbml_with_model(
        r#"    <notes><p xmlns="http://www.w3.org/1999/xhtml">Hello</p></notes>
    <annotation><extra xmlns="urn:example">kept</extra></annotation>"#,
    );
    let doc = SbmlDocument::read_from_str(&xml);
    assert_eq!(doc.num_errors(None), 0, "{}", doc.error_log());

    let written = doc.write_to_string().unwrap();
    assert!(written.contains("Hello"));
    assert!(written.contains("urn:example"));
    assert!(written.contains("kept"));
}
