//! Document-level reading, version detection and writing

use pretty_assertions::assert_eq;
use sbml_binding::binding::AttributeBindable;
use sbml_binding::sbml::UnitKind;
use sbml_binding::{AnyDocument, ErrorCode, Format, Limits, SbmlDocument, SedDocument, Severity};
use std::io::Write;

const SBML_L3V1: &str = "http://www.sbml.org/sbml/level3/version1/core";
const SBML_L3V2: &str = "http://www.sbml.org/sbml/level3/version2/core";
const SEDML_L1V2: &str = "http://sed-ml.org/sed-ml/level1/version2";

// ============================================================================
// Version detection
// ============================================================================

#[test]
fn test_version_from_attributes() {
    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="1"/>"#,
        SBML_L3V1
    ));
    assert_eq!((doc.version().level(), doc.version().version()), (3, 1));
    assert_eq!(doc.num_errors(None), 0);
}

#[test]
fn test_unsupported_pair_falls_back_to_latest() {
    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="2" version="4"/>"#,
        SBML_L3V2
    ));
    assert!(doc.error_log().contains(ErrorCode::InvalidLevelVersion));
    assert!(!doc.error_log().contains(ErrorCode::InvalidRootNamespace));
    assert_eq!((doc.version().level(), doc.version().version()), (3, 2));
    assert_eq!(doc.root().level(), 3);
    assert_eq!(doc.root().version(), 2);
}

#[test]
fn test_namespace_mismatch_logged() {
    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="2"/>"#,
        SBML_L3V1
    ));
    assert_eq!(doc.error_log().count_code(ErrorCode::InvalidRootNamespace), 1);
}

#[test]
fn test_wrong_root_element() {
    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sedML xmlns="{}" level="1" version="2"/>"#,
        SEDML_L1V2
    ));
    assert!(doc.error_log().contains(ErrorCode::BadXmlDocumentStructure));
    assert!(doc.root().model().is_none());
}

// ============================================================================
// Malformed and oversized input
// ============================================================================

#[test]
fn test_badly_formed_xml_is_fatal() {
    let doc = SbmlDocument::read_from_str("<sbml><model></sbml>");
    let log = doc.error_log();
    assert_eq!(log.len(), 1);
    let record = log.get(0).unwrap();
    assert_eq!(record.code(), ErrorCode::BadlyFormedXml);
    assert_eq!(record.severity(), Severity::Fatal);
    assert!(record.line() >= 1);
}

#[test]
fn test_depth_limit_reported() {
    let mut xml = format!(r#"<sbml xmlns="{}" level="3" version="2">"#, SBML_L3V2);
    for _ in 0..200 {
        xml.push_str("<annotation>");
    }
    for _ in 0..200 {
        xml.push_str("</annotation>");
    }
    xml.push_str("</sbml>");

    let doc = SbmlDocument::read_from_str_with_limits(&xml, &Limits::strict());
    assert!(doc.error_log().contains(ErrorCode::XmlResourceLimitExceeded));
}

#[test]
fn test_missing_file_is_reported() {
    let doc = SbmlDocument::read_from_file("/nonexistent/model.xml");
    assert!(doc.error_log().contains(ErrorCode::XmlFileUnreadable));
}

// ============================================================================
// Version-dependent rules
// ============================================================================

#[test]
fn test_avogadro_only_in_l3v1() {
    let body = r#"<model>
    <listOfUnitDefinitions>
      <unitDefinition id="per_mole">
        <listOfUnits>
          <unit kind="avogadro" exponent="1" scale="0" multiplier="1"/>
        </listOfUnits>
      </unitDefinition>
    </listOfUnitDefinitions>
  </model>"#;

    let v1 = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="1">{}</sbml>"#,
        SBML_L3V1, body
    ));
    assert_eq!(v1.num_errors(None), 0, "{}", v1.error_log());
    let unit = v1.root().model().unwrap().unit_definitions().get(0).unwrap().units().get(0).unwrap();
    assert_eq!(unit.kind(), UnitKind::Avogadro);

    let v2 = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="2">{}</sbml>"#,
        SBML_L3V2, body
    ));
    assert_eq!(v2.error_log().count_code(ErrorCode::UnitKindMustBeUnitKind), 1);
}

#[test]
fn test_id_on_core_only_from_l3v2() {
    let parameter = r#"<model><listOfParameters><parameter id="k" constant="true"/></listOfParameters></model>"#;
    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="1" id="root">{}</sbml>"#,
        SBML_L3V1, parameter
    ));
    assert_eq!(doc.error_log().count_code(ErrorCode::SbmlAllowedCoreAttributes), 1);

    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="2" id="root">{}</sbml>"#,
        SBML_L3V2, parameter
    ));
    assert_eq!(doc.num_errors(None), 0, "{}", doc.error_log());
}

#[test]
fn test_empty_unit_definition_depends_on_version() {
    let body = r#"<model><listOfUnitDefinitions><unitDefinition id="u"/></listOfUnitDefinitions></model>"#;
    let v1 = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="1">{}</sbml>"#,
        SBML_L3V1, body
    ));
    assert!(!v1.has_required_elements());

    let v2 = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="2">{}</sbml>"#,
        SBML_L3V2, body
    ));
    assert!(v2.has_required_elements());
}

#[test]
fn test_sedml_step_count_spelling() {
    let doc = SedDocument::read_from_str(&format!(
        r#"<sedML xmlns="{}" level="1" version="2">
  <listOfSimulations>
    <uniformTimeCourse id="s" initialTime="0" outputStartTime="0" outputEndTime="5" numberOfPoints="50">
      <algorithm kisaoID="KISAO:0000019"/>
    </uniformTimeCourse>
  </listOfSimulations>
</sedML>"#,
        SEDML_L1V2
    ));
    assert_eq!(doc.num_errors(None), 0, "{}", doc.error_log());
    let simulation = doc.root().simulations().get(0).unwrap();
    assert_eq!(simulation.number_of_steps(), 50);

    let written = doc.write_to_string().unwrap();
    assert!(written.contains(r#"numberOfPoints="50""#));
    assert!(!written.contains("numberOfSteps"));
}

// ============================================================================
// Unknown content
// ============================================================================

#[test]
fn test_unrecognized_children() {
    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="2">
  <model>
    <listOfWidgets/>
    <foreign xmlns="urn:example"/>
  </model>
</sbml>"#,
        SBML_L3V2
    ));
    assert_eq!(doc.error_log().count_code(ErrorCode::UnrecognizedElement), 2);
}

#[test]
fn test_duplicate_list_container() {
    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="2">
  <model>
    <listOfParameters><parameter id="a" constant="true"/></listOfParameters>
    <listOfParameters><parameter id="b" constant="true"/></listOfParameters>
  </model>
</sbml>"#,
        SBML_L3V2
    ));
    assert_eq!(doc.error_log().count_code(ErrorCode::ModelAllowedElements), 1);
    assert_eq!(doc.root().model().unwrap().parameters().len(), 2);
}

#[test]
fn test_duplicate_empty_list_container() {
    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="2">
  <model id="m"><listOfParameters/><listOfParameters/></model>
</sbml>"#,
        SBML_L3V2
    ));
    assert_eq!(doc.error_log().count_code(ErrorCode::ModelAllowedElements), 1);
    assert!(doc.root().model().unwrap().parameters().is_empty());
}

#[test]
fn test_second_notes_wins() {
    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="2">
  <model id="m">
    <notes><p xmlns="http://www.w3.org/1999/xhtml">first</p></notes>
    <notes><p xmlns="http://www.w3.org/1999/xhtml">second</p></notes>
  </model>
</sbml>"#,
        SBML_L3V2
    ));
    assert_eq!(doc.error_log().count_code(ErrorCode::MultipleNotesElements), 1);

    let written = doc.write_to_string().unwrap();
    assert!(written.contains("second"));
    assert!(!written.contains("first"));
}

#[test]
fn test_wrong_item_in_list() {
    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="2">
  <model>
    <listOfParameters><compartment id="c" constant="true"/></listOfParameters>
  </model>
</sbml>"#,
        SBML_L3V2
    ));
    assert!(doc.error_log().contains(ErrorCode::ListOfAllowedElements));
    assert!(doc.root().model().unwrap().parameters().is_empty());
}

// ============================================================================
// Writing
// ============================================================================

#[test]
fn test_new_document_writes_namespace_and_version() {
    let doc = SbmlDocument::new(3, 1).unwrap();
    let xml = doc.write_to_string().unwrap();
    assert!(xml.contains(SBML_L3V1));
    assert!(xml.contains(r#"level="3""#));
    assert!(xml.contains(r#"version="1""#));

    let reread = SbmlDocument::read_from_str(&xml);
    assert_eq!(reread.num_errors(None), 0, "{}", reread.error_log());
}

#[test]
fn test_write_and_read_file() {
    let mut doc = SedDocument::new(1, 3).unwrap();
    let simulation = doc.root_mut().create_simulation();
    simulation.set_id("sim").unwrap();
    simulation.set_initial_time(0.0).unwrap();
    simulation.set_output_start_time(0.0).unwrap();
    simulation.set_output_end_time(100.0).unwrap();
    simulation.set_number_of_steps(1000).unwrap();
    simulation.create_algorithm().set_kisao_id("KISAO:0000019").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sim.sedml");
    doc.write_to_file(&path).unwrap();

    let reread = SedDocument::read_from_file(&path);
    assert_eq!(reread.num_errors(None), 0, "{}", reread.error_log());
    assert!(reread.has_required_attributes());
    assert!(reread.has_required_elements());
    let simulation = reread.root().simulations().get_by_id("sim").unwrap();
    assert_eq!(simulation.output_end_time(), 100.0);
    assert_eq!(simulation.algorithm().unwrap().kisao_id(), "KISAO:0000019");
}

#[test]
fn test_any_document_picks_format() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"<sedML xmlns="{}" level="1" version="2"/>"#,
        SEDML_L1V2
    )
    .unwrap();

    let doc = AnyDocument::read_from_file(file.path());
    assert_eq!(doc.format(), Format::SedMl);
    assert_eq!(doc.version().version(), 2);

    let doc = AnyDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="2"/>"#,
        SBML_L3V2
    ));
    assert_eq!(doc.format(), Format::Sbml);
}

#[test]
fn test_inherited_prefix_survives_round_trip() {
    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" xmlns:ex="urn:example" level="3" version="2">
  <model id="m">
    <annotation><ex:data ex:source="lab">kept</ex:data></annotation>
  </model>
</sbml>"#,
        SBML_L3V2
    ));
    assert_eq!(doc.num_errors(None), 0, "{}", doc.error_log());

    let written = doc.write_to_string().unwrap();
    let reread = SbmlDocument::read_from_str(&written);
    assert_eq!(reread.num_errors(None), 0, "{}", reread.error_log());

    let annotation = reread.root().model().unwrap().core().annotation().unwrap();
    let data = annotation.children().next().unwrap();
    assert_eq!(data.namespace(), Some("urn:example"));
    assert_eq!(data.text(), "kept");
    assert_eq!(reread.write_to_string().unwrap(), written);
}

#[test]
fn test_notes_whitespace_survives_round_trip() {
    let doc = SbmlDocument::read_from_str(&format!(
        r#"<sbml xmlns="{}" level="3" version="2">
  <model id="m">
    <notes><p xmlns="http://www.w3.org/1999/xhtml">Hello <b>big</b> world</p></notes>
  </model>
</sbml>"#,
        SBML_L3V2
    ));
    let written = doc.write_to_string().unwrap();
    assert!(written.contains("Hello <b>big</b> world"), "{}", written);
}
