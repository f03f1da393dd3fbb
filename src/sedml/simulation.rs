//! `<uniformTimeCourse>` and `<algorithm>`

use crate::binding::record::Plain;
use crate::binding::{
    bind_singleton, write_element, Attribute, AttributeBindable, AttributeKind, AttributeRule,
    ChildBindable, Core, ElementCodes, ElementRules, Listable, Node, ReadContext, RuleTable,
    Singleton, TextAttribute, TypedValue, VariantTable,
};
use crate::diagnostics::ErrorCode;
use crate::error::{OperationError, OperationResult, Result};
use crate::names;
use crate::versions::{SchemaVersion, SEDML_L1V2, SEDML_L1V3};
use crate::xml::{XmlElement, XmlOutputStream};

static ALGORITHM_RULES: ElementRules = ElementRules {
    codes: ElementCodes {
        allowed_attributes: ErrorCode::AlgorithmAllowedAttributes,
        allowed_core_attributes: ErrorCode::AlgorithmAllowedCoreAttributes,
    },
    attributes: &[AttributeRule::required(
        "kisaoID",
        AttributeKind::String,
        ErrorCode::AlgorithmKisaoIdMustBeKisaoTerm,
    )],
};

static ALGORITHM_VARIANTS: RuleTable = VariantTable {
    entries: &[(SEDML_L1V2, &ALGORITHM_RULES), (SEDML_L1V3, &ALGORITHM_RULES)],
};

/// Simulation algorithm, named by a KiSAO term
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Algorithm {
    core: Core,
    kisao_id: TextAttribute<Plain>,
}

impl Algorithm {
    /// Create an algorithm with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Algorithm with the given KiSAO term
    pub fn with_kisao_id(kisao_id: &str) -> std::result::Result<Self, OperationError> {
        let mut algorithm = Self::new();
        algorithm.set_kisao_id(kisao_id)?;
        Ok(algorithm)
    }

    /// KiSAO term (empty while unset)
    pub fn kisao_id(&self) -> &str {
        self.kisao_id.get()
    }

    /// Whether `kisaoID` is set
    pub fn is_set_kisao_id(&self) -> bool {
        self.kisao_id.is_set()
    }

    /// Set `kisaoID`; must look like `KISAO:0000000`
    pub fn set_kisao_id(&mut self, kisao_id: &str) -> OperationResult {
        if !kisao_id.is_empty() && !names::is_valid_kisao_id(kisao_id) {
            return Err(OperationError::InvalidAttributeValue);
        }
        self.kisao_id.set(kisao_id)
    }

    /// Unset `kisaoID`
    pub fn unset_kisao_id(&mut self) -> OperationResult {
        self.kisao_id.unset()
    }
}

impl AttributeBindable for Algorithm {
    fn element_name(&self) -> &'static str {
        "algorithm"
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        ALGORITHM_VARIANTS.rules(version)
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    // Read values are stored verbatim; the syntax check runs after the read
    bind_records! {
        values {}
        texts {
            "kisaoID" => kisao_id,
        }
    }

    fn check_after_read(&mut self, element: &XmlElement, ctx: &mut ReadContext) {
        let kisao_id = self.kisao_id.get();
        if self.kisao_id.is_set() && !names::is_valid_kisao_id(kisao_id) {
            ctx.report(
                ErrorCode::AlgorithmKisaoIdMustBeKisaoTerm,
                format!(
                    "The kisaoID '{}' on the <algorithm> element does not match 'KISAO:' followed by seven digits.",
                    kisao_id
                ),
                element,
            );
        }
    }
}

impl ChildBindable for Algorithm {}

const UNIFORM_TIME_COURSE_CODES: ElementCodes = ElementCodes {
    allowed_attributes: ErrorCode::UniformTimeCourseAllowedAttributes,
    allowed_core_attributes: ErrorCode::UniformTimeCourseAllowedCoreAttributes,
};

static UNIFORM_TIME_COURSE_RULES_L1V2: ElementRules = ElementRules {
    codes: UNIFORM_TIME_COURSE_CODES,
    attributes: &[
        AttributeRule::required("id", AttributeKind::SId, ErrorCode::InvalidIdSyntax),
        AttributeRule::text("name"),
        AttributeRule::required(
            "initialTime",
            AttributeKind::Double,
            ErrorCode::UniformTimeCourseInitialTimeMustBeDouble,
        ),
        AttributeRule::required(
            "outputStartTime",
            AttributeKind::Double,
            ErrorCode::UniformTimeCourseOutputStartTimeMustBeDouble,
        ),
        AttributeRule::required(
            "outputEndTime",
            AttributeKind::Double,
            ErrorCode::UniformTimeCourseOutputEndTimeMustBeDouble,
        ),
        AttributeRule::required(
            "numberOfPoints",
            AttributeKind::UnsignedInteger,
            ErrorCode::UniformTimeCourseNumberOfPointsMustBeInteger,
        ),
    ],
};

static UNIFORM_TIME_COURSE_RULES_L1V3: ElementRules = ElementRules {
    codes: UNIFORM_TIME_COURSE_CODES,
    attributes: &[
        AttributeRule::required("id", AttributeKind::SId, ErrorCode::InvalidIdSyntax),
        AttributeRule::text("name"),
        AttributeRule::required(
            "initialTime",
            AttributeKind::Double,
            ErrorCode::UniformTimeCourseInitialTimeMustBeDouble,
        ),
        AttributeRule::required(
            "outputStartTime",
            AttributeKind::Double,
            ErrorCode::UniformTimeCourseOutputStartTimeMustBeDouble,
        ),
        AttributeRule::required(
            "outputEndTime",
            AttributeKind::Double,
            ErrorCode::UniformTimeCourseOutputEndTimeMustBeDouble,
        ),
        AttributeRule::required(
            "numberOfSteps",
            AttributeKind::UnsignedInteger,
            ErrorCode::UniformTimeCourseNumberOfStepsMustBeInteger,
        ),
    ],
};

static UNIFORM_TIME_COURSE_VARIANTS: RuleTable = VariantTable {
    entries: &[
        (SEDML_L1V2, &UNIFORM_TIME_COURSE_RULES_L1V2),
        (SEDML_L1V3, &UNIFORM_TIME_COURSE_RULES_L1V3),
    ],
};

/// Time course simulation sampled at evenly spaced points
///
/// The step count is one record, written as `numberOfPoints` in L1V2 and as
/// `numberOfSteps` from L1V3 on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformTimeCourse {
    core: Core,
    initial_time: Attribute<f64>,
    output_start_time: Attribute<f64>,
    output_end_time: Attribute<f64>,
    number_of_steps: Attribute<u32>,
    algorithm: Singleton<Algorithm>,
}

impl UniformTimeCourse {
    /// Create a simulation with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier
    pub fn id(&self) -> &str {
        self.core.id()
    }

    /// Set the identifier
    pub fn set_id(&mut self, id: &str) -> OperationResult {
        self.core.set_id(id)
    }

    value_accessors! {
        initial_time: f64 => initial_time, is_set_initial_time, set_initial_time, unset_initial_time;
        output_start_time: f64 => output_start_time, is_set_output_start_time, set_output_start_time, unset_output_start_time;
        output_end_time: f64 => output_end_time, is_set_output_end_time, set_output_end_time, unset_output_end_time;
        number_of_steps: u32 => number_of_steps, is_set_number_of_steps, set_number_of_steps, unset_number_of_steps;
    }

    singleton_accessors! {
        algorithm: Algorithm => algorithm, algorithm_mut, create_algorithm, set_algorithm, unset_algorithm;
    }
}

impl AttributeBindable for UniformTimeCourse {
    fn element_name(&self) -> &'static str {
        "uniformTimeCourse"
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        UNIFORM_TIME_COURSE_VARIANTS.rules(version)
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn assign(&mut self, name: &str, value: TypedValue) -> OperationResult {
        match (name, value) {
            ("initialTime", TypedValue::Double(v)) => self.initial_time.set(v),
            ("outputStartTime", TypedValue::Double(v)) => self.output_start_time.set(v),
            ("outputEndTime", TypedValue::Double(v)) => self.output_end_time.set(v),
            ("numberOfPoints" | "numberOfSteps", TypedValue::UnsignedInteger(v)) => {
                self.number_of_steps.set(v)
            }
            (
                "initialTime" | "outputStartTime" | "outputEndTime" | "numberOfPoints"
                | "numberOfSteps",
                _,
            ) => Err(OperationError::InvalidAttributeValue),
            (name, value) => self.core.assign(name, value),
        }
    }

    fn value_of(&self, name: &str) -> Option<TypedValue> {
        match name {
            "initialTime" => self.initial_time.as_option().map(TypedValue::Double),
            "outputStartTime" => self.output_start_time.as_option().map(TypedValue::Double),
            "outputEndTime" => self.output_end_time.as_option().map(TypedValue::Double),
            "numberOfPoints" | "numberOfSteps" => self
                .number_of_steps
                .as_option()
                .map(TypedValue::UnsignedInteger),
            _ => self.core.value_of(name),
        }
    }
}

impl ChildBindable for UniformTimeCourse {
    fn read_child(&mut self, child: &XmlElement, ctx: &mut ReadContext) -> bool {
        if child.name() != "algorithm" {
            return false;
        }
        bind_singleton(
            &mut self.algorithm,
            "uniformTimeCourse",
            ErrorCode::UniformTimeCourseAllowedElements,
            child,
            ctx,
        );
        true
    }

    fn write_children(&self, out: &mut XmlOutputStream, version: &SchemaVersion) -> Result<()> {
        match self.algorithm.get() {
            Some(algorithm) => write_element(algorithm, out, version),
            None => Ok(()),
        }
    }

    fn has_children(&self) -> bool {
        self.algorithm.is_set()
    }

    fn own_required_elements(&self, _version: &SchemaVersion) -> bool {
        self.algorithm.is_set()
    }

    fn child_nodes(&self) -> Vec<&dyn Node> {
        self.algorithm.get().map(|a| a as &dyn Node).into_iter().collect()
    }
}

impl Listable for UniformTimeCourse {
    const LIST_NAME: &'static str = "listOfSimulations";
    const ITEM_NAME: &'static str = "uniformTimeCourse";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorLog;
    use crate::versions::Format;
    use crate::xml::XmlAttribute;

    #[test]
    fn test_set_kisao_id_validates() {
        let mut algorithm = Algorithm::new();
        assert_eq!(
            algorithm.set_kisao_id("CVODE"),
            Err(OperationError::InvalidAttributeValue)
        );
        assert!(!algorithm.is_set_kisao_id());
        algorithm.set_kisao_id("KISAO:0000019").unwrap();
        assert_eq!(algorithm.kisao_id(), "KISAO:0000019");
    }

    #[test]
    fn test_bad_kisao_id_flagged_after_read() {
        let element = XmlElement::new("algorithm")
            .in_namespace("http://sed-ml.org/sed-ml/level1/version3")
            .with_attribute(XmlAttribute::new("kisaoID", "KISAO_19"));
        let mut ctx = ReadContext::new(SchemaVersion::latest(Format::SedMl), ErrorLog::new());
        let mut algorithm = Algorithm::new();
        crate::binding::bind_element(&mut algorithm, &element, &mut ctx);

        assert_eq!(algorithm.kisao_id(), "KISAO_19");
        let log = ctx.into_log();
        assert_eq!(log.len(), 1);
        assert!(log.contains(ErrorCode::AlgorithmKisaoIdMustBeKisaoTerm));
    }

    #[test]
    fn test_step_count_name_follows_version() {
        let v2 = SchemaVersion::new(Format::SedMl, 1, 2, 1).unwrap();
        let v3 = SchemaVersion::new(Format::SedMl, 1, 3, 1).unwrap();
        let mut simulation = UniformTimeCourse::new();
        simulation.set_number_of_steps(100).unwrap();

        let order_v2 = simulation.rules(&v2).unwrap().write_order(&v2);
        let order_v3 = simulation.rules(&v3).unwrap().write_order(&v3);
        assert!(order_v2.contains(&"numberOfPoints"));
        assert!(!order_v2.contains(&"numberOfSteps"));
        assert!(order_v3.contains(&"numberOfSteps"));
        assert_eq!(
            simulation.value_of("numberOfPoints"),
            Some(TypedValue::UnsignedInteger(100))
        );
    }

    #[test]
    fn test_algorithm_required() {
        let version = SchemaVersion::latest(Format::SedMl);
        let mut simulation = UniformTimeCourse::new();
        assert!(!simulation.has_required_elements(&version));
        simulation
            .set_algorithm(&Algorithm::with_kisao_id("KISAO:0000019").unwrap())
            .unwrap();
        assert!(simulation.has_required_elements(&version));
    }
}
