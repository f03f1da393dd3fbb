//! `<event>`, `<trigger>` and `<eventAssignment>`

use crate::binding::record::SIdRef;
use crate::binding::{
    bind_list, bind_singleton, write_element, Attribute, AttributeBindable, AttributeKind,
    AttributeRule, ChildBindable, Core, ElementCodes, ElementRules, ListOf, Listable, Node,
    ReadContext, RuleTable, Singleton, TextAttribute, VariantTable,
};
use crate::diagnostics::ErrorCode;
use crate::error::{OperationResult, Result};
use crate::versions::{SchemaVersion, SBML_L3V1, SBML_L3V2};
use crate::xml::{XmlElement, XmlOutputStream};

static TRIGGER_RULES: ElementRules = ElementRules {
    codes: ElementCodes {
        allowed_attributes: ErrorCode::TriggerAllowedAttributes,
        allowed_core_attributes: ErrorCode::TriggerAllowedCoreAttributes,
    },
    attributes: &[
        AttributeRule::required(
            "initialValue",
            AttributeKind::Boolean,
            ErrorCode::TriggerInitialValueMustBeBoolean,
        ),
        AttributeRule::required(
            "persistent",
            AttributeKind::Boolean,
            ErrorCode::TriggerPersistentMustBeBoolean,
        ),
    ],
};

static TRIGGER_VARIANTS: RuleTable = VariantTable {
    entries: &[(SBML_L3V1, &TRIGGER_RULES), (SBML_L3V2, &TRIGGER_RULES)],
};

/// Condition under which an event fires
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trigger {
    core: Core,
    initial_value: Attribute<bool>,
    persistent: Attribute<bool>,
}

impl Trigger {
    /// Create a trigger with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    value_accessors! {
        initial_value: bool => initial_value, is_set_initial_value, set_initial_value, unset_initial_value;
        persistent: bool => persistent, is_set_persistent, set_persistent, unset_persistent;
    }
}

impl AttributeBindable for Trigger {
    fn element_name(&self) -> &'static str {
        "trigger"
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        TRIGGER_VARIANTS.rules(version)
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    bind_records! {
        values {
            "initialValue" => initial_value: Boolean,
            "persistent" => persistent: Boolean,
        }
        texts {}
    }
}

impl ChildBindable for Trigger {}

static EVENT_ASSIGNMENT_RULES: ElementRules = ElementRules {
    codes: ElementCodes {
        allowed_attributes: ErrorCode::EventAssignmentAllowedAttributes,
        allowed_core_attributes: ErrorCode::EventAssignmentAllowedCoreAttributes,
    },
    attributes: &[AttributeRule::required(
        "variable",
        AttributeKind::SIdRef,
        ErrorCode::EventAssignmentVariableMustBeSId,
    )],
};

static EVENT_ASSIGNMENT_VARIANTS: RuleTable = VariantTable {
    entries: &[
        (SBML_L3V1, &EVENT_ASSIGNMENT_RULES),
        (SBML_L3V2, &EVENT_ASSIGNMENT_RULES),
    ],
};

/// Change applied to one variable when an event fires
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventAssignment {
    core: Core,
    variable: TextAttribute<SIdRef>,
}

impl EventAssignment {
    /// Create an assignment with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    text_accessors! {
        variable => variable, is_set_variable, set_variable, unset_variable;
    }
}

impl AttributeBindable for EventAssignment {
    fn element_name(&self) -> &'static str {
        "eventAssignment"
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        EVENT_ASSIGNMENT_VARIANTS.rules(version)
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    bind_records! {
        values {}
        texts {
            "variable" => variable,
        }
    }
}

impl ChildBindable for EventAssignment {}

impl Listable for EventAssignment {
    const LIST_NAME: &'static str = "listOfEventAssignments";
    const ITEM_NAME: &'static str = "eventAssignment";

    fn identifier(&self) -> &str {
        self.variable.get()
    }
}

static EVENT_RULES: ElementRules = ElementRules {
    codes: ElementCodes {
        allowed_attributes: ErrorCode::EventAllowedAttributes,
        allowed_core_attributes: ErrorCode::EventAllowedCoreAttributes,
    },
    attributes: &[
        AttributeRule::optional("id", AttributeKind::SId, ErrorCode::InvalidIdSyntax),
        AttributeRule::text("name"),
        AttributeRule::required(
            "useValuesFromTriggerTime",
            AttributeKind::Boolean,
            ErrorCode::EventUseValuesFromTriggerTimeMustBeBoolean,
        ),
    ],
};

static EVENT_VARIANTS: RuleTable = VariantTable {
    entries: &[(SBML_L3V1, &EVENT_RULES), (SBML_L3V2, &EVENT_RULES)],
};

/// Discontinuous state change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    core: Core,
    use_values_from_trigger_time: Attribute<bool>,
    trigger: Singleton<Trigger>,
    event_assignments: ListOf<EventAssignment>,
}

impl Event {
    /// Create an event with nothing set
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
        use_values_from_trigger_time: bool => use_values_from_trigger_time,
            is_set_use_values_from_trigger_time,
            set_use_values_from_trigger_time,
            unset_use_values_from_trigger_time;
    }

    singleton_accessors! {
        trigger: Trigger => trigger, trigger_mut, create_trigger, set_trigger, unset_trigger;
    }

    /// Event assignments
    pub fn event_assignments(&self) -> &ListOf<EventAssignment> {
        &self.event_assignments
    }

    /// Event assignments, mutably
    pub fn event_assignments_mut(&mut self) -> &mut ListOf<EventAssignment> {
        &mut self.event_assignments
    }

    /// Append a default event assignment and return it
    pub fn create_event_assignment(&mut self) -> &mut EventAssignment {
        self.event_assignments.create()
    }
}

impl AttributeBindable for Event {
    fn element_name(&self) -> &'static str {
        "event"
    }

    fn rules(&self, version: &SchemaVersion) -> Option<&'static ElementRules> {
        EVENT_VARIANTS.rules(version)
    }

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    bind_records! {
        values {
            "useValuesFromTriggerTime" => use_values_from_trigger_time: Boolean,
        }
        texts {}
    }
}

impl ChildBindable for Event {
    fn read_child(&mut self, child: &XmlElement, ctx: &mut ReadContext) -> bool {
        match child.name() {
            "trigger" => bind_singleton(
                &mut self.trigger,
                "event",
                ErrorCode::EventAllowedElements,
                child,
                ctx,
            ),
            "listOfEventAssignments" => bind_list(
                &mut self.event_assignments,
                "event",
                ErrorCode::EventAllowedElements,
                child,
                ctx,
            ),
            _ => return false,
        }
        true
    }

    fn write_children(&self, out: &mut XmlOutputStream, version: &SchemaVersion) -> Result<()> {
        if let Some(trigger) = self.trigger.get() {
            write_element(trigger, out, version)?;
        }
        self.event_assignments.write_if_present(out, version)
    }

    fn has_children(&self) -> bool {
        self.trigger.is_set() || self.event_assignments.should_write()
    }

    fn own_required_elements(&self, version: &SchemaVersion) -> bool {
        // L3V2 made the trigger optional
        version.key() != SBML_L3V1 || self.trigger.is_set()
    }

    fn child_nodes(&self) -> Vec<&dyn Node> {
        let mut nodes: Vec<&dyn Node> = Vec::new();
        if let Some(trigger) = self.trigger.get() {
            nodes.push(trigger);
        }
        if self.event_assignments.should_write() {
            nodes.push(&self.event_assignments);
        }
        nodes
    }
}

impl Listable for Event {
    const LIST_NAME: &'static str = "listOfEvents";
    const ITEM_NAME: &'static str = "event";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorLog;
    use crate::versions::Format;
    use crate::xml::XmlAttribute;

    const L3V2_NS: &str = "http://www.sbml.org/sbml/level3/version2/core";

    fn trigger(initial: &str) -> XmlElement {
        XmlElement::new("trigger")
            .in_namespace(L3V2_NS)
            .with_attribute(XmlAttribute::new("initialValue", initial))
            .with_attribute(XmlAttribute::new("persistent", "true"))
    }

    #[test]
    fn test_duplicate_trigger_last_wins() {
        let element = XmlElement::new("event")
            .in_namespace(L3V2_NS)
            .with_attribute(XmlAttribute::new("useValuesFromTriggerTime", "true"))
            .with_child(trigger("false"))
            .with_child(trigger("true"));

        let mut ctx = ReadContext::new(SchemaVersion::latest(Format::Sbml), ErrorLog::new());
        let mut event = Event::new();
        crate::binding::bind_element(&mut event, &element, &mut ctx);

        assert_eq!(event.trigger().map(|t| t.initial_value()), Some(true));
        let log = ctx.into_log();
        assert_eq!(log.count_code(ErrorCode::EventAllowedElements), 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_set_trigger_clones() {
        let mut trigger = Trigger::new();
        trigger.set_persistent(true).unwrap();

        let mut event = Event::new();
        event.set_trigger(&trigger).unwrap();
        trigger.set_persistent(false).unwrap();
        assert_eq!(event.trigger().map(|t| t.persistent()), Some(true));

        event.unset_trigger().unwrap();
        assert!(event.trigger().is_none());
    }

    #[test]
    fn test_event_assignment_lookup_by_variable() {
        let mut event = Event::new();
        event.create_event_assignment().set_variable("k1").unwrap();
        assert!(event.event_assignments().get_by_id("k1").is_some());
    }
}
