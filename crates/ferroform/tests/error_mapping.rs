//! Violation-to-field mapping and schema shape failures.

use ferroform::harness::ScriptedHost;
use ferroform::schema::{Property, PropertyType, Schema, SchemaError};
use ferroform::{generate_form, FormError, FormModel, FormState, Violation};
use serde_json::{Map, Value};

struct Person;

impl FormModel for Person {
    fn schema() -> Schema {
        let inner = Schema::new("Inner").property("hobby", Property::string("Hobby"));
        let address = Schema::new("Address")
            .property("street", Property::string("Street"))
            .nested("nested_nested", "Inner");
        Schema::new("Person")
            .property("name", Property::string("Name"))
            .nested("address", "Address")
            .definition("Address", address)
            .definition("Inner", inner)
    }

    fn validate(values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        let hobby = values
            .get("address")
            .and_then(|address| address.get("nested_nested"))
            .and_then(|nested| nested.get("hobby"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        if hobby == "chess" {
            Ok(Self)
        } else {
            Err(vec![Violation::new(
                ["address", "nested_nested", "hobby"],
                "pick a real hobby",
            )])
        }
    }
}

#[test]
fn violation_attaches_to_exactly_the_visited_leaf() {
    let mut host = ScriptedHost::new();
    let mut state = FormState::new();

    host.press("person_submit");
    host.start_pass();
    let result =
        generate_form::<Person, _>(&mut host, &mut state).expect("pass should succeed");
    assert!(result.is_none());
    assert!(host.take_rerender());

    // The message sits at the hobby leaf and nowhere else.
    let errors = state.errors();
    let hobby = errors
        .branch("address")
        .and_then(|tree| tree.branch("nested_nested"))
        .and_then(|tree| tree.leaf("hobby"))
        .expect("message should sit at the hobby leaf");
    assert_eq!(hobby.message, "pick a real hobby");
    assert!(errors.leaf("address").is_none());
    assert!(errors.leaf("name").is_none());

    // The next pass displays it next to the offending editor only.
    host.start_pass();
    generate_form::<Person, _>(&mut host, &mut state).expect("pass should succeed");
    assert_eq!(
        host.errors_for("person_address_nested_nested_hobby"),
        ["pick a real hobby"]
    );
    assert!(host.errors_for("person_name").is_empty());
    assert!(host.errors_for("person_address_street").is_empty());

    // Fixing the field clears the session on the next submit.
    host.set("person_address_nested_nested_hobby", "chess");
    host.press("person_submit");
    host.start_pass();
    let result =
        generate_form::<Person, _>(&mut host, &mut state).expect("pass should succeed");
    assert!(result.is_some());
    assert!(state.errors().is_empty());
}

struct Ghostly;

impl FormModel for Ghostly {
    fn schema() -> Schema {
        Schema::new("Ghostly").property("name", Property::string("Name"))
    }

    fn validate(_values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        // A location the form never rendered.
        Err(vec![Violation::new(["ghost"], "no such field")])
    }
}

#[test]
fn unmatched_violations_surface_at_the_form_root() {
    let mut host = ScriptedHost::new();
    let mut state = FormState::new();

    host.press("ghostly_submit");
    host.start_pass();
    generate_form::<Ghostly, _>(&mut host, &mut state).expect("pass should succeed");

    assert!(state.errors().is_empty());
    assert_eq!(state.form_errors(), ["ghost: no such field"]);

    // The next pass shows it before any field renders.
    host.start_pass();
    generate_form::<Ghostly, _>(&mut host, &mut state).expect("pass should succeed");
    let first_error = host.transcript().iter().position(|element| {
        matches!(element, ferroform::harness::Rendered::Error(_))
    });
    let first_editor = host.transcript().iter().position(|element| {
        matches!(element, ferroform::harness::Rendered::Editor { .. })
    });
    assert!(first_error.expect("error should render") < first_editor.expect("editor should render"));
}

#[derive(Debug)]
struct Dangling;

impl FormModel for Dangling {
    fn schema() -> Schema {
        // The reference has no matching definition.
        Schema::new("Dangling").nested("profile", "Profile")
    }
    fn validate(_values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        Ok(Self)
    }
}

#[test]
fn unresolved_reference_fails_fast() {
    let mut host = ScriptedHost::new();
    let mut state = FormState::new();
    host.start_pass();

    let err = generate_form::<Dangling, _>(&mut host, &mut state).unwrap_err();
    assert!(matches!(
        err,
        FormError::Schema(SchemaError::UnresolvedReference { reference, .. }) if reference == "Profile"
    ));
}

#[derive(Debug)]
struct Itemless;

impl FormModel for Itemless {
    fn schema() -> Schema {
        // An array property without its item descriptor.
        Schema::new("Itemless").property("entries", Property::new("Entries", PropertyType::Array))
    }
    fn validate(_values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        Ok(Self)
    }
}

#[test]
fn array_without_items_fails_fast() {
    let mut host = ScriptedHost::new();
    let mut state = FormState::new();
    host.start_pass();

    let err = generate_form::<Itemless, _>(&mut host, &mut state).unwrap_err();
    assert!(matches!(
        err,
        FormError::Schema(SchemaError::MissingItems { path }) if path == "entries"
    ));
}

#[derive(Debug)]
struct Mapless;

impl FormModel for Mapless {
    fn schema() -> Schema {
        // A map-typed object without its value descriptor.
        Schema::new("Mapless").property("extras", Property::new("Extras", PropertyType::Object))
    }
    fn validate(_values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        Ok(Self)
    }
}

#[test]
fn object_without_additional_properties_fails_fast() {
    let mut host = ScriptedHost::new();
    let mut state = FormState::new();
    host.start_pass();

    let err = generate_form::<Mapless, _>(&mut host, &mut state).unwrap_err();
    assert!(matches!(
        err,
        FormError::Schema(SchemaError::MissingAdditionalProperties { path }) if path == "extras"
    ));
}
