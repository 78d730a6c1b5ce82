//! Rendering behavior of scalar editors through the public API.

use chrono::NaiveDate;
use ferroform::harness::{EditorWidget, Rendered, ScriptedHost};
use ferroform::schema::{Property, PropertyFormat, Schema};
use ferroform::{generate_form, FormModel, FormState, Violation};
use serde_json::{json, Map, Value};

struct Prefs;

impl FormModel for Prefs {
    fn schema() -> Schema {
        Schema::new("Prefs")
            .property(
                "dark_mode",
                Property::boolean("Dark Mode").default_value(true),
            )
            .property("columns", Property::integer("Columns").default_value(7))
            .property(
                "theme",
                Property::string("Theme").default_value("gruvbox"),
            )
            .property(
                "accent",
                Property::string("Accent")
                    .format(PropertyFormat::Color)
                    .default_value("#ff8800"),
            )
    }

    fn validate(_values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        Ok(Self)
    }
}

fn editor_value(host: &ScriptedHost, key: &str) -> Value {
    match host.editor(key) {
        Some(Rendered::Editor { value, .. }) => value.clone(),
        _ => panic!("no editor rendered under {key}"),
    }
}

#[test]
fn defaults_round_trip_without_edits() {
    struct RoundTrip(Map<String, Value>);

    impl FormModel for RoundTrip {
        fn schema() -> Schema {
            Prefs::schema()
        }
        fn validate(values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
            Ok(Self(values.clone()))
        }
    }

    let mut host = ScriptedHost::new();
    let mut state = FormState::new();
    host.press("prefs_submit");
    host.start_pass();

    let submitted = generate_form::<RoundTrip, _>(&mut host, &mut state)
        .expect("pass should succeed")
        .expect("submit should return an instance");

    let mut expected = Map::new();
    expected.insert("dark_mode".to_string(), json!(true));
    expected.insert("columns".to_string(), json!(7));
    expected.insert("theme".to_string(), json!("gruvbox"));
    expected.insert("accent".to_string(), json!("#ff8800"));
    assert_eq!(submitted.0, expected);
}

#[test]
fn absent_defaults_yield_type_appropriate_empty_values() {
    struct Empty(Map<String, Value>);

    impl FormModel for Empty {
        fn schema() -> Schema {
            Schema::new("Empty")
                .property("flag", Property::boolean("Flag"))
                .property("count", Property::integer("Count"))
                .property("ratio", Property::number("Ratio"))
                .property("name", Property::string("Name"))
        }
        fn validate(values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
            Ok(Self(values.clone()))
        }
    }

    let mut host = ScriptedHost::new();
    let mut state = FormState::new();
    host.press("empty_submit");
    host.start_pass();

    let submitted = generate_form::<Empty, _>(&mut host, &mut state)
        .expect("pass should succeed")
        .expect("submit should return an instance");

    assert_eq!(submitted.0["flag"], json!(false));
    assert_eq!(submitted.0["count"], json!(0));
    assert_eq!(submitted.0["ratio"], json!(0.0));
    assert_eq!(submitted.0["name"], json!(""));
}

struct Snap;

impl FormModel for Snap {
    fn schema() -> Schema {
        Schema::new("Snap").property(
            "quota",
            Property::integer("Quota").minimum(2.0).multiple_of(3.0),
        )
    }
    fn validate(_values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        Ok(Self)
    }
}

#[test]
fn multiple_of_snaps_initial_value_above_minimum() {
    let mut host = ScriptedHost::new();
    let mut state = FormState::new();
    host.start_pass();
    generate_form::<Snap, _>(&mut host, &mut state).expect("pass should succeed");

    // minimum 2 with step 3: the first value on the editor's step grid
    // above the minimum is 5, not the raw minimum.
    assert_eq!(editor_value(&host, "snap_quota"), json!(5));
    match host.editor("snap_quota") {
        Some(Rendered::Editor { widget, .. }) => {
            // No upper bound, so a free numeric field rather than a slider.
            assert_eq!(*widget, EditorWidget::IntInput);
        }
        _ => panic!("quota editor missing"),
    }
}

struct Bounded;

impl FormModel for Bounded {
    fn schema() -> Schema {
        Schema::new("Bounded").property(
            "level",
            Property::integer("Level")
                .exclusive_minimum(0.0)
                .exclusive_maximum(10.0),
        )
    }
    fn validate(_values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        Ok(Self)
    }
}

#[test]
fn exclusive_bounds_resolve_to_a_slider() {
    let mut host = ScriptedHost::new();
    let mut state = FormState::new();
    host.start_pass();
    generate_form::<Bounded, _>(&mut host, &mut state).expect("pass should succeed");

    // Both bounds resolvable -> range editor, initial value at the
    // adjusted minimum.
    match host.editor("bounded_level") {
        Some(Rendered::Editor { widget, value, .. }) => {
            assert_eq!(*widget, EditorWidget::IntSlider);
            assert_eq!(*value, json!(1));
        }
        _ => panic!("level editor missing"),
    }

    // The slider clamps edits to the adjusted bounds.
    host.set("bounded_level", 99);
    host.start_pass();
    generate_form::<Bounded, _>(&mut host, &mut state).expect("pass should succeed");
    assert_eq!(editor_value(&host, "bounded_level"), json!(9));
}

struct Badge;

impl FormModel for Badge {
    fn schema() -> Schema {
        Schema::new("Badge").property(
            "serial",
            Property::string("Serial")
                .default_value("A-0001")
                .read_only(),
        )
    }
    fn validate(_values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        Ok(Self)
    }
}

#[test]
fn read_only_editors_pass_the_value_through() {
    let mut host = ScriptedHost::new();
    let mut state = FormState::new();
    host.set("badge_serial", "tampered");
    host.start_pass();
    generate_form::<Badge, _>(&mut host, &mut state).expect("pass should succeed");

    match host.editor("badge_serial") {
        Some(Rendered::Editor {
            value, disabled, ..
        }) => {
            assert!(disabled);
            assert_eq!(*value, json!("A-0001"));
        }
        _ => panic!("serial editor missing"),
    }
}

struct Shirt;

impl FormModel for Shirt {
    fn schema() -> Schema {
        Schema::new("Shirt").property(
            "size",
            Property::string("Size")
                .choices(vec![json!("s"), json!("m"), json!("l")])
                .default_value("nope"),
        )
    }
    fn validate(_values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        Ok(Self)
    }
}

#[test]
fn enum_with_unknown_current_value_falls_back_to_first_option() {
    let mut host = ScriptedHost::new();
    let mut state = FormState::new();
    host.start_pass();
    generate_form::<Shirt, _>(&mut host, &mut state).expect("pass should succeed");

    match host.editor("shirt_size") {
        Some(Rendered::Editor { widget, value, .. }) => {
            assert_eq!(*widget, EditorWidget::Select);
            assert_eq!(*value, json!("s"));
        }
        _ => panic!("size editor missing"),
    }
}

struct Event(Map<String, Value>);

impl FormModel for Event {
    fn schema() -> Schema {
        Schema::new("Event").property(
            "starts",
            Property::string("Starts").format(PropertyFormat::DateTime),
        )
    }
    fn validate(values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        Ok(Self(values.clone()))
    }
}

#[test]
fn date_time_combines_sub_parts() {
    let clock = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid clock");
    let mut host = ScriptedHost::new().with_clock(clock);
    let mut state = FormState::new();

    // Both parts absent: the composite value is absent.
    host.press("event_submit");
    host.start_pass();
    let submitted = generate_form::<Event, _>(&mut host, &mut state)
        .expect("pass should succeed")
        .expect("submit should return an instance");
    assert_eq!(submitted.0["starts"], Value::Null);

    // Only the date entered: the time half comes from the host clock.
    host.set("event_starts_date", "2024-06-15");
    host.press("event_submit");
    host.start_pass();
    let submitted = generate_form::<Event, _>(&mut host, &mut state)
        .expect("pass should succeed")
        .expect("submit should return an instance");
    assert_eq!(submitted.0["starts"], json!("2024-06-15T09:30:00"));

    // Both parts entered: they combine as-is.
    host.set("event_starts_time", "18:45:00");
    host.press("event_submit");
    host.start_pass();
    let submitted = generate_form::<Event, _>(&mut host, &mut state)
        .expect("pass should succeed")
        .expect("submit should return an instance");
    assert_eq!(submitted.0["starts"], json!("2024-06-15T18:45:00"));
}

struct Documented;

impl FormModel for Documented {
    fn schema() -> Schema {
        Schema::new("Documented")
            .property(
                "handle",
                Property::string("Handle").description("Shown on your profile"),
            )
            .required("handle")
    }
    fn validate(_values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        Ok(Self)
    }
}

#[test]
fn labels_carry_markers_and_descriptions_render_as_help() {
    let mut host = ScriptedHost::new();
    let mut state = FormState::new();
    host.start_pass();
    generate_form::<Documented, _>(&mut host, &mut state).expect("pass should succeed");

    match host.editor("documented_handle") {
        Some(Rendered::Editor { label, .. }) => assert_eq!(label, "Handle *"),
        _ => panic!("handle editor missing"),
    }
    assert!(host
        .transcript()
        .iter()
        .any(|element| *element == Rendered::Help("Shown on your profile".to_string())));
}
