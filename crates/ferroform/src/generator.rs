//! Recursive form generation.
//!
//! One render pass is a plain synchronous function of (schema, host widget
//! state, persisted [`FormState`]): it walks the schema's properties in
//! insertion order, renders an editor per leaf, recurses into nested
//! references, assembles the edited values into a schema-shaped tree, and
//! on submit hands that tree to the model's validator.

use ferroform_schema::{key_to_label, label_to_key, FieldPath, Property, PropertyKind, Schema};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{FormError, Result};
use crate::host::Host;
use crate::state::{ErrorTree, FormState};
use crate::submit::{submit_form, FormModel};

/// Presentation options for a generated form.
#[derive(Debug, Clone)]
pub struct FormOptions {
    /// Overrides the schema title as the rendered heading.
    pub form_label: Option<String>,
    /// Submit button label.
    pub submit_label: String,
    /// Whether to render the heading at all.
    pub show_label: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            form_label: None,
            submit_label: "Submit".to_string(),
            show_label: true,
        }
    }
}

/// Renders the form for `M` and returns a validated instance only on a
/// successful submit within this pass.
///
/// Every other pass returns `Ok(None)`. A failed submit persists the
/// mapped per-field errors into `state` and requests a fresh render pass,
/// which will display them inline; the form stays editable and
/// resubmittable.
///
/// # Errors
///
/// Fails fast on malformed schemas: unresolved nested references and
/// collection properties without an item descriptor.
pub fn generate_form<M, H>(host: &mut H, state: &mut FormState) -> Result<Option<M>>
where
    M: FormModel,
    H: Host,
{
    generate_form_with(host, state, &FormOptions::default())
}

/// Same as [`generate_form`], with explicit presentation options.
///
/// # Errors
///
/// See [`generate_form`].
pub fn generate_form_with<M, H>(
    host: &mut H,
    state: &mut FormState,
    options: &FormOptions,
) -> Result<Option<M>>
where
    M: FormModel,
    H: Host,
{
    run_form::<M, H>(host, state, &Map::new(), options)
}

/// Renders a form pre-filled from an existing instance.
///
/// The instance is serialized once per pass to seed the value tree; edits
/// then live in the host's widget state as usual.
///
/// # Errors
///
/// In addition to [`generate_form`]'s failures, fails when the instance
/// does not serialize to an object.
pub fn edit_form<M, H>(
    host: &mut H,
    state: &mut FormState,
    instance: &M,
    options: &FormOptions,
) -> Result<Option<M>>
where
    M: FormModel + Serialize,
    H: Host,
{
    let initial = match serde_json::to_value(instance)? {
        Value::Object(map) => map,
        other => {
            return Err(FormError::InstanceNotObject {
                got: json_type_name(&other),
            })
        }
    };
    run_form::<M, H>(host, state, &initial, options)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn run_form<M, H>(
    host: &mut H,
    state: &mut FormState,
    initial: &Map<String, Value>,
    options: &FormOptions,
) -> Result<Option<M>>
where
    M: FormModel,
    H: Host,
{
    let schema = M::schema();
    let form_key = label_to_key(&schema.title);

    if options.show_label {
        host.heading(options.form_label.as_deref().unwrap_or(&schema.title));
    }
    // Violations that matched no rendered field surface at the form root.
    for message in &state.form_errors {
        host.error(message);
    }

    let errors = state.errors.clone();
    let (values, visited, submitted) = {
        let mut renderer = Renderer {
            host: &mut *host,
            state: &mut *state,
            visited: Vec::new(),
        };
        renderer.host.begin_group(&format!("{form_key}_form"));
        let values =
            renderer.render_schema(&schema, &FieldPath::root(), &form_key, initial, &errors)?;
        let submitted = renderer
            .host
            .button(&format!("{form_key}_submit"), &options.submit_label);
        renderer.host.end_group();
        (values, renderer.visited, submitted)
    };
    debug!(
        form = form_key.as_str(),
        fields = visited.len(),
        "render pass complete"
    );

    if submitted {
        return submit_form::<M, H>(host, state, &form_key, &values, &visited);
    }
    Ok(None)
}

/// Walks a schema tree and renders it into the host, one pass at a time.
///
/// The renderer records every rendered leaf's full path in `visited`; the
/// submission bridge later matches violation locations against that list.
pub(crate) struct Renderer<'a, H> {
    pub(crate) host: &'a mut H,
    pub(crate) state: &'a mut FormState,
    pub(crate) visited: Vec<FieldPath>,
}

impl<H: Host> Renderer<'_, H> {
    /// Renders one schema level and assembles its value subtree.
    pub(crate) fn render_schema(
        &mut self,
        schema: &Schema,
        path: &FieldPath,
        key: &str,
        values: &Map<String, Value>,
        errors: &ErrorTree,
    ) -> Result<Map<String, Value>> {
        let mut assembled = Map::new();
        for (field, kind) in &schema.properties {
            let field_path = path.child(field);
            let widget_key = format!("{key}_{field}");
            match kind {
                PropertyKind::Leaf(property) => {
                    self.visited.push(field_path.clone());
                    let label = field_label(schema, field, property);
                    let value = self.resolve_input(
                        property,
                        &widget_key,
                        &field_path,
                        &label,
                        values.get(field),
                        errors.leaf(field),
                    )?;
                    assembled.insert(field.clone(), value);
                }
                PropertyKind::Nested(nested) => {
                    // The resolved schema inherits this schema's full
                    // definitions, so deeper references still resolve.
                    let nested_schema = schema.resolve(&nested.reference)?;
                    self.host.label(&key_to_label(field));
                    self.host.begin_group(&format!("{widget_key}_group"));
                    let nested_values = match values.get(field) {
                        Some(Value::Object(map)) => map.clone(),
                        _ => Map::new(),
                    };
                    let nested_errors = errors.branch(field).cloned().unwrap_or_default();
                    let rendered = self.render_schema(
                        &nested_schema,
                        &field_path,
                        &widget_key,
                        &nested_values,
                        &nested_errors,
                    )?;
                    self.host.end_group();
                    assembled.insert(field.clone(), Value::Object(rendered));
                }
            }
        }
        Ok(assembled)
    }
}

/// Display label for a field, with the required marker.
fn field_label(schema: &Schema, field: &str, property: &Property) -> String {
    if schema.is_required(field) {
        format!("{} *", property.title)
    } else {
        property.title.clone()
    }
}
