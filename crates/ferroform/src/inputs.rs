//! Scalar editors.
//!
//! Dispatches one property descriptor to the host's primitive editors,
//! resolving bounds, steps and formats, and coercing the edited value back
//! to the declared type. Collection elements reuse the same editors through
//! [`Renderer::item_input`] with collapsed labels.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use ferroform_schema::{FieldPath, ItemType, Property, PropertyFormat, PropertyType, SchemaError};
use serde_json::Value;

use crate::error::Result;
use crate::generator::Renderer;
use crate::host::{Host, NumberOpts, RangeOpts, TextOpts};
use crate::state::InputError;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S";
pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Closed editor dispatch derived from a property's type and format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorKind {
    Boolean,
    Integer,
    Number,
    Text,
    Password,
    Color,
    Date,
    Time,
    DateTime,
    List,
    Map,
}

fn editor_kind_of(kind: PropertyType, format: Option<PropertyFormat>) -> EditorKind {
    match kind {
        PropertyType::Boolean => EditorKind::Boolean,
        PropertyType::Integer => EditorKind::Integer,
        PropertyType::Number => EditorKind::Number,
        PropertyType::String => match format {
            Some(PropertyFormat::Password) => EditorKind::Password,
            Some(PropertyFormat::Color) => EditorKind::Color,
            Some(PropertyFormat::Date) => EditorKind::Date,
            Some(PropertyFormat::Time) => EditorKind::Time,
            Some(PropertyFormat::DateTime) => EditorKind::DateTime,
            None => EditorKind::Text,
        },
        PropertyType::Array => EditorKind::List,
        PropertyType::Object => EditorKind::Map,
    }
}

/// Collection elements must be scalar; nested collections have no editor.
pub(crate) fn ensure_scalar_item(item: &ItemType, path: &FieldPath) -> Result<()> {
    match item.kind {
        PropertyType::Array | PropertyType::Object => Err(SchemaError::UnsupportedItemType {
            path: path.to_string(),
            item_type: item.kind.name().to_string(),
        }
        .into()),
        _ => Ok(()),
    }
}

fn as_int(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}

fn text_of(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
}

fn parse_time(value: &Value) -> Option<NaiveTime> {
    value
        .as_str()
        .and_then(|s| NaiveTime::parse_from_str(s, TIME_FORMAT).ok())
}

fn parse_date_time(value: &Value) -> Option<NaiveDateTime> {
    value
        .as_str()
        .and_then(|s| NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT).ok())
}

/// Display text for an enum literal.
fn display_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<H: Host> Renderer<'_, H> {
    /// Renders the editor for one leaf property and returns the edited
    /// value, coerced to the property's declared type.
    ///
    /// The current value falls back to the property's default; an absent
    /// default yields a type-appropriate empty value. Any error attached at
    /// this leaf's path is displayed after the editor.
    pub(crate) fn resolve_input(
        &mut self,
        property: &Property,
        key: &str,
        path: &FieldPath,
        label: &str,
        value: Option<&Value>,
        error: Option<&InputError>,
    ) -> Result<Value> {
        let result = if let Some(choices) = &property.choices {
            self.choice_input(
                key,
                label,
                choices,
                value.or(property.default.as_ref()),
                property.read_only,
            )
        } else {
            match editor_kind_of(property.kind, property.format) {
                EditorKind::Boolean => self.boolean_input(property, key, label, value),
                EditorKind::Integer => self.integer_input(property, key, label, value),
                EditorKind::Number => self.number_input(property, key, label, value),
                EditorKind::Text => self.string_input(property, key, label, value, false),
                EditorKind::Password => self.string_input(property, key, label, value, true),
                EditorKind::Color => self.color_input(property, key, label, value),
                EditorKind::Date => self.date_input(property, key, label, value),
                EditorKind::Time => self.time_input(property, key, label, value),
                EditorKind::DateTime => self.date_time_input(property, key, label, value),
                EditorKind::List => {
                    let Some(items) = &property.items else {
                        return Err(SchemaError::MissingItems {
                            path: path.to_string(),
                        }
                        .into());
                    };
                    self.resolve_list(property, items, key, path, value)?
                }
                EditorKind::Map => {
                    let Some(entries) = &property.additional_properties else {
                        return Err(SchemaError::MissingAdditionalProperties {
                            path: path.to_string(),
                        }
                        .into());
                    };
                    self.resolve_map(property, entries, key, path, value)?
                }
            }
        };

        if let Some(text) = &property.description {
            self.host.help(text);
        }
        if let Some(error) = error {
            self.host.error(&error.message);
        }
        Ok(result)
    }

    fn choice_input(
        &mut self,
        key: &str,
        label: &str,
        choices: &[Value],
        value: Option<&Value>,
        disabled: bool,
    ) -> Value {
        let options: Vec<String> = choices.iter().map(display_literal).collect();
        // A current value not found among the literals falls back to the
        // first option instead of failing.
        let selected = value
            .and_then(|v| choices.iter().position(|c| c == v))
            .unwrap_or(0);
        let chosen = self.host.select(key, label, &options, selected, disabled);
        choices
            .get(chosen)
            .or_else(|| choices.first())
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn boolean_input(
        &mut self,
        property: &Property,
        key: &str,
        label: &str,
        value: Option<&Value>,
    ) -> Value {
        let current = value
            .and_then(Value::as_bool)
            .or_else(|| property.default.as_ref().and_then(Value::as_bool))
            .unwrap_or(false);
        Value::Bool(self.host.checkbox(key, label, current, property.read_only))
    }

    fn integer_input(
        &mut self,
        property: &Property,
        key: &str,
        label: &str,
        value: Option<&Value>,
    ) -> Value {
        let min = property
            .minimum
            .map(|m| m as i64)
            .or_else(|| property.exclusive_minimum.map(|m| m as i64 + 1));
        let max = property
            .maximum
            .map(|m| m as i64)
            .or_else(|| property.exclusive_maximum.map(|m| m as i64 - 1));
        let step = property.multiple_of.map_or(1, |m| m as i64).max(1);

        let mut current = value
            .and_then(as_int)
            .or_else(|| property.default.as_ref().and_then(as_int))
            .unwrap_or_else(|| match min {
                Some(minimum) if property.multiple_of.is_some() => minimum + step,
                Some(minimum) => minimum,
                None => 0,
            });
        if property.multiple_of.is_some() && current != 0 && current % step != 0 {
            // Snap onto the editor's step grid so the user is never shown
            // an already-invalid value.
            current = min.map_or(0, |minimum| minimum + step);
        }

        let disabled = property.read_only;
        let edited = match (min, max) {
            (Some(min), Some(max)) => self.host.int_slider(
                key,
                label,
                current,
                RangeOpts {
                    min,
                    max,
                    step,
                    disabled,
                },
            ),
            _ => self.host.int_input(
                key,
                label,
                current,
                NumberOpts {
                    min,
                    max,
                    step,
                    disabled,
                },
            ),
        };
        Value::from(edited)
    }

    fn number_input(
        &mut self,
        property: &Property,
        key: &str,
        label: &str,
        value: Option<&Value>,
    ) -> Value {
        let min = property
            .minimum
            .or_else(|| property.exclusive_minimum.map(|m| m + 0.01));
        let max = property
            .maximum
            .or_else(|| property.exclusive_maximum.map(|m| m - 0.01));
        let step = property.multiple_of.unwrap_or(0.01);

        let current = value
            .and_then(Value::as_f64)
            .or_else(|| property.default.as_ref().and_then(Value::as_f64))
            .unwrap_or_else(|| min.unwrap_or(0.0));

        let disabled = property.read_only;
        let edited = match (min, max) {
            (Some(min), Some(max)) => self.host.float_slider(
                key,
                label,
                current,
                RangeOpts {
                    min,
                    max,
                    step,
                    disabled,
                },
            ),
            _ => self.host.float_input(
                key,
                label,
                current,
                NumberOpts {
                    min,
                    max,
                    step,
                    disabled,
                },
            ),
        };
        Value::from(edited)
    }

    fn string_input(
        &mut self,
        property: &Property,
        key: &str,
        label: &str,
        value: Option<&Value>,
        masked: bool,
    ) -> Value {
        let current = text_of(value)
            .or_else(|| text_of(property.default.as_ref()))
            .unwrap_or_default();
        let opts = TextOpts {
            max_length: property.max_length,
            masked,
            disabled: property.read_only,
        };
        Value::String(self.host.text_input(key, label, &current, opts))
    }

    fn color_input(
        &mut self,
        property: &Property,
        key: &str,
        label: &str,
        value: Option<&Value>,
    ) -> Value {
        let current = value
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .or_else(|| {
                property
                    .default
                    .as_ref()
                    .and_then(Value::as_str)
                    .map(ToOwned::to_owned)
            })
            .unwrap_or_else(|| "#000000".to_string());
        Value::String(
            self.host
                .color_picker(key, label, &current, property.read_only),
        )
    }

    fn date_input(
        &mut self,
        property: &Property,
        key: &str,
        label: &str,
        value: Option<&Value>,
    ) -> Value {
        let current = value
            .and_then(parse_date)
            .or_else(|| property.default.as_ref().and_then(parse_date));
        let edited = self.host.date_picker(key, label, current, property.read_only);
        edited.map_or(Value::Null, |date| {
            Value::String(date.format(DATE_FORMAT).to_string())
        })
    }

    fn time_input(
        &mut self,
        property: &Property,
        key: &str,
        label: &str,
        value: Option<&Value>,
    ) -> Value {
        let current = value
            .and_then(parse_time)
            .or_else(|| property.default.as_ref().and_then(parse_time));
        let edited = self.host.time_picker(key, label, current, property.read_only);
        edited.map_or(Value::Null, |time| {
            Value::String(time.format(TIME_FORMAT).to_string())
        })
    }

    fn date_time_input(
        &mut self,
        property: &Property,
        key: &str,
        label: &str,
        value: Option<&Value>,
    ) -> Value {
        let current = value
            .and_then(parse_date_time)
            .or_else(|| property.default.as_ref().and_then(parse_date_time));

        self.host.label(label);
        self.host.begin_group(&format!("{key}_datetime"));
        let (date_seed, time_seed) = current.map(|dt| (dt.date(), dt.time())).unzip();
        let date = self
            .host
            .date_picker(&format!("{key}_date"), label, date_seed, property.read_only);
        let time = self
            .host
            .time_picker(&format!("{key}_time"), label, time_seed, property.read_only);
        self.host.end_group();

        self.combine_date_time(date, time)
    }

    /// Combines picker sub-parts into one timestamp value.
    ///
    /// Both parts absent yields the absent value; a single absent part is
    /// completed from the host clock.
    fn combine_date_time(&self, date: Option<NaiveDate>, time: Option<NaiveTime>) -> Value {
        if date.is_none() && time.is_none() {
            return Value::Null;
        }
        let now = self.host.now();
        let combined = NaiveDateTime::new(
            date.unwrap_or_else(|| now.date()),
            time.unwrap_or_else(|| now.time()),
        );
        Value::String(combined.format(DATE_TIME_FORMAT).to_string())
    }

    /// Renders the editor for one collection element, label collapsed.
    pub(crate) fn item_input(
        &mut self,
        item: &ItemType,
        key: &str,
        path: &FieldPath,
        value: Option<&Value>,
    ) -> Result<Value> {
        if let Some(choices) = &item.choices {
            return Ok(self.choice_input(key, "", choices, value, false));
        }

        let result = match editor_kind_of(item.kind, item.format) {
            EditorKind::Boolean => Value::Bool(self.host.checkbox(
                key,
                "",
                value.and_then(Value::as_bool).unwrap_or(false),
                false,
            )),
            EditorKind::Integer => Value::from(self.host.int_input(
                key,
                "",
                value.and_then(as_int).unwrap_or(0),
                NumberOpts {
                    min: None,
                    max: None,
                    step: 1,
                    disabled: false,
                },
            )),
            EditorKind::Number => Value::from(self.host.float_input(
                key,
                "",
                value.and_then(Value::as_f64).unwrap_or(0.0),
                NumberOpts {
                    min: None,
                    max: None,
                    step: 0.01,
                    disabled: false,
                },
            )),
            EditorKind::Text => Value::String(self.host.text_input(
                key,
                "",
                &text_of(value).unwrap_or_default(),
                TextOpts::default(),
            )),
            EditorKind::Password => Value::String(self.host.text_input(
                key,
                "",
                &text_of(value).unwrap_or_default(),
                TextOpts {
                    masked: true,
                    ..TextOpts::default()
                },
            )),
            EditorKind::Color => {
                let current = value
                    .and_then(Value::as_str)
                    .unwrap_or("#000000")
                    .to_string();
                Value::String(self.host.color_picker(key, "", &current, false))
            }
            EditorKind::Date => {
                let edited = self
                    .host
                    .date_picker(key, "", value.and_then(parse_date), false);
                edited.map_or(Value::Null, |date| {
                    Value::String(date.format(DATE_FORMAT).to_string())
                })
            }
            EditorKind::Time => {
                let edited = self
                    .host
                    .time_picker(key, "", value.and_then(parse_time), false);
                edited.map_or(Value::Null, |time| {
                    Value::String(time.format(TIME_FORMAT).to_string())
                })
            }
            EditorKind::DateTime => {
                let current = value.and_then(parse_date_time);
                self.host.begin_group(&format!("{key}_datetime"));
                let (date_seed, time_seed) = current.map(|dt| (dt.date(), dt.time())).unzip();
                let date = self.host.date_picker(&format!("{key}_date"), "", date_seed, false);
                let time = self.host.time_picker(&format!("{key}_time"), "", time_seed, false);
                self.host.end_group();
                self.combine_date_time(date, time)
            }
            EditorKind::List | EditorKind::Map => {
                return Err(SchemaError::UnsupportedItemType {
                    path: path.to_string(),
                    item_type: item.kind.name().to_string(),
                }
                .into())
            }
        };
        Ok(result)
    }
}
