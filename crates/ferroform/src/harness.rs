//! A scripted host for driving forms in tests and examples.
//!
//! [`ScriptedHost`] implements [`Host`] against an in-memory widget store:
//! it records a transcript of every element a pass renders, persists
//! widget values by key exactly like a real runtime would, and lets a test
//! queue edits and button presses between passes. [`drive`] runs the
//! explicit render loop of the execution model: one pass per interaction,
//! plus any follow-up passes the engine requests.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

use crate::error::Result;
use crate::generator::{generate_form_with, FormOptions};
use crate::host::{Host, NumberOpts, RangeOpts, TextOpts};
use crate::inputs::{DATE_FORMAT, TIME_FORMAT};
use crate::state::FormState;
use crate::submit::FormModel;

/// The affordance an editor rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorWidget {
    /// Toggle.
    Checkbox,
    /// Free integer field.
    IntInput,
    /// Bounded integer range.
    IntSlider,
    /// Free floating point field.
    FloatInput,
    /// Bounded floating point range.
    FloatSlider,
    /// Plain text.
    Text,
    /// Masked text.
    Password,
    /// Single-choice selector.
    Select,
    /// Color picker.
    Color,
    /// Calendar date picker.
    Date,
    /// Clock time picker.
    Time,
}

/// One element rendered during a pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// A form heading.
    Heading(String),
    /// A static text label.
    Label(String),
    /// Help text.
    Help(String),
    /// An inline validation message.
    Error(String),
    /// Start of a bordered group.
    GroupStart(String),
    /// End of a bordered group.
    GroupEnd,
    /// A button.
    Button {
        /// Widget key.
        key: String,
        /// Button label.
        label: String,
    },
    /// A primitive editor.
    Editor {
        /// Widget key.
        key: String,
        /// Display label.
        label: String,
        /// The affordance used.
        widget: EditorWidget,
        /// The value presented after this pass.
        value: Value,
        /// Whether the editor rendered disabled.
        disabled: bool,
    },
}

/// An in-memory host with scriptable interactions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHost {
    widgets: HashMap<String, Value>,
    pressed: HashSet<String>,
    transcript: Vec<Rendered>,
    rerender: bool,
    clock: Option<NaiveDateTime>,
}

impl ScriptedHost {
    /// Creates a host with an empty widget store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given fixed clock for timestamp completion instead of the
    /// wall clock.
    #[must_use]
    pub fn with_clock(mut self, clock: NaiveDateTime) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Records a user edit: the widget at `key` now holds `value`.
    ///
    /// Selectors store the chosen option index; date and time pickers store
    /// the formatted string, or `Null` to clear.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.widgets.insert(key.into(), value.into());
    }

    /// Arms a button press; it fires once, on the next pass that renders it.
    pub fn press(&mut self, key: impl Into<String>) {
        self.pressed.insert(key.into());
    }

    /// Starts a fresh pass, clearing the previous transcript.
    pub fn start_pass(&mut self) {
        self.transcript.clear();
    }

    /// Elements rendered by the last pass, in order.
    #[must_use]
    pub fn transcript(&self) -> &[Rendered] {
        &self.transcript
    }

    /// The stored value of a widget, if it has rendered at least once.
    #[must_use]
    pub fn widget(&self, key: &str) -> Option<&Value> {
        self.widgets.get(key)
    }

    /// The editor rendered under `key` in the last pass.
    #[must_use]
    pub fn editor(&self, key: &str) -> Option<&Rendered> {
        self.transcript
            .iter()
            .find(|element| matches!(element, Rendered::Editor { key: k, .. } if k == key))
    }

    /// Inline error messages rendered between this editor and the next one.
    #[must_use]
    pub fn errors_for(&self, key: &str) -> Vec<String> {
        let mut found = false;
        let mut messages = Vec::new();
        for element in &self.transcript {
            match element {
                Rendered::Editor { key: k, .. } => {
                    if found {
                        break;
                    }
                    found = k == key;
                }
                Rendered::Error(message) if found => messages.push(message.clone()),
                _ => {}
            }
        }
        messages
    }

    /// Whether the engine asked for another pass.
    #[must_use]
    pub fn rerender_requested(&self) -> bool {
        self.rerender
    }

    /// Consumes a pending re-render request.
    pub fn take_rerender(&mut self) -> bool {
        std::mem::take(&mut self.rerender)
    }

    /// Stored value under `key`, seeding the store on first render.
    /// Disabled editors present the seed and ignore stored edits.
    fn current(&mut self, key: &str, seed: Value, disabled: bool) -> Value {
        if disabled {
            seed
        } else {
            self.widgets.entry(key.to_string()).or_insert(seed).clone()
        }
    }

    fn store(&mut self, key: &str, value: Value, disabled: bool) {
        if !disabled {
            self.widgets.insert(key.to_string(), value);
        }
    }

    fn record_editor(
        &mut self,
        key: &str,
        label: &str,
        widget: EditorWidget,
        value: Value,
        disabled: bool,
    ) {
        self.transcript.push(Rendered::Editor {
            key: key.to_string(),
            label: label.to_string(),
            widget,
            value,
            disabled,
        });
    }
}

impl Host for ScriptedHost {
    fn heading(&mut self, text: &str) {
        self.transcript.push(Rendered::Heading(text.to_string()));
    }

    fn label(&mut self, text: &str) {
        self.transcript.push(Rendered::Label(text.to_string()));
    }

    fn help(&mut self, text: &str) {
        self.transcript.push(Rendered::Help(text.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.transcript.push(Rendered::Error(message.to_string()));
    }

    fn begin_group(&mut self, key: &str) {
        self.transcript.push(Rendered::GroupStart(key.to_string()));
    }

    fn end_group(&mut self) {
        self.transcript.push(Rendered::GroupEnd);
    }

    fn button(&mut self, key: &str, label: &str) -> bool {
        self.transcript.push(Rendered::Button {
            key: key.to_string(),
            label: label.to_string(),
        });
        self.pressed.remove(key)
    }

    fn checkbox(&mut self, key: &str, label: &str, value: bool, disabled: bool) -> bool {
        let stored = self.current(key, Value::Bool(value), disabled);
        let result = stored.as_bool().unwrap_or(value);
        self.store(key, Value::Bool(result), disabled);
        self.record_editor(key, label, EditorWidget::Checkbox, Value::Bool(result), disabled);
        result
    }

    fn int_input(&mut self, key: &str, label: &str, value: i64, opts: NumberOpts<i64>) -> i64 {
        let stored = self.current(key, Value::from(value), opts.disabled);
        let mut result = stored.as_i64().unwrap_or(value);
        if let Some(min) = opts.min {
            result = result.max(min);
        }
        if let Some(max) = opts.max {
            result = result.min(max);
        }
        self.store(key, Value::from(result), opts.disabled);
        self.record_editor(key, label, EditorWidget::IntInput, Value::from(result), opts.disabled);
        result
    }

    fn int_slider(&mut self, key: &str, label: &str, value: i64, opts: RangeOpts<i64>) -> i64 {
        let stored = self.current(key, Value::from(value), opts.disabled);
        let result = stored.as_i64().unwrap_or(value).clamp(opts.min, opts.max);
        self.store(key, Value::from(result), opts.disabled);
        self.record_editor(key, label, EditorWidget::IntSlider, Value::from(result), opts.disabled);
        result
    }

    fn float_input(&mut self, key: &str, label: &str, value: f64, opts: NumberOpts<f64>) -> f64 {
        let stored = self.current(key, Value::from(value), opts.disabled);
        let mut result = stored.as_f64().unwrap_or(value);
        if let Some(min) = opts.min {
            result = result.max(min);
        }
        if let Some(max) = opts.max {
            result = result.min(max);
        }
        self.store(key, Value::from(result), opts.disabled);
        self.record_editor(
            key,
            label,
            EditorWidget::FloatInput,
            Value::from(result),
            opts.disabled,
        );
        result
    }

    fn float_slider(&mut self, key: &str, label: &str, value: f64, opts: RangeOpts<f64>) -> f64 {
        let stored = self.current(key, Value::from(value), opts.disabled);
        let result = stored.as_f64().unwrap_or(value).clamp(opts.min, opts.max);
        self.store(key, Value::from(result), opts.disabled);
        self.record_editor(
            key,
            label,
            EditorWidget::FloatSlider,
            Value::from(result),
            opts.disabled,
        );
        result
    }

    fn text_input(&mut self, key: &str, label: &str, value: &str, opts: TextOpts) -> String {
        let stored = self.current(key, Value::String(value.to_string()), opts.disabled);
        let mut result = stored
            .as_str()
            .map_or_else(|| value.to_string(), ToOwned::to_owned);
        if let Some(max) = opts.max_length {
            result = result.chars().take(max).collect();
        }
        self.store(key, Value::String(result.clone()), opts.disabled);
        let widget = if opts.masked {
            EditorWidget::Password
        } else {
            EditorWidget::Text
        };
        self.record_editor(key, label, widget, Value::String(result.clone()), opts.disabled);
        result
    }

    fn select(
        &mut self,
        key: &str,
        label: &str,
        options: &[String],
        selected: usize,
        disabled: bool,
    ) -> usize {
        let stored = self.current(key, Value::from(selected as u64), disabled);
        let mut result = stored.as_u64().map_or(selected, |index| index as usize);
        if result >= options.len() {
            result = selected;
        }
        self.store(key, Value::from(result as u64), disabled);
        let shown = options.get(result).cloned().map_or(Value::Null, Value::String);
        self.record_editor(key, label, EditorWidget::Select, shown, disabled);
        result
    }

    fn color_picker(&mut self, key: &str, label: &str, value: &str, disabled: bool) -> String {
        let stored = self.current(key, Value::String(value.to_string()), disabled);
        let result = stored
            .as_str()
            .map_or_else(|| value.to_string(), ToOwned::to_owned);
        self.store(key, Value::String(result.clone()), disabled);
        self.record_editor(key, label, EditorWidget::Color, Value::String(result.clone()), disabled);
        result
    }

    fn date_picker(
        &mut self,
        key: &str,
        label: &str,
        value: Option<NaiveDate>,
        disabled: bool,
    ) -> Option<NaiveDate> {
        let seed = value.map_or(Value::Null, |date| {
            Value::String(date.format(DATE_FORMAT).to_string())
        });
        let stored = self.current(key, seed, disabled);
        let result = stored
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok());
        let shown = result.map_or(Value::Null, |date| {
            Value::String(date.format(DATE_FORMAT).to_string())
        });
        self.store(key, shown.clone(), disabled);
        self.record_editor(key, label, EditorWidget::Date, shown, disabled);
        result
    }

    fn time_picker(
        &mut self,
        key: &str,
        label: &str,
        value: Option<NaiveTime>,
        disabled: bool,
    ) -> Option<NaiveTime> {
        let seed = value.map_or(Value::Null, |time| {
            Value::String(time.format(TIME_FORMAT).to_string())
        });
        let stored = self.current(key, seed, disabled);
        let result = stored
            .as_str()
            .and_then(|s| NaiveTime::parse_from_str(s, TIME_FORMAT).ok());
        let shown = result.map_or(Value::Null, |time| {
            Value::String(time.format(TIME_FORMAT).to_string())
        });
        self.store(key, shown.clone(), disabled);
        self.record_editor(key, label, EditorWidget::Time, shown, disabled);
        result
    }

    fn request_rerender(&mut self) {
        self.rerender = true;
    }

    fn now(&self) -> NaiveDateTime {
        self.clock
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }
}

/// Runs render passes until no further pass is requested, returning the
/// last pass's result.
///
/// One pass always runs; afterwards the loop continues while the engine
/// has requested a re-render, up to `max_passes` in total. This is the
/// explicit render loop of the execution model: each accepted interaction
/// mutates host/form state, then the whole tree is recomputed.
///
/// # Errors
///
/// Propagates any [`crate::FormError`] from a pass.
pub fn drive<M>(
    host: &mut ScriptedHost,
    state: &mut FormState,
    options: &FormOptions,
    max_passes: usize,
) -> Result<Option<M>>
where
    M: FormModel,
{
    let mut result = None;
    for _ in 0..max_passes {
        host.start_pass();
        result = generate_form_with::<M, _>(host, state, options)?;
        if result.is_some() || !host.take_rerender() {
            break;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_state_persists_across_passes() {
        let mut host = ScriptedHost::new();
        let first = host.text_input("k", "Label", "seed", TextOpts::default());
        assert_eq!(first, "seed");

        host.set("k", "edited");
        let second = host.text_input("k", "Label", "seed", TextOpts::default());
        assert_eq!(second, "edited");
    }

    #[test]
    fn test_button_fires_once() {
        let mut host = ScriptedHost::new();
        assert!(!host.button("go", "Go"));
        host.press("go");
        assert!(host.button("go", "Go"));
        assert!(!host.button("go", "Go"));
    }

    #[test]
    fn test_disabled_editor_ignores_edits() {
        let mut host = ScriptedHost::new();
        host.set("k", "edited");
        let opts = TextOpts {
            disabled: true,
            ..TextOpts::default()
        };
        assert_eq!(host.text_input("k", "Label", "seed", opts), "seed");
    }

    #[test]
    fn test_text_input_honors_max_length() {
        let mut host = ScriptedHost::new();
        host.set("k", "overlong");
        let opts = TextOpts {
            max_length: Some(4),
            ..TextOpts::default()
        };
        assert_eq!(host.text_input("k", "Label", "", opts), "over");
    }

    #[test]
    fn test_slider_clamps_to_bounds() {
        let mut host = ScriptedHost::new();
        host.set("k", 99);
        let opts = RangeOpts {
            min: 0,
            max: 10,
            step: 1,
            disabled: false,
        };
        assert_eq!(host.int_slider("k", "Label", 5, opts), 10);
    }

    #[test]
    fn test_date_picker_clears_on_null() {
        let mut host = ScriptedHost::new();
        let seed = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(host.date_picker("k", "Label", seed, false), seed);

        host.set("k", Value::Null);
        assert_eq!(host.date_picker("k", "Label", seed, false), None);
    }
}
