//! The host UI runtime seam.
//!
//! The engine never draws anything itself. Each render pass walks the
//! schema and asks the host for one primitive editor or structural element
//! at a time, identified by a stable widget key. The host owns widget-value
//! persistence: an editor receives the engine's seed value and returns
//! whatever the user has entered under that key so far.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Options for free numeric editors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberOpts<T> {
    /// Lower bound, when resolvable.
    pub min: Option<T>,
    /// Upper bound, when resolvable.
    pub max: Option<T>,
    /// Step between adjacent values.
    pub step: T,
    /// Render the editor disabled.
    pub disabled: bool,
}

/// Options for bounded range editors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeOpts<T> {
    /// Lower bound.
    pub min: T,
    /// Upper bound.
    pub max: T,
    /// Step between adjacent values.
    pub step: T,
    /// Render the editor disabled.
    pub disabled: bool,
}

/// Options for text editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextOpts {
    /// Maximum accepted length in characters.
    pub max_length: Option<usize>,
    /// Mask the entered text (passwords).
    pub masked: bool,
    /// Render the editor disabled.
    pub disabled: bool,
}

/// The UI runtime a form renders into.
///
/// Implementations supply the primitive editors and structural elements,
/// persist widget values under the given keys across render passes, and
/// schedule fresh passes when [`Host::request_rerender`] is called. All
/// methods are invoked synchronously from within a single render pass.
pub trait Host {
    /// Renders a form heading.
    fn heading(&mut self, text: &str);

    /// Renders a static text label.
    fn label(&mut self, text: &str);

    /// Renders help text for the preceding editor.
    fn help(&mut self, text: &str);

    /// Renders an inline validation message.
    fn error(&mut self, message: &str);

    /// Opens a bordered group; paired with [`Host::end_group`].
    fn begin_group(&mut self, key: &str);

    /// Closes the innermost open group.
    fn end_group(&mut self);

    /// Renders a button, returning whether it was pressed this pass.
    fn button(&mut self, key: &str, label: &str) -> bool;

    /// Renders a toggle editor.
    fn checkbox(&mut self, key: &str, label: &str, value: bool, disabled: bool) -> bool;

    /// Renders a free integer editor.
    fn int_input(&mut self, key: &str, label: &str, value: i64, opts: NumberOpts<i64>) -> i64;

    /// Renders a bounded integer range editor.
    fn int_slider(&mut self, key: &str, label: &str, value: i64, opts: RangeOpts<i64>) -> i64;

    /// Renders a free floating point editor.
    fn float_input(&mut self, key: &str, label: &str, value: f64, opts: NumberOpts<f64>) -> f64;

    /// Renders a bounded floating point range editor.
    fn float_slider(&mut self, key: &str, label: &str, value: f64, opts: RangeOpts<f64>) -> f64;

    /// Renders a text editor.
    fn text_input(&mut self, key: &str, label: &str, value: &str, opts: TextOpts) -> String;

    /// Renders a single-choice selector, returning the chosen index.
    fn select(
        &mut self,
        key: &str,
        label: &str,
        options: &[String],
        selected: usize,
        disabled: bool,
    ) -> usize;

    /// Renders a swatch/hex color picker.
    fn color_picker(&mut self, key: &str, label: &str, value: &str, disabled: bool) -> String;

    /// Renders a calendar date picker.
    fn date_picker(
        &mut self,
        key: &str,
        label: &str,
        value: Option<NaiveDate>,
        disabled: bool,
    ) -> Option<NaiveDate>;

    /// Renders a clock time picker.
    fn time_picker(
        &mut self,
        key: &str,
        label: &str,
        value: Option<NaiveTime>,
        disabled: bool,
    ) -> Option<NaiveTime>;

    /// Requests another full render pass after the current one completes.
    fn request_rerender(&mut self);

    /// Current wall-clock time, used to complete half-filled timestamps.
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
