//! # ferroform
//!
//! Renders an interactive input form directly from a schema, collects the
//! edited values back into a schema-shaped value tree, validates the
//! result through an external validator, and maps every validation failure
//! back onto the field that caused it.
//!
//! The engine is built for a stateless-redraw runtime: the entire form
//! function re-executes on every user interaction, while collection item
//! identity, partially entered values and previous validation errors
//! survive across passes. Three seams keep it host-agnostic:
//!
//! - [`Host`]: the UI runtime supplying primitive editors, structural
//!   elements, per-key widget persistence and re-render scheduling.
//! - [`FormModel`]: the schema source and external validator for one
//!   model type.
//! - [`FormState`]: the explicit per-form state (error tree and collection
//!   slots) the host runtime stores between passes.
//!
//! ## Quick Start
//!
//! ```rust
//! use ferroform::harness::ScriptedHost;
//! use ferroform::schema::{Property, Schema};
//! use ferroform::{generate_form, FormModel, FormState, Violation};
//! use serde_json::{Map, Value};
//!
//! struct Login {
//!     username: String,
//! }
//!
//! impl FormModel for Login {
//!     fn schema() -> Schema {
//!         Schema::new("Login")
//!             .property("username", Property::string("Username"))
//!             .required("username")
//!     }
//!
//!     fn validate(values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
//!         match values.get("username").and_then(Value::as_str) {
//!             Some(name) if !name.is_empty() => Ok(Self {
//!                 username: name.to_string(),
//!             }),
//!             _ => Err(vec![Violation::new(["username"], "This field is required.")]),
//!         }
//!     }
//! }
//!
//! let mut host = ScriptedHost::new();
//! let mut state = FormState::new();
//!
//! host.set("login_username", "ada");
//! host.press("login_submit");
//! host.start_pass();
//!
//! let submitted = generate_form::<Login, _>(&mut host, &mut state).unwrap();
//! assert_eq!(submitted.map(|login| login.username), Some("ada".to_string()));
//! ```

mod collection;
mod error;
mod generator;
mod inputs;
mod state;
mod submit;

pub mod harness;
pub mod host;
pub mod validate;

pub use error::{FormError, Result};
pub use generator::{edit_form, generate_form, generate_form_with, FormOptions};
pub use host::{Host, NumberOpts, RangeOpts, TextOpts};
pub use state::{CollectionState, ErrorNode, ErrorTree, FormState, InputError, SlotMap};
pub use submit::{FormModel, Violation};

/// Re-export of the schema model crate.
pub use ferroform_schema as schema;
