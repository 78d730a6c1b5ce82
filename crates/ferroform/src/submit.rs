//! Submission bridge: the model/validator seam and violation mapping.

use ferroform_schema::{FieldPath, Schema};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::Result;
use crate::host::Host;
use crate::state::{ErrorTree, FormState};

/// One validation failure reported by the external validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path segments from the form root to the offending field.
    pub location: Vec<String>,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a violation at the given location.
    pub fn new<I, S>(location: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            location: location.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }
}

/// A model that can describe itself as a form schema and validate an
/// assembled value tree.
///
/// This is the seam to both external collaborators: the schema source and
/// the validator. `schema` is called once per render pass; `validate` only
/// when the user submits.
pub trait FormModel: Sized {
    /// The schema describing this model's shape and constraints.
    fn schema() -> Schema;

    /// Validates `values` and constructs the instance, or reports the
    /// ordered list of violations.
    ///
    /// # Errors
    ///
    /// Returns every constraint the value tree breaks, each located at the
    /// offending field's path.
    fn validate(values: &Map<String, Value>) -> std::result::Result<Self, Vec<Violation>>;
}

/// Handles a submit click: validate, and either finish the session or
/// persist the mapped errors and schedule a re-render.
pub(crate) fn submit_form<M, H>(
    host: &mut H,
    state: &mut FormState,
    form_key: &str,
    values: &Map<String, Value>,
    visited: &[FieldPath],
) -> Result<Option<M>>
where
    M: FormModel,
    H: Host,
{
    match M::validate(values) {
        Ok(instance) => {
            debug!(form = form_key, "form submitted and validated");
            state.reset(form_key);
            Ok(Some(instance))
        }
        Err(violations) => {
            debug!(
                form = form_key,
                count = violations.len(),
                "form submitted with violations"
            );
            let (errors, unmatched) = map_violations(&violations, visited);
            state.set_errors(errors, unmatched);
            host.request_rerender();
            Ok(None)
        }
    }
}

/// Maps a flat violation list onto the error tree.
///
/// For each violation the location is matched against the recorded field
/// paths: the longest location prefix that names a rendered field is where
/// the message attaches. This guards against the validator reporting a
/// sub-path deeper than any rendered leaf (e.g. inside a composite
/// timestamp) while staying anchored to this form's own fields. Locations
/// matching no rendered field are never dropped silently: they are logged
/// and surfaced as form-level errors.
pub(crate) fn map_violations(
    violations: &[Violation],
    visited: &[FieldPath],
) -> (ErrorTree, Vec<String>) {
    let mut errors = ErrorTree::new();
    let mut unmatched = Vec::new();

    for violation in violations {
        let matched_depth = (1..=violation.location.len())
            .rev()
            .find(|&depth| {
                visited
                    .iter()
                    .any(|path| path.segments() == &violation.location[..depth])
            });

        match matched_depth {
            Some(depth) => {
                errors.attach(&violation.location[..depth], violation.message.clone());
            }
            None => {
                warn!(
                    location = violation.location.join(".").as_str(),
                    message = violation.message.as_str(),
                    "violation does not match any rendered field"
                );
                unmatched.push(if violation.location.is_empty() {
                    violation.message.clone()
                } else {
                    format!("{}: {}", violation.location.join("."), violation.message)
                });
            }
        }
    }

    (errors, unmatched)
}
