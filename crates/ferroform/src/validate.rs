//! Reusable checks for implementing [`FormModel`] validators.
//!
//! The engine itself never validates anything: it hands the assembled
//! value tree to [`FormModel::validate`] and maps whatever violations come
//! back. These validators cover the common constraints so model
//! implementations do not hand-roll them.
//!
//! [`FormModel`]: crate::FormModel
//! [`FormModel::validate`]: crate::FormModel::validate

use regex::Regex;
use serde_json::{Map, Value};

use crate::submit::Violation;

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    ///
    /// # Errors
    ///
    /// Returns the human-readable message to attach at the field.
    fn validate(&self, value: &Value) -> Result<(), String>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;
}

/// Runs each validator against the value at `field`, recording one
/// violation per failed check.
pub fn check_field(
    violations: &mut Vec<Violation>,
    values: &Map<String, Value>,
    field: &str,
    validators: &[&dyn Validator],
) {
    let missing = Value::Null;
    let value = values.get(field).unwrap_or(&missing);
    for validator in validators {
        if let Err(message) = validator.validate(value) {
            violations.push(Violation::new([field], message));
        }
    }
}

/// Validator that requires a present, non-empty value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new `RequiredValidator` with the default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "This field is required.".to_string(),
        }
    }

    /// Creates a new `RequiredValidator` with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &Value) -> Result<(), String> {
        let empty = match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if empty {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a minimum string length.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new `MinLengthValidator`.
    #[must_use]
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("Ensure this value has at least {min_length} characters."),
        }
    }

    /// Creates a new `MinLengthValidator` with a custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &Value) -> Result<(), String> {
        match value.as_str() {
            Some(s) if s.chars().count() < self.min_length => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a maximum string length.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new `MaxLengthValidator`.
    #[must_use]
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("Ensure this value has at most {max_length} characters."),
        }
    }

    /// Creates a new `MaxLengthValidator` with a custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &Value) -> Result<(), String> {
        match value.as_str() {
            Some(s) if s.chars().count() > self.max_length => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator using a custom regex pattern.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Regex,
    message: String,
}

impl PatternValidator {
    /// Creates a new `PatternValidator`.
    ///
    /// # Errors
    ///
    /// Fails when the pattern is not a valid regular expression.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }
}

impl Validator for PatternValidator {
    fn validate(&self, value: &Value) -> Result<(), String> {
        match value.as_str() {
            Some(s) if !self.pattern.is_match(s) => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for numeric range.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
    message: String,
}

impl RangeValidator {
    /// Creates a new `RangeValidator` with min and max bounds.
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("Value must be between {min} and {max}."),
            (Some(min), None) => format!("Value must be at least {min}."),
            (None, Some(max)) => format!("Value must be at most {max}."),
            (None, None) => "Invalid value.".to_string(),
        };
        Self { min, max, message }
    }

    /// Creates a new `RangeValidator` with a custom message.
    pub fn with_message(min: Option<f64>, max: Option<f64>, message: impl Into<String>) -> Self {
        Self {
            min,
            max,
            message: message.into(),
        }
    }
}

impl Validator for RangeValidator {
    fn validate(&self, value: &Value) -> Result<(), String> {
        let Some(number) = value.as_f64() else {
            return Err("Enter a valid number.".to_string());
        };
        if let Some(min) = self.min {
            if number < min {
                return Err(self.message.clone());
            }
        }
        if let Some(max) = self.max {
            if number > max {
                return Err(self.message.clone());
            }
        }
        Ok(())
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a step constraint on numbers.
#[derive(Debug, Clone)]
pub struct MultipleOfValidator {
    step: f64,
    message: String,
}

impl MultipleOfValidator {
    /// Creates a new `MultipleOfValidator`.
    #[must_use]
    pub fn new(step: f64) -> Self {
        Self {
            step,
            message: format!("Value must be a multiple of {step}."),
        }
    }
}

impl Validator for MultipleOfValidator {
    fn validate(&self, value: &Value) -> Result<(), String> {
        let Some(number) = value.as_f64() else {
            return Err("Enter a valid number.".to_string());
        };
        let remainder = (number / self.step).fract().abs();
        if remainder < 1e-9 || (1.0 - remainder) < 1e-9 {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}
