//! Error types for form generation.

use ferroform_schema::SchemaError;
use thiserror::Error;

/// Errors that abort a render pass.
#[derive(Debug, Error)]
pub enum FormError {
    /// The schema is malformed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Collection state recorded under this widget key has a different
    /// shape than the property being rendered. Sibling forms sharing one
    /// state store must derive disjoint keys from their root prefix.
    #[error("collection state for widget key {key:?} has the wrong shape")]
    CollectionStateMismatch {
        /// The colliding widget key.
        key: String,
    },

    /// An instance handed to `edit_form` did not serialize to an object.
    #[error("form instances must serialize to an object, got {got}")]
    InstanceNotObject {
        /// JSON type name of what the instance serialized to.
        got: &'static str,
    },

    /// Serializing an instance for editing failed.
    #[error("failed to serialize form instance: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
