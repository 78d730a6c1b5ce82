//! Schema shape errors.

use thiserror::Error;

/// Errors caused by a malformed schema.
///
/// These are raised before the affected subtree renders: a schema that
/// references a definition it does not carry, or a collection property
/// without an item descriptor, must never be silently tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A nested reference does not resolve inside `definitions`.
    #[error("unresolved reference {reference:?} in schema {schema:?}")]
    UnresolvedReference {
        /// Title of the schema the reference appeared in.
        schema: String,
        /// The reference that failed to resolve.
        reference: String,
    },

    /// An array property has no `items` descriptor.
    #[error("array property at {path:?} is missing its `items` descriptor")]
    MissingItems {
        /// Path of the offending property.
        path: String,
    },

    /// A map-typed object property has no `additionalProperties` descriptor.
    #[error("object property at {path:?} is missing its `additionalProperties` descriptor")]
    MissingAdditionalProperties {
        /// Path of the offending property.
        path: String,
    },

    /// A collection item descriptor uses a type items cannot have.
    #[error("collection items at {path:?} cannot be of type {item_type}")]
    UnsupportedItemType {
        /// Path of the offending property.
        path: String,
        /// The declared item type.
        item_type: String,
    },
}
