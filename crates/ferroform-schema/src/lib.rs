//! # ferroform-schema
//!
//! Schema model and field-path utilities for the ferroform form engine.
//!
//! This crate carries no UI knowledge: it describes the *shape* of a form
//! (scalar properties with constraint metadata, nested object references,
//! collection item descriptors) plus the path/key utilities used to compose
//! widget keys and match validator violation locations back onto fields.
//!
//! Schemas are either deserialized from the JSON-Schema-shaped dialect an
//! external schema source emits, or assembled in code:
//!
//! ```rust
//! use ferroform_schema::{Property, Schema};
//!
//! let schema = Schema::new("Login")
//!     .property("username", Property::string("Username").min_length(3))
//!     .property("password", Property::string("Password"))
//!     .required("username");
//!
//! assert!(schema.is_required("username"));
//! ```

mod error;
mod paths;
mod schema;

pub use error::SchemaError;
pub use paths::{key_to_label, label_to_key, FieldPath};
pub use schema::{ItemType, NestedRef, Property, PropertyFormat, PropertyKind, PropertyType, Schema};
