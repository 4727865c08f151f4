//! Minimal schema types used by rendered operations.
//!
//! Full schema definitions live in the components section of a document which is
//! assembled elsewhere. Operations only ever point at those with a [`Ref`] or carry a
//! primitive inline [`Object`] for parameters.
use serde::{Deserialize, Serialize};

/// Implements [OpenAPI Reference Object][reference] that can be used to reference
/// reusable components.
///
/// The location is written as given, e.g. `#/components/schemas/Item` or an external
/// `https://example.com/schemas/item.json`. It is never resolved.
///
/// [reference]: https://spec.openapis.org/oas/latest.html#reference-object
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Ref {
    /// Reference location of the actual component.
    #[serde(rename = "$ref")]
    pub ref_location: String,
}

impl Ref {
    /// Construct a new [`Ref`] with custom ref location.
    pub fn new<I: Into<String>>(ref_location: I) -> Self {
        Self {
            ref_location: ref_location.into(),
        }
    }
}

/// Primitive inline schema.
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Object {
    /// Type of the value e.g. [`Type::String`].
    #[serde(rename = "type")]
    pub schema_type: Type,
}

impl Object {
    /// Initialize new [`Object`] with given [`Type`].
    pub fn with_type(schema_type: Type) -> Self {
        Self { schema_type }
    }
}

/// Represents data type of a primitive [`Object`].
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// Indicates string type of content.
    #[default]
    String,
    /// Indicates integer type of content.
    Integer,
    /// Indicates floating point number type of content.
    Number,
    /// Indicates boolean type of content.
    Boolean,
}
