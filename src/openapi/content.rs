//! Implements content object for request body and response.
use serde::{Deserialize, Serialize};

use super::schema::Ref;

/// Content holds request body content or response content.
///
/// [`Content`] implements OpenAPI [Media Type Object][media_type]
///
/// [media_type]: <https://spec.openapis.org/oas/latest.html#media-type-object>
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[non_exhaustive]
pub struct Content {
    /// Schema used in response body or request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Ref>,
}

impl Content {
    /// Construct a new [`Content`] object for provided _`schema`_.
    pub fn new(schema: Option<Ref>) -> Self {
        Self { schema }
    }
}
