//! Implements [OpenApi Responses][responses].
//!
//! [responses]: https://spec.openapis.org/oas/latest.html#responses-object
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{builder, set_value, Content};

/// Status code key used for the response covering every undeclared status code.
pub const DEFAULT_RESPONSE: &str = "default";

/// Implements [OpenAPI Responses Object][responses].
///
/// Responses is a map holding api operation responses identified by their status code.
/// Keys keep insertion order and a later insert for an existing code replaces the response.
/// [`Responses::merge`] on the other hand merges responses sharing a status code.
///
/// [responses]: https://spec.openapis.org/oas/latest.html#responses-object
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Responses {
    /// Map containing status code as a key with represented response as a value.
    #[serde(flatten)]
    pub responses: IndexMap<String, Response>,
}

impl Responses {
    /// Construct a new [`Responses`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a [`Response`] by status code, replacing any response with the same code.
    pub fn insert<S: Into<String>>(&mut self, code: S, response: Response) {
        self.responses.insert(code.into(), response);
    }

    /// Get [`Response`] by status code.
    pub fn get<S: AsRef<str>>(&self, code: S) -> Option<&Response> {
        self.responses.get(code.as_ref())
    }

    /// Number of declared responses.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// `true` when there are no declared responses.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Merge `other` into `self`. New status codes are appended, responses sharing a status
    /// code are merged with [`Response::merge`].
    pub fn merge(&mut self, other: Responses) {
        for (code, that) in other.responses {
            match self.responses.get_mut(&code) {
                Some(this) => this.merge(that),
                None => {
                    self.responses.insert(code, that);
                }
            }
        }
    }
}

impl<C, R> FromIterator<(C, R)> for Responses
where
    C: Into<String>,
    R: Into<Response>,
{
    fn from_iter<T: IntoIterator<Item = (C, R)>>(iter: T) -> Self {
        Self {
            responses: iter
                .into_iter()
                .map(|(code, response)| (code.into(), response.into()))
                .collect(),
        }
    }
}

builder! {
    ResponseBuilder;

    /// Implements [OpenAPI Response Object][response].
    ///
    /// Response is api response to an operation. It may contain content describing the body.
    ///
    /// [response]: https://spec.openapis.org/oas/latest.html#response-object
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    #[serde(rename_all = "camelCase")]
    pub struct Response {
        /// Description of the response. Response support markdown syntax.
        pub description: String,

        /// Map of response [`Content`] objects identified by response body content type e.g `application/json`.
        #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
        pub content: IndexMap<String, Content>,
    }
}

impl Response {
    /// Construct a new [`Response`].
    ///
    /// Function takes description as argument.
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Merge `other` [`Response`] into `self`. Description is taken from `other`, content
    /// types of `other` replace matching content types of `self` and others are kept.
    pub fn merge(&mut self, other: Response) {
        self.description = other.description;
        self.content.extend(other.content);
    }
}

impl ResponseBuilder {
    /// Add description. Description supports markdown syntax.
    pub fn description<I: Into<String>>(mut self, description: I) -> Self {
        set_value!(self description description.into())
    }

    /// Add [`Content`] of the [`Response`] with content type e.g `application/json`.
    pub fn content<S: Into<String>>(mut self, content_type: S, content: Content) -> Self {
        self.content.insert(content_type.into(), content);

        self
    }
}
