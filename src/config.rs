//! Configuration of the texts and rendering choices used while building paths.
//!
//! Every field has a default so a partial JSON document is a valid config.
//!
//! ```rust
//! use openapi_pathgen::Config;
//!
//! let config = Config::from_json_str(r#"{ "contentType": "application/vnd.api+json" }"#)
//!     .expect("config is valid JSON");
//! assert_eq!(config.content_type, "application/vnd.api+json");
//! assert_eq!(config.security_scheme, "bearerAuth");
//! ```
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Description given to request bodies.
pub const DESCRIPTION_DEFAULT_REQUEST: &str = "Expected request body.";
/// Description given to the `default` error response.
pub const DESCRIPTION_DEFAULT_RESPONSE: &str = "Expected response to a bad request.";
/// Description given to the default success response.
pub const DESCRIPTION_SUCCESSFUL_RESPONSE: &str = "Expected response to a valid request.";

/// Builder and renderer configuration.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase", default)]
#[non_exhaustive]
pub struct Config<'c> {
    /// Description set on attached request bodies.
    pub request_description: Cow<'c, str>,
    /// Description set on the `default` error response.
    pub error_description: Cow<'c, str>,
    /// Description set on the injected success response.
    pub success_description: Cow<'c, str>,
    /// Content type request and response schemas are rendered under.
    pub content_type: Cow<'c, str>,
    /// Security scheme name required by protected operations.
    pub security_scheme: Cow<'c, str>,
    /// Reject malformed paths and status codes instead of passing them through.
    pub strict: bool,
}

impl Default for Config<'_> {
    fn default() -> Self {
        Self {
            request_description: Cow::Borrowed(DESCRIPTION_DEFAULT_REQUEST),
            error_description: Cow::Borrowed(DESCRIPTION_DEFAULT_RESPONSE),
            success_description: Cow::Borrowed(DESCRIPTION_SUCCESSFUL_RESPONSE),
            content_type: Cow::Borrowed("application/json"),
            security_scheme: Cow::Borrowed("bearerAuth"),
            strict: false,
        }
    }
}

impl<'c> Config<'c> {
    /// Construct a new [`Config`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Change description of attached request bodies.
    pub fn request_description<S: Into<Cow<'c, str>>>(mut self, description: S) -> Self {
        self.request_description = description.into();

        self
    }

    /// Change description of the `default` error response.
    pub fn error_description<S: Into<Cow<'c, str>>>(mut self, description: S) -> Self {
        self.error_description = description.into();

        self
    }

    /// Change description of the injected success response.
    pub fn success_description<S: Into<Cow<'c, str>>>(mut self, description: S) -> Self {
        self.success_description = description.into();

        self
    }

    /// Change content type of request and response bodies e.g. `application/vnd.api+json`.
    pub fn content_type<S: Into<Cow<'c, str>>>(mut self, content_type: S) -> Self {
        self.content_type = content_type.into();

        self
    }

    /// Change security scheme required by protected operations.
    pub fn security_scheme<S: Into<Cow<'c, str>>>(mut self, security_scheme: S) -> Self {
        self.security_scheme = security_scheme.into();

        self
    }

    /// Define whether malformed paths and status codes are rejected.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;

        self
    }

    /// Parse a [`Config`] from JSON. Missing fields take their default values.
    pub fn from_json_str(json: &'c str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this [`Config`] to JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Config<'static> {
    /// Read a [`Config`] from a JSON file.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config<'_> = serde_json::from_str(&json)?;

        Ok(config.into_owned())
    }

    /// Write this [`Config`] as JSON to given file.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Config<'_> {
    /// Detach this [`Config`] from any borrowed input.
    pub fn into_owned(self) -> Config<'static> {
        Config {
            request_description: Cow::Owned(self.request_description.into_owned()),
            error_description: Cow::Owned(self.error_description.into_owned()),
            success_description: Cow::Owned(self.success_description.into_owned()),
            content_type: Cow::Owned(self.content_type.into_owned()),
            security_scheme: Cow::Owned(self.security_scheme.into_owned()),
            strict: self.strict,
        }
    }
}
