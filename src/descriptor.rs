//! Per-endpoint descriptors consumed by [`PathBuilder`][crate::PathBuilder].
//!
//! Descriptors are plain owned values. Registering an operation consumes them and hands
//! back a fully populated [`PathMethod`], so a descriptor can never be shared between two
//! registrations by accident.
use serde::{Deserialize, Serialize};

use crate::openapi::{builder, set_value, HttpMethod, ParameterIn, Type};
use crate::status;

builder! {
    PathSchemaBuilder;

    /// Request or response body of an operation: status code, description and an optional
    /// reference to the schema describing the body.
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    #[serde(rename_all = "camelCase")]
    pub struct PathSchema {
        /// Status code e.g. `200`, or `default` for the catch all response. Unused for
        /// request bodies.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub code: Option<String>,

        /// Human readable description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,

        /// Reference to the schema of the body e.g. `#/components/schemas/Item`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub schema_reference: Option<String>,
    }
}

impl PathSchema {
    /// Construct a new empty [`PathSchema`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Construct a [`PathSchema`] referencing given schema.
    pub fn with_reference<S: Into<String>>(schema_reference: S) -> Self {
        Self {
            schema_reference: Some(schema_reference.into()),
            ..Default::default()
        }
    }

    /// Schema reference if one is set and not empty.
    pub fn schema_reference(&self) -> Option<&str> {
        self.schema_reference
            .as_deref()
            .filter(|reference| !reference.is_empty())
    }

    /// Status code or an empty string when none is set.
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }
}

impl PathSchemaBuilder {
    /// Add or change status code.
    pub fn code<S: Into<String>>(mut self, code: Option<S>) -> Self {
        set_value!(self code code.map(Into::into))
    }

    /// Add or change description.
    pub fn description<S: Into<String>>(mut self, description: Option<S>) -> Self {
        set_value!(self description description.map(Into::into))
    }

    /// Add or change schema reference.
    pub fn schema_reference<S: Into<String>>(mut self, schema_reference: Option<S>) -> Self {
        set_value!(self schema_reference schema_reference.map(Into::into))
    }
}

builder! {
    PathParameterBuilder;

    /// Explicitly declared parameter of an operation.
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    #[serde(rename_all = "camelCase")]
    pub struct PathParameter {
        /// Name of the parameter.
        pub name: String,

        /// Location of the parameter.
        #[serde(rename = "in", default)]
        pub parameter_in: ParameterIn,

        /// Human readable description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,

        /// Whether the parameter must be present. Path parameters are always required.
        #[serde(default)]
        pub required: bool,

        /// Primitive type of the parameter value.
        #[serde(default)]
        pub schema_type: Type,
    }
}

impl PathParameter {
    /// Construct a new string [`PathParameter`] with given name and location.
    pub fn new<S: Into<String>>(name: S, parameter_in: ParameterIn) -> Self {
        Self {
            name: name.into(),
            parameter_in,
            required: parameter_in == ParameterIn::Path,
            ..Default::default()
        }
    }
}

impl PathParameterBuilder {
    /// Add name of the parameter.
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        set_value!(self name name.into())
    }

    /// Add location of the parameter.
    pub fn parameter_in(mut self, parameter_in: ParameterIn) -> Self {
        set_value!(self parameter_in parameter_in)
    }

    /// Add or change description.
    pub fn description<S: Into<String>>(mut self, description: Option<S>) -> Self {
        set_value!(self description description.map(Into::into))
    }

    /// Define whether the parameter is required.
    pub fn required(mut self, required: bool) -> Self {
        set_value!(self required required)
    }

    /// Add primitive type of the parameter.
    pub fn schema_type(mut self, schema_type: Type) -> Self {
        set_value!(self schema_type schema_type)
    }
}

builder! {
    PathMethodBuilder;

    /// One HTTP operation on one path together with its request and response bodies.
    ///
    /// The `method` is left unset by callers and stamped by the registering
    /// [`PathBuilder`][crate::PathBuilder] operation.
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    #[serde(rename_all = "camelCase")]
    pub struct PathMethod {
        /// HTTP method of the operation.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub method: Option<HttpMethod>,

        /// Relative path of the operation, possibly templated e.g. `/items/{id}`.
        pub path: String,

        /// Short summary of the operation.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub summary: Option<String>,

        /// Resource the operation belongs to. Rendered as the operation tag.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub resource: Option<String>,

        /// Unique identifier of the operation.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub operation_id: Option<String>,

        /// Protected operations require the configured security scheme.
        #[serde(default)]
        pub is_protected: bool,

        /// Whether the operation is deprecated.
        #[serde(default)]
        pub deprecated: bool,

        /// Operation succeeds without a response body. Forces the default success code to `204`.
        #[serde(default)]
        pub is_empty_response: bool,

        /// Explicitly declared parameters.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub parameters: Vec<PathParameter>,

        /// Request body. `None` means the operation takes no body at all.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub request_schema: Option<PathSchema>,

        /// Responses in declaration order.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub response_schemas: Vec<PathSchema>,
    }
}

impl PathMethod {
    /// Construct a new [`PathMethod`] for given path.
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// `true` when any declared response has a status code in `[200, 300)`.
    pub fn is_success_response_declared(&self) -> bool {
        self.response_schemas
            .iter()
            .any(|response| status::is_success(response.code()))
    }

    /// Return the descriptor with `response` appended to its responses.
    pub fn with_response_schema(mut self, response: PathSchema) -> Self {
        self.response_schemas.push(response);

        self
    }
}

impl PathMethodBuilder {
    /// Add relative path.
    pub fn path<S: Into<String>>(mut self, path: S) -> Self {
        set_value!(self path path.into())
    }

    /// Add or change summary.
    pub fn summary<S: Into<String>>(mut self, summary: Option<S>) -> Self {
        set_value!(self summary summary.map(Into::into))
    }

    /// Add or change resource name.
    pub fn resource<S: Into<String>>(mut self, resource: Option<S>) -> Self {
        set_value!(self resource resource.map(Into::into))
    }

    /// Add or change operation id.
    pub fn operation_id<S: Into<String>>(mut self, operation_id: Option<S>) -> Self {
        set_value!(self operation_id operation_id.map(Into::into))
    }

    /// Define whether the operation requires authentication.
    pub fn is_protected(mut self, is_protected: bool) -> Self {
        set_value!(self is_protected is_protected)
    }

    /// Define whether the operation is deprecated.
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        set_value!(self deprecated deprecated)
    }

    /// Define whether the operation succeeds without a body.
    pub fn is_empty_response(mut self, is_empty_response: bool) -> Self {
        set_value!(self is_empty_response is_empty_response)
    }

    /// Append a parameter.
    pub fn parameter(mut self, parameter: PathParameter) -> Self {
        self.parameters.push(parameter);

        self
    }

    /// Append a response.
    pub fn response_schema(mut self, response: PathSchema) -> Self {
        self.response_schemas.push(response);

        self
    }
}
