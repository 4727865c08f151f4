//! Implements [OpenAPI Path Object][paths] types.
//!
//! [paths]: https://spec.openapis.org/oas/latest.html#paths-object
use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{
    builder, request_body::RequestBody, response::Responses, schema::Object, set_value,
    Deprecated, RefOr, Required,
};

/// Implements [OpenAPI Paths Object][paths].
///
/// Holds relative paths to matching endpoints and operations. Paths keep the order in which
/// they were first added.
///
/// [paths]: https://spec.openapis.org/oas/latest.html#paths-object
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Paths {
    /// Map of relative paths with [`PathItem`]s holding [`Operation`]s matching
    /// api endpoints.
    #[serde(flatten)]
    pub paths: IndexMap<String, PathItem>,
}

impl Paths {
    /// Construct a new [`Paths`] object.
    pub fn new() -> Self {
        Default::default()
    }

    /// Construct [`Paths`] holding a single [`Operation`] under given `path` and [`HttpMethod`].
    pub fn from_operation<P: Into<String>, O: Into<Operation>>(
        path: P,
        http_method: HttpMethod,
        operation: O,
    ) -> Self {
        let mut paths = Self::new();
        paths
            .paths
            .insert(path.into(), PathItem::new(http_method, operation));

        paths
    }

    /// Return _`Option`_ of reference to [`PathItem`] by given relative path _`P`_ if one exists
    /// in [`Paths::paths`] map. Otherwise will return `None`.
    pub fn get_path_item<P: AsRef<str>>(&self, path: P) -> Option<&PathItem> {
        self.paths.get(path.as_ref())
    }

    /// Return _`Option`_ of reference to [`Operation`] from map of paths or `None` if not found.
    ///
    /// * First will try to find [`PathItem`] by given relative path _`P`_ e.g. `"/items"`.
    /// * Then tries to find [`Operation`] from [`PathItem`]'s operations by given [`HttpMethod`].
    pub fn get_path_operation<P: AsRef<str>>(
        &self,
        path: P,
        http_method: HttpMethod,
    ) -> Option<&Operation> {
        self.paths
            .get(path.as_ref())
            .and_then(|path_item| path_item.operation(http_method))
    }

    /// `true` when no path has been added.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Deep merge _`other_paths`_ into `self`.
    ///
    /// New paths are appended. On conflicting path the [`PathItem`]s are merged with
    /// [`PathItem::merge`] so operations of the same path end up under a single key.
    pub fn merge(&mut self, other_paths: Paths) {
        for (path, that) in other_paths.paths {
            if let Some(this) = self.paths.get_mut(&path) {
                trace!(path = %path, "merging into existing path item");
                this.merge(that);
            } else {
                self.paths.insert(path, that);
            }
        }
    }

    /// Converts these [`Paths`] to JSON String. This method essentially calls [`serde_json::to_string`] method.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Converts these [`Paths`] to pretty JSON String. This method essentially calls [`serde_json::to_string_pretty`] method.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Converts these [`Paths`] to YAML String. This method essentially calls [`serde_norway::to_string`] method.
    #[cfg(feature = "yaml")]
    #[cfg_attr(doc_cfg, doc(cfg(feature = "yaml")))]
    pub fn to_yaml(&self) -> Result<String, serde_norway::Error> {
        serde_norway::to_string(self)
    }
}

/// Implements [OpenAPI Path Item Object][path_item] what describes [`Operation`]s available on
/// a single path.
///
/// Operations are kept in the order their methods were first added.
///
/// [path_item]: https://spec.openapis.org/oas/latest.html#path-item-object
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct PathItem {
    /// Operations of this path by [`HttpMethod`].
    #[serde(flatten)]
    pub operations: IndexMap<HttpMethod, Operation>,
}

impl PathItem {
    /// Construct a new [`PathItem`] with provided [`Operation`] mapped to given [`HttpMethod`].
    pub fn new<O: Into<Operation>>(http_method: HttpMethod, operation: O) -> Self {
        let mut path_item = Self::default();
        path_item.operations.insert(http_method, operation.into());

        path_item
    }

    /// Get [`Operation`] by [`HttpMethod`].
    pub fn operation(&self, http_method: HttpMethod) -> Option<&Operation> {
        self.operations.get(&http_method)
    }

    /// Deep merge operations of `other` into `self`. Operations for a method not yet present
    /// are appended, operations for an existing method are merged with [`Operation::merge`].
    pub fn merge(&mut self, other: PathItem) {
        for (http_method, that) in other.operations {
            if let Some(this) = self.operations.get_mut(&http_method) {
                trace!(method = %http_method, "merging into existing operation");
                this.merge(that);
            } else {
                self.operations.insert(http_method, that);
            }
        }
    }
}

/// HTTP method of the operation.
///
/// Serializes to the lower case method name used as key in [`PathItem`].
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "debug", derive(Debug))]
pub enum HttpMethod {
    /// Type mapping for HTTP _GET_ request.
    Get,
    /// Type mapping for HTTP _POST_ request.
    Post,
    /// Type mapping for HTTP _PATCH_ request.
    Patch,
    /// Type mapping for HTTP _DELETE_ request.
    Delete,
}

impl HttpMethod {
    /// Lower case name of the method as used in OpenAPI documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

builder! {
    OperationBuilder;

    /// Implements [OpenAPI Operation Object][operation] object.
    ///
    /// [operation]: https://spec.openapis.org/oas/latest.html#operation-object
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    #[serde(rename_all = "camelCase")]
    pub struct Operation {
        /// List of tags used for grouping operations.
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub tags: Vec<String>,

        /// Short summary what [`Operation`] does.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub summary: Option<String>,

        /// Long explanation of [`Operation`] behaviour. Markdown syntax is supported.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,

        /// Unique identifier for the API [`Operation`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub operation_id: Option<String>,

        /// List of applicable parameters for this [`Operation`].
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub parameters: Vec<Parameter>,

        /// Optional request body for this [`Operation`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub request_body: Option<RequestBody>,

        /// List of possible responses returned by the [`Operation`].
        pub responses: Responses,

        /// Define whether the operation is deprecated or not and thus should be avoided consuming.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub deprecated: Option<Deprecated>,

        /// Security requirements of the operation as a list of `{ scheme: [scopes] }` maps.
        /// Only one of the requirements must be met.
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub security: Vec<IndexMap<String, Vec<String>>>,
    }
}

impl Operation {
    /// Construct a new API [`Operation`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Deep merge `other` into `self`.
    ///
    /// * `responses` merge by status code, see [`Responses::merge`].
    /// * `parameters` accumulate, a parameter with the same name and location is replaced in place.
    /// * `tags` and `security` accumulate without duplicates.
    /// * Remaining fields are taken from `other` when set.
    pub fn merge(&mut self, other: Operation) {
        for tag in other.tags {
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        if other.summary.is_some() {
            self.summary = other.summary;
        }
        if other.description.is_some() {
            self.description = other.description;
        }
        if other.operation_id.is_some() {
            self.operation_id = other.operation_id;
        }
        for parameter in other.parameters {
            match self
                .parameters
                .iter_mut()
                .find(|existing| existing.is_same(&parameter))
            {
                Some(existing) => *existing = parameter,
                None => self.parameters.push(parameter),
            }
        }
        if let Some(that) = other.request_body {
            match &mut self.request_body {
                Some(this) => this.merge(that),
                None => self.request_body = Some(that),
            }
        }
        self.responses.merge(other.responses);
        if other.deprecated.is_some() {
            self.deprecated = other.deprecated;
        }
        for requirement in other.security {
            if !self.security.contains(&requirement) {
                self.security.push(requirement);
            }
        }
    }
}

impl OperationBuilder {
    /// Add or change tags of the [`Operation`].
    pub fn tags<I: IntoIterator<Item = V>, V: Into<String>>(mut self, tags: I) -> Self {
        set_value!(self tags tags.into_iter().map(Into::into).collect())
    }

    /// Append tag to [`Operation`] tags.
    pub fn tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tags.push(tag.into());

        self
    }

    /// Add or change short summary of the [`Operation`].
    pub fn summary<S: Into<String>>(mut self, summary: Option<S>) -> Self {
        set_value!(self summary summary.map(|summary| summary.into()))
    }

    /// Add or change description of the [`Operation`].
    pub fn description<S: Into<String>>(mut self, description: Option<S>) -> Self {
        set_value!(self description description.map(|description| description.into()))
    }

    /// Add or change operation id of the [`Operation`].
    pub fn operation_id<S: Into<String>>(mut self, operation_id: Option<S>) -> Self {
        set_value!(self operation_id operation_id.map(|operation_id| operation_id.into()))
    }

    /// Append parameter to [`Operation`] parameters.
    pub fn parameter<P: Into<Parameter>>(mut self, parameter: P) -> Self {
        self.parameters.push(parameter.into());

        self
    }

    /// Add or change request body of the [`Operation`].
    pub fn request_body(mut self, request_body: Option<RequestBody>) -> Self {
        set_value!(self request_body request_body)
    }

    /// Append status code and a [`Response`][super::Response] to the [`Operation`] responses map.
    pub fn response<S: Into<String>, R: Into<super::Response>>(
        mut self,
        code: S,
        response: R,
    ) -> Self {
        self.responses.insert(code, response.into());

        self
    }

    /// Add or change deprecated status of the [`Operation`].
    pub fn deprecated(mut self, deprecated: Option<Deprecated>) -> Self {
        set_value!(self deprecated deprecated)
    }

    /// Append security requirement for `scheme` with given `scopes`.
    pub fn security<N: Into<String>, I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        scheme: N,
        scopes: I,
    ) -> Self {
        let mut requirement = IndexMap::new();
        requirement.insert(
            scheme.into(),
            scopes.into_iter().map(Into::into).collect(),
        );
        self.security.push(requirement);

        self
    }
}

builder! {
    ParameterBuilder;

    /// Implements [OpenAPI Parameter Object][parameter] for [`Operation`].
    ///
    /// [parameter]: https://spec.openapis.org/oas/latest.html#parameter-object
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    #[serde(rename_all = "camelCase")]
    pub struct Parameter {
        /// Name of the parameter.
        ///
        /// * For [`ParameterIn::Path`] this must in accordance to path templating.
        pub name: String,

        /// Parameter location.
        #[serde(rename = "in")]
        pub parameter_in: ParameterIn,

        /// Markdown supported description of the parameter.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,

        /// Declares whether the parameter is required or not for api.
        ///
        /// * For [`ParameterIn::Path`] this must and will be [`Required::True`].
        pub required: Required,

        /// Schema of the parameter.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub schema: Option<RefOr<Object>>,
    }
}

impl Parameter {
    /// Constructs a new required [`Parameter`] with given name.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            required: Required::True,
            ..Default::default()
        }
    }

    /// Parameters are the same parameter when both name and location match.
    pub fn is_same(&self, other: &Parameter) -> bool {
        self.name == other.name && self.parameter_in == other.parameter_in
    }
}

impl ParameterBuilder {
    /// Add name of the [`Parameter`].
    pub fn name<I: Into<String>>(mut self, name: I) -> Self {
        set_value!(self name name.into())
    }

    /// Add in of the [`Parameter`].
    pub fn parameter_in(mut self, parameter_in: ParameterIn) -> Self {
        self.parameter_in = parameter_in;
        if self.parameter_in == ParameterIn::Path {
            self.required = Required::True;
        }

        self
    }

    /// Add required declaration of the [`Parameter`]. If [`ParameterIn::Path`] is
    /// defined this is always [`Required::True`].
    pub fn required(mut self, required: Required) -> Self {
        self.required = required;
        // required must be true, if parameter_in is Path
        if self.parameter_in == ParameterIn::Path {
            self.required = Required::True;
        }

        self
    }

    /// Add or change description of the [`Parameter`].
    pub fn description<S: Into<String>>(mut self, description: Option<S>) -> Self {
        set_value!(self description description.map(|description| description.into()))
    }

    /// Add or change [`Parameter`]s schema.
    pub fn schema<I: Into<RefOr<Object>>>(mut self, component: Option<I>) -> Self {
        set_value!(self schema component.map(|component| component.into()))
    }
}

/// In definition of [`Parameter`].
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "debug", derive(Debug))]
pub enum ParameterIn {
    /// Declares that parameter is used as query parameter.
    Query,
    /// Declares that parameter is used as path parameter.
    #[default]
    Path,
    /// Declares that parameter is used as header value.
    Header,
    /// Declares that parameter is used as cookie value.
    Cookie,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::{response::Response, Type};

    fn get(description: &str) -> PathItem {
        PathItem::new(
            HttpMethod::Get,
            OperationBuilder::new().response("200", Response::new(description)),
        )
    }

    #[test]
    fn test_path_order() {
        let mut paths = Paths::new();
        for (path, method) in [
            ("/todo", HttpMethod::Get),
            ("/todo/{id}", HttpMethod::Delete),
            ("/todo", HttpMethod::Post),
            ("/todo/search", HttpMethod::Get),
            ("/todo/{id}", HttpMethod::Get),
            ("/todo/{id}", HttpMethod::Patch),
        ] {
            paths.merge(Paths::from_operation(path, method, Operation::new()));
        }

        let actual_value = paths
            .paths
            .iter()
            .flat_map(|(path, path_item)| {
                path_item
                    .operations
                    .keys()
                    .map(move |method| (path.as_str(), *method))
            })
            .collect::<Vec<_>>();

        assert_eq!(
            actual_value,
            vec![
                ("/todo", HttpMethod::Get),
                ("/todo", HttpMethod::Post),
                ("/todo/{id}", HttpMethod::Delete),
                ("/todo/{id}", HttpMethod::Get),
                ("/todo/{id}", HttpMethod::Patch),
                ("/todo/search", HttpMethod::Get),
            ]
        );
    }

    #[test]
    fn merge_same_path_diff_methods() {
        let mut paths = Paths::new();
        paths.merge(Paths {
            paths: IndexMap::from_iter([(String::from("/items"), get("Get items"))]),
        });
        paths.merge(Paths::from_operation(
            "/items",
            HttpMethod::Post,
            OperationBuilder::new().response("201", Response::new("Created")),
        ));

        assert_eq!(paths.paths.len(), 1);
        let item = paths.get_path_item("/items").expect("path must exist");
        assert!(item.operation(HttpMethod::Get).is_some());
        assert!(item.operation(HttpMethod::Post).is_some());
    }

    #[test]
    fn merge_same_operation_combines_responses() {
        let mut paths = Paths::from_operation(
            "/items",
            HttpMethod::Get,
            OperationBuilder::new()
                .tag("items")
                .response("200", Response::new("ok"))
                .response("default", Response::new("first")),
        );
        paths.merge(Paths::from_operation(
            "/items",
            HttpMethod::Get,
            OperationBuilder::new()
                .tag("items")
                .summary(Some("List items"))
                .response("404", Response::new("missing"))
                .response("default", Response::new("second")),
        ));

        let operation = paths
            .get_path_operation("/items", HttpMethod::Get)
            .expect("operation must exist");
        assert_eq!(operation.tags, ["items"]);
        assert_eq!(operation.summary.as_deref(), Some("List items"));
        assert_eq!(
            operation.responses.responses.keys().collect::<Vec<_>>(),
            ["200", "default", "404"]
        );
        assert_eq!(
            operation
                .responses
                .get("default")
                .map(|response| response.description.as_str()),
            Some("second")
        );
    }

    #[test]
    fn merge_replaces_parameter_with_same_name_and_location() {
        let id = |description: &str| {
            ParameterBuilder::new()
                .name("id")
                .parameter_in(ParameterIn::Path)
                .description(Some(description))
                .schema(Some(Object::with_type(Type::String)))
                .build()
        };
        let mut operation = OperationBuilder::new().parameter(id("first")).build();
        operation.merge(
            OperationBuilder::new()
                .parameter(id("second"))
                .parameter(
                    ParameterBuilder::new()
                        .name("id")
                        .parameter_in(ParameterIn::Query)
                        .build(),
                )
                .build(),
        );

        assert_eq!(operation.parameters.len(), 2);
        assert_eq!(operation.parameters[0].description.as_deref(), Some("second"));
        assert_eq!(operation.parameters[1].parameter_in, ParameterIn::Query);
    }

    #[test]
    fn merge_does_not_duplicate_security() {
        let mut operation = OperationBuilder::new()
            .security("bearerAuth", Vec::<String>::new())
            .build();
        operation.merge(
            OperationBuilder::new()
                .security("bearerAuth", Vec::<String>::new())
                .build(),
        );

        assert_eq!(operation.security.len(), 1);
    }

    #[test]
    fn path_parameter_is_always_required() {
        let parameter = ParameterBuilder::new()
            .name("id")
            .parameter_in(ParameterIn::Path)
            .required(Required::False)
            .build();

        assert_eq!(parameter.required, Required::True);
    }

    #[test]
    fn http_method_serializes_lowercase() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_value(HttpMethod::Patch)?, "patch");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
        Ok(())
    }
}
