//! Accumulates rendered operations into [`Paths`].
//!
//! Each `register_*` operation applies the same defaulting rules before an operation is
//! rendered:
//!
//! * **Default success response.** Unless a response with a status code in `[200, 300)` is
//!   already declared, a success response is appended with the verb's default code, or `204`
//!   when the operation is flagged as an empty response.
//! * **Default error response.** The error schema is always appended under the `default`
//!   status code.
//! * **Request body** (create and update only). Attached only when the request schema
//!   references a schema. Otherwise the operation takes no body at all.
//!
//! The populated descriptor is then rendered and deep merged into the accumulated
//! [`Paths`] with [`Paths::merge`], so registering several methods of one path, or the same
//! method twice, combines the results instead of overwriting them.
use tracing::{debug, warn};

use crate::config::Config;
use crate::descriptor::{PathMethod, PathSchema};
use crate::error::Error;
use crate::openapi::{response::DEFAULT_RESPONSE, HttpMethod, Paths};
use crate::renderer::{OperationRenderer, PathMethodRenderer};
use crate::status;

/// Builds the paths section of an OpenAPI document one operation at a time.
///
/// # Examples
///
/// ```rust
/// use openapi_pathgen::{HttpMethod, PathBuilder, PathMethod, PathSchema};
///
/// let mut builder = PathBuilder::new();
/// builder
///     .register_read(
///         PathMethod::new("/items"),
///         PathSchema::with_reference("#/components/schemas/RestErrorMessage"),
///         None,
///     )
///     .expect("lenient registration never fails");
///
/// let operation = builder
///     .paths()
///     .get_path_operation("/items", HttpMethod::Get)
///     .expect("operation is registered");
/// assert!(operation.responses.get("200").is_some());
/// assert!(operation.responses.get("default").is_some());
/// ```
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct PathBuilder<R = OperationRenderer> {
    renderer: R,
    config: Config<'static>,
    paths: Paths,
}

impl PathBuilder<OperationRenderer> {
    /// Construct a new [`PathBuilder`] with default [`Config`] and [`OperationRenderer`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Construct a new [`PathBuilder`] rendering with an [`OperationRenderer`] built from
    /// given `config`.
    pub fn with_config(config: Config<'_>) -> Self {
        let renderer = OperationRenderer::from_config(&config);
        Self::with_renderer(renderer, config)
    }
}

impl Default for PathBuilder<OperationRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: PathMethodRenderer> PathBuilder<R> {
    /// Construct a new [`PathBuilder`] with custom [`PathMethodRenderer`].
    pub fn with_renderer(renderer: R, config: Config<'_>) -> Self {
        Self {
            renderer,
            config: config.into_owned(),
            paths: Paths::new(),
        }
    }

    /// Paths accumulated so far.
    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// Consume the builder returning accumulated paths.
    pub fn into_paths(self) -> Paths {
        self.paths
    }

    /// Configuration in use.
    pub fn config(&self) -> &Config<'static> {
        &self.config
    }

    /// Register a _GET_ operation. Default success code is `200`.
    ///
    /// Returns the populated descriptor as it was handed to the renderer.
    pub fn register_read(
        &mut self,
        path_method: PathMethod,
        error_schema: PathSchema,
        response_schema: Option<PathSchema>,
    ) -> Result<PathMethod, Error> {
        let path_method =
            self.define_default_successful_response(path_method, response_schema, status::OK);
        let path_method = self.attach_default_error(path_method, error_schema);

        self.add_path(HttpMethod::Get, path_method)
    }

    /// Register a _POST_ operation. Default success code is `201`.
    ///
    /// Returns the populated descriptor as it was handed to the renderer.
    pub fn register_create(
        &mut self,
        path_method: PathMethod,
        request_schema: PathSchema,
        error_schema: PathSchema,
        response_schema: Option<PathSchema>,
    ) -> Result<PathMethod, Error> {
        let path_method =
            self.define_default_successful_response(path_method, response_schema, status::CREATED);
        let path_method = self.attach_request_body(path_method, request_schema);
        let path_method = self.attach_default_error(path_method, error_schema);

        self.add_path(HttpMethod::Post, path_method)
    }

    /// Register a _PATCH_ operation. Default success code is `200`.
    ///
    /// Returns the populated descriptor as it was handed to the renderer.
    pub fn register_update(
        &mut self,
        path_method: PathMethod,
        request_schema: PathSchema,
        error_schema: PathSchema,
        response_schema: Option<PathSchema>,
    ) -> Result<PathMethod, Error> {
        let path_method =
            self.define_default_successful_response(path_method, response_schema, status::OK);
        let path_method = self.attach_request_body(path_method, request_schema);
        let path_method = self.attach_default_error(path_method, error_schema);

        self.add_path(HttpMethod::Patch, path_method)
    }

    /// Register a _DELETE_ operation. Default success code is `204`.
    ///
    /// Returns the populated descriptor as it was handed to the renderer.
    pub fn register_delete(
        &mut self,
        path_method: PathMethod,
        error_schema: PathSchema,
    ) -> Result<PathMethod, Error> {
        let path_method =
            self.define_default_successful_response(path_method, None, status::NO_CONTENT);
        let path_method = self.attach_default_error(path_method, error_schema);

        self.add_path(HttpMethod::Delete, path_method)
    }

    fn define_default_successful_response(
        &self,
        path_method: PathMethod,
        response_schema: Option<PathSchema>,
        default_code: &str,
    ) -> PathMethod {
        if path_method.is_success_response_declared() {
            return path_method;
        }

        let code = if path_method.is_empty_response {
            status::NO_CONTENT
        } else {
            default_code
        };

        let mut response_schema = response_schema.unwrap_or_default();
        response_schema.code = Some(code.to_string());
        response_schema.description = Some(self.config.success_description.to_string());

        path_method.with_response_schema(response_schema)
    }

    fn attach_default_error(
        &self,
        path_method: PathMethod,
        mut error_schema: PathSchema,
    ) -> PathMethod {
        error_schema.code = Some(DEFAULT_RESPONSE.to_string());
        error_schema.description = Some(self.config.error_description.to_string());

        path_method.with_response_schema(error_schema)
    }

    fn attach_request_body(
        &self,
        mut path_method: PathMethod,
        mut request_schema: PathSchema,
    ) -> PathMethod {
        if request_schema.schema_reference().is_some() {
            request_schema.description = Some(self.config.request_description.to_string());
            path_method.request_schema = Some(request_schema);
        } else {
            debug!(path = %path_method.path, "request schema has no reference, operation takes no body");
            path_method.request_schema = None;
        }

        path_method
    }

    fn add_path(
        &mut self,
        http_method: HttpMethod,
        mut path_method: PathMethod,
    ) -> Result<PathMethod, Error> {
        path_method.method = Some(http_method);
        self.check(http_method, &path_method)?;

        debug!(
            path = %path_method.path,
            method = %http_method,
            responses = path_method.response_schemas.len(),
            "registering operation"
        );
        let rendered = self.renderer.render(&path_method);
        self.paths.merge(rendered);

        Ok(path_method)
    }

    /// Reject malformed input in strict mode, only warn about it otherwise.
    fn check(&self, http_method: HttpMethod, path_method: &PathMethod) -> Result<(), Error> {
        let path = &path_method.path;
        if !path.starts_with('/') {
            if self.config.strict {
                return Err(Error::InvalidPath { path: path.clone() });
            }
            warn!(path = %path, "path does not start with `/`");
        }

        for code in path_method.response_schemas.iter().map(PathSchema::code) {
            if status::is_valid(code) {
                continue;
            }
            if self.config.strict {
                return Err(Error::InvalidStatusCode {
                    path: path.clone(),
                    method: http_method.as_str(),
                    code: code.to_string(),
                });
            }
            warn!(path = %path, method = %http_method, code, "status code is not a valid response key");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::descriptor::{PathMethodBuilder, PathSchemaBuilder};
    use crate::openapi::Operation;

    const ERROR_REFERENCE: &str = "#/components/schemas/RestErrorMessage";

    fn error_schema() -> PathSchema {
        PathSchema::with_reference(ERROR_REFERENCE)
    }

    fn codes(path_method: &PathMethod) -> Vec<(&str, &str)> {
        path_method
            .response_schemas
            .iter()
            .map(|response| {
                (
                    response.code(),
                    response.description.as_deref().unwrap_or_default(),
                )
            })
            .collect()
    }

    fn operation<'p>(builder: &'p PathBuilder, path: &str, method: HttpMethod) -> &'p Operation {
        builder
            .paths()
            .get_path_operation(path, method)
            .expect("operation must be registered")
    }

    #[test]
    fn register_read_adds_ok_and_default_error() -> Result<(), Error> {
        let mut builder = PathBuilder::new();
        let path_method = builder.register_read(PathMethod::new("/items"), PathSchema::new(), None)?;

        assert_eq!(path_method.method, Some(HttpMethod::Get));
        assert_eq!(
            codes(&path_method),
            [
                ("200", "Expected response to a valid request."),
                ("default", "Expected response to a bad request."),
            ]
        );
        Ok(())
    }

    #[test]
    fn register_create_adds_created() -> Result<(), Error> {
        let mut builder = PathBuilder::new();
        let path_method = builder.register_create(
            PathMethod::new("/items"),
            PathSchema::with_reference("ItemRequest"),
            error_schema(),
            Some(PathSchema::with_reference("ItemResponse")),
        )?;

        assert_eq!(path_method.method, Some(HttpMethod::Post));
        assert_eq!(path_method.response_schemas[0].code(), "201");
        assert_eq!(
            path_method.response_schemas[0].schema_reference(),
            Some("ItemResponse")
        );
        Ok(())
    }

    #[test]
    fn register_update_adds_ok() -> Result<(), Error> {
        let mut builder = PathBuilder::new();
        let path_method = builder.register_update(
            PathMethod::new("/items/{id}"),
            PathSchema::with_reference("ItemRequest"),
            error_schema(),
            None,
        )?;

        assert_eq!(path_method.method, Some(HttpMethod::Patch));
        assert_eq!(path_method.response_schemas[0].code(), "200");
        Ok(())
    }

    #[test]
    fn register_delete_adds_no_content() -> Result<(), Error> {
        let mut builder = PathBuilder::new();
        let path_method = builder.register_delete(PathMethod::new("/items/{id}"), error_schema())?;

        assert_eq!(path_method.method, Some(HttpMethod::Delete));
        assert_eq!(
            codes(&path_method),
            [
                ("204", "Expected response to a valid request."),
                ("default", "Expected response to a bad request."),
            ]
        );
        Ok(())
    }

    #[test]
    fn empty_response_forces_no_content_for_every_verb() -> Result<(), Error> {
        let empty = || {
            PathMethodBuilder::new()
                .path("/items")
                .is_empty_response(true)
                .build()
        };
        let mut builder = PathBuilder::new();

        let read = builder.register_read(empty(), error_schema(), None)?;
        let create = builder.register_create(empty(), PathSchema::new(), error_schema(), None)?;
        let update = builder.register_update(empty(), PathSchema::new(), error_schema(), None)?;
        let delete = builder.register_delete(empty(), error_schema())?;

        assert!(create.request_schema.is_none());
        assert!(update.request_schema.is_none());
        for path_method in [read, create, update, delete] {
            assert_eq!(path_method.response_schemas[0].code(), "204");
        }
        assert!(operation(&builder, "/items", HttpMethod::Post)
            .request_body
            .is_none());
        assert!(operation(&builder, "/items", HttpMethod::Patch)
            .request_body
            .is_none());
        Ok(())
    }

    #[test]
    fn declared_success_response_wins() -> Result<(), Error> {
        let path_method = PathMethodBuilder::new()
            .path("/items")
            .response_schema(
                PathSchemaBuilder::new()
                    .code(Some("202"))
                    .description(Some("Accepted"))
                    .build(),
            )
            .build();
        let mut builder = PathBuilder::new();

        let path_method = builder.register_create(
            path_method,
            PathSchema::new(),
            error_schema(),
            Some(PathSchema::with_reference("Ignored")),
        )?;

        assert_eq!(
            codes(&path_method),
            [
                ("202", "Accepted"),
                ("default", "Expected response to a bad request."),
            ]
        );
        Ok(())
    }

    #[test]
    fn non_numeric_code_does_not_suppress_default_success() -> Result<(), Error> {
        let path_method = PathMethodBuilder::new()
            .path("/items")
            .response_schema(PathSchemaBuilder::new().code(Some("2XX")).build())
            .build();
        let mut builder = PathBuilder::new();

        let path_method = builder.register_read(path_method, error_schema(), None)?;

        assert_eq!(
            path_method
                .response_schemas
                .iter()
                .map(PathSchema::code)
                .collect::<Vec<_>>(),
            ["2XX", "200", "default"]
        );
        Ok(())
    }

    #[test]
    fn error_response_is_appended_unconditionally() -> Result<(), Error> {
        let path_method = PathMethodBuilder::new()
            .path("/items")
            .response_schema(
                PathSchemaBuilder::new()
                    .code(Some("default"))
                    .description(Some("Caller error"))
                    .build(),
            )
            .build();
        let mut builder = PathBuilder::new();

        let path_method = builder.register_read(path_method, error_schema(), None)?;

        let defaults = path_method
            .response_schemas
            .iter()
            .filter(|response| response.code() == DEFAULT_RESPONSE)
            .count();
        assert_eq!(defaults, 2);
        assert_eq!(
            operation(&builder, "/items", HttpMethod::Get)
                .responses
                .get(DEFAULT_RESPONSE)
                .map(|response| response.description.as_str()),
            Some("Expected response to a bad request.")
        );
        Ok(())
    }

    #[test]
    fn request_schema_without_reference_is_dropped() -> Result<(), Error> {
        let mut path_method = PathMethod::new("/items");
        path_method.request_schema = Some(PathSchema::with_reference("Stale"));
        let mut builder = PathBuilder::new();

        let path_method = builder.register_create(
            path_method,
            PathSchema::with_reference(""),
            error_schema(),
            None,
        )?;

        assert!(path_method.request_schema.is_none());
        assert!(operation(&builder, "/items", HttpMethod::Post)
            .request_body
            .is_none());
        Ok(())
    }

    #[test]
    fn request_schema_with_reference_gets_description() -> Result<(), Error> {
        let mut builder = PathBuilder::new();
        let request = PathSchemaBuilder::new()
            .description(Some("Caller text"))
            .schema_reference(Some("ItemRequest"))
            .build();

        let path_method = builder.register_update(
            PathMethod::new("/items/{id}"),
            request,
            error_schema(),
            None,
        )?;

        assert_eq!(
            path_method
                .request_schema
                .as_ref()
                .and_then(|request| request.description.as_deref()),
            Some("Expected request body.")
        );
        Ok(())
    }

    #[test]
    fn same_path_methods_nest_under_one_key() -> Result<(), Error> {
        let mut builder = PathBuilder::new();
        builder.register_read(PathMethod::new("/items"), error_schema(), None)?;
        builder.register_create(
            PathMethod::new("/items"),
            PathSchema::with_reference("ItemRequest"),
            error_schema(),
            None,
        )?;

        let paths = builder.into_paths();
        assert_eq!(paths.paths.len(), 1);
        let methods = paths
            .get_path_item("/items")
            .map(|item| item.operations.keys().copied().collect::<Vec<_>>());
        assert_eq!(methods, Some(vec![HttpMethod::Get, HttpMethod::Post]));
        Ok(())
    }

    #[test]
    fn repeated_registration_merges_responses() -> Result<(), Error> {
        let mut builder = PathBuilder::new();
        builder.register_read(PathMethod::new("/items"), error_schema(), None)?;
        builder.register_read(
            PathMethodBuilder::new()
                .path("/items")
                .response_schema(
                    PathSchemaBuilder::new()
                        .code(Some("206"))
                        .description(Some("Partial"))
                        .build(),
                )
                .build(),
            error_schema(),
            None,
        )?;

        let responses = &operation(&builder, "/items", HttpMethod::Get).responses;
        assert_eq!(
            responses.responses.keys().collect::<Vec<_>>(),
            ["200", "default", "206"]
        );
        Ok(())
    }

    #[test]
    fn repeated_registration_keeps_response_content() -> Result<(), Error> {
        let mut builder = PathBuilder::new();
        builder.register_read(
            PathMethod::new("/items"),
            error_schema(),
            Some(PathSchema::with_reference("#/components/schemas/ItemCollection")),
        )?;
        builder.register_read(
            PathMethod::new("/items"),
            PathSchema::new(),
            None,
        )?;

        let value = serde_json::to_value(builder.paths())?;
        assert_eq!(
            value.pointer("/~1items/get/responses"),
            Some(&json!({
                "200": {
                    "description": "Expected response to a valid request.",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/ItemCollection" }
                        }
                    }
                },
                "default": {
                    "description": "Expected response to a bad request.",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": ERROR_REFERENCE }
                        }
                    }
                }
            }))
        );
        Ok(())
    }

    #[test]
    fn strict_mode_rejects_invalid_status_code() {
        let mut builder = PathBuilder::with_config(Config::new().strict(true));
        let path_method = PathMethodBuilder::new()
            .path("/items")
            .response_schema(PathSchemaBuilder::new().code(Some("ok")).build())
            .build();

        let error = builder
            .register_read(path_method, error_schema(), None)
            .expect_err("invalid code must be rejected");

        assert!(matches!(
            error,
            Error::InvalidStatusCode { ref code, method: "get", .. } if code == "ok"
        ));
        assert!(builder.paths().is_empty());
    }

    #[test]
    fn strict_mode_rejects_relative_path() {
        let mut builder = PathBuilder::with_config(Config::new().strict(true));

        let error = builder
            .register_delete(PathMethod::new("items"), error_schema())
            .expect_err("relative path must be rejected");

        assert_eq!(
            error.to_string(),
            "invalid path `items`, paths must start with `/`"
        );
    }

    #[test]
    fn custom_renderer_output_is_merged() -> Result<(), Error> {
        let renderer = |path_method: &PathMethod| {
            let method = path_method.method.unwrap_or(HttpMethod::Get);
            Paths::from_operation(
                "/rendered",
                method,
                crate::openapi::OperationBuilder::new().summary(Some(path_method.path.as_str())),
            )
        };
        let mut builder = PathBuilder::with_renderer(renderer, Config::default());

        builder.register_delete(PathMethod::new("/items/{id}"), error_schema())?;

        let value = serde_json::to_value(builder.paths())?;
        assert_eq!(
            value,
            json!({"/rendered": {"delete": {"summary": "/items/{id}", "responses": {}}}})
        );
        Ok(())
    }
}
