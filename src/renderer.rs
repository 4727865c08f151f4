//! Rendering of a single [`PathMethod`] into its [`Paths`] fragment.
//!
//! [`PathBuilder`][crate::PathBuilder] never shapes operations itself. It hands every
//! populated descriptor to a [`PathMethodRenderer`] and merges whatever comes back.
use tracing::{trace, warn};

use crate::config::Config;
use crate::descriptor::{PathMethod, PathParameter, PathSchema};
use crate::openapi::{
    path::{OperationBuilder, ParameterBuilder},
    request_body::RequestBodyBuilder,
    response::ResponseBuilder,
    Content, Deprecated, Object, Operation, Parameter, ParameterIn, Paths, Ref, RequestBody,
    Required, Response,
};

/// Transforms one [`PathMethod`] into [`Paths`] keyed first by path and then by method.
///
/// Any `Fn(&PathMethod) -> Paths` closure is a renderer too.
pub trait PathMethodRenderer {
    /// Render given [`PathMethod`].
    fn render(&self, path_method: &PathMethod) -> Paths;
}

impl<F> PathMethodRenderer for F
where
    F: Fn(&PathMethod) -> Paths,
{
    fn render(&self, path_method: &PathMethod) -> Paths {
        self(path_method)
    }
}

/// Default [`PathMethodRenderer`] producing OpenAPI operations.
///
/// * `resource` becomes the only tag, `is_protected` adds a security requirement for the
///   configured scheme.
/// * Explicit parameters are rendered first, then every `{name}` segment of the path that is
///   not declared yet is added as a required string path parameter.
/// * Request and response schemas are rendered under the configured content type, responses
///   without a schema reference carry no content at all.
#[derive(Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct OperationRenderer {
    content_type: String,
    security_scheme: String,
}

impl Default for OperationRenderer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl OperationRenderer {
    /// Construct a new [`OperationRenderer`] with default [`Config`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a new [`OperationRenderer`] using content type and security scheme of `config`.
    pub fn from_config(config: &Config<'_>) -> Self {
        Self {
            content_type: config.content_type.to_string(),
            security_scheme: config.security_scheme.to_string(),
        }
    }

    fn render_operation(&self, path_method: &PathMethod) -> Operation {
        let mut operation = OperationBuilder::new()
            .tags(path_method.resource.iter().cloned())
            .summary(path_method.summary.as_deref())
            .operation_id(path_method.operation_id.as_deref())
            .request_body(
                path_method
                    .request_schema
                    .as_ref()
                    .map(|request| self.render_request_body(request)),
            )
            .deprecated(path_method.deprecated.then_some(Deprecated::True));

        if path_method.is_protected {
            operation = operation.security(&self.security_scheme, std::iter::empty::<String>());
        }

        for parameter in render_parameters(path_method) {
            operation = operation.parameter(parameter);
        }

        for response in &path_method.response_schemas {
            let Some(code) = response.code.as_deref() else {
                warn!(path = %path_method.path, "skipping response schema without status code");
                continue;
            };
            operation = operation.response(code, self.render_response(response));
        }

        operation.build()
    }

    fn render_request_body(&self, request: &PathSchema) -> RequestBody {
        RequestBodyBuilder::new()
            .description(request.description.as_deref())
            .required(Some(Required::True))
            .content(
                &self.content_type,
                Content::new(request.schema_reference().map(Ref::new)),
            )
            .build()
    }

    fn render_response(&self, response: &PathSchema) -> Response {
        let builder = ResponseBuilder::new().description(
            response
                .description
                .as_deref()
                .unwrap_or_default(),
        );

        match response.schema_reference() {
            Some(reference) => builder
                .content(
                    &self.content_type,
                    Content::new(Some(Ref::new(reference))),
                )
                .build(),
            None => builder.build(),
        }
    }
}

impl PathMethodRenderer for OperationRenderer {
    fn render(&self, path_method: &PathMethod) -> Paths {
        let Some(http_method) = path_method.method else {
            warn!(path = %path_method.path, "path method has no HTTP method, nothing to render");
            return Paths::new();
        };

        trace!(path = %path_method.path, method = %http_method, "rendering operation");
        Paths::from_operation(
            path_method.path.as_str(),
            http_method,
            self.render_operation(path_method),
        )
    }
}

fn render_parameter(parameter: &PathParameter) -> Parameter {
    ParameterBuilder::new()
        .name(parameter.name.as_str())
        .parameter_in(parameter.parameter_in)
        .required(Required::from(parameter.required))
        .description(parameter.description.as_deref())
        .schema(Some(Object::with_type(parameter.schema_type)))
        .build()
}

fn render_parameters(path_method: &PathMethod) -> Vec<Parameter> {
    let mut parameters = path_method
        .parameters
        .iter()
        .map(render_parameter)
        .collect::<Vec<_>>();

    for name in template_parameter_names(&path_method.path) {
        let declared = parameters.iter().any(|parameter| {
            parameter.name == name && parameter.parameter_in == ParameterIn::Path
        });
        if !declared {
            parameters.push(render_parameter(&PathParameter::new(name, ParameterIn::Path)));
        }
    }

    parameters
}

/// Names of the `{name}` template segments of `path` in order of appearance.
pub fn template_parameter_names(path: &str) -> Vec<&str> {
    path.split('{')
        .skip(1)
        .filter_map(|segment| segment.split_once('}'))
        .map(|(name, _)| name.trim())
        .filter(|name| !name.is_empty())
        .collect()
}
