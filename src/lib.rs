#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(doc_cfg, feature(doc_cfg))]
//! Build the `paths` section of an OpenAPI document from per-endpoint descriptors.
//!
//! A code generator typically knows, for every endpoint, its path, its HTTP verb and which
//! schemas describe the request and response bodies. [`PathBuilder`] turns that knowledge into
//! OpenAPI operations: it fills in a default success response and a default error response,
//! attaches the request body where one exists and merges the result into one [`Paths`]
//! object keyed by path and then by method.
//!
//! # Features
//!
//! * **`yaml`** Enables [`Paths::to_yaml`][openapi::Paths::to_yaml] with `serde_norway`.
//! * **`debug`** Derives [`Debug`] for all public types.
//!
//! # Examples
//!
//! _**Register a read and a create operation for the same path.**_
//! ```rust
//! use openapi_pathgen::{Config, PathBuilder, PathMethod, PathSchema};
//!
//! # fn main() -> Result<(), openapi_pathgen::Error> {
//! let mut builder = PathBuilder::with_config(Config::new().content_type("application/vnd.api+json"));
//! let error = || PathSchema::with_reference("#/components/schemas/RestErrorMessage");
//!
//! builder.register_read(PathMethod::new("/items"), error(), None)?;
//! builder.register_create(
//!     PathMethod::new("/items"),
//!     PathSchema::with_reference("#/components/schemas/ItemRequest"),
//!     error(),
//!     Some(PathSchema::with_reference("#/components/schemas/ItemResponse")),
//! )?;
//!
//! let json = builder.paths().to_pretty_json()?;
//! assert!(json.contains("\"201\""));
//! # Ok(())
//! # }
//! ```
//!
//! Descriptors are consumed by registration and the populated copy is returned, so the same
//! descriptor can not leak state into a second registration.

pub mod builder;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod openapi;
pub mod renderer;
pub mod status;

pub use self::{
    builder::PathBuilder,
    config::Config,
    descriptor::{
        PathMethod, PathMethodBuilder, PathParameter, PathParameterBuilder, PathSchema,
        PathSchemaBuilder,
    },
    error::Error,
    openapi::{HttpMethod, Paths},
    renderer::{OperationRenderer, PathMethodRenderer},
};
