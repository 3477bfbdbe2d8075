// SPDX-License-Identifier: AGPL-3.0-or-later

//! # folio
//!
//! Derives a GraphQL schema from a declarative content model. Every collection and global of a
//! [`Configuration`] is turned into output, input and filter types, root query and mutation
//! fields and resolver bindings which dispatch to a single [`OperationHandler`].
//!
//! ```text
//! Configuration ─▶ SchemaBuilder ─▶ TypeGraph ─▶ async_graphql::dynamic::Schema ─▶ HTTP
//! ```
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

pub mod adapter;
pub mod collections;
mod config;
mod errors;
pub mod fields;
pub mod graphql;
mod http;
pub mod operations;

#[cfg(test)]
mod test_utils;

pub use crate::adapter::{DatabaseAdapter, IdType};
pub use crate::config::{Configuration, GraphQLConfig, LocalizationConfig};
pub use crate::errors::{OperationError, SchemaError};
pub use crate::graphql::{
    build_schema, CustomOperations, GraphQLSchemaManager, SchemaBuilder, TypeGraph,
};
pub use crate::http::{build_server, http_service, HttpServiceContext};
pub use crate::operations::{
    EntityKind, EntityRef, Operation, OperationHandler, OperationRequest, RequestAuth,
    SharedOperationHandler,
};
