// SPDX-License-Identifier: AGPL-3.0-or-later

//! GraphQL schema derived from collections and globals.
mod builders;
pub mod complexity;
pub mod constants;
mod entities;
pub mod input_values;
pub mod naming;
pub mod registry;
mod resolvers;
pub mod root;
pub mod scalars;
mod schema;
pub mod types;

pub use schema::{build_schema, CustomOperations, GraphQLSchemaManager, SchemaBuilder, TypeGraph};
