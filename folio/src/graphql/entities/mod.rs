// SPDX-License-Identifier: AGPL-3.0-or-later

//! Types and root operations derived per collection and global.
mod auth;
mod collection;
mod global;
mod versions;

use async_graphql::dynamic::TypeRef;

pub use collection::{register_collection, CollectionEntity};
pub use global::{register_global, GlobalEntity};

use crate::graphql::constants::{
    DRAFT_ARG, LIMIT_ARG, MUTATION, PAGE_ARG, QUERY, SORT_ARG, WHERE_ARG,
};
use crate::graphql::registry::TypeRegistry;
use crate::graphql::root::RootFields;
use crate::graphql::types::{Argument, GqlType};

/// Type graph and root operations collected during one schema build.
#[derive(Debug)]
pub struct GraphParts {
    /// Named types.
    pub registry: TypeRegistry,

    /// Fields of the root query.
    pub query: RootFields,

    /// Fields of the root mutation.
    pub mutation: RootFields,

    /// Field names and policy types of the root `Access` object.
    pub policies: Vec<(String, String)>,
}

impl GraphParts {
    /// Returns empty parts.
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
            query: RootFields::new(QUERY),
            mutation: RootFields::new(MUTATION),
            policies: Vec::new(),
        }
    }
}

impl Default for GraphParts {
    fn default() -> Self {
        Self::new()
    }
}

fn draft_arg() -> Argument {
    Argument::new(DRAFT_ARG, GqlType::named(TypeRef::BOOLEAN))
}

/// Arguments of paginated find operations.
fn paginated_args(where_type: &str) -> Vec<Argument> {
    vec![
        Argument::new(WHERE_ARG, GqlType::named(where_type)),
        Argument::new(LIMIT_ARG, GqlType::named(TypeRef::INT)),
        Argument::new(PAGE_ARG, GqlType::named(TypeRef::INT)),
        Argument::new(SORT_ARG, GqlType::named(TypeRef::STRING)),
    ]
}
