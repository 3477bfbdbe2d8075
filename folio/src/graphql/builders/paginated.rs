// SPDX-License-Identifier: AGPL-3.0-or-later

use async_graphql::dynamic::TypeRef;

use crate::errors::SchemaError;
use crate::graphql::registry::TypeRegistry;
use crate::graphql::types::{GqlType, ObjectType, OutputField};

/// Adds a paginated list type named `name` holding documents of type `doc_type`.
pub fn build_paginated_type(
    registry: &mut TypeRegistry,
    name: &str,
    doc_type: &str,
) -> Result<(), SchemaError> {
    let int = |field: &str| OutputField::new(field, GqlType::named(TypeRef::INT));
    let boolean = |field: &str| OutputField::new(field, GqlType::named(TypeRef::BOOLEAN));

    registry.insert(ObjectType::new(
        name,
        vec![
            OutputField::new("docs", GqlType::list_of(doc_type)),
            int("totalDocs"),
            int("limit"),
            int("totalPages"),
            int("page"),
            int("pagingCounter"),
            boolean("hasPrevPage"),
            boolean("hasNextPage"),
            int("prevPage"),
            int("nextPage"),
        ],
    ))
}
