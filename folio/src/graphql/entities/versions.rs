// SPDX-License-Identifier: AGPL-3.0-or-later

//! Version history of collections and globals.
use async_graphql::dynamic::TypeRef;

use crate::collections::versions::{
    build_version_collection_fields, build_version_global_fields, with_version_metadata,
};
use crate::errors::SchemaError;
use crate::fields::Field;
use crate::graphql::builders::{
    build_object_type, build_paginated_type, build_where_input, BuildContext,
};
use crate::graphql::constants::ID_ARG;
use crate::graphql::entities::collection::CollectionEntity;
use crate::graphql::entities::global::GlobalEntity;
use crate::graphql::entities::{paginated_args, GraphParts};
use crate::graphql::types::{GqlType, OutputField};
use crate::operations::{EntityRef, Operation};

/// Names of the types and operations of one version history.
struct VersionNames<'a> {
    /// Name of the versioned document type.
    singular: &'a str,

    /// Name of the paginated find query and its result type, without prefix.
    plural: &'a str,
}

/// Adds `version<S>`, `versions<P>` and `restoreVersion<S>` of a collection.
pub fn register_collection_versions(
    ctx: &BuildContext,
    parts: &mut GraphParts,
    collection: &CollectionEntity,
) -> Result<(), SchemaError> {
    let fields = with_version_metadata(build_version_collection_fields(&collection.config));

    register_versions(
        ctx,
        parts,
        VersionNames {
            singular: &collection.names.singular,
            plural: &collection.names.plural,
        },
        &fields,
        collection.config.drafts(),
        collection.entity_ref(),
    )
}

/// Adds `version<S>`, `versions<S>` and `restoreVersion<S>` of a global.
pub fn register_global_versions(
    ctx: &BuildContext,
    parts: &mut GraphParts,
    global: &GlobalEntity,
) -> Result<(), SchemaError> {
    let fields = with_version_metadata(build_version_global_fields(&global.config));

    register_versions(
        ctx,
        parts,
        VersionNames {
            singular: &global.name,
            plural: &global.name,
        },
        &fields,
        global.config.drafts(),
        global.entity_ref(),
    )
}

fn register_versions(
    ctx: &BuildContext,
    parts: &mut GraphParts,
    names: VersionNames,
    fields: &[Field],
    drafts: bool,
    entity: EntityRef,
) -> Result<(), SchemaError> {
    let version_type = format!("{}Version", names.singular);
    let paginated_type = format!("versions{}", names.plural);
    let entity = Some(entity);

    build_object_type(ctx, &mut parts.registry, &version_type, fields, vec![], drafts)?;
    build_paginated_type(&mut parts.registry, &paginated_type, &version_type)?;

    let where_type = build_where_input(
        &mut parts.registry,
        &format!("versions{}", names.singular),
        fields,
        None,
    )?;

    parts.query.insert(
        OutputField::new(
            &format!("version{}", names.singular),
            GqlType::named(&version_type),
        )
        .argument(ID_ARG, GqlType::named(TypeRef::STRING))
        .arguments(ctx.read_locale_args())
        .operation(Operation::FindVersionById, entity.clone()),
    )?;

    parts.query.insert(
        OutputField::new(&paginated_type, GqlType::named(&paginated_type))
            .arguments(paginated_args(&where_type))
            .arguments(ctx.read_locale_args())
            .operation(Operation::FindVersions, entity.clone()),
    )?;

    parts.mutation.insert(
        OutputField::new(
            &format!("restoreVersion{}", names.singular),
            GqlType::named(names.singular),
        )
        .argument(ID_ARG, GqlType::named(TypeRef::STRING))
        .operation(Operation::RestoreVersion, entity),
    )?;

    Ok(())
}
