// SPDX-License-Identifier: AGPL-3.0-or-later

use async_graphql::dynamic::TypeRef;
use log::debug;

use crate::adapter::IdType;
use crate::collections::CollectionConfig;
use crate::errors::SchemaError;
use crate::fields::{has_id_field, Field};
use crate::graphql::builders::{
    build_mutation_input, build_object_type, build_paginated_type, build_policy_type,
    build_where_input, collection_policy_operations, BuildContext,
};
use crate::graphql::constants::{AUTOSAVE_ARG, DATA_ARG, ID_ARG, ID_FIELD, PASSWORD_FIELD};
use crate::graphql::entities::auth::register_auth;
use crate::graphql::entities::versions::register_collection_versions;
use crate::graphql::entities::{draft_arg, paginated_args, GraphParts};
use crate::graphql::naming::{format_name, EntityNames};
use crate::graphql::types::{GqlType, InputField, OutputField};
use crate::operations::{EntityRef, Operation};

/// Sanitized collection with its resolved names.
#[derive(Debug, Clone)]
pub struct CollectionEntity {
    /// Sanitized configuration.
    pub config: CollectionConfig,

    /// Singular and plural names.
    pub names: EntityNames,

    /// Identifier type of documents in this collection.
    pub id_type: IdType,
}

impl CollectionEntity {
    /// Reference passed to the operation handler.
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::collection(&self.config.slug)
    }

    /// Type of the `id` argument of document operations.
    pub fn id_arg(&self) -> GqlType {
        GqlType::named_nn(self.id_type.scalar())
    }
}

/// Derives all types and root operations of a collection.
pub fn register_collection(
    ctx: &BuildContext,
    parts: &mut GraphParts,
    collection: &CollectionEntity,
) -> Result<(), SchemaError> {
    let config = &collection.config;
    let EntityNames { singular, plural } = &collection.names;
    let entity = Some(collection.entity_ref());

    debug!(
        "Derive GraphQL schema of collection '{}' as {} / {}",
        config.slug, singular, plural
    );

    // Documents without a declared id get one from the database adapter
    let custom_id = has_id_field(&config.fields);
    let base_fields = if custom_id {
        vec![]
    } else {
        vec![OutputField::new(
            ID_FIELD,
            GqlType::named(collection.id_type.scalar()),
        )]
    };

    build_object_type(
        ctx,
        &mut parts.registry,
        singular,
        &config.fields,
        base_fields,
        config.drafts(),
    )?;

    build_paginated_type(&mut parts.registry, plural, singular)?;

    let where_type = build_where_input(
        &mut parts.registry,
        singular,
        &config.fields,
        (!custom_id).then(|| collection.id_type),
    )?;

    let mut password = Vec::new();
    if config.local_strategy() {
        password.push(InputField::new(
            PASSWORD_FIELD,
            GqlType::named_nn(TypeRef::STRING),
        ));
    }

    let create_input = build_mutation_input(
        ctx,
        &mut parts.registry,
        singular,
        &config.fields,
        false,
        password,
    )?;

    let update_fields: Vec<Field> = config
        .fields
        .iter()
        .filter(|field| field.name.as_deref() != Some(ID_FIELD))
        .cloned()
        .collect();
    let update_input = build_mutation_input(
        ctx,
        &mut parts.registry,
        &format!("{singular}Update"),
        &update_fields,
        true,
        vec![],
    )?;

    // Queries
    parts.query.insert(
        OutputField::new(singular, GqlType::named(singular))
            .arguments(vec![draft_arg()])
            .argument(ID_ARG, collection.id_arg())
            .arguments(ctx.read_locale_args())
            .operation(Operation::FindById, entity.clone()),
    )?;

    parts.query.insert(
        OutputField::new(plural, GqlType::named(plural))
            .arguments(vec![draft_arg()])
            .arguments(paginated_args(&where_type))
            .arguments(ctx.read_locale_args())
            .operation(Operation::Find, entity.clone()),
    )?;

    let doc_access = format!("{singular}DocAccess");
    let policy_operations = collection_policy_operations(config);
    build_policy_type(&mut parts.registry, &doc_access, &policy_operations)?;

    parts.query.insert(
        OutputField::new(&format!("docAccess{singular}"), GqlType::named(&doc_access))
            .argument(ID_ARG, collection.id_arg())
            .operation(Operation::DocAccess, entity.clone()),
    )?;

    let access = format!("{singular}Access");
    build_policy_type(&mut parts.registry, &access, &policy_operations)?;
    parts.policies.push((format_name(&config.slug), access));

    // Mutations
    let mut create = OutputField::new(&format!("create{singular}"), GqlType::named(singular));
    if let Some(input) = &create_input {
        create = create.argument(DATA_ARG, GqlType::named_nn(input));
    }
    parts.mutation.insert(
        create
            .arguments(vec![draft_arg()])
            .arguments(ctx.write_locale_args())
            .operation(Operation::Create, entity.clone()),
    )?;

    let mut update = OutputField::new(&format!("update{singular}"), GqlType::named(singular))
        .argument(AUTOSAVE_ARG, GqlType::named(TypeRef::BOOLEAN));
    if let Some(input) = &update_input {
        update = update.argument(DATA_ARG, GqlType::named(input));
    }
    parts.mutation.insert(
        update
            .arguments(vec![draft_arg()])
            .argument(ID_ARG, collection.id_arg())
            .arguments(ctx.write_locale_args())
            .operation(Operation::Update, entity.clone()),
    )?;

    parts.mutation.insert(
        OutputField::new(&format!("delete{singular}"), GqlType::named(singular))
            .argument(ID_ARG, collection.id_arg())
            .operation(Operation::Delete, entity),
    )?;

    if config.versions.is_some() {
        register_collection_versions(ctx, parts, collection)?;
    }

    if config.auth.is_some() {
        register_auth(ctx, parts, collection)?;
    }

    Ok(())
}
