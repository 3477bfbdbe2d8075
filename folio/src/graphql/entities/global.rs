// SPDX-License-Identifier: AGPL-3.0-or-later

use log::debug;

use crate::collections::GlobalConfig;
use crate::errors::SchemaError;
use crate::graphql::builders::{
    build_mutation_input, build_object_type, build_policy_type, global_policy_operations,
    BuildContext,
};
use crate::graphql::constants::DATA_ARG;
use crate::graphql::entities::versions::register_global_versions;
use crate::graphql::entities::{draft_arg, GraphParts};
use crate::graphql::naming::format_name;
use crate::graphql::types::{GqlType, OutputField};
use crate::operations::{EntityRef, Operation};

/// Sanitized global with its resolved name.
#[derive(Debug, Clone)]
pub struct GlobalEntity {
    /// Sanitized configuration.
    pub config: GlobalConfig,

    /// Name of the document type and the read query.
    pub name: String,
}

impl GlobalEntity {
    /// Reference passed to the operation handler.
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::global(&self.config.slug)
    }
}

/// Derives all types and root operations of a global.
pub fn register_global(
    ctx: &BuildContext,
    parts: &mut GraphParts,
    global: &GlobalEntity,
) -> Result<(), SchemaError> {
    let config = &global.config;
    let name = &global.name;
    let entity = Some(global.entity_ref());

    debug!("Derive GraphQL schema of global '{}' as {}", config.slug, name);

    build_object_type(
        ctx,
        &mut parts.registry,
        name,
        &config.fields,
        vec![],
        config.drafts(),
    )?;

    let input = build_mutation_input(ctx, &mut parts.registry, name, &config.fields, false, vec![])?;

    parts.query.insert(
        OutputField::new(name, GqlType::named(name))
            .arguments(vec![draft_arg()])
            .arguments(ctx.read_locale_args())
            .operation(Operation::Find, entity.clone()),
    )?;

    let mut update = OutputField::new(&format!("update{name}"), GqlType::named(name));
    if let Some(input) = &input {
        update = update.argument(DATA_ARG, GqlType::named(input));
    }
    parts.mutation.insert(
        update
            .arguments(vec![draft_arg()])
            .arguments(ctx.write_locale_args())
            .operation(Operation::Update, entity.clone()),
    )?;

    let policy_operations = global_policy_operations(config);

    let doc_access = format!("{name}DocAccess");
    build_policy_type(&mut parts.registry, &doc_access, &policy_operations)?;
    parts.query.insert(
        OutputField::new(&format!("docAccess{name}"), GqlType::named(&doc_access))
            .operation(Operation::DocAccess, entity),
    )?;

    let access = format!("{name}Access");
    build_policy_type(&mut parts.registry, &access, &policy_operations)?;
    parts.policies.push((format_name(&config.slug), access));

    if config.versions.is_some() {
        register_global_versions(ctx, parts, global)?;
    }

    Ok(())
}
