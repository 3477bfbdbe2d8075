// SPDX-License-Identifier: AGPL-3.0-or-later

//! Input object types of create and update mutations.
use async_graphql::dynamic::TypeRef;

use crate::errors::SchemaError;
use crate::fields::{flatten_fields, Field, FieldKind, RelationTo};
use crate::graphql::builders::context::BuildContext;
use crate::graphql::builders::enums::build_enum;
use crate::graphql::builders::with_row_id;
use crate::graphql::constants::{ID_FIELD, JSON_SCALAR, RELATION_TO_FIELD, VALUE_FIELD};
use crate::graphql::naming::combine_parent_name;
use crate::graphql::registry::TypeRegistry;
use crate::graphql::types::{GqlType, InputField, InputObjectType};

/// Name of the mutation input type derived from a base name, for example `mutationPostInput`.
pub fn mutation_input_name(base: &str) -> String {
    format!("mutation{base}Input")
}

/// Adds the input type of the `data` argument of a create or update mutation.
///
/// Partial inputs leave every field optional and omit the top-level `id`. `extra` fields are
/// appended after the derived ones. Returns `None` without registering anything if the input
/// would not have any fields.
pub fn build_mutation_input(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    base: &str,
    fields: &[Field],
    partial: bool,
    extra: Vec<InputField>,
) -> Result<Option<String>, SchemaError> {
    let name = mutation_input_name(base);

    let mut input_fields: Vec<InputField> = build_input_fields(ctx, registry, fields, base, partial)?
        .into_iter()
        .filter(|field| !(partial && field.name == ID_FIELD))
        .collect();

    for field in extra {
        if !input_fields.iter().any(|existing| existing.name == field.name) {
            input_fields.push(field);
        }
    }

    if input_fields.is_empty() {
        return Ok(None);
    }

    registry.insert(InputObjectType {
        name: name.clone(),
        fields: input_fields,
    })?;

    Ok(Some(name))
}

fn build_input_fields(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    fields: &[Field],
    parent: &str,
    partial: bool,
) -> Result<Vec<InputField>, SchemaError> {
    let mut input_fields = Vec::new();

    for field in flatten_fields(fields, parent)? {
        if let Some(ty) = input_type(ctx, registry, &field, parent, partial)? {
            let required = ctx.input_required(&field, partial);
            input_fields.push(InputField::new(field.name(), ty.required_if(required)));
        }
    }

    Ok(input_fields)
}

fn input_type(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    field: &Field,
    parent: &str,
    partial: bool,
) -> Result<Option<GqlType>, SchemaError> {
    let ty = match &field.kind {
        FieldKind::Text
        | FieldKind::Email
        | FieldKind::Textarea
        | FieldKind::Code
        | FieldKind::Date
        | FieldKind::Radio { .. } => GqlType::named(TypeRef::STRING),
        FieldKind::Select { has_many, .. } => scalar(TypeRef::STRING, *has_many),
        FieldKind::Number { has_many } => scalar(TypeRef::FLOAT, *has_many),
        FieldKind::Checkbox => GqlType::named(TypeRef::BOOLEAN),
        FieldKind::Point => GqlType::list_of_nullable(TypeRef::FLOAT),
        FieldKind::Json | FieldKind::RichText => GqlType::named(JSON_SCALAR),
        FieldKind::Blocks { .. } => GqlType::list_of_nullable(JSON_SCALAR),
        FieldKind::Relationship {
            relation_to,
            has_many,
        } => scalar(
            &relation_input(ctx, registry, field, parent, relation_to)?,
            *has_many,
        ),
        FieldKind::Upload { relation_to } => GqlType::named(&relation_input(
            ctx,
            registry,
            field,
            parent,
            &RelationTo::One(relation_to.clone()),
        )?),
        FieldKind::Group { fields } => {
            match nested_input(ctx, registry, field, parent, fields, partial)? {
                Some(name) => GqlType::named(&name),
                None => return Ok(None),
            }
        }
        FieldKind::Array { fields } => {
            match nested_input(ctx, registry, field, parent, &with_row_id(fields), partial)? {
                Some(name) => GqlType::list_of(&name),
                None => return Ok(None),
            }
        }
        FieldKind::Row { .. } | FieldKind::Collapsible { .. } | FieldKind::Tabs { .. } => {
            return Ok(None)
        }
    };

    Ok(Some(ty))
}

fn scalar(name: &str, has_many: bool) -> GqlType {
    if has_many {
        GqlType::list_of(name)
    } else {
        GqlType::named(name)
    }
}

fn nested_input(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    field: &Field,
    parent: &str,
    fields: &[Field],
    partial: bool,
) -> Result<Option<String>, SchemaError> {
    let base = combine_parent_name(parent, field.name());
    let name = mutation_input_name(&base);

    let input_fields = build_input_fields(ctx, registry, fields, &base, partial)?;
    if input_fields.is_empty() {
        return Ok(None);
    }

    let name = registry.get_or_build(&name, |_| {
        Ok(InputObjectType {
            name: name.clone(),
            fields: input_fields,
        }
        .into())
    })?;

    Ok(Some(name))
}

/// Type name of a relationship value in inputs: the identifier scalar of the target, or an
/// input object naming the target for relationships to several collections.
fn relation_input(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    field: &Field,
    parent: &str,
    relation_to: &RelationTo,
) -> Result<String, SchemaError> {
    let unknown = |slug: &str| SchemaError::UnknownRelation {
        field: field.name().to_string(),
        target: slug.to_string(),
    };

    match relation_to {
        RelationTo::One(slug) => {
            let target = ctx.target(slug).ok_or_else(|| unknown(slug))?;
            Ok(target.id_type.scalar().to_string())
        }
        RelationTo::Many(slugs) => {
            if let Some(slug) = slugs.iter().find(|slug| ctx.target(slug).is_none()) {
                return Err(unknown(slug));
            }

            let composite = combine_parent_name(parent, field.name());
            let name = format!("{composite}RelationshipInput");

            registry.get_or_build(&name, |registry| {
                let relation_to = build_enum(
                    registry,
                    &format!("{name}{}", to_upper_first(RELATION_TO_FIELD)),
                    slugs.iter().map(String::as_str),
                )?;

                Ok(InputObjectType {
                    name: name.clone(),
                    fields: vec![
                        InputField::new(RELATION_TO_FIELD, GqlType::named(&relation_to.name)),
                        InputField::new(VALUE_FIELD, GqlType::named(JSON_SCALAR)),
                    ],
                }
                .into())
            })
        }
    }
}

fn to_upper_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
