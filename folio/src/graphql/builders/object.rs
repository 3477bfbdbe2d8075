// SPDX-License-Identifier: AGPL-3.0-or-later

//! Output object types derived from field trees.
use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dynamic::TypeRef;

use crate::errors::SchemaError;
use crate::fields::{flatten_fields, Block, Field, FieldKind, RelationTo, SelectOption};
use crate::graphql::builders::context::BuildContext;
use crate::graphql::builders::enums::build_enum;
use crate::graphql::builders::{with_block_fields, with_row_id};
use crate::graphql::constants::{
    BLOCK_SUFFIX, BLOCK_TYPE_FIELD, DATE_TIME_SCALAR, DEFAULT_COMPLEXITY, JSON_SCALAR,
    RELATION_COMPLEXITY, RELATION_TO_FIELD, VALUE_FIELD,
};
use crate::graphql::naming::{combine_parent_name, to_words};
use crate::graphql::registry::TypeRegistry;
use crate::graphql::types::{
    Discriminator, GqlType, ObjectType, OutputField, Resolution, Shape, UnionShape, UnionType,
};

/// Adds the top-level object type of a collection, global or version to the registry.
///
/// `base_fields` are placed before the fields derived from the field tree. The name must not be
/// taken by any other type.
pub fn build_object_type(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    name: &str,
    fields: &[Field],
    base_fields: Vec<OutputField>,
    force_nullable: bool,
) -> Result<(), SchemaError> {
    let mut object_fields = base_fields;
    object_fields.extend(build_output_fields(
        ctx,
        registry,
        fields,
        name,
        force_nullable,
    )?);

    registry.insert(ObjectType::new(name, object_fields))
}

/// Derives output fields of one nesting level. `parent` is the name of the owning type.
pub fn build_output_fields(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    fields: &[Field],
    parent: &str,
    force_nullable: bool,
) -> Result<Vec<OutputField>, SchemaError> {
    let mut output_fields = Vec::new();
    for field in flatten_fields(fields, parent)? {
        if let Some(output) = output_field(ctx, registry, &field, parent, force_nullable)? {
            output_fields.push(output);
        }
    }

    Ok(output_fields)
}

fn output_field(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    field: &Field,
    parent: &str,
    force_nullable: bool,
) -> Result<Option<OutputField>, SchemaError> {
    let name = field.name();

    let (ty, shape) = match &field.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Textarea | FieldKind::Code => {
            (GqlType::named(TypeRef::STRING), Shape::Plain)
        }
        FieldKind::Json | FieldKind::RichText => (GqlType::named(JSON_SCALAR), Shape::Plain),
        FieldKind::Number { has_many } => (scalar(TypeRef::FLOAT, *has_many), Shape::Plain),
        FieldKind::Checkbox => (GqlType::named(TypeRef::BOOLEAN), Shape::Plain),
        FieldKind::Date => (GqlType::named(DATE_TIME_SCALAR), Shape::Plain),
        FieldKind::Point => (GqlType::list_of(TypeRef::FLOAT), Shape::Plain),
        FieldKind::Radio { options } => select(registry, parent, name, options, false)?,
        FieldKind::Select { options, has_many } => {
            select(registry, parent, name, options, *has_many)?
        }
        FieldKind::Relationship {
            relation_to,
            has_many,
        } => relationship(ctx, registry, field, parent, relation_to, *has_many)?,
        FieldKind::Upload { relation_to } => relationship(
            ctx,
            registry,
            field,
            parent,
            &RelationTo::One(relation_to.clone()),
            false,
        )?,
        // Objects without fields are not allowed
        FieldKind::Group { fields } if !fields.iter().any(has_data) => return Ok(None),
        FieldKind::Group { fields } => {
            let type_name = nested_name(field, parent);
            let type_name = nested_object(ctx, registry, &type_name, fields, force_nullable)?;
            (GqlType::named(&type_name), Shape::Plain)
        }
        FieldKind::Array { fields } => {
            let type_name = nested_name(field, parent);
            let type_name = nested_object(
                ctx,
                registry,
                &type_name,
                &with_row_id(fields),
                force_nullable,
            )?;
            (GqlType::list_of(&type_name), Shape::Plain)
        }
        FieldKind::Blocks {
            blocks,
            block_references,
        } => self::blocks(
            ctx,
            registry,
            field,
            parent,
            blocks,
            block_references,
            force_nullable,
        )?,
        FieldKind::Row { .. } | FieldKind::Collapsible { .. } | FieldKind::Tabs { .. } => {
            return Err(SchemaError::MissingFieldName {
                parent: parent.to_string(),
                kind: field.kind.as_str().to_string(),
            })
        }
    };

    let complexity = match field.complexity {
        Some(complexity) => complexity,
        None if field.is_relational() => RELATION_COMPLEXITY,
        None => DEFAULT_COMPLEXITY,
    };

    let mut output = OutputField::new(
        name,
        ty.required_if(ctx.output_required(field, force_nullable)),
    )
    .resolution(Resolution::Property(shape))
    .complexity(complexity);
    output.localized = ctx.is_localized(field);

    Ok(Some(output))
}

/// Returns true if the field or one of its layout children holds data.
fn has_data(field: &Field) -> bool {
    match &field.kind {
        FieldKind::Row { fields } | FieldKind::Collapsible { fields } => fields.iter().any(has_data),
        FieldKind::Tabs { tabs } => tabs.iter().any(|tab| tab.fields.iter().any(has_data)),
        _ => field.affects_data(),
    }
}

/// Name of a nested group, array or blocks type.
pub fn nested_name(field: &Field, parent: &str) -> String {
    field
        .interface_name
        .clone()
        .unwrap_or_else(|| combine_parent_name(parent, field.name()))
}

fn scalar(name: &str, has_many: bool) -> GqlType {
    if has_many {
        GqlType::list_of(name)
    } else {
        GqlType::named(name)
    }
}

fn nested_object(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    name: &str,
    fields: &[Field],
    force_nullable: bool,
) -> Result<String, SchemaError> {
    registry.get_or_build(name, |registry| {
        let fields = build_output_fields(ctx, registry, fields, name, force_nullable)?;
        Ok(ObjectType::new(name, fields).into())
    })
}

fn select(
    registry: &mut TypeRegistry,
    parent: &str,
    name: &str,
    options: &[SelectOption],
    has_many: bool,
) -> Result<(GqlType, Shape), SchemaError> {
    let enum_name = format!("{parent}_{name}");
    let enumeration = build_enum(registry, &enum_name, options.iter().map(SelectOption::value))?;

    Ok((scalar(&enum_name, has_many), Shape::Enum(enumeration)))
}

fn relationship(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    field: &Field,
    parent: &str,
    relation_to: &RelationTo,
    has_many: bool,
) -> Result<(GqlType, Shape), SchemaError> {
    let (name, shape) = match relation_to {
        RelationTo::One(slug) => {
            let target = ctx
                .target(slug)
                .ok_or_else(|| SchemaError::UnknownRelation {
                    field: field.name().to_string(),
                    target: slug.clone(),
                })?;

            match &target.type_name {
                Some(type_name) => (type_name.clone(), Shape::Relation),
                // Collections hidden from the API can only be referenced by id
                None => (target.id_type.scalar().to_string(), Shape::Plain),
            }
        }
        RelationTo::Many(slugs) => (
            polymorphic_relationship(ctx, registry, field, parent, slugs)?,
            Shape::Plain,
        ),
    };

    Ok((scalar(&name, has_many), shape))
}

/// Builds the `{relationTo, value}` object of a relationship to several collections.
fn polymorphic_relationship(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    field: &Field,
    parent: &str,
    slugs: &[String],
) -> Result<String, SchemaError> {
    let composite = combine_parent_name(parent, field.name());
    let object_name = format!("{composite}_Relationship");

    let mut members = HashMap::new();
    for slug in slugs {
        let target = ctx
            .target(slug)
            .ok_or_else(|| SchemaError::UnknownRelation {
                field: field.name().to_string(),
                target: slug.clone(),
            })?;

        if let Some(type_name) = &target.type_name {
            members.insert(slug.clone(), type_name.clone());
        }
    }

    registry.get_or_build(&object_name, |registry| {
        let relation_to = build_enum(
            registry,
            &format!("{composite}_RelationTo"),
            slugs.iter().map(String::as_str),
        )?;

        let value = if members.is_empty() {
            OutputField::new(VALUE_FIELD, GqlType::named(JSON_SCALAR))
        } else {
            let union_name = format!("{composite}_Value");
            let mut union_members: Vec<String> = Vec::new();
            for slug in slugs {
                if let Some(type_name) = members.get(slug) {
                    union_members.push(type_name.clone());
                }
            }

            registry.get_or_build(&union_name, |_| {
                Ok(UnionType {
                    name: union_name.clone(),
                    members: union_members,
                }
                .into())
            })?;

            OutputField::new(VALUE_FIELD, GqlType::named(&union_name)).resolution(
                Resolution::Property(Shape::Union(Arc::new(UnionShape {
                    discriminator: Discriminator::Parent(RELATION_TO_FIELD.to_string()),
                    members,
                    relation: true,
                }))),
            )
        };

        Ok(ObjectType::new(
            &object_name,
            vec![
                OutputField::new(RELATION_TO_FIELD, GqlType::named(&relation_to.name))
                    .resolution(Resolution::Property(Shape::Enum(relation_to.clone()))),
                value,
            ],
        )
        .into())
    })
}

fn blocks(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    field: &Field,
    parent: &str,
    blocks: &[Block],
    references: &[String],
    force_nullable: bool,
) -> Result<(GqlType, Shape), SchemaError> {
    let union_name = nested_name(field, parent);

    let mut all_blocks: Vec<&Block> = blocks.iter().collect();
    for slug in references {
        let block = ctx
            .block(slug)
            .ok_or_else(|| SchemaError::UnknownBlock(slug.clone()))?;
        all_blocks.push(block);
    }

    let mut members = Vec::new();
    let mut discriminated = HashMap::new();
    for block in all_blocks {
        let type_name = block_object(ctx, registry, block, force_nullable)?;
        if !members.contains(&type_name) {
            members.push(type_name.clone());
        }
        discriminated.insert(block.slug.clone(), type_name);
    }

    if members.is_empty() {
        return Err(SchemaError::EmptyUnion(union_name));
    }

    registry.get_or_build(&union_name, |_| {
        Ok(UnionType {
            name: union_name.clone(),
            members,
        }
        .into())
    })?;

    Ok((
        GqlType::list_of(&union_name),
        Shape::Union(Arc::new(UnionShape {
            discriminator: Discriminator::Own(BLOCK_TYPE_FIELD.to_string()),
            members: discriminated,
            relation: false,
        })),
    ))
}

/// Returns the name of the object type of a block, building it on first use.
pub fn block_type_name(block: &Block) -> String {
    let base = block.singular_name.as_deref().unwrap_or(&block.slug);
    format!("{}{BLOCK_SUFFIX}", to_words(base))
}

fn block_object(
    ctx: &BuildContext,
    registry: &mut TypeRegistry,
    block: &Block,
    force_nullable: bool,
) -> Result<String, SchemaError> {
    let name = block_type_name(block);

    registry.get_or_build(&name, |registry| {
        let fields = with_block_fields(&block.fields);
        let mut object_fields = build_output_fields(ctx, registry, &fields, &name, force_nullable)?;

        if !object_fields.iter().any(|field| field.name == BLOCK_TYPE_FIELD) {
            object_fields.push(OutputField::new(
                BLOCK_TYPE_FIELD,
                GqlType::named(TypeRef::STRING),
            ));
        }

        Ok(ObjectType::new(&name, object_fields).into())
    })
}
