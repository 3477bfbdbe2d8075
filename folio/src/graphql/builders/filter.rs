// SPDX-License-Identifier: AGPL-3.0-or-later

//! Filter input types of `where` arguments.
use crate::adapter::IdType;
use crate::errors::SchemaError;
use crate::fields::{flatten_fields, Field, FieldKind};
use crate::graphql::constants::{
    BOOLEAN_OPERATOR, DATE_OPERATOR, ID_FIELD, JSON_OPERATOR, NUMBER_OPERATOR, PATH_SEPARATOR,
    POINT_OPERATOR, RELATION_OPERATOR, TEXT_OPERATOR, WHERE_SUFFIX,
};
use crate::graphql::registry::TypeRegistry;
use crate::graphql::types::{GqlType, InputField, InputObjectType};

/// Adds the filter input type `{name}_where`.
///
/// Every data field gets an operator object, fields of groups and arrays are addressed by their
/// path joined with `__`. `synthetic_id` adds an `id` filter for documents which do not declare
/// an `id` field themselves. Conditions can be combined with `AND` and `OR` lists of the type
/// itself.
pub fn build_where_input(
    registry: &mut TypeRegistry,
    name: &str,
    fields: &[Field],
    synthetic_id: Option<IdType>,
) -> Result<String, SchemaError> {
    let type_name = format!("{name}{WHERE_SUFFIX}");

    let mut input_fields = Vec::new();
    if let Some(id_type) = synthetic_id {
        let operator = match id_type {
            IdType::Text => TEXT_OPERATOR,
            IdType::Number => NUMBER_OPERATOR,
        };
        input_fields.push(InputField::new(ID_FIELD, GqlType::named(operator)));
    }

    collect_paths(fields, None, &type_name, &mut input_fields)?;

    input_fields.push(InputField::new("AND", GqlType::list_of(&type_name)));
    input_fields.push(InputField::new("OR", GqlType::list_of(&type_name)));

    registry.insert(InputObjectType {
        name: type_name.clone(),
        fields: input_fields,
    })?;

    Ok(type_name)
}

fn collect_paths(
    fields: &[Field],
    prefix: Option<&str>,
    type_name: &str,
    target: &mut Vec<InputField>,
) -> Result<(), SchemaError> {
    for field in flatten_fields(fields, type_name)? {
        let path = match prefix {
            Some(prefix) => format!("{prefix}{PATH_SEPARATOR}{}", field.name()),
            None => field.name().to_string(),
        };

        let operator = match &field.kind {
            FieldKind::Group { fields } | FieldKind::Array { fields } => {
                collect_paths(fields, Some(&path), type_name, target)?;
                continue;
            }
            // Entries of blocks have no common shape to filter on
            FieldKind::Blocks { .. } => continue,
            FieldKind::Text
            | FieldKind::Email
            | FieldKind::Textarea
            | FieldKind::Code
            | FieldKind::Radio { .. }
            | FieldKind::Select { .. } => TEXT_OPERATOR,
            FieldKind::Number { .. } => NUMBER_OPERATOR,
            FieldKind::Checkbox => BOOLEAN_OPERATOR,
            FieldKind::Date => DATE_OPERATOR,
            FieldKind::Point => POINT_OPERATOR,
            FieldKind::Json | FieldKind::RichText => JSON_OPERATOR,
            FieldKind::Relationship { .. } | FieldKind::Upload { .. } => RELATION_OPERATOR,
            FieldKind::Row { .. } | FieldKind::Collapsible { .. } | FieldKind::Tabs { .. } => {
                continue
            }
        };

        if target.iter().any(|field| field.name == path) {
            return Err(SchemaError::DuplicateField {
                parent: type_name.to_string(),
                field: path,
            });
        }

        target.push(InputField::new(&path, GqlType::named(operator)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::adapter::IdType;
    use crate::errors::SchemaError;
    use crate::fields::Field;
    use crate::graphql::registry::TypeRegistry;

    use super::build_where_input;

    #[test]
    fn operators_and_paths() {
        let fields: Vec<Field> = serde_json::from_value(json!([
            { "name": "title", "type": "text" },
            { "name": "views", "type": "number" },
            { "name": "featured", "type": "checkbox" },
            { "name": "category", "type": "relationship", "relationTo": "categories" },
            { "name": "meta", "type": "group", "fields": [
                { "name": "publishedAt", "type": "date" },
                { "name": "links", "type": "array", "fields": [{ "name": "url", "type": "text" }] },
            ]},
            { "name": "layout", "type": "blocks", "blocks": [] },
        ]))
        .unwrap();

        let mut registry = TypeRegistry::new();
        let name = build_where_input(&mut registry, "Post", &fields, Some(IdType::Number)).unwrap();
        assert_eq!(name, "Post_where");

        let input = registry.input(&name).unwrap();
        assert_eq!(
            input.field_names(),
            [
                "id",
                "title",
                "views",
                "featured",
                "category",
                "meta__publishedAt",
                "meta__links__url",
                "AND",
                "OR"
            ]
        );

        assert_eq!(input.field("id").unwrap().ty.name, "NumberOperator");
        assert_eq!(input.field("category").unwrap().ty.name, "RelationOperator");
        assert_eq!(
            input.field("meta__publishedAt").unwrap().ty.name,
            "DateOperator"
        );
        assert_eq!(input.field("AND").unwrap().ty.to_string(), "[Post_where!]");
    }

    #[test]
    fn colliding_paths() {
        let fields: Vec<Field> = serde_json::from_value(json!([
            { "name": "meta__title", "type": "text" },
            { "name": "meta", "type": "group", "fields": [{ "name": "title", "type": "text" }] },
        ]))
        .unwrap();

        let mut registry = TypeRegistry::new();
        assert!(matches!(
            build_where_input(&mut registry, "Post", &fields, None),
            Err(SchemaError::DuplicateField { field, .. }) if field == "meta__title"
        ));
    }
}
