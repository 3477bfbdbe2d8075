// SPDX-License-Identifier: AGPL-3.0-or-later

//! Flattening of layout-only fields.
//!
//! Rows, collapsibles and unnamed tabs only group fields in editing interfaces. For everything
//! which derives from the stored document shape their children count as direct siblings of the
//! layout field, at the position of the layout field.
use std::collections::HashSet;

use crate::errors::SchemaError;
use crate::fields::{Field, FieldKind};
use crate::graphql::naming::validate_name;

/// Returns the data-bearing fields of one nesting level in their original order.
///
/// Named tabs turn into groups. Fields are validated on the way: every data field needs a valid
/// name which is unique on this level. `parent` is only used for error reporting.
pub fn flatten_fields(fields: &[Field], parent: &str) -> Result<Vec<Field>, SchemaError> {
    let mut flattened = Vec::with_capacity(fields.len());
    splice(fields, parent, &mut flattened)?;

    let mut seen = HashSet::new();
    for field in &flattened {
        validate_name(field.name())?;

        if !seen.insert(field.name().to_string()) {
            return Err(SchemaError::DuplicateField {
                parent: parent.to_string(),
                field: field.name().to_string(),
            });
        }
    }

    Ok(flattened)
}

fn splice(fields: &[Field], parent: &str, target: &mut Vec<Field>) -> Result<(), SchemaError> {
    for field in fields {
        match &field.kind {
            FieldKind::Row { fields } | FieldKind::Collapsible { fields } => {
                splice(fields, parent, target)?;
            }
            FieldKind::Tabs { tabs } => {
                for tab in tabs {
                    match &tab.name {
                        Some(name) => {
                            let mut group = Field::new(
                                name,
                                FieldKind::Group {
                                    fields: tab.fields.clone(),
                                },
                            );
                            group.interface_name = tab.interface_name.clone();
                            target.push(group);
                        }
                        None => splice(&tab.fields, parent, target)?,
                    }
                }
            }
            _ => {
                if field.name.is_none() {
                    return Err(SchemaError::MissingFieldName {
                        parent: parent.to_string(),
                        kind: field.kind.as_str().to_string(),
                    });
                }

                target.push(field.clone());
            }
        }
    }

    Ok(())
}

/// Returns true if the given field tree declares its own `id` field.
pub fn has_id_field(fields: &[Field]) -> bool {
    find_field(fields, "id").is_some()
}

/// Looks up a data field by name on the top level of a field tree, looking through layout
/// fields.
pub fn find_field<'a>(fields: &'a [Field], name: &str) -> Option<&'a Field> {
    fields.iter().find_map(|field| match &field.kind {
        FieldKind::Row { fields } | FieldKind::Collapsible { fields } => find_field(fields, name),
        FieldKind::Tabs { tabs } => tabs
            .iter()
            .filter(|tab| tab.name.is_none())
            .find_map(|tab| find_field(&tab.fields, name)),
        _ if field.name.as_deref() == Some(name) => Some(field),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::errors::SchemaError;
    use crate::fields::{Field, FieldKind, Tab};

    use super::{find_field, flatten_fields, has_id_field};

    fn text(name: &str) -> Field {
        Field::new(name, FieldKind::Text)
    }

    #[test]
    fn splices_layout_fields_in_order() {
        let fields = vec![
            text("title"),
            Field::layout(FieldKind::Row {
                fields: vec![text("first"), text("second")],
            }),
            Field::layout(FieldKind::Tabs {
                tabs: vec![
                    Tab {
                        name: None,
                        interface_name: None,
                        fields: vec![Field::layout(FieldKind::Collapsible {
                            fields: vec![text("third")],
                        })],
                    },
                    Tab {
                        name: Some("seo".into()),
                        interface_name: None,
                        fields: vec![text("description")],
                    },
                ],
            }),
            text("last"),
        ];

        let flattened = flatten_fields(&fields, "Post").unwrap();
        let names: Vec<&str> = flattened.iter().map(|field| field.name()).collect();
        assert_eq!(names, ["title", "first", "second", "third", "seo", "last"]);

        // Named tabs nest their fields like a group
        assert_eq!(
            flattened[4].kind,
            FieldKind::Group {
                fields: vec![text("description")]
            }
        );
    }

    #[rstest]
    #[case::same_level(vec![text("title"), text("title")])]
    #[case::through_row(vec![
        text("title"),
        Field::layout(FieldKind::Row { fields: vec![text("title")] }),
    ])]
    fn rejects_duplicate_names(#[case] fields: Vec<Field>) {
        let result = flatten_fields(&fields, "Post");
        assert!(matches!(
            result,
            Err(SchemaError::DuplicateField { parent, field }) if parent == "Post" && field == "title"
        ));
    }

    #[rstest]
    #[case::dash("first-name")]
    #[case::leading_digit("1st")]
    #[case::reserved("__typename")]
    fn rejects_invalid_names(#[case] name: &str) {
        let result = flatten_fields(&[text(name)], "Post");
        assert!(matches!(result, Err(SchemaError::InvalidName(_))));
    }

    #[test]
    fn same_name_on_different_levels_is_fine() {
        let fields = vec![
            text("title"),
            Field::new(
                "meta",
                FieldKind::Group {
                    fields: vec![text("title")],
                },
            ),
        ];

        assert!(flatten_fields(&fields, "Post").is_ok());
    }

    #[test]
    fn missing_name_is_an_error() {
        let mut field = text("title");
        field.name = None;

        assert!(matches!(
            flatten_fields(&[field], "Post"),
            Err(SchemaError::MissingFieldName { .. })
        ));
    }

    #[test]
    fn finds_id_through_layout() {
        let fields = vec![Field::layout(FieldKind::Row {
            fields: vec![Field::new("id", FieldKind::Number { has_many: false })],
        })];

        assert!(has_id_field(&fields));
        assert!(find_field(&fields, "title").is_none());
        assert!(!has_id_field(&[text("title")]));
    }
}
