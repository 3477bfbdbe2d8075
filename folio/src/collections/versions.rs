// SPDX-License-Identifier: AGPL-3.0-or-later

//! Field trees of version documents.
//!
//! Every version stores a snapshot of its document in a `version` group next to some metadata.
use crate::collections::sanitize::{CREATED_AT_FIELD, UPDATED_AT_FIELD};
use crate::collections::{CollectionConfig, GlobalConfig};
use crate::fields::{Field, FieldKind, RelationTo};

/// Field pointing at the document a version belongs to.
pub const PARENT_FIELD: &str = "parent";

/// Group field holding the document snapshot.
pub const VERSION_FIELD: &str = "version";

/// Flag marking the most recent version of a document.
pub const LATEST_FIELD: &str = "latest";

/// Returns the stored fields of a collection version.
pub fn build_version_collection_fields(config: &CollectionConfig) -> Vec<Field> {
    let snapshot: Vec<Field> = config
        .fields
        .iter()
        .filter(|field| !(field.affects_data() && field.name() == "id"))
        .cloned()
        .collect();

    let mut fields = vec![
        Field::new(
            PARENT_FIELD,
            FieldKind::Relationship {
                relation_to: RelationTo::One(config.slug.clone()),
                has_many: false,
            },
        ),
        Field::new(VERSION_FIELD, FieldKind::Group { fields: snapshot }),
        Field::new(CREATED_AT_FIELD, FieldKind::Date),
        Field::new(UPDATED_AT_FIELD, FieldKind::Date),
    ];

    if config.drafts() {
        fields.push(Field::new(LATEST_FIELD, FieldKind::Checkbox));
    }

    fields
}

/// Returns the stored fields of a global version.
pub fn build_version_global_fields(config: &GlobalConfig) -> Vec<Field> {
    let mut fields = vec![
        Field::new(
            VERSION_FIELD,
            FieldKind::Group {
                fields: config.fields.clone(),
            },
        ),
        Field::new(CREATED_AT_FIELD, FieldKind::Date),
        Field::new(UPDATED_AT_FIELD, FieldKind::Date),
    ];

    if config.drafts() {
        fields.push(Field::new(LATEST_FIELD, FieldKind::Checkbox));
    }

    fields
}

/// Adds the metadata exposed on every version type to the stored version fields.
///
/// Metadata which is already part of the stored fields is not added twice.
pub fn with_version_metadata(mut fields: Vec<Field>) -> Vec<Field> {
    let metadata = [
        Field::new("id", FieldKind::Text),
        Field::new(CREATED_AT_FIELD, FieldKind::Date),
        Field::new(UPDATED_AT_FIELD, FieldKind::Date),
    ];

    for field in metadata {
        if !fields.iter().any(|existing| existing.name() == field.name()) {
            fields.push(field);
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use crate::collections::{CollectionConfig, VersionsConfig};
    use crate::fields::{Field, FieldKind};

    use super::{build_version_collection_fields, with_version_metadata};

    #[test]
    fn version_fields() {
        let mut config = CollectionConfig::new(
            "posts",
            vec![
                Field::new("id", FieldKind::Number { has_many: false }),
                Field::new("title", FieldKind::Text),
            ],
        );
        config.versions = Some(VersionsConfig {
            drafts: true,
            ..VersionsConfig::default()
        });

        let fields = with_version_metadata(build_version_collection_fields(&config));
        let names: Vec<&str> = fields.iter().map(|field| field.name()).collect();
        assert_eq!(
            names,
            ["parent", "version", "createdAt", "updatedAt", "latest", "id"]
        );

        // Document snapshot does not contain the custom id
        match &fields[1].kind {
            FieldKind::Group { fields } => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].name(), "title");
            }
            kind => panic!("unexpected kind {:?}", kind),
        }
    }
}
