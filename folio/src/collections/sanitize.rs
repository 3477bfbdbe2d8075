// SPDX-License-Identifier: AGPL-3.0-or-later

//! Adds the fields every collection or global implicitly owns.
use crate::collections::{CollectionConfig, GlobalConfig};
use crate::fields::{find_field, Field, FieldKind, SelectOption};

/// Name of the select field holding the publishing status of drafts.
pub const STATUS_FIELD: &str = "_status";

/// Status of a document which was saved but not published.
pub const STATUS_DRAFT: &str = "draft";

/// Status of a published document.
pub const STATUS_PUBLISHED: &str = "published";

/// Field holding the creation date of a document.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Field holding the date of the last update of a document.
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Field holding the login email of auth collections.
pub const EMAIL_FIELD: &str = "email";

/// Returns the collection with auth, draft status and timestamp fields added.
///
/// Fields already declared by the collection are kept as they are.
pub fn sanitize_collection(config: &CollectionConfig) -> CollectionConfig {
    let mut sanitized = config.clone();

    if config.local_strategy() && find_field(&config.fields, EMAIL_FIELD).is_none() {
        sanitized
            .fields
            .insert(0, Field::new(EMAIL_FIELD, FieldKind::Email).required());
    }

    if config.drafts() {
        push_missing(&mut sanitized.fields, status_field());
    }

    if config.timestamps {
        push_missing(&mut sanitized.fields, Field::new(UPDATED_AT_FIELD, FieldKind::Date));
        push_missing(&mut sanitized.fields, Field::new(CREATED_AT_FIELD, FieldKind::Date));
    }

    sanitized
}

/// Returns the global with draft status and timestamp fields added.
pub fn sanitize_global(config: &GlobalConfig) -> GlobalConfig {
    let mut sanitized = config.clone();

    if config.drafts() {
        push_missing(&mut sanitized.fields, status_field());
    }

    push_missing(&mut sanitized.fields, Field::new(UPDATED_AT_FIELD, FieldKind::Date));
    push_missing(&mut sanitized.fields, Field::new(CREATED_AT_FIELD, FieldKind::Date));

    sanitized
}

fn status_field() -> Field {
    Field::new(
        STATUS_FIELD,
        FieldKind::Select {
            options: vec![
                SelectOption::from(STATUS_DRAFT),
                SelectOption::from(STATUS_PUBLISHED),
            ],
            has_many: false,
        },
    )
}

fn push_missing(fields: &mut Vec<Field>, field: Field) {
    if find_field(fields, field.name()).is_none() {
        fields.push(field);
    }
}

#[cfg(test)]
mod tests {
    use crate::collections::{AuthConfig, CollectionConfig, GlobalConfig, VersionsConfig};
    use crate::fields::{Field, FieldKind};

    use super::{sanitize_collection, sanitize_global};

    fn names(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|field| field.name()).collect()
    }

    #[test]
    fn adds_timestamps() {
        let config = CollectionConfig::new("posts", vec![Field::new("title", FieldKind::Text)]);
        let sanitized = sanitize_collection(&config);
        assert_eq!(
            names(&sanitized.fields),
            ["title", "updatedAt", "createdAt"]
        );

        let mut config = config;
        config.timestamps = false;
        assert_eq!(names(&sanitize_collection(&config).fields), ["title"]);
    }

    #[test]
    fn adds_email_for_local_strategy() {
        let mut config = CollectionConfig::new("users", vec![Field::new("name", FieldKind::Text)]);
        config.auth = Some(AuthConfig::default());
        config.timestamps = false;

        let sanitized = sanitize_collection(&config);
        assert_eq!(names(&sanitized.fields), ["email", "name"]);
        assert!(sanitized.fields[0].required);

        config.auth = Some(AuthConfig {
            disable_local_strategy: true,
            ..AuthConfig::default()
        });
        assert_eq!(names(&sanitize_collection(&config).fields), ["name"]);
    }

    #[test]
    fn adds_status_for_drafts() {
        let mut config = GlobalConfig::new("menu", vec![]);
        config.versions = Some(VersionsConfig {
            drafts: true,
            ..VersionsConfig::default()
        });

        let sanitized = sanitize_global(&config);
        assert_eq!(
            names(&sanitized.fields),
            ["_status", "updatedAt", "createdAt"]
        );
    }

    #[test]
    fn keeps_declared_fields() {
        let config = CollectionConfig::new(
            "posts",
            vec![Field::new("createdAt", FieldKind::Text).required()],
        );

        let sanitized = sanitize_collection(&config);
        assert_eq!(names(&sanitized.fields), ["createdAt", "updatedAt"]);
        assert_eq!(sanitized.fields[0].kind, FieldKind::Text);
    }
}
