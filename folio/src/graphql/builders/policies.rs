// SPDX-License-Identifier: AGPL-3.0-or-later

//! Types describing what the current user is permitted to do.
use async_graphql::dynamic::TypeRef;

use crate::collections::{CollectionConfig, GlobalConfig};
use crate::errors::SchemaError;
use crate::graphql::constants::{
    ACCESS_TYPE, CAN_ACCESS_ADMIN_FIELD, JSON_SCALAR, PERMISSION_TYPE, WHERE_ARG,
};
use crate::graphql::registry::TypeRegistry;
use crate::graphql::types::{GqlType, ObjectType, OutputField};

/// Permission fields of a collection policy.
pub fn collection_policy_operations(config: &CollectionConfig) -> Vec<&'static str> {
    let mut operations = vec!["create", "read", "update", "delete"];

    if config.versions.is_some() {
        operations.push("readVersions");
    }

    if config.auth.is_some() {
        operations.push("unlock");
    }

    operations
}

/// Permission fields of a global policy.
pub fn global_policy_operations(config: &GlobalConfig) -> Vec<&'static str> {
    let mut operations = vec!["read", "update"];

    if config.versions.is_some() {
        operations.push("readVersions");
    }

    operations
}

/// Adds a policy type with one `Permission` field per operation.
pub fn build_policy_type(
    registry: &mut TypeRegistry,
    name: &str,
    operations: &[&str],
) -> Result<(), SchemaError> {
    let permission = permission_type(registry)?;

    let fields = operations
        .iter()
        .map(|operation| OutputField::new(operation, GqlType::named(&permission)))
        .collect();

    registry.insert(ObjectType::new(name, fields))
}

/// Adds the `Access` type returned by the root access query.
///
/// `entries` map the field names to the policy types of all collections and globals.
pub fn build_access_type(
    registry: &mut TypeRegistry,
    entries: &[(String, String)],
) -> Result<(), SchemaError> {
    let mut fields = vec![OutputField::new(
        CAN_ACCESS_ADMIN_FIELD,
        GqlType::named_nn(TypeRef::BOOLEAN),
    )];

    for (field, policy) in entries {
        fields.push(OutputField::new(field, GqlType::named(policy)));
    }

    registry.insert(ObjectType::new(ACCESS_TYPE, fields))
}

fn permission_type(registry: &mut TypeRegistry) -> Result<String, SchemaError> {
    registry.get_or_build(PERMISSION_TYPE, |_| {
        Ok(ObjectType::new(
            PERMISSION_TYPE,
            vec![
                OutputField::new("permission", GqlType::named_nn(TypeRef::BOOLEAN)),
                OutputField::new(WHERE_ARG, GqlType::named(JSON_SCALAR)),
            ],
        )
        .into())
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::collections::{AuthConfig, CollectionConfig, VersionsConfig};
    use crate::graphql::registry::TypeRegistry;

    use super::{build_access_type, build_policy_type, collection_policy_operations};

    #[test]
    fn collection_operations() {
        let mut users = CollectionConfig::new("users", vec![]);
        assert_eq!(
            collection_policy_operations(&users),
            ["create", "read", "update", "delete"]
        );

        users.auth = Some(AuthConfig::default());
        users.versions = Some(VersionsConfig::default());
        assert_eq!(
            collection_policy_operations(&users),
            ["create", "read", "update", "delete", "readVersions", "unlock"]
        );
    }

    #[test]
    fn policies_share_the_permission_type() {
        let mut registry = TypeRegistry::new();
        build_policy_type(&mut registry, "PostAccess", &["read"]).unwrap();
        build_policy_type(&mut registry, "PostDocAccess", &["read"]).unwrap();

        let first = registry.object("PostAccess").unwrap();
        assert_eq!(first.field("read").unwrap().ty.name, "Permission");
        assert!(Arc::ptr_eq(
            &registry.object("Permission").unwrap(),
            &registry.object("Permission").unwrap()
        ));

        build_access_type(&mut registry, &[("posts".into(), "PostAccess".into())]).unwrap();
        assert_eq!(
            registry.object("Access").unwrap().field_names(),
            ["canAccessAdmin", "posts"]
        );

        // Only one policy per name
        assert!(build_policy_type(&mut registry, "PostAccess", &["read"]).is_err());
    }
}
