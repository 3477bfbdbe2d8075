// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::SchemaError;
use crate::graphql::naming::{format_name, validate_name};
use crate::graphql::registry::TypeRegistry;
use crate::graphql::types::{EnumType, EnumValue};

/// Returns a shared enum type with one value per stored string, building it on first request.
///
/// Value names are derived with [`format_name`], the stored strings are kept to map values in
/// both directions.
pub fn build_enum<'a, I>(
    registry: &mut TypeRegistry,
    name: &str,
    values: I,
) -> Result<Arc<EnumType>, SchemaError>
where
    I: IntoIterator<Item = &'a str>,
{
    let values = enum_values(values)?;

    registry.get_or_build(name, |_| {
        Ok(EnumType {
            name: name.to_string(),
            values,
        }
        .into())
    })?;

    registry
        .enumeration(name)
        .ok_or_else(|| SchemaError::TypeCollision(name.to_string()))
}

/// Derives enum values from stored strings.
pub fn enum_values<'a, I>(values: I) -> Result<Vec<EnumValue>, SchemaError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for value in values {
        let name = format_name(value);
        validate_name(&name)?;

        if matches!(name.as_str(), "true" | "false" | "null") || !seen.insert(name.clone()) {
            return Err(SchemaError::InvalidName(value.to_string()));
        }

        result.push(EnumValue {
            name,
            value: value.to_string(),
        });
    }

    Ok(result)
}
