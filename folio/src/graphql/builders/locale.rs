// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::config::LocalizationConfig;
use crate::errors::SchemaError;
use crate::graphql::builders::enums::enum_values;
use crate::graphql::constants::{FALLBACK_LOCALE_INPUT_TYPE, LOCALE_INPUT_TYPE};
use crate::graphql::registry::TypeRegistry;
use crate::graphql::types::EnumType;

/// Adds the enums of the `locale` and `fallbackLocale` arguments.
///
/// `locale` additionally accepts `all` to read every locale at once, `fallbackLocale` accepts
/// `none` to turn off fallback values.
pub fn build_locale_types(
    registry: &mut TypeRegistry,
    localization: &LocalizationConfig,
) -> Result<(), SchemaError> {
    let locales = || localization.locales.iter().map(String::as_str);

    registry.insert(EnumType {
        name: LOCALE_INPUT_TYPE.to_string(),
        values: enum_values(locales().chain(["all"]))?,
    })?;

    registry.insert(EnumType {
        name: FALLBACK_LOCALE_INPUT_TYPE.to_string(),
        values: enum_values(locales().chain(["none"]))?,
    })?;

    Ok(())
}
