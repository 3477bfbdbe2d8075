// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};

use crate::collections::{CollectionConfig, GlobalConfig};
use crate::fields::Block;

/// Configuration object holding the content model and all server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// HTTP port, serving the GraphQL API (for example hosted under
    /// http://localhost:3000/graphql). Defaults to 3000.
    pub http_port: u16,

    /// GraphQL API settings.
    pub graphql: GraphQLConfig,

    /// Locales documents can be stored in. Localization is disabled when not set.
    pub localization: Option<LocalizationConfig>,

    /// Ordered registry of collections.
    pub collections: Vec<CollectionConfig>,

    /// Ordered registry of globals.
    pub globals: Vec<GlobalConfig>,

    /// Library of reusable blocks, referenced by slug from blocks fields.
    pub blocks: Vec<Block>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            http_port: 3000,
            graphql: GraphQLConfig::default(),
            localization: None,
            collections: Vec::new(),
            globals: Vec::new(),
            blocks: Vec::new(),
        }
    }
}

/// Settings of the GraphQL API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphQLConfig {
    /// Queries with a higher complexity score get rejected before they are executed. Defaults
    /// to 1000.
    pub max_complexity: usize,

    /// Do not serve the GraphQL playground on `GET` requests.
    pub disable_playground: bool,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            max_complexity: 1000,
            disable_playground: false,
        }
    }
}

/// Locales supported by localized fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizationConfig {
    /// Codes of all supported locales, for example `en` or `de-CH`.
    pub locales: Vec<String>,

    /// Locale used when a request does not specify one.
    pub default_locale: String,

    /// Return values of the default locale when the requested locale has none.
    #[serde(default)]
    pub fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::Configuration;

    #[test]
    fn defaults_for_missing_values() {
        let config: Configuration = serde_json::from_str(r#"{ "http_port": 4000 }"#).unwrap();
        assert_eq!(config.http_port, 4000);
        assert_eq!(config.graphql.max_complexity, 1000);
        assert!(config.localization.is_none());
        assert!(config.collections.is_empty());
    }
}
