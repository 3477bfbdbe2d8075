// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};

use crate::fields::Field;

/// Named set of documents sharing one field tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Unique identifier of this collection.
    pub slug: String,

    /// Field tree of every document in this collection.
    #[serde(default)]
    pub fields: Vec<Field>,

    /// Enables login, session and account management operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,

    /// Enables version history and optionally drafts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<VersionsConfig>,

    /// Adds `createdAt` and `updatedAt` fields, true by default.
    #[serde(default = "default_true")]
    pub timestamps: bool,

    /// GraphQL specific settings.
    #[serde(default, rename = "graphQL")]
    pub graphql: CollectionGraphQL,
}

impl CollectionConfig {
    /// Returns a collection with default settings.
    pub fn new(slug: &str, fields: Vec<Field>) -> Self {
        Self {
            slug: slug.to_string(),
            fields,
            auth: None,
            versions: None,
            timestamps: true,
            graphql: CollectionGraphQL::default(),
        }
    }

    /// Returns true if documents of this collection can be saved as incomplete drafts.
    pub fn drafts(&self) -> bool {
        self.versions
            .as_ref()
            .map(|versions| versions.drafts)
            .unwrap_or(false)
    }

    /// Returns true if users of this collection log in with email and password.
    pub fn local_strategy(&self) -> bool {
        self.auth
            .as_ref()
            .map(|auth| !auth.disable_local_strategy)
            .unwrap_or(false)
    }
}

/// Single document type, for example site settings or a navigation menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Unique identifier of this global.
    pub slug: String,

    /// Field tree of the document.
    #[serde(default)]
    pub fields: Vec<Field>,

    /// Enables version history and optionally drafts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<VersionsConfig>,

    /// GraphQL specific settings.
    #[serde(default, rename = "graphQL")]
    pub graphql: GlobalGraphQL,
}

impl GlobalConfig {
    /// Returns a global with default settings.
    pub fn new(slug: &str, fields: Vec<Field>) -> Self {
        Self {
            slug: slug.to_string(),
            fields,
            versions: None,
            graphql: GlobalGraphQL::default(),
        }
    }

    /// Returns true if the document can be saved as an incomplete draft.
    pub fn drafts(&self) -> bool {
        self.versions
            .as_ref()
            .map(|versions| versions.drafts)
            .unwrap_or(false)
    }
}

/// Authentication settings of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Turns off email and password based authentication.
    #[serde(rename = "disableLocalStrategy")]
    pub disable_local_strategy: bool,

    /// Failed login attempts before an account gets locked, zero disables locking.
    #[serde(rename = "maxLoginAttempts")]
    pub max_login_attempts: u32,

    /// Users need to verify their email address before logging in.
    pub verify: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            disable_local_strategy: false,
            max_login_attempts: 5,
            verify: false,
        }
    }
}

/// Versioning settings of a collection or global.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Documents can be saved as drafts which may miss required values.
    pub drafts: bool,

    /// Maximum number of versions kept per document, zero keeps all.
    #[serde(rename = "maxPerDoc")]
    pub max_per_doc: u32,
}

/// GraphQL settings of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionGraphQL {
    /// Exposes the collection on the GraphQL API, true by default.
    pub enabled: bool,

    /// Overrides the singular name derived from the slug.
    #[serde(rename = "singularName", skip_serializing_if = "Option::is_none")]
    pub singular_name: Option<String>,

    /// Overrides the plural name derived from the slug.
    #[serde(rename = "pluralName", skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
}

impl Default for CollectionGraphQL {
    fn default() -> Self {
        Self {
            enabled: true,
            singular_name: None,
            plural_name: None,
        }
    }
}

/// GraphQL settings of a global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalGraphQL {
    /// Exposes the global on the GraphQL API, true by default.
    pub enabled: bool,

    /// Overrides the name derived from the slug.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for GlobalGraphQL {
    fn default() -> Self {
        Self {
            enabled: true,
            name: None,
        }
    }
}

fn default_true() -> bool {
    true
}
