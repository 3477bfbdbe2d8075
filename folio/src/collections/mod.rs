// SPDX-License-Identifier: AGPL-3.0-or-later

//! Collections and globals of the content model.
mod config;
pub mod sanitize;
pub mod versions;

pub use config::{
    AuthConfig, CollectionConfig, CollectionGraphQL, GlobalConfig, GlobalGraphQL, VersionsConfig,
};
pub use sanitize::{sanitize_collection, sanitize_global};
