// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashMap;

use crate::adapter::IdType;
use crate::config::Configuration;
use crate::fields::{Block, Field};
use crate::graphql::constants::{
    FALLBACK_LOCALE_ARG, FALLBACK_LOCALE_INPUT_TYPE, LOCALE_ARG, LOCALE_INPUT_TYPE,
};
use crate::graphql::types::{Argument, GqlType};

/// What builders need to know about a relationship target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationTarget {
    /// Slug of the collection.
    pub slug: String,

    /// Name of the document type, `None` if the collection is not exposed on the API.
    pub type_name: Option<String>,

    /// Identifier type of documents in this collection.
    pub id_type: IdType,
}

/// Read-only state shared by all builders of one schema build.
#[derive(Debug)]
pub struct BuildContext<'a> {
    config: &'a Configuration,
    targets: HashMap<String, RelationTarget>,
    blocks: HashMap<&'a str, &'a Block>,
}

impl<'a> BuildContext<'a> {
    /// Returns a context for the given configuration and relationship targets.
    pub fn new(config: &'a Configuration, targets: Vec<RelationTarget>) -> Self {
        let blocks = config
            .blocks
            .iter()
            .map(|block| (block.slug.as_str(), block))
            .collect();

        let targets = targets
            .into_iter()
            .map(|target| (target.slug.clone(), target))
            .collect();

        Self {
            config,
            targets,
            blocks,
        }
    }

    /// Configuration the schema is derived from.
    pub fn config(&self) -> &'a Configuration {
        self.config
    }

    /// Returns true if documents can be stored in several locales.
    pub fn localization(&self) -> bool {
        self.config.localization.is_some()
    }

    /// Returns a relationship target by collection slug.
    pub fn target(&self, slug: &str) -> Option<&RelationTarget> {
        self.targets.get(slug)
    }

    /// Returns a block of the shared block library.
    pub fn block(&self, slug: &str) -> Option<&'a Block> {
        self.blocks.get(slug).copied()
    }

    /// Returns true if the output value of a field can not be null.
    ///
    /// Localized fields might miss a value in the requested locale, drafts might miss any value.
    pub fn output_required(&self, field: &Field, force_nullable: bool) -> bool {
        field.required && !force_nullable && !self.is_localized(field)
    }

    /// Returns true if a value for this field has to be passed in mutation inputs.
    pub fn input_required(&self, field: &Field, partial: bool) -> bool {
        field.required && !partial && !self.is_localized(field)
    }

    /// Returns true if the field is localized and localization is enabled.
    pub fn is_localized(&self, field: &Field) -> bool {
        field.localized && self.localization()
    }

    /// Locale arguments of read operations.
    pub fn read_locale_args(&self) -> Vec<Argument> {
        if !self.localization() {
            return Vec::new();
        }

        vec![
            Argument::new(LOCALE_ARG, GqlType::named(LOCALE_INPUT_TYPE)),
            Argument::new(
                FALLBACK_LOCALE_ARG,
                GqlType::named(FALLBACK_LOCALE_INPUT_TYPE),
            ),
        ]
    }

    /// Locale arguments of write operations.
    pub fn write_locale_args(&self) -> Vec<Argument> {
        if !self.localization() {
            return Vec::new();
        }

        vec![Argument::new(LOCALE_ARG, GqlType::named(LOCALE_INPUT_TYPE))]
    }
}
