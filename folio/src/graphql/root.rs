// SPDX-License-Identifier: AGPL-3.0-or-later

use async_graphql::indexmap::IndexMap;
use log::warn;

use crate::errors::SchemaError;
use crate::graphql::types::{ObjectType, OutputField};

/// Fields of a root object (`Query` or `Mutation`), collected while deriving the schema.
#[derive(Debug)]
pub struct RootFields {
    name: String,
    fields: IndexMap<String, OutputField>,
}

impl RootFields {
    /// Returns an empty root object with the given type name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: IndexMap::new(),
        }
    }

    /// Name of the root object type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a generated field.
    ///
    /// Generated fields may never replace each other, a second field with the same name is a
    /// configuration error.
    pub fn insert(&mut self, field: OutputField) -> Result<(), SchemaError> {
        if self.fields.contains_key(&field.name) {
            return Err(SchemaError::DuplicateOperation {
                root: self.name.clone(),
                name: field.name,
            });
        }

        self.fields.insert(field.name.clone(), field);
        Ok(())
    }

    /// Adds a custom field, replacing a field with the same name if there is one.
    ///
    /// Returns true if an existing field got replaced.
    pub fn merge(&mut self, field: OutputField) -> bool {
        let replaced = self.fields.contains_key(&field.name);
        if replaced {
            warn!(
                "Custom {} field '{}' replaces a generated field with the same name",
                self.name, field.name
            );
        }

        self.fields.insert(field.name.clone(), field);
        replaced
    }

    /// Returns a field by name.
    pub fn get(&self, name: &str) -> Option<&OutputField> {
        self.fields.get(name)
    }

    /// Returns true if a field with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the names of all fields in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Returns all fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &OutputField> {
        self.fields.values()
    }

    /// Returns true if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the root object type.
    pub fn to_object(&self) -> ObjectType {
        ObjectType::new(&self.name, self.fields.values().cloned().collect())
    }
}
