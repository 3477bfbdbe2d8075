// SPDX-License-Identifier: AGPL-3.0-or-later

//! Cache of named types built during one schema build.
use std::sync::Arc;

use async_graphql::indexmap::IndexMap;
use log::trace;

use crate::errors::SchemaError;
use crate::graphql::types::{EnumType, InputObjectType, NamedType, ObjectType, UnionType};

#[derive(Debug)]
enum Slot {
    /// Name is reserved while the type is being built.
    Pending,

    /// Type is built.
    Ready(NamedType),
}

#[derive(Debug)]
struct Entry {
    slot: Slot,

    /// Strict entries are owned by exactly one collection, global or root operation and may not
    /// be requested by anyone else.
    strict: bool,
}

/// Named types of one schema build, keyed by type name.
///
/// Nested shapes (groups, arrays, blocks, enums, polymorphic relationships) are requested with
/// [`TypeRegistry::get_or_build`]: the first request builds the type, every later request with
/// the same name reuses it. The name is reserved before the type is built, which terminates
/// self-referencing shapes.
///
/// Top-level types of collections and globals are added with [`TypeRegistry::insert`] and must
/// have unique names.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: IndexMap<String, Entry>,
}

impl TypeRegistry {
    /// Returns an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a type with this name is built or being built.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns a built type.
    pub fn get(&self, name: &str) -> Option<&NamedType> {
        match self.entries.get(name) {
            Some(Entry {
                slot: Slot::Ready(ty),
                ..
            }) => Some(ty),
            _ => None,
        }
    }

    /// Returns a built object type.
    pub fn object(&self, name: &str) -> Option<Arc<ObjectType>> {
        match self.get(name) {
            Some(NamedType::Object(object)) => Some(object.clone()),
            _ => None,
        }
    }

    /// Returns a built input object type.
    pub fn input(&self, name: &str) -> Option<Arc<InputObjectType>> {
        match self.get(name) {
            Some(NamedType::Input(input)) => Some(input.clone()),
            _ => None,
        }
    }

    /// Returns a built union type.
    pub fn union(&self, name: &str) -> Option<Arc<UnionType>> {
        match self.get(name) {
            Some(NamedType::Union(union)) => Some(union.clone()),
            _ => None,
        }
    }

    /// Returns a built enum type.
    pub fn enumeration(&self, name: &str) -> Option<Arc<EnumType>> {
        match self.get(name) {
            Some(NamedType::Enum(enumeration)) => Some(enumeration.clone()),
            _ => None,
        }
    }

    /// Builds a shared type unless a type with this name exists or is being built already.
    ///
    /// Returns the name of the type. Fails if the name belongs to a strict type.
    pub fn get_or_build<F>(&mut self, name: &str, build: F) -> Result<String, SchemaError>
    where
        F: FnOnce(&mut TypeRegistry) -> Result<NamedType, SchemaError>,
    {
        if let Some(entry) = self.entries.get(name) {
            if entry.strict {
                return Err(SchemaError::TypeCollision(name.to_string()));
            }

            trace!("Reuse type {}", name);
            return Ok(name.to_string());
        }

        self.entries.insert(
            name.to_string(),
            Entry {
                slot: Slot::Pending,
                strict: false,
            },
        );

        match build(self) {
            Ok(ty) => {
                trace!("Built type {}", name);
                self.finalize(name, ty, false)?;
                Ok(name.to_string())
            }
            Err(err) => {
                self.entries.shift_remove(name);
                Err(err)
            }
        }
    }

    /// Reserves a name for a type owned by one collection, global or root operation.
    ///
    /// Fails if the name is taken already.
    pub fn reserve(&mut self, name: &str) -> Result<(), SchemaError> {
        if self.entries.contains_key(name) {
            return Err(SchemaError::TypeCollision(name.to_string()));
        }

        self.entries.insert(
            name.to_string(),
            Entry {
                slot: Slot::Pending,
                strict: true,
            },
        );

        Ok(())
    }

    /// Adds a type owned by one collection, global or root operation.
    ///
    /// Fails if a different type with this name exists already. A name reserved with
    /// [`TypeRegistry::reserve`] can be filled exactly once.
    pub fn insert(&mut self, ty: impl Into<NamedType>) -> Result<(), SchemaError> {
        let ty = ty.into();
        let name = ty.name().to_string();

        match self.entries.get(&name) {
            Some(Entry {
                slot: Slot::Pending,
                strict: true,
            }) => (),
            Some(_) => return Err(SchemaError::TypeCollision(name)),
            None => (),
        }

        self.finalize(&name, ty, true)
    }

    /// Returns all built types in the order they were requested.
    pub fn types(&self) -> impl Iterator<Item = &NamedType> {
        self.entries.values().filter_map(|entry| match &entry.slot {
            Slot::Ready(ty) => Some(ty),
            Slot::Pending => None,
        })
    }

    /// Returns the names of reserved types which were never built.
    pub fn pending(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, entry)| matches!(entry.slot, Slot::Pending))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of built types.
    pub fn len(&self) -> usize {
        self.types().count()
    }

    /// Returns true if no type was built.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn finalize(&mut self, name: &str, ty: NamedType, strict: bool) -> Result<(), SchemaError> {
        if ty.name() != name {
            return Err(SchemaError::TypeCollision(ty.name().to_string()));
        }

        self.entries.insert(
            name.to_string(),
            Entry {
                slot: Slot::Ready(ty),
                strict,
            },
        );

        Ok(())
    }
}
