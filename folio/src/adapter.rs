// SPDX-License-Identifier: AGPL-3.0-or-later

//! Capabilities the schema derivation needs from the storage layer.
use std::fmt::Debug;

use async_graphql::dynamic::TypeRef;
use serde::{Deserialize, Serialize};

use crate::fields::{find_field, Field, FieldKind};

/// Scalar type of document identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdType {
    /// String identifiers, for example object ids of document databases.
    Text,

    /// Integer identifiers, for example serial primary keys.
    Number,
}

impl IdType {
    /// Name of the GraphQL scalar representing identifiers of this type.
    pub fn scalar(&self) -> &'static str {
        match self {
            IdType::Text => TypeRef::STRING,
            IdType::Number => TypeRef::INT,
        }
    }
}

impl Default for IdType {
    fn default() -> Self {
        IdType::Text
    }
}

/// Storage adapter as seen by the schema builder.
///
/// Only the identifier type is asked for: the builder never touches stored documents.
pub trait DatabaseAdapter: Debug + Send + Sync {
    /// Identifier type of documents in collections without their own `id` field.
    fn default_id_type(&self) -> IdType;

    /// Identifier type of documents in a collection with the given field tree.
    ///
    /// Collections declaring their own `id` field use its type.
    fn collection_id_type(&self, fields: &[Field]) -> IdType {
        match find_field(fields, "id").map(|field| &field.kind) {
            Some(FieldKind::Number { .. }) => IdType::Number,
            Some(_) => IdType::Text,
            None => self.default_id_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::fields::{Field, FieldKind};
    use crate::test_utils::TestAdapter;

    use super::{DatabaseAdapter, IdType};

    #[test]
    fn custom_id_field_wins() {
        let adapter = TestAdapter(IdType::Text);
        assert_eq!(adapter.collection_id_type(&[]), IdType::Text);
        assert_eq!(
            adapter.collection_id_type(&[Field::new("id", FieldKind::Number { has_many: false })]),
            IdType::Number
        );

        let adapter = TestAdapter(IdType::Number);
        assert_eq!(adapter.collection_id_type(&[]), IdType::Number);
        assert_eq!(
            adapter.collection_id_type(&[Field::new("id", FieldKind::Text)]),
            IdType::Text
        );
    }
}
