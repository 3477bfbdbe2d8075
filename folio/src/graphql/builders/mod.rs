// SPDX-License-Identifier: AGPL-3.0-or-later

//! Builders deriving types of the type graph from field trees.
mod context;
mod enums;
mod filter;
mod input;
mod locale;
mod object;
mod paginated;
mod policies;

pub use context::{BuildContext, RelationTarget};
pub use filter::build_where_input;
pub use input::build_mutation_input;
pub use locale::build_locale_types;
pub use object::build_object_type;
pub use paginated::build_paginated_type;
pub use policies::{
    build_access_type, build_policy_type, collection_policy_operations, global_policy_operations,
};

use crate::fields::{find_field, Field, FieldKind};
use crate::graphql::constants::ID_FIELD;

/// Name of the block label field every block entry carries.
const BLOCK_NAME_FIELD: &str = "blockName";

/// Adds the identifier every array row carries, unless the row declares its own.
pub fn with_row_id(fields: &[Field]) -> Vec<Field> {
    let mut fields = fields.to_vec();
    if find_field(&fields, ID_FIELD).is_none() {
        fields.push(Field::new(ID_FIELD, FieldKind::Text));
    }
    fields
}

/// Adds the identifier and label every block entry carries.
pub fn with_block_fields(fields: &[Field]) -> Vec<Field> {
    let mut fields = with_row_id(fields);
    if find_field(&fields, BLOCK_NAME_FIELD).is_none() {
        fields.push(Field::new(BLOCK_NAME_FIELD, FieldKind::Text));
    }
    fields
}
