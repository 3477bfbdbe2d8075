// SPDX-License-Identifier: AGPL-3.0-or-later

//! Field trees describing the shape of stored documents.
mod field;
mod traverse;

pub use field::{Block, Field, FieldKind, RelationTo, SelectOption, Tab};
pub use traverse::{find_field, flatten_fields, has_id_field};
