// SPDX-License-Identifier: AGPL-3.0-or-later

mod operators;

pub use operators::{
    BooleanOperator, DateOperator, JsonOperator, NumberOperator, PointOperator, RelationOperator,
    TextOperator,
};
