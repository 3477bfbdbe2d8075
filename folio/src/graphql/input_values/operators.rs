// SPDX-License-Identifier: AGPL-3.0-or-later

//! GraphQL input objects used to specify filter conditions in `where` arguments.
//!
//! Every queryable field of a collection gets one of these operator objects, depending on the
//! kind of value it holds. How conditions are evaluated is up to the storage layer.
use dynamic_graphql::InputObject;

use crate::graphql::scalars::{DateTimeScalar, JsonScalar};

/// Filter conditions for string values.
#[derive(InputObject)]
#[allow(dead_code)]
pub struct TextOperator {
    /// Value is equal to.
    equals: Option<String>,

    /// Value is not equal to.
    #[graphql(name = "not_equals")]
    not_equals: Option<String>,

    /// Value matches all words, case insensitive.
    like: Option<String>,

    /// Value contains the given string, case insensitive.
    contains: Option<String>,

    /// Value is one of.
    #[graphql(name = "in")]
    is_in: Option<Vec<String>>,

    /// Value is none of.
    #[graphql(name = "not_in")]
    not_in: Option<Vec<String>>,

    /// List value contains all of.
    all: Option<Vec<String>>,

    /// Field has or has no value.
    exists: Option<bool>,
}

/// Filter conditions for number values.
#[derive(InputObject)]
#[allow(dead_code)]
pub struct NumberOperator {
    /// Value is equal to.
    equals: Option<f64>,

    /// Value is not equal to.
    #[graphql(name = "not_equals")]
    not_equals: Option<f64>,

    /// Value is greater than.
    #[graphql(name = "greater_than")]
    greater_than: Option<f64>,

    /// Value is greater than or equal to.
    #[graphql(name = "greater_than_equal")]
    greater_than_equal: Option<f64>,

    /// Value is less than.
    #[graphql(name = "less_than")]
    less_than: Option<f64>,

    /// Value is less than or equal to.
    #[graphql(name = "less_than_equal")]
    less_than_equal: Option<f64>,

    /// Value is one of.
    #[graphql(name = "in")]
    is_in: Option<Vec<f64>>,

    /// Value is none of.
    #[graphql(name = "not_in")]
    not_in: Option<Vec<f64>>,

    /// List value contains all of.
    all: Option<Vec<f64>>,

    /// Field has or has no value.
    exists: Option<bool>,
}

/// Filter conditions for date values.
#[derive(InputObject)]
#[allow(dead_code)]
pub struct DateOperator {
    /// Date is equal to.
    equals: Option<DateTimeScalar>,

    /// Date is not equal to.
    #[graphql(name = "not_equals")]
    not_equals: Option<DateTimeScalar>,

    /// Date is after.
    #[graphql(name = "greater_than")]
    greater_than: Option<DateTimeScalar>,

    /// Date is on or after.
    #[graphql(name = "greater_than_equal")]
    greater_than_equal: Option<DateTimeScalar>,

    /// Date is before.
    #[graphql(name = "less_than")]
    less_than: Option<DateTimeScalar>,

    /// Date is on or before.
    #[graphql(name = "less_than_equal")]
    less_than_equal: Option<DateTimeScalar>,

    /// Date string contains the given string.
    like: Option<String>,

    /// Field has or has no value.
    exists: Option<bool>,
}

/// Filter conditions for boolean values.
#[derive(InputObject)]
#[allow(dead_code)]
pub struct BooleanOperator {
    /// Value is equal to.
    equals: Option<bool>,

    /// Value is not equal to.
    #[graphql(name = "not_equals")]
    not_equals: Option<bool>,

    /// Field has or has no value.
    exists: Option<bool>,
}

/// Filter conditions for relationship and upload values.
///
/// Identifiers are passed as JSON as their type depends on the related collection.
#[derive(InputObject)]
#[allow(dead_code)]
pub struct RelationOperator {
    /// Relates to.
    equals: Option<JsonScalar>,

    /// Does not relate to.
    #[graphql(name = "not_equals")]
    not_equals: Option<JsonScalar>,

    /// Relates to one of.
    #[graphql(name = "in")]
    is_in: Option<Vec<JsonScalar>>,

    /// Relates to none of.
    #[graphql(name = "not_in")]
    not_in: Option<Vec<JsonScalar>>,

    /// Relates to all of.
    all: Option<Vec<JsonScalar>>,

    /// Field has or has no value.
    exists: Option<bool>,
}

/// Filter conditions for JSON and rich text values.
#[derive(InputObject)]
#[allow(dead_code)]
pub struct JsonOperator {
    /// Value is equal to.
    equals: Option<JsonScalar>,

    /// Serialized value matches all words, case insensitive.
    like: Option<String>,

    /// Serialized value contains the given string.
    contains: Option<String>,

    /// Field has or has no value.
    exists: Option<bool>,
}

/// Filter conditions for point values.
#[derive(InputObject)]
#[allow(dead_code)]
pub struct PointOperator {
    /// Point is equal to.
    equals: Option<Vec<f64>>,

    /// Point is not equal to.
    #[graphql(name = "not_equals")]
    not_equals: Option<Vec<f64>>,

    /// Point lies within a distance, formatted as `longitude, latitude, max distance, min distance`.
    near: Option<String>,

    /// Field has or has no value.
    exists: Option<bool>,
}
