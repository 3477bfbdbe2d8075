// SPDX-License-Identifier: AGPL-3.0-or-later

//! String identifiers for GraphQL types and scalars registered to the root schema as well as fixed
//! field and argument names.

// Type and scalar identifiers.

/// Name of the root query object.
pub const QUERY: &str = "Query";

/// Name of the root mutation object.
pub const MUTATION: &str = "Mutation";

/// GraphQL scalar representing arbitrary JSON values.
pub const JSON_SCALAR: &str = "JSON";

/// GraphQL scalar representing dates as ISO 8601 strings.
pub const DATE_TIME_SCALAR: &str = "DateTime";

/// GraphQL enum of all configured locales plus `all`.
pub const LOCALE_INPUT_TYPE: &str = "LocaleInputType";

/// GraphQL enum of all configured locales plus `none`.
pub const FALLBACK_LOCALE_INPUT_TYPE: &str = "FallbackLocaleInputType";

/// GraphQL object returned by the root access query.
pub const ACCESS_TYPE: &str = "Access";

/// GraphQL object describing a single permission.
pub const PERMISSION_TYPE: &str = "Permission";

/// Filter input type for string values.
pub const TEXT_OPERATOR: &str = "TextOperator";

/// Filter input type for number values.
pub const NUMBER_OPERATOR: &str = "NumberOperator";

/// Filter input type for date values.
pub const DATE_OPERATOR: &str = "DateOperator";

/// Filter input type for boolean values.
pub const BOOLEAN_OPERATOR: &str = "BooleanOperator";

/// Filter input type for relationship and upload values.
pub const RELATION_OPERATOR: &str = "RelationOperator";

/// Filter input type for JSON and rich text values.
pub const JSON_OPERATOR: &str = "JsonOperator";

/// Filter input type for point values.
pub const POINT_OPERATOR: &str = "PointOperator";

// Field and argument names and pre-/suffixes.

/// Root query returning the permissions of the current user.
pub const ACCESS_QUERY: &str = "Access";

/// Field of the access object telling if the current user may use the admin panel.
pub const CAN_ACCESS_ADMIN_FIELD: &str = "canAccessAdmin";

/// Synthetic identifier field.
pub const ID_FIELD: &str = "id";

/// Discriminator of block entries.
pub const BLOCK_TYPE_FIELD: &str = "blockType";

/// Field of polymorphic relationship values naming the target collection.
pub const RELATION_TO_FIELD: &str = "relationTo";

/// Field of polymorphic relationship values holding the related document.
pub const VALUE_FIELD: &str = "value";

/// Password field added to create inputs of auth collections.
pub const PASSWORD_FIELD: &str = "password";

/// Field of session tokens naming the collection of the user.
pub const COLLECTION_FIELD: &str = "collection";

/// Argument string used for passing a document id into a query.
pub const ID_ARG: &str = "id";

/// Argument string used for passing document data into a mutation.
pub const DATA_ARG: &str = "data";

/// Argument string used to read or write drafts.
pub const DRAFT_ARG: &str = "draft";

/// Argument string used to mark an update as autosave.
pub const AUTOSAVE_ARG: &str = "autosave";

/// Argument string used for passing a filter into a query.
pub const WHERE_ARG: &str = "where";

/// Argument string used for passing the requested locale.
pub const LOCALE_ARG: &str = "locale";

/// Argument string used for passing the fallback locale.
pub const FALLBACK_LOCALE_ARG: &str = "fallbackLocale";

/// Argument string used for passing the page size.
pub const LIMIT_ARG: &str = "limit";

/// Argument string used for passing the requested page.
pub const PAGE_ARG: &str = "page";

/// Argument string used for passing the sort order.
pub const SORT_ARG: &str = "sort";

/// Suffix of filter input types.
pub const WHERE_SUFFIX: &str = "_where";

/// Separator of nested field paths in filter input types.
pub const PATH_SEPARATOR: &str = "__";

/// Suffix of block object types.
pub const BLOCK_SUFFIX: &str = "Block";

/// Complexity estimate of relationship and upload fields without an explicit one.
pub const RELATION_COMPLEXITY: usize = 10;

/// Complexity estimate of all other fields.
pub const DEFAULT_COMPLEXITY: usize = 1;
