// SPDX-License-Identifier: AGPL-3.0-or-later

use async_graphql::ErrorExtensions;

/// Configuration errors detected while deriving the GraphQL schema.
///
/// All of them are fatal: a server must not start with an inconsistent schema.
#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    /// Name can not be used as a GraphQL identifier.
    #[error("'{0}' is not a valid GraphQL name")]
    InvalidName(String),

    /// A data field was declared without a name.
    #[error("field of type '{kind}' in '{parent}' is missing a name")]
    MissingFieldName { parent: String, kind: String },

    /// Two fields with the same name on one nesting level.
    #[error("duplicate field '{field}' in '{parent}'")]
    DuplicateField { parent: String, field: String },

    /// Two collections or globals were configured with the same slug.
    #[error("slug '{0}' is used more than once")]
    DuplicateSlug(String),

    /// Collection or global resolves to a GraphQL name which is already taken.
    #[error("'{slug}' resolves to the name '{name}' which is already taken")]
    NameCollision { slug: String, name: String },

    /// Root query or mutation field generated twice.
    #[error("{root} field '{name}' is registered twice")]
    DuplicateOperation { root: String, name: String },

    /// Two differently owned types claim the same name.
    #[error("type '{0}' is defined more than once")]
    TypeCollision(String),

    /// Relationship or upload field points at a collection which does not exist.
    #[error("field '{field}' relates to unknown collection '{target}'")]
    UnknownRelation { field: String, target: String },

    /// Blocks field references a block which is not part of the block library.
    #[error("block '{0}' is not defined")]
    UnknownBlock(String),

    /// Union type without any members.
    #[error("union '{0}' has no members")]
    EmptyUnion(String),

    /// Finishing the dynamic schema failed.
    #[error(transparent)]
    Build(#[from] async_graphql::dynamic::SchemaError),
}

/// Errors returned by an `OperationHandler` while serving a single request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Access control denied the operation.
    #[error("You are not allowed to perform this action")]
    Forbidden,

    /// Operation requires an authenticated user.
    #[error("Unauthorized, you must be logged in to make this request")]
    Unauthorized,

    /// Requested document does not exist.
    #[error("The requested resource was not found")]
    NotFound,

    /// Arguments or submitted data were rejected.
    #[error("{0}")]
    Validation(String),

    /// Handler does not implement this operation.
    #[error("Operation '{0}' is not supported")]
    Unsupported(String),

    /// Storage layer or handler failure.
    #[error("{0}")]
    Internal(String),
}

impl OperationError {
    /// Machine readable error code exposed in the `code` extension of a GraphQL error.
    pub fn code(&self) -> &'static str {
        match self {
            OperationError::Forbidden => "FORBIDDEN",
            OperationError::Unauthorized => "UNAUTHORIZED",
            OperationError::NotFound => "NOT_FOUND",
            OperationError::Validation(_) => "VALIDATION_ERROR",
            OperationError::Unsupported(_) => "UNSUPPORTED",
            OperationError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for OperationError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, extensions| {
            extensions.set("code", self.code());
        })
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::ErrorExtensions;
    use serde_json::json;

    use super::OperationError;

    #[test]
    fn error_code_extension() {
        let error = OperationError::NotFound.extend();
        assert_eq!(error.message, "The requested resource was not found");

        let extensions = error.extensions.expect("extensions to be set");
        assert_eq!(
            serde_json::to_value(&extensions).unwrap(),
            json!({ "code": "NOT_FOUND" })
        );
    }
}
