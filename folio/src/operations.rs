// SPDX-License-Identifier: AGPL-3.0-or-later

//! Resolver bindings of generated root fields.
//!
//! The schema does not implement any operation itself. Every generated query and mutation is
//! bound to an [`Operation`] and handed to the [`OperationHandler`] which was supplied when the
//! schema got built, together with the entity it targets and its raw arguments.
use std::fmt::{self, Display};
use std::sync::Arc;

use async_graphql::indexmap::IndexMap;
use async_graphql::{Name, Value};
use async_trait::async_trait;

use crate::errors::OperationError;

/// Operations a root field can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Paginated list of documents, or the document of a global.
    Find,
    /// Single document by id.
    FindById,
    /// Create a document.
    Create,
    /// Update a document, or the document of a global.
    Update,
    /// Delete a document.
    Delete,
    /// Permissions of the current user on a single document.
    DocAccess,
    /// Permissions of the current user on all collections and globals.
    Access,
    /// Log in with email and password.
    Login,
    /// End the current session.
    Logout,
    /// Issue a fresh session token.
    Refresh,
    /// Send a password reset email.
    ForgotPassword,
    /// Set a new password using a reset token.
    ResetPassword,
    /// Confirm an email address using a verification token.
    VerifyEmail,
    /// Unlock an account locked after too many failed logins.
    Unlock,
    /// Currently logged in user.
    Me,
    /// Check if a first user was registered.
    Init,
    /// Single version by id.
    FindVersionById,
    /// Paginated list of versions.
    FindVersions,
    /// Restore a document from one of its versions.
    RestoreVersion,
}

impl Operation {
    /// Identifier of this operation, used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Find => "find",
            Operation::FindById => "findByID",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::DocAccess => "docAccess",
            Operation::Access => "access",
            Operation::Login => "login",
            Operation::Logout => "logout",
            Operation::Refresh => "refresh",
            Operation::ForgotPassword => "forgotPassword",
            Operation::ResetPassword => "resetPassword",
            Operation::VerifyEmail => "verifyEmail",
            Operation::Unlock => "unlock",
            Operation::Me => "me",
            Operation::Init => "init",
            Operation::FindVersionById => "findVersionByID",
            Operation::FindVersions => "findVersions",
            Operation::RestoreVersion => "restoreVersion",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of entity an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Collection of documents.
    Collection,
    /// Single global document.
    Global,
}

/// Collection or global an operation targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// Slug of the collection or global.
    pub slug: String,

    /// Collection or global.
    pub kind: EntityKind,
}

impl EntityRef {
    /// Reference to a collection.
    pub fn collection(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            kind: EntityKind::Collection,
        }
    }

    /// Reference to a global.
    pub fn global(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            kind: EntityKind::Global,
        }
    }
}

/// Credentials sent along with a request, forwarded untouched to the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAuth {
    /// Value of the `Authorization` header.
    pub authorization: String,
}

impl RequestAuth {
    /// Returns credentials from an `Authorization` header value.
    pub fn new(authorization: &str) -> Self {
        Self {
            authorization: authorization.to_string(),
        }
    }

    /// Returns the token of a bearer or JWT authorization scheme.
    pub fn token(&self) -> Option<&str> {
        let mut parts = self.authorization.splitn(2, ' ');
        match (parts.next(), parts.next()) {
            (Some(scheme), Some(token))
                if scheme.eq_ignore_ascii_case("bearer") || scheme.eq_ignore_ascii_case("jwt") =>
            {
                Some(token.trim())
            }
            _ => None,
        }
    }
}

/// Invocation of a generated root field.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    /// Bound operation.
    pub operation: Operation,

    /// Targeted collection or global, `None` for operations spanning all entities.
    pub entity: Option<EntityRef>,

    /// Arguments of the field as sent by the client, enum values converted to strings.
    pub arguments: IndexMap<Name, Value>,

    /// Credentials of the request, if any.
    pub auth: Option<RequestAuth>,
}

impl OperationRequest {
    /// Returns an argument by name, treating `null` like a missing argument.
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments
            .get(name)
            .filter(|value| !matches!(value, Value::Null))
    }
}

/// Implements the operations bound to generated root fields.
///
/// Returned values are shaped like the GraphQL type of the field: documents as objects keyed by
/// field name, lists as lists and scalars as scalars. Select values are returned as stored.
#[async_trait]
pub trait OperationHandler: Send + Sync {
    /// Executes a single operation.
    async fn handle(&self, request: OperationRequest) -> Result<Value, OperationError>;
}

/// Operation handler shared by all resolvers of a schema.
pub type SharedOperationHandler = Arc<dyn OperationHandler>;

#[cfg(test)]
mod tests {
    use async_graphql::indexmap::IndexMap;
    use async_graphql::{Name, Value};
    use rstest::rstest;

    use super::{EntityRef, Operation, OperationRequest, RequestAuth};

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("JWT abc", Some("abc"))]
    #[case("bearer  abc ", Some("abc"))]
    #[case("Basic abc", None)]
    #[case("abc", None)]
    fn auth_token(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(RequestAuth::new(header).token(), expected);
    }

    #[test]
    fn null_arguments_are_missing() {
        let mut arguments = IndexMap::new();
        arguments.insert(Name::new("id"), Value::Null);
        arguments.insert(Name::new("draft"), Value::Boolean(true));

        let request = OperationRequest {
            operation: Operation::FindById,
            entity: Some(EntityRef::collection("posts")),
            arguments,
            auth: None,
        };

        assert!(request.argument("id").is_none());
        assert_eq!(request.argument("draft"), Some(&Value::Boolean(true)));
    }
}
