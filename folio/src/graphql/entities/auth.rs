// SPDX-License-Identifier: AGPL-3.0-or-later

//! Session and account operations of auth collections.
use async_graphql::dynamic::TypeRef;

use crate::collections::sanitize::EMAIL_FIELD;
use crate::errors::SchemaError;
use crate::fields::{flatten_fields, Field, FieldKind};
use crate::graphql::builders::{build_object_type, BuildContext};
use crate::graphql::constants::{COLLECTION_FIELD, PASSWORD_FIELD};
use crate::graphql::entities::collection::CollectionEntity;
use crate::graphql::entities::GraphParts;
use crate::graphql::naming::format_name;
use crate::graphql::types::{GqlType, ObjectType, OutputField};
use crate::operations::Operation;

const TOKEN: &str = "token";
const EXP: &str = "exp";
const USER: &str = "user";

/// Adds the session type and the account operations of an auth collection.
///
/// Session operations are always available, password based ones only with the local strategy.
pub fn register_auth(
    ctx: &BuildContext,
    parts: &mut GraphParts,
    collection: &CollectionEntity,
) -> Result<(), SchemaError> {
    let config = &collection.config;
    let singular = &collection.names.singular;
    let entity = Some(collection.entity_ref());
    let local_strategy = config.local_strategy();

    let jwt = format_name(&format!("{}JWT", config.slug));
    let mut jwt_fields: Vec<Field> = flatten_fields(&config.fields, singular)?
        .into_iter()
        .filter(|field| field.save_to_jwt)
        .collect();

    let mut synthetic = Vec::new();
    if local_strategy {
        synthetic.push(Field::new(EMAIL_FIELD, FieldKind::Email).required());
    }
    synthetic.push(Field::new(COLLECTION_FIELD, FieldKind::Text).required());

    for field in synthetic {
        if !jwt_fields.iter().any(|existing| existing.name() == field.name()) {
            jwt_fields.push(field);
        }
    }

    build_object_type(ctx, &mut parts.registry, &jwt, &jwt_fields, vec![], false)?;

    let string = || GqlType::named(TypeRef::STRING);
    let int = || GqlType::named(TypeRef::INT);

    // Session
    let me = format_name(&format!("{}Me", config.slug));
    parts.registry.insert(ObjectType::new(
        &me,
        vec![
            OutputField::new(COLLECTION_FIELD, string()),
            OutputField::new(EXP, int()),
            OutputField::new(TOKEN, string()),
            OutputField::new(USER, GqlType::named(singular)),
        ],
    ))?;

    parts.query.insert(
        OutputField::new(&format!("me{singular}"), GqlType::named(&me))
            .operation(Operation::Me, entity.clone()),
    )?;

    parts.query.insert(
        OutputField::new(
            &format!("initialized{singular}"),
            GqlType::named(TypeRef::BOOLEAN),
        )
        .operation(Operation::Init, entity.clone()),
    )?;

    let refreshed = format_name(&format!("{}Refreshed{singular}", config.slug));
    parts.registry.insert(ObjectType::new(
        &refreshed,
        vec![
            OutputField::new(EXP, int()),
            OutputField::new("refreshedToken", string()),
            OutputField::new(USER, GqlType::named(&jwt)),
        ],
    ))?;

    parts.mutation.insert(
        OutputField::new(
            &format!("refreshToken{singular}"),
            GqlType::named(&refreshed),
        )
        .argument(TOKEN, string())
        .operation(Operation::Refresh, entity.clone()),
    )?;

    parts.mutation.insert(
        OutputField::new(&format!("logout{singular}"), string())
            .operation(Operation::Logout, entity.clone()),
    )?;

    if !local_strategy {
        return Ok(());
    }

    // Email and password
    let max_login_attempts = config
        .auth
        .as_ref()
        .map(|auth| auth.max_login_attempts)
        .unwrap_or_default();

    if max_login_attempts > 0 {
        parts.mutation.insert(
            OutputField::new(
                &format!("unlock{singular}"),
                GqlType::named_nn(TypeRef::BOOLEAN),
            )
            .argument(EMAIL_FIELD, GqlType::named_nn(TypeRef::STRING))
            .operation(Operation::Unlock, entity.clone()),
        )?;
    }

    let login_result = format_name(&format!("{}LoginResult", config.slug));
    parts.registry.insert(ObjectType::new(
        &login_result,
        vec![
            OutputField::new(EXP, int()),
            OutputField::new(TOKEN, string()),
            OutputField::new(USER, GqlType::named(singular)),
        ],
    ))?;

    parts.mutation.insert(
        OutputField::new(&format!("login{singular}"), GqlType::named(&login_result))
            .argument(EMAIL_FIELD, string())
            .argument(PASSWORD_FIELD, string())
            .operation(Operation::Login, entity.clone()),
    )?;

    parts.mutation.insert(
        OutputField::new(
            &format!("forgotPassword{singular}"),
            GqlType::named_nn(TypeRef::BOOLEAN),
        )
        .argument("disableEmail", GqlType::named(TypeRef::BOOLEAN))
        .argument(EMAIL_FIELD, GqlType::named_nn(TypeRef::STRING))
        .argument("expiration", int())
        .operation(Operation::ForgotPassword, entity.clone()),
    )?;

    let reset_password = format_name(&format!("{}ResetPassword", config.slug));
    parts.registry.insert(ObjectType::new(
        &reset_password,
        vec![
            OutputField::new(TOKEN, string()),
            OutputField::new(USER, GqlType::named(singular)),
        ],
    ))?;

    parts.mutation.insert(
        OutputField::new(
            &format!("resetPassword{singular}"),
            GqlType::named(&reset_password),
        )
        .argument(PASSWORD_FIELD, string())
        .argument(TOKEN, string())
        .operation(Operation::ResetPassword, entity.clone()),
    )?;

    parts.mutation.insert(
        OutputField::new(
            &format!("verifyEmail{singular}"),
            GqlType::named(TypeRef::BOOLEAN),
        )
        .argument(TOKEN, string())
        .operation(Operation::VerifyEmail, entity),
    )?;

    Ok(())
}
