// SPDX-License-Identifier: AGPL-3.0-or-later

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::Extension;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{self, IntoResponse, Response};
use http::header;
use log::warn;

use crate::http::context::HttpServiceContext;
use crate::http::service::GRAPHQL_ROUTE;
use crate::operations::RequestAuth;

/// Handle GraphQL playground requests, unless the playground is disabled.
pub async fn handle_graphql_playground(
    Extension(context): Extension<HttpServiceContext>,
) -> Response {
    if context.config.disable_playground {
        return StatusCode::NOT_FOUND.into_response();
    }

    response::Html(playground_source(GraphQLPlaygroundConfig::new(GRAPHQL_ROUTE))).into_response()
}

/// Handle GraphQL requests.
///
/// The `Authorization` header is passed on to the operation handler.
pub async fn handle_graphql_query(
    Extension(context): Extension<HttpServiceContext>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(value) = headers.get(header::AUTHORIZATION) {
        match value.to_str() {
            Ok(authorization) => request = request.data(RequestAuth::new(authorization)),
            Err(_) => warn!("Ignore authorization header with invalid characters"),
        }
    }

    context.schema.execute(request).await.into()
}
