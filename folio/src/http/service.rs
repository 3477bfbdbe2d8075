// SPDX-License-Identifier: AGPL-3.0-or-later

use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Result;
use axum::extract::Extension;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use log::{debug, info};
use tower_http::cors::{Any, CorsLayer};

use crate::http::api::{handle_graphql_playground, handle_graphql_query};
use crate::http::context::HttpServiceContext;

/// Route to the GraphQL API and playground.
pub const GRAPHQL_ROUTE: &str = "/graphql";

/// Build HTTP server with GraphQL API.
pub fn build_server(http_context: HttpServiceContext) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(false)
        .allow_origin(Any);

    Router::new()
        // Add GraphQL routes
        .route(
            GRAPHQL_ROUTE,
            get(handle_graphql_playground).post(handle_graphql_query),
        )
        // Add middlewares
        .layer(cors)
        // Add shared context
        .layer(Extension(http_context))
}

/// Start HTTP server, running until `signal` resolves.
pub async fn http_service<F>(http_context: HttpServiceContext, http_port: u16, signal: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let http_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), http_port);

    info!(
        "GraphQL API available at http://{}{}",
        http_address, GRAPHQL_ROUTE
    );

    axum::Server::try_bind(&http_address)?
        .serve(build_server(http_context).into_make_service())
        .with_graceful_shutdown(async {
            debug!("HTTP service is ready");
            signal.await;
            debug!("HTTP service is shutting down");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_graphql::value;
    use http::header::{AUTHORIZATION, CONTENT_TYPE};
    use http::StatusCode;
    use rstest::rstest;
    use serde_json::json;

    use crate::config::Configuration;
    use crate::operations::{Operation, RequestAuth};
    use crate::test_utils::{blog_config, http_test_client, RecordingHandler};

    #[rstest]
    #[tokio::test]
    async fn graphql_endpoint(blog_config: Configuration) {
        let client = http_test_client(blog_config, Arc::new(RecordingHandler::new()));

        let response = client.query("{ __schema { __typename } }").send().await;

        assert_eq!(
            response.text().await,
            json!({
                "data": {
                    "__schema": {
                        "__typename": "__Schema"
                    }
                }
            })
            .to_string()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn forwards_authorization(blog_config: Configuration) {
        let handler = Arc::new(
            RecordingHandler::new().respond(Operation::Me, value!({ "token": "abc", "exp": 60 })),
        );
        let client = http_test_client(blog_config, handler.clone());

        let response = client
            .query("{ meUser { token exp } }")
            .header(AUTHORIZATION, "JWT abc")
            .send()
            .await;

        assert_eq!(
            response.json().await,
            json!({ "data": { "meUser": { "token": "abc", "exp": 60 } } })
        );

        let requests = handler.requests();
        assert_eq!(requests[0].auth, Some(RequestAuth::new("JWT abc")));
        assert_eq!(requests[0].auth.as_ref().unwrap().token(), Some("abc"));
    }

    #[rstest]
    #[case(false, StatusCode::OK)]
    #[case(true, StatusCode::NOT_FOUND)]
    #[tokio::test]
    async fn playground(
        mut blog_config: Configuration,
        #[case] disable_playground: bool,
        #[case] expected: StatusCode,
    ) {
        blog_config.graphql.disable_playground = disable_playground;
        let client = http_test_client(blog_config, Arc::new(RecordingHandler::new()));

        let response = client.get("/graphql").send().await;
        assert_eq!(response.status(), expected);

        if !disable_playground {
            let content_type = response.headers().get(CONTENT_TYPE).unwrap();
            assert!(content_type.to_str().unwrap().starts_with("text/html"));
        }
    }
}
