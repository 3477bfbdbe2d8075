// SPDX-License-Identifier: AGPL-3.0-or-later

use std::convert::TryFrom;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};
use hyper::Server;
use serde_json::json;

use crate::adapter::IdType;
use crate::config::Configuration;
use crate::graphql::{GraphQLSchemaManager, SchemaBuilder};
use crate::http::{build_server, HttpServiceContext};
use crate::operations::SharedOperationHandler;
use crate::test_utils::TestAdapter;

const GRAPHQL_PATH: &str = "/graphql";

/// HTTP client talking to a folio server running on an ephemeral port.
pub struct TestClient {
    client: reqwest::Client,
    addr: SocketAddr,
}

impl TestClient {
    /// Serves the router in a background task.
    pub(crate) fn new(router: Router) -> Self {
        // Port zero lets the operating system pick a free one
        let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind ephemeral socket");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            Server::from_tcp(listener)
                .unwrap()
                .serve(router.into_make_service())
                .await
                .expect("Test server failed");
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        TestClient { client, addr }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        RequestBuilder {
            builder: self.client.get(self.url(path)),
        }
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        RequestBuilder {
            builder: self.client.post(self.url(path)),
        }
    }

    /// Posts a GraphQL query without variables to the GraphQL endpoint.
    pub(crate) fn query(&self, query: &str) -> RequestBuilder {
        self.post(GRAPHQL_PATH).json(&json!({ "query": query }))
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Serves the schema of `config` over HTTP, dispatching all operations to `handler`.
pub fn http_test_client(config: Configuration, handler: SharedOperationHandler) -> TestClient {
    let builder = SchemaBuilder::new(config.clone(), Arc::new(TestAdapter(IdType::Text)));
    let manager = GraphQLSchemaManager::new(builder, handler).expect("Invalid test configuration");

    TestClient::new(build_server(HttpServiceContext::new(manager, config.graphql)))
}

pub(crate) struct RequestBuilder {
    builder: reqwest::RequestBuilder,
}

impl RequestBuilder {
    pub(crate) async fn send(self) -> TestResponse {
        TestResponse {
            response: self.builder.send().await.expect("Request failed"),
        }
    }

    pub(crate) fn json<T: serde::Serialize>(mut self, json: &T) -> Self {
        self.builder = self.builder.json(json);
        self
    }

    pub(crate) fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.builder = self.builder.header(key, value);
        self
    }
}

pub(crate) struct TestResponse {
    response: reqwest::Response,
}

impl TestResponse {
    pub(crate) async fn text(self) -> String {
        self.response.text().await.unwrap()
    }

    pub(crate) async fn json(self) -> serde_json::Value {
        self.response.json().await.unwrap()
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub(crate) fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }
}
