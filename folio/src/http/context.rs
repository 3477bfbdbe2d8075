// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::config::GraphQLConfig;
use crate::graphql::GraphQLSchemaManager;

#[derive(Clone, Debug)]
pub struct HttpServiceContext {
    /// Dynamic GraphQL schema manager.
    pub schema: GraphQLSchemaManager,

    /// GraphQL API settings.
    pub config: GraphQLConfig,
}

impl HttpServiceContext {
    pub fn new(schema: GraphQLSchemaManager, config: GraphQLConfig) -> Self {
        Self { schema, config }
    }
}
