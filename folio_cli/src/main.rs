// SPDX-License-Identifier: AGPL-3.0-or-later

#![allow(clippy::uninlined_format_args)]
mod config;
mod store;
mod utils;

use std::sync::Arc;

use anyhow::Result;
use folio::{
    GraphQLSchemaManager, HttpServiceContext, IdType, SchemaBuilder, SharedOperationHandler,
};
use log::{info, LevelFilter};

use crate::config::{load_config, print_config};
use crate::store::MemoryStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from command line arguments, environment variables and .toml file
    let (config_file_path, cli, config) = load_config()?;

    // Set log verbosity based on config. By default scope it always to the "folio" module.
    let mut builder = env_logger::Builder::new();
    let builder = match &cli.log_level {
        Some(level) => match level.parse::<LevelFilter>() {
            Ok(level) => builder.filter(Some("folio"), level),
            Err(_) => builder.parse_filters(level),
        },
        None => builder.parse_env(env_logger::Env::default().default_filter_or("folio=info")),
    };
    builder.init();

    let store = Arc::new(MemoryStore::new(config.clone(), IdType::Text));
    let handler: SharedOperationHandler = store.clone();
    let schema_builder = SchemaBuilder::new(config.clone(), store);

    if cli.dump_schema {
        println!("{}", schema_builder.build(handler)?.sdl());
        return Ok(());
    }

    print_config(config_file_path, &config);

    let schema = GraphQLSchemaManager::new(schema_builder, handler)?;
    let context = HttpServiceContext::new(schema, config.graphql.clone());

    info!("Start GraphQL API on port {}", config.http_port);

    // Run this until [CTRL] + [C] got pressed
    folio::http_service(context, config.http_port, async {
        tokio::signal::ctrl_c().await.ok();
    })
    .await?;

    info!("Shut down");

    Ok(())
}
