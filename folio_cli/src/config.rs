// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{crate_version, Parser};
use colored::Colorize;
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use folio::Configuration;
use serde::Serialize;

use crate::utils::absolute_path;

const CONFIG_FILE_NAME: &str = "folio.toml";

const ENV_PREFIX: &str = "FOLIO_";

type ConfigFilePath = Option<PathBuf>;

/// Get configuration from 1. .toml file, 2. environment variables and 3. command line arguments
/// (in that order, meaning that later configuration sources take precedence over the earlier
/// ones).
pub fn load_config() -> Result<(ConfigFilePath, Cli, Configuration)> {
    // Parse command line arguments first to get optional config file path
    let cli = Cli::parse();

    // Determine if a config file path was provided or if we should look for it in common locations
    let config_file_path: ConfigFilePath = match &cli.config {
        Some(path) => {
            if !path.exists() {
                bail!("Config file '{}' does not exist", path.display());
            }

            Some(path.clone())
        }
        None => try_determine_config_file_path(),
    };

    let config = figment(&cli, config_file_path.as_ref()).extract()?;

    Ok((config_file_path, cli, config))
}

fn figment(cli: &Cli, config_file_path: Option<&PathBuf>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Configuration::default()));
    if let Some(path) = config_file_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(Serialized::defaults(cli));

    if cli.disable_playground {
        figment = figment.merge(Serialized::default("graphql.disable_playground", true));
    }

    if let Some(max_complexity) = cli.max_complexity {
        figment = figment.merge(Serialized::default("graphql.max_complexity", max_complexity));
    }

    figment
}

/// Configuration derived from command line arguments.
///
/// All arguments are optional and don't get serialized to Figment when they're None. This is to
/// assure that default values do not overwrite all previous settings, especially when they haven't
/// been set.
#[derive(Parser, Serialize, Debug, Default)]
#[command(
    name = "folio",
    about = "Serves the GraphQL API of a folio content configuration",
    long_about = None,
    version
)]
pub struct Cli {
    /// Path to an optional "folio.toml" file holding collections, globals and settings.
    ///
    /// When not set the program will try to find a `folio.toml` file in the same folder the
    /// program is executed in and otherwise in the regarding operation systems XDG config
    /// directory ("$HOME/.config/folio/folio.toml" on Linux).
    #[arg(short = 'c', long, value_name = "PATH")]
    #[serde(skip_serializing)]
    pub config: Option<PathBuf>,

    /// HTTP port, serving the GraphQL API. Defaults to 3000.
    #[arg(short = 'p', long, value_name = "PORT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_port: Option<u16>,

    /// Queries with a higher complexity score get rejected. Defaults to 1000.
    #[arg(short = 'x', long, value_name = "SCORE")]
    #[serde(skip_serializing)]
    pub max_complexity: Option<usize>,

    /// Do not serve the GraphQL playground.
    #[arg(long)]
    #[serde(skip_serializing)]
    pub disable_playground: bool,

    /// Print the derived GraphQL schema and exit.
    #[arg(short = 'd', long)]
    #[serde(skip_serializing)]
    pub dump_schema: bool,

    /// Set log verbosity. Use this for learning more about how the schema gets derived or for
    /// debugging.
    ///
    /// Possible log levels are: ERROR, WARN, INFO, DEBUG, TRACE. They are scoped to "folio" by
    /// default.
    ///
    /// If you want to adjust the scope for deeper inspection use a filter value, for example
    /// "=TRACE" for logging _everything_ or "folio=DEBUG,tower_http=INFO" etc.
    #[arg(short = 'l', long, value_name = "LEVEL")]
    #[serde(skip_serializing)]
    pub log_level: Option<String>,
}

fn try_determine_config_file_path() -> Option<PathBuf> {
    // Find config file in current folder
    let current_dir = std::env::current_dir()
        .ok()
        .map(|dir| dir.join(CONFIG_FILE_NAME));

    // Find config file in XDG config folder
    let xdg_config_dir = ProjectDirs::from("", "", "folio")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME));

    first_existing(&[current_dir, xdg_config_dir])
}

/// Returns the first candidate path pointing at an existing file.
fn first_existing(candidates: &[Option<PathBuf>]) -> Option<PathBuf> {
    candidates
        .iter()
        .flatten()
        .find(|path| path.exists())
        .cloned()
}

pub fn print_config(config_file_path: ConfigFilePath, config: &Configuration) {
    println!("{} v{}\n", "folio".underline(), crate_version!());

    match config_file_path.map(absolute_path).transpose() {
        Ok(Some(path)) => {
            println!(
                "Loading config file from {}",
                path.display().to_string().blue()
            );
        }
        _ => {
            println!("No config file provided");
        }
    }

    println!();
    println!("{}\n", "Configuration".underline());

    let localization = match &config.localization {
        Some(localization) => localization.locales.join(", "),
        None => "disabled".into(),
    };

    let playground = if config.graphql.disable_playground {
        "disabled"
    } else {
        "enabled"
    };

    println!("Collections: {}", config.collections.len().to_string().blue());
    println!("Globals: {}", config.globals.len().to_string().blue());
    println!("Locales: {}", localization.blue());
    println!(
        "Max. Query Complexity: {}",
        config.graphql.max_complexity.to_string().blue()
    );
    println!("GraphQL Playground: {}", playground.blue());
    println!("HTTP port: {}", config.http_port.to_string().blue());
    println!();
}
