// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Echolalia - populate or clear a CouchDB server.
//!
//! This is the binary entry point. It loads configuration, reads the input
//! documents, and hands both to the CouchDB writer.

mod documents;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use echolalia_config::{ConfigError, EcholaliaConfig};
use echolalia_core::{EcholaliaError, RunArgs};
use echolalia_couchdb::Writer;

/// Echolalia - populate or clear a CouchDB server.
#[derive(Parser, Debug)]
#[command(name = "echolalia", version, about, long_about = None)]
struct Cli {
    /// Delete every non-system database that is not whitelisted.
    #[arg(long)]
    clear: bool,

    /// Extra databases to keep when clearing (repeatable or comma-separated).
    #[arg(long, value_delimiter = ',', requires = "clear")]
    whitelist: Option<Vec<String>>,

    /// Database to create and populate.
    #[arg(long, required_unless_present = "clear", conflicts_with = "clear")]
    name: Option<String>,

    /// JSON array or newline-delimited JSON documents; `-` or omitted reads stdin.
    #[arg(long, conflicts_with = "clear")]
    input: Option<PathBuf>,

    /// Config file to use instead of the default lookup.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override `logging.level`.
    #[arg(long, value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: Option<String>,
}

impl Cli {
    fn run_args(&self) -> RunArgs {
        RunArgs {
            clear: self.clear,
            whitelist: self
                .whitelist
                .as_ref()
                .map(|names| names.iter().map(|n| n.trim().to_string()).collect()),
            name: self.name.clone().unwrap_or_default(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(errors) => {
            echolalia_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    let log_level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(log_level);

    match run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("echolalia: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<EcholaliaConfig, Vec<ConfigError>> {
    match &cli.config {
        Some(path) => echolalia_config::load_and_validate_path(path),
        None => echolalia_config::load_and_validate(),
    }
}

async fn run(cli: &Cli, config: &EcholaliaConfig) -> Result<(), EcholaliaError> {
    let mut writer = Writer::new(&config.couchdb)?;
    let args = cli.run_args();
    let docs = if args.clear {
        Vec::new()
    } else {
        documents::read_documents(cli.input.as_deref())?
    };
    writer.run(&args, &docs).await
}

/// Initializes the tracing subscriber with the given log level.
///
/// HTTP transport crates stay at `warn` unless `RUST_LOG` says otherwise.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("echolalia={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
