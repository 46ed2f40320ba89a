// SPDX-License-Identifier: MIT OR Apache-2.0
//! `matgraph` - material node-graph interchange from the command line.
//!
//! Exports the built-in sample material, imports documents into an
//! in-memory material library and rewrites older documents at the current
//! format version. Settings are read from `matgraph.ron` in the working
//! directory when present.

mod commands;
mod sample;

use commands::{CliError, Command};
use matgraph_codec::CodecSettings;
use std::path::Path;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    // Logs go to stderr; stdout carries command output only
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting matgraph v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let command = Command::parse(std::env::args().skip(1))?;
    let settings = CodecSettings::load_or_default(&CodecSettings::settings_file_path(Path::new(".")))?;

    if let Some(output) = command.run(&settings)? {
        println!("{output}");
    }
    Ok(())
}
