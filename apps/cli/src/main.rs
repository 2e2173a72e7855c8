//! patchgen CLI — transcript to knowledge-store patch converter.
//!
//! Hands a transcript to an external extraction pipeline, or synthesizes a
//! placeholder patch locally when no pipeline is configured.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
