//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use patchgen_core::output::write_output;
use patchgen_core::payload::{SystemClock, UuidGenerator};
use patchgen_core::pipeline::generate_patches;
use patchgen_core::producer::PatchProducer;
use patchgen_core::transcript::read_transcript;
use patchgen_shared::{
    AppConfig, GenerateConfig, init_config, init_config_at, load_config, load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// patchgen — turn transcripts into knowledge-store patches.
#[derive(Parser)]
#[command(
    name = "patchgen",
    version,
    about = "Convert a transcript into a patches document, via an external pipeline or a local placeholder.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.patchgen/patchgen.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate patches from a transcript.
    Generate {
        /// Path to transcript text file (default: stdin).
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// Topic identifier (default: config value, then "untitled-topic").
        #[arg(long, env = "PATCHGEN_TOPIC")]
        topic: Option<String>,

        /// Pipeline command, e.g. 'clojure -M:run'. Empty synthesizes locally.
        #[arg(long, env = "PATCHGEN_PIPELINE")]
        pipeline: Option<String>,

        /// File to write the output JSON to (default: stdout).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults (at `--config` if given).
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout carries
/// the patches document.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "patchgen_cli=warn,patchgen_core=warn,patchgen_shared=warn",
        1 => "patchgen_cli=info,patchgen_core=info,patchgen_shared=info",
        2 => "patchgen_cli=debug,patchgen_core=debug,patchgen_shared=debug",
        _ => "patchgen_cli=trace,patchgen_core=trace,patchgen_shared=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Generate {
            transcript,
            topic,
            pipeline,
            out,
        } => cmd_generate(
            config_path,
            transcript.as_deref(),
            topic.as_deref(),
            pipeline.as_deref(),
            out.as_deref(),
        ),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(config_path),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

fn cmd_generate(
    config_path: Option<&Path>,
    transcript: Option<&Path>,
    topic: Option<&str>,
    pipeline: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let app = resolve_config(config_path)?;
    let config = GenerateConfig::from(&app).with_overrides(topic, pipeline);

    let text = read_transcript(transcript)?;
    let producer = PatchProducer::select(&config.pipeline_cmd);

    info!(
        topic = %config.topic,
        strategy = producer.strategy(),
        "generating patches"
    );

    let result = generate_patches(&producer, &config.topic, &text, &UuidGenerator, &SystemClock)
        .wrap_err("failed to generate patches")?;

    info!(
        id = %result.payload_id,
        bytes = result.output.len(),
        elapsed_ms = result.elapsed.as_millis() as u64,
        "patches ready"
    );

    write_output(out, &result.output).wrap_err("failed to write output")?;
    Ok(())
}

fn cmd_config_init(config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(path) => init_config_at(path)?,
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
