use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

mod config;
mod output;
mod progress;

use config::{AppConfig, ConfigManager};
use filesum_core::{
    ChannelSink, DigestAlgorithm, DigestFormat, HashPipeline, PipelineConfig,
};
use output::RunReport;

#[derive(Parser)]
#[command(name = "filesum")]
#[command(author, version, about = "Batch file checksums with streaming multi-digest computation", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash one or more files, in order
    File {
        /// Files to hash
        paths: Vec<PathBuf>,

        /// Digest algorithm to use (repeatable)
        #[arg(short, long = "algorithm", value_enum)]
        algorithms: Vec<AlgorithmArg>,

        /// Digest output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// HMAC key as a hex string; switches to keyed hashing
        #[arg(short, long)]
        key: Option<String>,

        /// Disable progress bar display
        #[arg(long)]
        no_progress: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Hash a text string
    Text {
        /// The string to hash
        text: String,

        /// Digest algorithm to use (repeatable)
        #[arg(short, long = "algorithm", value_enum)]
        algorithms: Vec<AlgorithmArg>,

        /// Digest output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// HMAC key as a hex string; switches to keyed hashing
        #[arg(short, long)]
        key: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported digest algorithms
    Algorithms,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    Crc32,
    Md4,
    Md5,
    Sha1,
    Sha256,
    Sha512,
    /// Every supported algorithm at once
    All,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Hex,
    HexUpper,
    Base64,
}

impl From<FormatArg> for DigestFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Hex => DigestFormat::HexLower,
            FormatArg::HexUpper => DigestFormat::HexUpper,
            FormatArg::Base64 => DigestFormat::Base64,
        }
    }
}

/// Expand CLI algorithm flags, falling back to the configured set
fn resolve_algorithms(args: &[AlgorithmArg], config: &AppConfig) -> Result<Vec<DigestAlgorithm>> {
    if args.is_empty() {
        return config.digest.algorithms()
            .context("invalid algorithm in configuration");
    }

    let mut algorithms = Vec::new();
    for arg in args {
        match arg {
            AlgorithmArg::All => algorithms.extend(DigestAlgorithm::ALL),
            AlgorithmArg::Crc32 => algorithms.push(DigestAlgorithm::Crc32),
            AlgorithmArg::Md4 => algorithms.push(DigestAlgorithm::Md4),
            AlgorithmArg::Md5 => algorithms.push(DigestAlgorithm::Md5),
            AlgorithmArg::Sha1 => algorithms.push(DigestAlgorithm::Sha1),
            AlgorithmArg::Sha256 => algorithms.push(DigestAlgorithm::Sha256),
            AlgorithmArg::Sha512 => algorithms.push(DigestAlgorithm::Sha512),
        }
    }
    algorithms.dedup();
    Ok(algorithms)
}

fn resolve_format(arg: Option<FormatArg>, config: &AppConfig) -> Result<DigestFormat> {
    match arg {
        Some(arg) => Ok(arg.into()),
        None => config.digest.format().context("invalid format in configuration"),
    }
}

fn resolve_key(key: Option<&str>) -> Result<Option<Vec<u8>>> {
    key.map(|k| hex::decode(k).context("HMAC key must be a hex string"))
        .transpose()
}

fn build_pipeline(
    config: &AppConfig,
    algorithms: &[DigestAlgorithm],
    format: DigestFormat,
    key: Option<Vec<u8>>,
) -> HashPipeline {
    let mut pipeline = HashPipeline::new(PipelineConfig {
        chunk_size: config.pipeline.chunk_size,
    });
    pipeline.registry_mut().enable_only(algorithms);
    pipeline.set_format(format);
    pipeline.set_hmac_key(key);
    pipeline
}

async fn run_file(
    config: &AppConfig,
    paths: Vec<PathBuf>,
    algorithms: Vec<AlgorithmArg>,
    format: Option<FormatArg>,
    key: Option<String>,
    no_progress: bool,
    json: bool,
) -> Result<()> {
    if paths.is_empty() {
        bail!("no files given");
    }

    let algorithms = resolve_algorithms(&algorithms, config)?;
    let format = resolve_format(format, config)?;
    let key = resolve_key(key.as_deref())?;

    let pipeline = Arc::new(build_pipeline(config, &algorithms, format, key));

    let (sink, rx) = ChannelSink::pair();
    let show_progress = !no_progress && !json && config.output.progress_enabled;
    let renderer = tokio::spawn(progress::collect_events(rx, show_progress));

    let started = Instant::now();
    let handle = pipeline
        .start_batch(paths, Arc::new(sink))
        .context("failed to start hashing")?;

    // Ctrl-C cancels the batch cooperatively
    let cancel_pipeline = Arc::clone(&pipeline);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_pipeline.cancel();
        }
    });

    handle.wait().await;
    let report = renderer.await.context("progress renderer failed")?;

    output::print_report(&report, json, started.elapsed())?;
    exit_status(&report)
}

fn exit_status(report: &RunReport) -> Result<()> {
    if report.cancelled {
        bail!("cancelled");
    }
    if !report.failures.is_empty() {
        bail!("{} file(s) failed", report.failures.len());
    }
    Ok(())
}

fn run_text(
    config: &AppConfig,
    text: String,
    algorithms: Vec<AlgorithmArg>,
    format: Option<FormatArg>,
    key: Option<String>,
    json: bool,
) -> Result<()> {
    let algorithms = resolve_algorithms(&algorithms, config)?;
    let format = resolve_format(format, config)?;
    let key = resolve_key(key.as_deref())?;

    let pipeline = build_pipeline(config, &algorithms, format, key);
    let results = pipeline.hash_text(&text)?;

    output::print_text_results(&results, json)
}

fn run_algorithms() -> Result<()> {
    let pipeline = HashPipeline::default();
    for engine in pipeline
        .registry()
        .list()
        .into_iter()
        .filter_map(|a| pipeline.registry().get(a))
    {
        let keyed = if engine.supports_keyed() { "hmac" } else { "-" };
        println!(
            "{:<8} {:<8} {:>3} bytes  [{}]",
            engine.algorithm().as_str().bold(),
            engine.display_name(),
            engine.digest_len(),
            keyed
        );
    }
    Ok(())
}

fn run_config(command: ConfigCommand, manager: &ConfigManager) -> Result<()> {
    match command {
        ConfigCommand::Path => {
            println!("{}", manager.config_path().display());
            Ok(())
        }
        ConfigCommand::Show => {
            let config = manager.load()?;
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if cli.debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let manager = ConfigManager::new();
    let config = manager.load()?;

    match cli.command {
        Commands::File {
            paths,
            algorithms,
            format,
            key,
            no_progress,
            json,
        } => run_file(&config, paths, algorithms, format, key, no_progress, json).await,
        Commands::Text {
            text,
            algorithms,
            format,
            key,
            json,
        } => run_text(&config, text, algorithms, format, key, json),
        Commands::Algorithms => run_algorithms(),
        Commands::Config { command } => run_config(command, &manager),
    }
}
