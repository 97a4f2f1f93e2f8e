//! gadgets-rs - Main Entry Point
//!
//! Feeds text through a chain of gadgets and prints what each one shows.
//!
//! # Usage
//!
//! ```bash
//! gadgets-rs --list
//! gadgets-rs --chain change_base.hex_encode --chain hash.sha-1 "ABCD"
//! gadgets-rs --chain web.url_encode --json "foo:bar"
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use gadgets_rs::chain::ChainRun;
use gadgets_rs::config::{AppConfig, LoggingConfig};
use gadgets_rs::pipeline::GadgetRegistry;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "gadgets-rs")]
#[command(about = "Run text through a chain of byte-transform gadgets", long_about = None)]
struct Cli {
    /// Text fed into the chain's text input
    text: Option<String>,

    /// Gadget class id appended to the chain, e.g. change_base.hex_encode (repeatable)
    #[arg(long = "chain", value_name = "CLASS_ID")]
    chain: Vec<String>,

    /// List registered gadget classes and exit
    #[arg(long)]
    list: bool,

    /// Print the pipeline snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load_or_default(),
    };

    // Keep the guard alive so buffered file logs are flushed on exit
    let _guard = init_logging(&config.logging);

    let registry = GadgetRegistry::with_builtins();
    if cli.list {
        for class in registry.list() {
            println!(
                "{:<28} {:<12} {}",
                class.class_id,
                class.family.display_name(),
                class.title
            );
        }
        return Ok(());
    }

    let mut run = ChainRun::build(&registry, config.pipeline.clone(), &cli.chain)?;
    let report = run.feed(cli.text.unwrap_or_default())?;
    tracing::info!("Recomputed {} gadgets", report.len());

    if cli.json {
        println!("{}", run.to_json()?);
        return Ok(());
    }

    println!("{}", run.pipeline().topology());
    for gadget in run.pipeline().gadgets() {
        println!(
            "{:<10} {:<14} {}",
            gadget.id().to_string(),
            gadget.title(),
            gadget.display().get()
        );
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "gadgets-rs.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}
