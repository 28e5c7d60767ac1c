//! `lottie-lite` command-line companion for the host integration.
//!
//! Inspects `data-lottie` payloads exactly as the controller would see
//! them, and prints the payload schema and the default controller options.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use lottie_lite::config::resolve;
use lottie_lite::{AnimationConfig, ControllerOptions};

/// Inspect Lottie block payloads and controller options.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a payload and show the breakpoint chosen per width.
    Inspect {
        /// Path to a JSON payload, as found in the `data-lottie` attribute.
        payload: PathBuf,
        /// Viewport widths to resolve, in CSS pixels.
        #[arg(long = "width", value_name = "PX")]
        widths: Vec<u32>,
    },
    /// Print the JSON Schema of the payload.
    Schema,
    /// Print controller options as TOML.
    Options {
        /// Options file to load instead of the defaults.
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

fn inspect(payload: &Path, widths: &[u32]) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(payload)
        .with_context(|| format!("reading {}", payload.display()))?;
    let config = AnimationConfig::from_json(&raw)
        .with_context(|| format!("normalizing {}", payload.display()))?;
    log::debug!(
        "{} breakpoint(s), trigger '{}'",
        config.breakpoints.len(),
        config.trigger.as_str()
    );

    let mut out = io::stdout().lock();
    writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
    for &width in widths {
        match resolve(&config.breakpoints, width) {
            Some(bp) => writeln!(out, "{width}px -> {}", bp.src)?,
            None => writeln!(out, "{width}px -> (static image)")?,
        }
    }
    Ok(())
}

fn print_options(config: Option<&Path>) -> anyhow::Result<()> {
    let options = match config {
        Some(path) => ControllerOptions::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ControllerOptions::default(),
    };
    write!(io::stdout().lock(), "{}", options.to_toml_string()?)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    match Cli::parse().command {
        Command::Inspect { payload, widths } => inspect(&payload, &widths),
        Command::Schema => {
            let schema = AnimationConfig::json_schema();
            writeln!(
                io::stdout().lock(),
                "{}",
                serde_json::to_string_pretty(&schema)?
            )?;
            Ok(())
        }
        Command::Options { config } => print_options(config.as_deref()),
    }
}
