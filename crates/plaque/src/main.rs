//! # plaque
//!
//! Plaque - Component library documentation generator.
//!
//! ## Name Origin
//!
//! A **plaque** is the small panel beside a museum piece that says what it
//! is, who made it and how it fits into the collection. This crate is the
//! command-line front end that turns a design tool's component dump into one
//! such page per component, plus an index.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plaque")]
#[command(about = "Component library documentation generator", long_about = None)]
#[command(version, disable_version_flag = true, arg_required_else_help = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = clap::ArgAction::Version)]
    version: (),

    /// Config file (default: ./plaque.config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline progress at debug level
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Markdown docs from an extractor dump
    Build(commands::build::BuildArgs),

    /// Check an extractor dump without generating docs
    Validate(commands::validate::ValidateArgs),

    /// Print the JSON Schema for plaque.config.json
    Schema(commands::schema::SchemaArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("PLAQUE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build(args) => {
            let config = config::load_config(cli.config.as_deref());
            commands::build::run(args, &config);
        }
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Schema(args) => commands::schema::run(args),
    }
}
