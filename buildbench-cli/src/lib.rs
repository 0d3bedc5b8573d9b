#![warn(missing_docs)]
//! BuildBench CLI Library
//!
//! This module provides the command-line harness: it parses the selection
//! request, runs the selection pipeline over the built-in catalogue and hands
//! the resulting plan to an execution engine.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     buildbench_cli::run()
//! }
//! ```

mod config;
mod executor;
mod planner;

pub use config::*;
pub use executor::{
    ExecutionEngine, OutputFormat, PlanWriter, format_catalogue, format_dimensions,
    format_plan_human, format_plan_json,
};
pub use planner::{ExecutionPlan, SelectionWarning, build_plan};

use anyhow::Context;
use buildbench_core::Catalogue;
use buildbench_logic::{RequestError, RunConfig, SelectionRequest};
use clap::{Parser, Subcommand};
use regex::Regex;
use std::path::PathBuf;

/// BuildBench CLI arguments
#[derive(Parser, Debug, Default)]
#[command(name = "buildbench")]
#[command(
    author,
    version,
    about = "BuildBench - selects which build benchmark variants to run"
)]
pub struct Cli {
    /// Optional subcommand (Run, List, Dimensions, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Comma-separated substrings matched against variant type names
    #[arg(long, short = 't', default_value = "")]
    pub types: String,

    /// Comma-separated substrings matched against operation names
    #[arg(long, short = 'm', default_value = "")]
    pub methods: String,

    /// Comma-separated dimension filters: dimension=value1|value2
    #[arg(long, short = 'p', default_value = "")]
    pub parameters: String,

    /// Measured iterations per variant (default 1)
    #[arg(long, short = 'n')]
    pub iterations: Option<u32>,

    /// Warm-up iterations per variant (default 0)
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Ask the execution engine to run in debug mode
    #[arg(long)]
    pub debug: bool,

    /// Keep only variants whose id matches this regex
    #[arg(long)]
    pub filter: Option<String>,

    /// Output format: human, json
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (discovered from the current directory if not specified)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Select variants and hand the plan to the engine (default)
    Run,
    /// List every declared variant family
    List,
    /// List registered dimensions and their domains
    Dimensions,
    /// Print a default buildbench.toml
    Init,
}

/// Run the BuildBench CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, including when nothing was selected, or an
/// error if the request, configuration or catalogue is invalid.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the BuildBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose || cli.debug);

    let config = match cli.config {
        Some(ref path) => BenchConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BenchConfig::discover().unwrap_or_default(),
    };

    match cli.command {
        Some(Commands::Init) => {
            print!("{}", BenchConfig::default_toml());
        }
        Some(Commands::Dimensions) => {
            print!("{}", format_dimensions());
        }
        Some(Commands::List) => {
            let catalogue = Catalogue::builtin()?;
            print!("{}", format_catalogue(&catalogue));
        }
        Some(Commands::Run) | None => {
            run_selection(&cli, &config)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "buildbench=debug"
    } else {
        "buildbench=info"
    };
    // A subscriber may already be installed when embedded in another binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolve run settings: CLI flags win, then buildbench.toml, then defaults.
pub fn resolve_run_config(cli: &Cli, config: &BenchConfig) -> RunConfig {
    RunConfig {
        iterations: cli.iterations.unwrap_or(config.runner.iterations),
        warmup: cli.warmup.unwrap_or(config.runner.warmup),
        debug: cli.debug,
    }
}

/// Parse the selection request from CLI arguments.
///
/// Fails on the first malformed, unknown or out-of-domain filter token.
pub fn parse_request(cli: &Cli, config: &BenchConfig) -> Result<SelectionRequest, RequestError> {
    SelectionRequest::parse(
        &cli.types,
        &cli.methods,
        &cli.parameters,
        resolve_run_config(cli, config),
    )
}

fn run_selection(cli: &Cli, config: &BenchConfig) -> anyhow::Result<()> {
    // Everything that can reject the request runs before the catalogue is touched
    let request = parse_request(cli, config)?;
    let filter = cli
        .filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("invalid --filter regex")?;
    let rules = config.rule_set()?;
    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let catalogue = Catalogue::builtin()?;
    let plan = build_plan(&catalogue, &rules, &request, filter.as_ref());

    let output_path = cli
        .output
        .clone()
        .or_else(|| config.output.path.as_ref().map(PathBuf::from));

    if let Some(path) = output_path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        PlanWriter::new(format, std::io::BufWriter::new(file)).execute(&plan)?;
        println!("Plan written to: {}", path.display());
    } else {
        PlanWriter::new(format, std::io::stdout().lock()).execute(&plan)?;
    }

    Ok(())
}
