//! Build command - Generate component documentation

use super::{read_dump, CliError};
use crate::config::{OutputFormat, PlaqueConfig};
use clap::Args;
use plaque_carton::content_hash;
use plaque_curator::docs::{DocBundle, IndexOptions};
use plaque_curator::{generate_docs, GenerationOutput};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Args, Default)]
pub struct BuildArgs {
    /// Extractor dump to document
    pub input: PathBuf,

    /// Output directory (default: ./docs)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (default: md)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of threads (default: number of CPUs)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Leave raw render, class and breakpoint JSON out of the docs
    #[arg(long)]
    pub no_raw: bool,

    /// Title of the index page
    #[arg(long)]
    pub title: Option<String>,

    /// Show timing profile breakdown
    #[arg(long)]
    pub profile: bool,

    /// Exit successfully even when some components failed
    #[arg(long)]
    pub continue_on_error: bool,
}

#[derive(Debug, Default)]
struct Timing {
    parse: Duration,
    generate: Duration,
    io: Duration,
}

#[derive(Debug)]
struct BuildReport {
    output: GenerationOutput,
    format: OutputFormat,
    out_dir: PathBuf,
    written: usize,
    unchanged: usize,
    timing: Timing,
}

pub fn run(args: BuildArgs, config: &PlaqueConfig) {
    let start = Instant::now();

    if let Some(threads) = args.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            tracing::warn!("failed to configure thread pool: {}", e);
        }
    }

    let report = match execute(&args, config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };
    let total_elapsed = start.elapsed();

    for failure in &report.output.failures {
        eprintln!(
            "  {} ({}): {}",
            failure.component_name, failure.component_id, failure.message
        );
    }

    if report.format == OutputFormat::Stats {
        print_stats(&report.output);
    }

    if args.profile {
        eprintln!();
        eprintln!("Timing breakdown:");
        eprintln!("  Parsing:         {:.4}s", report.timing.parse.as_secs_f64());
        eprintln!("  Generation:      {:.4}s", report.timing.generate.as_secs_f64());
        eprintln!("  I/O operations:  {:.4}s", report.timing.io.as_secs_f64());
        eprintln!("  Total:           {:.4}s", total_elapsed.as_secs_f64());
        eprintln!("  Threads:         {}", rayon::current_num_threads());
        eprintln!();
    }

    let success = report.output.docs.len();
    let failed = report.output.failures.len();
    if failed > 0 {
        eprintln!(
            "✗ {} component(s) failed, {} documented in {:.4}s",
            failed,
            success,
            total_elapsed.as_secs_f64()
        );
    } else {
        let word = if success == 1 { "component" } else { "components" };
        eprintln!(
            "✓ {} {} documented in {:.4}s",
            success,
            word,
            total_elapsed.as_secs_f64()
        );
    }

    if report.format != OutputFormat::Stats {
        eprintln!(
            "  {} file(s) written, {} unchanged in {}",
            report.written,
            report.unchanged,
            report.out_dir.display()
        );
    }

    if failed > 0 && !args.continue_on_error {
        std::process::exit(1);
    }
}

/// Generate and write docs. Component failures are part of the report,
/// only I/O and validation problems are errors.
fn execute(args: &BuildArgs, config: &PlaqueConfig) -> Result<BuildReport, CliError> {
    let mut timing = Timing::default();

    let parse_start = Instant::now();
    let dump = read_dump(&args.input)?;
    timing.parse = parse_start.elapsed();

    let mut options = config.generate.options();
    options.include_raw = !args.no_raw && config.output.include_raw.unwrap_or(true);

    let generate_start = Instant::now();
    let output = generate_docs(&dump, &options);
    timing.generate = generate_start.elapsed();

    let format = args.format.or(config.output.format).unwrap_or_default();
    let out_dir = args
        .output
        .clone()
        .or_else(|| config.output.dir.clone())
        .unwrap_or_else(|| PathBuf::from("./docs"));
    let index = IndexOptions {
        title: args.title.clone().or_else(|| config.index.title.clone()),
    };

    let io_start = Instant::now();
    let (written, unchanged) = match format {
        OutputFormat::Stats => (0, 0),
        OutputFormat::Md => {
            let bundle = DocBundle::build(&output.docs, &output.failures, &index);
            write_markdown(&out_dir, &bundle)?
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output)?;
            write_file(&out_dir, "components.json", &json, &content_hash(&json))?
        }
    };
    timing.io = io_start.elapsed();

    tracing::debug!(written, unchanged, dir = %out_dir.display(), "wrote output");

    Ok(BuildReport {
        output,
        format,
        out_dir,
        written,
        unchanged,
        timing,
    })
}

/// Write every page of the bundle, returning `(written, unchanged)`.
fn write_markdown(dir: &Path, bundle: &DocBundle) -> Result<(usize, usize), CliError> {
    let mut written = 0;
    let mut unchanged = 0;
    for file in bundle.files() {
        let (w, u) = write_file(dir, &file.filename, &file.markdown, &file.content_hash)?;
        written += w;
        unchanged += u;
    }
    Ok((written, unchanged))
}

/// Write one file unless its current content already hashes to `hash`.
fn write_file(
    dir: &Path,
    filename: &str,
    content: &str,
    hash: &str,
) -> Result<(usize, usize), CliError> {
    fs::create_dir_all(dir).map_err(|source| CliError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(filename);
    let existing = fs::read_to_string(&path).ok();
    if existing.is_some_and(|existing| content_hash(&existing) == hash) {
        tracing::debug!(path = %path.display(), "unchanged, skipping");
        return Ok((0, 1));
    }

    fs::write(&path, content).map_err(|source| CliError::Write { path, source })?;
    Ok((1, 0))
}

fn print_stats(output: &GenerationOutput) {
    let total = |f: fn(&plaque_curator::DocStats) -> usize| {
        output.docs.iter().map(|d| f(&d.stats)).sum::<usize>()
    };
    println!("Components:    {}", output.docs.len());
    println!("Failures:      {}", output.failures.len());
    println!("Properties:    {}", total(|s| s.property_count));
    println!("Variants:      {}", total(|s| s.variant_count));
    println!("Style blocks:  {}", total(|s| s.style_count));
    println!("Design tokens: {}", total(|s| s.token_count));
}
