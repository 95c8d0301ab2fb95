//! eduscrub CLI
//!
//! Command-line tool for cleaning tabular educational-interaction logs

mod config;
mod progress;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use eduscrub_core::pipeline::{clean, CleanConfig};
use eduscrub_core::Dataset;
use eduscrub_formats::{encoding_from_label, write_dataset, CsvConfig, CsvReader};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::JobConfig;

#[derive(Parser)]
#[command(name = "eduscrub")]
#[command(version, about = "Cleaning pipeline for educational interaction logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output statistics in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full cleaning pipeline over an interaction log
    Clean {
        /// Input file (CSV, optionally gzip-compressed)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Job config file (YAML or TOML); flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Upper clamp for ms_first_response
        #[arg(long)]
        max_seconds: Option<i64>,

        /// Field delimiter
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Input text encoding label (e.g. utf-8, latin1)
        #[arg(short, long)]
        encoding: Option<String>,

        /// Show statistics without writing output
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect the first rows of a dataset
    Inspect {
        /// Path to the dataset file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of rows to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,

        /// Field delimiter
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Input text encoding label
        #[arg(short, long)]
        encoding: Option<String>,
    },

    /// Count rows in a dataset
    Count {
        /// Path to the dataset file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Field delimiter
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Input text encoding label
        #[arg(short, long)]
        encoding: Option<String>,
    },

    /// Write an example job config file
    InitConfig {
        /// Destination path (.yaml, .yml, or .toml)
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(!cli.json) // Disable colors if JSON output
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Clean {
            input,
            output,
            config,
            max_seconds,
            delimiter,
            encoding,
            dry_run,
        } => {
            run_clean(
                input, output, config, max_seconds, delimiter, encoding, dry_run, cli.json,
            )?;
        }
        Commands::Inspect {
            input,
            limit,
            delimiter,
            encoding,
        } => {
            inspect_dataset(input, limit, delimiter, encoding)?;
        }
        Commands::Count {
            input,
            delimiter,
            encoding,
        } => {
            count_dataset(input, delimiter, encoding)?;
        }
        Commands::InitConfig { path } => {
            JobConfig::example().save(&path)?;
            info!("Wrote example config to {:?}", path);
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "eduscrub", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn csv_config(delimiter: Option<char>, encoding: Option<String>) -> Result<CsvConfig> {
    let delimiter = delimiter.unwrap_or(',');
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character");
    }
    let encoding = match encoding {
        Some(label) => encoding_from_label(&label)?,
        None => CsvConfig::default().encoding,
    };
    Ok(CsvConfig {
        delimiter: delimiter as u8,
        encoding,
    })
}

fn read_with_progress(input: &Path, config: CsvConfig) -> Result<Dataset> {
    let mut reader = CsvReader::open_with_config(input, config)
        .with_context(|| format!("Failed to open input: {}", input.display()))?;

    let bar = progress::reading_spinner();
    let mut dataset = Dataset::new(reader.headers().to_vec());
    for row in reader.by_ref() {
        dataset.push_row(row?);
        if dataset.len() % 10_000 == 0 {
            bar.set_position(dataset.len() as u64);
        }
    }
    bar.finish_and_clear();

    info!("Loaded {} rows, {} columns", dataset.len(), dataset.columns().len());
    Ok(dataset)
}

fn run_clean(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    max_seconds: Option<i64>,
    delimiter: Option<char>,
    encoding: Option<String>,
    dry_run: bool,
    json_output: bool,
) -> Result<()> {
    let job = config.map(|path| JobConfig::load(&path)).transpose()?;

    let input = input
        .or_else(|| job.as_ref().map(|j| PathBuf::from(&j.input.path)))
        .context("No input file given (use --input or --config)")?;
    let output = output.or_else(|| job.as_ref().map(|j| PathBuf::from(&j.output.path)));
    let delimiter = delimiter.or_else(|| job.as_ref().map(|j| j.input.delimiter));
    let encoding = encoding.or_else(|| job.as_ref().map(|j| j.input.encoding.clone()));
    let max_seconds = max_seconds
        .or_else(|| job.as_ref().map(|j| j.cleaning.max_seconds))
        .unwrap_or(eduscrub_core::response_time::DEFAULT_MAX_SECONDS);

    info!("Starting cleaning run");
    info!("  Input: {:?}", input);
    if let Some(ref output) = output {
        info!("  Output: {:?}", output);
    }
    info!("  Max seconds: {}", max_seconds);

    let dataset = read_with_progress(&input, csv_config(delimiter, encoding)?)?;
    let (cleaned, stats) = clean(dataset, &CleanConfig { max_seconds });

    let written = if dry_run {
        None
    } else {
        let output = output
            .context("No output file given (use --output, --config, or --dry-run)")?;
        write_dataset(&cleaned, &output)
            .with_context(|| format!("Failed to write output: {}", output.display()))?;
        Some(output)
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        progress::print_summary_report(&input, written.as_deref(), &stats);
    }

    Ok(())
}

fn inspect_dataset(
    input: PathBuf,
    limit: usize,
    delimiter: Option<char>,
    encoding: Option<String>,
) -> Result<()> {
    let reader = CsvReader::open_with_config(&input, csv_config(delimiter, encoding)?)
        .with_context(|| format!("Failed to open input: {}", input.display()))?;

    for row in reader.take(limit) {
        let row = row?;
        println!("{}", serde_json::to_string(&Value::Object(row))?);
    }
    Ok(())
}

fn count_dataset(input: PathBuf, delimiter: Option<char>, encoding: Option<String>) -> Result<()> {
    let reader = CsvReader::open_with_config(&input, csv_config(delimiter, encoding)?)
        .with_context(|| format!("Failed to open input: {}", input.display()))?;

    let mut count = 0usize;
    for row in reader {
        row?;
        count += 1;
    }
    println!("{}", count);
    Ok(())
}
