//! nway: merge sorted integer lists.
//!
//! Usage: nway <COMMAND> [OPTIONS]

use clap::{ArgAction, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use nway_merge::commands::{BatchCommand, GenerateCommand, GenerateConfig, MergeCommand};
use nway_merge::error::Result;
use nway_merge::source::SourceReader;

#[derive(Parser)]
#[command(name = "nway")]
#[command(version)]
#[command(about = "Merge K sorted integer lists into one sorted list", long_about = None)]
struct Cli {
    /// Number of threads to use (default: number of CPUs)
    #[arg(long, short = 't', global = true)]
    threads: Option<usize>,

    /// Stop each list at its first non-integer token instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the lists of one input file into a single sorted line
    Merge {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip sorted validation (faster for pre-sorted input)
        #[arg(long)]
        assume_sorted: bool,

        /// Print merge statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Merge several input files in parallel, one output per input
    Batch {
        /// Input files
        #[arg(short = 'i', long = "input", num_args = 1.., required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (<stem>.merged.txt per input)
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Skip sorted validation (faster for pre-sorted input)
        #[arg(long)]
        assume_sorted: bool,

        /// Print merge statistics to stderr
        #[arg(long)]
        stats: bool,

        /// Overwrite existing output files
        #[arg(long)]
        force: bool,
    },

    /// Generate a random input file of sorted lists
    #[command(alias = "create")]
    Generate {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of lists
        #[arg(short = 'k', long, default_value = "8")]
        lists: usize,

        /// Minimum list length
        #[arg(long, default_value = "0")]
        min_len: usize,

        /// Maximum list length
        #[arg(long, default_value = "1000")]
        max_len: usize,

        /// Smallest value
        #[arg(long, default_value = "-1000000", allow_negative_numbers = true)]
        min_value: i64,

        /// Largest value
        #[arg(long, default_value = "1000000", allow_negative_numbers = true)]
        max_value: i64,

        /// Fraction of lists left empty
        #[arg(long, default_value = "0.0")]
        empty_frac: f64,

        /// Random seed for reproducibility
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Must be set before any parsing occurs
    if cli.lenient {
        nway_merge::config::set_lenient(true);
    }

    // Configure thread pool if --threads specified
    if let Some(n) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
        {
            eprintln!("Error: failed to initialize thread pool: {}", e);
            process::exit(1);
        }
    }

    let result = match cli.command {
        Commands::Merge {
            input,
            output,
            assume_sorted,
            stats,
        } => run_merge(input, output, assume_sorted, stats),

        Commands::Batch {
            inputs,
            output_dir,
            assume_sorted,
            stats,
            force,
        } => run_batch(inputs, output_dir, assume_sorted, stats, force),

        Commands::Generate {
            output,
            lists,
            min_len,
            max_len,
            min_value,
            max_value,
            empty_frac,
            seed,
            force,
        } => run_generate(GenerateConfig {
            output,
            lists,
            min_len,
            max_len,
            min_value,
            max_value,
            empty_frac,
            seed,
            force,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Treat a missing path or `-` as stdin/stdout.
fn file_arg(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| p.as_path() != Path::new("-"))
}

fn run_merge(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    assume_sorted: bool,
    stats: bool,
) -> Result<()> {
    let cmd = MergeCommand::new().with_assume_sorted(assume_sorted);

    let result = match (file_arg(input), file_arg(output)) {
        (None, None) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            cmd.run_stdin(&mut handle)?
        }
        (None, Some(output)) => {
            let stdin = io::stdin();
            cmd.run_reader_to_file(SourceReader::new(stdin.lock()), output)?
        }
        (Some(input), None) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            cmd.run(input, &mut handle)?
        }
        (Some(input), Some(output)) => cmd.run_files(input, output)?,
    };

    if stats {
        eprintln!("Merge stats: {}", result);
    }

    Ok(())
}

fn run_batch(
    inputs: Vec<PathBuf>,
    output_dir: PathBuf,
    assume_sorted: bool,
    stats: bool,
    force: bool,
) -> Result<()> {
    let cmd = BatchCommand::new(output_dir)
        .with_assume_sorted(assume_sorted)
        .with_force(force);

    let result = cmd.run(&inputs)?;

    if stats {
        eprintln!("Batch stats: {}", result);
    }

    Ok(())
}

fn run_generate(config: GenerateConfig) -> Result<()> {
    let cmd = GenerateCommand::new(config);
    let result = cmd.run()?;
    eprintln!("Generated {}", result);
    Ok(())
}
