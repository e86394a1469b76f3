mod collect;
mod config;
mod extract;
mod record;
mod report;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Extract performance metrics from GROMACS benchmark logs
/// (`exclusive_numa*.log`, `shared_task*.log`) and summarize them.
#[derive(Parser, Debug)]
#[command(name = "gmx-results", version, about)]
pub struct Cli {
    /// Directory containing GROMACS log files (default: from config, else data/gromacs)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output JSON file for results
    #[arg(long)]
    output: Option<PathBuf>,

    /// Suppress the summary table
    #[arg(long)]
    quiet: bool,

    /// Config file path
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Debug logging (per-file extraction details)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "gmx_results=debug"
    } else {
        "gmx_results=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?cli, "parsed CLI arguments");

    run(&cli);
}

/// Resolve settings, scan, report. Every outcome exits 0; problems are
/// reported rather than turned into exit codes.
fn run(cli: &Cli) -> Vec<record::LogRecord> {
    let cfg = config::load_config(&cli.config);
    let data_dir = cli.data_dir.clone().unwrap_or(cfg.scan.data_dir);
    let output = cli.output.clone().or(cfg.report.output);

    if !data_dir.exists() {
        println!("Data directory not found: {}", data_dir.display());
        println!("Run the GROMACS benchmarks first to generate results.");
        return Vec::new();
    }

    let records = collect::collect(&data_dir, &cfg.scan.patterns);

    if !cli.quiet {
        report::print_summary(&records);
    }

    if let Some(path) = output {
        match report::write_json(&records, &path) {
            Ok(()) => println!("\nResults saved to: {}", path.display()),
            Err(e) => tracing::error!(error = %e, "failed to save results"),
        }
    }

    records
}
