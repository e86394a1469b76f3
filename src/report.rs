/// Reporting: the per-category summary table and the JSON dump.
use crate::record::{Category, LogRecord};
use std::io::Write;
use std::path::{Path, PathBuf};

const WIDE_RULE_LEN: usize = 70;

/// Print the summary table for `records` to stdout.
pub fn print_summary(records: &[LogRecord]) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_summary(&mut out, records) {
        tracing::error!(error = %e, "failed to print summary");
    }
}

/// Write the summary table: one section per non-empty category, each
/// followed by its mean performance.
pub fn write_summary<W: Write>(out: &mut W, records: &[LogRecord]) -> std::io::Result<()> {
    if records.is_empty() {
        writeln!(out, "No results found.")?;
        return Ok(());
    }

    let rule = "=".repeat(WIDE_RULE_LEN);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "GROMACS Benchmark Results Summary")?;
    writeln!(out, "{rule}")?;

    let exclusive = sorted_by_key(records, Category::Exclusive);
    if !exclusive.is_empty() {
        writeln!(out, "\n--- Exclusive Queue (NUMA Pinned) ---")?;
        writeln!(
            out,
            "{:<6} {:<5} {:<12} {:<15}",
            "NUMA", "GPU", "ns/day", "Wall Time (s)"
        )?;
        writeln!(out, "{}", "-".repeat(40))?;
        for r in &exclusive {
            writeln!(
                out,
                "{:<6} {:<5} {:<12} {:<15}",
                or_na(r.numa_node),
                or_na(r.gpu_id),
                performance(r),
                wall_time(r)
            )?;
        }
        write_average(out, &exclusive)?;
    }

    let shared = sorted_by_key(records, Category::Shared);
    if !shared.is_empty() {
        writeln!(out, "\n--- Shared Queue (SLURM Scheduled) ---")?;
        writeln!(
            out,
            "{:<6} {:<6} {:<5} {:<12} {:<15}",
            "Task", "NUMA", "GPU", "ns/day", "Wall Time (s)"
        )?;
        writeln!(out, "{}", "-".repeat(50))?;
        for r in &shared {
            writeln!(
                out,
                "{:<6} {:<6} {:<5} {:<12} {:<15}",
                or_na(r.task_id),
                or_na(r.numa_node),
                or_na(r.gpu_id),
                performance(r),
                wall_time(r)
            )?;
        }
        write_average(out, &shared)?;
    }

    writeln!(out, "\n{rule}")?;
    Ok(())
}

/// Records of one category, stably sorted by their natural key.
fn sorted_by_key(records: &[LogRecord], category: Category) -> Vec<&LogRecord> {
    let mut subset: Vec<&LogRecord> = records.iter().filter(|r| r.category == category).collect();
    subset.sort_by_key(|r| r.sort_key());
    subset
}

fn write_average<W: Write>(out: &mut W, records: &[&LogRecord]) -> std::io::Result<()> {
    if let Some(avg) = mean_performance(records) {
        writeln!(out, "\nAverage: {avg:.3} ns/day")?;
    }
    Ok(())
}

/// Arithmetic mean of the performance values that are present.
pub fn mean_performance(records: &[&LogRecord]) -> Option<f64> {
    let values: Vec<f64> = records.iter().filter_map(|r| r.performance_metric).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn or_na<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

fn performance(r: &LogRecord) -> String {
    r.performance_metric
        .map_or_else(|| "N/A".to_string(), |p| format!("{p:.3}"))
}

fn wall_time(r: &LogRecord) -> String {
    r.wall_time_s
        .map_or_else(|| "N/A".to_string(), |w| format!("{w:.1}"))
}

/// Overwrite `path` with all records as a pretty-printed JSON array.
pub fn write_json(records: &[LogRecord], path: &Path) -> Result<(), ReportError> {
    let json =
        serde_json::to_string_pretty(records).map_err(|e| ReportError::Serialize { source: e })?;
    std::fs::write(path, json.as_bytes()).map_err(|e| ReportError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Errors from writing the JSON dump.
#[derive(Debug)]
pub enum ReportError {
    Serialize {
        source: serde_json::Error,
    },
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Serialize { source } => write!(f, "failed to serialize results: {source}"),
            ReportError::Write { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Serialize { source } => Some(source),
            ReportError::Write { source, .. } => Some(source),
        }
    }
}
