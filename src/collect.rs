/// Log collection: find benchmark logs in a directory and extract each one.
///
/// Files are visited pattern by pattern, sorted within each pattern. A file
/// that can't be read or decoded is logged and skipped; one bad log never
/// aborts the run.
use crate::extract::extract;
use crate::record::LogRecord;
use std::path::{Path, PathBuf};

/// Filename patterns scanned when the config doesn't override them.
pub const DEFAULT_PATTERNS: [&str; 2] = ["exclusive_numa*.log", "shared_task*.log"];

/// Outcome of scanning a directory: the records in visit order plus
/// everything that was skipped.
#[derive(Debug, Default)]
pub struct Scan {
    pub records: Vec<LogRecord>,
    pub skipped: Vec<CollectError>,
}

/// Collect records for every matching log under `dir`.
pub fn collect(dir: &Path, patterns: &[String]) -> Vec<LogRecord> {
    scan(dir, patterns).records
}

/// Like [`collect`], but also returns the per-file failures.
pub fn scan(dir: &Path, patterns: &[String]) -> Scan {
    let mut result = Scan::default();

    for pattern in patterns {
        let paths = match matching_files(dir, pattern) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "skipping filename pattern");
                result.skipped.push(e);
                continue;
            }
        };

        for path in paths {
            match read_and_extract(&path) {
                Ok(record) => {
                    tracing::info!(file = %record.file, "parsed");
                    result.records.push(record);
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        file = ?e.path(),
                        "error parsing log, skipping"
                    );
                    result.skipped.push(e);
                }
            }
        }
    }

    result
}

/// Files in `dir` matching the glob `pattern`, sorted by path.
fn matching_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, CollectError> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full = Path::new(&escaped).join(pattern);
    let full = full.to_string_lossy();

    let entries = glob::glob(&full).map_err(|e| CollectError::Pattern {
        pattern: pattern.to_string(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "unreadable directory entry");
            }
        }
    }
    paths.sort();
    Ok(paths)
}

fn read_and_extract(path: &Path) -> Result<LogRecord, CollectError> {
    let content = std::fs::read_to_string(path).map_err(|e| CollectError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(extract(&filename, &content))
}

/// Errors that cause a pattern or a single file to be skipped.
#[derive(Debug)]
pub enum CollectError {
    /// The filename pattern isn't a valid glob.
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    /// The log couldn't be read or isn't valid UTF-8.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CollectError {
    /// Path of the skipped file, if the error concerns one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            CollectError::Read { path, .. } => Some(path),
            CollectError::Pattern { .. } => None,
        }
    }
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Pattern { pattern, source } => {
                write!(f, "invalid filename pattern {pattern:?}: {source}")
            }
            CollectError::Read { path, source } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_else(|| path.to_string_lossy());
                write!(f, "error parsing {name}: {source}")
            }
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Pattern { source, .. } => Some(source),
            CollectError::Read { source, .. } => Some(source),
        }
    }
}
