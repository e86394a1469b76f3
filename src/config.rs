use crate::collect::DEFAULT_PATTERNS;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gmx-results.toml";

/// Top-level configuration loaded from gmx-results.toml.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ResultsConfig {
    pub scan: ScanConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory holding the benchmark logs.
    pub data_dir: PathBuf,
    /// Filename globs, scanned in order.
    pub patterns: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Where to write the JSON dump, if anywhere.
    pub output: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data").join("gromacs"),
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Load config from `path`, or defaults.
///
/// A missing file is normal. A file that can't be read or parsed is logged
/// and defaults are used.
pub fn load_config(path: &Path) -> ResultsConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return ResultsConfig::default();
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "failed to read config");
            return ResultsConfig::default();
        }
    };

    match toml::from_str(&contents) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("failed to parse {}: {e}", path.display());
            ResultsConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let cfg = ResultsConfig::default();
        assert_eq!(cfg.scan.data_dir, PathBuf::from("data/gromacs"));
        assert_eq!(
            cfg.scan.patterns,
            vec!["exclusive_numa*.log", "shared_task*.log"]
        );
        assert!(cfg.report.output.is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let cfg = load_config(&dir.path().join(DEFAULT_CONFIG_FILE));
        assert_eq!(cfg.scan.patterns.len(), 2);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[scan]\ndata_dir = \"/scratch/gmx\"\n").unwrap();

        let cfg = load_config(&path);
        assert_eq!(cfg.scan.data_dir, PathBuf::from("/scratch/gmx"));
        assert_eq!(cfg.scan.patterns.len(), 2);
        assert!(cfg.report.output.is_none());
    }

    #[test]
    fn test_full_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
[scan]
data_dir = "logs"
patterns = ["shared_task*.log"]

[report]
output = "out/results.json"
"#,
        )
        .unwrap();

        let cfg = load_config(&path);
        assert_eq!(cfg.scan.data_dir, PathBuf::from("logs"));
        assert_eq!(cfg.scan.patterns, vec!["shared_task*.log"]);
        assert_eq!(cfg.report.output, Some(PathBuf::from("out/results.json")));
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[scan\ndata_dir = ").unwrap();

        let cfg = load_config(&path);
        assert_eq!(cfg.scan.data_dir, PathBuf::from("data/gromacs"));
    }
}
