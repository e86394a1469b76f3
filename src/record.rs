/// The per-file record produced by log extraction.
use serde::Serialize;

/// Queue category a benchmark run was submitted under, derived from its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Whole node reserved, run pinned to one NUMA node.
    Exclusive,
    /// Node shared with other scheduler tasks.
    Shared,
}

impl Category {
    /// Classify a log filename. Anything without the exclusive marker is shared.
    pub fn from_filename(filename: &str) -> Self {
        if filename.contains("exclusive") {
            Category::Exclusive
        } else {
            Category::Shared
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Exclusive => write!(f, "exclusive"),
            Category::Shared => write!(f, "shared"),
        }
    }
}

/// Metrics extracted from a single mdrun log.
///
/// Every field other than `file` and `category` is optional and stays `None`
/// when the log has nothing matching it. Serialized output keeps the `None`
/// fields as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub file: String,
    pub category: Category,
    pub numa_node: Option<u32>,
    pub task_id: Option<u32>,
    pub gpu_id: Option<u32>,
    /// Simulated nanoseconds per wall-clock day.
    pub performance_metric: Option<f64>,
    pub wall_time_s: Option<f64>,
    pub core_time_s: Option<f64>,
}

impl LogRecord {
    /// An empty record for `file`: category set, nothing else.
    pub fn new(file: impl Into<String>) -> Self {
        let file = file.into();
        let category = Category::from_filename(&file);
        Self {
            file,
            category,
            numa_node: None,
            task_id: None,
            gpu_id: None,
            performance_metric: None,
            wall_time_s: None,
            core_time_s: None,
        }
    }

    /// Key the summary table sorts by: NUMA node for exclusive runs, task id
    /// for shared ones. Missing keys sort as 0.
    pub fn sort_key(&self) -> u32 {
        match self.category {
            Category::Exclusive => self.numa_node.unwrap_or(0),
            Category::Shared => self.task_id.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_filename() {
        assert_eq!(
            Category::from_filename("exclusive_numa0.log"),
            Category::Exclusive
        );
        assert_eq!(Category::from_filename("shared_task4.log"), Category::Shared);
        assert_eq!(Category::from_filename("mystery.log"), Category::Shared);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Exclusive).unwrap();
        assert_eq!(json, "\"exclusive\"");
        assert_eq!(Category::Shared.to_string(), "shared");
    }

    #[test]
    fn test_new_record_is_empty() {
        let r = LogRecord::new("shared_task1.log");
        assert_eq!(r.category, Category::Shared);
        assert!(r.numa_node.is_none());
        assert!(r.task_id.is_none());
        assert!(r.performance_metric.is_none());
    }

    #[test]
    fn test_sort_key_by_category() {
        let mut ex = LogRecord::new("exclusive_numa2.log");
        ex.numa_node = Some(2);
        ex.task_id = Some(9);
        assert_eq!(ex.sort_key(), 2);

        let mut sh = LogRecord::new("shared_task7.log");
        sh.numa_node = Some(1);
        sh.task_id = Some(7);
        assert_eq!(sh.sort_key(), 7);

        assert_eq!(LogRecord::new("shared_task.log").sort_key(), 0);
    }

    #[test]
    fn test_serializes_unset_fields_as_null() {
        let r = LogRecord::new("exclusive_numa0.log");
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["file"], "exclusive_numa0.log");
        assert_eq!(v["category"], "exclusive");
        assert!(v["numa_node"].is_null());
        assert!(v["gpu_id"].is_null());
        assert!(v["wall_time_s"].is_null());
    }
}
