/// Log extraction: turn one mdrun log into a `LogRecord`.
///
/// Each rule is an independent regex match-and-assign step. Rules run in a
/// fixed order and a later match overwrites an earlier one for the same
/// field, so a `cpubind:` line beats the NUMA node in the filename and a
/// `Finished mdrun` wall time beats the timing table.
use crate::record::{Category, LogRecord};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static FILENAME_NUMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"exclusive_numa([0-9]+)").unwrap());
static FILENAME_TASK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"shared_task([0-9]+)").unwrap());

/// `numactl --show` output.
static CPUBIND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"cpubind:\s*([0-9]+)").unwrap());
static CUDA_DEVICES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CUDA_VISIBLE_DEVICES:\s*([0-9]+)").unwrap());

static PERFORMANCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Performance:\s+([0-9.]+)\s+ns/day").unwrap());
/// Any number followed by the unit. Loose on purpose: newer GROMACS versions
/// lay the performance table out differently. Can match unrelated lines.
static PERFORMANCE_FALLBACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9.]+)\s+ns/day").unwrap());

/// `Time: <core> <wall> <percent>`; the percentage is matched but unused.
static TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Time:\s+([0-9.]+)\s+([0-9.]+)\s+([0-9.]+)").unwrap()
});
/// `Finished mdrun ...` followed on the next line by `... wall <secs> s`.
static FINISHED_WALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Finished mdrun.*\n.*wall\s+([0-9.]+)\s+s").unwrap());

/// Extract all known metrics from a log's filename and content.
///
/// Never fails: a rule that doesn't match, or whose captured number doesn't
/// parse, leaves its field unset.
pub fn extract(filename: &str, content: &str) -> LogRecord {
    let mut record = LogRecord::new(filename);

    match record.category {
        Category::Exclusive => record.numa_node = capture(&FILENAME_NUMA, filename, 1),
        Category::Shared => record.task_id = capture(&FILENAME_TASK, filename, 1),
    }

    if let Some(node) = capture(&CPUBIND, content, 1) {
        record.numa_node = Some(node);
    }

    record.gpu_id = capture(&CUDA_DEVICES, content, 1);

    record.performance_metric = capture(&PERFORMANCE, content, 1);
    if record.performance_metric.is_none() {
        record.performance_metric = capture(&PERFORMANCE_FALLBACK, content, 1);
    }

    if let Some(caps) = TIMING.captures(content) {
        record.core_time_s = parse_group(&caps, 1);
        record.wall_time_s = parse_group(&caps, 2);
    }

    if let Some(wall) = capture(&FINISHED_WALL, content, 1) {
        record.wall_time_s = Some(wall);
    }

    tracing::debug!(
        file = filename,
        category = %record.category,
        performance = ?record.performance_metric,
        wall = ?record.wall_time_s,
        "extracted log metrics"
    );

    record
}

/// First match of `re` in `text`, with capture `group` parsed as `T`.
fn capture<T: FromStr>(re: &Regex, text: &str, group: usize) -> Option<T> {
    let caps = re.captures(text)?;
    parse_group(&caps, group)
}

fn parse_group<T: FromStr>(caps: &regex::Captures<'_>, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse().ok()
}
