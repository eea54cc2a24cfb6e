//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures shared by the loader, the
//! execution engine and the reporters: the validated test-case descriptor,
//! the per-iteration outcome and the run-wide statistics.
//!
//! 此模块定义了加载器、执行引擎和报告器共享的核心数据结构：
//! 经过验证的测试用例描述、每次迭代的结果以及整个运行的统计信息。

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A validated test case, loaded from a descriptor file.
/// Every relative path is interpreted against `base_dir`, the directory
/// holding the descriptor.
///
/// 从描述文件加载并验证过的测试用例。
/// 所有相对路径都以 `base_dir`（描述文件所在目录）为基准。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseDescriptor {
    /// The name used in console output and in the report / 用于输出和报告的名称
    pub name: String,
    /// The source file handed to the subject, as written in the descriptor.
    /// 传给被测程序的源文件，保持描述文件中的写法。
    pub source_path: PathBuf,
    /// File holding the exact stdout the subject must produce.
    /// 被测程序必须产生的标准输出内容文件。
    pub expected_stdout_path: PathBuf,
    /// File holding the expected stderr. Read, never compared.
    /// 期望的标准错误内容文件。会被读取，但不参与比较。
    pub expected_stderr_path: PathBuf,
    pub expected_exit_code: i32,
    pub skip: bool,
    /// Replaces the configured subject executable for this case only.
    /// 仅对此用例替换默认的被测程序。
    pub command_override: Option<String>,
    /// How many times the case runs per pass. Always at least 1.
    /// 每轮运行该用例的次数，至少为 1。
    pub loop_count: u32,
    /// Directory containing the descriptor; the subject runs here.
    /// 描述文件所在目录；被测程序在此目录中运行。
    pub base_dir: PathBuf,
}

impl TestCaseDescriptor {
    /// Number of outcomes one pass over this case produces.
    /// A skipped case always produces exactly one, whatever its loop count.
    pub fn iterations(&self) -> u32 {
        if self.skip { 1 } else { self.loop_count }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }
}

/// How a single iteration ended.
/// 单次迭代的结果分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Pass,
    Fail,
    /// The subject crashed with a segmentation violation. Counts as a failure.
    Segv,
    Skip,
    /// The subject exceeded the timeout and was killed. Counts as a failure.
    Timeout,
}

impl Classification {
    /// `Fail`, `Segv` and `Timeout` all count towards the failure total.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Classification::Fail | Classification::Segv | Classification::Timeout
        )
    }

    /// The bracketed console tag for this classification.
    pub fn tag(self) -> &'static str {
        match self {
            Classification::Pass => "PASS",
            Classification::Fail | Classification::Timeout => "FAIL",
            Classification::Segv => "SEGV",
            Classification::Skip => "SKIP",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The result of one loop iteration of one test case. Never mutated after creation.
/// 某个测试用例一次迭代的结果，创建后不再修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub case_name: String,
    /// Wall-clock time of the iteration. `None` for skipped cases.
    /// 迭代耗时。跳过的用例为 `None`。
    pub elapsed: Option<Duration>,
    pub classification: Classification,
    pub captured_stdout: String,
    pub captured_stderr: String,
    /// Failure message for outcomes that have no process output,
    /// e.g. a launch error or a timeout.
    /// 没有进程输出的失败结果的说明，例如启动失败或超时。
    pub detail: Option<String>,
}

impl ExecutionOutcome {
    pub fn skipped(case_name: impl Into<String>) -> Self {
        Self {
            case_name: case_name.into(),
            elapsed: None,
            classification: Classification::Skip,
            captured_stdout: String::new(),
            captured_stderr: String::new(),
            detail: None,
        }
    }

    /// A failing outcome that never produced process output.
    pub fn without_output(
        case_name: impl Into<String>,
        classification: Classification,
        elapsed: Duration,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            case_name: case_name.into(),
            elapsed: Some(elapsed),
            classification,
            captured_stdout: String::new(),
            captured_stderr: String::new(),
            detail: Some(detail.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.classification.is_failure()
    }

    /// Elapsed seconds rounded to two decimal places.
    pub fn elapsed_seconds(&self) -> Option<f64> {
        self.elapsed.map(round_seconds)
    }

    /// Elapsed time formatted the way it appears in the report, or an
    /// empty string when there is no timing.
    pub fn elapsed_str(&self) -> String {
        self.elapsed
            .map(|d| format!("{:.2}", d.as_secs_f64()))
            .unwrap_or_default()
    }
}

/// Rounds a duration to seconds with two decimal places.
pub fn round_seconds(d: Duration) -> f64 {
    (d.as_secs_f64() * 100.0).round() / 100.0
}

/// Run-wide tallies. Owned by the aggregator and mutated only as outcomes
/// are recorded, in outcome order.
///
/// 整个运行的计数。由聚合器持有，仅在记录结果时按顺序更新。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub total_expected: u64,
    pub pass_count: u64,
    /// Includes segmentation faults and timeouts.
    pub fail_count: u64,
    /// Crashes; a subset of `fail_count`.
    pub segv_count: u64,
    pub skip_count: u64,
}

impl RunStatistics {
    pub fn new(total_expected: u64) -> Self {
        Self {
            total_expected,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, classification: Classification) {
        match classification {
            Classification::Pass => self.pass_count += 1,
            Classification::Fail | Classification::Timeout => self.fail_count += 1,
            Classification::Segv => {
                self.fail_count += 1;
                self.segv_count += 1;
            }
            Classification::Skip => self.skip_count += 1,
        }
    }

    pub fn completed(&self) -> u64 {
        self.pass_count + self.fail_count + self.skip_count
    }

    /// `floor(100 * completed / total_expected)`, informational only.
    pub fn percent_complete(&self) -> u32 {
        floor_percent(self.completed(), self.total_expected)
    }

    /// `floor(100 * pass / total_expected)`, or 100 for an empty run.
    pub fn pass_percentage(&self) -> u32 {
        floor_percent(self.pass_count, self.total_expected)
    }

    pub fn has_failures(&self) -> bool {
        self.fail_count > 0
    }
}

fn floor_percent(part: u64, total: u64) -> u32 {
    if total == 0 {
        return 100;
    }
    ((part.saturating_mul(100)) / total) as u32
}

/// The phases of a single run, in order.
/// 单次运行的各个阶段（按顺序）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunPhase {
    NotStarted,
    Discovering,
    Scanning,
    Executing,
    Finalized,
}

/// Final figures of a completed run.
/// 运行结束后的最终统计。
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub statistics: RunStatistics,
    pub pass_percentage: u32,
    pub total_elapsed: Duration,
    pub report_path: PathBuf,
    /// Names of failing cases, in the order they failed, with their classification.
    pub failures: Vec<(String, Classification)>,
    /// `true` if stop-on-failure cut the run short.
    pub stopped_early: bool,
}

impl Summary {
    /// `0` when nothing failed, `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.statistics.has_failures() { 1 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segv_counts_as_failure_and_crash() {
        let mut stats = RunStatistics::new(1);
        stats.apply(Classification::Segv);
        assert_eq!(stats.fail_count, 1);
        assert_eq!(stats.segv_count, 1);
    }

    #[test]
    fn empty_run_is_fully_passed() {
        let stats = RunStatistics::new(0);
        assert_eq!(stats.pass_percentage(), 100);
        assert_eq!(stats.percent_complete(), 100);
    }

    #[test]
    fn rounds_elapsed_to_hundredths() {
        assert_eq!(round_seconds(Duration::from_millis(1234)), 1.23);
        assert_eq!(round_seconds(Duration::from_millis(1236)), 1.24);
    }
}
