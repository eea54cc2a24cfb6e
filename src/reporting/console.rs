//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the run to the terminal: one colored line per outcome,
//! an optional progress bar, and the final summary.
//!
//! 此模块将运行过程输出到终端：每个结果一行彩色输出、可选的进度条以及最终摘要。
//!
//! ## Output Format / 输出格式
//! ```text
//! Running tests...
//!   [ 25%]  [PASS]  arithmetic (0.01s)
//!   [ 50%]  [SEGV]  recursion (0.12s)
//!   [ 75%]  [SKIP]  threads
//!   [100%]  [FAIL]  strings (0.02s)
//!
//! 2 tests failed, of which, 1 crashed
//! 1 tests skipped
//!
//! 25% of 4 tests passed
//! Took: 0:00:00.153201
//! ```

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::models::{Classification, ExecutionOutcome, RunPhase, RunStatistics, Summary};
use crate::infra::t;
use crate::reporting::progress::ProgressSink;

/// Formats a duration like `H:MM:SS.ffffff`.
pub fn format_elapsed(elapsed: std::time::Duration) -> String {
    let delta = chrono::TimeDelta::from_std(elapsed).unwrap_or_else(|_| chrono::TimeDelta::zero());
    let micros = delta.subsec_nanos() / 1_000;
    let seconds = delta.num_seconds();
    format!(
        "{}:{:02}:{:02}.{:06}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60,
        micros
    )
}

/// Formats a completion percentage as the fixed-width `[ 25%]` badge.
pub fn percent_badge(percent: u32) -> String {
    format!("[{:>3}%]", percent)
}

/// Renders the console line for one outcome.
pub fn outcome_line(outcome: &ExecutionOutcome, statistics: &RunStatistics, percent: u32) -> String {
    let badge = percent_badge(percent);
    let badge = if statistics.has_failures() {
        badge.red()
    } else {
        badge.green()
    };

    let tag = format!("[{}]", outcome.classification.tag());
    let tag = match outcome.classification {
        Classification::Pass => tag.green(),
        Classification::Fail | Classification::Timeout => tag.red(),
        Classification::Segv => tag.black().on_red(),
        Classification::Skip => tag.blue(),
    };

    let mut line = format!("  {}  {}  {}", badge, tag, outcome.case_name);
    if outcome.elapsed.is_some() {
        line.push_str(&format!(" ({}s)", outcome.elapsed_str()));
    }
    if outcome.classification == Classification::Timeout {
        line.push_str(&format!(" {}", "(timeout)".yellow()));
    }
    line
}

/// A [`ProgressSink`] that prints to the terminal.
///
/// In interactive mode a progress bar tracks dispatched cases and outcome
/// lines are printed above it; in non-interactive mode (CI) only plain lines
/// are printed.
///
/// 输出到终端的 [`ProgressSink`]。交互模式下显示进度条，结果行打印在进度条上方；
/// 非交互模式（CI）下只打印普通行。
pub struct ConsoleProgress {
    interactive: bool,
    bar: Option<ProgressBar>,
}

impl ConsoleProgress {
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            bar: None,
        }
    }

    fn start_bar(&mut self, len: usize, unit: &str) {
        if !self.interactive {
            return;
        }
        let bar = ProgressBar::new(len as u64);
        if let Ok(style) =
            ProgressStyle::with_template(&format!("{{bar:40.cyan/blue}} {{pos}}/{{len}} {unit} [{{elapsed_precise}}]"))
        {
            bar.set_style(style);
        }
        self.bar = Some(bar);
    }

    fn clear_bar(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn say(&self, line: &str) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{line}"),
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn phase(&mut self, phase: RunPhase) {
        match phase {
            RunPhase::Scanning => println!("{}", t!("run.scanning")),
            RunPhase::Executing => {
                self.clear_bar();
                println!("{}", t!("run.running"));
            }
            RunPhase::Finalized => self.clear_bar(),
            _ => {}
        }
    }

    fn scan_started(&mut self, descriptors: usize) {
        self.start_bar(descriptors, "descriptors");
    }

    fn descriptor_scanned(&mut self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn execution_started(&mut self, cases: usize) {
        self.start_bar(cases, "tests");
    }

    fn outcome(&mut self, outcome: &ExecutionOutcome, statistics: &RunStatistics, percent: u32) {
        self.say(&outcome_line(outcome, statistics, percent));
    }

    fn case_finished(&mut self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        self.clear_bar();
    }
}

/// Prints the final counts, pass percentage and duration.
///
/// 打印最终的计数、通过率和耗时。
pub fn print_summary(summary: &Summary, locale: &str) {
    let stats = &summary.statistics;
    if stats.has_failures() {
        println!(
            "\n{}",
            t!(
                "summary.failed",
                locale = locale,
                failed = stats.fail_count,
                crashed = stats.segv_count
            )
            .red()
        );
    } else {
        println!("\n{}", t!("summary.none_failed", locale = locale).green());
    }
    println!(
        "{}",
        t!("summary.skipped", locale = locale, count = stats.skip_count)
    );

    let pass_line = t!(
        "summary.pass_rate",
        locale = locale,
        percentage = summary.pass_percentage,
        total = stats.total_expected
    );
    let pass_line = if stats.has_failures() {
        pass_line.red().bold()
    } else {
        pass_line.green().bold()
    };
    println!("\n{}", pass_line);

    if summary.stopped_early {
        println!("{}", t!("summary.stopped_early", locale = locale).yellow());
    }
    println!(
        "{}",
        t!(
            "summary.took",
            locale = locale,
            duration = format_elapsed(summary.total_elapsed)
        )
    );
    println!(
        "{}",
        t!(
            "summary.report_written",
            locale = locale,
            path = summary.report_path.display()
        )
        .dimmed()
    );
}

/// Lists every failing case once, with how it failed.
///
/// 列出每个失败的用例及其失败方式（每个用例只列一次）。
pub fn print_failure_details(summary: &Summary, locale: &str) {
    if summary.failures.is_empty() {
        return;
    }

    println!("\n{}", t!("summary.failure_banner", locale = locale).red().bold());
    let mut seen = std::collections::HashSet::new();
    for (name, classification) in &summary.failures {
        if seen.insert((name.as_str(), *classification)) {
            println!("  - [{}] {}", classification.tag().red(), name.cyan());
        }
    }
}
