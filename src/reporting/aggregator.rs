//! # Aggregator Module / 结果聚合模块
//!
//! Accumulates outcomes into [`RunStatistics`], streams each one into the
//! report as it arrives, and produces the final [`Summary`].
//!
//! 将结果累积到 [`RunStatistics`]，在结果到达时将其流式写入报告，
//! 并生成最终的 [`Summary`]。

use anyhow::{Context, Result};
use std::time::Duration;

use crate::core::models::{Classification, ExecutionOutcome, RunStatistics, Summary};
use crate::reporting::junit::JunitReport;

pub struct Aggregator {
    statistics: RunStatistics,
    report: JunitReport,
    outcomes: Vec<ExecutionOutcome>,
}

impl Aggregator {
    pub fn new(total_expected: u64, report: JunitReport) -> Self {
        Self {
            statistics: RunStatistics::new(total_expected),
            report,
            outcomes: Vec::new(),
        }
    }

    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    /// Every outcome recorded so far, in arrival order.
    pub fn outcomes(&self) -> &[ExecutionOutcome] {
        &self.outcomes
    }

    /// Counts `outcome`, appends its report record and returns the percentage
    /// of expected outcomes completed so far.
    ///
    /// 统计 `outcome`，追加其报告记录，并返回目前已完成的预期结果百分比。
    pub fn record(&mut self, outcome: ExecutionOutcome) -> Result<u32> {
        self.statistics.apply(outcome.classification);
        self.report
            .write_case(&outcome)
            .with_context(|| format!("Failed to write report record for {}", outcome.case_name))?;
        self.outcomes.push(outcome);
        Ok(self.statistics.percent_complete())
    }

    /// Writes the framed report and returns the final figures.
    pub fn finalize(self, total_elapsed: Duration, stopped_early: bool) -> Result<Summary> {
        let failures: Vec<(String, Classification)> = self
            .outcomes
            .iter()
            .filter(|o| o.is_failure())
            .map(|o| (o.case_name.clone(), o.classification))
            .collect();

        let report_path = self.report.finalize(&self.statistics, total_elapsed)?;

        Ok(Summary {
            statistics: self.statistics,
            pass_percentage: self.statistics.pass_percentage(),
            total_elapsed,
            report_path,
            failures,
            stopped_early,
        })
    }
}
