//! # Harness Module / 运行器模块
//!
//! The run context that drives a whole run through its phases:
//!
//! `NotStarted → Discovering → Scanning → Executing → Finalized`
//!
//! Discovery finds the descriptors, scanning loads and validates every one of
//! them and computes how many outcomes to expect, execution dispatches each
//! case (for every global repeat pass) to the engine one at a time, and
//! finalization writes the report. Descriptor errors abort the run before
//! anything executes.
//!
//! 驱动整个运行各阶段的运行上下文。发现阶段查找描述文件，扫描阶段加载并验证
//! 所有描述文件并计算预期结果数，执行阶段逐个将用例（每轮全局重复）交给引擎执行，
//! 最终阶段写入报告。描述文件错误会在任何用例执行之前中止运行。

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::core::descriptor;
use crate::core::discovery;
use crate::core::execution::ExecutionEngine;
use crate::core::models::{RunPhase, Summary, TestCaseDescriptor};
use crate::reporting::aggregator::Aggregator;
use crate::reporting::junit::JunitReport;
use crate::reporting::progress::ProgressSink;

/// Everything a run needs to know, resolved from config and CLI flags.
/// 一次运行所需的全部设置，由配置文件和命令行参数合并而来。
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub test_root: PathBuf,
    pub category: String,
    pub extension: String,
    pub subject: String,
    pub timeout: Duration,
    pub repeat: u32,
    pub stop_on_failure: bool,
    pub report_path: PathBuf,
    pub suite_name: String,
}

pub struct Harness<P: ProgressSink> {
    settings: RunSettings,
    engine: ExecutionEngine,
    progress: P,
    phase: RunPhase,
}

impl<P: ProgressSink> Harness<P> {
    pub fn new(settings: RunSettings, progress: P) -> Self {
        let engine = ExecutionEngine::new(settings.subject.clone(), settings.timeout);
        Self {
            settings,
            engine,
            progress,
            phase: RunPhase::NotStarted,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    fn enter(&mut self, phase: RunPhase) {
        debug!(from = ?self.phase, to = ?phase, "run phase change");
        self.phase = phase;
        self.progress.phase(phase);
    }

    /// Runs every discovered case and returns the summary.
    ///
    /// # Errors
    /// Fails on discovery errors, on any descriptor that cannot be loaded or
    /// validated, and on report I/O errors. Failing test cases are not errors;
    /// they show up in the summary.
    pub async fn run(&mut self) -> Result<Summary> {
        let started = Instant::now();

        self.enter(RunPhase::Discovering);
        let paths = discovery::discover(
            &self.settings.test_root,
            &self.settings.category,
            &self.settings.extension,
        )?;
        info!(count = paths.len(), "discovered descriptors");

        self.enter(RunPhase::Scanning);
        let descriptors = self.scan(&paths)?;
        let repeat = u64::from(self.settings.repeat.max(1));
        let total_expected: u64 = descriptors
            .iter()
            .map(|d| u64::from(d.iterations()))
            .sum::<u64>()
            * repeat;
        info!(total_expected, repeat, "scan complete");

        let report = JunitReport::create(&self.settings.report_path, self.settings.suite_name.clone())?;
        let mut aggregator = Aggregator::new(total_expected, report);

        self.enter(RunPhase::Executing);
        self.progress
            .execution_started(descriptors.len() * repeat as usize);
        let stopped_early = self.execute(&descriptors, &mut aggregator).await?;

        self.enter(RunPhase::Finalized);
        self.progress.finish();
        aggregator.finalize(started.elapsed(), stopped_early)
    }

    fn scan(&mut self, paths: &[PathBuf]) -> Result<Vec<TestCaseDescriptor>> {
        self.progress.scan_started(paths.len());
        let mut descriptors = Vec::with_capacity(paths.len());
        for path in paths {
            let descriptor = descriptor::load(path)
                .with_context(|| format!("Broken test suite at {}", path.display()))?;
            descriptors.push(descriptor);
            self.progress.descriptor_scanned();
        }
        Ok(descriptors)
    }

    /// Returns `true` if stop-on-failure ended execution early.
    async fn execute(
        &mut self,
        descriptors: &[TestCaseDescriptor],
        aggregator: &mut Aggregator,
    ) -> Result<bool> {
        for descriptor in descriptors {
            for pass in 0..self.settings.repeat.max(1) {
                if self.settings.stop_on_failure && aggregator.statistics().has_failures() {
                    info!(case = %descriptor.name, pass, "stopping after first failure");
                    return Ok(true);
                }

                let prepared = self.engine.prepare(descriptor);
                for _ in 0..prepared.iterations() {
                    let outcome = self.engine.run_iteration(&prepared).await;
                    let percent = aggregator.record(outcome)?;
                    if let Some(recorded) = aggregator.outcomes().last() {
                        self.progress
                            .outcome(recorded, aggregator.statistics(), percent);
                    }
                }
                drop(prepared);
                self.progress.case_finished();
            }
        }
        Ok(false)
    }
}
