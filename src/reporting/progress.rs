//! # Progress Sink Module / 进度接收器模块
//!
//! The harness reports what it is doing through [`ProgressSink`]. Every method
//! has a no-op default, so a sink only implements the events it cares about.
//!
//! 运行器通过 [`ProgressSink`] 报告进度。每个方法都有空的默认实现，
//! 接收器只需实现它关心的事件。

use crate::core::models::{ExecutionOutcome, RunPhase, RunStatistics};

pub trait ProgressSink {
    /// The run entered a new phase.
    fn phase(&mut self, _phase: RunPhase) {}

    /// Scanning is about to load `descriptors` files.
    fn scan_started(&mut self, _descriptors: usize) {}

    fn descriptor_scanned(&mut self) {}

    /// Execution is about to dispatch `cases` case runs.
    fn execution_started(&mut self, _cases: usize) {}

    /// An outcome was recorded. `statistics` already includes it.
    fn outcome(&mut self, _outcome: &ExecutionOutcome, _statistics: &RunStatistics, _percent: u32) {}

    /// A case finished all its iterations for one pass.
    fn case_finished(&mut self) {}

    fn finish(&mut self) {}
}

/// A sink that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {}

impl<S: ProgressSink + ?Sized> ProgressSink for &mut S {
    fn phase(&mut self, phase: RunPhase) {
        (**self).phase(phase)
    }

    fn scan_started(&mut self, descriptors: usize) {
        (**self).scan_started(descriptors)
    }

    fn descriptor_scanned(&mut self) {
        (**self).descriptor_scanned()
    }

    fn execution_started(&mut self, cases: usize) {
        (**self).execution_started(cases)
    }

    fn outcome(&mut self, outcome: &ExecutionOutcome, statistics: &RunStatistics, percent: u32) {
        (**self).outcome(outcome, statistics, percent)
    }

    fn case_finished(&mut self) {
        (**self).case_finished()
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}
