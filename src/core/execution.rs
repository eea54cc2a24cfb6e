//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! This module runs a single test case against the subject executable. A case
//! is first prepared, which reads its expected output once, and then run once
//! per loop iteration. Every iteration yields exactly one [`ExecutionOutcome`];
//! launch failures, I/O errors and timeouts become failing outcomes instead of
//! errors, so one broken case never aborts the run.
//!
//! 此模块针对被测程序运行单个测试用例。用例先被准备（只读取一次期望输出），
//! 然后按循环次数逐次运行。每次迭代恰好产生一个 [`ExecutionOutcome`]；
//! 启动失败、I/O 错误和超时都会转换为失败结果而不是错误，
//! 因此单个损坏的用例不会中止整个运行。

use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::core::error::ExecutionError;
use crate::core::models::{Classification, ExecutionOutcome, TestCaseDescriptor};
use crate::infra::{command, fs};

/// The expected output of a case, read once before its loop starts.
/// 用例的期望输出，在循环开始前读取一次。
#[derive(Debug, Clone)]
pub struct ExpectedOutput {
    pub stdout: Vec<u8>,
    /// Informational only; never compared against captured stderr.
    /// 仅供参考，从不与捕获的 stderr 比较。
    pub stderr: Vec<u8>,
}

/// A case ready to be iterated. Dropping it releases the expected output.
/// 准备好迭代的用例。丢弃它即释放期望输出。
#[derive(Debug)]
pub struct PreparedCase<'a> {
    descriptor: &'a TestCaseDescriptor,
    /// `None` for skipped cases, which never read their expected files.
    expected: Option<Result<ExpectedOutput, String>>,
}

impl<'a> PreparedCase<'a> {
    pub fn descriptor(&self) -> &'a TestCaseDescriptor {
        self.descriptor
    }

    /// Number of iterations this case produces.
    pub fn iterations(&self) -> u32 {
        self.descriptor.iterations()
    }
}

/// Runs test cases against a subject executable with a hard timeout.
/// 在强制超时下针对被测程序运行测试用例。
#[derive(Debug, Clone)]
pub struct ExecutionEngine {
    subject: String,
    timeout: Duration,
}

impl ExecutionEngine {
    /// # Arguments
    /// * `subject` - Command line of the executable under test; the source
    ///   file is appended as its final argument
    /// * `timeout` - Upper bound for a single iteration
    pub fn new(subject: impl Into<String>, timeout: Duration) -> Self {
        Self {
            subject: subject.into(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Reads the expected output of `descriptor`, unless it is skipped.
    /// A read failure is kept and turns every iteration into a failure.
    pub fn prepare<'a>(&self, descriptor: &'a TestCaseDescriptor) -> PreparedCase<'a> {
        let expected = (!descriptor.skip).then(|| {
            read_expected_output(descriptor).map_err(|e| {
                debug!(case = %descriptor.name, error = %e, "expected output unavailable");
                e.to_string()
            })
        });
        PreparedCase {
            descriptor,
            expected,
        }
    }

    /// Runs one iteration of a prepared case.
    pub async fn run_iteration(&self, prepared: &PreparedCase<'_>) -> ExecutionOutcome {
        let descriptor = prepared.descriptor;
        let expected = match &prepared.expected {
            None => return ExecutionOutcome::skipped(&descriptor.name),
            Some(Err(message)) => {
                return ExecutionOutcome::without_output(
                    &descriptor.name,
                    Classification::Fail,
                    Duration::ZERO,
                    message.clone(),
                );
            }
            Some(Ok(expected)) => expected,
        };

        let start = Instant::now();
        let result = self.invoke(descriptor).await;
        let elapsed = start.elapsed();

        match result {
            Ok(output) => {
                let exit_code = output.exit_code();
                let stdout_matches = output.stdout == expected.stdout;
                let exit_matches = exit_code == descriptor.expected_exit_code;
                trace!(
                    case = %descriptor.name,
                    exit_code,
                    stdout_matches,
                    "iteration finished"
                );

                let classification = if stdout_matches && exit_matches {
                    Classification::Pass
                } else if output.is_segv() {
                    Classification::Segv
                } else {
                    Classification::Fail
                };

                ExecutionOutcome {
                    case_name: descriptor.name.clone(),
                    elapsed: Some(elapsed),
                    classification,
                    captured_stdout: output.stdout_text(),
                    captured_stderr: output.stderr_text(),
                    detail: None,
                }
            }
            Err(e) => {
                let classification = if e.is_timeout() {
                    Classification::Timeout
                } else {
                    Classification::Fail
                };
                ExecutionOutcome::without_output(
                    &descriptor.name,
                    classification,
                    elapsed,
                    e.to_string(),
                )
            }
        }
    }

    /// Runs every iteration of `descriptor` and returns the outcomes in order.
    /// A skipped case yields a single `Skip` outcome.
    ///
    /// 运行 `descriptor` 的所有迭代并按顺序返回结果。跳过的用例只产生一个 `Skip` 结果。
    pub async fn run(&self, descriptor: &TestCaseDescriptor) -> Vec<ExecutionOutcome> {
        let prepared = self.prepare(descriptor);
        let mut outcomes = Vec::with_capacity(prepared.iterations() as usize);
        for _ in 0..prepared.iterations() {
            outcomes.push(self.run_iteration(&prepared).await);
        }
        outcomes
    }

    async fn invoke(
        &self,
        descriptor: &TestCaseDescriptor,
    ) -> Result<command::CapturedOutput, ExecutionError> {
        let command_line = descriptor
            .command_override
            .as_deref()
            .unwrap_or(&self.subject);
        let mut cmd = command::build_command(command_line, &descriptor.base_dir)?;
        cmd.arg(&descriptor.source_path);
        debug!(case = %descriptor.name, command = %command_line, "running case");
        command::spawn_and_capture(cmd, self.timeout).await
    }
}

fn read_expected_output(descriptor: &TestCaseDescriptor) -> Result<ExpectedOutput, ExecutionError> {
    let stdout = fs::read_expected(&descriptor.resolve(&descriptor.expected_stdout_path))?;
    let stderr = fs::read_expected(&descriptor.resolve(&descriptor.expected_stderr_path))?;
    Ok(ExpectedOutput { stdout, stderr })
}
