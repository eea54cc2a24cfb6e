//! # Command Execution Module / 命令执行模块
//!
//! Builds subject commands from command strings and runs them with captured
//! output and a hard timeout.
//!
//! 根据命令字符串构建被测命令，并在捕获输出和强制超时的条件下运行。

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::error::ExecutionError;

/// Signal number of a segmentation violation.
pub const SIGSEGV: i32 = 11;

/// Exit status a shell reports for a child killed by SIGSEGV (128 + 11).
pub const SEGV_EXIT_STATUS: i32 = 128 + SIGSEGV;

/// Everything a finished process left behind.
/// 已结束进程的全部输出信息。
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    /// The exit code, or `-signal` when the process was killed by a signal.
    pub fn exit_code(&self) -> i32 {
        exit_code_of(&self.status)
    }

    /// `true` if the process died from a segmentation violation, either
    /// directly or as reported by a wrapping shell.
    pub fn is_segv(&self) -> bool {
        terminating_signal(&self.status) == Some(SIGSEGV)
            || self.status.code() == Some(SEGV_EXIT_STATUS)
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

pub fn exit_code_of(status: &ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => terminating_signal(status).map(|s| -s).unwrap_or(-1),
    }
}

#[cfg(unix)]
fn terminating_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Turns a command string into a command ready to receive its final
/// argument. The string is shell-expanded (`$VAR`, `~`) and split with shell
/// quoting rules. A relative program path containing a separator is resolved
/// against `working_dir`, which also becomes the child's working directory.
///
/// 将命令字符串转换为可追加最终参数的命令。字符串会先进行 shell 展开
/// （`$VAR`、`~`），再按 shell 引号规则拆分。带分隔符的相对程序路径
/// 以 `working_dir` 为基准解析，`working_dir` 同时作为子进程的工作目录。
pub fn build_command(
    command_line: &str,
    working_dir: &Path,
) -> Result<tokio::process::Command, ExecutionError> {
    let expanded = shellexpand::full(command_line)
        .map_err(|e| ExecutionError::Command(format!("{command_line}: {e}")))?
        .into_owned();

    let parts = shlex::split(&expanded)
        .ok_or_else(|| ExecutionError::Command(expanded.clone()))?;
    let Some((program, args)) = parts.split_first() else {
        return Err(ExecutionError::Command(command_line.to_string()));
    };

    let program_path = Path::new(program);
    let program = if program_path.is_relative() && program_path.components().count() > 1 {
        working_dir.join(program_path)
    } else {
        program_path.to_path_buf()
    };

    let mut cmd = tokio::process::Command::new(program);
    cmd.args(args).current_dir(working_dir);
    Ok(cmd)
}

/// Spawns a command, captures stdout and stderr separately, and waits at most
/// `limit` for it to finish. On timeout the child is killed.
///
/// The child inherits the caller's environment and gets no stdin.
///
/// 派生命令，分别捕获 stdout 和 stderr，并最多等待 `limit`。
/// 超时后子进程会被终止。
///
/// # Returns
/// The captured output, or an [`ExecutionError`] for launch failures,
/// capture failures and timeouts.
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
    limit: Duration,
) -> Result<CapturedOutput, ExecutionError> {
    let program = cmd.as_std().get_program().to_string_lossy().into_owned();

    let child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExecutionError::Spawn {
            program: program.clone(),
            source,
        })?;
    debug!(%program, pid = child.id(), "spawned subject");

    // Dropping the pending future drops the child, and kill_on_drop reaps it.
    match tokio::time::timeout(limit, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(CapturedOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        }),
        Ok(Err(e)) => Err(ExecutionError::Capture(e)),
        Err(_) => {
            warn!(%program, timeout_secs = limit.as_secs(), "subject timed out and was killed");
            Err(ExecutionError::Timeout(limit))
        }
    }
}
