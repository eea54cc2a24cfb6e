//! # Error Types Module / 错误类型模块
//!
//! Typed errors for the two halves of a run: descriptor errors, which are
//! fatal to the whole run, and execution errors, which are recovered into a
//! failing outcome for the single case that produced them.
//!
//! 运行过程中的两类错误：描述文件错误（终止整个运行）
//! 和执行错误（仅将当前用例记为失败）。

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Why a syntactically valid descriptor was rejected.
/// 语法正确但内容无效的描述文件被拒绝的原因。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("descriptor is not a mapping")]
    NotAMapping,
    #[error("missing source file")]
    MissingSource,
    #[error("bad source path: {0}")]
    SourceNotFound(PathBuf),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("`loop` must be at least 1, got {0}")]
    LoopCount(i64),
    #[error("{0}")]
    Shape(String),
}

/// Errors raised while loading a test-case descriptor.
///
/// `ParseError` means the file is not well-formed YAML ("bad file");
/// `InvalidDescriptor` means it parsed but its content is unusable ("bad content").
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read descriptor {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bad yaml file {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid descriptor {}: {reason}", path.display())]
    InvalidDescriptor { path: PathBuf, reason: InvalidReason },
}

impl DescriptorError {
    /// The descriptor file the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            DescriptorError::Io { path, .. }
            | DescriptorError::ParseError { path, .. }
            | DescriptorError::InvalidDescriptor { path, .. } => path,
        }
    }
}

/// Errors raised while executing a single iteration of a case.
/// None of these abort the run.
/// 执行单次迭代时产生的错误，均不会中止整个运行。
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("timeout")]
    Timeout(Duration),
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to capture process output: {0}")]
    Capture(#[source] std::io::Error),
    #[error("failed to read expected output {}: {source}", path.display())]
    ExpectedOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid command `{0}`")]
    Command(String),
}

impl ExecutionError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExecutionError::Timeout(_))
    }
}
