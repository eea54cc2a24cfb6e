//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Case Runner: data models,
//! configuration, descriptor loading, case discovery, the execution engine
//! and the harness that ties them together.
//!
//! 此模块包含 Case Runner 的核心功能：数据模型、配置、描述文件加载、
//! 用例发现、执行引擎以及将它们串联起来的运行器。

pub mod config;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod execution;
pub mod harness;
pub mod models;

// Re-exports
pub use config::HarnessConfig;
pub use error::{DescriptorError, ExecutionError, InvalidReason};
pub use execution::ExecutionEngine;
pub use harness::{Harness, RunSettings};
pub use models::{Classification, ExecutionOutcome, RunStatistics, Summary, TestCaseDescriptor};
