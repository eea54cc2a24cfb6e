//! # Reporting Module / 报告模块
//!
//! This module turns the engine's outcome stream into results: the run-wide
//! aggregator, the JUnit XML report, the progress sink interface and the
//! colored console presentation layered on top of it.
//!
//! 此模块将引擎的结果流转换为报告：全局聚合器、JUnit XML 报告、
//! 进度接收器接口以及基于它的彩色控制台输出。

pub mod aggregator;
pub mod console;
pub mod junit;
pub mod progress;

// Re-export common reporting items
pub use aggregator::Aggregator;
pub use console::{ConsoleProgress, print_failure_details, print_summary};
pub use junit::JunitReport;
pub use progress::{NoopProgress, ProgressSink};
