//! # Case Runner Library / Case Runner 库
//!
//! This library provides the core functionality for the Case Runner tool,
//! a descriptor-driven test harness: it discovers YAML test-case descriptors,
//! runs an executable against each, compares output and exit codes with the
//! expected values, and writes a JUnit report.
//!
//! 此库为 Case Runner 工具提供核心功能，这是一个由描述文件驱动的测试工具：
//! 它发现 YAML 测试用例描述，针对每个用例运行可执行程序，
//! 将输出和退出码与期望值比较，并生成 JUnit 报告。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, descriptor loading, discovery and the execution engine
//! - `infra` - Infrastructure services like command execution and file system operations
//! - `reporting` - Aggregation, JUnit report and console output
//! - `cli` / `commands` - Command-line interface and commands
//!
//! - `core` - 数据模型、描述文件加载、用例发现和执行引擎
//! - `infra` - 基础设施服务，如命令执行和文件系统操作
//! - `reporting` - 结果聚合、JUnit 报告和控制台输出
//! - `cli` / `commands` - 命令行接口和命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::execution;
pub use core::models;

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

/// Picks the language for console messages.
///
/// An explicitly requested language wins; otherwise the system locale is used.
/// The full locale is matched first (e.g., "zh-CN"), then just the language
/// code (e.g., "en" from "en-US"), and finally "en".
///
/// 选择控制台消息使用的语言。显式指定的语言优先，否则使用系统语言。
/// 先匹配完整区域（例如 "zh-CN"），再匹配语言代码（例如 "en-US" 中的 "en"），
/// 最后回退到 "en"。
pub fn resolve_locale(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    let is_available = |code: &str| available_locales.iter().any(|l| *l == code);

    if is_available(&locale) {
        return locale;
    }
    locale
        .split(['-', '_'])
        .next()
        .filter(|lang_code| is_available(lang_code))
        .unwrap_or("en")
        .to_string()
}

/// Sets up diagnostic logging to stderr, filtered by `RUST_LOG` (default `warn`).
///
/// 设置输出到 stderr 的诊断日志，由 `RUST_LOG` 过滤（默认 `warn`）。
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
