//! # Configuration Module / 配置模块
//!
//! Defines the harness configuration loaded from an optional TOML file
//! (`CaseRunner.toml` by default). Every key has a default, and command-line
//! flags override whatever the file says.
//!
//! 定义从可选 TOML 文件（默认 `CaseRunner.toml`）加载的运行配置。
//! 每个键都有默认值，命令行参数会覆盖文件中的设置。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "CaseRunner.toml";

/// Harness-wide settings.
/// 运行器的全局设置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// The language for console messages (e.g., "en", "zh-CN"). When unset the
    /// `--lang` flag or the system locale decides.
    ///
    /// 控制台消息使用的语言（例如 "en", "zh-CN"）。
    /// 未设置时由 `--lang` 参数或系统语言决定。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// The executable under test, possibly with leading arguments.
    /// 被测可执行程序，可以带有前置参数。
    pub subject: String,
    /// Directory searched for descriptors.
    /// 搜索描述文件的目录。
    pub test_root: PathBuf,
    /// Descriptor file extension, without the dot.
    pub extension: String,
    /// Where the JUnit report is written.
    /// JUnit 报告的输出路径。
    pub report_path: PathBuf,
    /// The `name` attribute of the report's test suite.
    pub suite_name: String,
    /// Per-iteration hard timeout in seconds.
    /// 每次迭代的超时时间（秒）。
    pub timeout_secs: u64,
    /// How many times the whole suite is run back to back.
    /// 整个测试集连续运行的次数。
    pub repeat: u32,
    /// Stop dispatching cases once anything has failed.
    /// 一旦出现失败就停止执行后续用例。
    pub stop_on_failure: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            language: None,
            subject: "dwt".to_string(),
            test_root: PathBuf::from("test"),
            extension: "yml".to_string(),
            report_path: PathBuf::from("dwt_junit.xml"),
            suite_name: "dwt tests".to_string(),
            timeout_secs: 300,
            repeat: 1,
            stop_on_failure: false,
        }
    }
}

impl HarnessConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<()> {
        if self.subject.trim().is_empty() {
            anyhow::bail!("`subject` must not be empty");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("`timeout_secs` must be at least 1");
        }
        if self.repeat == 0 {
            anyhow::bail!("`repeat` must be at least 1");
        }
        Ok(())
    }
}

/// Reads and parses a configuration file.
pub fn load_config(path: &Path) -> Result<HarnessConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Loads the configuration at `path`, falling back to defaults when the file
/// does not exist and was not explicitly requested.
///
/// 加载 `path` 处的配置；如果文件不存在且未被显式指定，则使用默认配置。
pub fn load_or_default(path: &Path, explicit: bool) -> Result<HarnessConfig> {
    if !explicit && !path.exists() {
        return Ok(HarnessConfig::default());
    }
    load_config(path)
}

/// Makes a subject given as a relative path (e.g. `./build/dwt`) absolute,
/// so it stays valid when the subject runs inside a descriptor's directory.
/// Bare program names are left for `PATH` lookup.
///
/// 将以相对路径给出的被测程序（例如 `./build/dwt`）转换为绝对路径，
/// 以便在描述文件目录中运行时依然有效。纯程序名保留给 `PATH` 查找。
pub fn absolutize_subject(subject: &str, cwd: &Path) -> String {
    let expanded = shellexpand::full(subject)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| subject.to_string());
    let Some(parts) = shlex::split(&expanded) else {
        return expanded;
    };
    let Some((program, args)) = parts.split_first() else {
        return expanded;
    };

    let program_path = Path::new(program);
    if program_path.is_absolute() || program_path.components().count() < 2 {
        return expanded;
    }

    let resolved = cwd.join(program_path).to_string_lossy().into_owned();
    let mut words = vec![resolved];
    words.extend(args.iter().cloned());
    shlex::try_join(words.iter().map(String::as_str)).unwrap_or(expanded)
}
