//! # Descriptor Loader Module / 描述文件加载模块
//!
//! Parses a YAML test-case descriptor into a validated [`TestCaseDescriptor`].
//! Parsing happens in two steps so that malformed YAML (`ParseError`) and
//! well-formed YAML with unusable content (`InvalidDescriptor`) stay distinct.
//!
//! 将 YAML 测试用例描述解析为经过验证的 [`TestCaseDescriptor`]。
//! 解析分为两步，以区分格式错误的 YAML（`ParseError`）
//! 和格式正确但内容无效的描述（`InvalidDescriptor`）。
//!
//! ```yaml
//! name: arithmetic
//! src: arithmetic.dwt
//! out: arithmetic.out
//! err: arithmetic.err
//! exitcode: 0
//! skip: false
//! loop: 3            # optional
//! cmd: valgrind dwt  # optional
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::error::{DescriptorError, InvalidReason};
use crate::core::models::TestCaseDescriptor;
use crate::infra::fs;

/// The descriptor as written on disk, before validation.
#[derive(Debug, Deserialize)]
struct RawDescriptor {
    name: Option<String>,
    src: Option<PathBuf>,
    out: Option<PathBuf>,
    err: Option<PathBuf>,
    exitcode: Option<i32>,
    #[serde(default)]
    skip: bool,
    cmd: Option<String>,
    #[serde(rename = "loop")]
    loop_count: Option<i64>,
}

/// Loads and validates the descriptor at `path`.
///
/// # Errors
/// - [`DescriptorError::Io`] if the file cannot be read
/// - [`DescriptorError::ParseError`] if it is not well-formed YAML
/// - [`DescriptorError::InvalidDescriptor`] if a required field is missing,
///   a field has the wrong type, `loop` is below 1, or `src` does not exist
pub fn load(path: &Path) -> Result<TestCaseDescriptor, DescriptorError> {
    let content = std::fs::read_to_string(path).map_err(|source| DescriptorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let descriptor = parse(path, &content)?;
    debug!(
        name = %descriptor.name,
        loops = descriptor.loop_count,
        skip = descriptor.skip,
        "loaded descriptor {}",
        path.display()
    );
    Ok(descriptor)
}

/// Parses descriptor text. `path` locates the descriptor, which anchors
/// relative paths and supplies the default case name.
pub fn parse(path: &Path, content: &str) -> Result<TestCaseDescriptor, DescriptorError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|source| DescriptorError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;

    let invalid = |reason| DescriptorError::InvalidDescriptor {
        path: path.to_path_buf(),
        reason,
    };

    if !value.is_mapping() {
        return Err(invalid(InvalidReason::NotAMapping));
    }

    let raw: RawDescriptor =
        serde_yaml::from_value(value).map_err(|e| invalid(InvalidReason::Shape(e.to_string())))?;

    validate(raw, path, fs::parent_dir(path)).map_err(invalid)
}

fn validate(
    raw: RawDescriptor,
    path: &Path,
    base_dir: PathBuf,
) -> Result<TestCaseDescriptor, InvalidReason> {
    let source_path = raw.src.ok_or(InvalidReason::MissingSource)?;
    let resolved = base_dir.join(&source_path);
    if !resolved.is_file() {
        return Err(InvalidReason::SourceNotFound(source_path));
    }

    let loop_count = match raw.loop_count {
        None => 1,
        Some(n) if n >= 1 => u32::try_from(n).map_err(|_| InvalidReason::LoopCount(n))?,
        Some(n) => return Err(InvalidReason::LoopCount(n)),
    };

    let name = raw.name.unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    Ok(TestCaseDescriptor {
        name,
        source_path,
        expected_stdout_path: raw.out.ok_or(InvalidReason::MissingField("out"))?,
        expected_stderr_path: raw.err.ok_or(InvalidReason::MissingField("err"))?,
        expected_exit_code: raw.exitcode.ok_or(InvalidReason::MissingField("exitcode"))?,
        skip: raw.skip,
        command_override: raw.cmd.filter(|c| !c.trim().is_empty()),
        loop_count,
        base_dir,
    })
}
