//! # File System Operations Module / 文件系统操作模块
//!
//! Helpers for reading expected-output files and for writing the report
//! atomically through temporary files placed beside it.
//!
//! 读取期望输出文件，以及通过同目录临时文件原子写入报告的辅助函数。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::core::error::ExecutionError;

/// Reads an expected-output file in full.
pub fn read_expected(path: &Path) -> Result<Vec<u8>, ExecutionError> {
    fs::read(path).map_err(|source| ExecutionError::ExpectedOutput {
        path: path.to_path_buf(),
        source,
    })
}

/// Directory a file at `path` lives in, defaulting to the current directory.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Creates a temporary file in the same directory as `target`, so that it
/// can later be renamed onto `target` without crossing file systems.
///
/// 在 `target` 所在目录创建临时文件，以便之后无需跨文件系统即可重命名为 `target`。
pub fn sibling_temp_file(target: &Path) -> Result<NamedTempFile> {
    let dir = parent_dir(target);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create report directory: {}", dir.display()))?;
    tempfile::Builder::new()
        .prefix(".case_runner_")
        .suffix(".tmp")
        .tempfile_in(&dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))
}

/// Atomically replaces `target` with the temporary file.
pub fn persist(file: NamedTempFile, target: &Path) -> Result<()> {
    file.persist(target)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(())
}
