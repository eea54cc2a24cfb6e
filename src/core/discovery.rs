//! # Case Discovery Module / 用例发现模块
//!
//! Collects descriptor files below `root/category` and orders them so that
//! numbered cases run in numeric order (`case2` before `case10`).
//!
//! 收集 `root/category` 下的描述文件，并按数字顺序排序
//! （`case2` 排在 `case10` 之前）。

use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Finds every `*.<extension>` file below `root/category`, recursively,
/// in numeric-aware order. A missing directory yields no cases.
///
/// # Arguments
/// * `root` - The test root directory
/// * `category` - Subdirectory filter; empty selects the whole root
/// * `extension` - Descriptor file extension, without the dot
pub fn discover(root: &Path, category: &str, extension: &str) -> Result<Vec<PathBuf>> {
    let search_dir = if category.is_empty() {
        root.to_path_buf()
    } else {
        root.join(category)
    };

    let pattern = format!(
        "{}/**/*.{}",
        glob::Pattern::escape(&search_dir.to_string_lossy()),
        glob::Pattern::escape(extension)
    );
    debug!(%pattern, "discovering descriptors");

    let mut paths = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("Invalid search pattern: {pattern}"))? {
        let path = entry.context("Failed to read directory entry during discovery")?;
        if path.is_file() {
            paths.push(path);
        }
    }

    sort_numeric_aware(&mut paths, root);
    Ok(paths)
}

/// Sorts paths by the integer formed from all digits in each path relative
/// to `root`. Paths without digits count as 0; ties fall back to lexical order.
///
/// 按路径（相对于 `root`）中所有数字组成的整数排序。
/// 没有数字的路径视为 0；相同时按字典序排序。
pub fn sort_numeric_aware(paths: &mut [PathBuf], root: &Path) {
    paths.sort_by_cached_key(|path| {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let text = relative.to_string_lossy().into_owned();
        (DigitKey::of(&text), text)
    });
}

/// An arbitrarily long non-negative integer, stored as its decimal digits
/// without leading zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitKey(String);

impl DigitKey {
    pub fn of(text: &str) -> Self {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        DigitKey(digits.trim_start_matches('0').to_string())
    }
}

impl Ord for DigitKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for DigitKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
