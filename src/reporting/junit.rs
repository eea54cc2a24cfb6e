//! # JUnit Reporting Module / JUnit 报告模块
//!
//! Writes the run report as a JUnit XML document in two phases. Case records
//! stream into a temporary body file while the run is in progress; once the
//! totals are known, [`JunitReport::finalize`] writes the XML declaration and
//! the `<testsuite>` element carrying them, copies the body after it, closes
//! the suite and atomically moves the result onto the report path.
//!
//! 以两个阶段写入 JUnit XML 报告。运行过程中，用例记录流式写入临时正文文件；
//! 总数确定后，[`JunitReport::finalize`] 写入 XML 声明和带有统计的
//! `<testsuite>` 元素，随后复制正文、关闭测试集，并原子地移动到报告路径。

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

use crate::core::models::{Classification, ExecutionOutcome, RunStatistics};
use crate::infra::fs;

/// Escapes text for embedding in XML content or attribute values.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the `<testcase>` record for one outcome.
///
/// Failures carry a `<failure>` element. Outcomes without process output
/// (timeouts, launch errors) put their detail in the failure message and
/// omit captured output. Skipped cases have no timing and empty output.
pub fn render_case(outcome: &ExecutionOutcome) -> String {
    let mut xml = String::new();
    let name = escape_markup(&outcome.case_name);
    let _ = writeln!(
        xml,
        "<testcase name=\"{}\" time=\"{}\">",
        name,
        outcome.elapsed_str()
    );

    match outcome.classification {
        Classification::Skip => {
            xml.push_str("<skipped message=\"\" type=\"\"/>\n");
            xml.push_str("<system-out></system-out>\n");
            xml.push_str("<system-err></system-err>\n");
        }
        Classification::Pass => push_output(&mut xml, outcome),
        Classification::Timeout => {
            xml.push_str("<failure message=\"timeout\" type=\"\"/>\n");
        }
        Classification::Segv => {
            xml.push_str("<failure message=\"SIGSEGV\" type=\"\"/>\n");
            push_output(&mut xml, outcome);
        }
        Classification::Fail => match &outcome.detail {
            Some(detail) => {
                let _ = writeln!(
                    xml,
                    "<failure message=\"{}\" type=\"\"/>",
                    escape_markup(detail)
                );
            }
            None => {
                xml.push_str("<failure message=\"\" type=\"\"/>\n");
                push_output(&mut xml, outcome);
            }
        },
    }

    xml.push_str("</testcase>\n");
    xml
}

fn push_output(xml: &mut String, outcome: &ExecutionOutcome) {
    let _ = write!(
        xml,
        "<system-out>\n{}</system-out>\n<system-err>\n{}</system-err>\n",
        escape_markup(&outcome.captured_stdout),
        escape_markup(&outcome.captured_stderr)
    );
}

/// Renders the XML declaration and the opening `<testsuite>` element.
pub fn render_header(suite_name: &str, statistics: &RunStatistics, elapsed: Duration) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <testsuite tests=\"{}\" errors=\"0\" failures=\"{}\" skipped=\"{}\" name=\"{}\" time=\"{:.2}\">\n",
        statistics.total_expected,
        statistics.fail_count,
        statistics.skip_count,
        escape_markup(suite_name),
        elapsed.as_secs_f64()
    )
}

pub const FOOTER: &str = "</testsuite>\n";

/// A JUnit report under construction.
/// 正在构建中的 JUnit 报告。
pub struct JunitReport {
    path: PathBuf,
    suite_name: String,
    body: BufWriter<NamedTempFile>,
    records: usize,
}

impl JunitReport {
    /// Starts a report that will end up at `path`. Nothing is written to
    /// `path` until [`finalize`](Self::finalize).
    pub fn create(path: &Path, suite_name: impl Into<String>) -> Result<Self> {
        let body = fs::sibling_temp_file(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            suite_name: suite_name.into(),
            body: BufWriter::new(body),
            records: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> usize {
        self.records
    }

    /// Appends the record for `outcome` to the body.
    pub fn write_case(&mut self, outcome: &ExecutionOutcome) -> io::Result<()> {
        self.body.write_all(render_case(outcome).as_bytes())?;
        self.records += 1;
        Ok(())
    }

    /// Frames the streamed body with the header and footer and moves the
    /// finished document onto the report path.
    pub fn finalize(self, statistics: &RunStatistics, elapsed: Duration) -> Result<PathBuf> {
        let mut body = self
            .body
            .into_inner()
            .map_err(|e| e.into_error())
            .context("Failed to flush report body")?;
        body.as_file_mut()
            .seek(SeekFrom::Start(0))
            .context("Failed to rewind report body")?;

        let output = fs::sibling_temp_file(&self.path)?;
        let mut writer = BufWriter::new(output);
        writer.write_all(render_header(&self.suite_name, statistics, elapsed).as_bytes())?;
        io::copy(body.as_file_mut(), &mut writer).context("Failed to copy report body")?;
        writer.write_all(FOOTER.as_bytes())?;

        let output = writer
            .into_inner()
            .map_err(|e| e.into_error())
            .context("Failed to flush report")?;
        fs::persist(output, &self.path)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_markup_characters() {
        assert_eq!(
            escape_markup(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&apos;&amp;&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn skipped_record_has_no_time() {
        let xml = render_case(&ExecutionOutcome::skipped("later"));
        assert!(xml.starts_with("<testcase name=\"later\" time=\"\">"));
        assert!(xml.contains("<skipped message=\"\" type=\"\"/>"));
    }
}
