//! # Reporting Unit Tests / 报告单元测试
//!
//! Tests for the JUnit writer and the aggregator: record rendering, the
//! two-phase report layout and the final statistics.
//!
//! JUnit 写入器和聚合器的测试：记录渲染、两阶段报告布局以及最终统计。

use case_runner::core::models::{Classification, ExecutionOutcome, RunStatistics};
use case_runner::reporting::junit::{JunitReport, render_case, render_header};
use case_runner::reporting::Aggregator;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn outcome(name: &str, classification: Classification, stdout: &str) -> ExecutionOutcome {
    ExecutionOutcome {
        case_name: name.to_string(),
        elapsed: Some(Duration::from_millis(250)),
        classification,
        captured_stdout: stdout.to_string(),
        captured_stderr: String::new(),
        detail: None,
    }
}

#[cfg(test)]
mod record_tests {
    use super::*;

    #[test]
    fn test_passing_record_carries_output() {
        let xml = render_case(&outcome("adds", Classification::Pass, "3\n"));
        assert_eq!(
            xml,
            "<testcase name=\"adds\" time=\"0.25\">\n\
             <system-out>\n3\n</system-out>\n\
             <system-err>\n</system-err>\n\
             </testcase>\n"
        );
    }

    #[test]
    fn test_failing_record_escapes_output() {
        let xml = render_case(&outcome("cmp", Classification::Fail, "a < b && c\n"));
        assert!(xml.contains("<failure message=\"\" type=\"\"/>"));
        assert!(xml.contains("a &lt; b &amp;&amp; c"));
    }

    #[test]
    fn test_crash_record_is_marked() {
        let xml = render_case(&outcome("deep", Classification::Segv, ""));
        assert!(xml.contains("<failure message=\"SIGSEGV\" type=\"\"/>"));
    }

    #[test]
    fn test_timeout_record_has_no_output() {
        let timed_out = ExecutionOutcome::without_output(
            "spin",
            Classification::Timeout,
            Duration::from_secs(2),
            "timeout",
        );
        let xml = render_case(&timed_out);
        assert!(xml.contains("time=\"2.00\""));
        assert!(xml.contains("<failure message=\"timeout\" type=\"\"/>"));
        assert!(!xml.contains("<system-out>"));
    }

    #[test]
    fn test_launch_error_detail_becomes_message() {
        let broken = ExecutionOutcome::without_output(
            "ghost",
            Classification::Fail,
            Duration::ZERO,
            "failed to launch `nope`: \"No such file\"",
        );
        let xml = render_case(&broken);
        assert!(xml.contains("message=\"failed to launch `nope`: &quot;No such file&quot;\""));
    }

    #[test]
    fn test_header_carries_totals() {
        let mut stats = RunStatistics::new(4);
        stats.apply(Classification::Pass);
        stats.apply(Classification::Segv);
        stats.apply(Classification::Skip);
        let header = render_header("dwt & co", &stats, Duration::from_millis(1234));
        assert_eq!(
            header,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <testsuite tests=\"4\" errors=\"0\" failures=\"1\" skipped=\"1\" name=\"dwt &amp; co\" time=\"1.23\">\n"
        );
    }
}

#[cfg(test)]
mod report_file_tests {
    use super::*;

    #[test]
    fn test_report_is_framed_after_the_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports/junit.xml");

        let mut report = JunitReport::create(&path, "suite").unwrap();
        assert_eq!(report.path(), path.as_path());
        report
            .write_case(&outcome("first", Classification::Pass, ""))
            .unwrap();
        report
            .write_case(&ExecutionOutcome::skipped("second"))
            .unwrap();
        assert_eq!(report.records(), 2);
        assert!(!path.exists(), "nothing lands on the report path before finalize");

        let mut stats = RunStatistics::new(2);
        stats.apply(Classification::Pass);
        stats.apply(Classification::Skip);
        let written = report.finalize(&stats, Duration::from_secs(1)).unwrap();
        assert_eq!(written, path);

        let xml = fs::read_to_string(&path).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<testsuite tests=\"2\""));
        assert!(xml.ends_with("</testsuite>\n"));
        let first = xml.find("name=\"first\"").unwrap();
        let second = xml.find("name=\"second\"").unwrap();
        assert!(first < second);

        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".case_runner_"))
            .collect();
        assert!(leftovers.is_empty(), "temporary files are cleaned up");
    }
}

#[cfg(test)]
mod aggregator_tests {
    use super::*;

    #[test]
    fn test_counts_and_pass_percentage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("junit.xml");
        let report = JunitReport::create(&path, "suite").unwrap();
        let mut aggregator = Aggregator::new(4, report);

        assert_eq!(aggregator.record(outcome("a", Classification::Pass, "")).unwrap(), 25);
        assert_eq!(aggregator.record(outcome("b", Classification::Fail, "")).unwrap(), 50);
        assert_eq!(aggregator.record(ExecutionOutcome::skipped("c")).unwrap(), 75);
        assert_eq!(aggregator.record(outcome("d", Classification::Segv, "")).unwrap(), 100);
        assert_eq!(aggregator.outcomes().len(), 4);

        let summary = aggregator.finalize(Duration::from_secs(3), false).unwrap();
        let stats = summary.statistics;
        assert_eq!(stats.pass_count, 1);
        assert_eq!(stats.fail_count, 2);
        assert_eq!(stats.segv_count, 1);
        assert_eq!(stats.skip_count, 1);
        assert_eq!(
            stats.pass_count + stats.fail_count + stats.skip_count,
            stats.total_expected
        );
        assert_eq!(summary.pass_percentage, 25);
        assert_eq!(summary.exit_code(), 1);
        assert_eq!(
            summary.failures,
            vec![
                ("b".to_string(), Classification::Fail),
                ("d".to_string(), Classification::Segv)
            ]
        );
        assert!(path.exists());
    }

    #[test]
    fn test_empty_run_is_a_success() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("junit.xml");
        let aggregator = Aggregator::new(0, JunitReport::create(&path, "empty").unwrap());

        let summary = aggregator.finalize(Duration::ZERO, false).unwrap();

        assert_eq!(summary.pass_percentage, 100);
        assert_eq!(summary.exit_code(), 0);
        let xml = fs::read_to_string(&path).unwrap();
        assert!(xml.contains("<testsuite tests=\"0\""));
    }
}
