// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::{TempDir, tempdir};

use case_runner::core::harness::RunSettings;

/// A throwaway test suite laid out the way the harness expects:
/// descriptors live below `<tmp>/test`, the report goes to `<tmp>/junit.xml`.
pub struct Suite {
    pub dir: TempDir,
}

impl Suite {
    pub fn new() -> Self {
        let dir = tempdir().expect("Failed to create temporary directory");
        fs::create_dir_all(dir.path().join("test")).expect("Failed to create test root");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("test")
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.path().join("junit.xml")
    }

    /// Writes `content` to `rel` below the test root, creating parent dirs.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root().join(rel.trim_start_matches('/'));
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create directories");
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    /// Adds a case that runs `cmd` on a source file whose content is
    /// `"hello <name>\n"` and expects exactly that content back with exit 0.
    /// With `cmd = "cat"` the case passes. `extra` is appended to the YAML.
    pub fn case(&self, dir: &str, name: &str, cmd: &str, extra: &str) -> PathBuf {
        let content = format!("hello {name}\n");
        self.write(&format!("{dir}/{name}.src"), &content);
        self.write(&format!("{dir}/{name}.out"), &content);
        self.write(&format!("{dir}/{name}.err"), "");
        self.write(
            &format!("{dir}/{name}.yml"),
            &format!(
                "name: {name}\nsrc: {name}.src\nout: {name}.out\nerr: {name}.err\nexitcode: 0\nskip: false\ncmd: \"{cmd}\"\n{extra}"
            ),
        )
    }

    /// Adds a case whose expected stdout differs from what `cat` prints.
    pub fn failing_case(&self, dir: &str, name: &str) -> PathBuf {
        let path = self.case(dir, name, "cat", "");
        self.write(&format!("{dir}/{name}.out"), "something else\n");
        path
    }

    /// Adds a skipped case whose expected files do not exist.
    pub fn skipped_case(&self, dir: &str, name: &str) -> PathBuf {
        self.write(&format!("{dir}/{name}.src"), "unused\n");
        self.write(
            &format!("{dir}/{name}.yml"),
            &format!(
                "name: {name}\nsrc: {name}.src\nout: missing.out\nerr: missing.err\nexitcode: 0\nskip: true\nloop: 5\n"
            ),
        )
    }

    pub fn settings(&self) -> RunSettings {
        RunSettings {
            test_root: self.root(),
            category: String::new(),
            extension: "yml".to_string(),
            subject: "cat".to_string(),
            timeout: Duration::from_secs(30),
            repeat: 1,
            stop_on_failure: false,
            report_path: self.report_path(),
            suite_name: "sample tests".to_string(),
        }
    }

    pub fn report(&self) -> String {
        fs::read_to_string(self.report_path()).expect("Report should exist")
    }
}
