//! Fixture and command-runner helpers shared by `dapr-guard`'s integration
//! tests, grounded in the teacher's `Zizmor` test-runner builder
//! (`tests/integration/common.rs`).

use std::fs;

use assert_cmd::Command;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A scratch project tree that integration tests populate with fixture
/// YAML, then point a [`DaprGuard`] run at.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create fixture tempdir"),
        }
    }

    /// Writes `contents` to `relative` under the fixture root, creating
    /// parent directories as needed.
    pub fn file(&self, relative: &str, contents: &str) -> &Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture parent dir");
        }
        fs::write(&path, contents).expect("failed to write fixture file");
        self
    }

    pub fn path(&self) -> Utf8PathBuf {
        Utf8Path::from_path(self.dir.path())
            .expect("fixture tempdir path is not UTF-8")
            .to_path_buf()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The captured result of a [`DaprGuard`] run.
pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

impl RunResult {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout was not valid JSON")
    }
}

/// A fluent builder over `assert_cmd::Command::cargo_bin("dapr-guard")`.
pub struct DaprGuard {
    cmd: Command,
}

impl DaprGuard {
    pub fn new() -> Self {
        let mut cmd = Command::cargo_bin("dapr-guard").expect("dapr-guard binary not found");
        cmd.arg("--color").arg("never");
        Self { cmd }
    }

    pub fn path(mut self, path: impl AsRef<std::path::Path>) -> Self {
        self.cmd.arg(path.as_ref());
        self
    }

    pub fn json(mut self) -> Self {
        self.cmd.arg("--json");
        self
    }

    pub fn strict(mut self) -> Self {
        self.cmd.arg("--strict");
        self
    }

    pub fn warnings_as_errors(mut self) -> Self {
        self.cmd.arg("--warnings-as-errors");
        self
    }

    pub fn production(mut self) -> Self {
        self.cmd.arg("--production");
        self
    }

    pub fn deployment_target(mut self, target: &str) -> Self {
        self.cmd.args(["--deployment-target", target]);
        self
    }

    pub fn run(mut self) -> RunResult {
        let output = self.cmd.output().expect("failed to run dapr-guard");
        RunResult {
            stdout: String::from_utf8(output.stdout).expect("stdout was not UTF-8"),
            stderr: String::from_utf8(output.stderr).expect("stderr was not UTF-8"),
            code: output.status.code().unwrap_or(-1),
        }
    }
}

impl Default for DaprGuard {
    fn default() -> Self {
        Self::new()
    }
}
