//! Fixtures for end-to-end tests.
//!
//! Every command built here runs against an empty config file inside its
//! own temporary directory, with the output-related environment cleared, so
//! results do not depend on the developer's machine.

use std::path::PathBuf;

use assert_cmd::Command;
use pricesim::test_utils::{TestDir, make_test_csv, sample_csv};

const ISOLATED_ENV: &[&str] = &[
    "PRICESIM_FORMAT",
    "PRICESIM_NO_COLOR",
    "PRICESIM_PRETTY",
    "PRICESIM_LOG",
    "PRICESIM_LOG_FORMAT",
    "PRICESIM_LOG_FILE",
    "NO_COLOR",
];

/// A temporary workspace holding a config file and any CSVs a test writes.
pub struct Workspace {
    pub dir: TestDir,
    pub config: PathBuf,
}

impl Workspace {
    /// Workspace with an empty config file.
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// Workspace whose config file has the given TOML.
    pub fn with_config(toml: &str) -> Self {
        let dir = TestDir::new();
        let config = dir.create_file("pricesim.toml", toml);
        Self { dir, config }
    }

    /// Write a CSV into the workspace.
    pub fn csv(&self, name: &str, content: &str) -> PathBuf {
        self.dir.create_file(name, content)
    }

    /// The two-writer sample data set.
    pub fn sample(&self) -> PathBuf {
        self.csv("articles.csv", &sample_csv())
    }

    /// A `pricesim` command wired to this workspace.
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("pricesim").expect("pricesim binary");
        for var in ISOLATED_ENV {
            cmd.env_remove(var);
        }
        cmd.env("PRICESIM_CONFIG", &self.config);
        cmd.arg("--no-color");
        cmd
    }
}

/// Sample rows plus two malformed ones (bad date, non-numeric count).
pub fn csv_with_malformed_rows() -> String {
    make_test_csv(&[
        ("Alice", "03/01/2024", "1000"),
        ("Bob", "31/02/2024", "800"),
        ("Bob", "05/01/2024", "300"),
        ("Carol", "06/01/2024", "many"),
    ])
}

/// A header with only malformed rows beneath it.
pub fn csv_without_valid_rows() -> String {
    make_test_csv(&[("Alice", "2024-01-03", "1000"), ("", "03/01/2024", "10")])
}

/// Parse stdout as JSON.
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{stdout}"))
}

/// Parse stderr as JSON.
pub fn stderr_json(output: &std::process::Output) -> serde_json::Value {
    let stderr = String::from_utf8_lossy(&output.stderr);
    serde_json::from_str(stderr.trim())
        .unwrap_or_else(|e| panic!("stderr is not JSON ({e}):\n{stderr}"))
}
