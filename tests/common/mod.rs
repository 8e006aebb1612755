// Shared test helpers for integration tests
#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

pub const LOGIN_TEST: &str = r#"const { expect } = require('chai');

describe('Login Tests', function () {
  it('should login successfully with valid credentials', async function () {
    await page.login('tomsmith', 'SuperSecretPassword!');
  });

  it('should show error with invalid credentials', async function () {
    await page.login('invalidUser', 'wrongPassword');
  });
});
"#;

pub const ADD_REMOVE_TEST: &str = r#"describe('Add/Remove Elements', function () {
  it('should add and remove elements', async function () {
    await page.addElement();
  });
});
"#;

/// A stand-in for the single-test runner. It is invoked as
/// `<file> --timeout <ms> --grep /(?:^| )<name>$/ [passthrough...]`, echoes
/// what it got, writes one stderr line and fails for test names containing
/// "fails". Names in the sandbox contain no regex metacharacters, so
/// unwrapping the pattern yields the plain name.
pub const RUNNER_SCRIPT: &str = r#"file="$1"
timeout="$3"
grep="$5"
name="${grep#"/(?:^| )"}"
name="${name%"\$/"}"
shift 5
echo "grep $grep"
echo "running $name from $file (timeout $timeout) with: $*"
echo ""
echo "stderr note for $name" >&2
case "$name" in
  *fails*) exit 1 ;;
esac
exit 0
"#;

/// A sandbox with two test files (2 + 1 test cases), a runner script and a
/// config file pointing at it.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempdir().expect("Failed to create temporary directory");
        let tests = dir.path().join("tests");
        fs::create_dir_all(&tests).expect("Failed to create tests directory");
        fs::write(tests.join("loginFlow.test.js"), LOGIN_TEST).unwrap();
        fs::write(tests.join("addRemoveFlow.test.js"), ADD_REMOVE_TEST).unwrap();
        fs::write(dir.path().join("runner.sh"), RUNNER_SCRIPT).unwrap();

        let sandbox = Self { dir };
        sandbox.write_config(&format!("sh '{}'", sandbox.path("runner.sh").display()), "en");
        sandbox
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Glob pattern matching every test file in the sandbox.
    pub fn tests_glob(&self) -> String {
        self.path("tests/*.test.js").to_string_lossy().into_owned()
    }

    pub fn add_test_file(&self, name: &str, content: &str) {
        fs::write(self.path("tests").join(name), content).unwrap();
    }

    pub fn config_path(&self) -> PathBuf {
        self.path("ParallelRunner.toml")
    }

    pub fn write_config(&self, runner: &str, language: &str) {
        self.write_config_with(runner, language, "");
    }

    pub fn write_config_with(&self, runner: &str, language: &str, extra: &str) {
        let content = format!(
            "language = \"{language}\"\nrunner = \"{}\"\ntimeout_ms = 2500\n{extra}\n",
            runner.replace('\\', "\\\\").replace('"', "\\\"")
        );
        fs::write(self.config_path(), content).expect("Failed to write config");
    }

    /// The runner binary, configured for this sandbox.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("parallel-runner").unwrap();
        cmd.current_dir(self.dir.path())
            .env("PARALLEL_RUNNER_CONFIG", self.config_path())
            .env("NO_COLOR", "1");
        cmd
    }
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
