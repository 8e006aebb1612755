//! # Process Execution Module / 进程执行模块
//!
//! Runs exactly one named test from one source file in a freshly spawned
//! process of the external single-test runner.
//!
//! 在外部单测试运行器新派生的进程中，
//! 运行某个源文件中的恰好一个命名测试。

use anyhow::Result;

use crate::core::config::RunnerConfig;
use crate::core::models::{Task, TaskOutcome};
use crate::core::scheduler::TaskExecutor;
use crate::infra::{command, t};
use crate::reporting::console;

/// Launches the external runner once per task:
/// `<program> [runner args...] <file> --timeout <ms> --grep <test name> [passthrough...]`.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: String,
    runner_args: Vec<String>,
    timeout_ms: u64,
    passthrough_args: Vec<String>,
}

impl ProcessExecutor {
    pub fn new(
        program: impl Into<String>,
        runner_args: Vec<String>,
        timeout_ms: u64,
        passthrough_args: Vec<String>,
    ) -> Self {
        Self {
            program: program.into(),
            runner_args,
            timeout_ms,
            passthrough_args,
        }
    }

    /// Builds the executor from the runner configuration.
    pub fn from_config(config: &RunnerConfig, passthrough_args: Vec<String>) -> Result<Self> {
        let (program, runner_args) = config.runner_command()?;
        Ok(Self::new(program, runner_args, config.timeout_ms, passthrough_args))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument list for one task. `--grep` carries [`exact_title_pattern`],
    /// so only this test is selected.
    pub fn command_args(&self, task: &Task) -> Vec<String> {
        let mut args = self.runner_args.clone();
        args.push(task.source_file.to_string_lossy().into_owned());
        args.push("--timeout".to_string());
        args.push(self.timeout_ms.to_string());
        args.push("--grep".to_string());
        args.push(exact_title_pattern(&task.test_name));
        args.extend(self.passthrough_args.iter().cloned());
        args
    }
}

/// Builds the `/.../` grep form the runner parses as a regular expression.
///
/// The runner matches `--grep` against the full title (`<suite> <test>`) as an
/// unanchored substring, so a plain name would also select every longer title
/// containing it. The pattern escapes the name and anchors it at the end of
/// the title, on a word boundary.
pub fn exact_title_pattern(test_name: &str) -> String {
    format!("/(?:^| ){}$/", regex::escape(test_name))
}

impl TaskExecutor for ProcessExecutor {
    async fn execute(&self, task: &Task, label: &str) -> TaskOutcome {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(self.command_args(task));

        match command::spawn_and_stream(cmd, label).await {
            Ok(status) => TaskOutcome::Exited(status.code()),
            Err(e) => {
                let reason = e.to_string();
                console::log_error(&t!(
                    "run.launch_failed",
                    label = label,
                    program = &self.program,
                    error = &reason
                ));
                TaskOutcome::LaunchFailed(reason)
            }
        }
    }
}
