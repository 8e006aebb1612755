//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the runner:
//! discovered tasks, the exit record produced for every dispatched task, and
//! the aggregated result of a whole run.
//!
//! 此模块定义了整个运行器中使用的核心数据结构：
//! 发现的任务、每个已分派任务产生的退出记录，以及整个运行的聚合结果。

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Exit code recorded when a child process could not be launched or waited on.
/// 子进程无法启动或等待失败时记录的退出码。
pub const LAUNCH_FAILURE_CODE: i32 = 1;

/// One individual test case slated for isolated execution.
/// Identity is the (source file, test name) pair; the same pair may occur twice
/// if a file declares the same name twice or is matched by two patterns.
///
/// 一个计划被隔离执行的单独测试用例。
/// 其标识为（源文件，测试名称）对。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// The test-source file the case was discovered in / 发现该用例的测试源文件
    pub source_file: PathBuf,
    /// The literal test name captured from the declaration / 从声明中捕获的字面测试名称
    pub test_name: String,
}

impl Task {
    pub fn new(source_file: impl Into<PathBuf>, test_name: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            test_name: test_name.into(),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {}", self.test_name, self.source_file.display())
    }
}

/// Builds the log label for the worker running the task at `index` in the queue.
/// Labels only attribute interleaved output; they are not a scheduling identity.
pub fn worker_label(index: usize) -> String {
    format!("[Worker-{index}]")
}

/// The terminal outcome of one dispatched task.
/// 一个已分派任务的最终结果。
#[derive(Debug, Clone, Serialize)]
pub struct ExitRecord {
    pub task: Task,
    /// The label of the worker that ran the task / 运行该任务的工作者标签
    pub label: String,
    /// The child's exit code. `None` means it was terminated without one (e.g. by a signal).
    /// 子进程的退出码。`None` 表示进程没有退出码就终止了（例如被信号终止）。
    pub exit_code: Option<i32>,
    /// Why the process could not be launched or waited on, if it could not.
    /// 进程无法启动或等待失败的原因。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

/// How a single task's process ended, as reported by an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The process ran and exited, with `None` when no code was available.
    Exited(Option<i32>),
    /// The process could not be launched, or waiting on it failed.
    LaunchFailed(String),
}

impl ExitRecord {
    /// Builds the record for a finished task. A launch failure is recorded
    /// with the synthetic [`LAUNCH_FAILURE_CODE`].
    pub fn new(task: Task, label: String, outcome: TaskOutcome, duration: Duration) -> Self {
        let (exit_code, error) = match outcome {
            TaskOutcome::Exited(code) => (code, None),
            TaskOutcome::LaunchFailed(reason) => (Some(LAUNCH_FAILURE_CODE), Some(reason)),
        };
        Self {
            task,
            label,
            exit_code,
            error,
            duration,
        }
    }

    /// A task passed iff its process exited with code zero.
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Human readable exit code, `null` when the process reported none.
    pub fn code_display(&self) -> String {
        match self.exit_code {
            Some(code) => code.to_string(),
            None => "null".to_string(),
        }
    }
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(duration.as_millis() as u64)
}

/// The aggregated outcome of a complete run.
/// 一次完整运行的聚合结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub passed: usize,
    pub failed: usize,
    /// `0` if every record succeeded, `1` otherwise.
    pub exit_code: u8,
}

impl RunResult {
    /// Derives the run result from the full exit record log.
    pub fn from_records(records: &[ExitRecord]) -> Self {
        let passed = records.iter().filter(|r| r.is_success()).count();
        let failed = records.len() - passed;
        Self {
            passed,
            failed,
            exit_code: if failed == 0 { 0 } else { 1 },
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}
