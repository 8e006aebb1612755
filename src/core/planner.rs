//! # Execution Planner Module / 执行计划模块
//!
//! Turns the discovered tasks and the invocation into an execution plan:
//! applies the `--grep` filter and sizes the worker pool.
//!
//! 将发现的任务和调用参数转换为执行计划：
//! 应用 `--grep` 过滤器并确定工作者池的大小。

use std::num::NonZeroUsize;

use crate::core::invocation::{ConfigError, InvocationSpec};
use crate::core::discovery::filter_tasks;
use crate::core::models::Task;

/// Represents a complete execution plan.
/// 表示完整的执行计划。
#[derive(Debug)]
pub struct ExecutionPlan {
    /// The queue of tasks to dispatch, in dispatch order.
    /// 按分派顺序排列的待执行任务队列。
    pub tasks: Vec<Task>,
    /// Number of tasks discovered before filtering.
    /// 过滤前发现的任务数量。
    pub discovered_count: usize,
    /// The maximum number of simultaneously running workers.
    /// 同时运行的工作者的最大数量。
    pub max_workers: usize,
    /// Whether the browser selection forced a single worker.
    /// 浏览器选择是否强制使用单个工作者。
    pub single_worker: bool,
}

/// Computes the worker cap.
///
/// The single-worker override wins over everything, including an explicit
/// cap. Otherwise the cap (explicit or `available`) is clamped to the task
/// count. The result is never zero while there is at least one task.
pub fn compute_max_workers(
    task_count: usize,
    available: usize,
    explicit: Option<NonZeroUsize>,
    single_worker: bool,
) -> usize {
    if single_worker {
        return 1;
    }
    let cap = explicit.map_or(available.max(1), NonZeroUsize::get);
    task_count.min(cap)
}

/// Creates an execution plan for the discovered tasks.
///
/// # Arguments
/// * `tasks` - Tasks in discovery order
/// * `invocation` - The parsed invocation
/// * `available` - Available hardware parallelism
///
/// # Errors
/// [`ConfigError::NoTestsMatched`] when a `--grep` filter rejects every task.
pub fn plan_execution(
    tasks: Vec<Task>,
    invocation: &InvocationSpec,
    available: usize,
) -> Result<ExecutionPlan, ConfigError> {
    let discovered_count = tasks.len();
    let tasks = match &invocation.name_pattern {
        Some(pattern) => filter_tasks(tasks, pattern)?,
        None => tasks,
    };

    let single_worker = invocation.single_worker_override();
    let max_workers =
        compute_max_workers(tasks.len(), available, invocation.max_workers, single_worker);

    Ok(ExecutionPlan {
        tasks,
        discovered_count,
        max_workers,
        single_worker,
    })
}
