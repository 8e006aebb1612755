//! # Worker Pool / Scheduler Module / 工作者池调度模块
//!
//! Drives the task queue to completion with at most `max_workers` tasks in
//! flight. The scheduler is a single control loop: it dispatches while slots
//! are free, then waits for the next completion. Parallelism comes only from
//! the child processes the executor launches.
//!
//! 以最多 `max_workers` 个并发任务驱动任务队列直至完成。
//! 调度器是单一的控制循环：有空闲槽位时分派任务，然后等待下一个完成事件。
//! 并行性仅来自执行器启动的子进程。

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::time::Instant;

use crate::core::models::{worker_label, ExitRecord, Task, TaskOutcome};
use crate::reporting::console;

/// Runs one task to completion. Implementations must always resolve, turning
/// launch and runtime errors into [`TaskOutcome::LaunchFailed`].
pub trait TaskExecutor {
    fn execute(&self, task: &Task, label: &str) -> impl Future<Output = TaskOutcome>;
}

/// A dispatched task, held until its process terminates.
struct WorkerSlot {
    task: Task,
    label: String,
}

/// Dispatches every task exactly once and returns one [`ExitRecord`] per task,
/// in completion order.
///
/// # Arguments
/// * `tasks` - The queue, in dispatch order
/// * `max_workers` - Upper bound on tasks in flight (treated as at least 1)
/// * `executor` - Runs a single task
pub async fn run_queue<E: TaskExecutor>(
    tasks: Vec<Task>,
    max_workers: usize,
    executor: &E,
) -> Vec<ExitRecord> {
    let max_workers = max_workers.max(1);
    let mut records = Vec::with_capacity(tasks.len());
    let mut queue = tasks.into_iter().enumerate();
    let mut in_flight = FuturesUnordered::new();

    loop {
        // Dispatching
        while in_flight.len() < max_workers {
            let Some((index, task)) = queue.next() else {
                break;
            };
            let slot = WorkerSlot {
                task,
                label: worker_label(index),
            };
            console::log_dispatch(&slot.task);

            in_flight.push(async move {
                let started = Instant::now();
                let outcome = executor.execute(&slot.task, &slot.label).await;
                ExitRecord::new(slot.task, slot.label, outcome, started.elapsed())
            });
        }

        // Waiting. `None` means the queue is exhausted and nothing is in flight.
        match in_flight.next().await {
            Some(record) => {
                console::log_completion(&record);
                records.push(record);
            }
            None => break,
        }
    }

    records
}
