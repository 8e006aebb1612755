//! # Core Module / 核心模块
//!
//! This module contains the parallel execution engine: invocation parsing,
//! test discovery, concurrency planning, scheduling and process execution.
//!
//! 此模块包含并行执行引擎：调用解析、测试发现、
//! 并发计划、调度和进程执行。

pub mod config;
pub mod discovery;
pub mod execution;
pub mod invocation;
pub mod models;
pub mod planner;
pub mod scheduler;

// Re-exports
pub use config::RunnerConfig;
pub use invocation::{Browser, ConfigError, InvocationSpec};
pub use models::{ExitRecord, RunResult, Task};
pub use scheduler::run_queue;
