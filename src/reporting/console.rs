//! # Console Reporting Module / 控制台报告模块
//!
//! Engine messages are printed as `[<timestamp>][ParallelRunner] <message>`,
//! colored by severity. Worker output is printed elsewhere, uncolored, by the
//! command module.
//!
//! 引擎消息以 `[<时间戳>][ParallelRunner] <消息>` 的格式打印，并按严重程度着色。

use chrono::{SecondsFormat, Utc};
use colored::*;

use crate::core::models::{ExitRecord, RunResult, Task};
use crate::infra::t;

const LOG_TAG: &str = "[ParallelRunner]";

/// Prefixes a message with the current UTC timestamp and the runner tag.
pub fn format_log(message: &str) -> String {
    format!(
        "[{}]{} {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        LOG_TAG,
        message
    )
}

pub fn log_info(message: &str) {
    println!("{}", format_log(message).blue());
}

pub fn log_plan(message: &str) {
    println!("{}", format_log(message).cyan());
}

pub fn log_success(message: &str) {
    println!("{}", format_log(message).green());
}

pub fn log_warn(message: &str) {
    println!("{}", format_log(message).yellow());
}

pub fn log_error(message: &str) {
    eprintln!("{}", format_log(message).red());
}

/// Logged when a task is handed to a worker.
pub fn log_dispatch(task: &Task) {
    log_info(&t!(
        "run.running_test",
        name = &task.test_name,
        file = task.source_file.display()
    ));
}

/// Logged once per exit record, in completion order.
pub fn log_completion(record: &ExitRecord) {
    let message = t!(
        "run.test_finished",
        name = &record.task.test_name,
        file = record.task.source_file.display(),
        code = record.code_display(),
        duration = format!("{:.2?}", record.duration)
    );
    if record.is_success() {
        log_success(&message);
    } else if record.error.is_some() {
        log_error(&format!("{} {}", message, t!("run.error_tag")));
    } else {
        log_error(&message);
    }
}

/// Prints the passed/failed counts of the run.
///
/// ```text
/// [2026-10-18T09:30:00.000Z][ParallelRunner] All tests completed. Passed: 2, Failed: 1
/// ```
pub fn print_summary(result: &RunResult) {
    let message = t!(
        "summary.completed",
        passed = result.passed,
        failed = result.failed
    );
    if result.is_success() {
        log_success(&message);
    } else {
        log_error(&message);
    }
}

/// Lists the failed tasks after the summary so they can be found without
/// scrolling through interleaved worker output.
pub fn print_failure_recap(records: &[ExitRecord]) {
    let failures: Vec<&ExitRecord> = records.iter().filter(|r| !r.is_success()).collect();
    if failures.is_empty() {
        return;
    }

    eprintln!("\n{}", t!("summary.failure_banner").red().bold());
    eprintln!("{}", "-".repeat(80));
    for (i, record) in failures.iter().enumerate() {
        eprintln!(
            "[{}/{}] {} {} '{}' ({}) -> {}",
            i + 1,
            failures.len(),
            record.label,
            t!("summary.failed_test").red(),
            record.task.test_name.cyan(),
            record.task.source_file.display(),
            record.code_display()
        );
        if let Some(error) = &record.error {
            eprintln!("      {}", error.dimmed());
        }
    }
    eprintln!("{}", "-".repeat(80));
}
