//! # Run Command Module / 运行命令模块
//!
//! Wires the engine together: parse the invocation, discover tasks, plan the
//! worker pool, drive the queue and aggregate the exit records.
//!
//! 将引擎各部分连接起来：解析调用、发现任务、规划工作者池、
//! 驱动队列并聚合退出记录。

use anyhow::Result;
use chrono::Utc;

use crate::{
    core::{
        config::RunnerConfig,
        discovery,
        execution::ProcessExecutor,
        invocation::parse_args,
        models::RunResult,
        planner,
        scheduler::run_queue,
    },
    infra::t,
    reporting::{
        console::{self, print_failure_recap, print_summary},
        json::{write_json_report, RunReport},
    },
};

/// Executes a run for the raw arguments.
///
/// # Returns
/// The process exit code: `0` when every task exited `0`, `1` otherwise.
/// Configuration and discovery problems are returned as errors before any
/// child is spawned.
pub async fn execute(args: Vec<String>, config: RunnerConfig) -> Result<u8> {
    let invocation = parse_args(&args)?;
    let locations = serde_json::to_string(&invocation.locations)?;
    let passthrough = serde_json::to_string(&invocation.passthrough_args)?;
    let grep = serde_json::to_string(&invocation.name_pattern)?;
    let jobs = invocation
        .max_workers
        .map_or_else(|| "null".to_string(), |n| n.to_string());
    console::log_info(&t!(
        "run.parsed_arguments",
        locations = locations,
        passthrough = passthrough,
        jobs = jobs,
        grep = grep
    ));

    let executor = ProcessExecutor::from_config(&config, invocation.passthrough_args.clone())?;

    let discovered = discovery::discover(&invocation.locations)?;
    console::log_info(&t!("run.discovered_files", count = discovered.files.len()));
    console::log_info(&t!("run.discovered_tests", count = discovered.tasks.len()));

    let cores = num_cpus::get();
    let plan = planner::plan_execution(discovered.tasks, &invocation, cores)?;

    if let Some(pattern) = &invocation.name_pattern {
        console::log_plan(&t!(
            "run.filtered_tests",
            pattern = pattern,
            remaining = plan.tasks.len()
        ));
    }
    if plan.single_worker {
        if let Some(browser) = invocation.browser {
            console::log_warn(&t!("run.single_worker_forced", browser = browser));
        }
    }
    console::log_plan(&t!(
        "run.plan",
        cores = cores,
        total = plan.tasks.len(),
        workers = plan.max_workers
    ));

    let started_at = Utc::now();
    let records = run_queue(plan.tasks, plan.max_workers, &executor).await;
    let finished_at = Utc::now();

    let result = RunResult::from_records(&records);
    print_summary(&result);
    print_failure_recap(&records);

    if let Some(path) = &config.report {
        let report = RunReport {
            started_at,
            finished_at,
            max_workers: plan.max_workers,
            result,
            records: &records,
        };
        match write_json_report(&report, path) {
            Ok(()) => console::log_info(&t!("report.written", path = path.display())),
            Err(e) => console::log_error(&t!("report.failed", error = format!("{e:#}"))),
        }
    }

    Ok(result.exit_code)
}
