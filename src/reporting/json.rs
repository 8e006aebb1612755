//! # JSON Reporting Module / JSON 报告模块
//!
//! Serializes a finished run into a machine-readable report.
//!
//! 将完成的运行序列化为机器可读的报告。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::models::{ExitRecord, RunResult};

/// A complete run, as written to the JSON report.
/// 写入 JSON 报告的完整运行记录。
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub max_workers: usize,
    #[serde(flatten)]
    pub result: RunResult,
    /// Exit records in completion order / 按完成顺序排列的退出记录
    pub records: &'a [ExitRecord],
}

/// Writes the report as pretty-printed JSON, creating parent directories.
pub fn write_json_report(report: &RunReport<'_>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))
}
