//! # Reporting Module / 报告模块
//!
//! This module handles timestamped console logging, the end-of-run summary,
//! and the optional JSON run report.
//!
//! 此模块处理带时间戳的控制台日志、运行结束时的摘要以及可选的 JSON 运行报告。

pub mod console;
pub mod json;

// Re-export common reporting functions
pub use console::{print_failure_recap, print_summary};
pub use json::{write_json_report, RunReport};
