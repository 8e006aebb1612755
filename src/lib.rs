//! # Parallel Runner Library / 并行运行器库
//!
//! This library provides the core functionality for the Parallel Runner tool,
//! an orchestrator that discovers every individual test case in a set of test
//! files and runs each one in its own isolated process.
//!
//! 此库为 Parallel Runner 工具提供核心功能，
//! 它发现一组测试文件中的每个测试用例，并在独立的进程中运行每一个用例。
//!
//! ## Modules / 模块
//!
//! - `core` - Invocation parsing, discovery, planning, scheduling and execution
//! - `infra` - Infrastructure services like process spawning and file system globbing
//! - `reporting` - Console logging, run summaries and JSON reports
//! - `cli` - Command-line entry point
//!
//! - `core` - 调用解析、测试发现、计划、调度和执行
//! - `infra` - 基础设施服务，如进程派生和文件系统 glob 展开
//! - `reporting` - 控制台日志、运行摘要和 JSON 报告
//! - `cli` - 命令行入口

pub mod core;
pub mod infra;
pub mod reporting;
pub mod cli;

// Re-export commonly used items
pub use core::models;
pub use core::config;
pub use core::scheduler;

/// Initializes the application's internationalization (i18n).
///
/// An explicit `language` (usually from the config file) wins. Otherwise the
/// system locale is detected and matched first in full (e.g. "zh-CN"), then by
/// its language code (e.g. "en" from "en-US"), finally falling back to "en".
pub fn init(language: Option<&str>) {
    let locale = language
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    let lang = if available_locales.contains(&locale.as_str()) {
        locale.as_str()
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
