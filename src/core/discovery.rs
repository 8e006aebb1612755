//! # Test Discovery Module / 测试发现模块
//!
//! Expands location patterns into files and scans each file for top-level
//! `it('name', ...)` declarations.
//!
//! The scan is lexical, not a parser: it does not understand nesting,
//! comments, multiline strings or escaped delimiters, and a test name that
//! contains its own quote character is cut short.
//!
//! 将位置模式展开为文件，并扫描每个文件中的顶层 `it('name', ...)` 声明。
//! 该扫描是词法层面的，而不是解析器。

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

use crate::core::invocation::ConfigError;
use crate::core::models::Task;
use crate::infra::fs::{expand_patterns, read_source};

static TEST_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|\s)it\(['"`](.*?)['"`],"#).expect("test declaration pattern is valid")
});

/// Extracts the test names declared in `content`, in appearance order.
pub fn extract_test_names(content: &str) -> Vec<String> {
    TEST_DECLARATION
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// The outcome of discovery over all location patterns.
#[derive(Debug)]
pub struct Discovery {
    /// Every resolved file, duplicates included / 所有解析出的文件（包括重复项）
    pub files: Vec<PathBuf>,
    /// Tasks in file order, then in-file order / 按文件顺序、再按文件内顺序排列的任务
    pub tasks: Vec<Task>,
}

/// Resolves the location patterns and scans every resolved file.
///
/// # Errors
/// Fails on an invalid glob pattern or an unreadable source file.
pub fn discover(locations: &[String]) -> Result<Discovery> {
    let files = expand_patterns(locations)?;

    let mut tasks = Vec::new();
    for file in &files {
        let content = read_source(file)?;
        tasks.extend(
            extract_test_names(&content)
                .into_iter()
                .map(|name| Task::new(file.clone(), name)),
        );
    }

    Ok(Discovery { files, tasks })
}

/// Keeps the tasks whose name contains `pattern`, ignoring case.
///
/// # Errors
/// An empty result is [`ConfigError::NoTestsMatched`].
pub fn filter_tasks(tasks: Vec<Task>, pattern: &str) -> Result<Vec<Task>, ConfigError> {
    let needle = pattern.to_lowercase();
    let filtered: Vec<Task> = tasks
        .into_iter()
        .filter(|task| task.test_name.to_lowercase().contains(&needle))
        .collect();

    if filtered.is_empty() {
        return Err(ConfigError::NoTestsMatched(pattern.to_string()));
    }
    Ok(filtered)
}
