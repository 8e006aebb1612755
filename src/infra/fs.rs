//! # File System Operations Module / 文件系统操作模块
//!
//! This module expands test-location glob patterns into concrete files and
//! reads test sources.
//!
//! 此模块将测试位置的 glob 模式展开为具体文件，并读取测试源文件。

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::invocation::ConfigError;
use crate::infra::t;

/// Expands every pattern with case-sensitive glob semantics (`*` and `**`).
/// Wildcards do not match a leading `.`, so hidden files need a literal dot.
///
/// Results keep pattern order, then match order. A file matched by two
/// patterns is returned twice. A pattern matching nothing contributes nothing.
///
/// # Errors
/// Returns [`ConfigError::InvalidPattern`] for a syntactically invalid pattern.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, ConfigError> {
    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut files = Vec::new();
    for pattern in patterns {
        let entries =
            glob::glob_with(pattern, options).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.msg.to_string(),
            })?;

        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => {
                    // Unreadable directories along the walk are skipped.
                    eprintln!(
                        "{}",
                        t!("discovery.glob_entry_skipped", pattern = pattern, error = e).yellow()
                    );
                }
            }
        }
    }
    Ok(files)
}

/// Reads a whole test source file as text. Invalid UTF-8 is decoded lossily.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read test file: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
