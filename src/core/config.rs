//! # Configuration Module / 配置模块
//!
//! Loads the optional `ParallelRunner.toml` file describing how the external
//! single-test runner is invoked, the per-test timeout, the output language
//! and where to write the JSON run report.
//!
//! 加载可选的 `ParallelRunner.toml` 文件，描述如何调用外部单测试运行器、
//! 每个测试的超时时间、输出语言以及 JSON 运行报告的写入位置。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::invocation::ConfigError;

/// Environment variable pointing to an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "PARALLEL_RUNNER_CONFIG";
/// Configuration file looked up in the working directory when no override is set.
pub const DEFAULT_CONFIG_FILE: &str = "ParallelRunner.toml";
/// Per-test timeout handed to every child process, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default single-test runner command line.
pub const DEFAULT_RUNNER: &str = "node node_modules/mocha/bin/_mocha";

/// Runner configuration, loaded from TOML.
/// 运行器配置，从 TOML 加载。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// Falls back to the system locale when not specified.
    ///
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    /// 如果未指定，则使用系统语言。
    #[serde(default)]
    pub language: Option<String>,

    /// The command line of the external single-test runner. It receives
    /// `<file> --timeout <ms> --grep <test name> [passthrough...]` appended.
    /// 外部单测试运行器的命令行。
    #[serde(default = "default_runner")]
    pub runner: String,

    /// Timeout forwarded to each child via `--timeout`.
    /// 通过 `--timeout` 传递给每个子进程的超时时间。
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Optional path of the JSON run report.
    /// 可选的 JSON 运行报告路径。
    #[serde(default)]
    pub report: Option<PathBuf>,
}

fn default_runner() -> String {
    DEFAULT_RUNNER.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            language: None,
            runner: default_runner(),
            timeout_ms: default_timeout_ms(),
            report: None,
        }
    }
}

impl RunnerConfig {
    /// Expands environment variables and `~` in the runner command and splits it
    /// into the program and its leading arguments.
    pub fn runner_command(&self) -> Result<(String, Vec<String>)> {
        let expanded = shellexpand::full(&self.runner)
            .with_context(|| format!("Failed to expand runner command: {}", self.runner))?
            .to_string();

        let mut parts = shlex::split(&expanded)
            .ok_or_else(|| anyhow::anyhow!("Failed to parse runner command: {}", expanded))?;

        if parts.is_empty() {
            return Err(ConfigError::EmptyRunnerCommand.into());
        }
        let program = parts.remove(0);
        Ok((program, parts))
    }
}

/// Parses a configuration file.
pub fn load_config(path: &Path) -> Result<RunnerConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolves which configuration applies to this run: the file named by
/// `PARALLEL_RUNNER_CONFIG`, else `ParallelRunner.toml` in the working
/// directory, else the built-in defaults.
pub fn resolve_config() -> Result<RunnerConfig> {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR) {
        return load_config(Path::new(&path));
    }
    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return load_config(local);
    }
    Ok(RunnerConfig::default())
}
