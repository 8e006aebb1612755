//! # Invocation Parsing Module / 调用解析模块
//!
//! Splits the raw argument list into test-location patterns, pass-through
//! arguments, an optional worker cap and an optional name filter.
//!
//! Everything before the first `--` token is a location pattern; the first
//! flag and everything after it is handed verbatim to every child process,
//! except for `--grep <value>` and `--jobs <N>` which the engine consumes.
//!
//! 将原始参数列表拆分为测试位置模式、透传参数、可选的工作者上限和可选的名称过滤器。

use std::fmt;
use std::num::NonZeroUsize;

use crate::infra::t;

pub const FLAG_PREFIX: &str = "--";
pub const GREP_FLAG: &str = "--grep";
pub const JOBS_FLAG: &str = "--jobs";
pub const BROWSER_FLAG: &str = "--browser";
const HEADLESS_KEYWORD: &str = "headless";

/// Browser drivers the page-automation suite can be run against.
/// 页面自动化测试套件可以运行的浏览器驱动。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Firefox,
    Edge,
    Safari,
}

impl Browser {
    pub const ALL: [Browser; 4] = [
        Browser::Chrome,
        Browser::Firefox,
        Browser::Edge,
        Browser::Safari,
    ];

    /// Parses a browser name case-insensitively.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name.to_lowercase().as_str() {
            "chrome" => Ok(Browser::Chrome),
            "firefox" => Ok(Browser::Firefox),
            "edge" => Ok(Browser::Edge),
            "safari" => Ok(Browser::Safari),
            _ => Err(ConfigError::UnsupportedBrowser(name.to_lowercase())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
            Browser::Edge => "edge",
            Browser::Safari => "safari",
        }
    }

    /// SafariDriver only supports a single session at a time.
    pub fn forces_single_worker(&self) -> bool {
        match self {
            Browser::Safari => true,
            Browser::Chrome | Browser::Firefox | Browser::Edge => false,
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal configuration problems, reported before any worker is spawned.
/// 致命的配置问题，在派生任何工作者之前报告。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `--grep` was the last argument.
    MissingGrepValue,
    /// A bare argument mentions headless mode without the flag prefix.
    MalformedHeadlessFlag(String),
    /// `--browser` names a driver outside [`Browser::ALL`].
    UnsupportedBrowser(String),
    /// A location is not a valid glob pattern.
    InvalidPattern { pattern: String, message: String },
    /// The configured runner command is empty.
    EmptyRunnerCommand,
    /// The `--grep` filter rejected every discovered test.
    NoTestsMatched(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ConfigError::MissingGrepValue => t!("error.missing_grep_value"),
            ConfigError::MalformedHeadlessFlag(arg) => {
                t!("error.malformed_headless", arg = arg)
            }
            ConfigError::UnsupportedBrowser(name) => {
                let valid = Browser::ALL
                    .iter()
                    .map(Browser::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                t!("error.unsupported_browser", name = name, valid = valid)
            }
            ConfigError::InvalidPattern { pattern, message } => {
                t!("error.invalid_pattern", pattern = pattern, message = message)
            }
            ConfigError::EmptyRunnerCommand => t!("error.empty_runner"),
            ConfigError::NoTestsMatched(pattern) => t!("error.no_tests_matched", pattern = pattern),
        };
        f.write_str(&message)
    }
}

impl std::error::Error for ConfigError {}

/// The parsed form of one invocation. Built once, never mutated.
/// 一次调用的解析结果。只构建一次，之后不再修改。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationSpec {
    /// Glob-like location patterns, in argument order / 按参数顺序排列的位置模式
    pub locations: Vec<String>,
    /// Arguments forwarded verbatim to every child / 原样转发给每个子进程的参数
    pub passthrough_args: Vec<String>,
    /// Explicit worker cap from `--jobs` / 来自 `--jobs` 的显式工作者上限
    pub max_workers: Option<NonZeroUsize>,
    /// Case-insensitive substring filter from `--grep` / 来自 `--grep` 的不区分大小写的子串过滤器
    pub name_pattern: Option<String>,
    /// Validated `--browser` selection, still present in `passthrough_args`.
    pub browser: Option<Browser>,
}

impl InvocationSpec {
    /// Whether the selected driver forbids concurrent sessions.
    pub fn single_worker_override(&self) -> bool {
        self.browser.is_some_and(|b| b.forces_single_worker())
    }
}

/// Parses the raw argument list (program name excluded).
///
/// # Errors
/// Returns a [`ConfigError`] when `--grep` lacks a value, when a bare argument
/// contains the headless keyword, or when `--browser` names an unknown driver.
/// Invalid `--jobs` values are ignored rather than rejected.
pub fn parse_args(args: &[String]) -> Result<InvocationSpec, ConfigError> {
    let mut spec = InvocationSpec::default();
    let mut found_flag = false;
    let mut browser_seen = false;
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if !arg.starts_with(FLAG_PREFIX) && arg.to_lowercase().contains(HEADLESS_KEYWORD) {
            return Err(ConfigError::MalformedHeadlessFlag(arg.clone()));
        }

        if arg == GREP_FLAG {
            found_flag = true;
            let value = args.get(i + 1).ok_or(ConfigError::MissingGrepValue)?;
            spec.name_pattern = Some(value.clone());
            i += 2;
            continue;
        }

        if arg == JOBS_FLAG {
            found_flag = true;
            match args.get(i + 1).filter(|value| !value.starts_with(FLAG_PREFIX)) {
                Some(value) => {
                    if let Ok(jobs) = value.parse::<NonZeroUsize>() {
                        spec.max_workers = Some(jobs);
                    }
                    i += 2;
                }
                None => i += 1,
            }
            continue;
        }

        if arg.starts_with(FLAG_PREFIX) {
            found_flag = true;
        }

        if found_flag {
            // Only the first `--browser` selects the driver.
            if arg == BROWSER_FLAG && !browser_seen {
                browser_seen = true;
                if let Some(name) = args.get(i + 1) {
                    spec.browser = Some(Browser::parse(name)?);
                }
            }
            spec.passthrough_args.push(arg.clone());
        } else {
            spec.locations.push(arg.clone());
        }
        i += 1;
    }

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flag_free_arguments_are_all_locations() {
        let raw = args(&["tests/*.test.js", "smoke/login.js", "-x"]);
        let spec = parse_args(&raw).unwrap();
        assert_eq!(spec.locations, raw);
        assert!(spec.passthrough_args.is_empty());
        assert_eq!(spec.max_workers, None);
        assert_eq!(spec.name_pattern, None);
    }

    #[test]
    fn test_first_flag_starts_passthrough() {
        let spec = parse_args(&args(&["a.js", "--headless=no", "b.js", "--reporter", "spec"])).unwrap();
        assert_eq!(spec.locations, vec!["a.js"]);
        assert_eq!(spec.passthrough_args, args(&["--headless=no", "b.js", "--reporter", "spec"]));
    }

    #[test]
    fn test_grep_is_consumed_with_its_value() {
        let spec = parse_args(&args(&["a.js", "--grep", "login successfully", "--headless"])).unwrap();
        assert_eq!(spec.name_pattern.as_deref(), Some("login successfully"));
        assert_eq!(spec.passthrough_args, args(&["--headless"]));
    }

    #[test]
    fn test_grep_counts_as_first_flag() {
        let spec = parse_args(&args(&["a.js", "--grep", "x", "b.js"])).unwrap();
        assert_eq!(spec.locations, vec!["a.js"]);
        assert_eq!(spec.passthrough_args, vec!["b.js"]);
    }

    #[test]
    fn test_grep_value_may_look_like_a_flag() {
        let spec = parse_args(&args(&["a.js", "--grep", "--weird"])).unwrap();
        assert_eq!(spec.name_pattern.as_deref(), Some("--weird"));
    }

    #[test]
    fn test_grep_without_value_is_fatal() {
        let err = parse_args(&args(&["a.js", "--grep"])).unwrap_err();
        assert_eq!(err, ConfigError::MissingGrepValue);
    }

    #[test]
    fn test_jobs_value_is_consumed() {
        let spec = parse_args(&args(&["a.js", "--jobs", "3", "--headless"])).unwrap();
        assert_eq!(spec.max_workers, NonZeroUsize::new(3));
        assert_eq!(spec.passthrough_args, args(&["--headless"]));
    }

    #[test]
    fn test_invalid_jobs_values_are_ignored() {
        for bad in ["0", "-5", "three", "2.5", ""] {
            let spec = parse_args(&args(&["a.js", "--jobs", bad])).unwrap();
            assert_eq!(spec.max_workers, None, "value {bad:?} should be ignored");
            assert!(spec.passthrough_args.is_empty());
        }
    }

    #[test]
    fn test_jobs_without_value_is_ignored() {
        let spec = parse_args(&args(&["a.js", "--jobs"])).unwrap();
        assert_eq!(spec.max_workers, None);

        let spec = parse_args(&args(&["a.js", "--jobs", "--headless"])).unwrap();
        assert_eq!(spec.max_workers, None);
        assert_eq!(spec.passthrough_args, args(&["--headless"]));
    }

    #[test]
    fn test_bare_headless_argument_is_rejected() {
        for bad in ["headless", "HeadLess=no", "run-headless"] {
            let err = parse_args(&args(&["a.js", bad])).unwrap_err();
            assert_eq!(err, ConfigError::MalformedHeadlessFlag(bad.to_string()));
        }
    }

    #[test]
    fn test_prefixed_headless_flags_are_passthrough() {
        let spec = parse_args(&args(&["a.js", "--headless", "--headless=no"])).unwrap();
        assert_eq!(spec.passthrough_args, args(&["--headless", "--headless=no"]));
    }

    #[test]
    fn test_browser_is_validated_and_kept_in_passthrough() {
        let spec = parse_args(&args(&["a.js", "--browser", "Firefox"])).unwrap();
        assert_eq!(spec.browser, Some(Browser::Firefox));
        assert_eq!(spec.passthrough_args, args(&["--browser", "Firefox"]));
        assert!(!spec.single_worker_override());
    }

    #[test]
    fn test_unsupported_browser_is_fatal() {
        let err = parse_args(&args(&["a.js", "--browser", "Opera"])).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedBrowser("opera".to_string()));
        assert!(err.to_string().contains("opera"));
    }

    #[test]
    fn test_browser_without_value_means_no_selection() {
        let spec = parse_args(&args(&["a.js", "--browser"])).unwrap();
        assert_eq!(spec.browser, None);
        assert_eq!(spec.passthrough_args, args(&["--browser"]));
    }

    #[test]
    fn test_first_browser_selection_wins() {
        let spec = parse_args(&args(&["a.js", "--browser", "safari", "--browser", "chrome"])).unwrap();
        assert_eq!(spec.browser, Some(Browser::Safari));
        assert!(spec.single_worker_override());
        assert_eq!(
            spec.passthrough_args,
            args(&["--browser", "safari", "--browser", "chrome"])
        );
    }

    #[test]
    fn test_leading_escape_token_starts_passthrough() {
        let spec = parse_args(&args(&["--", "a.js"])).unwrap();
        assert!(spec.locations.is_empty());
        assert_eq!(spec.passthrough_args, args(&["--", "a.js"]));
    }

    #[test]
    fn test_escape_token_after_locations_is_passed_through() {
        let spec = parse_args(&args(&["a.js", "--", "--reporter", "spec"])).unwrap();
        assert_eq!(spec.locations, vec!["a.js"]);
        assert_eq!(spec.passthrough_args, args(&["--", "--reporter", "spec"]));
    }

    #[test]
    fn test_safari_requests_single_worker() {
        let spec = parse_args(&args(&["a.js", "--browser", "safari", "--jobs", "8"])).unwrap();
        assert!(spec.single_worker_override());
        assert_eq!(spec.max_workers, NonZeroUsize::new(8));
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let raw = args(&["a.js", "b.js", "--jobs", "2", "--grep", "x", "--browser", "edge"]);
        assert_eq!(parse_args(&raw).unwrap(), parse_args(&raw).unwrap());
    }
}
