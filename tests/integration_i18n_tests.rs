//! # Localization and Report Tests / 本地化与报告测试
#![cfg(unix)]

mod common;

use assert_cmd::prelude::*;
use common::Sandbox;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_chinese_output() {
    let sandbox = Sandbox::new();
    sandbox.write_config(
        &format!("sh '{}'", sandbox.path("runner.sh").display()),
        "zh-CN",
    );
    sandbox
        .command()
        .arg(sandbox.tests_glob())
        .assert()
        .success()
        .stdout(predicate::str::contains("发现 2 个测试文件"))
        .stdout(predicate::str::contains("所有测试已完成。通过：3，失败：0"));
}

#[test]
fn test_chinese_error_message() {
    let sandbox = Sandbox::new();
    sandbox.write_config(
        &format!("sh '{}'", sandbox.path("runner.sh").display()),
        "zh-CN",
    );
    sandbox
        .command()
        .arg(sandbox.tests_glob())
        .args(["--browser", "opera"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("不支持的浏览器 \"opera\""));
}

/// An unknown language falls back to English.
/// 未知语言回退到英语。
#[test]
fn test_unknown_language_falls_back_to_english() {
    let sandbox = Sandbox::new();
    sandbox.write_config(
        &format!("sh '{}'", sandbox.path("runner.sh").display()),
        "xx-YY",
    );
    sandbox
        .command()
        .arg(sandbox.tests_glob())
        .assert()
        .success()
        .stdout(predicate::str::contains("All tests completed. Passed: 3, Failed: 0"));
}

#[test]
fn test_json_report_is_written() {
    let sandbox = Sandbox::new();
    sandbox.add_test_file(
        "broken.test.js",
        "describe('b', () => {\n  it('fails on purpose', async () => {});\n});\n",
    );
    let report_path = sandbox.path("reports/run.json");
    sandbox.write_config_with(
        &format!("sh '{}'", sandbox.path("runner.sh").display()),
        "en",
        &format!("report = \"{}\"", report_path.display()),
    );
    sandbox
        .command()
        .arg(sandbox.tests_glob())
        .args(["--jobs", "2"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Run report written to"));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["passed"], 3);
    assert_eq!(report["failed"], 1);
    assert_eq!(report["exit_code"], 1);
    assert_eq!(report["max_workers"], 2);

    let records = report["records"].as_array().unwrap();
    assert_eq!(records.len(), 4);
    let failed: Vec<_> = records
        .iter()
        .filter(|r| r["exit_code"] != 0)
        .map(|r| r["task"]["test_name"].as_str().unwrap())
        .collect();
    assert_eq!(failed, ["fails on purpose"]);
    assert!(records.iter().all(|r| r["duration_ms"].is_u64()));
}
