//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Parallel Runner,
//! including child process spawning with labeled output streaming,
//! glob expansion of test locations, and i18n support.
//!
//! 此模块为 Parallel Runner 提供基础设施服务，
//! 包括带标签输出流的子进程派生、测试位置的 glob 展开和国际化支持。

pub mod command;
pub mod fs;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
