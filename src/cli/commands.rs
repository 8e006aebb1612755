//! # Commands Module / 命令模块
//!
//! The runner has a single command: discover the requested tests and run
//! each one in its own process.
//!
//! 运行器只有一个命令：发现请求的测试，并在各自的进程中运行每一个测试。

pub mod run;
