//! # Command Execution Module / 命令执行模块
//!
//! Spawns child processes and re-emits their output line by line, prefixed
//! with the worker label, on the parent's matching stream.
//!
//! 派生子进程，并逐行将其输出加上工作者标签前缀后，
//! 重新输出到父进程对应的流上。

use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::infra::t;

/// Which parent stream a child's line is re-emitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Prefixes a line with the worker label, dropping blank lines.
///
/// A trailing `\r` is stripped so CRLF output renders the same as LF output.
pub fn label_line(label: &str, line: &str) -> Option<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() {
        None
    } else {
        Some(format!("{label} {line}"))
    }
}

/// Reads `reader` to the end, splitting on `\n` and handing every labeled,
/// non-blank line to `emit`. Invalid UTF-8 is decoded lossily.
pub async fn forward_lines<R, F>(reader: R, label: &str, mut emit: F)
where
    R: AsyncRead + Unpin,
    F: FnMut(String),
{
    let mut segments = BufReader::new(reader).split(b'\n');
    while let Ok(Some(segment)) = segments.next_segment().await {
        let text = String::from_utf8_lossy(&segment);
        if let Some(line) = label_line(label, &text) {
            emit(line);
        }
    }
}

fn emit_to(stream: OutputStream) -> impl FnMut(String) {
    move |line| match stream {
        OutputStream::Stdout => println!("{line}"),
        OutputStream::Stderr => eprintln!("{line}"),
    }
}

/// Spawns a command with stdin discarded and both output streams piped,
/// forwarding their lines labeled with `label` while waiting for the exit.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
/// * `label` - The worker label prefixed to every forwarded line.
///
/// # Returns
/// The `ExitStatus` of the process, or the I/O error raised while spawning or
/// waiting on it.
///
/// 派生一个命令，丢弃 stdin 并通过管道捕获两个输出流，
/// 在等待退出的同时转发带有 `label` 标签的行。
pub async fn spawn_and_stream(
    mut cmd: tokio::process::Command,
    label: &str,
) -> io::Result<ExitStatus> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other(t!("run.capture_stdout_failed").to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other(t!("run.capture_stderr_failed").to_string()))?;

    // Both pipes must be drained concurrently with the wait.
    let (status, _, _) = tokio::join!(
        child.wait(),
        forward_lines(stdout, label, emit_to(OutputStream::Stdout)),
        forward_lines(stderr, label, emit_to(OutputStream::Stderr)),
    );
    status
}
