// src/cli.rs
use clap::{Arg, ArgAction, Command};
use std::process::ExitCode;

use crate::{core::config, infra::t, reporting::console};

pub mod commands;

fn build_cli() -> Command {
    Command::new("parallel-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about").to_string())
        .after_help(t!("cli_after_help").to_string())
        .arg(
            Arg::new("args")
                .help(t!("arg_args").to_string())
                .value_name("LOCATIONS_AND_FLAGS")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .action(ArgAction::Append),
        )
}

/// Flags answered by clap itself, and only in first position.
const INTERCEPTED_FLAGS: [&str; 4] = ["-h", "--help", "-V", "--version"];

fn wants_help(args: &[String]) -> bool {
    args.first()
        .is_some_and(|first| INTERCEPTED_FLAGS.contains(&first.as_str()))
}

/// Prints help or version when the invocation starts with one of
/// [`INTERCEPTED_FLAGS`]. Any other argument list is left to the invocation
/// parser untouched, since clap would swallow a `--` escape token.
fn intercept_help(args: &[String]) -> Option<ExitCode> {
    if !wants_help(args) {
        return None;
    }
    let argv = std::iter::once("parallel-runner".to_string()).chain(args.iter().cloned());
    match build_cli().try_get_matches_from(argv) {
        Ok(_) => None,
        Err(e) => {
            let _ = e.print();
            Some(if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

/// Entry point: takes the raw arguments (program name excluded) and returns
/// the process exit status. Nothing runs before this is called.
pub async fn run(args: Vec<String>) -> ExitCode {
    let config = match config::resolve_config() {
        Ok(config) => config,
        Err(e) => {
            crate::init(None);
            console::log_error(&t!("error.fatal", error = format!("{e:#}")));
            return ExitCode::FAILURE;
        }
    };
    crate::init(config.language.as_deref());

    if let Some(code) = intercept_help(&args) {
        return code;
    }

    match commands::run::execute(args, config).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            console::log_error(&t!("error.fatal", error = format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}
