//! tripad command-line entry point.

use std::io::{self, IsTerminal};

use clap::Parser;
use tri_pad::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;

use crate::cli::{Cli, LogFormatArg};

fn main() {
    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli));

    let exit_code = match commands::run(cli.command, cli.data_dir) {
        Ok(()) => 0,
        Err(error) => {
            tracing::debug!(?error, "command failed");
            eprintln!("error: {}", error.user_message());
            1
        }
    };
    std::process::exit(exit_code);
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Json => LogFormat::Json,
    };
    LogConfig::from_verbosity(cli.verbose)
        .with_format(format)
        .with_ansi(io::stderr().is_terminal())
}
