//! backlog - A command-line client for the Backlog API
//!
//! Each invocation performs one API call and prints the JSON response.

mod api;
mod cli;
mod commands;
mod config;
mod error;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use api::BacklogClient;
use cli::Cli;
use commands::Request;
use config::Config;
use error::{AppError, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            err.print().ok();
            return ExitCode::SUCCESS;
        }
        Err(err) => return report(&AppError::Usage(cli::usage_message(&err))),
    };

    logging::init().ok();

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}

/// Validate, configure, call, render. Nothing is printed here.
async fn run(cli: Cli) -> Result<String> {
    let command = cli.command.ok_or_else(|| {
        AppError::Usage("no command given. Run with --help for available commands".to_string())
    })?;

    let request = Request::try_from(command)?;
    let config = Config::from_env()?;
    debug!(domain = %config.domain, "Configuration loaded");

    let client = BacklogClient::new(&config)?;
    let value = request.send(&client).await?;

    commands::render(&value)
}

fn report(err: &AppError) -> ExitCode {
    tracing::error!(local = err.is_local(), "{}", err);
    eprintln!("Error: {}", err);
    ExitCode::FAILURE
}
