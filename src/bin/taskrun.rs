//! Taskrun CLI Binary
//!
//! Runs a named workspace script and exits with its exit code.

use clap::Parser;
use owo_colors::OwoColorize;
use std::process;
use taskrun::error::RunError;
use taskrun::tooling::cli::{exit_code, Cli, CliContext, ERROR_EXIT_CODE};

fn report(err: &RunError) {
    eprintln!("{} {}", "error:".red().bold(), err);
    if let Some(guidance) = err.guidance() {
        eprintln!("  {}", guidance);
    }
}

async fn run(cli: Cli) -> i32 {
    let context = match CliContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            report(&e);
            return ERROR_EXIT_CODE;
        }
    };

    if let Err(e) = context.init_logging() {
        report(&e);
        return ERROR_EXIT_CODE;
    }

    let result = context.execute(&cli.command).await;
    match &result {
        Ok(outcome) => {
            if let Some(output) = &outcome.output {
                println!("{}", output);
            }
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            report(e);
        }
    }
    exit_code(&result)
}

fn main() {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting async runtime: {}", e);
            process::exit(ERROR_EXIT_CODE);
        }
    };

    let code = runtime.block_on(run(cli));
    drop(runtime);
    process::exit(code);
}
