use case_runner::cli;
use colored::*;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    case_runner::init_tracing();

    // Parse command line arguments and run
    match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
