use std::process::ExitCode;

use clap::Parser;
use kontora_cli::{CliArgs, KontoraCli};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let cli = match KontoraCli::from_args("kontora", &args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.run(args).await {
        Ok(outcome) if outcome.success => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
