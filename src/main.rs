use clap::Parser;
use std::process::ExitCode;

use paramfuzz::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = cli.output();

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
