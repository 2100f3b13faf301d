use std::process::ExitCode;

use clap::Parser;
use recursica_cli::cli::Cli;
use recursica_cli::{commands, logging, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", commands::describe_error(&err));
            ExitCode::FAILURE
        }
    }
}
