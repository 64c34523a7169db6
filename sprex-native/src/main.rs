mod cli;
mod config;

use std::process::ExitCode;

fn main() -> ExitCode {
    let err_exit = ExitCode::from(1);
    let ok_exit = ExitCode::from(0);

    match cli::cli() {
        cli::CliRes::NoCli => {
            cli::cli_help();
            err_exit
        }
        cli::CliRes::Ok => ok_exit,
        cli::CliRes::Err => err_exit,
    }
}
