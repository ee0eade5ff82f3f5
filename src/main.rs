use std::env;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;

use quarry::cli::{self, Cli};
use quarry::engine::PlanEngine;
use quarry::fault;

fn main() {
    let argv: Vec<String> = env::args().collect();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => process::exit(parse_exit(err)),
    };

    let mut engine = PlanEngine;
    if let Err(err) = cli::run(cli, &mut engine) {
        eprint!("{}", fault::render_failure(&argv, &err));
        process::exit(fault::exit_code(&err));
    }
}

/// clap exits with 2 on usage errors by default; here 2 is reserved for
/// unexpected failures, so every parse rejection maps to 1. Help and
/// version displays are successes.
fn parse_exit(err: clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            fault::SUCCESS
        }
        // Help shown because the invocation was incomplete is still a
        // usage rejection, not a requested help display.
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = err.print();
            fault::USER_ERROR
        }
        ErrorKind::InvalidSubcommand => {
            let _ = err.print();
            eprintln!("commands: {}", cli::command_names().join(" "));
            fault::USER_ERROR
        }
        _ => {
            let _ = err.print();
            fault::USER_ERROR
        }
    }
}
