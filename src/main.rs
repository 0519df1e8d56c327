use std::io::{IsTerminal, Read};
use std::process::ExitCode;
use tally::host::stdio::StdHost;
use tally::repl;
use tally::runtime::built_ins;
use tally::runtime::interpreter::machine::Machine;

const HELP: &str = "\
tally - a stack-oriented command interpreter

USAGE:
    tally [SCRIPT] [ARGS...]
    tally --help
    tally --version

With no SCRIPT, reads a program from standard input: interactively (a REPL,
prompting line by line) if standard input is a terminal, or as a single
script otherwise.";

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().collect();

    match argv.get(1).map(String::as_str) {
        Some("--help") => {
            println!("{}", HELP);
            ExitCode::SUCCESS
        }

        Some("--version") => {
            println!("tally {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }

        Some(path) => {
            let mut machine = Machine::new(Box::new(StdHost::new(argv.clone())));
            built_ins::register_all(&mut machine);

            match std::fs::read_to_string(path) {
                Ok(source) => repl::run_source(&mut machine, path, &source),
                Err(error) => {
                    eprintln!("Error: could not read '{}': {}", path, error);
                    ExitCode::FAILURE
                }
            }
        }

        None => {
            let mut machine = Machine::new(Box::new(StdHost::new(argv.clone())));
            built_ins::register_all(&mut machine);

            if std::io::stdin().is_terminal() {
                let history_path = std::env::var("TALLY_HISTORY_PATH").ok();
                repl::run_interactive(&mut machine, history_path.as_deref())
            } else {
                let mut source = String::new();
                match std::io::stdin().read_to_string(&mut source) {
                    Ok(_) => repl::run_source(&mut machine, "<stdin>", &source),
                    Err(error) => {
                        eprintln!("Error: could not read standard input: {}", error);
                        ExitCode::FAILURE
                    }
                }
            }
        }
    }
}
