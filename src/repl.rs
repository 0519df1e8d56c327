use crate::runtime::error::ScriptError;
use crate::runtime::interpreter::machine::Machine;
use std::process::ExitCode;

/// Write a diagnostic for `error` to the host's diagnostic stream, in red when that stream is a
/// terminal (spec.md section 7: "The driver reports a diagnostic in red to the diagnostic
/// stream"). Grounded on the teacher's terminal color words
/// (`examples/davehorner-rsorth/src/runtime/built_ins/terminal_words/{unix,windows}.rs`), which
/// gate ANSI codes on an `is_tty` check the same way.
fn report_error(machine: &mut Machine, error: &ScriptError) {
    let message = if machine.host().is_tty_err() {
        format!("\x1b[31mError: {}\x1b[0m\n", error)
    } else {
        format!("Error: {}\n", error)
    };

    let _ = machine.host_mut().write_err(message.as_bytes());
}

/// Run a single piece of source to completion (script file, `-e` argument, or piped stdin).
/// Reports and swallows the error the way the driver is specified to (section 7); the caller maps
/// the outcome to a process exit code.
pub fn run_source(machine: &mut Machine, path: &str, source: &str) -> ExitCode {
    match machine.eval_source(path, source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_error(machine, &error);
            ExitCode::FAILURE
        }
    }
}

/// Append `line` to the history file at `history_path`, if any. A failure here (unwritable
/// directory, permissions) is reported but never ends the session; history is a convenience, not
/// something a REPL session should die over.
fn record_history(machine: &mut Machine, history_path: Option<&str>, line: &str) {
    let Some(path) = history_path else { return };

    let mut entry = line.to_string();
    entry.push('\n');

    if let Err(error) = machine.host_mut().append_file(path, entry.as_bytes()) {
        report_error(machine, &ScriptError::from(error));
    }
}

/// Read-evaluate-print loop: read a line, evaluate it, report any error, and keep going until
/// standard input reaches EOF. Unlike script mode, a failing line does not end the session
/// (spec.md section 7). `history_path`, when set, is the file each entered line is appended to
/// (the `TALLY_HISTORY_PATH` environment variable, spec.md's "Configuration" section), the way the
/// teacher's `RSORTH_LIB_PATH` is read once by the driver and threaded through.
pub fn run_interactive(machine: &mut Machine, history_path: Option<&str>) -> ExitCode {
    loop {
        match machine.host_mut().read_line() {
            Ok(Some(line)) => {
                record_history(machine, history_path, &line);

                if let Err(error) = machine.eval_source("<repl>", &line) {
                    report_error(machine, &error);
                }
            }

            Ok(None) => return ExitCode::SUCCESS,

            Err(io_error) => {
                report_error(machine, &ScriptError::from(io_error));
                return ExitCode::FAILURE;
            }
        }
    }
}
