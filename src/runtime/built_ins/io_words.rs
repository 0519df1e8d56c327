use crate::add_native_word;
use crate::runtime::data_structures::value::Value;
use crate::runtime::error::{self, ErrorKind, ScriptError};
use crate::runtime::interpreter::machine::Machine;
use std::io;

const RED: &[u8] = b"\x1b[31m";
const GREEN: &[u8] = b"\x1b[32m";
const NORM: &[u8] = b"\x1b[0m";

/// A fixed pool of quotation strings for `inspire`, the Rust equivalent of the teacher's
/// data-driven constant tables (`base_words/constant_words.rs`).
const INSPIRATIONS: &[&str] = &[
    "Premature optimization is the root of all evil.",
    "Simplicity is prerequisite for reliability.",
    "Make it work, make it right, make it fast.",
    "A program is a spell cast over a computer.",
    "The best code is no code at all.",
];

fn raw_print(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn style_if_tty(machine: &mut Machine, code: &[u8]) -> io::Result<()> {
    if machine.host().is_tty_out() {
        machine.host_mut().write_out(code)
    } else {
        Ok(())
    }
}

/// Host-delegated I/O (spec.md section 4.5, "I/O (delegated to host)"). Grounded on the shape of
/// the teacher's terminal/io words, adapted to call through `Machine::host`/`host_mut` instead of
/// embedding `std::io`/raw socket calls directly (see `host::Host`'s doc comment).
pub fn register(machine: &mut Machine) {
    add_native_word!(
        machine,
        "p",
        |m: &mut Machine| m.with_rewind(1, |m, args| {
            m.host_mut().write_out(raw_print(&args[0]).as_bytes())?;
            Ok(Vec::new())
        }),
        "Print `a` raw (strings without quotes) to standard output.",
        "a -- "
    );

    add_native_word!(
        machine,
        "ep",
        |m: &mut Machine| m.with_rewind(1, |m, args| {
            m.host_mut().write_err(raw_print(&args[0]).as_bytes())?;
            Ok(Vec::new())
        }),
        "Print `a` raw to the diagnostic stream.",
        "a -- "
    );

    add_native_word!(
        machine,
        "nl",
        |m: &mut Machine| {
            m.host_mut().write_out(b"\n")?;
            Ok(())
        },
        "Emit a newline to standard output.",
        " -- "
    );

    add_native_word!(
        machine,
        "enl",
        |m: &mut Machine| {
            m.host_mut().write_err(b"\n")?;
            Ok(())
        },
        "Emit a newline to the diagnostic stream.",
        " -- "
    );

    add_native_word!(
        machine,
        "red",
        |m: &mut Machine| Ok(style_if_tty(m, RED)?),
        "Emit the ANSI red style code when standard output is a terminal.",
        " -- "
    );

    add_native_word!(
        machine,
        "green",
        |m: &mut Machine| Ok(style_if_tty(m, GREEN)?),
        "Emit the ANSI green style code when standard output is a terminal.",
        " -- "
    );

    add_native_word!(
        machine,
        "norm",
        |m: &mut Machine| Ok(style_if_tty(m, NORM)?),
        "Emit the ANSI reset style code when standard output is a terminal.",
        " -- "
    );

    add_native_word!(
        machine,
        "rl",
        |m: &mut Machine| {
            match m.host_mut().read_line()? {
                Some(line) => {
                    m.push(Value::String(line));
                    Ok(())
                }
                None => Err(ScriptError::new(ErrorKind::IOError, "End of input.".to_string(), None)),
            }
        },
        "Read one line from standard input.",
        " -- line"
    );

    add_native_word!(
        machine,
        "rls",
        |m: &mut Machine| {
            let mut lines = Vec::new();
            while let Some(line) = m.host_mut().read_line()? {
                lines.push(Value::String(line));
            }
            m.push(Value::quote(lines));
            Ok(())
        },
        "Read every remaining line from standard input until EOF.",
        " -- [line...]"
    );

    add_native_word!(
        machine,
        "cwd",
        |m: &mut Machine| {
            let path = m.host().getcwd()?;
            m.push(Value::String(path));
            Ok(())
        },
        "The current working directory.",
        " -- path"
    );

    add_native_word!(
        machine,
        "cd",
        |m: &mut Machine| m.with_rewind(1, |m, args| {
            let path = args[0].into_string()?;
            let expanded = expand_home(m, &path)?;
            m.host_mut().chdir(&expanded)?;
            Ok(Vec::new())
        }),
        "Change the current working directory; a lone `~` expands via `HOME`.",
        "path -- "
    );

    add_native_word!(
        machine,
        "ls",
        |m: &mut Machine| m.with_rewind(1, |m, args| {
            let path = args[0].into_string()?;
            let names = m.host().list_dir(&path)?.into_iter().map(Value::String).collect();
            Ok(vec![Value::quote(names)])
        }),
        "List the names in `path`.",
        "path -- [name...]"
    );

    add_native_word!(
        machine,
        "readf",
        |m: &mut Machine| m.with_rewind(1, |m, args| {
            let path = args[0].into_string()?;
            let bytes = m.host().read_file(&path)?;
            Ok(vec![Value::String(String::from_utf8_lossy(&bytes).into_owned())])
        }),
        "Read the contents of `path` (capped at 64KiB).",
        "path -- contents"
    );

    add_native_word!(
        machine,
        "writef",
        |m: &mut Machine| m.with_rewind(2, |m, args| {
            let path = args[0].into_string()?;
            let contents = args[1].into_string()?;
            m.host().write_file(&path, contents.as_bytes())?;
            Ok(Vec::new())
        }),
        "Overwrite `path` with `contents`.",
        "path contents -- "
    );

    add_native_word!(
        machine,
        "appendf",
        |m: &mut Machine| m.with_rewind(2, |m, args| {
            let path = args[0].into_string()?;
            let contents = args[1].into_string()?;
            m.host().append_file(&path, contents.as_bytes())?;
            Ok(Vec::new())
        }),
        "Append `contents` to `path`, creating it if absent.",
        "path contents -- "
    );

    add_native_word!(
        machine,
        "exec",
        |m: &mut Machine| m.with_rewind(1, |m, args| {
            let argv = args[0].into_quote();
            let mut command = Vec::with_capacity(argv.len());
            for value in argv.iter() {
                command.push(value.into_string()?);
            }

            let output = m.host().spawn(&command)?;
            Ok(vec![
                Value::String(String::from_utf8_lossy(&output.stdout).into_owned()),
                Value::String(String::from_utf8_lossy(&output.stderr).into_owned()),
                Value::Int(output.exit_code as i64),
            ])
        }),
        "Spawn `argv` and wait for it to finish.",
        "[argv...] -- stdout stderr exit_code"
    );

    add_native_word!(
        machine,
        "args",
        |m: &mut Machine| {
            let arguments = m.host().argv().into_iter().skip(1).map(Value::String).collect();
            m.push(Value::quote(arguments));
            Ok(())
        },
        "The process's arguments, excluding the process name.",
        " -- [arg...]"
    );

    add_native_word!(
        machine,
        "procname",
        |m: &mut Machine| {
            match m.host().argv().first() {
                Some(name) => {
                    m.push(Value::String(name.clone()));
                    Ok(())
                }
                None => Err(ScriptError::new(ErrorKind::ProcessNameUnknown, "No process name available.".to_string(), None)),
            }
        },
        "The running process's name.",
        " -- name"
    );

    add_native_word!(
        machine,
        "interactive?",
        |m: &mut Machine| {
            m.push(Value::Bool(m.host().is_tty_in()));
            Ok(())
        },
        "Is standard input a terminal?",
        " -- bool"
    );

    add_native_word!(
        machine,
        "version",
        |m: &mut Machine| {
            m.push(Value::String(env!("CARGO_PKG_VERSION").to_string()));
            Ok(())
        },
        "The interpreter's version string.",
        " -- version"
    );

    add_native_word!(
        machine,
        "quit",
        |m: &mut Machine| {
            if m.top_len() > 0 {
                let _ = m.host_mut().write_err(b"Warning: quit with a nonempty stack.\n");
            }
            m.host().exit(0)
        },
        "Exit the process successfully, warning if the root context is nonempty.",
        " -- "
    );

    add_native_word!(
        machine,
        "exit",
        |m: &mut Machine| m.with_rewind(1, |m, args| {
            let requested = args[0].into_int()?;
            let clamped = requested.clamp(0, 255);

            if clamped != requested {
                let _ = m
                    .host_mut()
                    .write_err(format!("Warning: exit code {} clamped to {}.\n", requested, clamped).as_bytes());
            }

            m.host().exit(clamped as u8)
        }),
        "Exit the process with `code`, clamped to 0..=255.",
        "code -- "
    );

    add_native_word!(
        machine,
        "inspire",
        |m: &mut Machine| {
            let index = (rand::random::<u32>() as usize) % INSPIRATIONS.len();
            m.push(Value::String(INSPIRATIONS[index].to_string()));
            Ok(())
        },
        "Push a random quotation from the inspiration pool.",
        " -- string"
    );
}

fn expand_home(machine: &Machine, path: &str) -> error::Result<String> {
    if path != "~" {
        return Ok(path.to_string());
    }

    machine
        .host()
        .env_get("HOME")
        .ok_or_else(|| ScriptError::new(ErrorKind::Unsupported, "HOME is not set.".to_string(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Host, SpawnOutput};
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    /// An in-memory host so these tests don't touch the real filesystem or process table.
    struct FakeHost {
        cwd: String,
        files: RefCell<HashMap<String, Vec<u8>>>,
        env: HashMap<String, String>,
        input: RefCell<VecDeque<String>>,
    }

    impl FakeHost {
        fn new() -> FakeHost {
            FakeHost {
                cwd: "/home/user".to_string(),
                files: RefCell::new(HashMap::new()),
                env: HashMap::from([("HOME".to_string(), "/home/user".to_string())]),
                input: RefCell::new(VecDeque::new()),
            }
        }
    }

    impl Host for FakeHost {
        fn read_line(&mut self) -> io::Result<Option<String>> {
            Ok(self.input.get_mut().pop_front())
        }

        fn write_out(&mut self, _bytes: &[u8]) -> io::Result<()> {
            Ok(())
        }

        fn write_err(&mut self, _bytes: &[u8]) -> io::Result<()> {
            Ok(())
        }

        fn is_tty_in(&self) -> bool {
            false
        }

        fn is_tty_out(&self) -> bool {
            false
        }

        fn is_tty_err(&self) -> bool {
            false
        }

        fn getcwd(&self) -> io::Result<String> {
            Ok(self.cwd.clone())
        }

        fn chdir(&mut self, path: &str) -> io::Result<()> {
            self.cwd = path.to_string();
            Ok(())
        }

        fn list_dir(&self, _path: &str) -> io::Result<Vec<String>> {
            Ok(vec!["a".to_string(), "b".to_string()])
        }

        fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
        }

        fn write_file(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
            self.files.borrow_mut().insert(path.to_string(), bytes.to_vec());
            Ok(())
        }

        fn append_file(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
            self.files.borrow_mut().entry(path.to_string()).or_default().extend_from_slice(bytes);
            Ok(())
        }

        fn spawn(&self, _argv: &[String]) -> io::Result<SpawnOutput> {
            Ok(SpawnOutput { stdout: b"ok".to_vec(), stderr: Vec::new(), exit_code: 0 })
        }

        fn env_get(&self, name: &str) -> Option<String> {
            self.env.get(name).cloned()
        }

        fn argv(&self) -> Vec<String> {
            vec!["tally".to_string(), "a.sorth".to_string()]
        }

        fn exit(&self, _code: u8) -> ! {
            panic!("exit called in test");
        }
    }

    fn machine() -> Machine {
        let mut m = Machine::new(Box::new(FakeHost::new()));
        register(&mut m);
        m
    }

    #[test]
    fn writef_then_readf_round_trips() {
        let mut m = machine();
        m.eval_source("<t>", "\"/tmp/x\" \"hello\" writef").unwrap();
        m.eval_source("<t>", "\"/tmp/x\" readf").unwrap();
        assert_eq!(m.pop().unwrap(), Value::String("hello".to_string()));
    }

    #[test]
    fn appendf_creates_and_extends() {
        let mut m = machine();
        m.eval_source("<t>", "\"/tmp/y\" \"a\" appendf").unwrap();
        m.eval_source("<t>", "\"/tmp/y\" \"b\" appendf").unwrap();
        m.eval_source("<t>", "\"/tmp/y\" readf").unwrap();
        assert_eq!(m.pop().unwrap(), Value::String("ab".to_string()));
    }

    #[test]
    fn cd_expands_lone_tilde() {
        let mut m = machine();
        m.eval_source("<t>", "\"~\" cd").unwrap();
        m.eval_source("<t>", "cwd").unwrap();
        assert_eq!(m.pop().unwrap(), Value::String("/home/user".to_string()));
    }

    #[test]
    fn args_excludes_process_name() {
        let mut m = machine();
        m.eval_source("<t>", "args").unwrap();
        match m.pop().unwrap() {
            Value::Quote(values) => assert_eq!(values.as_ref(), &[Value::String("a.sorth".to_string())]),
            other => panic!("expected a quote, got {:?}", other),
        }
    }

    #[test]
    fn procname_is_argv_zero() {
        let mut m = machine();
        m.eval_source("<t>", "procname").unwrap();
        assert_eq!(m.pop().unwrap(), Value::String("tally".to_string()));
    }

    #[test]
    fn exec_returns_stdout_stderr_and_exit_code() {
        let mut m = machine();
        m.eval_source("<t>", "[ \"echo\" ] exec").unwrap();
        assert_eq!(m.pop().unwrap(), Value::Int(0));
        assert_eq!(m.pop().unwrap(), Value::String(String::new()));
        assert_eq!(m.pop().unwrap(), Value::String("ok".to_string()));
    }

    #[test]
    fn rl_on_eof_is_an_io_error() {
        let mut m = machine();
        let error = m.eval_source("<t>", "rl").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::IOError);
    }

    #[test]
    fn rls_collects_every_pending_line() {
        let mut m = Machine::new(Box::new(FakeHost {
            input: RefCell::new(VecDeque::from(["a".to_string(), "b".to_string()])),
            ..FakeHost::new()
        }));
        register(&mut m);
        m.eval_source("<t>", "rls").unwrap();
        match m.pop().unwrap() {
            Value::Quote(values) => {
                assert_eq!(values.as_ref(), &[Value::String("a".to_string()), Value::String("b".to_string())])
            }
            other => panic!("expected a quote, got {:?}", other),
        }
    }
}
