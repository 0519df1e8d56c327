use crate::host::{Host, SpawnOutput};
use std::fs::OpenOptions;
use std::io::{self, IsTerminal, Read, Write};
use std::process::Command;

/// The maximum size `read_file` will return in one call (spec.md section 6.1).
const MAX_READ_FILE_BYTES: u64 = 1 << 16;

/// The standard, unrestricted host: real stdin/stdout/stderr and real filesystem/process access.
/// Used by both the script driver and the REPL (`main.rs`/`repl.rs`).
pub struct StdHost {
    argv: Vec<String>,
    stdin: io::BufReader<io::Stdin>,
}

impl StdHost {
    pub fn new(argv: Vec<String>) -> StdHost {
        StdHost {
            argv,
            stdin: io::BufReader::new(io::stdin()),
        }
    }
}

impl Host for StdHost {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let bytes_read = io::BufRead::read_line(&mut self.stdin, &mut line)?;

        if bytes_read == 0 {
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        Ok(Some(line))
    }

    fn write_out(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(bytes)?;
        stdout.flush()
    }

    fn write_err(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut stderr = io::stderr();
        stderr.write_all(bytes)?;
        stderr.flush()
    }

    fn is_tty_in(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn is_tty_out(&self) -> bool {
        io::stdout().is_terminal()
    }

    fn is_tty_err(&self) -> bool {
        io::stderr().is_terminal()
    }

    fn getcwd(&self) -> io::Result<String> {
        let path = std::env::current_dir()?;
        Ok(path.to_string_lossy().into_owned())
    }

    fn chdir(&mut self, path: &str) -> io::Result<()> {
        std::env::set_current_dir(path)
    }

    fn list_dir(&self, path: &str) -> io::Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in std::fs::read_dir(path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }

        names.sort();
        Ok(names)
    }

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        let metadata = std::fs::metadata(path)?;

        if metadata.len() > MAX_READ_FILE_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is larger than the {} byte read limit.", path, MAX_READ_FILE_BYTES),
            ));
        }

        let mut file = std::fs::File::open(path)?;
        let mut bytes = Vec::with_capacity(metadata.len() as usize);
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn write_file(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        std::fs::write(path, bytes)
    }

    fn append_file(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(bytes)
    }

    fn spawn(&self, argv: &[String]) -> io::Result<SpawnOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "spawn requires at least a program name."))?;

        let output = Command::new(program).args(args).output()?;

        Ok(SpawnOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    fn env_get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn argv(&self) -> Vec<String> {
        self.argv.clone()
    }

    fn exit(&self, code: u8) -> ! {
        std::process::exit(code as i32)
    }
}
