use std::io;

/// The result of `spawn`: a finished child process's captured output (spec.md section 6.1).
#[derive(Clone, Debug)]
pub struct SpawnOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: i32,
}

/// The sole side-effect boundary the evaluation engine depends on (spec.md section 6.1). Every
/// I/O, filesystem, process, and environment operation a script can perform goes through here, so
/// a restricted host can implement a subset and let the rest fail with `Unsupported` rather than
/// pull in capabilities the embedder doesn't want to grant.
///
/// Grounded on the teacher's I/O and terminal words (`examples/davehorner-rsorth/src/runtime/built_ins/io_words.rs`,
/// `terminal_words/{unix,windows}.rs`), which hard-code `std::io`/`libc`/`winapi` calls directly
/// into each word; here those calls move behind one object-safe trait so the built-ins in
/// `runtime::built_ins::io_words` stay host-agnostic.
pub trait Host {
    /// Read one line from standard input, without the trailing newline. `Ok(None)` on EOF.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    fn write_out(&mut self, bytes: &[u8]) -> io::Result<()>;
    fn write_err(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn is_tty_in(&self) -> bool;
    fn is_tty_out(&self) -> bool;
    fn is_tty_err(&self) -> bool;

    fn getcwd(&self) -> io::Result<String>;
    fn chdir(&mut self, path: &str) -> io::Result<()>;
    fn list_dir(&self, path: &str) -> io::Result<Vec<String>>;

    /// Reads are capped at 2^16 bytes per call (spec.md section 6.1); a larger file is an error
    /// rather than a silent truncation (see DESIGN.md's note on `readf`).
    fn read_file(&self, path: &str) -> io::Result<Vec<u8>>;
    fn write_file(&self, path: &str, bytes: &[u8]) -> io::Result<()>;

    /// Creates the file if it does not already exist (DESIGN.md's note on `appendf`).
    fn append_file(&self, path: &str, bytes: &[u8]) -> io::Result<()>;

    fn spawn(&self, argv: &[String]) -> io::Result<SpawnOutput>;

    fn env_get(&self, name: &str) -> Option<String>;

    /// The process's argument vector, including the process name at index 0.
    fn argv(&self) -> Vec<String>;

    fn exit(&self, code: u8) -> !;
}

/// Implementation backed directly by the operating system (`std::fs`, `std::process`,
/// `std::env`).
pub mod stdio;
