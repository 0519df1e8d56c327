use crate::lang::source_buffer::SourceLocation;
use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
    process::{ExitCode, Termination},
};

pub type Result<T> = std::result::Result<T, ScriptError>;

/// The closed set of error categories the interpreter can raise, matching spec.md section 7.
/// Kept as a real enum (rather than the free-form string the teacher uses) so embedders and
/// tests can match on error category instead of scraping messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Popped from an empty working stack.
    StackUnderflow,

    /// `]` with no matching `[`.
    ContextStackUnderflow,

    /// A `term` token names no dictionary entry.
    CommandUndefined,

    /// Checked integer arithmetic overflowed.
    IntegerOverflow,

    /// Checked integer arithmetic underflowed.
    IntegerUnderflow,

    /// `/` or `%` with a zero divisor.
    DivisionByZero,

    /// A coercion or type-specific operation was given a value of the wrong shape.
    WrongType,

    /// `procname` could not determine the running process's name.
    ProcessNameUnknown,

    /// The host does not implement the requested capability.
    Unsupported,

    /// A host I/O call failed.
    IOError,

    /// The tokenizer could not produce a token (unterminated string, unmatched `]`, etc).
    ParseError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let text = match self {
            ErrorKind::StackUnderflow => "StackUnderflow",
            ErrorKind::ContextStackUnderflow => "ContextStackUnderflow",
            ErrorKind::CommandUndefined => "CommandUndefined",
            ErrorKind::IntegerOverflow => "IntegerOverflow",
            ErrorKind::IntegerUnderflow => "IntegerUnderflow",
            ErrorKind::DivisionByZero => "DivisionByZero",
            ErrorKind::WrongType => "WrongType",
            ErrorKind::ProcessNameUnknown => "ProcessNameUnknown",
            ErrorKind::Unsupported => "Unsupported",
            ErrorKind::IOError => "IOError",
            ErrorKind::ParseError => "ParseError",
        };

        write!(f, "{}", text)
    }
}

/// Any error that occurs while tokenizing or evaluating a program.
#[derive(Clone)]
pub struct ScriptError {
    kind: ErrorKind,
    message: String,
    location: Option<SourceLocation>,
}

impl Error for ScriptError {}

/// When returned from `main`, convert the error into a process exit code, printing a
/// diagnostic in the process.
impl Termination for ScriptError {
    fn report(self) -> ExitCode {
        eprintln!("Error: {}", self);
        ExitCode::FAILURE
    }
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}: {}", location, self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl Debug for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl ScriptError {
    /// Create a new ScriptError.
    pub fn new(kind: ErrorKind, message: String, location: Option<SourceLocation>) -> ScriptError {
        ScriptError {
            kind,
            message,
            location,
        }
    }

    /// The category of error this is.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The human readable description of the error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// If available, where in the source code the error occurred.
    pub fn location(&self) -> &Option<SourceLocation> {
        &self.location
    }
}

/// Host I/O failures always surface as `ErrorKind::IOError`.
impl From<std::io::Error> for ScriptError {
    fn from(error: std::io::Error) -> ScriptError {
        ScriptError::new(ErrorKind::IOError, error.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_location_when_present() {
        let location = SourceLocation::new_from_info("<test>", 3, 7);
        let error = ScriptError::new(
            ErrorKind::DivisionByZero,
            "divide by zero".to_string(),
            Some(location),
        );

        let text = error.to_string();
        assert!(text.contains("DivisionByZero"));
        assert!(text.contains("divide by zero"));
        assert!(text.contains("<test>"));
    }

    #[test]
    fn io_error_converts_to_io_kind() {
        let io_error = std::io::Error::other("boom");
        let script_error: ScriptError = io_error.into();
        assert_eq!(script_error.kind(), ErrorKind::IOError);
    }
}
