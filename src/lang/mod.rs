/// Tracking cursor positions in source text, used for error reporting.
#[macro_use]
pub mod source_buffer;

/// Lexing source bytes into the token stream the interpreter dispatches on.
pub mod tokenizing;
