/// Source text handling: cursor/location tracking and the tokenizer.
#[macro_use]
pub mod lang;

/// The evaluation engine: values, dictionary, machine, and the standard vocabulary.
pub mod runtime;

/// The side-effect boundary consumed by the engine: I/O, filesystem, process, environment.
pub mod host;

/// The read-evaluate-print loop built on top of `runtime::interpreter::machine::Machine`.
pub mod repl;
