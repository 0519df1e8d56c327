/// The tagged `Value` union, spec.md section 3: equality, total order, and the `to-*` coercions.
pub mod value;

/// The `ContextualData` trait, used for managing mark/release contexts in the interpreter.
pub mod contextual_data;

/// The word dictionary (`defs`), spec.md section 2.
pub mod dictionary;
