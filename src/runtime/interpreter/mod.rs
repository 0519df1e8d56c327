/// `Machine`: the working stack, context stack, dictionary, and dispatch loop that together make
/// up the evaluation engine (spec.md sections 3-4).
pub mod machine;
