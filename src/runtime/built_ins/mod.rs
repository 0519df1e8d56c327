/// Register `$name` in `$machine` as a native word, implemented by the closure or function path
/// `$body`, documented with `$description` and stack-effect `$signature`.
///
/// Grounded on the teacher's `add_native_word!` (`examples/davehorner-rsorth/src/lang/mod.rs` and
/// its use throughout `runtime::built_ins::base_words::*`), adapted from the teacher's
/// `&mut dyn Interpreter` handler shape to a plain `&mut Machine` closure, since this interpreter
/// has no `Interpreter` trait object to register against.
#[macro_export]
macro_rules! add_native_word {
    ($machine:expr, $name:expr, $body:expr, $description:expr, $signature:expr) => {
        $machine.add_native($name, $signature, $description, std::rc::Rc::new($body))
    };
}

/// Stack discipline: `dup drop swap rot .s quote quote-all anything?`.
pub mod stack_words;

/// Binding names to actions: `def! def? defs usage def-usage :`.
pub mod dictionary_words;

/// Invoking actions: `do! do do!? do? doin loop eval`.
pub mod eval_words;

/// `+ - * / % abs rand`.
pub mod arithmetic_words;

/// `eq? gt? gte? lt? lte? and or not`.
pub mod comparison_words;

/// `split join upcase downcase starts-with? ends-with? contains?`.
pub mod string_words;

/// `map filter any? len ... rev sort concat push pop enq deq`.
pub mod quote_words;

/// `to-bool to-int to-float to-string to-cmd to-def to-quote`.
pub mod coercion_words;

/// Host-delegated I/O: `p ep nl enl red green norm rl rls cwd cd ls readf writef appendf exec
/// args procname interactive? version quit exit inspire`.
pub mod io_words;

use crate::runtime::interpreter::machine::Machine;

/// Register the entire standard vocabulary (spec.md section 4.5) into `machine`. Called once by
/// the driver (`main.rs`) and by every test that needs more than the bare `Machine`.
pub fn register_all(machine: &mut Machine) {
    stack_words::register(machine);
    dictionary_words::register(machine);
    eval_words::register(machine);
    arithmetic_words::register(machine);
    comparison_words::register(machine);
    string_words::register(machine);
    quote_words::register(machine);
    coercion_words::register(machine);
    io_words::register(machine);
}
