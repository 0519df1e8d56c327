use tally::host::stdio::StdHost;
use tally::runtime::built_ins;
use tally::runtime::data_structures::value::Value;
use tally::runtime::interpreter::machine::Machine;

fn machine() -> Machine {
    let mut m = Machine::new(Box::new(StdHost::new(vec!["tally".to_string()])));
    built_ins::register_all(&mut m);
    m
}

/// The stack is observably unchanged after a failing command, across a representative sample of
/// words from every built-in module (spec.md section 4.2, "Rewind discipline"; section 8,
/// property 1).
fn assert_rewinds(program: &str, expected_depth_before_failure: usize) {
    let mut m = machine();
    let error = m.eval_source("<test>", program).unwrap_err();
    let _ = error;
    assert_eq!(m.top_len(), expected_depth_before_failure, "stack not rewound after: {}", program);
}

#[test]
fn arithmetic_rewinds_on_overflow() {
    assert_rewinds("9223372036854775807 1 +", 2);
}

#[test]
fn arithmetic_rewinds_on_division_by_zero() {
    assert_rewinds("5 0 /", 2);
    assert_rewinds("5 0 %", 2);
}

#[test]
fn comparison_rewinds_on_wrong_type_is_not_possible_but_underflow_rewinds() {
    assert_rewinds("1 gt?", 1);
}

#[test]
fn string_words_rewind_on_wrong_type() {
    assert_rewinds("[ 1 2 ] \",\" split", 2);
}

#[test]
fn quote_words_rewind_on_empty_pop() {
    assert_rewinds("[ ] pop", 1);
}

#[test]
fn coercion_rewinds_on_unparseable_string() {
    assert_rewinds("\"not a number\" to-int", 1);
}

#[test]
fn dictionary_colon_rewinds_on_short_stack() {
    assert_rewinds("1 [ \\a \\b ] :", 2);
}

#[test]
fn eval_words_rewind_when_action_fails() {
    assert_rewinds("[ 1 0 / ] do!", 1);
}

#[test]
fn eval_rewinds_the_whole_context_when_the_source_partially_runs() {
    assert_rewinds("\"1 2 + 1 0 /\" eval", 1);
}

#[test]
fn successful_commands_leave_no_trace_of_popped_arguments() {
    let mut m = machine();
    m.eval_source("<test>", "1 2 +").unwrap();
    assert_eq!(m.top_slice(), &[Value::Int(3)]);
}
