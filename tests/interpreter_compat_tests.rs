use tally::host::stdio::StdHost;
use tally::runtime::built_ins;
use tally::runtime::data_structures::value::Value;
use tally::runtime::interpreter::machine::Machine;

fn eval_and_stack(program: &str) -> Vec<Value> {
    let mut machine = Machine::new(Box::new(StdHost::new(vec!["tally".to_string()])));
    built_ins::register_all(&mut machine);
    machine.eval_source("<test>", program).unwrap();
    machine.top_slice().to_vec()
}

#[test]
fn simple_add() {
    assert_eq!(eval_and_stack("2 2 +"), vec![Value::Int(4)]);
}

#[test]
fn simple_sub() {
    assert_eq!(eval_and_stack("5 2 -"), vec![Value::Int(3)]);
}

#[test]
fn quote_literals_stay_data_until_invoked() {
    assert_eq!(eval_and_stack("[ 1 2 3 ]"), vec![Value::quote(vec![Value::Int(1), Value::Int(2), Value::Int(3)])]);
}

#[test]
fn map_over_a_quote() {
    assert_eq!(
        eval_and_stack("[ 1 2 3 ] [ 2 * ] map"),
        vec![Value::quote(vec![Value::Int(2), Value::Int(4), Value::Int(6)])]
    );
}

#[test]
fn filter_keeps_originals() {
    assert_eq!(
        eval_and_stack("[ 1 2 3 4 5 ] [ 3 gt? ] filter"),
        vec![Value::quote(vec![Value::Int(4), Value::Int(5)])]
    );
}

#[test]
fn user_defined_word_via_def_bang() {
    assert_eq!(eval_and_stack("[ dup * ] \\square def! 5 square"), vec![Value::Int(25)]);
}

#[test]
fn colon_binds_a_scalar_constant() {
    assert_eq!(eval_and_stack("42 \\answer : answer"), vec![Value::Int(42)]);
}

#[test]
fn do_jails_definitions() {
    assert_eq!(eval_and_stack("[ [ 1 ] \\temp def! ] do \\temp def?"), vec![Value::Bool(false)]);
}

#[test]
fn loop_counts_up_to_a_limit() {
    assert_eq!(
        eval_and_stack("0 \\n : [ n 1 + \\n : n 5 gte? [ 1 0 / ] swap do? ] loop n"),
        vec![Value::Int(5)]
    );
}

#[test]
fn string_round_trip_through_split_and_join() {
    assert_eq!(eval_and_stack("\"a,b,c\" \",\" split \"-\" join"), vec![Value::String("a-b-c".to_string())]);
}

#[test]
fn sort_orders_mixed_numerics_by_value() {
    assert_eq!(
        eval_and_stack("[ 3.0 1 2 ] sort"),
        vec![Value::quote(vec![Value::Int(1), Value::Int(2), Value::Float(3.0)])]
    );
}

#[test]
fn coercion_chain_string_to_int_to_float() {
    assert_eq!(eval_and_stack("\"3\" to-int to-float"), vec![Value::Float(3.0)]);
}

#[test]
fn eq_cross_coerces_but_command_and_string_share_identity() {
    assert_eq!(eval_and_stack("\"dup\" \\dup to-cmd eq?"), vec![Value::Bool(true)]);
}

#[test]
fn undefined_word_is_an_error_and_does_not_poison_later_evaluation() {
    let mut machine = Machine::new(Box::new(StdHost::new(vec!["tally".to_string()])));
    built_ins::register_all(&mut machine);

    assert!(machine.eval_source("<test>", "this-word-does-not-exist").is_err());
    machine.eval_source("<test>", "1 2 +").unwrap();
    assert_eq!(machine.pop().unwrap(), Value::Int(3));
}
