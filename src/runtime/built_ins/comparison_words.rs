use crate::add_native_word;
use crate::runtime::data_structures::value::Value;
use crate::runtime::interpreter::machine::Machine;
use std::cmp::Ordering;

/// `eq? gt? gte? lt? lte? and or not` (spec.md section 4.5, "Comparison & logic").
pub fn register(machine: &mut Machine) {
    add_native_word!(
        machine,
        "eq?",
        |m: &mut Machine| m.with_rewind(2, |_, args| Ok(vec![Value::Bool(args[0] == args[1])])),
        "Are `a` and `b` equal (spec.md section 3 total order)?",
        "a b -- bool"
    );

    add_native_word!(
        machine,
        "gt?",
        |m: &mut Machine| m.with_rewind(2, |_, args| Ok(vec![Value::Bool(args[0].cmp(&args[1]) == Ordering::Greater)])),
        "Is `a` greater than `b`?",
        "a b -- bool"
    );

    add_native_word!(
        machine,
        "gte?",
        |m: &mut Machine| m.with_rewind(2, |_, args| Ok(vec![Value::Bool(args[0].cmp(&args[1]) != Ordering::Less)])),
        "Is `a` greater than or equal to `b`?",
        "a b -- bool"
    );

    add_native_word!(
        machine,
        "lt?",
        |m: &mut Machine| m.with_rewind(2, |_, args| Ok(vec![Value::Bool(args[0].cmp(&args[1]) == Ordering::Less)])),
        "Is `a` less than `b`?",
        "a b -- bool"
    );

    add_native_word!(
        machine,
        "lte?",
        |m: &mut Machine| m.with_rewind(2, |_, args| Ok(vec![Value::Bool(args[0].cmp(&args[1]) != Ordering::Greater)])),
        "Is `a` less than or equal to `b`?",
        "a b -- bool"
    );

    add_native_word!(
        machine,
        "and",
        |m: &mut Machine| m.with_rewind(2, |_, args| Ok(vec![Value::Bool(args[0].into_bool() && args[1].into_bool())])),
        "Boolean and, after coercing both operands to bool.",
        "a b -- bool"
    );

    add_native_word!(
        machine,
        "or",
        |m: &mut Machine| m.with_rewind(2, |_, args| Ok(vec![Value::Bool(args[0].into_bool() || args[1].into_bool())])),
        "Boolean or, after coercing both operands to bool.",
        "a b -- bool"
    );

    add_native_word!(
        machine,
        "not",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![Value::Bool(!args[0].into_bool())])),
        "Boolean not, after coercing the operand to bool.",
        "a -- bool"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::stdio::StdHost;
    use test_case::test_case;

    fn machine() -> Machine {
        let mut m = Machine::new(Box::new(StdHost::new(vec!["tally".to_string()])));
        register(&mut m);
        m
    }

    fn eval_and_pop(program: &str) -> Value {
        let mut m = machine();
        m.eval_source("<t>", program).unwrap();
        m.pop().unwrap()
    }

    #[test_case("5 5.0 eq?", Value::Bool(true); "eq cross coerces int and float")]
    #[test_case("3 5 lt?", Value::Bool(true); "lt is true")]
    #[test_case("5 5 gte?", Value::Bool(true); "gte is true for equal values")]
    #[test_case("5 3 gt?", Value::Bool(true); "gt is true")]
    #[test_case("3 5 gt?", Value::Bool(false); "gt is false")]
    #[test_case("3 5 lte?", Value::Bool(true); "lte is true")]
    #[test_case("1 0 and", Value::Bool(false); "and coerces both operands")]
    #[test_case("0 \"x\" or", Value::Bool(true); "or coerces both operands")]
    #[test_case("false not", Value::Bool(true); "not coerces the operand")]
    fn comparison_table(program: &str, expected: Value) {
        assert_eq!(eval_and_pop(program), expected);
    }
}
