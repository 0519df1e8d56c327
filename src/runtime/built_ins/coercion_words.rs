use crate::add_native_word;
use crate::runtime::data_structures::value::Value;
use crate::runtime::interpreter::machine::Machine;

/// `to-bool to-int to-float to-string to-cmd to-def to-quote` (spec.md section 4.5, "Coercion"),
/// applying the rules of section 4.3.
pub fn register(machine: &mut Machine) {
    add_native_word!(
        machine,
        "to-bool",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![Value::Bool(args[0].into_bool())])),
        "Coerce to bool.",
        "a -- bool"
    );

    add_native_word!(
        machine,
        "to-int",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![Value::Int(args[0].into_int()?)])),
        "Coerce to int.",
        "a -- int"
    );

    add_native_word!(
        machine,
        "to-float",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![Value::Float(args[0].into_float()?)])),
        "Coerce to float.",
        "a -- float"
    );

    add_native_word!(
        machine,
        "to-string",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![Value::String(args[0].into_string()?)])),
        "Coerce to string.",
        "a -- string"
    );

    add_native_word!(
        machine,
        "to-cmd",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![Value::Command(args[0].into_string()?)])),
        "Coerce to a command reference sharing the same identifier text.",
        "a -- command"
    );

    add_native_word!(
        machine,
        "to-def",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![Value::Deferred(args[0].into_string()?)])),
        "Coerce to a deferred command sharing the same identifier text.",
        "a -- deferred_command"
    );

    add_native_word!(
        machine,
        "to-quote",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![Value::Quote(args[0].into_quote())])),
        "Coerce to a quote: quotes pass through, anything else becomes a singleton.",
        "a -- [a]"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::stdio::StdHost;

    fn machine() -> Machine {
        let mut m = Machine::new(Box::new(StdHost::new(vec!["tally".to_string()])));
        register(&mut m);
        m
    }

    #[test]
    fn to_int_truncates_floats() {
        let mut m = machine();
        m.eval_source("<t>", "3.9 to-int").unwrap();
        assert_eq!(m.pop().unwrap(), Value::Int(3));
    }

    #[test]
    fn to_quote_wraps_scalars_but_passes_quotes_through() {
        let mut m = machine();
        m.eval_source("<t>", "5 to-quote").unwrap();
        match m.pop().unwrap() {
            Value::Quote(values) => assert_eq!(values.as_ref(), &[Value::Int(5)]),
            other => panic!("expected a quote, got {:?}", other),
        }
    }

    #[test]
    fn to_cmd_and_to_def_share_identifier_text() {
        let mut m = machine();
        m.eval_source("<t>", "\"dup\" to-cmd").unwrap();
        assert_eq!(m.pop().unwrap(), Value::Command("dup".to_string()));

        m.eval_source("<t>", "\"dup\" to-def").unwrap();
        assert_eq!(m.pop().unwrap(), Value::Deferred("dup".to_string()));
    }
}
