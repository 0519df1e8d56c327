use crate::add_native_word;
use crate::runtime::data_structures::value::Value;
use crate::runtime::interpreter::machine::Machine;

/// Stack discipline (spec.md section 4.5, "Stack discipline").
pub fn register(machine: &mut Machine) {
    add_native_word!(
        machine,
        "dup",
        |m: &mut Machine| {
            m.with_rewind(1, |_, args| Ok(vec![args[0].clone(), args[0].clone()]))
        },
        "Duplicate the top value.",
        "a -- a a"
    );

    add_native_word!(
        machine,
        "drop",
        |m: &mut Machine| m.with_rewind(1, |_, _| Ok(Vec::new())),
        "Discard the top value.",
        "a -- "
    );

    add_native_word!(
        machine,
        "swap",
        |m: &mut Machine| m.with_rewind(2, |_, args| Ok(vec![args[1].clone(), args[0].clone()])),
        "Swap the top two values.",
        "a b -- b a"
    );

    add_native_word!(
        machine,
        "rot",
        |m: &mut Machine| m.with_rewind(3, |_, args| Ok(vec![args[2].clone(), args[0].clone(), args[1].clone()])),
        "Rotate the third value to the top.",
        "a b c -- c a b"
    );

    add_native_word!(
        machine,
        ".s",
        |m: &mut Machine| {
            let rendered: Vec<String> = m.top_slice().iter().map(Value::to_string).collect();
            let line = format!("{}\n", rendered.join(" "));
            let _ = m.host_mut().write_err(line.as_bytes());
            Ok(())
        },
        "Print the current stack to the diagnostic stream.",
        " -- "
    );

    add_native_word!(
        machine,
        "quote",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![Value::quote(vec![args[0].clone()])])),
        "Wrap the top value in a single-element quote.",
        "a -- [a]"
    );

    add_native_word!(
        machine,
        "quote-all",
        |m: &mut Machine| {
            let values = m.clear_top();
            m.push(Value::quote(values));
            Ok(())
        },
        "Wrap the entire current stack into a single quote.",
        "... -- [...]"
    );

    add_native_word!(
        machine,
        "anything?",
        |m: &mut Machine| {
            let nonempty = m.top_len() > 0;
            m.push(Value::Bool(nonempty));
            Ok(())
        },
        "True iff the current stack is nonempty.",
        " -- bool"
    );
}
