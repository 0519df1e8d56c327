use crate::add_native_word;
use crate::runtime::data_structures::value::Value;
use crate::runtime::error::{ErrorKind, ScriptError};
use crate::runtime::interpreter::machine::Machine;

fn empty_quote(word: &str) -> ScriptError {
    ScriptError::new(ErrorKind::StackUnderflow, format!("{} on an empty quote.", word), None)
}

/// `map filter any? len ... rev sort concat push pop enq deq` (spec.md section 4.5, "Quotes &
/// iteration").
pub fn register(machine: &mut Machine) {
    add_native_word!(
        machine,
        "map",
        |m: &mut Machine| m.with_rewind(2, |m, args| {
            let elements = args[0].into_quote();
            let action = args[1].clone();

            let mut output = Vec::new();
            for element in elements.iter() {
                let result = m.run_jailed_with_context(vec![element.clone()], action.clone())?;
                output.extend(result.into_quote().iter().cloned());
            }

            Ok(vec![Value::quote(output)])
        }),
        "Push each element, invoke `f` in a jail, and append the resulting context to the output.",
        "[a...] f -- [b...]"
    );

    add_native_word!(
        machine,
        "filter",
        |m: &mut Machine| m.with_rewind(2, |m, args| {
            let elements = args[0].into_quote();
            let action = args[1].clone();

            let mut output = Vec::new();
            for element in elements.iter() {
                let result = m.run_jailed_with_context(vec![element.clone()], action.clone())?;
                let kept = result.into_quote().last().is_some_and(Value::into_bool);
                if kept {
                    output.push(element.clone());
                }
            }

            Ok(vec![Value::quote(output)])
        }),
        "Keep elements whose jailed invocation's final top value coerces to true.",
        "[a...] f -- [a...]"
    );

    add_native_word!(
        machine,
        "any?",
        |m: &mut Machine| m.with_rewind(2, |m, args| {
            let elements = args[0].into_quote();
            let action = args[1].clone();

            for element in elements.iter() {
                let result = m.run_jailed_with_context(vec![element.clone()], action.clone())?;
                if result.into_quote().last().is_some_and(Value::into_bool) {
                    return Ok(vec![Value::Bool(true)]);
                }
            }

            Ok(vec![Value::Bool(false)])
        }),
        "Short-circuits true as soon as `f` accepts an element.",
        "[a...] f -- bool"
    );

    add_native_word!(
        machine,
        "len",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![Value::Int(args[0].len() as i64)])),
        "Byte length for strings, element count for quotes, 1 for scalars.",
        "a -- n"
    );

    add_native_word!(
        machine,
        "...",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(args[0].into_quote().as_ref().clone())),
        "Unpack a quote's elements onto the current context.",
        "[a...] -- a..."
    );

    add_native_word!(
        machine,
        "rev",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![match &args[0] {
            Value::Quote(values) => Value::quote(values.iter().rev().cloned().collect()),
            Value::String(text) => {
                let mut bytes = text.as_bytes().to_vec();
                bytes.reverse();
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            }
            other => other.clone(),
        }])),
        "Reverse string bytes or quote elements; scalars pass through.",
        "a -- a"
    );

    add_native_word!(
        machine,
        "sort",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![match &args[0] {
            Value::Quote(values) => {
                let mut sorted = values.as_ref().clone();
                sorted.sort();
                Value::quote(sorted)
            }
            other => other.clone(),
        }])),
        "Sort a quote by the total order; scalars pass through.",
        "a -- a"
    );

    add_native_word!(
        machine,
        "concat",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            let mut combined = args[0].into_quote().as_ref().clone();
            combined.extend(args[1].into_quote().as_ref().clone());
            Ok(vec![Value::quote(combined)])
        }),
        "Concatenate two quotes.",
        "[a...] [b...] -- [a... b...]"
    );

    add_native_word!(
        machine,
        "push",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            let mut values = args[0].into_quote().as_ref().clone();
            values.push(args[1].clone());
            Ok(vec![Value::quote(values)])
        }),
        "Append `v` to the back of a quote.",
        "[a...] v -- [a... v]"
    );

    add_native_word!(
        machine,
        "pop",
        |m: &mut Machine| m.with_rewind(1, |_, args| {
            let mut values = args[0].into_quote().as_ref().clone();
            let popped = values.pop().ok_or_else(|| empty_quote("pop"))?;
            Ok(vec![Value::quote(values), popped])
        }),
        "Remove and return the value at the back of a quote.",
        "[a...] -- [a...'] v"
    );

    add_native_word!(
        machine,
        "enq",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            let mut values = args[0].into_quote().as_ref().clone();
            values.push(args[1].clone());
            Ok(vec![Value::quote(values)])
        }),
        "Enqueue `v` onto the back of a quote.",
        "[a...] v -- [a... v]"
    );

    add_native_word!(
        machine,
        "deq",
        |m: &mut Machine| m.with_rewind(1, |_, args| {
            let mut values = args[0].into_quote().as_ref().clone();
            if values.is_empty() {
                return Err(empty_quote("deq"));
            }
            let front = values.remove(0);
            Ok(vec![Value::quote(values), front])
        }),
        "Dequeue the value at the front of a quote.",
        "[a...] -- [a...'] v"
    );
}
