use crate::add_native_word;
use crate::runtime::data_structures::dictionary::DictEntry;
use crate::runtime::data_structures::value::Value;
use crate::runtime::error::{self, ErrorKind, ScriptError};
use crate::runtime::interpreter::machine::Machine;
use std::rc::Rc;

/// A dictionary name may be spelled as a string, a command reference, or a deferred command
/// (spec.md section 4.5, "Dictionary"). Anything else is a type error.
fn binding_name(value: &Value) -> error::Result<String> {
    match value {
        Value::String(name) | Value::Command(name) | Value::Deferred(name) => Ok(name.clone()),
        other => Err(ScriptError::new(
            ErrorKind::WrongType,
            format!("{} is not a valid binding name (need a string, command, or deferred command).", other),
            None,
        )),
    }
}

/// Binding names to actions (spec.md section 4.5, "Dictionary").
pub fn register(machine: &mut Machine) {
    // `def!` mutates the dictionary directly rather than pushing a result, so it uses explicit
    // manual rewind instead of the `with_rewind` helper (which only knows how to push values back).
    add_native_word!(
        machine,
        "def!",
        |m: &mut Machine| {
            let args = m.pop_n(2)?;
            let action = args[0].clone();
            let name_value = args[1].clone();

            match binding_name(&name_value) {
                Ok(name) => {
                    m.dictionary_mut()
                        .insert(name, DictEntry::quote(String::new(), action.into_quote()));
                    Ok(())
                }
                Err(error) => {
                    m.restore(args);
                    Err(error)
                }
            }
        },
        "Bind `name` to a quote action.",
        "action name -- "
    );

    add_native_word!(
        machine,
        "def?",
        |m: &mut Machine| {
            m.with_rewind(1, |m, args| {
                let name = binding_name(&args[0])?;
                Ok(vec![Value::Bool(m.dictionary().contains(&name))])
            })
        },
        "Is `name` bound?",
        "name -- bool"
    );

    add_native_word!(
        machine,
        "defs",
        |m: &mut Machine| {
            let names = m.dictionary().names().into_iter().map(Value::String).collect();
            m.push(Value::quote(names));
            Ok(())
        },
        "A sorted quote of every bound name.",
        " -- [name...]"
    );

    add_native_word!(
        machine,
        "usage",
        |m: &mut Machine| {
            m.with_rewind(1, |m, args| {
                let name = binding_name(&args[0])?;

                match m.dictionary().try_get(&name) {
                    Some(entry) => Ok(vec![Value::String(entry.description.clone())]),
                    None => Err(ScriptError::new(
                        ErrorKind::CommandUndefined,
                        format!("Unknown word: {}", name),
                        None,
                    )),
                }
            })
        },
        "The description of `name`.",
        "name -- description"
    );

    add_native_word!(
        machine,
        "def-usage",
        |m: &mut Machine| {
            m.with_rewind(2, |m, args| {
                let name = binding_name(&args[0])?;
                let description = args[1].into_string()?;

                if m.dictionary_mut().set_usage(&name, description) {
                    Ok(Vec::new())
                } else {
                    Err(ScriptError::new(
                        ErrorKind::CommandUndefined,
                        format!("Unknown word: {}", name),
                        None,
                    ))
                }
            })
        },
        "Set the description of `name`.",
        "name desc -- "
    );

    add_native_word!(machine, ":", word_colon, "Define a name (single- or multi-term form).", "val name -- ");
}

/// `:` has two forms distinguished by the shape of the top value (spec.md section 4.5):
///
/// - Single-term: `( val name -- )` — `name` is a scalar (string/command/deferred); `val` becomes
///   the singleton-quote action bound to it.
/// - Multi-term: `( v1 … vk [n1 … nk] -- )` — the top is a quote of `k` names; pop `k` more values
///   and bind each `vi` to `ni` in order. A short stack must rewind everything, including the
///   name quote that was already popped to discover `k`.
fn word_colon(machine: &mut Machine) -> error::Result<()> {
    let top = machine.pop()?;

    match top {
        Value::Quote(names) => {
            let count = names.len();

            match machine.pop_n(count) {
                Ok(values) => {
                    for (name_value, value) in names.iter().zip(values.iter()) {
                        match binding_name(name_value) {
                            Ok(name) => machine
                                .dictionary_mut()
                                .insert(name, DictEntry::quote(String::new(), Rc::new(vec![value.clone()]))),
                            Err(error) => {
                                machine.restore(values);
                                machine.push(Value::Quote(names));
                                return Err(error);
                            }
                        }
                    }

                    Ok(())
                }
                Err(error) => {
                    machine.push(Value::Quote(names));
                    Err(error)
                }
            }
        }

        name_value => match machine.pop() {
            Ok(value) => match binding_name(&name_value) {
                Ok(name) => {
                    machine
                        .dictionary_mut()
                        .insert(name, DictEntry::quote(String::new(), Rc::new(vec![value])));
                    Ok(())
                }
                Err(error) => {
                    machine.push(value);
                    machine.push(name_value);
                    Err(error)
                }
            },
            Err(error) => {
                machine.push(name_value);
                Err(error)
            }
        },
    }
}
