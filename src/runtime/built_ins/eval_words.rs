use crate::add_native_word;
use crate::runtime::interpreter::machine::Machine;

/// Invoking actions (spec.md section 4.5, "Evaluation").
pub fn register(machine: &mut Machine) {
    add_native_word!(
        machine,
        "do!",
        |m: &mut Machine| m.with_rewind_all(1, |m, args| m.invoke_action(args[0].clone())),
        "Invoke `action` directly; definitions it makes persist.",
        "action -- ?"
    );

    add_native_word!(
        machine,
        "do",
        |m: &mut Machine| m.with_rewind_all(1, |m, args| m.run_jailed(args[0].clone())),
        "Invoke `action` in a dictionary jail; definitions it makes are discarded.",
        "action -- ?"
    );

    add_native_word!(
        machine,
        "do!?",
        |m: &mut Machine| m.with_rewind_all(2, |m, args| {
            let action = args[0].clone();
            if args[1].into_bool() {
                m.invoke_action(action)?;
            }
            Ok(())
        }),
        "Invoke `action` directly iff `cond` is truthy.",
        "action cond -- ?"
    );

    add_native_word!(
        machine,
        "do?",
        |m: &mut Machine| m.with_rewind_all(2, |m, args| {
            let action = args[0].clone();
            if args[1].into_bool() {
                m.run_jailed(action)?;
            }
            Ok(())
        }),
        "Invoke `action` in a jail iff `cond` is truthy.",
        "action cond -- ?"
    );

    add_native_word!(
        machine,
        "doin",
        |m: &mut Machine| m.with_rewind(2, |m, args| {
            let ctx = args[0].clone();
            let action = args[1].clone();
            let initial = ctx.into_quote().as_ref().clone();
            let result = m.run_jailed_with_context(initial, action)?;
            Ok(vec![result])
        }),
        "Run `action` in a jail seeded with `ctx`, collecting the result context as a quote.",
        "ctx action -- quote"
    );

    add_native_word!(
        machine,
        "loop",
        |m: &mut Machine| {
            let action = m.pop()?;

            while m.invoke_action(action.clone()).is_ok() {}

            Ok(())
        },
        "Repeat `action` until it fails; the terminating failure is suppressed.",
        "action -- "
    );

    add_native_word!(
        machine,
        "eval",
        |m: &mut Machine| m.with_rewind_all(1, |m, args| {
            let source = args[0].into_string()?;
            m.eval_source("<eval>", &source)
        }),
        "Tokenize and interpret `code` in the current machine.",
        "code -- ?"
    );
}
