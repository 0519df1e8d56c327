use crate::add_native_word;
use crate::runtime::data_structures::value::Value;
use crate::runtime::interpreter::machine::Machine;

/// `split join upcase downcase starts-with? ends-with? contains?` (spec.md section 4.5,
/// "Strings").
pub fn register(machine: &mut Machine) {
    add_native_word!(
        machine,
        "split",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            let text = args[0].into_string()?;
            let delim = args[1].into_string()?;

            let pieces: Vec<Value> = if delim.is_empty() {
                text.chars().map(|ch| Value::String(ch.to_string())).collect()
            } else {
                text.split(delim.as_str()).map(|piece| Value::String(piece.to_string())).collect()
            };

            Ok(vec![Value::quote(pieces)])
        }),
        "Split `s` on `delim`; an empty `delim` splits into one-character strings.",
        "s delim -- [substr...]"
    );

    add_native_word!(
        machine,
        "join",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            let pieces = args[0].into_quote();
            let delim = args[1].into_string()?;

            let mut rendered = Vec::with_capacity(pieces.len());
            for piece in pieces.iter() {
                rendered.push(piece.into_string()?);
            }

            Ok(vec![Value::String(rendered.join(&delim))])
        }),
        "Join a quote of strings with `delim` between them.",
        "[s...] delim -- s"
    );

    add_native_word!(
        machine,
        "upcase",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![Value::String(args[0].into_string()?.to_ascii_uppercase())])),
        "ASCII-uppercase a string.",
        "s -- s"
    );

    add_native_word!(
        machine,
        "downcase",
        |m: &mut Machine| m.with_rewind(1, |_, args| Ok(vec![Value::String(args[0].into_string()?.to_ascii_lowercase())])),
        "ASCII-lowercase a string.",
        "s -- s"
    );

    add_native_word!(
        machine,
        "starts-with?",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            let found = match &args[0] {
                Value::Quote(values) => values.first().is_some_and(|first| *first == args[1]),
                other => other.into_string()?.starts_with(&args[1].into_string()?),
            };
            Ok(vec![Value::Bool(found)])
        }),
        "Does `a` start with `b` (byte prefix for strings, element equality for quotes)?",
        "a b -- bool"
    );

    add_native_word!(
        machine,
        "ends-with?",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            let found = match &args[0] {
                Value::Quote(values) => values.last().is_some_and(|last| *last == args[1]),
                other => other.into_string()?.ends_with(&args[1].into_string()?),
            };
            Ok(vec![Value::Bool(found)])
        }),
        "Does `a` end with `b` (byte suffix for strings, element equality for quotes)?",
        "a b -- bool"
    );

    add_native_word!(
        machine,
        "contains?",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            let found = match &args[0] {
                Value::Quote(values) => values.iter().any(|element| *element == args[1]),
                other => other.into_string()?.contains(&args[1].into_string()?),
            };
            Ok(vec![Value::Bool(found)])
        }),
        "Does `a` contain `b` (byte search for strings, element search for quotes)?",
        "a b -- bool"
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
    fn split_on_delimiter() {
        let mut m = machine();
        m.eval_source("<t>", "\"a,b,c\" \",\" split").unwrap();
        match m.pop().unwrap() {
            Value::Quote(values) => assert_eq!(
                values.as_ref(),
                &[
                    Value::String("a".to_string()),
                    Value::String("b".to_string()),
                    Value::String("c".to_string())
                ]
            ),
            other => panic!("expected a quote, got {:?}", other),
        }
    }

    #[test]
    fn split_empty_delimiter_yields_characters() {
        let mut m = machine();
        m.eval_source("<t>", "\"ab\" \"\" split").unwrap();
        match m.pop().unwrap() {
            Value::Quote(values) => {
                assert_eq!(values.as_ref(), &[Value::String("a".to_string()), Value::String("b".to_string())])
            }
            other => panic!("expected a quote, got {:?}", other),
        }
    }

    #[test]
    fn join_reassembles_a_string() {
        let mut m = machine();
        m.eval_source("<t>", "[ \"a\" \"b\" \"c\" ] \"-\" join").unwrap();
        assert_eq!(m.pop().unwrap(), Value::String("a-b-c".to_string()));
    }

    #[test]
    fn casing_words_are_ascii_only() {
        let mut m = machine();
        m.eval_source("<t>", "\"Hi\" upcase").unwrap();
        assert_eq!(m.pop().unwrap(), Value::String("HI".to_string()));

        m.eval_source("<t>", "\"Hi\" downcase").unwrap();
        assert_eq!(m.pop().unwrap(), Value::String("hi".to_string()));
    }

    #[test]
    fn contains_searches_quote_elements() {
        let mut m = machine();
        m.eval_source("<t>", "[ 1 2 3 ] 2 contains?").unwrap();
        assert_eq!(m.pop().unwrap(), Value::Bool(true));
    }
}
