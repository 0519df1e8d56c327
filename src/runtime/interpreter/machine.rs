use crate::host::Host;
use crate::lang::source_buffer::SourceLocation;
use crate::lang::tokenizing::Token;
use crate::runtime::data_structures::contextual_data::ContextualData;
use crate::runtime::data_structures::dictionary::{Action, DictEntry, Dictionary, NativeFn};
use crate::runtime::data_structures::value::Value;
use crate::runtime::error::{self, ErrorKind, ScriptError};

/// The evaluation engine: a context stack of working stacks (`nest`), a word dictionary, and a
/// handle to the host. Everything in spec.md sections 3-4 is a method on this type.
///
/// Grounded on the shape of the teacher's `SorthInterpreter`/`InterpreterStack`
/// (`examples/davehorner-rsorth/src/runtime/interpreter/{mod.rs,sorth_interpreter.rs}`) — the
/// `pop_as_*` naming, native-word-as-closure registration — generalized from bytecode execution to
/// direct token/value-tree walking, since this interpreter has no compile pass (spec.md section
/// 4.2/4.4).
pub struct Machine {
    /// A LIFO of working stacks (spec.md section 3, "Machine state"). `nest[0]` is the root
    /// context; `nest.len()` is never zero. `[` pushes a fresh context; `]` pops one and
    /// materializes it as a `Quote` value on the new top.
    nest: Vec<Vec<Value>>,

    dictionary: Dictionary,
    host: Box<dyn Host>,
}

impl Machine {
    pub fn new(host: Box<dyn Host>) -> Machine {
        Machine {
            nest: vec![Vec::new()],
            dictionary: Dictionary::new(),
            host,
        }
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> &mut dyn Host {
        self.host.as_mut()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    /// Register a native word. Convenience wrapper over `dictionary.insert` used throughout
    /// `runtime::built_ins`.
    pub fn add_native(
        &mut self,
        name: impl Into<String>,
        signature: impl Into<String>,
        description: impl Into<String>,
        handler: NativeFn,
    ) {
        self.dictionary
            .insert(name.into(), DictEntry::native(signature, description, handler));
    }

    fn top(&self) -> &Vec<Value> {
        self.nest.last().expect("the context stack is never empty")
    }

    fn top_mut(&mut self) -> &mut Vec<Value> {
        self.nest.last_mut().expect("the context stack is never empty")
    }

    /// The current top context, for `.s`, `anything?`, `quote-all`.
    pub fn top_slice(&self) -> &[Value] {
        self.top()
    }

    pub fn top_len(&self) -> usize {
        self.top().len()
    }

    /// Empty the top context, returning what it held. Used by `quote-all`.
    pub fn clear_top(&mut self) -> Vec<Value> {
        std::mem::take(self.top_mut())
    }

    pub fn push(&mut self, value: Value) {
        self.top_mut().push(value);
    }

    pub fn pop(&mut self) -> error::Result<Value> {
        self.top_mut()
            .pop()
            .ok_or_else(|| ScriptError::new(ErrorKind::StackUnderflow, "Popped from an empty stack.".to_string(), None))
    }

    /// Pop exactly `n` values off the top context, in their original order, or fail leaving the
    /// stack untouched (no partial pop) if fewer than `n` are present.
    pub fn pop_n(&mut self, n: usize) -> error::Result<Vec<Value>> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let available = self.top().len();

        if available < n {
            return Err(ScriptError::new(
                ErrorKind::StackUnderflow,
                format!("Expected {} value(s) on the stack, found {}.", n, available),
                None,
            ));
        }

        let split_at = available - n;
        Ok(self.top_mut().split_off(split_at))
    }

    /// Push previously-popped values back in their original order.
    pub fn restore(&mut self, mut values: Vec<Value>) {
        self.top_mut().append(&mut values);
    }

    /// Replace the entire top context wholesale. Used to rewind `do!`/`do`/`do?`/`do!?`, whose
    /// body can push arbitrarily many values onto the caller's own context before failing, which
    /// `with_rewind`'s pop-n-then-restore-n can't undo.
    fn replace_top(&mut self, values: Vec<Value>) {
        *self.top_mut() = values;
    }

    /// Pop `n` values and hand them to `body`, which invokes an action directly against this same
    /// context (not a fresh jailed one). Because the action can push an unbounded number of
    /// values before failing, rewinding means snapshotting the whole top context up front and
    /// replacing it wholesale on error, rather than just restoring the `n` popped arguments (spec.md
    /// section 4.2, section 8 property 1).
    pub fn with_rewind_all<F>(&mut self, n: usize, body: F) -> error::Result<()>
    where
        F: FnOnce(&mut Machine, &[Value]) -> error::Result<()>,
    {
        let snapshot = self.top_slice().to_vec();
        let args = self.pop_n(n)?;

        match body(self, &args) {
            Ok(()) => Ok(()),
            Err(error) => {
                self.replace_top(snapshot);
                Err(error)
            }
        }
    }

    /// Pop `n` values and hand them to `body`. On success, push whatever `body` returns; on
    /// failure, restore the popped values before propagating the error. This is the rewind
    /// discipline (spec.md section 4.2, section 8 property 1) applied uniformly, so individual
    /// built-ins don't each have to reimplement push-back-on-error.
    pub fn with_rewind<F>(&mut self, n: usize, body: F) -> error::Result<()>
    where
        F: FnOnce(&mut Machine, &[Value]) -> error::Result<Vec<Value>>,
    {
        let args = self.pop_n(n)?;

        match body(self, &args) {
            Ok(results) => {
                for value in results {
                    self.push(value);
                }
                Ok(())
            }
            Err(error) => {
                self.restore(args);
                Err(error)
            }
        }
    }

    /// `handleVal` (spec.md section 4.2): a `Command` is resolved and executed; anything else is
    /// pushed as-is.
    pub fn handle_val(&mut self, value: Value) -> error::Result<()> {
        match value {
            Value::Command(name) => self.execute_command(&name),
            other => {
                self.push(other);
                Ok(())
            }
        }
    }

    /// Look `name` up and run it: a native word is called directly, a quote action is
    /// interpreted element by element (each element visits `handle_val`, so nested commands
    /// execute and nested quotes stay data).
    pub fn execute_command(&mut self, name: &str) -> error::Result<()> {
        let action = match self.dictionary.try_get(name) {
            Some(entry) => entry.action.clone(),
            None => {
                return Err(ScriptError::new(
                    ErrorKind::CommandUndefined,
                    format!("Unknown word: {}", name),
                    None,
                ))
            }
        };

        match action {
            Action::Native(handler) => handler(self),
            Action::Quote(body) => {
                for value in body.iter() {
                    self.handle_val(value.clone())?;
                }
                Ok(())
            }
        }
    }

    /// The `do!`/`do` action rule: a command, string, or deferred command is invoked by name; a
    /// quote is interpreted element by element.
    pub fn invoke_action(&mut self, action: Value) -> error::Result<()> {
        match action {
            Value::Command(name) | Value::Deferred(name) | Value::String(name) => self.execute_command(&name),
            Value::Quote(body) => {
                for value in body.iter() {
                    self.handle_val(value.clone())?;
                }
                Ok(())
            }
            other => Err(ScriptError::new(
                ErrorKind::WrongType,
                format!("{} is not something `do` can invoke.", other),
                None,
            )),
        }
    }

    /// `do`: run `action` inside a dictionary jail. Definitions it makes are discarded when it
    /// returns, whether or not it succeeded (spec.md section 4.4, "Child-jail").
    pub fn run_jailed(&mut self, action: Value) -> error::Result<()> {
        self.dictionary.mark_context();
        let result = self.invoke_action(action);
        self.dictionary.release_context();
        result
    }

    /// `doin`: open a fresh working context seeded with `initial`, run `action` inside a
    /// dictionary jail, then collapse that context into a single quote value handed back to the
    /// caller.
    pub fn run_jailed_with_context(&mut self, initial: Vec<Value>, action: Value) -> error::Result<Value> {
        self.nest.push(initial);
        self.dictionary.mark_context();

        let result = self.invoke_action(action);

        self.dictionary.release_context();
        let context = self.nest.pop().expect("pushed immediately above");

        result.map(|_| Value::quote(context))
    }

    /// Tokenize and evaluate source text against this machine (`eval`, and the top-level driver).
    pub fn eval_source(&mut self, path: &str, source: &str) -> error::Result<()> {
        let tokens = crate::lang::tokenizing::tokenize(path, source)?;
        self.eval_tokens(&tokens)
    }

    pub fn eval_tokens(&mut self, tokens: &[Token]) -> error::Result<()> {
        for token in tokens {
            self.dispatch_token(token)?;
        }

        Ok(())
    }

    /// For each token: brackets open/close a quote-literal context; literal tokens and deferred
    /// terms always just push a value; a bare term executes immediately at the root context
    /// (nesting depth 0) but is captured as a `Command` value while a quote literal is being
    /// built (nesting depth > 0) — otherwise `[ 2 * ]` would try to run `*` against an empty
    /// stack the moment it was parsed, instead of becoming the two-element quote that `map`
    /// later interprets one element at a time.
    fn dispatch_token(&mut self, token: &Token) -> error::Result<()> {
        match token {
            Token::LeftBracket(_) => {
                self.nest.push(Vec::new());
                Ok(())
            }

            Token::RightBracket(location) => {
                if self.nest.len() <= 1 {
                    return Err(ScriptError::new(
                        ErrorKind::ContextStackUnderflow,
                        "Unmatched ']'.".to_string(),
                        Some(location.clone()),
                    ));
                }

                let quoted = self.nest.pop().expect("checked above");
                self.push(Value::quote(quoted));
                Ok(())
            }

            Token::Bool(_, value) => {
                self.push(Value::Bool(*value));
                Ok(())
            }

            Token::Int(_, value) => {
                self.push(Value::Int(*value));
                Ok(())
            }

            Token::Float(_, value) => {
                self.push(Value::Float(*value));
                Ok(())
            }

            Token::String(_, value) => {
                self.push(Value::String(value.clone()));
                Ok(())
            }

            Token::DeferredWord(_, name) => {
                self.push(Value::Deferred(name.clone()));
                Ok(())
            }

            Token::Word(location, name) => {
                if self.nest.len() == 1 {
                    self.execute_command(name).map_err(|error| attach_location(error, location))
                } else {
                    self.push(Value::Command(name.clone()));
                    Ok(())
                }
            }

            Token::End => Ok(()),
        }
    }
}

/// Tag an error with `location` if it doesn't already carry one (errors raised deep inside a
/// native word don't know where the offending token was; the dispatch loop does).
fn attach_location(error: ScriptError, location: &SourceLocation) -> ScriptError {
    if error.location().is_some() {
        return error;
    }

    ScriptError::new(error.kind(), error.message().to_string(), Some(location.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::stdio::StdHost;

    fn machine() -> Machine {
        Machine::new(Box::new(StdHost::new(vec!["tally".to_string()])))
    }

    #[test]
    fn literal_tokens_push_onto_root() {
        let mut machine = machine();
        machine.eval_source("<test>", "1 2 true \"hi\"").unwrap();
        assert_eq!(machine.top_len(), 4);
    }

    #[test]
    fn bracketed_terms_are_captured_not_executed() {
        let mut machine = machine();
        machine.eval_source("<test>", "[ 2 * ]").unwrap();
        assert_eq!(machine.top_len(), 1);

        match machine.pop().unwrap() {
            Value::Quote(values) => {
                assert_eq!(values.len(), 2);
                assert!(matches!(values[0], Value::Int(2)));
                assert!(matches!(&values[1], Value::Command(name) if name == "*"));
            }
            other => panic!("expected a quote, got {:?}", other),
        }
    }

    #[test]
    fn unmatched_right_bracket_is_context_stack_underflow() {
        let mut machine = machine();
        let error = machine.eval_source("<test>", "]").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ContextStackUnderflow);
    }

    #[test]
    fn undefined_command_errors_without_popping_anything() {
        let mut machine = machine();
        machine.push(Value::Int(1));
        let error = machine.eval_source("<test>", "nonexistent-word").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::CommandUndefined);
        assert_eq!(machine.top_len(), 1);
    }

    #[test]
    fn with_rewind_restores_on_failure() {
        let mut machine = machine();
        machine.push(Value::Int(1));
        machine.push(Value::Int(2));

        let result = machine.with_rewind(2, |_, _| {
            Err(ScriptError::new(ErrorKind::WrongType, "boom".to_string(), None))
        });

        assert!(result.is_err());
        assert_eq!(machine.top_len(), 2);
        assert_eq!(machine.pop().unwrap(), Value::Int(2));
        assert_eq!(machine.pop().unwrap(), Value::Int(1));
    }

    #[test]
    fn jailed_definitions_do_not_escape() {
        let mut machine = machine();
        machine.add_native(
            "def-temp",
            "( -- )",
            "defines a throwaway word",
            std::rc::Rc::new(|m: &mut Machine| {
                m.dictionary_mut()
                    .insert("temp".to_string(), DictEntry::quote("", std::rc::Rc::new(vec![Value::Int(1)])));
                Ok(())
            }),
        );

        machine.run_jailed(Value::Command("def-temp".to_string())).unwrap();
        assert!(!machine.dictionary().contains("temp"));
    }
}
