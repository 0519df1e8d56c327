use crate::runtime::data_structures::contextual_data::ContextualData;
use crate::runtime::data_structures::value::Value;
use crate::runtime::error;
use crate::runtime::interpreter::machine::Machine;
use std::collections::HashMap;
use std::rc::Rc;

/// What running a dictionary entry actually does: either call straight into Rust, or interpret a
/// quote of values (the shape every `def!`/`:` binding produces, per spec.md section 4.5).
#[derive(Clone)]
pub enum Action {
    /// A command implemented directly in Rust (the standard vocabulary, section 4.5).
    Native(NativeFn),

    /// A command defined in terms of other commands, bound by `def!` or `:`.
    Quote(Rc<Vec<Value>>),
}

/// A native word's handler. `Rc` rather than a bare `fn` pointer so built-in registration can
/// close over configuration (e.g. the `inspire` pool) the way the teacher's native words close
/// over interpreter state, without needing nightly `Fn` traits.
pub type NativeFn = Rc<dyn Fn(&mut Machine) -> error::Result<()>>;

/// One dictionary record: spec.md section 2's `{ name, description, action }`, plus a stack-
/// effect signature shown by `usage`/the `defs` listing.
#[derive(Clone)]
pub struct DictEntry {
    pub description: String,
    pub signature: String,
    pub action: Action,
}

impl DictEntry {
    pub fn native(signature: impl Into<String>, description: impl Into<String>, handler: NativeFn) -> DictEntry {
        DictEntry {
            description: description.into(),
            signature: signature.into(),
            action: Action::Native(handler),
        }
    }

    pub fn quote(description: impl Into<String>, body: Rc<Vec<Value>>) -> DictEntry {
        DictEntry {
            description: description.into(),
            signature: String::new(),
            action: Action::Quote(body),
        }
    }
}

type SubDictionary = HashMap<String, DictEntry>;

/// The command dictionary (spec.md section 2, `defs`). Contextual so `do`/`map`/`filter` can
/// overlay a jail of definitions that's thrown away on return, while `do!` leaves definitions in
/// the enclosing context so they persist past the call.
///
/// Adapted from the teacher's `Dictionary` (`examples/davehorner-rsorth/src/runtime/data_structures/dictionary.rs`)
/// with the `WordRuntime`/`WordType`/`WordContext`/`handler_index` bookkeeping removed: this
/// interpreter has no immediate words and no separate compile pass, so a word is either a native
/// handler or a quote, nothing more.
pub struct Dictionary {
    stack: Vec<SubDictionary>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextualData for Dictionary {
    /// Push a fresh, empty overlay. Words inserted after this point vanish at the matching
    /// `release_context`.
    fn mark_context(&mut self) {
        self.stack.push(SubDictionary::new());
    }

    /// Pop the top overlay, discarding every word defined in it. Panics if called on the root
    /// context — a dictionary must always have at least one.
    fn release_context(&mut self) {
        if self.stack.len() <= 1 {
            panic!("Releasing the root dictionary context!");
        }

        let _ = self.stack.pop();
    }
}

impl Dictionary {
    /// A new dictionary with a single root context. The root is never released.
    pub fn new() -> Dictionary {
        Dictionary {
            stack: vec![SubDictionary::new()],
        }
    }

    /// Bind `name` in the current (top) context, shadowing any outer definition of the same name.
    pub fn insert(&mut self, name: String, entry: DictEntry) {
        self.top_mut().insert(name, entry);
    }

    /// Look up `name`, searching from the innermost context outward (`def?`/command dispatch).
    pub fn try_get(&self, name: &str) -> Option<&DictEntry> {
        self.stack.iter().rev().find_map(|context| context.get(name))
    }

    /// Is `name` bound anywhere visible (`def?`)?
    pub fn contains(&self, name: &str) -> bool {
        self.try_get(name).is_some()
    }

    /// Update the description of an already-bound word (`def-usage`). Returns `false` if `name`
    /// isn't bound in any visible context.
    pub fn set_usage(&mut self, name: &str, description: String) -> bool {
        for context in self.stack.iter_mut().rev() {
            if let Some(entry) = context.get_mut(name) {
                entry.description = description;
                return true;
            }
        }

        false
    }

    /// Every bound name, deduplicated across contexts and sorted lexicographically (`defs`).
    pub fn names(&self) -> Vec<String> {
        let mut merged: HashMap<&str, ()> = HashMap::new();

        for context in self.stack.iter() {
            for name in context.keys() {
                merged.insert(name.as_str(), ());
            }
        }

        let mut names: Vec<String> = merged.into_keys().map(str::to_string).collect();
        names.sort();
        names
    }

    fn top_mut(&mut self) -> &mut SubDictionary {
        let index = self.stack.len() - 1;
        &mut self.stack[index]
    }
}
