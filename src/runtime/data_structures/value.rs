use crate::runtime::error::{self, ErrorKind, ScriptError};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

/// The closed set of tagged values the interpreter's stack can hold (spec.md section 3).
///
/// `Quote` shares its backing `Vec` through an `Rc` rather than mutating it in place (unlike the
/// teacher's `Rc<RefCell<ValueVec>>`): every operation that would need to change a quote's
/// contents (`push`, `concat`, `sort`, `map`, ...) builds a fresh `Vec`/`Rc` instead, so a
/// `dup`'d quote behaves as an independently owned copy even though the clone is O(1).
#[derive(Clone, Debug)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),

    /// An identifier that evaluation looks up and executes immediately.
    Command(String),

    /// An identifier pushed as data; execution happens only when a consumer like `do!` demands
    /// it.
    Deferred(String),

    Quote(Rc<Vec<Value>>),
}

impl Value {
    pub fn quote(values: Vec<Value>) -> Value {
        Value::Quote(Rc::new(values))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Value::Command(_))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Value::Deferred(_))
    }

    pub fn is_quote(&self) -> bool {
        matches!(self, Value::Quote(_))
    }

    /// Is this a `String` or a `Command`? These two variants are a single bucket for both
    /// equality and ordering purposes (spec.md section 3: "string↔command identity comparison by
    /// identifier bytes").
    fn is_textual(&self) -> bool {
        matches!(self, Value::String(_) | Value::Command(_))
    }

    fn text(&self) -> &str {
        match self {
            Value::String(s) | Value::Command(s) | Value::Deferred(s) => s,
            _ => unreachable!("text() called on a non-textual value"),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) | Value::Float(_) => 1,
            Value::String(_) | Value::Command(_) => 2,
            Value::Deferred(_) => 3,
            Value::Quote(_) => 4,
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Value::Int(v) => *v as f64,
            Value::Float(v) => *v,
            _ => unreachable!("as_f64() called on a non-numeric value"),
        }
    }

    fn numeric_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }

    fn quote_cmp(a: &[Value], b: &[Value]) -> Ordering {
        for (x, y) in a.iter().zip(b.iter()) {
            match x.cmp(y) {
                Ordering::Equal => continue,
                other => return other,
            }
        }

        a.len().cmp(&b.len())
    }
}

/// A total order across every `Value`, ascending by tag as spec.md section 3 lays out: `bool <
/// (int, float) < (string, command) < deferred_command < quote`. Numbers are one bucket compared
/// by magnitude (`int` vs `int` exactly, anything involving a `float` via `f64::total_cmp` so
/// `NaN` still participates in a total order); strings and commands are one bucket compared by
/// identifier bytes, matching `eq?`'s cross-type identity rule. Building `Ord` this way (instead
/// of deriving `PartialOrd` the way the teacher's `Value` does) is what lets `eq?`, `lt?`, and
/// `gt?` stay mutually exclusive for every pair of values (spec.md section 8, property 3).
impl Ord for Value {
    fn cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            _ if self.is_numeric() && other.is_numeric() => self.numeric_cmp(other),
            _ if self.is_textual() && other.is_textual() => self.text().cmp(other.text()),
            (Value::Deferred(a), Value::Deferred(b)) => a.cmp(b),
            (Value::Quote(a), Value::Quote(b)) => Value::quote_cmp(a, b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

/// Pretty-print a value the way `.s` and error messages show it: strings are quoted, deferred
/// commands keep their `\` prefix, quotes print bracketed and space-separated. This differs from
/// `into_string` (the `to-string` coercion), which returns raw, unquoted text.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{}", value),
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", format_float(*value)),
            Value::String(value) => write!(f, "{}", stringify(value)),
            Value::Command(name) => write!(f, "{}", name),
            Value::Deferred(name) => write!(f, "\\{}", name),
            Value::Quote(values) => {
                write!(f, "[ ")?;
                for value in values.iter() {
                    write!(f, "{} ", value)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Format a float so that an integral value still round-trips as a float literal through the
/// tokenizer (which classifies on the presence of a `.`). Plain `{}` formatting of `3.0_f64`
/// prints `3`, which would read back in as an `Int`.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Wrap text in double quotes, escaping the characters that would otherwise break re-reading it
/// as a string literal.
fn stringify(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 2);
    result.push('"');

    for ch in text.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            _ => result.push(ch),
        }
    }

    result.push('"');
    result
}

fn wrong_type<T>(message: impl Into<String>) -> error::Result<T> {
    Err(ScriptError::new(ErrorKind::WrongType, message.into(), None))
}

/// The `to-*` coercion family (spec.md section 4.3). These are free functions rather than
/// methods so that built-in words can call them uniformly regardless of which concrete variant
/// they're coercing from.
impl Value {
    /// `intoBool`: never fails.
    pub fn into_bool(&self) -> bool {
        match self {
            Value::Bool(value) => *value,
            Value::Int(value) => *value != 0,
            Value::Float(value) => *value != 0.0,
            Value::String(value) => !value.is_empty(),
            Value::Quote(values) => !values.is_empty(),
            Value::Command(_) | Value::Deferred(_) => true,
        }
    }

    /// `intoInt`: fails on a non-finite or out-of-range float, an unparseable string, or a
    /// quote/command/deferred value.
    pub fn into_int(&self) -> error::Result<i64> {
        match self {
            Value::Bool(value) => Ok(if *value { 1 } else { 0 }),
            Value::Int(value) => Ok(*value),
            Value::Float(value) => {
                if !value.is_finite() || *value < i64::MIN as f64 || *value > i64::MAX as f64 {
                    wrong_type(format!("Float {} can not be converted to an int.", value))
                } else {
                    Ok(*value as i64)
                }
            }
            Value::String(value) => value.parse::<i64>().map_err(|_| {
                ScriptError::new(
                    ErrorKind::WrongType,
                    format!("String {:?} is not a valid int.", value),
                    None,
                )
            }),
            Value::Command(_) | Value::Deferred(_) | Value::Quote(_) => {
                wrong_type(format!("{} can not be converted to an int.", self))
            }
        }
    }

    /// `intoFloat`: fails only for non-numeric, non-string, non-bool values, or unparseable
    /// strings.
    pub fn into_float(&self) -> error::Result<f64> {
        match self {
            Value::Bool(value) => Ok(if *value { 1.0 } else { 0.0 }),
            Value::Int(value) => Ok(*value as f64),
            Value::Float(value) => Ok(*value),
            Value::String(value) => value.parse::<f64>().map_err(|_| {
                ScriptError::new(
                    ErrorKind::WrongType,
                    format!("String {:?} is not a valid float.", value),
                    None,
                )
            }),
            Value::Command(_) | Value::Deferred(_) | Value::Quote(_) => {
                wrong_type(format!("{} can not be converted to a float.", self))
            }
        }
    }

    /// `intoString`: raw, unquoted text. Fails for quotes.
    pub fn into_string(&self) -> error::Result<String> {
        match self {
            Value::String(value) => Ok(value.clone()),
            Value::Command(name) | Value::Deferred(name) => Ok(name.clone()),
            Value::Bool(value) => Ok(value.to_string()),
            Value::Int(value) => Ok(value.to_string()),
            Value::Float(value) => Ok(format_float(*value)),
            Value::Quote(_) => wrong_type("A quote can not be converted to a string."),
        }
    }

    /// `intoQuote`: a quote passes through (cheap `Rc` clone); anything else becomes a singleton
    /// quote. Never fails.
    pub fn into_quote(&self) -> Rc<Vec<Value>> {
        match self {
            Value::Quote(values) => values.clone(),
            other => Rc::new(vec![other.clone()]),
        }
    }

    /// The length used by the `len` word: byte length for strings, element count for quotes, 1
    /// for every other (scalar) value.
    pub fn len(&self) -> usize {
        match self {
            Value::String(value) => value.len(),
            Value::Quote(values) => values.len(),
            _ => 1,
        }
    }
}
