use crate::add_native_word;
use crate::runtime::data_structures::value::Value;
use crate::runtime::error::{self, ErrorKind, ScriptError};
use crate::runtime::interpreter::machine::Machine;

fn wrong_type(message: impl Into<String>) -> ScriptError {
    ScriptError::new(ErrorKind::WrongType, message.into(), None)
}

fn division_by_zero() -> ScriptError {
    ScriptError::new(ErrorKind::DivisionByZero, "Division by zero.".to_string(), None)
}

/// Narrow a widened (`i128`) integer result back to `i64`, raising `IntegerOverflow`/
/// `IntegerUnderflow` if it doesn't fit (spec.md section 4.5, "Arithmetic"). Using `i128`
/// internally lets `+`/`-`/`*`/`/` detect over/underflow precisely in one place instead of each
/// reaching for `checked_add`/`checked_sub`/`checked_mul` and then having to guess which
/// direction a `None` came from.
fn narrow(wide: i128) -> error::Result<i64> {
    if wide > i64::MAX as i128 {
        Err(ScriptError::new(ErrorKind::IntegerOverflow, format!("{} overflows a 64-bit integer.", wide), None))
    } else if wide < i64::MIN as i128 {
        Err(ScriptError::new(
            ErrorKind::IntegerUnderflow,
            format!("{} underflows a 64-bit integer.", wide),
            None,
        ))
    } else {
        Ok(wide as i64)
    }
}

/// Apply `int_op` when both operands are `Int` (using `i128` to detect over/underflow exactly),
/// otherwise coerce both to `float` and apply `float_op` (spec.md: "If either is float, coerce
/// both to float").
fn numeric_binary(
    a: &Value,
    b: &Value,
    int_op: impl Fn(i128, i128) -> error::Result<i128>,
    float_op: impl Fn(f64, f64) -> f64,
) -> error::Result<Value> {
    if !a.is_numeric() || !b.is_numeric() {
        return Err(wrong_type(format!("{} and {} are not both numeric.", a, b)));
    }

    if let (Value::Int(x), Value::Int(y)) = (a, b) {
        let wide = int_op(*x as i128, *y as i128)?;
        Ok(Value::Int(narrow(wide)?))
    } else {
        Ok(Value::Float(float_op(a.into_float()?, b.into_float()?)))
    }
}

/// Floored modulo: the result's sign follows the divisor, e.g. `-7 % 3 == 2` (spec.md: "`%` uses
/// mathematical modulo (result sign follows divisor)"). Rust's native `%` instead follows the
/// dividend's sign, so it can't be used directly.
fn floored_mod(x: i128, y: i128) -> i128 {
    let r = x % y;
    if r != 0 && (r < 0) != (y < 0) {
        r + y
    } else {
        r
    }
}

/// `+ - * / % abs rand` (spec.md section 4.5, "Arithmetic").
pub fn register(machine: &mut Machine) {
    add_native_word!(
        machine,
        "+",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            Ok(vec![numeric_binary(&args[0], &args[1], |x, y| Ok(x + y), |x, y| x + y)?])
        }),
        "Add two numbers.",
        "a b -- a+b"
    );

    add_native_word!(
        machine,
        "-",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            Ok(vec![numeric_binary(&args[0], &args[1], |x, y| Ok(x - y), |x, y| x - y)?])
        }),
        "Subtract two numbers.",
        "a b -- a-b"
    );

    add_native_word!(
        machine,
        "*",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            Ok(vec![numeric_binary(&args[0], &args[1], |x, y| Ok(x * y), |x, y| x * y)?])
        }),
        "Multiply two numbers.",
        "a b -- a*b"
    );

    add_native_word!(
        machine,
        "/",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            Ok(vec![numeric_binary(
                &args[0],
                &args[1],
                |x, y| if y == 0 { Err(division_by_zero()) } else { Ok(x / y) },
                |x, y| x / y,
            )?])
        }),
        "Divide two numbers.",
        "a b -- a/b"
    );

    add_native_word!(
        machine,
        "%",
        |m: &mut Machine| m.with_rewind(2, |_, args| {
            let a = &args[0];
            let b = &args[1];

            if let (Value::Int(_), Value::Int(y)) = (a, b) {
                if *y == 0 {
                    return Err(division_by_zero());
                }
            } else if b.into_float()? == 0.0 {
                return Err(division_by_zero());
            }

            Ok(vec![numeric_binary(a, b, |x, y| Ok(floored_mod(x, y)), |x, y| x.rem_euclid(y).copysign(y))?])
        }),
        "Mathematical modulo; result sign follows the divisor.",
        "a b -- a%b"
    );

    add_native_word!(
        machine,
        "abs",
        |m: &mut Machine| m.with_rewind(1, |_, args| match &args[0] {
            Value::Int(value) => Ok(vec![Value::Int(narrow((*value as i128).abs())?)]),
            Value::Float(value) => Ok(vec![Value::Float(value.abs())]),
            other => Err(wrong_type(format!("{} is not numeric.", other))),
        }),
        "Absolute value.",
        "a -- |a|"
    );

    add_native_word!(
        machine,
        "rand",
        |m: &mut Machine| {
            m.push(Value::Int(rand::random::<i64>()));
            Ok(())
        },
        "A random 64-bit signed integer.",
        " -- i"
    );
}
