//! Operator semantics shared by binary expressions and compound assignment.
//!
//! Promotion rule: if either numeric operand is a float the operation is done
//! in `f64`, otherwise in `i64` with two's‑complement wrapping.  Bitwise
//! operators accept ints only.

use crate::ast::{BinaryOp, UnaryOp};
use crate::error::{RuntimeErrorKind, ValueError};
use crate::value::Value;

/// A pair of numeric operands after promotion.
enum Numeric {
    Ints(i64, i64),
    Floats(f64, f64),
}

fn numeric(left: &Value, right: &Value) -> Result<Numeric, ValueError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Numeric::Ints(*a, *b)),
        (Value::Int(a), Value::Float(b)) => Ok(Numeric::Floats(*a as f64, *b)),
        (Value::Float(a), Value::Int(b)) => Ok(Numeric::Floats(*a, *b as f64)),
        (Value::Float(a), Value::Float(b)) => Ok(Numeric::Floats(*a, *b)),
        _ => Err(ValueError::type_error("Operands must be numbers.")),
    }
}

fn integers(left: &Value, right: &Value) -> Result<(i64, i64), ValueError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok((*a, *b)),
        _ => Err(ValueError::type_error("Operands must be integers.")),
    }
}

fn division_by_zero() -> ValueError {
    ValueError::new(RuntimeErrorKind::DivisionByZero, "Division by zero.")
}

pub fn unary(op: UnaryOp, operand: &Value) -> Result<Value, ValueError> {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOp::Negate, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (UnaryOp::Negate, Value::Float(n)) => Ok(Value::Float(-n)),
        (UnaryOp::Negate, _) => Err(ValueError::type_error("Operand must be a number.")),
        (UnaryOp::BitNot, Value::Int(n)) => Ok(Value::Int(!n)),
        (UnaryOp::BitNot, _) => Err(ValueError::type_error("Operand must be an integer.")),
    }
}

pub fn binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, ValueError> {
    match op {
        BinaryOp::Add => match (left, right) {
            (Value::Str(a), Value::Str(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(Value::string(joined))
            }
            (Value::Str(_), _) | (_, Value::Str(_)) => Err(ValueError::type_error(
                "Operands must be two numbers or two strings.",
            )),
            _ => match numeric(left, right)? {
                Numeric::Ints(a, b) => Ok(Value::Int(a.wrapping_add(b))),
                Numeric::Floats(a, b) => Ok(Value::Float(a + b)),
            },
        },

        BinaryOp::Subtract => match numeric(left, right)? {
            Numeric::Ints(a, b) => Ok(Value::Int(a.wrapping_sub(b))),
            Numeric::Floats(a, b) => Ok(Value::Float(a - b)),
        },

        BinaryOp::Multiply => match numeric(left, right)? {
            Numeric::Ints(a, b) => Ok(Value::Int(a.wrapping_mul(b))),
            Numeric::Floats(a, b) => Ok(Value::Float(a * b)),
        },

        BinaryOp::Divide => match numeric(left, right)? {
            Numeric::Ints(_, 0) => Err(division_by_zero()),
            Numeric::Floats(_, b) if b == 0.0 => Err(division_by_zero()),
            Numeric::Ints(a, b) => Ok(Value::Int(a.wrapping_div(b))),
            Numeric::Floats(a, b) => Ok(Value::Float(a / b)),
        },

        BinaryOp::Modulo => match numeric(left, right)? {
            Numeric::Ints(_, 0) => Err(division_by_zero()),
            Numeric::Floats(_, b) if b == 0.0 => Err(division_by_zero()),
            Numeric::Ints(a, b) => Ok(Value::Int(a.wrapping_rem(b))),
            Numeric::Floats(a, b) => Ok(Value::Float(a % b)),
        },

        BinaryOp::Power => match numeric(left, right)? {
            Numeric::Ints(a, b) if b < 0 => Ok(Value::Float((a as f64).powf(b as f64))),
            Numeric::Ints(a, b) => {
                let exponent = u32::try_from(b).unwrap_or(u32::MAX);
                Ok(Value::Int(a.wrapping_pow(exponent)))
            }
            Numeric::Floats(a, b) => Ok(Value::Float(a.powf(b))),
        },

        BinaryOp::Equal => Ok(Value::Bool(left == right)),
        BinaryOp::NotEqual => Ok(Value::Bool(left != right)),

        BinaryOp::Less => compare(left, right, |a, b| a < b, |a, b| a < b),
        BinaryOp::LessEqual => compare(left, right, |a, b| a <= b, |a, b| a <= b),
        BinaryOp::Greater => compare(left, right, |a, b| a > b, |a, b| a > b),
        BinaryOp::GreaterEqual => compare(left, right, |a, b| a >= b, |a, b| a >= b),

        BinaryOp::BitOr => integers(left, right).map(|(a, b)| Value::Int(a | b)),
        BinaryOp::BitXor => integers(left, right).map(|(a, b)| Value::Int(a ^ b)),
        BinaryOp::BitAnd => integers(left, right).map(|(a, b)| Value::Int(a & b)),
        BinaryOp::ShiftLeft => {
            integers(left, right).map(|(a, b)| Value::Int(a.wrapping_shl(b as u32)))
        }
        BinaryOp::ShiftRight => {
            integers(left, right).map(|(a, b)| Value::Int(a.wrapping_shr(b as u32)))
        }
    }
}

fn compare(
    left: &Value,
    right: &Value,
    ints: fn(i64, i64) -> bool,
    floats: fn(f64, f64) -> bool,
) -> Result<Value, ValueError> {
    Ok(Value::Bool(match numeric(left, right)? {
        Numeric::Ints(a, b) => ints(a, b),
        Numeric::Floats(a, b) => floats(a, b),
    }))
}
