//! Native functions bound in the global scope, and the list built‑in.

use std::rc::Rc;

use log::{debug, info};

use crate::callable::{Callable, NativeFn, NativeFunction};
use crate::environment::Environment;
use crate::error::{RuntimeErrorKind, ValueError};
use crate::interpreter::Interpreter;
use crate::value::{ListRef, Value};

const NATIVES: &[(&str, usize, NativeFn)] = &[
    ("print", 1, print),
    ("clock", 0, clock),
    ("readline", 1, readline),
    ("int", 1, to_int),
    ("float", 1, to_float),
    ("str", 1, to_str),
    ("type", 1, type_of),
    ("list", 0, new_list),
];

/// Define every native function in `globals`.
pub fn install(globals: &mut Environment) {
    for &(name, arity, func) in NATIVES {
        debug!("Defining native function '{}'", name);

        globals.define(
            name,
            Value::Callable(Callable::Native(Rc::new(NativeFunction {
                name,
                arity,
                func,
            }))),
        );
    }

    info!("Installed {} native functions", NATIVES.len());
}

fn io_error(e: std::io::Error) -> ValueError {
    ValueError::new(RuntimeErrorKind::Io, e.to_string())
}

fn print(interpreter: &mut Interpreter, args: &[Value]) -> Result<Value, ValueError> {
    interpreter
        .write_output(&format!("{}\n", args[0]))
        .map_err(io_error)?;

    Ok(Value::Nil)
}

/// Wall‑clock time in seconds since the Unix epoch.
fn clock(_: &mut Interpreter, _: &[Value]) -> Result<Value, ValueError> {
    let micros = chrono::Utc::now().timestamp_micros();
    Ok(Value::Float(micros as f64 / 1_000_000.0))
}

/// Prints the prompt, then returns one line without its terminator, or
/// `nil` once the input is exhausted.
fn readline(interpreter: &mut Interpreter, args: &[Value]) -> Result<Value, ValueError> {
    interpreter
        .write_output(&args[0].to_string())
        .map_err(io_error)?;

    match interpreter.read_line().map_err(io_error)? {
        Some(line) => Ok(Value::string(line)),
        None => Ok(Value::Nil),
    }
}

fn to_int(_: &mut Interpreter, args: &[Value]) -> Result<Value, ValueError> {
    let failed = || ValueError::new(RuntimeErrorKind::Conversion, "Can not convert argument to integer.");

    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(n) if n.is_finite() => Ok(Value::Int(n.trunc() as i64)),
        Value::Str(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| failed()),
        _ => Err(failed()),
    }
}

fn to_float(_: &mut Interpreter, args: &[Value]) -> Result<Value, ValueError> {
    let failed = || ValueError::new(RuntimeErrorKind::Conversion, "Can not convert argument to float.");

    match &args[0] {
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::Float(n) => Ok(Value::Float(*n)),
        Value::Str(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| failed()),
        _ => Err(failed()),
    }
}

fn to_str(_: &mut Interpreter, args: &[Value]) -> Result<Value, ValueError> {
    Ok(Value::string(args[0].to_string()))
}

fn type_of(_: &mut Interpreter, args: &[Value]) -> Result<Value, ValueError> {
    Ok(Value::string(args[0].type_name()))
}

fn new_list(_: &mut Interpreter, _: &[Value]) -> Result<Value, ValueError> {
    Ok(Value::list(Vec::new()))
}

// ──────────────────────────────── lists ───────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMethod {
    Push,
    Pop,
    Clear,
    Len,
    GetAt,
    SetAt,
    Slice,
}

impl ListMethod {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "push" => Some(ListMethod::Push),
            "pop" => Some(ListMethod::Pop),
            "clear" => Some(ListMethod::Clear),
            "len" => Some(ListMethod::Len),
            "get_at" => Some(ListMethod::GetAt),
            "set_at" => Some(ListMethod::SetAt),
            "slice" => Some(ListMethod::Slice),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ListMethod::Push => "push",
            ListMethod::Pop => "pop",
            ListMethod::Clear => "clear",
            ListMethod::Len => "len",
            ListMethod::GetAt => "get_at",
            ListMethod::SetAt => "set_at",
            ListMethod::Slice => "slice",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            ListMethod::Pop | ListMethod::Clear | ListMethod::Len => 0,
            ListMethod::Push | ListMethod::GetAt => 1,
            ListMethod::SetAt | ListMethod::Slice => 2,
        }
    }
}

pub fn call_list_method(
    list: &ListRef,
    method: ListMethod,
    args: &[Value],
) -> Result<Value, ValueError> {
    match method {
        ListMethod::Push => {
            let value = args[0].clone();
            list.borrow_mut().push(value);
            Ok(Value::Nil)
        }

        ListMethod::Pop => list
            .borrow_mut()
            .pop()
            .ok_or_else(|| ValueError::index("List is empty.")),

        ListMethod::Clear => {
            list.borrow_mut().clear();
            Ok(Value::Nil)
        }

        ListMethod::Len => Ok(Value::Int(list.borrow().len() as i64)),

        ListMethod::GetAt => get_at(list, &args[0]),

        ListMethod::SetAt => {
            set_at(list, &args[0], args[1].clone())?;
            Ok(Value::Nil)
        }

        ListMethod::Slice => slice(list, &args[0], &args[1]),
    }
}

fn check_index(index: &Value, len: usize) -> Result<usize, ValueError> {
    let index = match index {
        Value::Int(n) => *n,
        _ => return Err(ValueError::type_error("Index should be an integer.")),
    };

    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| ValueError::index(format!("Index {} is out of range.", index)))
}

pub fn get_at(list: &ListRef, index: &Value) -> Result<Value, ValueError> {
    let items = list.borrow();
    let i = check_index(index, items.len())?;
    Ok(items[i].clone())
}

pub fn set_at(list: &ListRef, index: &Value, value: Value) -> Result<(), ValueError> {
    let mut items = list.borrow_mut();
    let i = check_index(index, items.len())?;
    items[i] = value;
    Ok(())
}

/// Elements `[start, end)`; requires `0 <= start < len`, `0 <= end <= len`
/// and `start < end`.
fn slice(list: &ListRef, start: &Value, end: &Value) -> Result<Value, ValueError> {
    let (start, end) = match (start, end) {
        (Value::Int(i), Value::Int(j)) => (*i, *j),
        _ => {
            return Err(ValueError::type_error(
                "slice: parameters should be integers.",
            ))
        }
    };

    let items = list.borrow();
    let len = items.len() as i64;

    if start < 0 || start >= len || end < 0 || end > len {
        return Err(ValueError::index("slice: parameters are not in valid range."));
    }

    if start >= end {
        return Err(ValueError::index(
            "slice: first index should be smaller than second index.",
        ));
    }

    Ok(Value::list(items[start as usize..end as usize].to_vec()))
}
