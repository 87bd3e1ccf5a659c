//! Runtime values.
//!
//! `Value` is cheap to clone: scalars are copied and every heap object
//! (strings, callables, instances, lists) sits behind an `Rc`.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::callable::{Callable, LoxInstance};

/// Shared, mutable backing store of a list value.
pub type ListRef = Rc<RefCell<Vec<Value>>>;

thread_local! {
    /// Lists whose `Display` is in progress on this thread.
    static FORMATTING: RefCell<HashSet<*const RefCell<Vec<Value>>>> =
        RefCell::new(HashSet::new());
}

/// Marks a list as being formatted until dropped.  `enter` yields `None`
/// when the list is already on the formatting stack.
struct FormatGuard(*const RefCell<Vec<Value>>);

impl FormatGuard {
    fn enter(list: &ListRef) -> Option<Self> {
        let ptr = Rc::as_ptr(list);
        FORMATTING
            .with(|active| active.borrow_mut().insert(ptr))
            .then_some(FormatGuard(ptr))
    }
}

impl Drop for FormatGuard {
    fn drop(&mut self) {
        FORMATTING.with(|active| {
            active.borrow_mut().remove(&self.0);
        });
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Bool(bool),
    Nil,
    Callable(Callable),
    Instance(Rc<LoxInstance>),
    List(ListRef),
}

impl Value {
    pub fn string<S: AsRef<str>>(s: S) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn list(values: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(values)))
    }

    /// `nil` and `false` are falsey; everything else, `0` and `""` included,
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Name reported by the `type` built‑in.
    pub fn type_name(&self) -> String {
        match self {
            Value::Int(_) => "<int>".to_string(),
            Value::Float(_) => "<float>".to_string(),
            Value::Str(_) => "<str>".to_string(),
            Value::Bool(_) => "<bool>".to_string(),
            Value::Nil => "<nil>".to_string(),
            Value::List(_) => "<list>".to_string(),
            Value::Instance(instance) => format!("<{}>", instance),
            Value::Callable(callable) => callable.to_string(),
        }
    }
}

/// Language equality: by value for scalars, by identity for every heap
/// object. Values of different types are never equal, so `1 == 1.0` is false.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.same(b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => {
                let mut buf = itoa::Buffer::new();
                f.write_str(buf.format(*n))
            }

            // Whole floats print without a trailing ".0"; Rust's float
            // formatting never switches to scientific notation.
            Value::Float(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }

            Value::Str(s) => f.write_str(s),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Nil => f.write_str("nil"),

            Value::Callable(callable) => write!(f, "{}", callable),

            Value::Instance(instance) => write!(f, "{}", instance),

            Value::List(items) => {
                // A list that contains itself prints the inner occurrence
                // as `[...]`.
                let Some(_guard) = FormatGuard::enter(items) else {
                    return f.write_str("[...]");
                };

                f.write_str("[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}
