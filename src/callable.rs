//! Everything a call expression can invoke, plus the class/instance model.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::ast::{FunctionDecl, Identifier};
use crate::builtins::{self, ListMethod};
use crate::environment::Environment;
use crate::error::{RuntimeError, RuntimeErrorKind, ValueError};
use crate::interpreter::{Flow, Interpreter};
use crate::value::{ListRef, Value};

/// Name of the method run automatically when a class is called.
pub const INITIALIZER: &str = "init";

/// Signature of a built‑in function body.
pub type NativeFn = fn(&mut Interpreter, &[Value]) -> Result<Value, ValueError>;

#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({}/{})", self.name, self.arity)
    }
}

/// A method of the list built‑in already bound to its receiver.
#[derive(Debug, Clone)]
pub struct BoundListMethod {
    pub list: ListRef,
    pub method: ListMethod,
}

#[derive(Debug, Clone)]
pub enum Callable {
    Function(Rc<LoxFunction>),
    Native(Rc<NativeFunction>),
    Class(Rc<LoxClass>),
    ListMethod(BoundListMethod),
}

impl Callable {
    pub fn arity(&self) -> usize {
        match self {
            Callable::Function(function) => function.arity(),
            Callable::Native(native) => native.arity,
            Callable::Class(class) => class.arity(),
            Callable::ListMethod(bound) => bound.method.arity(),
        }
    }

    /// Invoke with an argument list whose length already matches `arity`.
    /// `line` is the call site, blamed for failures inside built‑ins.
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        line: usize,
    ) -> Result<Value, RuntimeError> {
        match self {
            Callable::Function(function) => function.call(interpreter, arguments),

            Callable::Native(native) => {
                debug!("Calling native function '{}'", native.name);
                (native.func)(interpreter, &arguments).map_err(|e| e.at(line))
            }

            Callable::Class(class) => LoxClass::instantiate(class, interpreter, arguments),

            Callable::ListMethod(bound) => {
                builtins::call_list_method(&bound.list, bound.method, &arguments)
                    .map_err(|e| e.at(line))
            }
        }
    }

    /// Identity comparison used by `==`.
    pub fn same(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Function(a), Callable::Function(b)) => Rc::ptr_eq(a, b),
            (Callable::Native(a), Callable::Native(b)) => Rc::ptr_eq(a, b),
            (Callable::Class(a), Callable::Class(b)) => Rc::ptr_eq(a, b),
            (Callable::ListMethod(a), Callable::ListMethod(b)) => {
                Rc::ptr_eq(&a.list, &b.list) && a.method == b.method
            }
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Function(function) => write!(f, "<fun {}>", function.declaration.name.name),
            Callable::Native(native) => write!(f, "<native function: {}>", native.name),
            Callable::Class(class) => write!(f, "<class {}>", class.name),
            Callable::ListMethod(bound) => {
                write!(f, "<native function: {}>", bound.method.name())
            }
        }
    }
}

// ───────────────────────────── user functions ─────────────────────────────

/// A function or method value: its declaration plus the scope it closed over.
pub struct LoxFunction {
    pub declaration: Rc<FunctionDecl>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl fmt::Debug for LoxFunction {
    // The closure may contain this very function; print the name only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LoxFunction({})", self.declaration.name.name)
    }
}

impl LoxFunction {
    pub fn new(
        declaration: Rc<FunctionDecl>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Self {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// A copy of this method whose closure has `this` bound to `instance`.
    pub fn bind(&self, instance: Rc<LoxInstance>) -> LoxFunction {
        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));
        environment.define("this", Value::Instance(instance));

        LoxFunction {
            declaration: Rc::clone(&self.declaration),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }

    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        debug!(
            "Calling function '{}' with {} argument(s)",
            self.declaration.name.name,
            arguments.len()
        );

        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(&param.name, argument);
        }

        let flow = interpreter.execute_block(&self.declaration.body, environment)?;

        // An initializer always yields the instance, even on a bare `return;`.
        if self.is_initializer {
            return Environment::get_at(&self.closure, 0, "this", self.declaration.name.line);
        }

        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}

// ──────────────────────────────── classes ─────────────────────────────────

#[derive(Debug)]
pub struct LoxClass {
    pub name: String,
    pub superclass: Option<Rc<LoxClass>>,
    pub methods: HashMap<String, Rc<LoxFunction>>,
}

impl LoxClass {
    pub fn new(
        name: String,
        superclass: Option<Rc<LoxClass>>,
        methods: HashMap<String, Rc<LoxFunction>>,
    ) -> Self {
        Self {
            name,
            superclass,
            methods,
        }
    }

    /// Look `name` up on this class, then along the superclass chain.
    pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Rc::clone(method));
        }

        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.find_method(name))
    }

    /// A class takes whatever its initializer takes.
    pub fn arity(&self) -> usize {
        self.find_method(INITIALIZER)
            .map_or(0, |initializer| initializer.arity())
    }

    fn instantiate(
        class: &Rc<LoxClass>,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        debug!("Instantiating class '{}'", class.name);

        let instance = Rc::new(LoxInstance::new(Rc::clone(class)));

        if let Some(initializer) = class.find_method(INITIALIZER) {
            initializer
                .bind(Rc::clone(&instance))
                .call(interpreter, arguments)?;
        }

        Ok(Value::Instance(instance))
    }
}

// ─────────────────────────────── instances ────────────────────────────────

pub struct LoxInstance {
    pub class: Rc<LoxClass>,
    fields: RefCell<HashMap<String, Value>>,
}

impl fmt::Debug for LoxInstance {
    // Fields may refer back to the instance.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LoxInstance({})", self.class.name)
    }
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        Self {
            class,
            fields: RefCell::new(HashMap::new()),
        }
    }

    /// Fields shadow methods; methods come back bound to `instance`.
    pub fn get(instance: &Rc<LoxInstance>, name: &Identifier) -> Result<Value, RuntimeError> {
        if let Some(value) = instance.fields.borrow().get(&name.name) {
            return Ok(value.clone());
        }

        if let Some(method) = instance.class.find_method(&name.name) {
            let bound = method.bind(Rc::clone(instance));
            return Ok(Value::Callable(Callable::Function(Rc::new(bound))));
        }

        Err(RuntimeError::new(
            RuntimeErrorKind::UndefinedProperty,
            name.line,
            format!("Undefined property '{}'.", name.name),
        ))
    }

    pub fn set(&self, name: &str, value: Value) {
        self.fields.borrow_mut().insert(name.to_string(), value);
    }
}

impl fmt::Display for LoxInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class.name)
    }
}
