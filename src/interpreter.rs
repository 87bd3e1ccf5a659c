//! Tree‑walking evaluator.
//!
//! Statements produce a [`Flow`]: either they complete normally or a `return`
//! is unwinding towards the nearest call frame.  Genuine failures travel on
//! the separate `Err(RuntimeError)` channel and unwind to [`Interpreter::interpret`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{
    AssignOp, Expr, ExprId, FunctionDecl, Identifier, LiteralValue, LogicalOp, Stmt,
};
use crate::builtins::{self, ListMethod};
use crate::callable::{BoundListMethod, Callable, LoxClass, LoxFunction, LoxInstance, INITIALIZER};
use crate::environment::Environment;
use crate::error::{RuntimeError, RuntimeErrorKind};
use crate::ops;
use crate::value::Value;

/// How a statement finished.
#[derive(Debug, Clone)]
pub enum Flow {
    Normal,
    Return(Value),
}

/// Convenient alias for interpreter results.
pub type IResult<T> = Result<T, RuntimeError>;

pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    output: Box<dyn Write>,
    input: Box<dyn BufRead>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter printing to stdout and reading from stdin.
    pub fn new() -> Self {
        Self::with_io(
            Box::new(io::stdout()),
            Box::new(io::BufReader::new(io::stdin())),
        )
    }

    /// Creates an interpreter with the given print sink and `readline` source.
    pub fn with_io(output: Box<dyn Write>, input: Box<dyn BufRead>) -> Self {
        info!("Initializing Interpreter");

        let mut globals = Environment::new();
        builtins::install(&mut globals);
        let globals = Rc::new(RefCell::new(globals));

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
            input,
        }
    }

    /// Called by the resolver: the node `id` refers to a binding `depth`
    /// scopes out from where it is evaluated.
    pub fn note_local(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Interprets a list of statements (a "program"), stopping at the first
    /// runtime error.
    pub fn interpret(&mut self, statements: &[Stmt]) -> IResult<()> {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            if let Err(e) = self.execute(stmt) {
                info!("Interpretation aborted: {}", e);
                return Err(e);
            }
        }

        info!("Interpretation completed successfully");
        Ok(())
    }

    pub(crate) fn write_output(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    pub(crate) fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    // ───────────────────────────── statements ─────────────────────────────

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt) -> IResult<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Defining variable '{}'", name.name);
                self.environment.borrow_mut().define(&name.name, value);
                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let environment = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, environment)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }

                Ok(Flow::Normal)
            }

            Stmt::Function(declaration) => {
                debug!("Defining function '{}'", declaration.name.name);

                let function = LoxFunction::new(
                    Rc::clone(declaration),
                    Rc::clone(&self.environment),
                    false,
                );

                self.environment.borrow_mut().define(
                    &declaration.name.name,
                    Value::Callable(Callable::Function(Rc::new(function))),
                );
                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                Ok(Flow::Return(value))
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => {
                self.define_class(name, superclass.as_ref(), methods)?;
                Ok(Flow::Normal)
            }
        }
    }

    /// Run `statements` inside `environment`, restoring the current scope
    /// afterwards whether they complete, return or fail.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Environment) -> IResult<Flow> {
        let previous = std::mem::replace(
            &mut self.environment,
            Rc::new(RefCell::new(environment)),
        );

        let result = self.execute_all(statements);

        self.environment = previous;
        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> IResult<Flow> {
        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    fn define_class(
        &mut self,
        name: &Identifier,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> IResult<()> {
        debug!("Defining class '{}'", name.name);

        let superclass: Option<Rc<LoxClass>> = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Callable(Callable::Class(class)) => Some(class),
                _ => {
                    return Err(RuntimeError::new(
                        RuntimeErrorKind::Type,
                        name.line,
                        "Superclass must be a class.",
                    ));
                }
            },
            None => None,
        };

        self.environment.borrow_mut().define(&name.name, Value::Nil);

        // Methods of a subclass close over an extra scope holding `super`.
        let previous = superclass.as_ref().map(|superclass| {
            let mut environment = Environment::with_enclosing(Rc::clone(&self.environment));
            environment.define(
                "super",
                Value::Callable(Callable::Class(Rc::clone(superclass))),
            );
            std::mem::replace(&mut self.environment, Rc::new(RefCell::new(environment)))
        });

        let methods: HashMap<String, Rc<LoxFunction>> = methods
            .iter()
            .map(|method| {
                let function = LoxFunction::new(
                    Rc::clone(method),
                    Rc::clone(&self.environment),
                    method.name.name == INITIALIZER,
                );
                (method.name.name.clone(), Rc::new(function))
            })
            .collect();

        if let Some(previous) = previous {
            self.environment = previous;
        }

        let class = LoxClass::new(name.name.clone(), superclass, methods);

        self.environment.borrow_mut().assign(
            &name.name,
            Value::Callable(Callable::Class(Rc::new(class))),
            name.line,
        )
    }

    // ──────────────────────────── expressions ─────────────────────────────

    pub fn evaluate(&mut self, expr: &Expr) -> IResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Int(n) => Value::Int(*n),
                LiteralValue::Float(n) => Value::Float(*n),
                LiteralValue::Str(s) => Value::string(s),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary {
                operator,
                line,
                right,
            } => {
                let right = self.evaluate(right)?;
                ops::unary(*operator, &right).map_err(|e| e.at(*line))
            }

            Expr::Binary {
                left,
                operator,
                line,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                ops::binary(*operator, &left, &right).map_err(|e| e.at(*line))
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;

                let short_circuit = match operator {
                    LogicalOp::Or => left.is_truthy(),
                    LogicalOp::And => !left.is_truthy(),
                };

                if short_circuit {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign {
                id,
                name,
                operator,
                value,
            } => {
                let value = self.evaluate(value)?;
                let depth = self.locals.get(id).copied();

                let value = match operator {
                    AssignOp::Assign => value,
                    AssignOp::Compound(op) => {
                        let current = self.read_variable(depth, name)?;
                        ops::binary(*op, &current, &value).map_err(|e| e.at(name.line))?
                    }
                };

                match depth {
                    Some(distance) => Environment::assign_at(
                        &self.environment,
                        distance,
                        &name.name,
                        value.clone(),
                        name.line,
                    )?,
                    None => self
                        .globals
                        .borrow_mut()
                        .assign(&name.name, value.clone(), name.line)?,
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                line,
                arguments,
                ..
            } => {
                let callee = self.evaluate(callee)?;

                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }

                self.call_value(callee, values, *line)
            }

            Expr::List { elements, .. } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.evaluate(element)?);
                }

                Ok(Value::list(values))
            }

            Expr::Get { object, name } => {
                let object = self.evaluate(object)?;
                self.get_property(object, name)
            }

            Expr::Set {
                object,
                name,
                operator,
                value,
            } => {
                let instance = match self.evaluate(object)? {
                    Value::Instance(instance) => instance,
                    Value::List(_) => {
                        return Err(RuntimeError::new(
                            RuntimeErrorKind::Type,
                            name.line,
                            "Can't set attribute for builtin classes.",
                        ))
                    }
                    _ => {
                        return Err(RuntimeError::new(
                            RuntimeErrorKind::Type,
                            name.line,
                            "Only instances have fields.",
                        ))
                    }
                };

                let value = self.evaluate(value)?;

                let value = match operator {
                    AssignOp::Assign => value,
                    AssignOp::Compound(op) => {
                        let current = LoxInstance::get(&instance, name)?;
                        ops::binary(*op, &current, &value).map_err(|e| e.at(name.line))?
                    }
                };

                instance.set(&name.name, value.clone());
                Ok(value)
            }

            Expr::IndexSet {
                object,
                arguments,
                operator,
                line,
                value,
            } => {
                let list = match self.evaluate(object)? {
                    Value::List(list) => list,
                    _ => {
                        return Err(RuntimeError::new(
                            RuntimeErrorKind::Type,
                            *line,
                            "Only lists support indexed assignment.",
                        ))
                    }
                };

                let mut indices = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    indices.push(self.evaluate(argument)?);
                }

                let index = match indices.as_slice() {
                    [index] => index.clone(),
                    _ => return Err(arity_error(1, indices.len(), *line)),
                };

                let value = self.evaluate(value)?;

                let value = match operator {
                    AssignOp::Assign => value,
                    AssignOp::Compound(op) => {
                        let current = builtins::get_at(&list, &index).map_err(|e| e.at(*line))?;
                        ops::binary(*op, &current, &value).map_err(|e| e.at(*line))?
                    }
                };

                builtins::set_at(&list, &index, value.clone()).map_err(|e| e.at(*line))?;
                Ok(value)
            }

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.super_method(*id, keyword, method),
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Identifier) -> IResult<Value> {
        self.read_variable(self.locals.get(&id).copied(), name)
    }

    fn read_variable(&self, depth: Option<usize>, name: &Identifier) -> IResult<Value> {
        match depth {
            Some(distance) => Environment::get_at(&self.environment, distance, &name.name, name.line),
            None => self.globals.borrow().get(&name.name, name.line),
        }
    }

    fn call_value(&mut self, callee: Value, arguments: Vec<Value>, line: usize) -> IResult<Value> {
        match callee {
            Value::Callable(callable) => {
                if arguments.len() != callable.arity() {
                    return Err(arity_error(callable.arity(), arguments.len(), line));
                }

                callable.call(self, arguments, line)
            }

            // `xs(i)` / `xs[i]` reads an element.
            Value::List(list) => match arguments.as_slice() {
                [index] => builtins::get_at(&list, index).map_err(|e| e.at(line)),
                _ => Err(arity_error(1, arguments.len(), line)),
            },

            _ => Err(RuntimeError::new(
                RuntimeErrorKind::NotCallable,
                line,
                "Can only call functions and classes.",
            )),
        }
    }

    fn get_property(&self, object: Value, name: &Identifier) -> IResult<Value> {
        match object {
            Value::Instance(instance) => LoxInstance::get(&instance, name),

            Value::List(list) => match ListMethod::from_name(&name.name) {
                Some(method) => Ok(Value::Callable(Callable::ListMethod(BoundListMethod {
                    list,
                    method,
                }))),
                None => Err(RuntimeError::new(
                    RuntimeErrorKind::UndefinedProperty,
                    name.line,
                    format!("Undefined property '{}'.", name.name),
                )),
            },

            _ => Err(RuntimeError::new(
                RuntimeErrorKind::Type,
                name.line,
                "Only instances have properties.",
            )),
        }
    }

    /// `super` lives one scope outside the one holding `this`.
    fn super_method(&self, id: ExprId, keyword: &Identifier, method: &Identifier) -> IResult<Value> {
        let distance = self.locals.get(&id).copied().ok_or_else(|| {
            RuntimeError::new(
                RuntimeErrorKind::UndefinedVariable,
                keyword.line,
                "Undefined variable 'super'.",
            )
        })?;

        let superclass = Environment::get_at(&self.environment, distance, "super", keyword.line)?;
        let instance = Environment::get_at(
            &self.environment,
            distance.saturating_sub(1),
            "this",
            keyword.line,
        )?;

        let (superclass, instance) = match (superclass, instance) {
            (Value::Callable(Callable::Class(class)), Value::Instance(instance)) => (class, instance),
            _ => {
                return Err(RuntimeError::new(
                    RuntimeErrorKind::Type,
                    keyword.line,
                    "Invalid 'super' binding.",
                ))
            }
        };

        match superclass.find_method(&method.name) {
            Some(found) => Ok(Value::Callable(Callable::Function(Rc::new(
                found.bind(instance),
            )))),
            None => Err(RuntimeError::new(
                RuntimeErrorKind::UndefinedProperty,
                method.line,
                format!("Undefined property '{}'.", method.name),
            )),
        }
    }
}

fn arity_error(expected: usize, got: usize, line: usize) -> RuntimeError {
    RuntimeError::new(
        RuntimeErrorKind::Arity,
        line,
        format!("Expected {} arguments but got {}.", expected, got),
    )
}
