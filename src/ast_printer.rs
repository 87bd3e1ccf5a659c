use crate::ast::{CallStyle, Expr, FunctionDecl, LiteralValue, LogicalOp, Stmt};

/// Converts the AST to a parenthesised prefix form, one line per top‑level
/// statement; used by the `parse` subcommand.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        match expr {
            // ── literals ────────────────────────────────────────────────
            Expr::Literal(lit) => match lit {
                LiteralValue::True => "true".into(),

                LiteralValue::False => "false".into(),

                LiteralValue::Nil => "nil".into(),

                LiteralValue::Str(s) => s.clone(),

                LiteralValue::Int(n) => {
                    let mut buf = itoa::Buffer::new();
                    buf.format(*n).to_string()
                }

                LiteralValue::Float(n) => {
                    if n.fract() == 0.0 {
                        // 3.0 → 3.0
                        format!("{:.1}", n)
                    } else {
                        n.to_string()
                    }
                }
            },

            // ── grouping ────────────────────────────────────────────────
            Expr::Grouping(inner) => format!("(group {})", Self::print(inner)),

            // ── operators ───────────────────────────────────────────────
            Expr::Unary {
                operator, right, ..
            } => format!("({} {})", operator.symbol(), Self::print(right)),

            Expr::Binary {
                left,
                operator,
                right,
                ..
            } => format!("({} {} {})", operator, Self::print(left), Self::print(right)),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let keyword = match operator {
                    LogicalOp::And => "and",
                    LogicalOp::Or => "or",
                };

                format!("({} {} {})", keyword, Self::print(left), Self::print(right))
            }

            // ── names ───────────────────────────────────────────────────
            Expr::Variable { name, .. } => name.name.clone(),

            Expr::This { .. } => "this".into(),

            Expr::Super { method, .. } => format!("(super {})", method.name),

            Expr::Assign {
                name,
                operator,
                value,
                ..
            } => format!("({} {} {})", operator, name.name, Self::print(value)),

            // ── calls, lists, properties ────────────────────────────────
            Expr::Call {
                callee,
                style,
                arguments,
                ..
            } => {
                let head = match style {
                    CallStyle::Parens => "call",
                    CallStyle::Brackets => "index",
                };

                Self::parenthesize(head, std::iter::once(callee.as_ref()).chain(arguments))
            }

            Expr::List { elements, .. } => Self::parenthesize("list", elements.iter()),

            Expr::Get { object, name } => format!("(. {} {})", Self::print(object), name.name),

            Expr::Set {
                object,
                name,
                operator,
                value,
            } => format!(
                "({} (. {} {}) {})",
                operator,
                Self::print(object),
                name.name,
                Self::print(value)
            ),

            Expr::IndexSet {
                object,
                arguments,
                operator,
                value,
                ..
            } => format!(
                "({} {} {})",
                operator,
                Self::parenthesize("index", std::iter::once(object.as_ref()).chain(arguments)),
                Self::print(value)
            ),
        }
    }

    pub fn print_stmt(stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(expr) => format!("(; {})", Self::print(expr)),

            Stmt::Var { name, initializer } => match initializer {
                Some(expr) => format!("(var {} {})", name.name, Self::print(expr)),
                None => format!("(var {})", name.name),
            },

            Stmt::Block(statements) => Self::block("block", statements),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => match else_branch {
                Some(else_branch) => format!(
                    "(if {} {} {})",
                    Self::print(condition),
                    Self::print_stmt(then_branch),
                    Self::print_stmt(else_branch)
                ),
                None => format!(
                    "(if {} {})",
                    Self::print(condition),
                    Self::print_stmt(then_branch)
                ),
            },

            Stmt::While { condition, body } => format!(
                "(while {} {})",
                Self::print(condition),
                Self::print_stmt(body)
            ),

            Stmt::Function(function) => Self::function(function),

            Stmt::Return { value, .. } => match value {
                Some(expr) => format!("(return {})", Self::print(expr)),
                None => "(return)".into(),
            },

            Stmt::Class {
                name,
                superclass,
                methods,
            } => {
                let mut s = format!("(class {}", name.name);

                if let Some(superclass) = superclass {
                    s.push_str(" < ");
                    s.push_str(&Self::print(superclass));
                }

                for method in methods {
                    s.push(' ');
                    s.push_str(&Self::function(method));
                }

                s.push(')');
                s
            }
        }
    }

    fn function(function: &FunctionDecl) -> String {
        let params: Vec<&str> = function.params.iter().map(|p| p.name.as_str()).collect();
        let head = format!("fun {} ({})", function.name.name, params.join(" "));

        Self::block(&head, &function.body)
    }

    fn block(head: &str, statements: &[Stmt]) -> String {
        let mut s = format!("({}", head);
        for stmt in statements {
            s.push(' ');
            s.push_str(&Self::print_stmt(stmt));
        }
        s.push(')');
        s
    }

    fn parenthesize<'e>(head: &str, exprs: impl Iterator<Item = &'e Expr>) -> String {
        let mut s = format!("({}", head);
        for expr in exprs {
            s.push(' ');
            s.push_str(&Self::print(expr));
        }
        s.push(')');
        s
    }
}
