use std::collections::HashMap;
use std::mem;

use crate::error::{Error, ResolveError};
use crate::expr::{Expr, ExprId};
use crate::interpreter::Interpreter;
use crate::stmt::{ClassData, FunctionData, Stmt};
use crate::token::Token;

/// The lifecycle of a name inside a scope: declared but still evaluating its
/// initializer, or ready to be read.
#[derive(Clone, Copy, PartialEq)]
enum VarState {
    Init,
    Ready,
}

#[derive(Clone, Copy)]
enum FunctionType {
    None,
    Function,
    Initializer,
}

#[derive(Clone, Copy)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// A static pass over the AST that computes, for every name reference, how
/// many scopes separate it from its declaration. Also rejects the handful of
/// constructs that are syntactically fine but semantically impossible, like
/// `break` outside a loop or `super` in a class without a superclass.
pub struct Resolver<'a, 'o> {
    interpreter: &'a mut Interpreter<'o>,
    scopes: Vec<HashMap<String, VarState>>,
    current_function: FunctionType,
    current_class: ClassType,
    loops: usize,
}

impl<'a, 'o> Resolver<'a, 'o> {
    pub fn new(interpreter: &'a mut Interpreter<'o>) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
            loops: 0,
        }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(data) => self.resolve_expr(&data.expr),

            Stmt::Var(data) => {
                self.declare(&data.name);
                if let Some(initializer) = &data.initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&data.name);
            },

            Stmt::Function(declaration) => {
                self.declare(&declaration.name);
                self.define(&declaration.name);

                self.resolve_function(declaration, FunctionType::Function);
            },

            Stmt::Class(data) => self.resolve_class(data),

            Stmt::If(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    self.resolve_stmt(else_branch);
                }
            },

            Stmt::While(data) => {
                self.resolve_expr(&data.condition);

                self.loops += 1;
                self.resolve_stmt(&data.body);
                self.loops -= 1;
            },

            // The for header opens its own scope, matching the single
            // loop-local environment the interpreter creates.
            Stmt::For(data) => {
                self.begin_scope();

                if let Some(initializer) = &data.initializer {
                    self.resolve_stmt(initializer);
                }
                self.resolve_expr(&data.condition);
                if let Some(increment) = &data.increment {
                    self.resolve_expr(increment);
                }

                self.loops += 1;
                self.resolve_stmt(&data.body);
                self.loops -= 1;

                self.end_scope();
            },

            Stmt::Block(data) => {
                self.begin_scope();
                self.resolve(&data.statements);
                self.end_scope();
            },

            Stmt::Return(data) => {
                if let FunctionType::None = self.current_function {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot return from top-level code.".to_string(),
                    }.throw();
                }

                if let Some(value) = &data.value {
                    if let FunctionType::Initializer = self.current_function {
                        ResolveError {
                            token: data.keyword.clone(),
                            message: "Cannot return a value from an initializer.".to_string(),
                        }.throw();
                        return;
                    }

                    self.resolve_expr(value);
                }
            },
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {},

            Expr::Unary(data) => self.resolve_expr(&data.expr),

            Expr::Binary(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            },

            Expr::Grouping(data) => self.resolve_expr(&data.expr),

            Expr::Ternary(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_expr(&data.then_branch);
                self.resolve_expr(&data.else_branch);
            },

            Expr::Variable(data) => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&data.name.lexeme) == Some(&VarState::Init) {
                        ResolveError {
                            token: data.name.clone(),
                            message: "Cannot read a local variable in its own initializer."
                                .to_string(),
                        }.throw();
                    }
                }

                self.resolve_local(data.id, &data.name);
            },

            Expr::Assign(data) => {
                self.resolve_expr(&data.value);
                self.resolve_local(data.id, &data.name);
            },

            Expr::Call(data) => {
                self.resolve_expr(&data.callee);

                for argument in &data.arguments {
                    self.resolve_expr(argument);
                }
            },

            Expr::Get(data) => self.resolve_expr(&data.object),

            Expr::Set(data) => {
                self.resolve_expr(&data.value);
                self.resolve_expr(&data.object);
            },

            Expr::This(data) => {
                if let ClassType::None = self.current_class {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'this' outside of a class.".to_string(),
                    }.throw();
                    return;
                }

                self.resolve_local(data.id, &data.keyword);
            },

            Expr::Super(data) => {
                match self.current_class {
                    ClassType::Subclass => {},
                    ClassType::None => ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'super' outside of a class.".to_string(),
                    }.throw(),
                    ClassType::Class => ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'super' in a class with no superclass.".to_string(),
                    }.throw(),
                }

                self.resolve_local(data.id, &data.keyword);
            },

            Expr::Break(data) => {
                if self.loops == 0 {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'break' outside of a loop.".to_string(),
                    }.throw();
                }
            },

            Expr::Continue(data) => {
                if self.loops == 0 {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'continue' outside of a loop.".to_string(),
                    }.throw();
                }
            },
        }
    }

    fn resolve_function(&mut self, function: &FunctionData, r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn resolve_class(&mut self, data: &ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&data.name);
        self.define(&data.name);

        if let Some(superclass) = &data.superclass {
            let Expr::Variable(variable) = superclass else {
                unreachable!("a superclass is always a variable reference");
            };

            if variable.name.lexeme == data.name.lexeme {
                ResolveError {
                    token: variable.name.clone(),
                    message: "A class cannot inherit from itself.".to_string(),
                }.throw();
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass);

            self.begin_scope();
            self.scopes
                .last_mut()
                .expect("a scope was just opened")
                .insert("super".to_string(), VarState::Ready);
        }

        self.begin_scope();
        self.scopes
            .last_mut()
            .expect("a scope was just opened")
            .insert("this".to_string(), VarState::Ready);

        for method in &data.methods {
            let declaration = if method.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Function
            };

            self.resolve_function(method, declaration);
        }

        self.end_scope();

        if data.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Declares a name in the current scope without making it readable yet.
    /// Globals are not tracked; redeclaring one is allowed.
    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };

        if scope.contains_key(&name.lexeme) {
            ResolveError {
                token: name.clone(),
                message: format!(
                    "A variable named '{}' already exists in this scope.",
                    name.lexeme
                ),
            }.throw();
        }

        scope.insert(name.lexeme.clone(), VarState::Init);
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), VarState::Ready);
        }
    }

    /// Reports the depth of the innermost scope that binds the name. A miss
    /// means the name is global and the interpreter falls back at run time.
    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, i);
                return;
            }
        }
    }
}
