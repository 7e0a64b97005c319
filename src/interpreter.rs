use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Error, RuntimeError};
use crate::expr::{Expr, ExprId};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{ClassData, ForData, Stmt};
use crate::token::{Token, Type};

/// A non-local transfer of control, propagated up the evaluator's return
/// path instead of being thrown. Loop drivers consume `Break` and
/// `Continue`, call frames consume `Return`, and `Error` unwinds all the
/// way to the top.
#[derive(Debug)]
pub enum Interrupt {
    Break,
    Continue,
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Interrupt::Error(error)
    }
}

/// Evaluates a resolved AST. Program output goes through the injected
/// writer so that embedders and tests can capture it.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    pub output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new(None)));

        for native in NativeFunction::get_globals() {
            let name = native.name.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Records the lexical depth of a name reference. Called by the resolver.
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Executes the program. The first uncaught runtime error terminates it.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(interrupt) = self.execute(statement) {
                match interrupt {
                    Interrupt::Error(error) => error.throw(),
                    _ => unreachable!("a control-flow interrupt reached the top level"),
                }
                return;
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Interrupt> {
        match stmt {
            Stmt::Expression(data) => {
                self.evaluate(&data.expr)?;
                Ok(())
            },

            Stmt::Var(data) => {
                let value = match &data.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Object::Literal(Literal::Nil),
                };

                self.environment.borrow_mut().define(&data.name.lexeme, value);
                Ok(())
            },

            Stmt::Function(declaration) => {
                let function = Function::new(
                    Rc::clone(declaration),
                    Rc::clone(&self.environment),
                    false,
                );

                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Object::from(function));
                Ok(())
            },

            Stmt::Class(data) => self.execute_class(data),

            Stmt::If(data) => {
                let condition = self.evaluate(&data.condition)?;

                if is_truthy(&condition) {
                    self.execute(&data.then_branch)
                } else if let Some(else_branch) = &data.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            },

            Stmt::While(data) => {
                loop {
                    let condition = self.evaluate(&data.condition)?;
                    if !is_truthy(&condition) {
                        break;
                    }

                    match self.execute(&data.body) {
                        Err(Interrupt::Break) => break,
                        Err(Interrupt::Continue) | Ok(()) => {},
                        Err(interrupt) => return Err(interrupt),
                    }
                }

                Ok(())
            },

            // The loop-local scope is created once, around the whole loop.
            Stmt::For(data) => {
                let enclosing = Rc::clone(&self.environment);
                self.environment = Rc::new(RefCell::new(
                    Environment::new(Some(Rc::clone(&enclosing))),
                ));

                let result = self.run_for(data);

                self.environment = enclosing;
                result
            },

            Stmt::Block(data) => {
                let environment = Environment::new(Some(Rc::clone(&self.environment)));
                self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
            },

            Stmt::Return(data) => {
                let value = match &data.value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::Literal(Literal::Nil),
                };

                Err(Interrupt::Return(value))
            },
        }
    }

    fn run_for(&mut self, data: &ForData) -> Result<(), Interrupt> {
        if let Some(initializer) = &data.initializer {
            self.execute(initializer)?;
        }

        loop {
            let condition = self.evaluate(&data.condition)?;
            if !is_truthy(&condition) {
                break;
            }

            match self.execute(&data.body) {
                Err(Interrupt::Break) => break,
                // The increment still runs after a continue.
                Err(Interrupt::Continue) | Ok(()) => {},
                Err(interrupt) => return Err(interrupt),
            }

            if let Some(increment) = &data.increment {
                self.evaluate(increment)?;
            }
        }

        Ok(())
    }

    fn execute_class(&mut self, data: &ClassData) -> Result<(), Interrupt> {
        let superclass = match &data.superclass {
            Some(expr) => {
                let Expr::Variable(variable) = expr else {
                    unreachable!("a superclass is always a variable reference");
                };

                match self.evaluate(expr)? {
                    Object::Class(class) => Some(class),
                    _ => {
                        return Err(RuntimeError {
                            token: variable.name.clone(),
                            message: "Superclass must be another class.".to_string(),
                        }.into());
                    },
                }
            },
            None => None,
        };

        self.environment
            .borrow_mut()
            .define(&data.name.lexeme, Object::Literal(Literal::Nil));

        // Methods of a subclass close over an intermediate environment that
        // defines 'super', so super calls dispatch from the right class.
        if let Some(superclass) = &superclass {
            let mut environment = Environment::new(Some(Rc::clone(&self.environment)));
            environment.define("super", Object::Class(Rc::clone(superclass)));
            self.environment = Rc::new(RefCell::new(environment));
        }

        let mut methods = HashMap::new();
        for method in &data.methods {
            let function = Function::new(
                Rc::clone(method),
                Rc::clone(&self.environment),
                method.name.lexeme == "init",
            );
            methods.insert(method.name.lexeme.clone(), function);
        }

        let class = Class::new(data.name.lexeme.clone(), superclass, methods);

        if class.superclass.is_some() {
            let enclosing = self.environment.borrow().enclosing.clone()
                .expect("the 'super' environment to have a parent");
            self.environment = enclosing;
        }

        self.environment
            .borrow_mut()
            .assign(&data.name, Object::from(class))?;

        Ok(())
    }

    /// Executes a list of statements against a fresh environment, restoring
    /// the previous environment even when an interrupt unwinds through.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<(), Interrupt> {
        let previous = mem::replace(&mut self.environment, environment);

        let result = statements
            .iter()
            .try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, Interrupt> {
        match expr {
            Expr::Literal(data) => {
                let object = match data.token.r#type {
                    Type::True => Object::from(true),
                    Type::False => Object::from(false),
                    Type::Nil => Object::Literal(Literal::Nil),
                    _ => Object::Literal(
                        data.token.literal.clone()
                            .expect("a literal token to carry its value"),
                    ),
                };

                Ok(object)
            },

            Expr::Grouping(data) => self.evaluate(&data.expr),

            Expr::Unary(data) => {
                let right = self.evaluate(&data.expr)?;

                match data.operator.r#type {
                    Type::Minus => match right {
                        Object::Literal(Literal::Int(n)) => Ok(Object::from(n.wrapping_neg())),
                        Object::Literal(Literal::Float(n)) => Ok(Object::from(-n)),
                        _ => Err(RuntimeError {
                            token: data.operator.clone(),
                            message: "Unsupported unary operation.".to_string(),
                        }.into()),
                    },
                    Type::Bang => Ok(Object::from(!is_truthy(&right))),
                    _ => unreachable!("the parser only produces '!' and '-' unary operators"),
                }
            },

            Expr::Binary(data) => {
                let left = self.evaluate(&data.left)?;
                let right = self.evaluate(&data.right)?;

                Ok(binary_operation(&data.operator, &left, &right)?)
            },

            Expr::Ternary(data) => {
                let condition = self.evaluate(&data.condition)?;

                if is_truthy(&condition) {
                    self.evaluate(&data.then_branch)
                } else {
                    self.evaluate(&data.else_branch)
                }
            },

            Expr::Variable(data) => Ok(self.look_up_variable(&data.name, data.id)?),

            Expr::Assign(data) => {
                let value = self.evaluate(&data.value)?;

                match self.locals.get(&data.id) {
                    Some(distance) => self.environment.borrow_mut().assign_at(
                        *distance,
                        &data.name,
                        value.clone(),
                    ),
                    None => self.globals.borrow_mut().assign(&data.name, value.clone())?,
                }

                Ok(value)
            },

            Expr::Call(data) => {
                let callee = self.evaluate(&data.callee)?;

                let mut arguments = Vec::with_capacity(data.arguments.len());
                for argument in &data.arguments {
                    arguments.push(self.evaluate(argument)?);
                }

                match callee {
                    Object::Function(function) => {
                        check_arity(function.arity(), arguments.len(), &data.paren)?;
                        Ok(function.call(self, arguments)?)
                    },
                    Object::NativeFunction(function) => {
                        check_arity(function.arity(), arguments.len(), &data.paren)?;
                        Ok(function.call(self, arguments)?)
                    },
                    Object::Class(class) => {
                        let arity = class.borrow().arity();
                        check_arity(arity, arguments.len(), &data.paren)?;
                        Ok(Class::construct(&class, self, arguments)?)
                    },
                    _ => Err(RuntimeError {
                        token: data.paren.clone(),
                        message: "Can only call a function or class initializer.".to_string(),
                    }.into()),
                }
            },

            Expr::Get(data) => {
                let object = self.evaluate(&data.object)?;

                if let Object::Instance(instance) = &object {
                    Ok(instance.borrow().get(&data.name, &object)?)
                } else {
                    Err(RuntimeError {
                        token: data.name.clone(),
                        message: "Only instances of classes can have properties.".to_string(),
                    }.into())
                }
            },

            Expr::Set(data) => {
                let object = self.evaluate(&data.object)?;

                let Object::Instance(instance) = object else {
                    return Err(RuntimeError {
                        token: data.name.clone(),
                        message: "Only instances of classes can have properties.".to_string(),
                    }.into());
                };

                let value = self.evaluate(&data.value)?;
                instance.borrow_mut().set(&data.name, value);

                Ok(Object::Literal(Literal::Nil))
            },

            Expr::This(data) => Ok(self.look_up_variable(&data.keyword, data.id)?),

            Expr::Super(data) => {
                let distance = *self.locals.get(&data.id).ok_or_else(|| RuntimeError {
                    token: data.keyword.clone(),
                    message: "Undefined name 'super'.".to_string(),
                })?;

                let superclass = self.environment
                    .borrow()
                    .get_at(distance, &Token::from("super"))?;
                // 'this' lives one environment closer than 'super'.
                let instance = self.environment
                    .borrow()
                    .get_at(distance - 1, &Token::from("this"))?;

                let Object::Class(superclass) = superclass else {
                    unreachable!("'super' always refers to a class");
                };

                let method = superclass.borrow().find_method(&data.method.lexeme);
                match method {
                    Some(method) => Ok(Object::from(method.bind(instance))),
                    None => Err(RuntimeError {
                        token: data.method.clone(),
                        message: format!("Undefined field '{}'.", data.method.lexeme),
                    }.into()),
                }
            },

            Expr::Break(_) => Err(Interrupt::Break),

            Expr::Continue(_) => Err(Interrupt::Continue),
        }
    }

    fn look_up_variable(&self, name: &Token, id: ExprId) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }
}

/// The truthiness predicate used by every control-flow construct.
/// `true` is the only truthy value; everything else is false.
fn is_truthy(value: &Object) -> bool {
    value.as_bool()
}

fn check_arity(expected: usize, actual: usize, paren: &Token) -> Result<(), RuntimeError> {
    if expected != actual {
        return Err(RuntimeError {
            token: paren.clone(),
            message: "Wrong number of arguments.".to_string(),
        });
    }

    Ok(())
}

fn unsupported_operation(operator: &Token) -> RuntimeError {
    RuntimeError {
        token: operator.clone(),
        message: "Unsupported binary operation.".to_string(),
    }
}

/// Dispatches a binary operator on the runtime kinds of both operands.
/// Numeric operands must be kind-homogeneous; the only mixed-kind operation
/// is string concatenation with an int or a float.
fn binary_operation(
    operator: &Token,
    left: &Object,
    right: &Object,
) -> Result<Object, RuntimeError> {
    // `&&` and `||` combine the truthiness of any two values. Both sides
    // are already evaluated at this point; there is no short-circuit.
    match operator.r#type {
        Type::And => return Ok(Object::from(is_truthy(left) && is_truthy(right))),
        Type::Or => return Ok(Object::from(is_truthy(left) || is_truthy(right))),
        _ => {},
    }

    let (Object::Literal(left), Object::Literal(right)) = (left, right) else {
        return Err(unsupported_operation(operator));
    };

    match (left, right) {
        (Literal::Int(l), Literal::Int(r)) => int_operation(operator, *l, *r),
        (Literal::Float(l), Literal::Float(r)) => float_operation(operator, *l, *r),
        (Literal::String(l), Literal::String(r)) if operator.r#type == Type::Plus => {
            Ok(Object::from(format!("{l}{r}")))
        },
        (Literal::String(l), Literal::Int(r)) if operator.r#type == Type::Plus => {
            Ok(Object::from(format!("{l}{r}")))
        },
        (Literal::Int(l), Literal::String(r)) if operator.r#type == Type::Plus => {
            Ok(Object::from(format!("{l}{r}")))
        },
        (Literal::String(l), Literal::Float(r)) if operator.r#type == Type::Plus => {
            Ok(Object::from(format!("{l}{r}")))
        },
        (Literal::Float(l), Literal::String(r)) if operator.r#type == Type::Plus => {
            Ok(Object::from(format!("{l}{r}")))
        },
        _ => Err(unsupported_operation(operator)),
    }
}

fn int_operation(operator: &Token, left: i64, right: i64) -> Result<Object, RuntimeError> {
    let result = match operator.r#type {
        Type::Plus => Object::from(left.wrapping_add(right)),
        Type::Minus => Object::from(left.wrapping_sub(right)),
        Type::Star => Object::from(left.wrapping_mul(right)),
        Type::Slash => {
            if right == 0 {
                return Err(RuntimeError {
                    token: operator.clone(),
                    message: "Division by zero.".to_string(),
                });
            }
            Object::from(left.wrapping_div(right))
        },
        Type::Percent => {
            if right == 0 {
                return Err(RuntimeError {
                    token: operator.clone(),
                    message: "Modulo by zero.".to_string(),
                });
            }
            Object::from(left.wrapping_rem(right))
        },
        Type::Less => Object::from(left < right),
        Type::LessEqual => Object::from(left <= right),
        Type::Greater => Object::from(left > right),
        Type::GreaterEqual => Object::from(left >= right),
        Type::EqualEqual => Object::from(left == right),
        Type::BangEqual => Object::from(left != right),
        _ => return Err(unsupported_operation(operator)),
    };

    Ok(result)
}

fn float_operation(operator: &Token, left: f64, right: f64) -> Result<Object, RuntimeError> {
    let result = match operator.r#type {
        Type::Plus => Object::from(left + right),
        Type::Minus => Object::from(left - right),
        Type::Star => Object::from(left * right),
        Type::Slash => {
            if right == 0.0 {
                return Err(RuntimeError {
                    token: operator.clone(),
                    message: "Division by zero.".to_string(),
                });
            }
            Object::from(left / right)
        },
        Type::Less => Object::from(left < right),
        Type::LessEqual => Object::from(left <= right),
        Type::Greater => Object::from(left > right),
        Type::GreaterEqual => Object::from(left >= right),
        Type::EqualEqual => Object::from(left == right),
        Type::BangEqual => Object::from(left != right),
        _ => return Err(unsupported_operation(operator)),
    };

    Ok(result)
}
