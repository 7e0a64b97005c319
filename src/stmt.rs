use std::rc::Rc;

use crate::expr::Expr;
use crate::token::Token;

/// Represents a statement in the language.
///
/// Function declarations are reference counted because every user function
/// value holds on to its declaring node for as long as it lives.
#[derive(Debug)]
pub enum Stmt {
    Expression(ExpressionData),
    Function(Rc<FunctionData>),
    Var(VarData),
    Class(ClassData),
    If(IfData),
    While(WhileData),
    For(ForData),
    Block(BlockData),
    Return(ReturnData),
}

#[derive(Debug)]
pub struct ExpressionData {
    pub expr: Expr,
}

#[derive(Debug)]
pub struct FunctionData {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

#[derive(Debug)]
pub struct VarData {
    pub name: Token,
    pub initializer: Option<Expr>,
}

#[derive(Debug)]
pub struct ClassData {
    pub name: Token,
    pub superclass: Option<Expr>,
    pub methods: Vec<Rc<FunctionData>>,
}

#[derive(Debug)]
pub struct IfData {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug)]
pub struct WhileData {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

/// A `for` loop keeps its clauses instead of desugaring into a while, so the
/// interpreter opens the header scope exactly once. A missing condition is
/// materialized as a `true` literal by the parser.
#[derive(Debug)]
pub struct ForData {
    pub initializer: Option<Box<Stmt>>,
    pub condition: Expr,
    pub increment: Option<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Debug)]
pub struct BlockData {
    pub statements: Vec<Stmt>,
}

#[derive(Debug)]
pub struct ReturnData {
    pub keyword: Token,
    pub value: Option<Expr>,
}
