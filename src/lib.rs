//! LBPL is a small dynamically typed, class-based scripting language. This
//! crate is its tree-walk interpreter: source files are read, lexed into
//! tokens, parsed into an abstract syntax tree (AST), statically resolved
//! for lexical scope and then executed by walking the tree.
//!
//! The language has first-class functions with closures, single-inheritance
//! classes with initializers and `super` dispatch, `if`/`while`/`loop`/`for`
//! control flow with `break` and `continue`, a ternary operator, and file
//! inclusion through `import`. Values are dynamically typed: nil, booleans,
//! 64-bit integers, floats, chars, strings, functions, classes and
//! instances.
//!
//! ## Lexing
//! The [`lexer`] turns the character stream into tokens on demand. It tracks
//! the file, line and column of every token for diagnostics. Invalid input
//! (an unterminated string, a stray `&`, an unknown escape) is not reported
//! by the lexer itself; it becomes an `Error` token that the parser turns
//! into a syntax error when it reaches it.
//!
//! ## Parsing
//! The [`parser`] is a hand-written recursive descent parser with a single
//! token of lookahead. It produces [`statements`](stmt::Stmt) and
//! [`expressions`](expr::Expr) as plain tagged enums that the later passes
//! match on. An `import` statement spawns a nested parse of the named file
//! and splices its statements in at the import point; the set of imported
//! paths travels with the parser so cycles are rejected. After a syntax
//! error the parser synchronizes at the next statement boundary and keeps
//! going, so one mistake does not hide the rest.
//!
//! ## Resolving
//! The [`resolver`] is a static pass between parsing and execution. For
//! every name reference it computes how many environments the interpreter
//! has to walk to find the declaring scope, which is what makes closures
//! capture the variable they lexically see rather than whatever happens to
//! be live at call time. It also rejects semantic misuse that the grammar
//! cannot express: reading a variable in its own initializer, `return` at
//! the top level, `break` outside a loop, a class inheriting from itself.
//!
//! ## Interpreting
//! The [`interpreter`] walks the resolved tree. Scopes are a chain of
//! reference-counted [`environments`](environment::Environment); functions
//! and methods capture the chain at declaration time. `break`, `continue`
//! and `return` are modeled as explicit result variants that unwind the
//! evaluator until a loop driver or call frame consumes them. Runtime
//! errors (an undefined name, mismatched operand kinds, a wrong argument
//! count) unwind the same way and terminate the program with a diagnostic.

use std::io::Write;
use std::rc::Rc;
use std::{fs, process};

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod lexer;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod stmt;
pub mod token;

use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;

/// The interpreter pipeline behind the `lbpl` binary. Program output goes
/// through the injected writer, which lets embedders and tests capture it.
pub struct Lbpl<'a> {
    interpreter: Interpreter<'a>,
}

impl<'a> Lbpl<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        Lbpl {
            interpreter: Interpreter::new(output),
        }
    }

    /// Runs a script file. Exits the process on failure following the
    /// sysexits conventions: 65 for bad source, 66 for an unreadable file,
    /// 70 for a runtime error.
    pub fn run_file(&mut self, path: String) {
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) => {
                eprintln!("Could not read '{path}': {error}.");
                process::exit(66);
            },
        };

        self.run(&contents, &path);

        if error::did_error() {
            process::exit(65);
        }
        if error::did_runtime_error() {
            process::exit(70);
        }
    }

    /// Runs the pipeline over one source. Each stage only runs if the
    /// previous stages reported no errors.
    fn run(&mut self, source: &str, path: &str) {
        let mut parser = Parser::new(source, Rc::from(path));
        let statements = parser.parse();

        if error::did_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);

        if error::did_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}
