use crate::expr::Expr;
use crate::stmt::{FunctionData, Stmt};
use crate::token::Type;

/// Renders a parsed program back to source text, for debugging the parser.
///
/// The output is valid LBPL: printing a parsed program, reparsing the text
/// and printing again reproduces the same text byte for byte.
pub struct AstPrinter {
    indent: usize,
}

impl AstPrinter {
    pub fn new() -> Self {
        AstPrinter { indent: 0 }
    }

    pub fn print(&mut self, statements: &[Stmt]) -> String {
        let mut output = statements
            .iter()
            .map(|statement| self.print_stmt(statement))
            .collect::<Vec<String>>()
            .join("\n");

        if !output.is_empty() {
            output.push('\n');
        }

        output
    }

    fn pad(&self) -> String {
        "    ".repeat(self.indent)
    }

    /// Renders one statement without its leading indentation; the caller
    /// decides whether it starts a line or continues one.
    fn print_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(data) => format!("{};", self.print_expr(&data.expr)),

            Stmt::Var(data) => match &data.initializer {
                Some(initializer) => format!(
                    "let {} = {};",
                    data.name.lexeme,
                    self.print_expr(initializer)
                ),
                None => format!("let {};", data.name.lexeme),
            },

            Stmt::Function(declaration) => format!("fn {}", self.print_function(declaration)),

            Stmt::Class(data) => {
                let header = match &data.superclass {
                    Some(Expr::Variable(variable)) => {
                        format!("class {} : {}", data.name.lexeme, variable.name.lexeme)
                    },
                    _ => format!("class {}", data.name.lexeme),
                };

                if data.methods.is_empty() {
                    return format!("{header};");
                }

                self.indent += 1;
                let methods = data.methods
                    .iter()
                    .map(|method| format!("{}{}", self.pad(), self.print_function(method)))
                    .collect::<Vec<String>>()
                    .join("\n");
                self.indent -= 1;

                format!("{header} {{\n{methods}\n{}}}", self.pad())
            },

            Stmt::If(data) => {
                let mut output = format!(
                    "if {} {}",
                    self.print_expr(&data.condition),
                    self.print_stmt(&data.then_branch)
                );

                if let Some(else_branch) = &data.else_branch {
                    output += &format!(" else {}", self.print_stmt(else_branch));
                }

                output
            },

            Stmt::While(data) => format!(
                "while {} {}",
                self.print_expr(&data.condition),
                self.print_stmt(&data.body)
            ),

            Stmt::For(data) => {
                let initializer = match &data.initializer {
                    Some(initializer) => self.print_stmt(initializer),
                    None => ";".to_string(),
                };
                let increment = match &data.increment {
                    Some(increment) => format!(" {}", self.print_expr(increment)),
                    None => String::new(),
                };

                format!(
                    "for ({} {};{}) {}",
                    initializer,
                    self.print_expr(&data.condition),
                    increment,
                    self.print_stmt(&data.body)
                )
            },

            Stmt::Block(data) => self.print_block(&data.statements),

            Stmt::Return(data) => match &data.value {
                Some(value) => format!("return {};", self.print_expr(value)),
                None => "return;".to_string(),
            },
        }
    }

    fn print_block(&mut self, statements: &[Stmt]) -> String {
        if statements.is_empty() {
            return "{}".to_string();
        }

        self.indent += 1;
        let body = statements
            .iter()
            .map(|statement| format!("{}{}", self.pad(), self.print_stmt(statement)))
            .collect::<Vec<String>>()
            .join("\n");
        self.indent -= 1;

        format!("{{\n{body}\n{}}}", self.pad())
    }

    fn print_function(&mut self, function: &FunctionData) -> String {
        let params = function.params
            .iter()
            .map(|param| param.lexeme.clone())
            .collect::<Vec<String>>()
            .join(", ");

        format!(
            "{}({}) {}",
            function.name.lexeme,
            params,
            self.print_block(&function.body)
        )
    }

    fn print_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(data) => match data.token.r#type {
                Type::String => format!("\"{}\"", escape_string(&data.token.lexeme)),
                Type::Char => format!("'{}'", data.token.lexeme),
                _ => data.token.lexeme.clone(),
            },

            Expr::Unary(data) => {
                format!("{}{}", data.operator.lexeme, self.print_expr(&data.expr))
            },

            Expr::Binary(data) => format!(
                "{} {} {}",
                self.print_expr(&data.left),
                data.operator.lexeme,
                self.print_expr(&data.right)
            ),

            Expr::Grouping(data) => format!("({})", self.print_expr(&data.expr)),

            Expr::Variable(data) => data.name.lexeme.clone(),

            Expr::Assign(data) => {
                format!("{} = {}", data.name.lexeme, self.print_expr(&data.value))
            },

            Expr::Ternary(data) => format!(
                "{} ? {} : {}",
                self.print_expr(&data.condition),
                self.print_expr(&data.then_branch),
                self.print_expr(&data.else_branch)
            ),

            Expr::Call(data) => {
                let arguments = data.arguments
                    .iter()
                    .map(|argument| self.print_expr(argument))
                    .collect::<Vec<String>>()
                    .join(", ");

                format!("{}({})", self.print_expr(&data.callee), arguments)
            },

            Expr::Get(data) => {
                format!("{}.{}", self.print_expr(&data.object), data.name.lexeme)
            },

            Expr::Set(data) => format!(
                "{}.{} = {}",
                self.print_expr(&data.object),
                data.name.lexeme,
                self.print_expr(&data.value)
            ),

            Expr::This(_) => "this".to_string(),

            Expr::Super(data) => format!("super.{}", data.method.lexeme),

            Expr::Break(_) => "break".to_string(),

            Expr::Continue(_) => "continue".to_string(),
        }
    }
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-escapes a string value so the printed literal lexes back to it.
fn escape_string(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
        .replace('\r', "\\r")
        .replace('"', "\\\"")
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::parser::Parser;

    /// Printing a parsed program must reach a fixed point after one reparse.
    fn roundtrip(source: &str) -> String {
        let statements = Parser::new(source, Rc::from("test")).parse();
        let first = AstPrinter::new().print(&statements);

        let reparsed = Parser::new(&first, Rc::from("test")).parse();
        let second = AstPrinter::new().print(&reparsed);

        assert_eq!(first, second);
        first
    }

    #[test]
    fn expressions_reach_a_fixed_point() {
        roundtrip("1 + 2 * 3;");
        roundtrip("(1 + 2) * 3;");
        roundtrip("-x.y(1, \"two\", '3');");
        roundtrip("a = b ? c + 1 : d && !e;");
        roundtrip("println(\"tab\\there \\\"quoted\\\"\");");
    }

    #[test]
    fn statements_reach_a_fixed_point() {
        roundtrip("let a = 1; let b;");
        roundtrip("if a > 1 { println(a); } else println(0);");
        roundtrip("while i < 10 i = i + 1;");
        roundtrip("for (let i = 0; i < 3; i = i + 1) { println(i); }");
        roundtrip("for (;;) break;");
        roundtrip("loop { continue; }");
    }

    #[test]
    fn declarations_reach_a_fixed_point() {
        roundtrip("fn add(a, b) { return a + b; }");
        roundtrip("class Empty;");
        roundtrip(
            "class Greeter : Base { init(name) { this.name = name; } greet() { super.greet(); } }",
        );
    }

    #[test]
    fn loop_prints_as_its_while_desugaring() {
        let printed = roundtrip("loop println(1);");
        assert_eq!(printed, "while true println(1);\n");
    }

    #[test]
    fn grouping_is_preserved() {
        let printed = roundtrip("(1 + 2) * 3;");
        assert_eq!(printed, "(1 + 2) * 3;\n");
    }
}
