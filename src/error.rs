use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

use crate::token::Token;

static HAD_ERROR: AtomicBool = AtomicBool::new(false);
static HAD_RUNTIME_ERROR: AtomicBool = AtomicBool::new(false);

/// Checks if an error occurred during parsing or resolution.
pub fn did_error() -> bool {
    HAD_ERROR.load(Ordering::Relaxed)
}

/// Checks if an error occurred during runtime.
pub fn did_runtime_error() -> bool {
    HAD_RUNTIME_ERROR.load(Ordering::Relaxed)
}

/// Resets the error flags.
pub fn reset_error() {
    HAD_ERROR.store(false, Ordering::Relaxed);
    HAD_RUNTIME_ERROR.store(false, Ordering::Relaxed);
}

/// Prints a diagnostic pointing at a token. The prefix is colored when the
/// output is a terminal and left plain when piped.
fn report(token: &Token, message: &str) {
    let location = &token.location;
    let prefix = format!(
        "[line {}:{} in {}]",
        location.line, location.column, location.file
    );

    eprintln!("{}: {}", prefix.red().bold(), message);
}

/// Every error type must implement this trait.
pub trait Error {
    /// Prints the error message and sets the error flag.
    fn throw(&self);
}

/// Represents a syntax error raised while lexing or parsing.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Error for ParseError {
    fn throw(&self) {
        report(&self.token, &self.message);
        HAD_ERROR.store(true, Ordering::Relaxed);
    }
}

/// Represents an error that occurs during resolution.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn throw(&self) {
        report(&self.token, &self.message);
        HAD_ERROR.store(true, Ordering::Relaxed);
    }
}

/// Represents an error that occurs during runtime.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn throw(&self) {
        report(&self.token, &self.message);
        HAD_RUNTIME_ERROR.store(true, Ordering::Relaxed);
    }
}
