//! # Parse Errors
//!
//! Every front-end failure is a value, never a panic: a `ParseError` pairs
//! an `ErrorKind` with the rune offset into the pattern where the problem
//! was found.

use thiserror::Error;

/// A failure from any stage of the tokenize → analyze → parse pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at rune offset {pos}")]
pub struct ParseError {
    pub kind: ErrorKind,
    /// Rune offset into the pattern, not a byte offset.
    pub pos: usize,
}

impl ParseError {
    pub fn new(kind: ErrorKind, pos: usize) -> Self {
        ParseError { kind, pos }
    }
}

/// The closed set of ways the pipeline can reject a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("out of memory")]
    Mem,
    #[error("unbalanced bracket, brace, or parenthesis")]
    Ubound,
    #[error("syntax error")]
    Syntax,
    #[error("parser stack depth exceeded")]
    Ovflow,
    #[error("expected an integer")]
    Int,
    #[error("inverted character class range")]
    Range,
    #[error("variable-length content inside look-behind")]
    Lbvar,
}
