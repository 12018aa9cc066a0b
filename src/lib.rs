//! # rejit-core
//!
//! Front-end compilation pipeline for a JIT regex engine: tokenizer,
//! structural analyzer, character-class expander, parser, and match-length
//! analyzer. The JIT itself — the native code a pattern ultimately compiles
//! to — is out of scope; [`matcher::Backend`] is the seam a code generator
//! plugs into.
//!
//! ## Pipeline
//!
//! 1. [`rune::decode`] — UTF-8 text to a flat rune sequence
//! 2. [`lexer::tokenize`] — runes to tokens
//! 3. [`analyzer::analyze`] — one pass building suffix/alternation tables
//! 4. [`parser::parse`] — tokens (plus tables) lowered to instructions
//! 5. [`lengths::match_len`] — on demand, inside look-behind validation
//! 6. [`matcher::Matcher`] — hands the instructions to a [`matcher::Backend`]
//!
//! ```rust,no_run
//! use rejit_core::{parse, parser::ast::Flags};
//!
//! let result = parse("a+b", Flags::default()).unwrap();
//! assert_eq!(result.groups, 0);
//! ```

pub mod analyzer;
pub mod error;
pub mod lexer;
pub mod lengths;
pub mod matcher;
pub mod parser;
pub mod rune;
pub mod sets;

use error::ParseError;
use parser::ast::{Flags, ParseResult};

/// Run the whole front end over a pattern: decode, tokenize, analyze, parse.
#[must_use = "a parse result with no consumer duplicates the work that built it"]
#[tracing::instrument(skip(pattern), fields(len = pattern.len()))]
pub fn parse(pattern: &str, flags: Flags) -> Result<ParseResult, ParseError> {
    let runes = rune::decode(pattern);
    let tokens = lexer::tokenize(&runes)?;
    tracing::trace!(tokens = tokens.len(), "tokenized");
    let analysis = analyzer::analyze(&tokens)?;
    tracing::trace!("analyzed");
    let result = parser::parse(&runes, &tokens, &analysis, flags)?;
    tracing::debug!(instrs = ?result.instrs, "parsed");
    Ok(result)
}
