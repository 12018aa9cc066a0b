//! # Tokenizer
//!
//! Segments a decoded pattern into a stream of tokens.
//!
//! ## Features
//!
//! - **Atoms**: literal runs (coalesced), `.`, `[...]` character classes,
//!   `\s \S \w \W \d \D` shorthand classes, `\N` back-references
//! - **Structural**: `(`, `)`, `|`
//! - **Suffixes**: `*`, `+`, `?`, `{m,n}`
//! - **Anchors**: `^`, `$`
//!
//! ## Bracket Matching
//!
//! `[...]` and `{...}` are each scanned as a single token by advancing to
//! the matching closer; reaching end-of-pattern first is an `Ubound` error
//! anchored at the opening rune.

pub mod cursor;
pub mod token;

#[cfg(test)]
mod tests;

use crate::error::{ErrorKind, ParseError};
use cursor::Cursor;
use token::{Token, TokenKind};

/// Tokenize a decoded pattern.
///
/// `runes` must come from [`crate::rune::decode`] so that token `pos`/`len`
/// fields are in the same rune-index space the rest of the pipeline uses.
#[must_use = "a token stream with no consumer is wasted work"]
pub fn tokenize(runes: &[char]) -> Result<Vec<Token>, ParseError> {
    let mut cursor = Cursor::new(runes);
    let mut tokens = Vec::new();

    while !cursor.is_at_end() {
        let start = cursor.pos();
        let ch = cursor.peek().expect("checked is_at_end above");

        match ch {
            '+' => {
                cursor.advance();
                tokens.push(Token { kind: TokenKind::Plus, pos: start, len: 1 });
            }
            '*' => {
                cursor.advance();
                tokens.push(Token { kind: TokenKind::Star, pos: start, len: 1 });
            }
            '?' => {
                cursor.advance();
                tokens.push(Token { kind: TokenKind::Q, pos: start, len: 1 });
            }
            '^' => {
                cursor.advance();
                tokens.push(Token { kind: TokenKind::Caret, pos: start, len: 1 });
            }
            '$' => {
                cursor.advance();
                tokens.push(Token { kind: TokenKind::Dollar, pos: start, len: 1 });
            }
            '.' => {
                cursor.advance();
                tokens.push(Token { kind: TokenKind::Dot, pos: start, len: 1 });
            }
            '|' => {
                cursor.advance();
                tokens.push(Token { kind: TokenKind::Pipe, pos: start, len: 1 });
            }
            '(' => {
                cursor.advance();
                tokens.push(Token { kind: TokenKind::Lp, pos: start, len: 1 });
            }
            ')' => {
                cursor.advance();
                tokens.push(Token { kind: TokenKind::Rp, pos: start, len: 1 });
            }
            '[' => lex_set(&mut cursor, &mut tokens, start)?,
            '{' => lex_rep(&mut cursor, &mut tokens, start)?,
            '\\' => lex_backslash(&mut cursor, &mut tokens, start)?,
            _ => {
                cursor.advance();
                push_word(&mut tokens, start, 1);
            }
        }
    }

    Ok(tokens)
}

/// Push a one-rune `Word` token, merging it into a directly preceding
/// `Word` token rather than allocating a new one — this is what keeps the
/// "no two adjacent `Word` tokens" invariant true by construction.
///
/// Merging always widens the preceding token's `len` to reach `pos + len`,
/// rather than requiring `last.pos + last.len == pos`: an escaped literal
/// (`\.`) sits one rune past its preceding plain content because the
/// backslash itself was consumed without becoming part of any token, so the
/// two runs are not contiguous in the source even though they're adjacent
/// in the token stream. The resulting span may therefore contain a
/// backslash that isn't literal content; `parser::unescape_word` re-applies
/// this same escape rule when it reads the span back out.
fn push_word(tokens: &mut Vec<Token>, pos: usize, len: usize) {
    if let Some(last) = tokens.last_mut() {
        if last.kind == TokenKind::Word {
            last.len = pos + len - last.pos;
            return;
        }
    }
    tokens.push(Token { kind: TokenKind::Word, pos, len });
}

/// `[...]`. Stores `pos`/`len` as the class *body* (after `[` and any
/// leading `^`, before the closing `]`) rather than the original's pointer
/// trick of shifting the base pointer past a leading negation marker — see
/// DESIGN.md for why this is the clearer Rust-native equivalent.
fn lex_set(cursor: &mut Cursor, tokens: &mut Vec<Token>, start: usize) -> Result<(), ParseError> {
    cursor.advance(); // consume '['
    let negated = if cursor.peek() == Some('^') {
        cursor.advance();
        true
    } else {
        false
    };

    let body_start = cursor.pos();
    loop {
        match cursor.peek() {
            None => return Err(ParseError::new(ErrorKind::Ubound, start)),
            Some(']') => break,
            Some(_) => {
                cursor.advance();
            }
        }
    }
    let body_len = cursor.pos() - body_start;
    cursor.advance(); // consume ']'

    tokens.push(Token {
        kind: TokenKind::Set { negated },
        pos: body_start,
        len: body_len,
    });
    Ok(())
}

/// `{m}` or `{m,n}`. `pos` is the opening `{`; the parser scans the decimal
/// content starting at `pos + 1`.
fn lex_rep(cursor: &mut Cursor, tokens: &mut Vec<Token>, start: usize) -> Result<(), ParseError> {
    cursor.advance(); // consume '{'
    loop {
        match cursor.peek() {
            None => return Err(ParseError::new(ErrorKind::Ubound, start)),
            Some('}') => break,
            Some(_) => {
                cursor.advance();
            }
        }
    }
    cursor.advance(); // consume '}'
    let len = cursor.pos() - start;
    tokens.push(Token { kind: TokenKind::Rep, pos: start, len });
    Ok(())
}

/// `\N` (back-reference), `\s \S \w \W \d \D` (shorthand class), or `\c`
/// (one-shot escape: the next rune becomes a literal atom regardless of
/// its own meta status — a bare `\` is never itself part of the literal).
fn lex_backslash(
    cursor: &mut Cursor,
    tokens: &mut Vec<Token>,
    start: usize,
) -> Result<(), ParseError> {
    cursor.advance(); // consume '\'
    match cursor.peek() {
        Some(c) if c.is_ascii_digit() => {
            cursor.advance();
            tokens.push(Token { kind: TokenKind::Back, pos: start, len: 2 });
        }
        Some('s' | 'S' | 'w' | 'W' | 'd' | 'D') => {
            cursor.advance();
            tokens.push(Token { kind: TokenKind::Ms, pos: start, len: 2 });
        }
        Some(_) => {
            let lit_pos = cursor.pos();
            cursor.advance();
            push_word(tokens, lit_pos, 1);
        }
        None => return Err(ParseError::new(ErrorKind::Syntax, start)),
    }
    Ok(())
}
