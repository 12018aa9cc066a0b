//! # Structural Analyzer
//!
//! Walks a token stream once and builds two index tables the parser
//! consumes directly, rather than re-discovering group/alternation
//! structure while it emits instructions:
//!
//! - `suffixes[i]`: the index of the quantifier token (if any) that applies
//!   to the atom or group *opened* at token `i`. For a parenthesized group,
//!   `i` is the group's `Lp` token index — a suffix trailing `)` is recorded
//!   against the matching `Lp`, since the whole group is the quantified unit.
//! - `pipes[g]`: the alternation split/end for group scope `g`, where `g`
//!   is `0` for the top level or `lp_index + 1` for a nested group. Only
//!   the most recent `|` within a scope is retained — chained `a|b|c`
//!   nests implicitly through repeated splits, mirroring how the original
//!   engine tracks one active split per enclosing scope rather than a list.
//!
//! This mirrors `build_suffix_pipe_list` in the reference implementation,
//! replacing its two fixed-size `MAXSTACK` arrays with growable `Vec`s but
//! keeping the same depth ceiling as a deliberate `Ovflow` guard.

use crate::error::{ErrorKind, ParseError};
use crate::lexer::token::{Token, TokenKind};

/// Matches the reference engine's `MAXSTACK`: both the group-nesting stack
/// and the pending-pipe stack are bounded so a pathological pattern (e.g.
/// hundreds of nested groups) fails with `Ovflow` rather than growing
/// without limit.
const MAX_STACK_DEPTH: usize = 256;

/// The alternation split point(s) for one group scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipeSpan {
    /// Token index just past the most recent `|` in this scope.
    pub mid: Option<usize>,
    /// Token index of the `)` that closed this scope's alternation, once known.
    pub end: Option<usize>,
}

/// The structural tables produced by one pass over a token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// `suffixes[i] == Some(j)` means token `j` is the quantifier trailing
    /// the atom/group opened at `i`.
    pub suffixes: Vec<Option<usize>>,
    /// Indexed by group scope id (`0` for top level, `lp_index + 1` for a
    /// nested group).
    pub pipes: Vec<PipeSpan>,
}

/// Build the suffix and alternation tables for `tokens`.
#[must_use = "an unused analysis duplicates the pass that produced it"]
pub fn analyze(tokens: &[Token]) -> Result<Analysis, ParseError> {
    let mut suffixes = vec![None; tokens.len()];
    let mut pipes = vec![PipeSpan::default(); tokens.len() + 1];
    let mut group_stack: Vec<usize> = Vec::new();
    let mut pipe_stack: Vec<usize> = Vec::new();
    let mut prev: Option<usize> = None;

    for (i, t) in tokens.iter().enumerate() {
        match t.kind {
            TokenKind::Lp => {
                if group_stack.len() + 1 >= MAX_STACK_DEPTH {
                    return Err(ParseError::new(ErrorKind::Ovflow, t.pos));
                }
                group_stack.push(i);
                prev = None;
            }
            TokenKind::Rp => {
                let lp = group_stack
                    .pop()
                    .ok_or_else(|| ParseError::new(ErrorKind::Syntax, t.pos))?;
                prev = Some(lp);
                if let Some(pp) = pipe_stack.pop() {
                    pipes[pp].end = Some(i);
                }
            }
            TokenKind::Pipe => {
                if i + 1 == tokens.len() {
                    return Err(ParseError::new(ErrorKind::Syntax, t.pos));
                }
                if pipe_stack.len() + 1 >= MAX_STACK_DEPTH {
                    return Err(ParseError::new(ErrorKind::Ovflow, t.pos));
                }
                let scope = group_stack.last().map_or(0, |&lp| lp + 1);
                pipes[scope].mid = Some(i + 1);
                pipe_stack.push(scope);
                prev = None;
            }
            kind if kind.is_suffix() => match prev {
                None => {
                    // A leading/dangling `?` with nothing to quantify is a
                    // harmless no-op; every other dangling suffix is an error.
                    if kind == TokenKind::Q {
                        continue;
                    }
                    return Err(ParseError::new(ErrorKind::Syntax, t.pos));
                }
                Some(target) => {
                    suffixes[target] = Some(i);
                    prev = None;
                }
            },
            _ => prev = Some(i),
        }
    }

    Ok(Analysis { suffixes, pipes })
}
