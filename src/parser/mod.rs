//! # Parser
//!
//! Lowers a token stream into the flat `Instr` array a JIT back-end walks,
//! using the structural analyzer's (C3) suffix/pipe tables to know where
//! quantifiers and alternations attach without re-discovering them here.
//!
//! ## Group/Look-around Opening
//!
//! `(` may open five different things depending on what follows it:
//! `(?:` a non-capturing group, `(?=`/`(?!` look-ahead, `(?<=`/`(?<!`
//! look-behind, `(?si...)`-style flag clusters (consumed entirely, no
//! instruction emitted), or — the default — a capturing group. Each
//! variant is detected by peeking at the coalesced `Word` token that the
//! tokenizer produced for whatever follows `?` (since `:`, `=`, `<` etc.
//! are ordinary runes to the tokenizer); the matched marker prefix is then
//! stripped from that token so the remaining text parses as ordinary
//! content on a later iteration.
//!
//! ## Deferred Length Checks
//!
//! Inside a look-behind, every instruction must resolve to a fixed length.
//! Most kinds are trivially fixed and need no check; `{m,n}` repetition is
//! the one exception whose own length depends on a child that hasn't been
//! emitted yet when the quantifier instruction is created, so its check is
//! deferred to the end of the same token's processing (grounded on the
//! reference's `lb_later` flag) — here done by holding the instruction's
//! own index rather than recomputing a position from the array's length.

pub mod ast;


use crate::analyzer::Analysis;
use crate::error::{ErrorKind, ParseError};
use crate::lexer::token::{Token, TokenKind};
use crate::lengths;
use crate::sets;
use ast::{Flags, Instr, InstrKind, ParseResult};

struct PendingOr {
    instr_idx: usize,
    mid_token: usize,
    end_token: Option<usize>,
}

/// Lower `tokens` (with `analysis`'s precomputed suffix/pipe tables) into a
/// complete instruction array. `pattern` is the decoded rune buffer the
/// tokens point into; `flags` are the flags already in effect before
/// parsing begins (an inline `(?i)`/`(?s)` cluster merges into them).
#[must_use = "a parse result with no consumer duplicates the work that built it"]
pub fn parse(
    pattern: &[char],
    tokens: &[Token],
    analysis: &Analysis,
    mut flags: Flags,
) -> Result<ParseResult, ParseError> {
    let mut tokens: Vec<Token> = tokens.to_vec();
    let mut instrs: Vec<Instr> = Vec::with_capacity(tokens.len() + 1);
    let mut groups = 0usize;
    let mut max_depth = 0usize;
    let mut group_stack: Vec<usize> = Vec::new();
    let mut pipe_stack: Vec<PendingOr> = Vec::new();
    let mut lookbehind_depth = 0usize;

    let mut i = 0usize;
    'tokens: while i < tokens.len() {
        let t = tokens[i];
        let mut lb_later: Option<usize> = None;

        if group_stack.len() > max_depth {
            max_depth = group_stack.len();
        }

        if let Some(suffix_idx) = analysis.suffixes[i] {
            let suf_tok = tokens[suffix_idx];
            let mut kind = match suf_tok.kind {
                TokenKind::Star => InstrKind::Star,
                TokenKind::Plus => InstrKind::Plus,
                TokenKind::Q => InstrKind::Opt,
                TokenKind::Rep => {
                    let (min, max) = parse_rep_bounds(pattern, suf_tok)?;
                    InstrKind::Rep { min, max }
                }
                _ => unreachable!("the structural analyzer only records suffix-band tokens"),
            };

            if suffix_idx + 1 < tokens.len()
                && tokens[suffix_idx + 1].kind == TokenKind::Q
                && kind != InstrKind::Opt
            {
                kind = match kind {
                    InstrKind::Star => InstrKind::Mstar,
                    InstrKind::Plus => InstrKind::Mplus,
                    InstrKind::Rep { min, max } => InstrKind::Mrep { min, max },
                    other => other,
                };
            }

            let is_rep = matches!(kind, InstrKind::Rep { .. } | InstrKind::Mrep { .. });
            let idx = instrs.len();
            instrs.push(kind.into_instr());
            if is_rep {
                lb_later = Some(idx);
            } else {
                // Anchored at the quantified atom's own position, not the
                // suffix's — a pattern like `(?<=a+)x` should point at `a`.
                lbh_check(&mut instrs, idx, lookbehind_depth, t.pos)?;
            }
        }

        if let Some(top) = pipe_stack.last() {
            if top.mid_token == i {
                let idx = top.instr_idx;
                patch_or_mid(&mut instrs, idx, instrs.len());
            } else if top.end_token == Some(i) {
                let top = pipe_stack.pop().expect("just peeked");
                // Patch `end` before computing length: `match_len` walks the
                // `Or`'s arms via its `mid`/`end` fields, so they must be a
                // valid, bounded range first.
                patch_or_end(&mut instrs, top.instr_idx, instrs.len());
                lbh_check(&mut instrs, top.instr_idx, lookbehind_depth, tokens[top.mid_token].pos)?;
            }
        }

        if let Some(mid) = analysis.pipes[i].mid {
            let end = analysis.pipes[i].end;
            let idx = instrs.len();
            instrs.push(InstrKind::Or { mid: usize::MAX, end: usize::MAX }.into_instr());
            pipe_stack.push(PendingOr { instr_idx: idx, mid_token: mid, end_token: end });
        }

        match t.kind {
            TokenKind::Word => {
                let runes = unescape_word(&pattern[t.pos..t.pos + t.len]);
                instrs.push(InstrKind::Word(runes).into_instr());
            }
            TokenKind::Caret => instrs.push(InstrKind::Begin.into_instr()),
            TokenKind::Dollar => instrs.push(InstrKind::End.into_instr()),
            TokenKind::Dot => instrs.push(InstrKind::Dot.into_instr()),
            TokenKind::Set { negated } => {
                let body = &pattern[t.pos..t.pos + t.len];
                let expanded = sets::expand(body, t.pos)?;
                instrs.push(
                    (if negated { InstrKind::Nset(expanded) } else { InstrKind::Set(expanded) })
                        .into_instr(),
                );
            }
            TokenKind::Ms => {
                let letter = pattern[t.pos + 1];
                instrs.push(
                    InstrKind::Uset {
                        class: letter.to_ascii_lowercase(),
                        inverted: letter.is_ascii_uppercase(),
                    }
                    .into_instr(),
                );
            }
            TokenKind::Back => {
                let digit = pattern[t.pos + 1] as u32 - '0' as u32;
                let capture = digit.wrapping_sub(1) as usize;
                let idx = instrs.len();
                instrs.push(InstrKind::Back(capture).into_instr());
                lbh_check(&mut instrs, idx, lookbehind_depth, t.pos)?;
            }
            TokenKind::Lp => {
                match classify_group_open(pattern, &tokens, i)? {
                    GroupOpen::FlagsOnly { start, len } => {
                        for &letter in &pattern[start..start + len] {
                            flags = flags.merge_letter(letter);
                        }
                        i += 4;
                        continue 'tokens;
                    }
                    GroupOpen::NonCapturing => {
                        strip_marker(&mut tokens, i + 2, 1);
                        i += 1;
                        push_group(&mut instrs, &mut group_stack, InstrKind::Group { end: 0 });
                    }
                    GroupOpen::Lookahead => {
                        strip_marker(&mut tokens, i + 2, 1);
                        i += 1;
                        push_group(&mut instrs, &mut group_stack, InstrKind::Lahead { end: 0 });
                    }
                    GroupOpen::NegLookahead => {
                        strip_marker(&mut tokens, i + 2, 1);
                        i += 1;
                        push_group(&mut instrs, &mut group_stack, InstrKind::Nlahead { end: 0 });
                    }
                    GroupOpen::Lookbehind { negative } => {
                        strip_marker(&mut tokens, i + 2, 2);
                        lookbehind_depth += 1;
                        let kind = if negative {
                            InstrKind::Nlbehind { end: 0 }
                        } else {
                            InstrKind::Lbehind { end: 0 }
                        };
                        push_group(&mut instrs, &mut group_stack, kind);
                    }
                    GroupOpen::Capturing => {
                        let capture = groups;
                        groups += 1;
                        push_group(&mut instrs, &mut group_stack, InstrKind::Cgroup { end: 0, capture });
                    }
                }
            }
            TokenKind::Rp => {
                let group_idx = group_stack
                    .pop()
                    .ok_or_else(|| ParseError::new(ErrorKind::Ubound, t.pos))?;
                lbh_check(&mut instrs, group_idx, lookbehind_depth, t.pos)?;
                if matches!(instrs[group_idx].kind, InstrKind::Lbehind { .. } | InstrKind::Nlbehind { .. }) {
                    lookbehind_depth -= 1;
                }
                let end = instrs.len();
                patch_end(&mut instrs, group_idx, end);
            }
            // These token kinds never drive their own instruction: a
            // suffix token was already turned into an instruction (if
            // any) when the main loop visited the *atom* it quantifies,
            // via `analysis.suffixes`; a `|` likewise only matters through
            // `analysis.pipes`/the pending-OR stack above. Reaching one of
            // these here means visiting its own token index in the main
            // walk, which is a deliberate no-op.
            TokenKind::Star | TokenKind::Plus | TokenKind::Q | TokenKind::Rep | TokenKind::Pipe => {}
        }

        if let Some(idx) = lb_later {
            lbh_check(&mut instrs, idx, lookbehind_depth, t.pos)?;
        }

        i += 1;
    }

    if !group_stack.is_empty() {
        return Err(ParseError::new(ErrorKind::Ubound, pattern.len()));
    }

    let terminator = instrs.len();
    while let Some(top) = pipe_stack.pop() {
        patch_or_end(&mut instrs, top.instr_idx, terminator);
    }
    instrs.push(InstrKind::Null.into_instr());

    Ok(ParseResult { instrs, groups, max_depth, flags })
}

fn push_group(instrs: &mut Vec<Instr>, group_stack: &mut Vec<usize>, kind: InstrKind) {
    let idx = instrs.len();
    instrs.push(kind.into_instr());
    group_stack.push(idx);
}

fn lbh_check(
    instrs: &mut [Instr],
    idx: usize,
    lookbehind_depth: usize,
    err_pos: usize,
) -> Result<(), ParseError> {
    if lookbehind_depth > 0 && lengths::match_len(instrs, idx).is_none() {
        return Err(ParseError::new(ErrorKind::Lbvar, err_pos));
    }
    Ok(())
}

fn patch_or_mid(instrs: &mut [Instr], idx: usize, mid: usize) {
    if let InstrKind::Or { mid: m, .. } = &mut instrs[idx].kind {
        *m = mid;
    }
}

fn patch_or_end(instrs: &mut [Instr], idx: usize, end: usize) {
    if let InstrKind::Or { end: e, .. } = &mut instrs[idx].kind {
        *e = end;
    }
}

fn patch_end(instrs: &mut [Instr], idx: usize, end: usize) {
    match &mut instrs[idx].kind {
        InstrKind::Group { end: e }
        | InstrKind::Cgroup { end: e, .. }
        | InstrKind::Lahead { end: e }
        | InstrKind::Nlahead { end: e }
        | InstrKind::Lbehind { end: e }
        | InstrKind::Nlbehind { end: e } => *e = end,
        _ => unreachable!("the group stack only ever holds group/look-around instructions"),
    }
}

/// Shift a token's `pos`/`len` forward by `n` runes — how a `(?X...)`
/// cluster's marker prefix (`:`, `=`, `<=`, ...) is peeled off the
/// coalesced `Word` token that follows it, leaving the remaining text to
/// parse as ordinary content on a later iteration.
fn strip_marker(tokens: &mut [Token], idx: usize, n: usize) {
    tokens[idx].pos += n;
    tokens[idx].len -= n;
}

/// Reconstruct a coalesced `WORD` token's literal content from its raw
/// `pos..pos+len` span, dropping any backslash the tokenizer consumed as a
/// one-shot escape introducer without folding it out of the span (see
/// `lexer::push_word`). A `\` here is always such an introducer: the
/// tokenizer never lets a bare backslash become part of a `WORD` span any
/// other way, so this rule applies uniformly, including to an escaped
/// backslash (`\\`) — the first backslash is dropped, the second kept.
fn unescape_word(span: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(span.len());
    let mut i = 0;
    while i < span.len() {
        if span[i] == '\\' && i + 1 < span.len() {
            out.push(span[i + 1]);
            i += 2;
        } else {
            out.push(span[i]);
            i += 1;
        }
    }
    out
}

enum GroupOpen {
    NonCapturing,
    Lookahead,
    NegLookahead,
    Lookbehind { negative: bool },
    FlagsOnly { start: usize, len: usize },
    Capturing,
}

/// Peek at what follows `(` at token index `i` and classify which of the
/// five group/look-around/flag-cluster shapes it opens.
fn classify_group_open(pattern: &[char], tokens: &[Token], i: usize) -> Result<GroupOpen, ParseError> {
    let is_cluster = i + 2 < tokens.len()
        && tokens[i + 1].kind == TokenKind::Q
        && tokens[i + 2].kind == TokenKind::Word;

    if !is_cluster {
        return Ok(GroupOpen::Capturing);
    }

    let marker_tok = tokens[i + 2];
    let marker = pattern[marker_tok.pos];

    match marker {
        ':' => Ok(GroupOpen::NonCapturing),
        '=' => Ok(GroupOpen::Lookahead),
        '!' => Ok(GroupOpen::NegLookahead),
        '<' => {
            if marker_tok.len < 2 {
                return Err(ParseError::new(ErrorKind::Syntax, marker_tok.pos + 1));
            }
            match pattern[marker_tok.pos + 1] {
                '=' => Ok(GroupOpen::Lookbehind { negative: false }),
                '!' => Ok(GroupOpen::Lookbehind { negative: true }),
                _ => Err(ParseError::new(ErrorKind::Syntax, marker_tok.pos + 1)),
            }
        }
        _ if i + 3 < tokens.len() && tokens[i + 3].kind == TokenKind::Rp => {
            Ok(GroupOpen::FlagsOnly { start: marker_tok.pos, len: marker_tok.len })
        }
        _ => Ok(GroupOpen::Capturing),
    }
}

/// Parse a `{m}`/`{m,n}` suffix token's decimal content. `tok.pos` is the
/// opening `{`; the content runs from `tok.pos + 1` to `tok.pos + tok.len - 1`
/// (exclusive of both braces).
fn parse_rep_bounds(pattern: &[char], tok: Token) -> Result<(usize, usize), ParseError> {
    let base = tok.pos + 1;
    let body = &pattern[base..tok.pos + tok.len - 1];

    let (min, idx) = scan_uint(body, 0, base)?;
    if idx == body.len() {
        return Ok((min, min));
    }
    if body[idx] != ',' {
        return Err(ParseError::new(ErrorKind::Int, base + idx));
    }
    let (max, idx2) = scan_uint(body, idx + 1, base)?;
    if idx2 != body.len() {
        return Err(ParseError::new(ErrorKind::Int, base + idx2));
    }
    Ok((min, max))
}

fn scan_uint(body: &[char], start: usize, base_pos: usize) -> Result<(usize, usize), ParseError> {
    let mut idx = start;
    let mut n = 0usize;
    while idx < body.len() && body[idx].is_ascii_digit() {
        // Saturate rather than overflow-panic: a syntactically valid but
        // oversized `{n}` should clamp, matching the original's strtol.
        n = n.saturating_mul(10).saturating_add(body[idx] as usize - '0' as usize);
        idx += 1;
    }
    if idx == start {
        return Err(ParseError::new(ErrorKind::Int, base_pos + idx));
    }
    Ok((n, idx))
}
