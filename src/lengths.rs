//! # Match-Length Analyzer
//!
//! A pure function over an instruction subtree that computes its fixed
//! match length, or signals that the length is variable. Required by
//! look-behind validation (a look-behind body must be fixed-length) and by
//! the `Rep`/`Mrep` case here, which needs its child's length to compute
//! its own.
//!
//! Mirrors `rejit_match_len`, replacing its `-1` sentinel with `None` and
//! its in-place pointer writes with index writes into `instrs`.

use crate::parser::ast::{Instr, InstrKind};

/// One-past the end of the subtree rooted at `instrs[idx]`, following the
/// same `value`/`value2`-style pointers the instruction already carries.
/// Also used by [`crate::matcher::unskip`] to walk the same subtree shape.
pub(crate) fn extent_end(instrs: &[Instr], idx: usize) -> usize {
    match &instrs[idx].kind {
        InstrKind::Group { end } | InstrKind::Cgroup { end, .. } => *end,
        InstrKind::Or { end, .. } => *end,
        InstrKind::Lahead { end }
        | InstrKind::Nlahead { end }
        | InstrKind::Lbehind { end }
        | InstrKind::Nlbehind { end } => *end,
        InstrKind::Opt
        | InstrKind::Star
        | InstrKind::Plus
        | InstrKind::Rep { .. }
        | InstrKind::Mstar
        | InstrKind::Mplus
        | InstrKind::Mrep { .. } => extent_end(instrs, idx + 1),
        _ => idx + 1,
    }
}

/// Sum the fixed lengths of the top-level instructions spanning
/// `[start, end)`, marking each as a constituent of `owner`. Returns `None`
/// (variable) as soon as any constituent is variable, but still visits and
/// tags every constituent so `len_from` stays accurate.
fn span_len(instrs: &mut [Instr], start: usize, end: usize, owner: usize) -> Option<usize> {
    let mut total = Some(0);
    let mut child = start;
    while child < end {
        let child_len = match_len(instrs, child);
        instrs[child].len_from = Some(owner);
        total = match (total, child_len) {
            (Some(t), Some(c)) => Some(t + c),
            _ => None,
        };
        child = extent_end(instrs, child);
    }
    total
}

/// Compute the fixed match length of `instrs[idx]`, recording its own
/// result in `instrs[idx].len` and back-pointing any descended-into child
/// to `idx` via `len_from`.
#[must_use = "a computed length that is discarded duplicates the recursion that built it"]
pub fn match_len(instrs: &mut [Instr], idx: usize) -> Option<usize> {
    let len = match instrs[idx].kind.clone() {
        InstrKind::Word(runes) => Some(runes.len()),
        InstrKind::Set(_) | InstrKind::Nset(_) | InstrKind::Dot | InstrKind::Uset { .. } => Some(1),
        InstrKind::Opt | InstrKind::Star | InstrKind::Plus | InstrKind::Mstar | InstrKind::Mplus => None,
        InstrKind::Rep { min, max } | InstrKind::Mrep { min, max } => {
            let child = idx + 1;
            let child_len = match_len(instrs, child);
            instrs[child].len_from = Some(idx);
            if min == max {
                child_len.map(|c| c * min)
            } else {
                None
            }
        }
        InstrKind::Lahead { .. }
        | InstrKind::Nlahead { .. }
        | InstrKind::Lbehind { .. }
        | InstrKind::Nlbehind { .. }
        | InstrKind::Begin
        | InstrKind::End => Some(0),
        InstrKind::Group { end } => span_len(instrs, idx + 1, end, idx),
        InstrKind::Cgroup { end, .. } => span_len(instrs, idx + 1, end, idx),
        InstrKind::Or { mid, end } => {
            let left = span_len(instrs, idx + 1, mid, idx);
            let right = span_len(instrs, mid, end, idx);
            match (left, right) {
                (Some(l), Some(r)) if l == r => Some(l),
                _ => None,
            }
        }
        // The referenced group's runtime length isn't known statically.
        InstrKind::Back(_) => None,
        InstrKind::Null => Some(0),
    };
    instrs[idx].len = len;
    len
}
