//! # Matcher Lifecycle
//!
//! The thin wrapper around a JIT back-end's compiled output. This crate
//! never emits machine code itself — [`Backend`] is the seam a native code
//! generator plugs into — but it owns the resulting handle end to end:
//! acquired in [`Matcher::compile`], released on [`Drop`].
//!
//! Grounded on `rejit_compile_instrs`/`rejit_match`/`rejit_search`/
//! `rejit_free_matcher` in the reference implementation, with the raw
//! `mmap`/`munmap` pair replaced by an opaque `CompiledProgram` the back-end
//! owns and [`Matcher`] merely holds a handle to.

use crate::parser::ast::{Flags, Instr, InstrKind, ParseResult};

/// One capture group's match extent, in rune offsets into the search input.
/// `None` means the group did not participate in the match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Group {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

/// A back-end's compiled output: a callable native entry point plus
/// whatever resource backs it. Opaque to this crate — only the back-end
/// that produced it knows how to invoke or release it.
pub trait CompiledProgram {
    /// Run the compiled matcher starting at the beginning of `input`,
    /// filling `groups` on success. Returns the match length in runes, or
    /// `None` on no match. Mirrors `rejit_match`'s `-1` sentinel as `None`.
    fn try_match(&self, input: &[char], groups: &mut [Group]) -> Option<usize>;
}

/// The JIT back-end contract this crate compiles against but never
/// implements. Given the flat instruction array and the structural metadata
/// the parser computed, a back-end returns a runnable [`CompiledProgram`],
/// or `None` on its own failure (out of memory, unsupported construct).
pub trait Backend {
    fn compile(
        &self,
        instrs: &[Instr],
        max_depth: usize,
        flags: Flags,
    ) -> Option<Box<dyn CompiledProgram>>;
}

/// An immutable, compiled matcher. Safe to share across threads — each
/// `try_match`/`search` call only ever writes through the caller-supplied
/// `groups` buffer — provided distinct calls use distinct buffers.
pub struct Matcher {
    program: Box<dyn CompiledProgram>,
    groups: usize,
    flags: Flags,
}

impl Matcher {
    /// Hand a completed parse off to `backend` for compilation. Returns
    /// `None` if the back-end itself fails (the core has nothing more to
    /// say about why — that detail belongs to the back-end).
    #[must_use = "a compiled matcher that is never matched against duplicates the compile work"]
    #[tracing::instrument(skip(result, backend), fields(groups = result.groups, max_depth = result.max_depth))]
    pub fn compile(result: &ParseResult, backend: &impl Backend) -> Option<Matcher> {
        let program = backend.compile(&result.instrs, result.max_depth, result.flags)?;
        tracing::debug!(instrs = result.instrs.len(), "compiled matcher");
        Some(Matcher { program, groups: result.groups, flags: result.flags })
    }

    #[must_use]
    pub fn groups(&self) -> usize {
        self.groups
    }

    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Match anchored at the start of `input`. `groups` must have at least
    /// [`Matcher::groups`] entries; entries beyond what the pattern captured
    /// are left untouched.
    #[must_use]
    pub fn try_match(&self, input: &[char], groups: &mut [Group]) -> Option<usize> {
        self.program.try_match(input, groups)
    }

    /// Scan forward one rune at a time until a match is found or the input
    /// is exhausted, mirroring `rejit_search`'s loop. Returns `(len, end)`
    /// where `end` is one past the match, in rune offsets into `input`.
    #[must_use]
    pub fn search(&self, input: &[char], groups: &mut [Group]) -> Option<(usize, usize)> {
        for start in 0..=input.len() {
            if !groups.is_empty() {
                groups.fill(Group::default());
            }
            if let Some(len) = self.program.try_match(&input[start..], groups) {
                return Some((len, start + len));
            }
        }
        None
    }
}

/// Undo a back-end's transient `SKIP` bias on `instrs[at]` and every
/// instruction it structurally owns. Idempotent: calling it on an
/// already-clean instruction is a no-op.
///
/// The reference `unskip` only flattens a `RJ_IGROUP`'s children through an
/// explicit loop and otherwise recurses just one step into `value`/`instr+1`
/// — which under-visits a multi-instruction `OR` arm or look-around body.
/// This walks every compound kind's full span the same way
/// [`crate::lengths::match_len`] does (via `extent_end`), so a capturing
/// group, alternation, or look-around all get every constituent visited
/// regardless of how many instructions it spans.
pub fn unskip(instrs: &mut [Instr], at: usize) {
    if !instrs[at].skipped {
        return;
    }
    instrs[at].skipped = false;

    let span_end = match &instrs[at].kind {
        InstrKind::Group { end }
        | InstrKind::Cgroup { end, .. }
        | InstrKind::Or { end, .. }
        | InstrKind::Lahead { end }
        | InstrKind::Nlahead { end }
        | InstrKind::Lbehind { end }
        | InstrKind::Nlbehind { end } => Some(*end),
        InstrKind::Opt
        | InstrKind::Star
        | InstrKind::Plus
        | InstrKind::Rep { .. }
        | InstrKind::Mstar
        | InstrKind::Mplus
        | InstrKind::Mrep { .. } => {
            unskip(instrs, at + 1);
            None
        }
        _ => None,
    };

    if let Some(end) = span_end {
        let mut child = at + 1;
        while child < end {
            let next = crate::lengths::extent_end(instrs, child);
            unskip(instrs, child);
            child = next;
        }
    }
}
