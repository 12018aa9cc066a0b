//! # Token Types
//!
//! Defines all token kinds the tokenizer emits.
//!
//! ## Token Structure
//!
//! Each token contains:
//! - `kind`: the token type (atom, structural, suffix, or anchor)
//! - `pos`: the rune offset into the pattern where the token starts
//! - `len`: the token's length, in runes
//!
//! Tokens carry no owned text. The parser re-reads the relevant slice of
//! the decoded pattern via `pos`/`len` when it needs the literal content
//! (a `WORD`'s characters, a `SET`'s class body, a shorthand's selector
//! letter, a back-reference's digit) — this keeps tokenization a single
//! allocation-free pass, and mirrors how the original tokenizer stores a
//! pointer into the source rune buffer rather than a copy.

/// A single lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Rune offset into the decoded pattern.
    pub pos: usize,
    /// Length in runes.
    pub len: usize,
}

/// Token kinds, grouped the way `spec.md` groups them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // === Atoms ===
    /// A literal run; adjacent `Word` tokens are coalesced by the tokenizer.
    Word,
    Dot,
    /// `[...]`. `negated` reflects a leading `^` right after `[`.
    Set { negated: bool },
    /// `\s \S \w \W \d \D`.
    Ms,
    /// `\N` for a single ASCII digit `N`.
    Back,

    // === Structural ===
    Lp,
    Rp,
    Pipe,

    // === Suffixes (quantifiers) ===
    Star,
    Plus,
    Q,
    /// `{m}` or `{m,n}`.
    Rep,

    // === Anchors ===
    Caret,
    Dollar,
}

impl TokenKind {
    /// Suffix-band tokens: the quantifiers that can trail an atom.
    #[must_use]
    pub fn is_suffix(self) -> bool {
        matches!(
            self,
            TokenKind::Star | TokenKind::Plus | TokenKind::Q | TokenKind::Rep
        )
    }

    /// Atoms and groups/look-arounds can be the left operand of a suffix or
    /// `prev` in the structural analyzer; `Lp`/`Rp`/`Pipe` and suffixes
    /// themselves cannot.
    #[must_use]
    pub fn is_quantifiable(self) -> bool {
        !matches!(
            self,
            TokenKind::Lp
                | TokenKind::Rp
                | TokenKind::Pipe
                | TokenKind::Star
                | TokenKind::Plus
                | TokenKind::Q
                | TokenKind::Rep
        )
    }
}
