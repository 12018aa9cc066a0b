//! # Rune I/O
//!
//! Converts a pattern from UTF-8 text into a flat sequence of Unicode scalar
//! values ("runes") and classifies them for the shorthand classes (`\s \w
//! \d` and their negations). All offsets elsewhere in the crate — token
//! positions, error positions, match lengths — are rune counts, never byte
//! offsets, so that a single index space is shared from the lexer all the
//! way down to the matcher.

/// Decode a pattern into its rune sequence.
///
/// LC-3 assembly is strictly ASCII so the teacher's `Cursor` can index bytes
/// directly; regex patterns are not, so we pay the one upfront allocation
/// here rather than re-deriving rune boundaries at every cursor step.
#[must_use]
pub fn decode(pattern: &str) -> Vec<char> {
    pattern.chars().collect()
}

/// Is this rune a `\d` digit?
#[inline]
#[must_use]
pub fn is_digit(r: char) -> bool {
    r.is_ascii_digit()
}

/// Is this rune a `\w` word character (alphanumeric or underscore)?
#[inline]
#[must_use]
pub fn is_word(r: char) -> bool {
    r.is_alphanumeric() || r == '_'
}

/// Is this rune a `\s` whitespace character?
#[inline]
#[must_use]
pub fn is_space(r: char) -> bool {
    r.is_whitespace()
}

/// Classify `r` against the shorthand class letter (`s`, `w`, or `d`,
/// already lower-cased by the caller).
#[must_use]
pub fn matches_class(class: char, r: char) -> bool {
    match class {
        's' => is_space(r),
        'w' => is_word(r),
        'd' => is_digit(r),
        _ => false,
    }
}

/// Case-fold a rune for `ICASE` comparisons.
///
/// Folding a full Unicode rune can expand to more than one scalar value
/// (e.g. the German sharp s); callers that need a single comparable rune
/// use [`fold_simple`], which only folds the common single-rune case and
/// otherwise returns the rune unchanged.
#[must_use]
pub fn fold_simple(r: char) -> char {
    let mut it = r.to_lowercase();
    match (it.next(), it.next()) {
        (Some(folded), None) => folded,
        _ => r,
    }
}
