//! # Character Class Expansion
//!
//! Expands a `[...]` token body into the explicit set of runes it enumerates.
//!
//! Mirrors the reference `expand_set`: a `-` between two runes expands to
//! the inclusive range between them (`a-c` becomes `a`, `b`, `c`); `\`
//! escapes the following rune literally, including inside a range endpoint;
//! a `-` that can't form a range (leading, trailing, or immediately after
//! another range) is kept as a literal hyphen.

use crate::error::{ErrorKind, ParseError};

/// Expand a class body (the runes between `[`/`[^` and `]`, as sliced by the
/// tokenizer) into the flat list of runes it matches.
///
/// `base_pos` is the class body's rune offset in the original pattern, used
/// to anchor a `Range` error at the offending `-`.
#[must_use = "an expanded set with no consumer is wasted work"]
pub fn expand(body: &[char], base_pos: usize) -> Result<Vec<char>, ParseError> {
    let mut out = Vec::with_capacity(body.len());
    let mut escaped = false;
    let mut i = 0;

    while i < body.len() {
        let r = body[i];

        if escaped {
            out.push(r);
            escaped = false;
            i += 1;
            continue;
        }

        if r == '\\' {
            escaped = true;
            i += 1;
            continue;
        }

        if r == '-' && i > 0 && i + 1 < body.len() {
            let start = body[i - 1];
            let end = body[i + 1];
            if start > end {
                return Err(ParseError::new(ErrorKind::Range, base_pos + i));
            }
            // `start` is already in `out` from the previous iteration;
            // push the rest of the range, `start` exclusive.
            let mut c = start as u32 + 1;
            while c <= end as u32 {
                if let Some(ch) = char::from_u32(c) {
                    out.push(ch);
                }
                c += 1;
            }
            i += 2; // consumed '-' and the end rune
            continue;
        }

        out.push(r);
        i += 1;
    }

    Ok(out)
}
