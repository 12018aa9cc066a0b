use quickcheck_macros::quickcheck;

use rejit_core::error::ErrorKind;
use rejit_core::lexer::token::TokenKind;
use rejit_core::parser::ast::{Flags, InstrKind};
use rejit_core::{lexer, parse, rune};

fn ok(pattern: &str) -> rejit_core::parser::ast::ParseResult {
    parse(pattern, Flags::default()).unwrap_or_else(|e| panic!("{pattern:?} failed: {e}"))
}

fn err_kind(pattern: &str) -> ErrorKind {
    parse(pattern, Flags::default())
        .unwrap_err_or_else(|| panic!("{pattern:?} unexpectedly succeeded"))
}

// `Result` has no `unwrap_err_or_else`; this is the one-line local helper
// the scenarios below actually need.
trait UnwrapErrOrElse<T, E> {
    fn unwrap_err_or_else(self, f: impl FnOnce() -> E) -> E;
}
impl<T, E> UnwrapErrOrElse<T, E> for Result<T, E> {
    fn unwrap_err_or_else(self, f: impl FnOnce() -> E) -> E {
        match self {
            Err(e) => e,
            Ok(_) => f(),
        }
    }
}

#[test]
fn scenario_a_plus_b() {
    let result = ok("a+b");
    assert_eq!(
        result.instrs.iter().map(|i| &i.kind).collect::<Vec<_>>(),
        vec![
            &InstrKind::Plus,
            &InstrKind::Word(vec!['a']),
            &InstrKind::Word(vec!['b']),
            &InstrKind::Null,
        ]
    );
    assert_eq!(result.groups, 0);
    assert_eq!(result.max_depth, 0);
}

#[test]
fn scenario_grouped_alternation_plus() {
    let result = ok("(ab|cd)+");
    assert_eq!(result.groups, 1);
    assert_eq!(result.max_depth, 1);
    match &result.instrs[1].kind {
        InstrKind::Cgroup { end, capture } => {
            assert_eq!(*capture, 0);
            assert_eq!(*end, 4);
        }
        other => panic!("expected Cgroup, got {other:?}"),
    }
    match &result.instrs[2].kind {
        InstrKind::Or { mid, end } => {
            assert_eq!(*mid, 3);
            assert_eq!(*end, 4);
        }
        other => panic!("expected Or, got {other:?}"),
    }
}

#[test]
fn scenario_set_with_trailing_caret() {
    let result = ok("[a-c^]");
    assert_eq!(result.instrs[0].kind, InstrKind::Set(vec!['a', 'b', 'c', '^']));
}

#[test]
fn scenario_inline_icase_flag() {
    let result = ok("(?i)Foo");
    assert!(result.flags.icase);
    assert_eq!(result.instrs[0].kind, InstrKind::Word(vec!['F', 'o', 'o']));
}

#[test]
fn scenario_lookbehind_fixed_length() {
    let result = ok("(?<=ab)cd");
    match &result.instrs[0].kind {
        InstrKind::Lbehind { end } => assert_eq!(*end, 2),
        other => panic!("expected Lbehind, got {other:?}"),
    }
    assert_eq!(result.instrs[2].kind, InstrKind::Word(vec!['c', 'd']));
}

#[test]
fn scenario_lookbehind_variable_length_is_rejected() {
    let err = parse("(?<=a+)x", Flags::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lbvar);
    assert_eq!(err.pos, 4);
}

#[test]
fn scenario_minimal_bounded_repetition() {
    let result = ok("a{2,5}?");
    assert_eq!(result.instrs[0].kind, InstrKind::Mrep { min: 2, max: 5 });
    assert_eq!(result.instrs[1].kind, InstrKind::Word(vec!['a']));
}

#[test]
fn scenario_back_reference() {
    let result = ok("\\3");
    assert_eq!(result.instrs[0].kind, InstrKind::Back(2));
}

#[test]
fn scenario_inverted_range_is_an_error() {
    let err = parse("[z-a]", Flags::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Range);
}

#[test]
fn scenario_deeply_nested_groups_overflow() {
    let pattern = "(".repeat(300) + &")".repeat(300);
    let err = parse(&pattern, Flags::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Ovflow);
}

// --- Property tests (spec.md §8 invariants 1-6) ---

#[quickcheck]
fn invariant_coalescing_yields_one_word_token(letters: Vec<char>) -> bool {
    let plain: Vec<char> = letters
        .into_iter()
        .filter(|c| c.is_alphanumeric() && !matches!(c, '(' | ')' | '[' | ']' | '{' | '}'))
        .collect();
    if plain.is_empty() {
        return true;
    }
    let pattern: String = plain.iter().collect();
    let runes = rune::decode(&pattern);
    let tokens = match lexer::tokenize(&runes) {
        Ok(t) => t,
        Err(_) => return false,
    };
    tokens.len() == 1 && tokens[0].kind == TokenKind::Word && tokens[0].len == plain.len()
}

#[test]
fn invariant_group_balance() {
    for pattern in ["(a)(b)", "(?:a)(b)", "(a(b)(c))", "(?=a)(b)"] {
        let result = ok(pattern);
        let open_parens = pattern.matches('(').count();
        let flag_clusters = 0; // none of these fixtures use a flags-only cluster
        let group_like = result
            .instrs
            .iter()
            .filter(|i| {
                matches!(
                    i.kind,
                    InstrKind::Group { .. }
                        | InstrKind::Cgroup { .. }
                        | InstrKind::Lahead { .. }
                        | InstrKind::Nlahead { .. }
                        | InstrKind::Lbehind { .. }
                        | InstrKind::Nlbehind { .. }
                )
            })
            .count();
        assert_eq!(group_like, open_parens - flag_clusters, "pattern {pattern:?}");
    }
}

#[test]
fn invariant_capture_numbering_is_sequential() {
    let result = ok("(a)(b(c))(d)");
    let captures: Vec<usize> = result
        .instrs
        .iter()
        .filter_map(|i| match i.kind {
            InstrKind::Cgroup { capture, .. } => Some(capture),
            _ => None,
        })
        .collect();
    assert_eq!(captures, vec![0, 1, 2, 3]);
}

#[test]
fn invariant_alternation_span_is_well_ordered() {
    let result = ok("(a|b|c)");
    for instr in &result.instrs {
        if let InstrKind::Or { mid, end } = instr.kind {
            assert!(mid > 0);
            assert!(end > mid);
        }
    }
}

#[test]
fn invariant_lookbehind_bodies_are_always_fixed_length() {
    for pattern in ["(?<=abc)x", "(?<=a{4})x", "(?<!ab)x", "(?<=(a)(b))x"] {
        let mut result = ok(pattern);
        if let InstrKind::Lbehind { .. } | InstrKind::Nlbehind { .. } = result.instrs[0].kind {
            let len = rejit_core::lengths::match_len(&mut result.instrs, 0);
            assert!(len.is_some(), "pattern {pattern:?} should have fixed length");
        }
    }
}

#[test]
fn invariant_unskip_is_idempotent_regardless_of_prior_skip_bias() {
    use rejit_core::matcher::unskip;

    let mut clean = ok("(a(b|c)+)").instrs;
    let mut skipped = ok("(a(b|c)+)").instrs;
    for instr in &mut skipped {
        instr.skipped = true;
    }
    unskip(&mut skipped, 0);
    for instr in &mut clean {
        instr.skipped = false;
    }
    assert_eq!(clean.len(), skipped.len());
    for (c, s) in clean.iter().zip(skipped.iter()) {
        assert_eq!(c.kind, s.kind);
        assert_eq!(c.skipped, s.skipped);
    }
}
