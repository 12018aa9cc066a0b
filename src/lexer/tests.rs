#[cfg(test)]
mod lexer_tests {
    use crate::error::ErrorKind;
    use crate::lexer::token::{Token, TokenKind};
    use crate::lexer::tokenize;
    use crate::rune;

    fn lex_ok(input: &str) -> Vec<Token> {
        let runes = rune::decode(input);
        tokenize(&runes).expect("expected tokenize to succeed")
    }

    fn lex_err(input: &str) -> ErrorKind {
        let runes = rune::decode(input);
        tokenize(&runes).expect_err("expected tokenize to fail").kind
    }

    #[test]
    fn empty_pattern_has_no_tokens() {
        assert!(lex_ok("").is_empty());
    }

    #[test]
    fn literal_run_coalesces_into_one_word() {
        let tokens = lex_ok("abc");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0], Token { kind: TokenKind::Word, pos: 0, len: 3 });
    }

    #[test]
    fn quantifier_suffix_breaks_the_word_run() {
        let tokens = lex_ok("a+b");
        assert_eq!(
            tokens,
            vec![
                Token { kind: TokenKind::Word, pos: 0, len: 1 },
                Token { kind: TokenKind::Plus, pos: 1, len: 1 },
                Token { kind: TokenKind::Word, pos: 2, len: 1 },
            ]
        );
    }

    #[test]
    fn alternation_and_groups() {
        let tokens = lex_ok("(ab|cd)+");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Lp,
                TokenKind::Word,
                TokenKind::Pipe,
                TokenKind::Word,
                TokenKind::Rp,
                TokenKind::Plus,
            ]
        );
    }

    #[test]
    fn set_with_trailing_caret_is_not_negated() {
        let tokens = lex_ok("[a-c^]");
        assert_eq!(tokens.len(), 1);
        match tokens[0].kind {
            TokenKind::Set { negated } => assert!(!negated),
            other => panic!("expected Set, got {other:?}"),
        }
        // Body spans "a-c^", excluding the brackets.
        assert_eq!(tokens[0].pos, 1);
        assert_eq!(tokens[0].len, 4);
    }

    #[test]
    fn set_with_leading_caret_is_negated() {
        let tokens = lex_ok("[^ab]");
        match tokens[0].kind {
            TokenKind::Set { negated } => assert!(negated),
            other => panic!("expected Set, got {other:?}"),
        }
        assert_eq!(tokens[0].pos, 2);
        assert_eq!(tokens[0].len, 2);
    }

    #[test]
    fn unterminated_set_is_ubound_at_the_opener() {
        assert_eq!(lex_err("[ab"), ErrorKind::Ubound);
    }

    #[test]
    fn unterminated_rep_is_ubound_at_the_opener() {
        assert_eq!(lex_err("a{2,5"), ErrorKind::Ubound);
    }

    #[test]
    fn rep_token_spans_braces_inclusive() {
        let tokens = lex_ok("a{2,5}?");
        let rep = tokens.iter().find(|t| t.kind == TokenKind::Rep).unwrap();
        assert_eq!(rep.pos, 1);
        assert_eq!(rep.len, 5); // "{2,5}"
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Q);
    }

    #[test]
    fn back_reference_is_two_runes() {
        let tokens = lex_ok(r"\3");
        assert_eq!(tokens, vec![Token { kind: TokenKind::Back, pos: 0, len: 2 }]);
    }

    #[test]
    fn shorthand_classes() {
        for letter in ['s', 'S', 'w', 'W', 'd', 'D'] {
            let pattern = format!("\\{letter}");
            let tokens = lex_ok(&pattern);
            assert_eq!(tokens, vec![Token { kind: TokenKind::Ms, pos: 0, len: 2 }]);
        }
    }

    #[test]
    fn escaped_meta_becomes_a_literal_word_without_the_backslash() {
        let tokens = lex_ok(r"\.");
        assert_eq!(tokens, vec![Token { kind: TokenKind::Word, pos: 1, len: 1 }]);
    }

    #[test]
    fn escaped_literal_coalesces_with_a_following_plain_word() {
        let tokens = lex_ok(r"\.b");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0], Token { kind: TokenKind::Word, pos: 1, len: 2 });
    }

    #[test]
    fn escaped_literal_coalesces_with_a_preceding_plain_word() {
        // "a\.b": the escape sits after a plain run, not before one — the
        // merge must widen across the backslash it doesn't itself keep.
        let tokens = lex_ok(r"a\.b");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0], Token { kind: TokenKind::Word, pos: 0, len: 4 });
    }

    #[test]
    fn trailing_backslash_is_a_syntax_error() {
        assert_eq!(lex_err("a\\"), ErrorKind::Syntax);
    }

    #[test]
    fn anchors_and_dot() {
        let tokens = lex_ok("^a.$");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Caret, TokenKind::Word, TokenKind::Dot, TokenKind::Dollar]
        );
    }

    #[test]
    fn lookbehind_like_pattern_tokenizes_as_group_plus_word() {
        // `(?<=ab)` has no special-cased tokens of its own — `?`, `<`, `=`
        // are ordinary runes here; the parser assigns look-around meaning
        // to the `(?...)` shape, not the tokenizer.
        let tokens = lex_ok("(?<=ab)cd");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds[0], TokenKind::Lp);
        assert_eq!(kinds[1], TokenKind::Q);
        assert_eq!(kinds.last(), Some(&TokenKind::Word)); // trailing "cd"
        assert_eq!(tokens.last().unwrap().len, 2);
    }
}
