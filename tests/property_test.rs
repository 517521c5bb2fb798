//! Property-based tests with proptest.
//!
//! Checks the stream-level invariants that must hold for arbitrary
//! comment-free inputs: terminality of end-of-file, token-count
//! conservation on single-line streams, and keyword-table case
//! behavior.

use lexfilter::{filter_for, LanguageFilter, Span, Token, TokenKind, TokenStream, VecTokenSource};
use proptest::prelude::*;

/// Identifier text that no filter rule fires on: alphabetic start,
/// never a Fortran statement keyword, no dots or operator spellings.
fn neutral_word() -> impl Strategy<Value = String> {
    "[a-bd-eg-hj-z][a-z0-9_]{0,8}".prop_filter("statement keywords excluded", |w| {
        !matches!(w.as_str(), "end" | "if" | "endif")
    })
}

fn words(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(neutral_word(), 1..=max)
}

/// Lay words out on one line with single spaces between them.
fn line_of_identifiers(words: &[String]) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(words.len());
    let mut offset = 0;
    for word in words {
        tokens.push(Token::plain(
            TokenKind::Identifier,
            word,
            Span {
                offset,
                end_offset: offset + word.len(),
                line: 1,
                end_line: 1,
                column: offset + 1,
                end_column: offset + word.len() + 1,
            },
            "prop.f",
        ));
        offset += word.len() + 1;
    }
    tokens
}

proptest! {
    /// Once EOF is reached, the pipeline keeps returning EOF.
    #[test]
    fn prop_eof_terminality(input in words(12)) {
        let filter = filter_for("Fortran", "free").unwrap();
        let mut stream =
            filter.filtered_stream(Box::new(VecTokenSource::new(line_of_identifiers(&input))));
        let mut guard = 0;
        while !stream.next_token().unwrap().is_eof() {
            guard += 1;
            prop_assert!(guard < 100, "stream failed to reach EOF");
        }
        for _ in 0..5 {
            prop_assert!(stream.next_token().unwrap().is_eof());
        }
    }

    /// A comment-free single-line stream conserves its token count plus
    /// exactly one synthesized end-of-statement terminator.
    #[test]
    fn prop_single_line_count_conservation(input in words(12)) {
        let count = input.len();
        let filter = filter_for("Fortran", "free").unwrap();
        let mut stream =
            filter.filtered_stream(Box::new(VecTokenSource::new(line_of_identifiers(&input))));
        let mut emitted = Vec::new();
        loop {
            let tok = stream.next_token().unwrap();
            if tok.is_eof() {
                break;
            }
            emitted.push(tok);
            prop_assert!(emitted.len() <= count + 1);
        }
        prop_assert_eq!(emitted.len(), count + 1);
        prop_assert_eq!(emitted.last().unwrap().kind(), TokenKind::Eos);
        // Emission order matches the input scan order.
        for (tok, word) in emitted.iter().zip(input.iter()) {
            prop_assert_eq!(tok.text(), word.as_str());
        }
    }

    /// Case-insensitive Fortran keyword lookup classifies any casing of
    /// `end` identically; the case-sensitive GNU C table only matches
    /// the registered spelling.
    #[test]
    fn prop_keyword_case_behavior(upper_mask in prop::collection::vec(any::<bool>(), 3)) {
        let word: String = "end"
            .chars()
            .zip(upper_mask.iter())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();

        let fortran = filter_for("Fortran", "free").unwrap();
        let tok = Token::plain(
            TokenKind::Identifier,
            &word,
            Span { offset: 0, end_offset: 3, line: 1, end_line: 1, column: 1, end_column: 4 },
            "prop.f",
        );
        let mut stream = fortran.filtered_stream(Box::new(VecTokenSource::new(vec![tok])));
        prop_assert_eq!(stream.next_token().unwrap().kind(), TokenKind::End);

        // GNU C is case-sensitive: only the lowercase ISO spelling of
        // `while` is a keyword.
        let gnu_c = filter_for("GNU C", "").unwrap();
        let mixed = Token::plain(
            TokenKind::Identifier,
            "While",
            Span::default(),
            "prop.c",
        );
        let mut stream = gnu_c.filtered_stream(Box::new(VecTokenSource::new(vec![mixed])));
        prop_assert_eq!(stream.next_token().unwrap().kind(), TokenKind::Identifier);
    }
}
