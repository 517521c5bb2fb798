//! End-of-statement synthesis for Fortran.
//!
//! Raw Fortran tokenization carries no discrete statement terminator;
//! statements end at line breaks and semicolons. This filter watches the
//! line number of consecutive tokens and emits a synthesized
//! end-of-statement token at every boundary, so the downstream grammar
//! can rely on explicit terminators.

use crate::error::Result;
use crate::filter::TokenStream;
use crate::token::{Token, TokenKind};

/// Single-lookahead stream that inserts end-of-statement tokens.
pub struct EosStream {
    source: Box<dyn TokenStream>,
    /// Last token handed downstream.
    current: Option<Token>,
    /// Token read past a statement boundary, owed to the next call.
    pending: Option<Token>,
}

impl EosStream {
    #[must_use]
    pub fn new(source: Box<dyn TokenStream>) -> EosStream {
        EosStream {
            source,
            current: None,
            pending: None,
        }
    }

    fn emit(&mut self, token: Token) -> Token {
        self.current = Some(token.clone());
        token
    }
}

impl TokenStream for EosStream {
    fn next_token(&mut self) -> Result<Token> {
        // A boundary was detected on the previous call; the buffered
        // token is owed first.
        if let Some(pending) = self.pending.take() {
            return Ok(self.emit(pending));
        }

        // Terminal: keep returning the held EOF. The upstream contract
        // is to mirror EOF indefinitely; a non-EOF read here is an
        // internal inconsistency of the scanner.
        if let Some(current) = &self.current {
            if current.is_eof() {
                let mirrored = self.source.next_token()?;
                debug_assert!(
                    mirrored.is_eof(),
                    "upstream produced {} after end of file",
                    mirrored.kind()
                );
                return Ok(current.clone());
            }
        }

        let new_token = self.source.next_token()?;
        // The boundary check needs a previous token to compare lines
        // against; the first token of a stream skips it.
        if let Some(current) = &self.current {
            if new_token.is_eof() || new_token.line() != current.line() {
                let eos = Token::eos_after(current);
                self.pending = Some(new_token);
                return Ok(self.emit(eos));
            }
        }

        // Unconditional: a semicolon terminates a statement even when it
        // is the very first token of the stream.
        if new_token.kind() == TokenKind::Semicolon {
            let mut terminator = new_token;
            terminator.set_kind(TokenKind::Eos)?;
            return Ok(self.emit(terminator));
        }

        Ok(self.emit(new_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::VecTokenSource;
    use crate::token::{Span, EOS_TEXT};

    fn tok(kind: TokenKind, text: &str, offset: usize, line: usize, column: usize) -> Token {
        Token::plain(
            kind,
            text,
            Span {
                offset,
                end_offset: offset + text.len(),
                line,
                end_line: line,
                column,
                end_column: column + text.len(),
            },
            "t.f",
        )
    }

    fn eos_stream(tokens: Vec<Token>) -> EosStream {
        EosStream::new(Box::new(VecTokenSource::new(tokens)))
    }

    #[test]
    fn test_line_change_synthesizes_eos() {
        let mut stream = eos_stream(vec![
            tok(TokenKind::Identifier, "A", 0, 1, 1),
            tok(TokenKind::Identifier, "B", 2, 2, 1),
        ]);

        let a = stream.next_token().unwrap();
        assert_eq!(a.text(), "A");

        let eos = stream.next_token().unwrap();
        assert_eq!(eos.kind(), TokenKind::Eos);
        assert_eq!(eos.text(), EOS_TEXT);
        // Positioned at the end of A
        assert_eq!(eos.offset(), 1);
        assert_eq!(eos.line(), 1);
        assert_eq!(eos.column(), 2);

        let b = stream.next_token().unwrap();
        assert_eq!(b.text(), "B");
    }

    #[test]
    fn test_same_line_tokens_pass_through() {
        let mut stream = eos_stream(vec![
            tok(TokenKind::Identifier, "x", 0, 1, 1),
            tok(TokenKind::Identifier, "y", 2, 1, 3),
        ]);
        assert_eq!(stream.next_token().unwrap().text(), "x");
        assert_eq!(stream.next_token().unwrap().text(), "y");
    }

    #[test]
    fn test_semicolon_reclassified_in_place() {
        let mut stream = eos_stream(vec![
            tok(TokenKind::Identifier, "x", 0, 1, 1),
            tok(TokenKind::Semicolon, ";", 1, 1, 2),
            tok(TokenKind::Identifier, "y", 3, 1, 4),
        ]);
        stream.next_token().unwrap();
        let semi = stream.next_token().unwrap();
        assert_eq!(semi.kind(), TokenKind::Eos);
        assert_eq!(semi.text(), ";");
        assert_eq!(stream.next_token().unwrap().text(), "y");
    }

    #[test]
    fn test_leading_semicolon_reclassified() {
        // A semicolon terminates the (empty) statement even when it is
        // the first token the stream produces.
        let mut stream = eos_stream(vec![
            tok(TokenKind::Semicolon, ";", 0, 1, 1),
            tok(TokenKind::Identifier, "x", 2, 1, 3),
        ]);
        let semi = stream.next_token().unwrap();
        assert_eq!(semi.kind(), TokenKind::Eos);
        assert_eq!(semi.text(), ";");
        assert_eq!(stream.next_token().unwrap().text(), "x");
    }

    #[test]
    fn test_eof_preceded_by_eos() {
        let mut stream = eos_stream(vec![tok(TokenKind::Identifier, "x", 0, 1, 1)]);
        assert_eq!(stream.next_token().unwrap().text(), "x");
        assert_eq!(stream.next_token().unwrap().kind(), TokenKind::Eos);
        assert!(stream.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_eof_is_terminal_and_idempotent() {
        let mut stream = eos_stream(vec![tok(TokenKind::Identifier, "x", 0, 1, 1)]);
        while !stream.next_token().unwrap().is_eof() {}
        for _ in 0..4 {
            assert!(stream.next_token().unwrap().is_eof());
        }
    }

    #[test]
    fn test_empty_stream_returns_eof_without_eos() {
        let mut stream = eos_stream(Vec::new());
        assert!(stream.next_token().unwrap().is_eof());
        assert!(stream.next_token().unwrap().is_eof());
    }
}
