//! Concatenation pre-pass.
//!
//! Legacy Fortran lexers did not split a numeric literal from an
//! identifier glued directly to it (e.g. `1q0`). Modern scanners emit
//! two tokens; this pre-pass merges them back into one token of the
//! numeric token's kind when their spans are adjacent, so the dialect
//! normalization rules see the legacy shape.

use std::collections::VecDeque;

use crate::error::Result;
use crate::filter::TokenStream;
use crate::token::{Token, TokenKind};

/// Two-token-lookahead merging stream.
pub struct ConcatStream {
    source: Box<dyn TokenStream>,
    pending: VecDeque<Token>,
}

impl ConcatStream {
    #[must_use]
    pub fn new(source: Box<dyn TokenStream>) -> ConcatStream {
        ConcatStream {
            source,
            pending: VecDeque::with_capacity(2),
        }
    }

    fn pull(&mut self) -> Result<Token> {
        match self.pending.pop_front() {
            Some(tok) => Ok(tok),
            None => self.source.next_token(),
        }
    }

    fn is_numeric(kind: TokenKind) -> bool {
        matches!(kind, TokenKind::DigitString | TokenKind::RealConstant)
    }
}

impl TokenStream for ConcatStream {
    fn next_token(&mut self) -> Result<Token> {
        let first = self.pull()?;
        if !Self::is_numeric(first.kind()) {
            return Ok(first);
        }

        let second = self.pull()?;
        let adjacent = second.kind() == TokenKind::Identifier
            && second.offset() == first.end_offset()
            && second.line() == first.line();
        if !adjacent {
            // Hypothesis not confirmed; the inspected token (EOF
            // included) goes back to the buffer.
            self.pending.push_front(second);
            return Ok(first);
        }

        let text = format!("{}{}", first.text(), second.text());
        let span = first.span().union(second.span());
        Ok(Token::plain(first.kind(), &text, span, first.file()))
    }
}
