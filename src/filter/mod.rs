//! Token filtering infrastructure.
//!
//! Filters are pull-based stream adapters: each wraps an upstream
//! [`TokenStream`] and emits a transformed token per `next_token` call.
//! - [`keyword`]: identifier-to-keyword reclassification
//! - [`lang`]: C, GNU C, C++ and GNU C++ keyword filters
//! - [`fortran`]: the composed Fortran pipeline
//! - [`fortran_concat`]: numeric/identifier adjacency merge pre-pass
//! - [`fortran_eos`]: end-of-statement synthesis
//! - [`fortran_fixup`]: Fortran dialect normalization rules
//!
//! Streams are single-pass, forward-only and non-restartable. Once a
//! stream returns an end-of-file token, every later call returns an
//! end-of-file token again.

pub mod fortran;
pub mod fortran_concat;
pub mod fortran_eos;
pub mod fortran_fixup;
pub mod keyword;
pub mod lang;

pub use fortran::{FortranFilter, FortranForm};
pub use keyword::{KeywordFilter, KeywordTable};

use crate::error::Result;
use crate::token::{Token, TokenKind};

/// Pull-based source of tokens.
///
/// Implementations must keep returning an `Eof`-kinded token after the
/// stream is exhausted.
pub trait TokenStream {
    /// Produce the next token. Never reorders tokens relative to the
    /// upstream stream except where a filter rule fuses or splits them.
    fn next_token(&mut self) -> Result<Token>;
}

/// A constructed per-language filter that can wrap any upstream stream.
pub trait LanguageFilter: Send + Sync {
    /// Lazy, single-pass transformed view over `source`.
    fn filtered_stream(&self, source: Box<dyn TokenStream>) -> Box<dyn TokenStream>;
}

/// In-memory token source over a prepared sequence.
///
/// Repeats its final end-of-file token forever; if the sequence carries
/// no explicit end-of-file token, one is synthesized at the end of the
/// last token (or at the origin for an empty sequence).
pub struct VecTokenSource {
    tokens: std::vec::IntoIter<Token>,
    /// Last token handed out, kept to position a synthesized EOF.
    last: Option<Token>,
    eof: Option<Token>,
}

impl VecTokenSource {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        VecTokenSource {
            tokens: tokens.into_iter(),
            last: None,
            eof: None,
        }
    }
}

impl TokenStream for VecTokenSource {
    fn next_token(&mut self) -> Result<Token> {
        if let Some(eof) = &self.eof {
            return Ok(eof.clone());
        }
        match self.tokens.next() {
            Some(tok) => {
                if tok.is_eof() {
                    self.eof = Some(tok.clone());
                } else {
                    self.last = Some(tok.clone());
                }
                Ok(tok)
            }
            None => {
                let (span, file) = match &self.last {
                    Some(last) => (last.span().at_end(), last.file().to_string()),
                    None => (crate::token::Span::default(), String::new()),
                };
                let eof = Token::plain(TokenKind::Eof, "", span, &file);
                self.eof = Some(eof.clone());
                Ok(eof)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;

    #[test]
    fn test_vec_source_repeats_eof() {
        let tok = Token::plain(TokenKind::Identifier, "x", Span::default(), "t.c");
        let mut source = VecTokenSource::new(vec![tok]);
        assert_eq!(source.next_token().unwrap().kind(), TokenKind::Identifier);
        assert!(source.next_token().unwrap().is_eof());
        assert!(source.next_token().unwrap().is_eof());
        assert!(source.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_vec_source_synthesized_eof_sits_after_last_token() {
        let span = Span {
            offset: 4,
            end_offset: 7,
            line: 2,
            end_line: 2,
            column: 5,
            end_column: 8,
        };
        let tok = Token::plain(TokenKind::Identifier, "abc", span, "t.c");
        let mut source = VecTokenSource::new(vec![tok]);
        source.next_token().unwrap();
        let eof = source.next_token().unwrap();
        assert!(eof.is_eof());
        assert_eq!(eof.offset(), 7);
        assert_eq!(eof.line(), 2);
        assert_eq!(eof.column(), 8);
        assert_eq!(eof.file(), "t.c");
    }

    #[test]
    fn test_vec_source_empty_is_immediately_eof() {
        let mut source = VecTokenSource::new(Vec::new());
        assert!(source.next_token().unwrap().is_eof());
        assert!(source.next_token().unwrap().is_eof());
    }
}
