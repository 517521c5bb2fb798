//! Token data model.
//!
//! This module provides the units the filter pipeline operates on:
//! - [`TokenKind`]: the shared classification vocabulary
//! - [`Span`]: absolute offsets plus line/column positions
//! - [`RawToken`]: scanner-produced payload (plain, pre-classified
//!   literal, or synthesized end-of-statement)
//! - [`Token`]: the emitted unit; a raw token plus optional kind/text
//!   overrides applied by the filters
//!
//! Raw tokens are shared between the original and any wrappers derived
//! from it; only the override fields differ between wrappers.

pub mod kind;
pub mod wrap;

use std::sync::Arc;

pub use kind::TokenKind;
pub use wrap::Token;

/// Display text reported by synthesized end-of-statement tokens.
pub const EOS_TEXT: &str = "<EOS>";

/// Source position of a token: absolute byte offsets plus 1-based
/// line/column coordinates for both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub offset: usize,
    pub end_offset: usize,
    pub line: usize,
    pub end_line: usize,
    pub column: usize,
    pub end_column: usize,
}

impl Span {
    /// Zero-width span at the end position of `self`.
    #[must_use]
    pub fn at_end(&self) -> Span {
        Span {
            offset: self.end_offset,
            end_offset: self.end_offset,
            line: self.end_line,
            end_line: self.end_line,
            column: self.end_column,
            end_column: self.end_column,
        }
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Span) -> Span {
        Span {
            offset: self.offset.min(other.offset),
            end_offset: self.end_offset.max(other.end_offset),
            line: self.line.min(other.line),
            end_line: self.end_line.max(other.end_line),
            column: if self.offset <= other.offset {
                self.column
            } else {
                other.column
            },
            end_column: if self.end_offset >= other.end_offset {
                self.end_column
            } else {
                other.end_column
            },
        }
    }
}

/// Scanner-level token payload.
///
/// `Plain` and `Literal` come from the upstream scanner; `Eos` is only
/// ever synthesized by the end-of-statement filter and has fixed text
/// and kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken {
    Plain {
        kind: TokenKind,
        text: Arc<str>,
        span: Span,
        file: Arc<str>,
    },
    /// Token pre-classified by an earlier lexical stage. `kind` is its
    /// surface classification (usually `Identifier`); `literal_kind` is
    /// the pre-classified literal type.
    Literal {
        kind: TokenKind,
        literal_kind: TokenKind,
        text: Arc<str>,
        span: Span,
        file: Arc<str>,
    },
    /// Synthesized end-of-statement marker. Positioned at the end of the
    /// token that triggered synthesis; carries no file of its own.
    Eos { span: Span },
}

impl RawToken {
    pub(crate) fn kind(&self) -> TokenKind {
        match self {
            RawToken::Plain { kind, .. } | RawToken::Literal { kind, .. } => *kind,
            RawToken::Eos { .. } => TokenKind::Eos,
        }
    }

    pub(crate) fn text(&self) -> &str {
        match self {
            RawToken::Plain { text, .. } | RawToken::Literal { text, .. } => text,
            RawToken::Eos { .. } => EOS_TEXT,
        }
    }

    pub(crate) fn span(&self) -> &Span {
        match self {
            RawToken::Plain { span, .. }
            | RawToken::Literal { span, .. }
            | RawToken::Eos { span } => span,
        }
    }

    pub(crate) fn file(&self) -> &str {
        match self {
            RawToken::Plain { file, .. } | RawToken::Literal { file, .. } => file,
            RawToken::Eos { .. } => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_at_end_is_zero_width() {
        let span = Span {
            offset: 10,
            end_offset: 14,
            line: 2,
            end_line: 2,
            column: 5,
            end_column: 9,
        };
        let end = span.at_end();
        assert_eq!(end.offset, 14);
        assert_eq!(end.end_offset, 14);
        assert_eq!(end.line, 2);
        assert_eq!(end.column, 9);
        assert_eq!(end.end_column, 9);
    }

    #[test]
    fn test_span_union_covers_both() {
        let a = Span {
            offset: 0,
            end_offset: 3,
            line: 1,
            end_line: 1,
            column: 1,
            end_column: 4,
        };
        let b = Span {
            offset: 3,
            end_offset: 5,
            line: 1,
            end_line: 1,
            column: 4,
            end_column: 6,
        };
        let u = a.union(&b);
        assert_eq!(u.offset, 0);
        assert_eq!(u.end_offset, 5);
        assert_eq!(u.column, 1);
        assert_eq!(u.end_column, 6);
    }
}
