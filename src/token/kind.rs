//! Token classification kinds.
//!
//! The upstream scanner and downstream parser agree on this vocabulary;
//! the filters only branch on the variants listed here. Language keywords
//! reclassified from identifiers form an open set and carry their
//! canonical spelling in [`TokenKind::Keyword`].

use std::fmt;

/// Classified type of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unclassified word; candidate for keyword reclassification.
    Identifier,
    /// End of the upstream stream. Repeats forever once reached.
    Eof,
    /// Statement terminator (explicit `;` or synthesized at a line break).
    Eos,
    /// `;` before end-of-statement reclassification.
    Semicolon,
    /// Comment token; the filters discard the commented-out remainder.
    Comment,
    /// Raw digit string, possibly with embedded periods, not yet
    /// disambiguated into a real constant or an operator sequence.
    DigitString,
    /// Floating-point constant.
    RealConstant,

    // Punctuation the Fortran rules inspect.
    Dot,
    Star,
    Slash,
    Tilde,
    Ampersand,
    LessThan,
    GreaterThan,

    // Canonical Fortran operators.
    Power,
    Equal,
    NotEqual,
    And,
    Or,
    Not,

    // Legacy bitwise spellings rewritten to logical operators.
    BitAnd,
    BitOr,
    BitXor,

    /// Free-form line continuation marker (`&` before a line break).
    Continuation,

    // Fortran statement keywords the normalizer fuses.
    End,
    If,
    EndIf,

    /// Language keyword reclassified from an identifier. Carries the
    /// canonical (lower-case or exact) spelling it was registered under.
    Keyword(&'static str),
}

impl TokenKind {
    /// Whether this kind terminates a statement or the whole stream.
    #[must_use]
    pub fn is_terminator(self) -> bool {
        matches!(self, TokenKind::Eos | TokenKind::Eof)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(name) => write!(f, "keyword `{name}`"),
            other => write!(f, "{other:?}"),
        }
    }
}
