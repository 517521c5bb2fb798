//! `Token` — the unit emitted by every filter stream.
//!
//! A token is a shared raw payload plus optional overrides. Filters
//! reclassify a token by attaching a kind override, and split a raw
//! token into sub-tokens by attaching a text override with a positional
//! shift; the raw payload is never touched. Accessors resolve the
//! overrides before falling back to the underlying token.

use std::sync::Arc;

use anyhow::bail;

use super::{RawToken, Span, TokenKind};
use crate::error::Result;

/// Replacement text plus the shift applied uniformly to the column,
/// end-column and offset of the underlying token, so a sub-token claims
/// its own slice of the original span.
#[derive(Debug, Clone)]
struct TextOverride {
    text: Arc<str>,
    shift: usize,
}

/// A classified lexical unit flowing through the pipeline.
#[derive(Debug, Clone)]
pub struct Token {
    raw: Arc<RawToken>,
    kind_override: Option<TokenKind>,
    text_override: Option<TextOverride>,
}

impl Token {
    /// Plain scanner token.
    #[must_use]
    pub fn plain(kind: TokenKind, text: &str, span: Span, file: &str) -> Token {
        Token::from_raw(RawToken::Plain {
            kind,
            text: Arc::from(text),
            span,
            file: Arc::from(file),
        })
    }

    /// Pre-classified literal token (e.g. `true` carrying a keyword-like
    /// literal kind alongside its surface classification).
    #[must_use]
    pub fn literal(
        kind: TokenKind,
        literal_kind: TokenKind,
        text: &str,
        span: Span,
        file: &str,
    ) -> Token {
        Token::from_raw(RawToken::Literal {
            kind,
            literal_kind,
            text: Arc::from(text),
            span,
            file: Arc::from(file),
        })
    }

    /// Synthesized end-of-statement token positioned at the end of
    /// `trigger`'s span.
    #[must_use]
    pub fn eos_after(trigger: &Token) -> Token {
        Token::from_raw(RawToken::Eos {
            span: trigger.span().at_end(),
        })
    }

    fn from_raw(raw: RawToken) -> Token {
        Token {
            raw: Arc::new(raw),
            kind_override: None,
            text_override: None,
        }
    }

    /// Copy of this token reclassified to `kind`. The underlying token
    /// is shared, not cloned.
    #[must_use]
    pub fn reclassified(&self, kind: TokenKind) -> Token {
        Token {
            raw: Arc::clone(&self.raw),
            kind_override: Some(kind),
            text_override: self.text_override.clone(),
        }
    }

    /// Sub-token of this token: classified as `kind`, displaying `text`,
    /// positioned `shift` characters past the underlying token's start.
    #[must_use]
    pub fn sliced(&self, kind: TokenKind, text: &str, shift: usize) -> Token {
        Token {
            raw: Arc::clone(&self.raw),
            kind_override: Some(kind),
            text_override: Some(TextOverride {
                text: Arc::from(text),
                shift,
            }),
        }
    }

    /// Effective classified kind, override first.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind_override.unwrap_or_else(|| self.raw.kind())
    }

    /// Effective display text, override first.
    #[must_use]
    pub fn text(&self) -> &str {
        match &self.text_override {
            Some(over) => &over.text,
            None => self.raw.text(),
        }
    }

    /// Pre-classified literal kind, if the underlying token is a literal.
    #[must_use]
    pub fn literal_kind(&self) -> Option<TokenKind> {
        match &*self.raw {
            RawToken::Literal { literal_kind, .. } => Some(*literal_kind),
            _ => None,
        }
    }

    /// Underlying span, without any slice shift applied.
    #[must_use]
    pub fn span(&self) -> &Span {
        self.raw.span()
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.raw.span().offset + self.shift()
    }

    #[must_use]
    pub fn end_offset(&self) -> usize {
        self.raw.span().end_offset
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.raw.span().line
    }

    #[must_use]
    pub fn end_line(&self) -> usize {
        self.raw.span().end_line
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.raw.span().column + self.shift()
    }

    #[must_use]
    pub fn end_column(&self) -> usize {
        self.raw.span().end_column + self.shift()
    }

    /// Originating file name; empty for synthesized tokens.
    #[must_use]
    pub fn file(&self) -> &str {
        self.raw.file()
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind() == TokenKind::Eof
    }

    #[must_use]
    pub fn is_eos(&self) -> bool {
        self.kind() == TokenKind::Eos
    }

    fn shift(&self) -> usize {
        self.text_override.as_ref().map_or(0, |over| over.shift)
    }

    /// Reclassify this token in place.
    ///
    /// Only the override field is written; the shared underlying token
    /// is never mutated. Literal-backed tokens reject reclassification:
    /// their kind is fixed by the earlier lexical stage, and filters
    /// must go through the table-lookup path instead.
    pub fn set_kind(&mut self, kind: TokenKind) -> Result<()> {
        if matches!(&*self.raw, RawToken::Literal { .. }) {
            bail!("cannot reclassify a pre-classified literal token in place");
        }
        self.kind_override = Some(kind);
        Ok(())
    }

    /// Move this token to another line. Synthesized end-of-statement
    /// tokens derive their position from the trigger token and reject
    /// repositioning.
    pub fn set_line(&mut self, line: usize) -> Result<()> {
        match Arc::make_mut(&mut self.raw) {
            RawToken::Plain { span, .. } | RawToken::Literal { span, .. } => {
                span.line = line;
                Ok(())
            }
            RawToken::Eos { .. } => {
                bail!("cannot reposition a synthesized end-of-statement token")
            }
        }
    }

    /// Reassign the originating file name. Rejected for synthesized
    /// tokens, which carry none.
    pub fn set_file(&mut self, new_file: &str) -> Result<()> {
        match Arc::make_mut(&mut self.raw) {
            RawToken::Plain { file, .. } | RawToken::Literal { file, .. } => {
                *file = Arc::from(new_file);
                Ok(())
            }
            RawToken::Eos { .. } => {
                bail!("synthesized end-of-statement tokens have no file")
            }
        }
    }
}
