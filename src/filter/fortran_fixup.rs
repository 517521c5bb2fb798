//! Fortran dialect normalization.
//!
//! A battery of lexical disambiguation rules for fixed-form and
//! free-form Fortran, applied to the output of the concatenation
//! pre-pass and the end-of-statement filter. Each raw token is decided
//! by the first matching rule; unconfirmed lookahead always goes back to
//! the pending buffer, so the only tokens ever discarded are the ones
//! swallowed by the comment rules.

use std::collections::VecDeque;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::error::Result;
use crate::filter::TokenStream;
use crate::token::{Token, TokenKind};

/// Digit string with an embedded relational/logical spelling, e.g.
/// `1.0.and.2`: numeric prefix, dotted operator word, optional tail.
static EMBEDDED_OP_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^(\d+(?:\.\d+)?)(\.(?:and|or|eq|ne|gt|lt)\.)(.*)$")
        .case_insensitive(true)
        .build()
        .expect("invalid embedded-operator pattern")
});

/// Operator words the embedded-operator split recognizes. Matches the
/// alternation in [`EMBEDDED_OP_RE`].
fn embedded_op_kind(word: &str) -> Option<TokenKind> {
    match word.to_ascii_lowercase().as_str() {
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        "eq" => Some(TokenKind::Equal),
        "ne" => Some(TokenKind::NotEqual),
        "gt" => Some(TokenKind::GreaterThan),
        "lt" => Some(TokenKind::LessThan),
        _ => None,
    }
}

/// Operator words that collapse when spelled as separate `.` word `.`
/// tokens. Narrower than the embedded set: only these four spellings
/// reach the fixup pass as standalone identifiers between dots.
fn dotted_word_kind(word: &str) -> Option<TokenKind> {
    match word.to_ascii_lowercase().as_str() {
        "ne" => Some(TokenKind::NotEqual),
        "gt" => Some(TokenKind::GreaterThan),
        "eq" => Some(TokenKind::Equal),
        "and" => Some(TokenKind::And),
        _ => None,
    }
}

/// Multi-token-lookahead normalization stream.
pub struct FixupStream {
    source: Box<dyn TokenStream>,
    pending: VecDeque<Token>,
    free_form: bool,
    /// Kind of the token most recently handed downstream; drives the
    /// comment rule's end-of-statement preservation.
    last_returned: Option<TokenKind>,
}

impl FixupStream {
    #[must_use]
    pub fn new(source: Box<dyn TokenStream>, free_form: bool) -> FixupStream {
        FixupStream {
            source,
            pending: VecDeque::with_capacity(2),
            free_form,
            last_returned: None,
        }
    }

    fn pull(&mut self) -> Result<Token> {
        match self.pending.pop_front() {
            Some(tok) => Ok(tok),
            None => self.source.next_token(),
        }
    }

    fn unread(&mut self, token: Token) {
        self.pending.push_front(token);
    }

    /// Whether `token` opens a comment in the active form.
    fn starts_comment(&self, token: &Token) -> bool {
        if token.kind().is_terminator() {
            return false;
        }
        if self.free_form {
            token.text().starts_with('!')
        } else {
            token.column() == 1 && matches!(token.text().chars().next(), Some('c' | 'C'))
        }
    }

    /// Discard the remainder of a comment. Consumes tokens up to the
    /// next end-of-statement or end-of-file; the terminator itself is
    /// kept when `keep_terminator` asks for it or when it is EOF.
    fn skip_comment_tail(&mut self, keep_terminator: bool) -> Result<()> {
        loop {
            let tok = self.pull()?;
            if tok.is_eof() {
                self.unread(tok);
                return Ok(());
            }
            if tok.is_eos() {
                if keep_terminator {
                    self.unread(tok);
                }
                return Ok(());
            }
        }
    }

    fn apply(&mut self, token: Token) -> Result<Token> {
        // Rule 1: comment detection.
        if self.starts_comment(&token) {
            let keep = token.column() > 1 && self.last_returned != Some(TokenKind::Eos);
            self.skip_comment_tail(keep)?;
            return Ok(token.reclassified(TokenKind::Comment));
        }

        match token.kind() {
            // Rule 2: digit-string disambiguation.
            TokenKind::DigitString => Ok(self.split_digit_string(&token)),

            // Rule 3: operator canonicalization.
            TokenKind::Star => self.fuse_pair(token, TokenKind::Star, TokenKind::Power, "**"),
            TokenKind::BitAnd => Ok(token.reclassified(TokenKind::And)),
            TokenKind::BitOr => Ok(token.reclassified(TokenKind::Or)),
            TokenKind::BitXor => Ok(token.reclassified(TokenKind::Not)),
            TokenKind::Tilde => self.double_tilde(token),
            TokenKind::LessThan => {
                self.fuse_pair(token, TokenKind::GreaterThan, TokenKind::NotEqual, "<>")
            }

            // Rule 4: dotted-word operators.
            TokenKind::Dot => self.dotted_word(token),

            // Rule 5: suffix disambiguation on a prior real constant.
            TokenKind::RealConstant => self.real_constant_suffix(token),

            // Rule 6: END IF contraction.
            TokenKind::End => self.end_if(token),

            // Rule 7: legacy line comment introduced by a NOT spelling.
            TokenKind::Not => {
                self.skip_comment_tail(true)?;
                Ok(token.reclassified(TokenKind::Comment))
            }

            // Rule 8: free-form continuation marker.
            TokenKind::Ampersand if self.free_form => self.continuation(token),

            // Rule 3 spillover: spellings the scanner kept as raw text.
            _ if token.text() == "/=" => Ok(token.reclassified(TokenKind::NotEqual)),
            _ if token.text().eq_ignore_ascii_case(".eqv.") => {
                Ok(token.reclassified(TokenKind::Equal))
            }

            // Rule 9: pass-through.
            _ => Ok(token),
        }
    }

    /// Rule 2. `1.0.and.2` becomes a real constant, an operator and an
    /// identifier tail; a plain period digit string becomes a real
    /// constant; anything else stays a digit string.
    fn split_digit_string(&mut self, token: &Token) -> Token {
        let text = token.text().to_string();
        if let Some(caps) = EMBEDDED_OP_RE.captures(&text) {
            let prefix = caps.get(1).map_or("", |m| m.as_str());
            let op_text = caps.get(2).map_or("", |m| m.as_str());
            let tail = caps.get(3).map_or("", |m| m.as_str());
            let word = op_text.trim_matches('.');
            if let Some(op_kind) = embedded_op_kind(word) {
                let op = token.sliced(op_kind, op_text, prefix.len());
                if !tail.is_empty() {
                    let tail_tok = token.sliced(
                        TokenKind::Identifier,
                        tail,
                        prefix.len() + op_text.len(),
                    );
                    self.unread(tail_tok);
                }
                self.unread(op);
                return token.sliced(TokenKind::RealConstant, prefix, 0);
            }
        }
        if text.contains('.') {
            return token.reclassified(TokenKind::RealConstant);
        }
        token.clone()
    }

    /// Rule 3 helper: `token` followed by a `next_kind` token fuses into
    /// one `fused_kind` token; otherwise `token` is returned unchanged.
    fn fuse_pair(
        &mut self,
        token: Token,
        next_kind: TokenKind,
        fused_kind: TokenKind,
        fused_text: &str,
    ) -> Result<Token> {
        let next = self.pull()?;
        if next.kind() == next_kind {
            let span = token.span().union(next.span());
            return Ok(Token::plain(fused_kind, fused_text, span, token.file()));
        }
        self.unread(next);
        Ok(token)
    }

    /// Rule 3: `~~` becomes two slash tokens at their own positions.
    fn double_tilde(&mut self, token: Token) -> Result<Token> {
        let next = self.pull()?;
        if next.kind() == TokenKind::Tilde {
            self.unread(next.reclassified(TokenKind::Slash));
            return Ok(token.reclassified(TokenKind::Slash));
        }
        self.unread(next);
        Ok(token)
    }

    /// Rule 4: `.` + word + `.` collapses into one operator token.
    fn dotted_word(&mut self, token: Token) -> Result<Token> {
        let word = self.pull()?;
        let fused_kind = match word.kind() {
            TokenKind::Identifier => dotted_word_kind(word.text()),
            // The keyword pass may already have classified the word.
            TokenKind::And => Some(TokenKind::And),
            _ => None,
        };
        if let Some(kind) = fused_kind {
            let closing = self.pull()?;
            if closing.kind() == TokenKind::Dot {
                let text = format!("{}{}{}", token.text(), word.text(), closing.text());
                let span = token.span().union(word.span()).union(closing.span());
                return Ok(Token::plain(kind, &text, span, token.file()));
            }
            self.unread(closing);
        }
        self.unread(word);
        Ok(token)
    }

    /// Rule 5: a real constant followed by an identifier is re-confirmed
    /// as a real constant; followed by a bare `.` while its own text
    /// ends in a dotted-operator prefix, the lookahead dot is rewritten
    /// into that operator.
    fn real_constant_suffix(&mut self, token: Token) -> Result<Token> {
        let next = self.pull()?;
        if next.kind() == TokenKind::Identifier {
            self.unread(next);
            return Ok(token.reclassified(TokenKind::RealConstant));
        }
        if next.kind() == TokenKind::Dot {
            let text = token.text().to_ascii_lowercase();
            let rewritten = if text.ends_with(".and") {
                Some(TokenKind::And)
            } else if text.ends_with(".eq") {
                Some(TokenKind::Equal)
            } else if text.ends_with(".ne") {
                Some(TokenKind::NotEqual)
            } else {
                None
            };
            if let Some(kind) = rewritten {
                self.unread(next.reclassified(kind));
                return Ok(token);
            }
        }
        self.unread(next);
        Ok(token)
    }

    /// Rule 6: `END` directly followed by `IF` contracts to `ENDIF`.
    fn end_if(&mut self, token: Token) -> Result<Token> {
        let next = self.pull()?;
        if next.kind() == TokenKind::If {
            let text = format!("{}{}", token.text(), next.text());
            let span = token.span().union(next.span());
            return Ok(Token::plain(TokenKind::EndIf, &text, span, token.file()));
        }
        self.unread(next);
        Ok(token)
    }

    /// Rule 8: `&` directly before a statement boundary marks a
    /// free-form continuation; the boundary itself is absorbed.
    fn continuation(&mut self, token: Token) -> Result<Token> {
        let next = self.pull()?;
        if next.is_eos() {
            return Ok(token.reclassified(TokenKind::Continuation));
        }
        self.unread(next);
        Ok(token)
    }
}

impl TokenStream for FixupStream {
    fn next_token(&mut self) -> Result<Token> {
        let token = self.pull()?;
        let out = self.apply(token)?;
        self.last_returned = Some(out.kind());
        Ok(out)
    }
}
