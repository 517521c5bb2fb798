//! Keyword reclassification.
//!
//! A [`KeywordTable`] maps identifier text to the keyword kind it should
//! be reclassified to. Tables are populated during filter construction
//! and immutable afterwards; case sensitivity is chosen once per table.
//! [`KeywordFilter`] wraps any upstream stream and rewrites matching
//! `Identifier` tokens on the way through.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::Result;
use crate::filter::{LanguageFilter, TokenStream};
use crate::token::{Token, TokenKind};

/// Immutable-after-construction keyword lookup table.
#[derive(Debug)]
pub struct KeywordTable {
    entries: HashMap<String, TokenKind>,
    keyword_kinds: HashSet<TokenKind>,
    case_insensitive: bool,
}

impl KeywordTable {
    /// Exact-match table.
    #[must_use]
    pub fn case_sensitive() -> KeywordTable {
        KeywordTable {
            entries: HashMap::new(),
            keyword_kinds: HashSet::new(),
            case_insensitive: false,
        }
    }

    /// Case-folded table: lookups match registered keys regardless of
    /// case.
    #[must_use]
    pub fn case_insensitive() -> KeywordTable {
        KeywordTable {
            entries: HashMap::new(),
            keyword_kinds: HashSet::new(),
            case_insensitive: true,
        }
    }

    /// Register `text` as a keyword reclassified to `kind`.
    ///
    /// Only valid during filter construction; tables are read-only once
    /// a stream has been created over them.
    pub fn add(&mut self, text: &str, kind: TokenKind) {
        let key = if self.case_insensitive {
            text.to_ascii_lowercase()
        } else {
            text.to_string()
        };
        self.entries.insert(key, kind);
        self.keyword_kinds.insert(kind);
    }

    /// Bulk registration, in table order.
    pub fn add_all(&mut self, entries: &[(&str, TokenKind)]) {
        for (text, kind) in entries {
            self.add(text, *kind);
        }
    }

    /// Reclassification target for `text`, if registered.
    #[must_use]
    pub fn lookup(&self, text: &str) -> Option<TokenKind> {
        if self.case_insensitive {
            self.entries.get(&text.to_ascii_lowercase()).copied()
        } else {
            self.entries.get(text).copied()
        }
    }

    /// Whether `kind` was produced by some registration in this table.
    #[must_use]
    pub fn is_keyword_kind(&self, kind: TokenKind) -> bool {
        self.keyword_kinds.contains(&kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Language filter that reclassifies identifiers via a keyword table.
#[derive(Debug)]
pub struct KeywordFilter {
    table: Arc<KeywordTable>,
}

impl KeywordFilter {
    #[must_use]
    pub fn new(table: KeywordTable) -> KeywordFilter {
        KeywordFilter {
            table: Arc::new(table),
        }
    }

    /// Whether `token` would be (or already is) classified as a keyword
    /// by this filter.
    #[must_use]
    pub fn is_keyword(&self, token: &Token) -> bool {
        self.table.is_keyword_kind(token.kind()) || self.table.lookup(token.text()).is_some()
    }

    /// Whether `kind` belongs to this filter's registered keyword kinds.
    #[must_use]
    pub fn is_keyword_kind(&self, kind: TokenKind) -> bool {
        self.table.is_keyword_kind(kind)
    }

    #[must_use]
    pub fn table(&self) -> &Arc<KeywordTable> {
        &self.table
    }
}

impl LanguageFilter for KeywordFilter {
    fn filtered_stream(&self, source: Box<dyn TokenStream>) -> Box<dyn TokenStream> {
        Box::new(KeywordStream {
            table: Arc::clone(&self.table),
            source,
        })
    }
}

/// Lazy single-pass reclassifying view over an upstream stream.
struct KeywordStream {
    table: Arc<KeywordTable>,
    source: Box<dyn TokenStream>,
}

impl TokenStream for KeywordStream {
    fn next_token(&mut self) -> Result<Token> {
        let token = self.source.next_token()?;
        if token.kind() == TokenKind::Identifier {
            if let Some(kind) = self.table.lookup(token.text()) {
                return Ok(token.reclassified(kind));
            }
        }
        // A pre-classified literal keeps its surface kind unless its
        // literal kind is itself a registered keyword kind (spellings
        // like `true` that are simultaneously literal and keyword).
        if let Some(literal_kind) = token.literal_kind() {
            if self.table.is_keyword_kind(literal_kind) {
                return Ok(token.reclassified(literal_kind));
            }
        }
        Ok(token)
    }
}
