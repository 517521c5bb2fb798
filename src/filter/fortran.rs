//! Composed Fortran filter.
//!
//! Chains the passes a Fortran token stream needs, in order:
//! concatenation pre-pass, case-insensitive keyword reclassification,
//! end-of-statement synthesis, dialect normalization.

use std::sync::Arc;

use crate::filter::fortran_concat::ConcatStream;
use crate::filter::fortran_eos::EosStream;
use crate::filter::fortran_fixup::FixupStream;
use crate::filter::keyword::{KeywordFilter, KeywordTable};
use crate::filter::{LanguageFilter, TokenStream};
use crate::token::TokenKind;

/// Source form of the Fortran dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FortranForm {
    /// Column-sensitive legacy layout; `c`/`C` in column 1 starts a
    /// comment.
    Fixed,
    /// Modern layout; `!` starts a comment anywhere and `&` marks
    /// continuations.
    Free,
}

/// Language filter for fixed- or free-form Fortran.
pub struct FortranFilter {
    form: FortranForm,
    keywords: Arc<KeywordFilter>,
}

impl FortranFilter {
    #[must_use]
    pub fn new(form: FortranForm) -> FortranFilter {
        // Fortran is case-insensitive; the normalizer relies on these
        // statement keywords being classified before it runs.
        let mut table = KeywordTable::case_insensitive();
        table.add("end", TokenKind::End);
        table.add("if", TokenKind::If);
        table.add("endif", TokenKind::EndIf);
        FortranFilter {
            form,
            keywords: Arc::new(KeywordFilter::new(table)),
        }
    }

    #[must_use]
    pub fn form(&self) -> FortranForm {
        self.form
    }
}

impl LanguageFilter for FortranFilter {
    fn filtered_stream(&self, source: Box<dyn TokenStream>) -> Box<dyn TokenStream> {
        let concat = Box::new(ConcatStream::new(source));
        let keywords = self.keywords.filtered_stream(concat);
        let eos = Box::new(EosStream::new(keywords));
        Box::new(FixupStream::new(eos, self.form == FortranForm::Free))
    }
}
