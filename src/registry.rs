//! Language registry.
//!
//! Maps a language name plus an optional dialect flavor to a singleton
//! filter instance. Filters are constructed lazily on first request and
//! cached for the lifetime of the process; the cache is never evicted.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use crate::filter::lang::{self, CppStandard, GnuCppFilter};
use crate::filter::{FortranFilter, FortranForm, LanguageFilter};

/// Recognized language names.
pub const LANG_C: &str = "Standard C";
pub const LANG_GNU_C: &str = "GNU C";
pub const LANG_CPP: &str = "Standard C++";
pub const LANG_GNU_CPP: &str = "GNU C++";
pub const LANG_FORTRAN: &str = "Fortran";

/// Recognized flavor strings.
pub const FLAVOR_CPP98: &str = "C++98";
pub const FLAVOR_CPP11: &str = "C++11";
pub const FLAVOR_CPP14: &str = "C++14";
pub const FLAVOR_CPP17: &str = "C++17";
pub const FLAVOR_FORTRAN_FIXED: &str = "fixed";
pub const FLAVOR_FORTRAN_FREE: &str = "free";

type FilterCache = HashMap<String, Arc<dyn LanguageFilter>>;

static FILTERS: LazyLock<Mutex<FilterCache>> = LazyLock::new(|| Mutex::new(HashMap::new()));

/// Look up (constructing and caching on first use) the filter for
/// `language` and `flavor`.
///
/// Returns `None` for unknown language names after a stderr warning;
/// callers treat an absent filter as "pass tokens through unfiltered".
#[must_use]
pub fn filter_for(language: &str, flavor: &str) -> Option<Arc<dyn LanguageFilter>> {
    // NUL cannot appear in recognized names, so the key is unambiguous.
    let key = format!("{language}\u{0}{flavor}");
    let mut cache = FILTERS.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(filter) = cache.get(&key) {
        return Some(Arc::clone(filter));
    }
    let filter = construct(language, flavor)?;
    cache.insert(key, Arc::clone(&filter));
    Some(filter)
}

fn construct(language: &str, flavor: &str) -> Option<Arc<dyn LanguageFilter>> {
    match language {
        LANG_C => Some(Arc::new(lang::standard_c())),
        LANG_GNU_C => Some(Arc::new(lang::gnu_c())),
        LANG_CPP => Some(Arc::new(lang::standard_cpp())),
        LANG_GNU_CPP => Some(Arc::new(GnuCppFilter::new(cpp_standard(flavor)).build())),
        LANG_FORTRAN => Some(Arc::new(FortranFilter::new(fortran_form(flavor)))),
        other => {
            eprintln!("Warning: no token filter registered for language '{other}'");
            None
        }
    }
}

fn cpp_standard(flavor: &str) -> CppStandard {
    match flavor {
        FLAVOR_CPP11 => CppStandard::Cpp11,
        FLAVOR_CPP14 => CppStandard::Cpp14,
        FLAVOR_CPP17 => CppStandard::Cpp17,
        // C++98 keywords are the safe floor for unrecognized flavors.
        _ => CppStandard::Cpp98,
    }
}

fn fortran_form(flavor: &str) -> FortranForm {
    if flavor == FLAVOR_FORTRAN_FREE {
        FortranForm::Free
    } else {
        FortranForm::Fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{TokenStream, VecTokenSource};
    use crate::token::{Span, Token, TokenKind};

    #[test]
    fn test_known_languages_resolve() {
        assert!(filter_for(LANG_C, "").is_some());
        assert!(filter_for(LANG_GNU_C, "").is_some());
        assert!(filter_for(LANG_CPP, "").is_some());
        assert!(filter_for(LANG_GNU_CPP, FLAVOR_CPP17).is_some());
        assert!(filter_for(LANG_FORTRAN, FLAVOR_FORTRAN_FIXED).is_some());
        assert!(filter_for(LANG_FORTRAN, FLAVOR_FORTRAN_FREE).is_some());
    }

    #[test]
    fn test_unknown_language_returns_none() {
        assert!(filter_for("COBOL", "").is_none());
    }

    #[test]
    fn test_same_key_yields_cached_instance() {
        let a = filter_for(LANG_GNU_C, "").unwrap();
        let b = filter_for(LANG_GNU_C, "").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_distinct_flavors_yield_distinct_instances() {
        let cpp11 = filter_for(LANG_GNU_CPP, FLAVOR_CPP11).unwrap();
        let cpp98 = filter_for(LANG_GNU_CPP, FLAVOR_CPP98).unwrap();
        assert!(!Arc::ptr_eq(&cpp11, &cpp98));
    }

    #[test]
    fn test_resolved_filter_reclassifies() {
        let filter = filter_for(LANG_GNU_C, "").unwrap();
        let tok = Token::plain(TokenKind::Identifier, "typeof", Span::default(), "t.c");
        let mut stream = filter.filtered_stream(Box::new(VecTokenSource::new(vec![tok])));
        assert_eq!(
            stream.next_token().unwrap().kind(),
            TokenKind::Keyword("typeof")
        );
    }
}
