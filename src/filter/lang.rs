//! Per-language keyword vocabularies for C, GNU C, C++ and GNU C++.
//!
//! Each language is a [`KeywordFilter`] whose table is populated at
//! construction. GNU dialects layer their extension spellings on top of
//! the standard table; GNU C++ additionally layers the keywords each
//! selected C++ standard introduced.

use crate::filter::keyword::{KeywordFilter, KeywordTable};
use crate::token::TokenKind;

/// C++ standard selected by the GNU C++ flavor string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CppStandard {
    Cpp98,
    Cpp11,
    Cpp14,
    Cpp17,
}

macro_rules! kw {
    ($($name:literal),* $(,)?) => {
        &[$(($name, TokenKind::Keyword($name))),*]
    };
}

/// ISO C89/C99 keywords.
const C_KEYWORDS: &[(&str, TokenKind)] = kw![
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef", "union",
    "unsigned", "void", "volatile", "while", "_Bool", "_Complex", "_Imaginary",
];

/// GNU extensions layered on top of C or C++.
const GNU_EXTENSIONS: &[(&str, TokenKind)] = kw![
    "__attribute__",
    "__asm__",
    "__asm",
    "asm",
    "__const__",
    "__extension__",
    "__inline__",
    "__inline",
    "__restrict__",
    "__restrict",
    "restrict",
    "__signed__",
    "__typeof__",
    "__typeof",
    "typeof",
    "__volatile__",
    "__alignof__",
    "__builtin_va_list",
    "__complex__",
    "__imag__",
    "__real__",
    "__label__",
    "__thread",
];

/// ISO C++98 keywords (beyond the shared C set).
const CPP_KEYWORDS: &[(&str, TokenKind)] = kw![
    "bool", "catch", "class", "const_cast", "delete", "dynamic_cast", "explicit", "export",
    "false", "friend", "mutable", "namespace", "new", "operator", "private", "protected",
    "public", "reinterpret_cast", "static_cast", "template", "this", "throw", "true", "try",
    "typeid", "typename", "using", "virtual", "wchar_t", "and", "and_eq", "bitand", "bitor",
    "compl", "not", "not_eq", "or", "or_eq", "xor", "xor_eq",
];

/// Keywords C++11 introduced. C++14 and C++17 added no further keywords.
const CPP11_KEYWORDS: &[(&str, TokenKind)] = kw![
    "alignas",
    "alignof",
    "char16_t",
    "char32_t",
    "constexpr",
    "decltype",
    "noexcept",
    "nullptr",
    "static_assert",
    "thread_local",
];

/// Standard C filter: the ISO keyword set, case-sensitive.
#[must_use]
pub fn standard_c() -> KeywordFilter {
    let mut table = KeywordTable::case_sensitive();
    table.add_all(C_KEYWORDS);
    KeywordFilter::new(table)
}

/// GNU C filter: Standard C plus the GNU extension spellings.
#[must_use]
pub fn gnu_c() -> KeywordFilter {
    let mut table = KeywordTable::case_sensitive();
    table.add_all(C_KEYWORDS);
    table.add_all(GNU_EXTENSIONS);
    KeywordFilter::new(table)
}

/// Standard C++ filter: the shared C set plus C++98 keywords.
#[must_use]
pub fn standard_cpp() -> KeywordFilter {
    let mut table = KeywordTable::case_sensitive();
    table.add_all(C_KEYWORDS);
    table.add_all(CPP_KEYWORDS);
    KeywordFilter::new(table)
}

/// GNU C++ filter builder. Layers the GNU extensions and the selected
/// standard's keywords over the C++ base; further caller-supplied lists
/// can be added before the filter is finalized.
#[derive(Debug)]
pub struct GnuCppFilter {
    table: KeywordTable,
}

impl GnuCppFilter {
    #[must_use]
    pub fn new(standard: CppStandard) -> GnuCppFilter {
        let mut table = KeywordTable::case_sensitive();
        table.add_all(C_KEYWORDS);
        table.add_all(CPP_KEYWORDS);
        table.add_all(GNU_EXTENSIONS);
        if standard != CppStandard::Cpp98 {
            table.add_all(CPP11_KEYWORDS);
        }
        GnuCppFilter { table }
    }

    /// Layer an externally supplied keyword list (e.g. vendor-specific
    /// additions for a particular dialect).
    #[must_use]
    pub fn with_extra(mut self, entries: &[(&str, TokenKind)]) -> GnuCppFilter {
        self.table.add_all(entries);
        self
    }

    #[must_use]
    pub fn build(self) -> KeywordFilter {
        KeywordFilter::new(self.table)
    }
}
