//! lexfilter - Token-stream filtering pipeline for C, C++ and Fortran lexers
//!
//! Rewrites, reclassifies, splits, merges and suppresses tokens between
//! an upstream scanner and a downstream parser. Filters are pull-based
//! stream adapters selected per language and dialect flavor.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod filter;
pub mod registry;
pub mod token;

// Re-export commonly used types
pub use config::FilterConfig;
pub use error::Result;
pub use filter::{
    FortranFilter, FortranForm, KeywordFilter, KeywordTable, LanguageFilter, TokenStream,
    VecTokenSource,
};
pub use registry::filter_for;
pub use token::{Span, Token, TokenKind};
