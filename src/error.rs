//! Error types and result aliases for lexfilter.
//!
//! All fallible operations in the pipeline share one alias:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the crate

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;
