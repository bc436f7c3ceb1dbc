//! Core definitions (error type, result alias, argument checks), relied upon by all
//! quicksuggest-* crates.

pub mod error;
pub mod result;

pub use result::Result;
