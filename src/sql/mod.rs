//! SQL text for the record source.

mod builder;
pub use builder::*;
