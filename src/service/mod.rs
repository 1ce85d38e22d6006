//! Patron mapping and the batch policy built on it.

pub mod batch;
pub mod patron;

pub use batch::{map_batch, BatchOptions, BatchOutcome, PatronEntry, Skipped};
pub use patron::{to_patron, ExtendedAttribute, Patron, REQUIRED_FIELDS};
