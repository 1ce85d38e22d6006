//! Map many records at once: skip-and-report by default, abort on first failure in strict mode.

use crate::config::KohaSettings;
use crate::error::MappingError;
use crate::record::{Record, Scalar};
use crate::service::patron::{to_patron, Patron};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default)]
pub struct BatchOptions {
    /// Return `{koha, raw}` pairs instead of bare payloads.
    pub include_raw: bool,
    /// Fail the whole batch on the first record that cannot be mapped.
    pub strict: bool,
}

/// One successfully mapped record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PatronEntry {
    Payload(Patron),
    WithRaw { koha: Patron, raw: Record },
}

impl PatronEntry {
    pub fn new(patron: Patron, raw: Record, include_raw: bool) -> Self {
        if include_raw {
            PatronEntry::WithRaw { koha: patron, raw }
        } else {
            PatronEntry::Payload(patron)
        }
    }

    pub fn patron(&self) -> &Patron {
        match self {
            PatronEntry::Payload(p) => p,
            PatronEntry::WithRaw { koha, .. } => koha,
        }
    }
}

/// A record left out of the batch and why.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Skipped {
    pub reg_no: Scalar,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub patrons: Vec<PatronEntry>,
    pub skipped: Vec<Skipped>,
}

pub fn map_batch(
    records: Vec<Record>,
    koha: &KohaSettings,
    options: BatchOptions,
) -> Result<BatchOutcome, MappingError> {
    let mut outcome = BatchOutcome::default();
    for record in records {
        match to_patron(&record, koha) {
            Ok(patron) => outcome
                .patrons
                .push(PatronEntry::new(patron, record, options.include_raw)),
            Err(err) => {
                let reg_no = record.get("reg_no").cloned().unwrap_or(Scalar::Null);
                if options.strict {
                    tracing::warn!(reason = %err, reg_no = ?reg_no, "aborting strict batch on record with missing fields");
                    return Err(err);
                }
                tracing::warn!(reason = %err, reg_no = ?reg_no, "skipping record due to missing fields");
                outcome.skipped.push(Skipped {
                    reg_no,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(outcome)
}
