//! Record matching.
//!
//! A record matches a criteria map when, for every `(field, expected)` pair,
//! the record carries `field` and its value contains `expected` ignoring case.
//! Criteria are combined with AND only. A record without a referenced field
//! does not match; it is not treated as an empty string.

use crate::model::{Criteria, Record};

/// Returns `true` if `record` satisfies every criterion.
pub fn matches(record: &Record, criteria: &Criteria) -> bool {
    criteria.iter().all(|(field, expected)| {
        let Some(value) = record.get(field) else {
            return false;
        };
        value.to_lowercase().contains(&expected.to_lowercase())
    })
}

/// Keeps the records that satisfy `criteria`, preserving their order.
///
/// Empty criteria keep everything.
pub fn filter(records: &[Record], criteria: &Criteria) -> Vec<Record> {
    if criteria.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| matches(record, criteria))
        .cloned()
        .collect()
}
