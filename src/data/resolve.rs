use crate::data::{DataRecord, DataRecords};
use crate::foundation::core::EDITOR_ESCAPE_ARTIFACT;

/// Keys tried for a raw element id, in lookup order.
///
/// The first occurrence of the editor escape `x5F_` is dropped, then the cleaned id is tried
/// whole and, failing that, truncated before its first `_`.
pub fn canonical_candidates(raw_id: &str) -> (String, String) {
    let cleaned = raw_id.replacen(EDITOR_ESCAPE_ARTIFACT, "", 1);
    let head = cleaned.split('_').next().unwrap_or_default().to_owned();
    (cleaned, head)
}

/// Resolve the record for a raw element id. A miss is `None`, never an error.
pub fn resolve<'a>(raw_id: &str, records: &'a DataRecords) -> Option<&'a DataRecord> {
    let (cleaned, head) = canonical_candidates(raw_id);
    records.get(&cleaned).or_else(|| records.get(&head))
}

#[cfg(test)]
#[path = "../../tests/unit/data/resolve.rs"]
mod tests;
