use std::cmp::Ordering;

use crate::state_file::SiblingFile;

/// Relationship between the union of discovered spans and `[0, total)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilesCoverage {
    /// The spans tile `[0, total)` exactly, with no gaps and no overlaps.
    Complete,
    /// One or more spans are missing; more workers still have to report.
    Incomplete,
    /// The spans overlap or are otherwise inconsistent. Requires manual
    /// cleanup; nothing is ever repaired or deleted automatically.
    Broken,
}

/// Classifies the coverage of sibling spans, assumed sorted by `(from, to)`.
///
/// Walks the sorted list with a cursor starting at 0: a span beginning before
/// the cursor overlaps an earlier one, a span beginning after it leaves a
/// gap, otherwise the cursor advances to the span's end. Coverage is complete
/// when the cursor lands exactly on `total`; running past `total` means the
/// files are inconsistent with the declared workload.
pub fn classify(siblings: &[SiblingFile], total: u64) -> StateFilesCoverage {
    let mut cursor = 0u64;
    for sibling in siblings {
        if sibling.from >= sibling.to {
            return StateFilesCoverage::Broken;
        }
        match sibling.from.cmp(&cursor) {
            Ordering::Less => return StateFilesCoverage::Broken,
            Ordering::Greater => return StateFilesCoverage::Incomplete,
            Ordering::Equal => cursor = sibling.to,
        }
    }
    match cursor.cmp(&total) {
        Ordering::Less => StateFilesCoverage::Incomplete,
        Ordering::Equal => StateFilesCoverage::Complete,
        Ordering::Greater => StateFilesCoverage::Broken,
    }
}
