//! Overlap detection for convention validity windows.
//!
//! For a fixed (client, category) scope no two active conventions may cover
//! the same day. The predicate here is the single source of truth for what
//! "cover the same day" means: intervals are inclusive at both ends and an
//! absent end extends to unbounded future.

use chrono::NaiveDate;

use crate::models::Convention;

/// True when the two date windows share at least one day.
///
/// Symmetric in its arguments. Boundary-inclusive: a window starting on the
/// exact day another one ends still intersects it.
pub fn windows_intersect(
    a_start: NaiveDate,
    a_end: Option<NaiveDate>,
    b_start: NaiveDate,
    b_end: Option<NaiveDate>,
) -> bool {
    let a_starts_before_b_ends = match b_end {
        Some(end) => a_start <= end,
        None => true,
    };
    let b_starts_before_a_ends = match a_end {
        Some(end) => b_start <= end,
        None => true,
    };
    a_starts_before_b_ends && b_starts_before_a_ends
}

/// Finds the first active convention whose window intersects the candidate
/// window, skipping `exclude_id` so an update never conflicts with itself.
pub fn find_conflict<'a>(
    existing: &'a [Convention],
    candidate_start: NaiveDate,
    candidate_end: Option<NaiveDate>,
    exclude_id: Option<i64>,
) -> Option<&'a Convention> {
    existing.iter().find(|c| {
        c.active
            && Some(c.id) != exclude_id
            && windows_intersect(
                c.validity_start,
                c.validity_end,
                candidate_start,
                candidate_end,
            )
    })
}
