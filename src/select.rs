//! Selection of the most recent publications from a raw record list.

use crate::models::Publication;

/// Filter, order, and truncate a raw publication list.
///
/// Records without a usable year are dropped silently: profiles commonly
/// list in-progress work with an empty year column, and those entries are
/// not an error. Survivors are sorted by parsed year descending; ties keep
/// their input order. At most `limit` records are returned, and an empty
/// result is a valid outcome the caller must distinguish from a retrieval
/// failure.
pub fn select_recent(records: Vec<Publication>, limit: usize) -> Vec<Publication> {
    let total = records.len();

    let mut dated: Vec<(i32, Publication)> = records
        .into_iter()
        .filter_map(|p| p.year().map(|y| (y, p)))
        .collect();

    let dropped = total - dated.len();
    if dropped > 0 {
        tracing::debug!("dropped {} of {} records without a usable year", dropped, total);
    }

    // sort_by is stable, so same-year records keep their listing order
    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated.truncate(limit);

    dated.into_iter().map(|(_, p)| p).collect()
}
