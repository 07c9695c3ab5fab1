//! Pure roster transformations: filter, sort, page window and lookup.
//!
//! Nothing here fails for expected conditions. An empty filter result, a page
//! past the end and a missing id are all ordinary return values.

use std::num::NonZeroUsize;

use listing_core::{Page, SortSpec};

use crate::contract::model::{RosterField, UserRecord};

/// Case-insensitive substring match over name, email, city and company name,
/// plus a plain substring match over the decimal id. An empty query keeps
/// every record.
pub fn apply_filter(records: &[UserRecord], query: &str) -> Vec<UserRecord> {
    if query.is_empty() {
        return records.to_vec();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches_query(r, query, &needle))
        .cloned()
        .collect()
}

fn matches_query(record: &UserRecord, raw: &str, folded: &str) -> bool {
    [
        &record.name,
        &record.email,
        &record.city,
        &record.company_name,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(folded))
        || record.id.to_string().contains(raw)
}

/// Stable sort by the chosen column. Ties keep their incoming order.
pub fn apply_sort(mut records: Vec<UserRecord>, sort: &SortSpec<RosterField>) -> Vec<UserRecord> {
    listing_core::sort_stable(&mut records, sort);
    records
}

/// Window `[(page_index-1)*page_size, page_index*page_size)` of `sorted`.
pub fn paginate(
    sorted: &[UserRecord],
    page_index: usize,
    page_size: NonZeroUsize,
) -> Page<UserRecord> {
    listing_core::paginate(sorted, page_index, page_size)
}

/// First record carrying `id`, in snapshot order.
pub fn select_record(records: &[UserRecord], id: u64) -> Option<&UserRecord> {
    records.iter().find(|r| r.id == id)
}
