use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-based index of this page.
    pub page_index: usize,
    pub page_size: usize,
    /// Never zero: an empty list still has one (empty) page.
    pub page_count: usize,
    /// Number of items the window was cut from.
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// First page of an empty list
    pub fn empty(page_size: NonZeroUsize) -> Self {
        Self {
            items: Vec::new(),
            page_info: PageInfo {
                page_index: 1,
                page_size: page_size.get(),
                page_count: 1,
                total: 0,
                has_prev: false,
                has_next: false,
            },
        }
    }
}

/// `max(1, ceil(total / page_size))`
pub fn page_count(total: usize, page_size: NonZeroUsize) -> usize {
    total.div_ceil(page_size.get()).max(1)
}

/// Pull a 1-based page index back into `1..=page_count`.
pub fn clamp_page_index(page_index: usize, total: usize, page_size: NonZeroUsize) -> usize {
    page_index.clamp(1, page_count(total, page_size))
}

/// Cut the window `[(page_index-1)*page_size, page_index*page_size)` out of `items`.
///
/// An index past the last page yields an empty window with `has_next == false`.
/// Index `0` is read as the first page.
pub fn paginate<T: Clone>(items: &[T], page_index: usize, page_size: NonZeroUsize) -> Page<T> {
    let size = page_size.get();
    let index = page_index.max(1);
    let total = items.len();

    let start = (index - 1).saturating_mul(size);
    let window = if start >= total {
        Vec::new()
    } else {
        let end = start.saturating_add(size).min(total);
        items[start..end].to_vec()
    };

    Page {
        items: window,
        page_info: PageInfo {
            page_index: index,
            page_size: size,
            page_count: page_count(total, page_size),
            total,
            has_prev: index > 1,
            has_next: index.saturating_mul(size) < total,
        },
    }
}
