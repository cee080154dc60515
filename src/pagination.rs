use serde::Serialize;

use crate::dto::envelope::ListResponse;

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// `ceil(total_count / page_size)`; zero rows or a zero page size give zero pages.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Paging fields of a list screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub page_no: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl PageState {
    /// Empty state on page 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_no: 1,
            page_size,
            total_count: 0,
            total_pages: 0,
        }
    }

    /// Whether `page` is a valid navigation target.
    pub fn contains_page(&self, page: usize) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// Page numbers to render, with `None` marking a gap.
    pub fn page_links(&self) -> Vec<Option<usize>> {
        get_pages(self.total_pages, self.page_no, 2, 2, 4, 2)
    }
}

/// Rows together with the paging fields they were loaded with.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageSnapshot<R> {
    pub rows: Vec<R>,
    pub page: PageState,
}

/// Computes the next rows and paging fields from a fetch result.
///
/// A loaded page replaces everything. A failed fetch (`None`) clears the rows
/// but keeps the previous counts.
pub fn apply_page_result<R>(current: &PageState, result: Option<ListResponse<R>>) -> PageSnapshot<R> {
    match result {
        Some(ListResponse { rows, pagination }) => PageSnapshot {
            rows,
            page: PageState {
                page_no: pagination.page_no.max(1),
                page_size: pagination.page_size,
                total_count: pagination.total_count,
                total_pages: total_pages(pagination.total_count, pagination.page_size),
            },
        },
        None => PageSnapshot {
            rows: Vec::new(),
            page: *current,
        },
    }
}
