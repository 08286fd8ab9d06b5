//! Table pagination: maps footer interactions onto page windows.

use roster_core::PageWindow;

use crate::pager::{Accumulator, Pager, PagerError, Ticket};

/// `ceil(total / page_size)`; zero when the collection is empty.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// `first–last of total` for the items fetched with `window`, one-based, e.g. `11–20 of 208`.
pub fn range_label(window: PageWindow, acc: &Accumulator) -> String {
    let shown = acc.items().len();
    if shown == 0 {
        return format!("0–0 of {}", acc.total());
    }
    let first = window.skip() + 1;
    let last = window.skip() + shown;
    format!("{first}–{last} of {}", acc.total())
}

/// Rows the table draws while a page is pending.
pub fn placeholder_rows(window: PageWindow, acc: &Accumulator) -> usize {
    if acc.is_pending() { window.page_size() } else { 0 }
}

/// New page size always restarts at page 0.
pub fn change_page_size(pager: &mut Pager, page_size: usize) -> Result<Ticket, PagerError> {
    let window = PageWindow::new(0, page_size)?;
    Ok(pager.set_page_window(window))
}

pub fn change_page(pager: &mut Pager, page_index: usize) -> Result<Ticket, PagerError> {
    let current = pager.window();
    let total = pager.accumulator().total();
    let pages = page_count(total, current.page_size());
    // Before the first response there is no total to check against.
    if total > 0 && page_index >= pages {
        return Err(PagerError::PageOutOfRange {
            index: page_index,
            page_count: pages,
        });
    }
    Ok(pager.set_page_window(current.with_index(page_index)))
}

/// Relative moves start from the page on screen once a request has failed.
fn paging_base(pager: &Pager) -> PageWindow {
    if pager.accumulator().error().is_some() {
        pager.applied_window()
    } else {
        pager.window()
    }
}

pub fn next_page(pager: &mut Pager) -> Option<Ticket> {
    let next = paging_base(pager).page_index().checked_add(1)?;
    change_page(pager, next).ok()
}

pub fn prev_page(pager: &mut Pager) -> Option<Ticket> {
    let prev = paging_base(pager).page_index().checked_sub(1)?;
    change_page(pager, prev).ok()
}

/// The option after `current`, wrapping around. Unknown sizes map to the first option.
pub fn cycle_page_size(current: usize, options: &[usize]) -> Option<usize> {
    let first = *options.first()?;
    let next = options
        .iter()
        .position(|&o| o == current)
        .and_then(|i| options.get(i + 1).copied())
        .unwrap_or(first);
    Some(next)
}
