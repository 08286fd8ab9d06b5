//! Fetch lifecycle for the record collection.
//!
//! [`Pager`] is a synchronous state machine. Every call that needs the network
//! hands back a [`Ticket`]; the caller runs the request (see [`driver`]) and
//! feeds the outcome back through [`Pager::complete`]. The pager decides which
//! completions are still live:
//!
//! - [`MergeMode::Replace`] keeps only the newest ticket. Anything older is
//!   dropped when it lands.
//! - [`MergeMode::Accumulate`] merges completions strictly in issue order.
//!   A completion that arrives early is buffered until its predecessors land.
//!
//! A reset to page 0 or a failed merge makes every outstanding ticket stale.

pub mod driver;

use std::collections::{BTreeMap, VecDeque};
use std::num::NonZeroUsize;

use roster_client::ClientError;
use roster_core::{LoadState, PageResponse, PageWindow, PageWindowError, User};
use roster_error::{ErrorPolicy, TracingPolicy};

pub use driver::FetchDriver;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PagerError {
    #[error(transparent)]
    InvalidWindow(#[from] PageWindowError),
    #[error("page {index} is out of range (page count {page_count})")]
    PageOutOfRange { index: usize, page_count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// One page at a time (table).
    #[default]
    Replace,
    /// Pages concatenate (infinite grid).
    Accumulate,
}

/// Tag carried by a request from dispatch to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    seq: u64,
    window: PageWindow,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }
}

/// What happened to a completion handed to [`Pager::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Merged, possibly together with buffered successors.
    Applied,
    /// Held back until earlier tickets land.
    Buffered,
    /// Superseded; ignored.
    Stale,
}

/// Result list as seen by the renderers.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    items: Vec<User>,
    total: usize,
    has_more: bool,
    loading: LoadState,
    error: Option<String>,
}

impl Accumulator {
    pub fn items(&self) -> &[User] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn loading(&self) -> LoadState {
        self.loading
    }

    pub fn is_pending(&self) -> bool {
        self.loading.is_pending()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

type Outcome = Result<PageResponse<User>, ClientError>;

#[derive(Debug)]
pub struct Pager {
    mode: MergeMode,
    window: PageWindow,
    /// Window of the page the items came from.
    applied: PageWindow,
    acc: Accumulator,
    next_seq: u64,
    in_flight: VecDeque<Ticket>,
    buffered: BTreeMap<u64, Outcome>,
}

impl Pager {
    pub fn new(mode: MergeMode, page_size: NonZeroUsize) -> Self {
        Self {
            mode,
            window: PageWindow::first(page_size),
            applied: PageWindow::first(page_size),
            acc: Accumulator::default(),
            next_seq: 0,
            in_flight: VecDeque::new(),
            buffered: BTreeMap::new(),
        }
    }

    pub fn mode(&self) -> MergeMode {
        self.mode
    }

    /// The most recently requested window.
    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// The window of the most recently merged page. Lags [`Pager::window`]
    /// while a request is pending or after one failed.
    pub fn applied_window(&self) -> PageWindow {
        self.applied
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.acc
    }

    /// Sequence numbers of tickets whose completion would still be used.
    pub fn live_seqs(&self) -> impl Iterator<Item = u64> + '_ {
        self.in_flight.iter().map(Ticket::seq)
    }

    /// Request `window`. Page 0 drops the current items right away.
    pub fn set_page_window(&mut self, window: PageWindow) -> Ticket {
        if window.is_first() {
            self.acc.items.clear();
            self.applied = window;
            self.discard_outstanding();
        }
        if self.mode == MergeMode::Replace {
            self.discard_outstanding();
        }
        self.acc.error = None;
        self.acc.loading = LoadState::Pending;
        self.window = window;

        self.next_seq += 1;
        let ticket = Ticket {
            seq: self.next_seq,
            window,
        };
        self.in_flight.push_back(ticket);
        tracing::debug!(
            seq = ticket.seq,
            page = window.page_index(),
            size = window.page_size(),
            mode = ?self.mode,
            "issue page request"
        );
        ticket
    }

    /// Next page with the same size, unless a request is pending or the
    /// server reported nothing further.
    pub fn load_more(&mut self) -> Option<Ticket> {
        if self.acc.is_pending() || !self.acc.has_more {
            return None;
        }
        Some(self.set_page_window(self.window.next()))
    }

    /// Re-issue the current window. `None` while a request is pending.
    pub fn retry(&mut self) -> Option<Ticket> {
        if self.acc.is_pending() {
            return None;
        }
        Some(self.set_page_window(self.window))
    }

    /// Switch merge semantics and restart from page 0 of the current size.
    pub fn set_mode(&mut self, mode: MergeMode) -> Ticket {
        self.mode = mode;
        let first = self.window.with_index(0);
        self.set_page_window(first)
    }

    pub fn complete(&mut self, ticket: Ticket, outcome: Outcome) -> Completion {
        let Some(pos) = self.in_flight.iter().position(|t| *t == ticket) else {
            tracing::debug!(seq = ticket.seq, "drop stale page completion");
            return Completion::Stale;
        };

        let completion = match self.mode {
            MergeMode::Replace => {
                self.in_flight.remove(pos);
                self.apply(ticket, outcome);
                Completion::Applied
            }
            MergeMode::Accumulate => {
                self.buffered.insert(ticket.seq, outcome);
                self.drain_in_order()
            }
        };

        if self.in_flight.is_empty() {
            self.acc.loading = LoadState::Finished;
        }
        completion
    }

    fn drain_in_order(&mut self) -> Completion {
        let mut applied = false;
        while let Some(front) = self.in_flight.front().copied() {
            let Some(outcome) = self.buffered.remove(&front.seq) else {
                break;
            };
            self.in_flight.pop_front();
            let failed = outcome.is_err();
            self.apply(front, outcome);
            applied = true;
            if failed {
                self.discard_outstanding();
                break;
            }
        }
        if applied {
            Completion::Applied
        } else {
            Completion::Buffered
        }
    }

    fn apply(&mut self, ticket: Ticket, outcome: Outcome) {
        let window = ticket.window;
        match outcome {
            Ok(page) => {
                let page_len = page.items.len();
                if self.mode == MergeMode::Replace || window.is_first() {
                    self.acc.items = page.items;
                } else {
                    self.acc.items.extend(page.items);
                }
                self.acc.total = page.total;
                self.applied = window;
                self.acc.has_more = window.skip().saturating_add(page_len) < page.total;
                tracing::debug!(
                    seq = ticket.seq,
                    page = window.page_index(),
                    received = page_len,
                    total = page.total,
                    has_more = self.acc.has_more,
                    "merge page"
                );
            }
            Err(err) => {
                tracing::debug!(seq = ticket.seq, page = window.page_index(), "page fetch failed");
                self.acc.error = Some(err.to_string());
                TracingPolicy.emit(&err.into());
                self.acc.has_more = false;
                self.acc.loading = LoadState::Finished;
            }
        }
    }

    fn discard_outstanding(&mut self) {
        self.in_flight.clear();
        self.buffered.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_test_utils::{page_slice, users};

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn serve(all: &[User], ticket: Ticket) -> Outcome {
        let w = ticket.window();
        Ok(PageResponse::new(
            page_slice(all, w.skip(), w.limit()).to_vec(),
            all.len(),
        ))
    }

    fn ids(acc: &Accumulator) -> Vec<u64> {
        acc.items().iter().map(|u| u.id.0).collect()
    }

    #[test]
    fn twelve_records_in_pages_of_five() {
        let all = users(1..=12);
        let mut pager = Pager::new(MergeMode::Accumulate, size(5));

        let t = pager.set_page_window(PageWindow::new(0, 5).unwrap());
        assert!(pager.accumulator().is_pending());
        pager.complete(t, serve(&all, t));
        assert_eq!(ids(pager.accumulator()), (1..=5).collect::<Vec<_>>());
        assert!(pager.accumulator().has_more());

        let t = pager.load_more().expect("second page");
        pager.complete(t, serve(&all, t));
        assert_eq!(pager.accumulator().items().len(), 10);
        assert!(pager.accumulator().has_more());

        let t = pager.load_more().expect("third page");
        assert_eq!(t.window().skip(), 10);
        pager.complete(t, serve(&all, t));
        assert_eq!(ids(pager.accumulator()), (1..=12).collect::<Vec<_>>());
        assert!(!pager.accumulator().has_more());
        assert_eq!(pager.accumulator().loading(), LoadState::Finished);

        assert!(pager.load_more().is_none());
    }

    #[test]
    fn load_more_is_a_no_op_while_pending() {
        let all = users(1..=20);
        let mut pager = Pager::new(MergeMode::Accumulate, size(5));
        let t = pager.set_page_window(PageWindow::new(0, 5).unwrap());
        pager.complete(t, serve(&all, t));

        let pending = pager.load_more().expect("has more");
        assert!(pager.load_more().is_none());
        assert!(pager.load_more().is_none());
        pager.complete(pending, serve(&all, pending));
        assert_eq!(pager.accumulator().items().len(), 10);
    }

    #[test]
    fn server_error_on_first_page() {
        let mut pager = Pager::new(MergeMode::Accumulate, size(10));
        let t = pager.set_page_window(PageWindow::new(0, 10).unwrap());
        let outcome = pager.complete(
            t,
            Err(ClientError::Api {
                status: 500,
                message: "Internal Server Error".into(),
                url: None,
                body_snippet: None,
            }),
        );
        assert_eq!(outcome, Completion::Applied);
        let acc = pager.accumulator();
        assert!(acc.is_empty());
        assert!(acc.error().is_some_and(|e| e.contains("500")));
        assert_eq!(acc.loading(), LoadState::Finished);
        assert!(!acc.has_more());
    }

    #[test]
    fn failure_keeps_items_and_retry_reissues_the_window() {
        let all = users(1..=12);
        let mut pager = Pager::new(MergeMode::Accumulate, size(5));
        let t = pager.set_page_window(PageWindow::new(0, 5).unwrap());
        pager.complete(t, serve(&all, t));

        let t = pager.load_more().unwrap();
        pager.complete(
            t,
            Err(ClientError::Request {
                message: "reset".into(),
                url: None,
                is_timeout: false,
            }),
        );
        assert_eq!(pager.accumulator().items().len(), 5);
        assert!(!pager.accumulator().has_more());
        assert!(pager.load_more().is_none());

        let again = pager.retry().expect("not pending");
        assert_eq!(again.window(), t.window());
        assert!(pager.accumulator().error().is_none());
        pager.complete(again, serve(&all, again));
        assert_eq!(pager.accumulator().items().len(), 10);
    }

    #[test]
    fn replace_mode_drops_superseded_completions() {
        let all = users(1..=30);
        let mut pager = Pager::new(MergeMode::Replace, size(10));
        let first = pager.set_page_window(PageWindow::new(1, 10).unwrap());
        let second = pager.set_page_window(PageWindow::new(2, 10).unwrap());

        assert_eq!(pager.complete(second, serve(&all, second)), Completion::Applied);
        assert_eq!(pager.complete(first, serve(&all, first)), Completion::Stale);
        assert_eq!(ids(pager.accumulator()), (21..=30).collect::<Vec<_>>());
        assert!(!pager.accumulator().is_pending());
    }

    #[test]
    fn replace_mode_keeps_items_until_the_next_page_lands() {
        let all = users(1..=30);
        let mut pager = Pager::new(MergeMode::Replace, size(10));
        let t = pager.set_page_window(PageWindow::new(0, 10).unwrap());
        pager.complete(t, serve(&all, t));

        let t = pager.set_page_window(PageWindow::new(1, 10).unwrap());
        assert_eq!(pager.accumulator().items().len(), 10);
        assert_eq!(pager.accumulator().items()[0].id.0, 1);
        pager.complete(t, serve(&all, t));
        assert_eq!(pager.accumulator().items()[0].id.0, 11);
    }

    #[test]
    fn failed_page_change_keeps_the_applied_window() {
        let all = users(1..=30);
        let mut pager = Pager::new(MergeMode::Replace, size(10));
        let first = pager.set_page_window(PageWindow::new(0, 10).unwrap());
        pager.complete(first, serve(&all, first));

        let next = pager.set_page_window(PageWindow::new(1, 10).unwrap());
        assert_eq!(pager.applied_window(), first.window());
        pager.complete(
            next,
            Err(ClientError::Request {
                message: "reset".into(),
                url: None,
                is_timeout: false,
            }),
        );
        assert_eq!(ids(pager.accumulator()), (1..=10).collect::<Vec<_>>());
        assert_eq!(pager.applied_window(), first.window());
        assert_eq!(pager.window(), next.window());

        let again = pager.retry().expect("not pending");
        assert_eq!(again.window(), next.window());
        pager.complete(again, serve(&all, again));
        assert_eq!(pager.applied_window(), next.window());
    }

    #[test]
    fn page_size_change_resets_to_first_page() {
        let all = users(1..=60);
        let mut pager = Pager::new(MergeMode::Replace, size(10));
        let t = pager.set_page_window(PageWindow::new(2, 10).unwrap());
        pager.complete(t, serve(&all, t));

        let t = pager.set_page_window(PageWindow::new(0, 25).unwrap());
        assert!(pager.accumulator().is_empty());
        pager.complete(t, serve(&all, t));
        assert_eq!(pager.window().page_index(), 0);
        assert_eq!(ids(pager.accumulator()), (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn accumulate_mode_merges_in_issue_order() {
        let all = users(1..=40);
        let mut pager = Pager::new(MergeMode::Accumulate, size(10));
        let p0 = pager.set_page_window(PageWindow::new(0, 10).unwrap());
        let p1 = pager.set_page_window(PageWindow::new(1, 10).unwrap());
        let p2 = pager.set_page_window(PageWindow::new(2, 10).unwrap());

        assert_eq!(pager.complete(p2, serve(&all, p2)), Completion::Buffered);
        assert_eq!(pager.complete(p1, serve(&all, p1)), Completion::Buffered);
        assert!(pager.accumulator().is_empty());
        assert!(pager.accumulator().is_pending());

        assert_eq!(pager.complete(p0, serve(&all, p0)), Completion::Applied);
        assert_eq!(ids(pager.accumulator()), (1..=30).collect::<Vec<_>>());
        assert!(!pager.accumulator().is_pending());
    }

    #[test]
    fn reset_makes_older_accumulate_tickets_stale() {
        let all = users(1..=40);
        let mut pager = Pager::new(MergeMode::Accumulate, size(10));
        let old = pager.set_page_window(PageWindow::new(0, 10).unwrap());
        let fresh = pager.set_page_window(PageWindow::new(0, 5).unwrap());

        assert_eq!(pager.complete(old, serve(&all, old)), Completion::Stale);
        assert!(pager.accumulator().is_pending());
        pager.complete(fresh, serve(&all, fresh));
        assert_eq!(ids(pager.accumulator()), (1..=5).collect::<Vec<_>>());
    }

    #[test]
    fn accumulate_failure_discards_queued_successors() {
        let all = users(1..=40);
        let mut pager = Pager::new(MergeMode::Accumulate, size(10));
        let p0 = pager.set_page_window(PageWindow::new(0, 10).unwrap());
        pager.complete(p0, serve(&all, p0));
        let p1 = pager.set_page_window(PageWindow::new(1, 10).unwrap());
        let p2 = pager.set_page_window(PageWindow::new(2, 10).unwrap());

        assert_eq!(pager.complete(p2, serve(&all, p2)), Completion::Buffered);
        pager.complete(
            p1,
            Err(ClientError::Request {
                message: "timeout".into(),
                url: None,
                is_timeout: true,
            }),
        );
        assert_eq!(pager.accumulator().items().len(), 10);
        assert!(pager.accumulator().error().is_some());
        assert!(!pager.accumulator().is_pending());
        assert_eq!(pager.live_seqs().count(), 0);
    }

    #[test]
    fn switching_mode_restarts_at_page_zero() {
        let all = users(1..=40);
        let mut pager = Pager::new(MergeMode::Replace, size(10));
        let t = pager.set_page_window(PageWindow::new(3, 10).unwrap());
        pager.complete(t, serve(&all, t));

        let t = pager.set_mode(MergeMode::Accumulate);
        assert_eq!(t.window(), PageWindow::new(0, 10).unwrap());
        assert!(pager.accumulator().is_empty());
        assert_eq!(pager.mode(), MergeMode::Accumulate);
    }
}
