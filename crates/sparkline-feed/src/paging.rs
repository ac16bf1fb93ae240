// File: crates/sparkline-feed/src/paging.rs
// Summary: `(skip, limit)` pagination state for infinite-scroll loaders.
// Notes:
// - At most one page is in flight: `begin` refuses while `loading_more` is set.
// - Exhaustion is inferred from consecutive empty pages. The tolerance is a tunable,
//   not an API guarantee; the default of 1 tolerates a single empty page.

/// Offset-based page request; no cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: usize,
    pub limit: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pager {
    skip: usize,
    limit: usize,
    loading_more: bool,
    consecutive_empty: usize,
    empty_page_tolerance: usize,
    exhausted: bool,
}

impl Pager {
    pub const DEFAULT_EMPTY_PAGE_TOLERANCE: usize = 1;

    pub fn new(limit: usize) -> Self {
        Self {
            skip: 0,
            limit: limit.max(1),
            loading_more: false,
            consecutive_empty: 0,
            empty_page_tolerance: Self::DEFAULT_EMPTY_PAGE_TOLERANCE,
            exhausted: false,
        }
    }

    pub fn with_empty_page_tolerance(mut self, tolerance: usize) -> Self {
        self.empty_page_tolerance = tolerance;
        self
    }

    /// Claim the next page. `None` while a page is in flight or once exhausted.
    pub fn begin(&mut self) -> Option<PageRequest> {
        if self.loading_more || self.exhausted {
            return None;
        }
        self.loading_more = true;
        Some(PageRequest { skip: self.skip, limit: self.limit })
    }

    /// Record a finished page holding `count` items.
    pub fn complete(&mut self, count: usize) {
        if !self.loading_more {
            tracing::warn!(count, "page completed without a matching begin; ignoring");
            return;
        }
        self.loading_more = false;
        self.skip += self.limit;
        if count == 0 {
            self.consecutive_empty += 1;
            if self.consecutive_empty > self.empty_page_tolerance {
                tracing::debug!(skip = self.skip, empty = self.consecutive_empty, "pagination exhausted");
                self.exhausted = true;
            }
        } else {
            self.consecutive_empty = 0;
        }
    }

    /// Record a failed page; the same page is requested again next time.
    pub fn fail(&mut self) {
        self.loading_more = false;
    }

    /// Start over from the first page (pull-to-refresh).
    pub fn reset(&mut self) {
        *self = Self::new(self.limit).with_empty_page_tolerance(self.empty_page_tolerance);
    }

    pub fn is_loading(&self) -> bool { self.loading_more }

    pub fn has_more(&self) -> bool { !self.exhausted }

    pub fn skip(&self) -> usize { self.skip }

    pub fn limit(&self) -> usize { self.limit }
}
