#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use crate::net::types::{MatchResult, Portfolio};

/// Queue runs this low after an advance -> fetch the next page.
pub const REFILL_THRESHOLD: usize = 1;

/// How many further pages to probe when a page comes back empty.
pub const EMPTY_PAGE_PROBES: u32 = 5;

/// Horizontal drag distance (px) that commits a swipe decision.
pub const SWIPE_THRESHOLD: f64 = 100.0;

/// Outcome of advancing the feed by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next image of the current candidate.
    NextImage,
    /// Current candidate exhausted; popped, next candidate is showing.
    NextCandidate,
    /// Current candidate exhausted and the queue is now empty.
    QueueEmpty,
    /// Nothing to advance.
    NoOp,
}

/// State for the swipe feed: the candidate queue and progress through the
/// current candidate's images.
///
/// Invariant: the candidate on screen is always `queue[0]`, and
/// `current_image_index` resets to 0 whenever the head changes.
#[derive(Clone, Debug, Default)]
pub struct FeedState {
    pub queue: Vec<Portfolio>,
    pub current_image_index: usize,
    /// Next page to request from the portfolio endpoint.
    pub next_page: u32,
    pub loading: bool,
    pub error: Option<String>,
    /// Ephemeral match to show in the modal; cleared on dismissal.
    pub match_result: Option<MatchResult>,
    /// Consecutive empty pages absorbed during the current load.
    empty_probes: u32,
}

impl FeedState {
    /// The candidate currently on screen.
    pub fn current(&self) -> Option<&Portfolio> {
        self.queue.first()
    }

    /// URL of the image currently on screen.
    pub fn current_image(&self) -> Option<&str> {
        self.current()
            .and_then(|p| p.portfolio_image_url.get(self.current_image_index))
            .map(String::as_str)
    }

    /// Mark a page fetch as started. Returns `false` (and changes nothing)
    /// when a fetch is already in flight; re-entrant loads are ignored.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.empty_probes = 0;
        true
    }

    /// Absorb one fetched page during a load.
    ///
    /// An empty page is probed past: the probe count goes up and the next
    /// page number to request comes back. A non-empty page, or the page
    /// after `EMPTY_PAGE_PROBES` consecutive empties, settles the load and
    /// returns `None`.
    pub fn absorb_page(&mut self, candidates: Vec<Portfolio>, page: u32) -> Option<u32> {
        if candidates.is_empty() && self.empty_probes < EMPTY_PAGE_PROBES {
            self.empty_probes += 1;
            return Some(page + 1);
        }
        self.finish_load(candidates, page + 1);
        None
    }

    /// Append a fetched page and record which page comes next.
    pub fn finish_load(&mut self, candidates: Vec<Portfolio>, next_page: u32) {
        self.queue.extend(candidates);
        self.next_page = next_page;
        self.loading = false;
    }

    /// Mark a page fetch as failed.
    pub fn fail_load(&mut self, error: String) {
        self.error = Some(error);
        self.loading = false;
    }

    /// Step forward: next image of the current candidate, or pop to the
    /// next candidate once its images are exhausted. Advancing an empty
    /// queue is a no-op; the queue never underflows.
    pub fn advance(&mut self) -> Advance {
        let Some(current) = self.queue.first() else {
            return Advance::NoOp;
        };

        if self.current_image_index + 1 < current.portfolio_image_url.len() {
            self.current_image_index += 1;
            return Advance::NextImage;
        }

        self.queue.remove(0);
        self.current_image_index = 0;
        if self.queue.is_empty() {
            Advance::QueueEmpty
        } else {
            Advance::NextCandidate
        }
    }

    /// Whether the queue has drained to the low-water mark and the next
    /// page should be requested.
    pub fn needs_refill(&self) -> bool {
        self.queue.len() <= REFILL_THRESHOLD && !self.loading
    }

    /// Record a decision response; only mutual matches are surfaced.
    pub fn record_decision(&mut self, result: MatchResult) {
        if result.matched {
            self.match_result = Some(result);
        }
    }

    /// Dismiss the match modal, discarding the result.
    pub fn dismiss_match(&mut self) {
        self.match_result = None;
    }
}

/// Map a completed horizontal drag to a decision: right past the threshold
/// is a dislike, left past the threshold a like, anything shorter a no-op.
pub fn swipe_decision(offset_x: f64) -> Option<crate::net::types::LikeStatus> {
    if offset_x.abs() <= SWIPE_THRESHOLD {
        return None;
    }
    if offset_x > 0.0 {
        Some(crate::net::types::LikeStatus::Dislike)
    } else {
        Some(crate::net::types::LikeStatus::Like)
    }
}
