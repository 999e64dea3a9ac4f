//! Debounced search view state.
//!
//! Owns the live query text and decides when a search request is due
//! and whether a settling response is still current. Keystrokes restart
//! a quiet-period timer, each issued request carries a sequence tag,
//! and only a response tagged with the newest issued sequence may touch
//! the result list. The caller drives the clock and performs the
//! fetches.

use std::time::{Duration, Instant};

use tvscope_api::tmdb::{FetchError, TvShow, TvShowPage};

/// Quiet period after the last keystroke before a search is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Maximum number of results kept from one response.
pub const MAX_SEARCH_RESULTS: usize = 8;

/// Phase of the search view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Empty query, nothing to show.
    Idle,
    /// Non-empty query with a request scheduled or in flight.
    Pending,
    /// The newest issued request has settled.
    Settled,
}

/// A search request due for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Sequence tag checked again when the response arrives.
    pub seq: u64,
    /// Query text captured at issue time.
    pub query: String,
}

/// State for the search overlay.
#[derive(Debug)]
pub struct SearchState {
    /// Live query text.
    pub query: String,
    /// Settled results, at most [`MAX_SEARCH_RESULTS`].
    pub results: Vec<TvShow>,
    /// Cursor position in the result list.
    pub cursor: usize,
    phase: SearchPhase,
    deadline: Option<Instant>,
    next_seq: u64,
    latest_seq: u64,
}

impl SearchState {
    /// Creates an idle search state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            cursor: 0,
            phase: SearchPhase::Idle,
            deadline: None,
            next_seq: 1,
            latest_seq: 0,
        }
    }

    /// Records an edit to the query text at time `now`.
    ///
    /// A query with visible characters restarts the quiet-period timer.
    /// An empty or whitespace-only query clears the view synchronously
    /// with no request issued; the text stays as typed.
    pub fn input(&mut self, query: String, now: Instant) {
        if query.trim().is_empty() {
            self.clear();
            self.query = query;
            return;
        }
        self.query = query;
        self.phase = SearchPhase::Pending;
        self.deadline = now.checked_add(SEARCH_DEBOUNCE);
    }

    /// Clears the view: query and results are emptied, the pending
    /// timer is cancelled, and any in-flight response becomes stale.
    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.cursor = 0;
        self.phase = SearchPhase::Idle;
        self.deadline = None;
        // Consume a sequence number no request will ever carry.
        self.latest_seq = self.bump_seq();
    }

    /// Returns the pending quiet-period deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Issues the due request, if the quiet period has elapsed by `now`.
    ///
    /// At most one request is issued per elapsed timer. The caller
    /// dispatches the fetch and later feeds the tagged response back
    /// through [`Self::resolve`].
    pub fn take_due_request(&mut self, now: Instant) -> Option<SearchRequest> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.phase = SearchPhase::Pending;
        let seq = self.bump_seq();
        self.latest_seq = seq;
        Some(SearchRequest {
            seq,
            query: self.query.clone(),
        })
    }

    /// Applies a settled response tagged with `seq`.
    ///
    /// Responses whose tag is not the newest issued sequence number are
    /// discarded regardless of arrival order. A failed response settles
    /// the view with an empty result list. Returns `true` when the
    /// response was applied.
    pub fn resolve(&mut self, seq: u64, result: Result<TvShowPage, FetchError>) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "stale search response dropped");
            return false;
        }
        match result {
            Ok(page) => {
                self.results = page.results;
                self.results.truncate(MAX_SEARCH_RESULTS);
            }
            Err(error) => {
                tracing::warn!(operation = error.operation(), %error, "search failed");
                self.results.clear();
            }
        }
        self.cursor = 0;
        self.phase = SearchPhase::Settled;
        true
    }

    /// Moves the result cursor up one row.
    pub const fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the result cursor down one row.
    pub fn move_down(&mut self) {
        let last = self.results.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add(1).min(last);
    }

    /// Show under the cursor, if any.
    #[must_use]
    pub fn selected_show(&self) -> Option<&TvShow> {
        self.results.get(self.cursor)
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        seq
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn at(start: Instant, ms: u64) -> Instant {
        start.checked_add(Duration::from_millis(ms)).unwrap()
    }

    fn show(id: u64, name: &str) -> TvShow {
        TvShow {
            id,
            name: String::from(name),
            overview: String::from("overview"),
            poster_path: Some(String::from("/poster.jpg")),
            backdrop_path: Some(String::from("/backdrop.jpg")),
            vote_average: 8.0,
            first_air_date: Some(String::from("2020-01-01")),
            genre_ids: vec![18],
            original_language: String::from("en"),
            popularity: 100.0,
        }
    }

    fn page_of(ids: &[u64]) -> TvShowPage {
        TvShowPage {
            page: 1,
            results: ids.iter().map(|id| show(*id, "Show")).collect(),
            total_pages: 1,
            total_results: u32::try_from(ids.len()).unwrap(),
        }
    }

    fn fetch_err() -> FetchError {
        FetchError::Provider {
            operation: "search_tv",
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            message: String::from("Internal error"),
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        // Arrange & Act
        let state = SearchState::new();

        // Assert
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert!(state.query.is_empty());
        assert!(state.results.is_empty());
        assert_eq!(state.deadline(), None);
    }

    #[test]
    fn test_burst_of_keystrokes_issues_one_request() {
        // Arrange
        let t0 = Instant::now();
        let mut state = SearchState::new();

        // Act: three keystrokes inside one quiet period.
        state.input(String::from("b"), t0);
        state.input(String::from("br"), at(t0, 100));
        state.input(String::from("bre"), at(t0, 150));

        // Assert: nothing is due until 300ms after the last keystroke.
        assert_eq!(state.take_due_request(at(t0, 300)), None);
        assert_eq!(state.take_due_request(at(t0, 449)), None);
        let request = state.take_due_request(at(t0, 450)).unwrap();
        assert_eq!(request.query, "bre");
        assert_eq!(state.take_due_request(at(t0, 500)), None);
    }

    #[test]
    fn test_stale_response_arriving_last_is_dropped() {
        // Arrange: two requests issued in order.
        let t0 = Instant::now();
        let mut state = SearchState::new();
        state.input(String::from("bre"), t0);
        let first = state.take_due_request(at(t0, 300)).unwrap();
        state.input(String::from("break"), at(t0, 400));
        let second = state.take_due_request(at(t0, 700)).unwrap();

        // Act: the newer response lands first, the older one later.
        assert!(state.resolve(second.seq, Ok(page_of(&[2]))));
        let applied = state.resolve(first.seq, Ok(page_of(&[1])));

        // Assert: the late stale response did not overwrite anything.
        assert!(!applied);
        assert_eq!(state.results[0].id, 2);
        assert_eq!(state.phase(), SearchPhase::Settled);
    }

    #[test]
    fn test_stale_response_arriving_first_is_superseded() {
        // Arrange
        let t0 = Instant::now();
        let mut state = SearchState::new();
        state.input(String::from("bre"), t0);
        let first = state.take_due_request(at(t0, 300)).unwrap();
        state.input(String::from("break"), at(t0, 400));
        let second = state.take_due_request(at(t0, 700)).unwrap();

        // Act: responses arrive in issue order.
        let stale_applied = state.resolve(first.seq, Ok(page_of(&[1])));
        assert!(state.resolve(second.seq, Ok(page_of(&[2]))));

        // Assert
        assert!(!stale_applied);
        assert_eq!(state.results[0].id, 2);
    }

    #[test]
    fn test_response_applies_while_newer_keystroke_still_pending() {
        // Arrange: a request is in flight and a newer keystroke has
        // restarted the timer without issuing yet.
        let t0 = Instant::now();
        let mut state = SearchState::new();
        state.input(String::from("bre"), t0);
        let first = state.take_due_request(at(t0, 300)).unwrap();
        state.input(String::from("break"), at(t0, 350));

        // Act
        let applied = state.resolve(first.seq, Ok(page_of(&[1])));

        // Assert: still the newest issued request, so it applies, and
        // the newer keystroke's timer keeps running.
        assert!(applied);
        assert_eq!(state.results[0].id, 1);
        let second = state.take_due_request(at(t0, 650)).unwrap();
        assert_eq!(second.query, "break");
    }

    #[test]
    fn test_empty_query_clears_synchronously() {
        // Arrange: settled results plus a request in flight.
        let t0 = Instant::now();
        let mut state = SearchState::new();
        state.input(String::from("bre"), t0);
        let request = state.take_due_request(at(t0, 300)).unwrap();

        // Act: the query is emptied before the response lands.
        state.input(String::new(), at(t0, 350));

        // Assert: cleared immediately, no timer, and the in-flight
        // response is ignored when it finally arrives.
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert!(state.results.is_empty());
        assert_eq!(state.deadline(), None);
        assert!(!state.resolve(request.seq, Ok(page_of(&[1]))));
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_whitespace_only_query_clears_like_empty() {
        // Arrange: a request is in flight for a real query.
        let t0 = Instant::now();
        let mut state = SearchState::new();
        state.input(String::from("bre"), t0);
        let request = state.take_due_request(at(t0, 300)).unwrap();

        // Act: the text is replaced by blanks only.
        state.input(String::from("   "), at(t0, 350));

        // Assert: idle with the typed text kept, no timer ever fires,
        // and the in-flight response is ignored.
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert_eq!(state.query, "   ");
        assert!(state.results.is_empty());
        assert_eq!(state.deadline(), None);
        assert_eq!(state.take_due_request(at(t0, 900)), None);
        assert!(!state.resolve(request.seq, Ok(page_of(&[1]))));
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_clear_cancels_pending_timer() {
        // Arrange
        let t0 = Instant::now();
        let mut state = SearchState::new();
        state.input(String::from("bre"), t0);

        // Act
        state.clear();

        // Assert
        assert_eq!(state.take_due_request(at(t0, 600)), None);
        assert_eq!(state.phase(), SearchPhase::Idle);
    }

    #[test]
    fn test_failure_settles_with_empty_results() {
        // Arrange: earlier results are on screen.
        let t0 = Instant::now();
        let mut state = SearchState::new();
        state.input(String::from("bre"), t0);
        let first = state.take_due_request(at(t0, 300)).unwrap();
        state.resolve(first.seq, Ok(page_of(&[1])));
        state.input(String::from("break"), at(t0, 400));
        let second = state.take_due_request(at(t0, 700)).unwrap();

        // Act
        let applied = state.resolve(second.seq, Err(fetch_err()));

        // Assert: the view settles empty rather than staying pending.
        assert!(applied);
        assert_eq!(state.phase(), SearchPhase::Settled);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_results_truncated_to_first_eight() {
        // Arrange
        let t0 = Instant::now();
        let mut state = SearchState::new();
        state.input(String::from("bre"), t0);
        let request = state.take_due_request(at(t0, 300)).unwrap();

        // Act
        state.resolve(request.seq, Ok(page_of(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])));

        // Assert: first eight, provider order preserved.
        assert_eq!(state.results.len(), MAX_SEARCH_RESULTS);
        assert_eq!(state.results[0].id, 1);
        assert_eq!(state.results[7].id, 8);
    }

    #[test]
    fn test_cursor_moves_within_results() {
        // Arrange
        let t0 = Instant::now();
        let mut state = SearchState::new();
        state.input(String::from("bre"), t0);
        let request = state.take_due_request(at(t0, 300)).unwrap();
        state.resolve(request.seq, Ok(page_of(&[1, 2, 3])));

        // Act & Assert
        state.move_down();
        state.move_down();
        state.move_down();
        assert_eq!(state.cursor, 2);
        assert_eq!(state.selected_show().unwrap().id, 3);
        state.move_up();
        assert_eq!(state.cursor, 1);
    }
}
