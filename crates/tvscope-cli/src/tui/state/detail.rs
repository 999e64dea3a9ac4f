//! Show detail view state.
//!
//! Coordinates the primary detail fetch with the dependent episode
//! fetch and the independent similar-shows fetch. Episode responses
//! are tagged with the season they were requested for and discarded
//! when that season is no longer selected; every response is also
//! keyed by show ID so nothing from a previously viewed show can leak
//! into the current one.

use tvscope_api::tmdb::{Episode, FetchError, SeasonSummary, TvShow, TvShowDetails};

use super::remote::Remote;

/// Pane focus within the detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPane {
    /// Season selector.
    Seasons,
    /// Episode table.
    Episodes,
    /// Similar shows list.
    Similar,
}

/// A fetch the detail view needs dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailRequest {
    /// Fetch the show header.
    Detail(u64),
    /// Fetch similar shows.
    Similar(u64),
    /// Fetch one season's episodes.
    Episodes {
        /// Show the fetch belongs to.
        show_id: u64,
        /// Season number, checked again when the response arrives.
        season_number: u32,
    },
}

/// State for the show detail screen.
#[derive(Debug)]
pub struct DetailState {
    /// Show ID this view is bound to.
    pub show_id: u64,
    /// Primary detail fetch. Failure is terminal for the view.
    pub detail: Remote<TvShowDetails>,
    /// Similar shows. Failure degrades to an empty ready list.
    pub similar: Remote<Vec<TvShow>>,
    /// Season number the episode table is showing.
    pub selected_season: Option<u32>,
    /// Episodes of the selected season.
    pub episodes: Remote<Vec<Episode>>,
    /// Active pane.
    pub pane: DetailPane,
    /// Cursor in the season selector.
    pub season_cursor: usize,
    /// Cursor in the episode table.
    pub episode_cursor: usize,
    /// Cursor in the similar list.
    pub similar_cursor: usize,
}

impl DetailState {
    /// Creates the state for a show and returns the two initial
    /// fetches, dispatched concurrently by the caller.
    #[must_use]
    pub const fn open(show_id: u64) -> (Self, [DetailRequest; 2]) {
        (
            Self {
                show_id,
                detail: Remote::Loading,
                similar: Remote::Loading,
                selected_season: None,
                episodes: Remote::Loading,
                pane: DetailPane::Seasons,
                season_cursor: 0,
                episode_cursor: 0,
                similar_cursor: 0,
            },
            [
                DetailRequest::Detail(show_id),
                DetailRequest::Similar(show_id),
            ],
        )
    }

    /// Applies the primary detail result. On success the default season
    /// is selected and its episode fetch is returned for dispatch; a
    /// show without seasons settles the episode table empty. On failure
    /// the view is marked failed and no follow-up is issued.
    ///
    /// Results keyed to a different show ID are discarded.
    pub fn resolve_detail(
        &mut self,
        show_id: u64,
        result: Result<TvShowDetails, FetchError>,
    ) -> Option<DetailRequest> {
        if show_id != self.show_id {
            tracing::debug!(show_id, current = self.show_id, "detail response for a previous show dropped");
            return None;
        }
        match result {
            Ok(details) => {
                let season_number = default_season(&details.seasons);
                self.detail = Remote::Ready(details);
                self.selected_season = season_number;
                if let Some(season_number) = season_number {
                    self.episodes = Remote::Loading;
                    Some(DetailRequest::Episodes {
                        show_id: self.show_id,
                        season_number,
                    })
                } else {
                    self.episodes = Remote::Ready(Vec::new());
                    None
                }
            }
            Err(error) => {
                tracing::warn!(operation = error.operation(), %error, "detail fetch failed");
                self.detail = Remote::Failed;
                None
            }
        }
    }

    /// Applies the similar-shows result. Failure degrades to an empty
    /// ready list so the header join still settles.
    pub fn resolve_similar(&mut self, show_id: u64, result: Result<Vec<TvShow>, FetchError>) {
        if show_id != self.show_id {
            tracing::debug!(show_id, current = self.show_id, "similar response for a previous show dropped");
            return;
        }
        match result {
            Ok(shows) => self.similar = Remote::Ready(shows),
            Err(error) => {
                tracing::warn!(operation = error.operation(), %error, "similar fetch failed");
                self.similar = Remote::Ready(Vec::new());
            }
        }
    }

    /// Selects a season and returns its episode fetch. Reselecting the
    /// season already shown is a no-op and issues nothing.
    pub fn select_season(&mut self, season_number: u32) -> Option<DetailRequest> {
        if self.selected_season == Some(season_number) {
            return None;
        }
        self.selected_season = Some(season_number);
        self.episodes = Remote::Loading;
        self.episode_cursor = 0;
        Some(DetailRequest::Episodes {
            show_id: self.show_id,
            season_number,
        })
    }

    /// Applies an episode result tagged with the season it was fetched
    /// for. Accepted only while that season is still the selected one
    /// and the show ID still matches; otherwise the response is
    /// discarded regardless of arrival order. Failure degrades to an
    /// empty episode list. Returns `true` when applied.
    pub fn resolve_episodes(
        &mut self,
        show_id: u64,
        season_number: u32,
        result: Result<Vec<Episode>, FetchError>,
    ) -> bool {
        if show_id != self.show_id || self.selected_season != Some(season_number) {
            tracing::debug!(show_id, season_number, "episode response for a superseded selection dropped");
            return false;
        }
        match result {
            Ok(episodes) => self.episodes = Remote::Ready(episodes),
            Err(error) => {
                tracing::warn!(operation = error.operation(), %error, "episode fetch failed");
                self.episodes = Remote::Ready(Vec::new());
            }
        }
        self.episode_cursor = 0;
        true
    }

    /// `true` while the header region waits on the detail and similar
    /// fetches. Both must settle before it clears.
    #[must_use]
    pub const fn header_loading(&self) -> bool {
        self.detail.is_loading() || self.similar.is_loading()
    }

    /// Seasons offered in the selector, with specials filtered out.
    #[must_use]
    pub fn selectable_seasons(&self) -> Vec<&SeasonSummary> {
        self.detail.ready().map_or_else(Vec::new, |details| {
            details
                .seasons
                .iter()
                .filter(|season| season.season_number > 0)
                .collect()
        })
    }

    /// Season number under the selector cursor, if any.
    #[must_use]
    pub fn season_under_cursor(&self) -> Option<u32> {
        self.selectable_seasons()
            .get(self.season_cursor)
            .map(|season| season.season_number)
    }

    /// Episode under the table cursor, if any.
    #[must_use]
    pub fn selected_episode(&self) -> Option<&Episode> {
        self.episodes.ready()?.get(self.episode_cursor)
    }

    /// Similar show under the cursor, if any.
    #[must_use]
    pub fn selected_similar(&self) -> Option<&TvShow> {
        self.similar.ready()?.get(self.similar_cursor)
    }

    /// Cycles focus to the next pane.
    pub const fn focus_next_pane(&mut self) {
        self.pane = match self.pane {
            DetailPane::Seasons => DetailPane::Episodes,
            DetailPane::Episodes => DetailPane::Similar,
            DetailPane::Similar => DetailPane::Seasons,
        };
    }

    /// Moves the active pane's cursor up one row.
    pub const fn move_up(&mut self) {
        match self.pane {
            DetailPane::Seasons => self.season_cursor = self.season_cursor.saturating_sub(1),
            DetailPane::Episodes => self.episode_cursor = self.episode_cursor.saturating_sub(1),
            DetailPane::Similar => self.similar_cursor = self.similar_cursor.saturating_sub(1),
        }
    }

    /// Moves the active pane's cursor down one row, clamped to the
    /// pane's list length.
    pub fn move_down(&mut self) {
        match self.pane {
            DetailPane::Seasons => {
                let last = self.selectable_seasons().len().saturating_sub(1);
                self.season_cursor = self.season_cursor.saturating_add(1).min(last);
            }
            DetailPane::Episodes => {
                let last = self.episodes.ready().map_or(0, Vec::len).saturating_sub(1);
                self.episode_cursor = self.episode_cursor.saturating_add(1).min(last);
            }
            DetailPane::Similar => {
                let last = self.similar.ready().map_or(0, Vec::len).saturating_sub(1);
                self.similar_cursor = self.similar_cursor.saturating_add(1).min(last);
            }
        }
    }
}

/// Default season for a freshly loaded show: the lowest season number
/// greater than zero, falling back to the first season listed.
fn default_season(seasons: &[SeasonSummary]) -> Option<u32> {
    seasons
        .iter()
        .map(|season| season.season_number)
        .filter(|number| *number > 0)
        .min()
        .or_else(|| seasons.first().map(|season| season.season_number))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn season(number: u32) -> SeasonSummary {
        SeasonSummary {
            id: u64::from(number).wrapping_add(3000),
            name: format!("Season {number}"),
            season_number: number,
            episode_count: 10,
            poster_path: Some(String::from("/season.jpg")),
            overview: String::new(),
            air_date: Some(String::from("2008-01-20")),
        }
    }

    fn details(id: u64, season_numbers: &[u32]) -> TvShowDetails {
        TvShowDetails {
            id,
            name: String::from("Breaking Bad"),
            overview: String::from("A chemistry teacher turns to crime."),
            poster_path: Some(String::from("/poster.jpg")),
            backdrop_path: Some(String::from("/backdrop.jpg")),
            vote_average: 8.9,
            first_air_date: Some(String::from("2008-01-20")),
            original_language: String::from("en"),
            popularity: 500.0,
            number_of_seasons: u32::try_from(season_numbers.len()).unwrap(),
            number_of_episodes: 62,
            seasons: season_numbers.iter().map(|n| season(*n)).collect(),
            genres: Vec::new(),
            tagline: String::from("Change the equation."),
            status: Some(String::from("Ended")),
            networks: Vec::new(),
            created_by: Vec::new(),
        }
    }

    fn episode(season_number: u32, episode_number: u32) -> Episode {
        Episode {
            id: u64::from(season_number)
                .wrapping_mul(100)
                .wrapping_add(u64::from(episode_number)),
            episode_number,
            season_number,
            name: format!("Episode {episode_number}"),
            overview: String::new(),
            still_path: None,
            air_date: Some(String::from("2008-01-20")),
            runtime: Some(47),
            vote_average: 8.0,
        }
    }

    fn show(id: u64, name: &str) -> TvShow {
        TvShow {
            id,
            name: String::from(name),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: 8.0,
            first_air_date: None,
            genre_ids: Vec::new(),
            original_language: String::from("en"),
            popularity: 100.0,
        }
    }

    fn fetch_err(operation: &'static str) -> FetchError {
        FetchError::Provider {
            operation,
            status: reqwest::StatusCode::NOT_FOUND,
            message: String::from("The resource you requested could not be found."),
        }
    }

    #[test]
    fn test_open_issues_detail_and_similar_concurrently() {
        // Arrange & Act
        let (state, requests) = DetailState::open(1396);

        // Assert
        assert_eq!(
            requests,
            [DetailRequest::Detail(1396), DetailRequest::Similar(1396)]
        );
        assert!(state.detail.is_loading());
        assert!(state.similar.is_loading());
        assert!(state.header_loading());
    }

    #[test]
    fn test_default_season_skips_specials() {
        // Arrange
        let (mut state, _) = DetailState::open(1396);

        // Act
        let follow_up = state.resolve_detail(1396, Ok(details(1396, &[0, 1, 2])));

        // Assert
        assert_eq!(state.selected_season, Some(1));
        assert_eq!(
            follow_up,
            Some(DetailRequest::Episodes {
                show_id: 1396,
                season_number: 1,
            })
        );
        assert!(state.episodes.is_loading());
    }

    #[test]
    fn test_default_season_falls_back_to_first_listed() {
        // Arrange: only a specials season exists.
        let (mut state, _) = DetailState::open(1396);

        // Act
        let follow_up = state.resolve_detail(1396, Ok(details(1396, &[0])));

        // Assert
        assert_eq!(state.selected_season, Some(0));
        assert_eq!(
            follow_up,
            Some(DetailRequest::Episodes {
                show_id: 1396,
                season_number: 0,
            })
        );
    }

    #[test]
    fn test_no_seasons_settles_episodes_empty_without_fetch() {
        // Arrange
        let (mut state, _) = DetailState::open(1396);

        // Act
        let follow_up = state.resolve_detail(1396, Ok(details(1396, &[])));

        // Assert
        assert_eq!(follow_up, None);
        assert_eq!(state.selected_season, None);
        assert_eq!(state.episodes.ready().map(Vec::len), Some(0));
    }

    #[test]
    fn test_detail_failure_is_terminal() {
        // Arrange
        let (mut state, _) = DetailState::open(1396);

        // Act
        let follow_up = state.resolve_detail(1396, Err(fetch_err("tv_details")));

        // Assert: failed header, no dependent fetch.
        assert_eq!(follow_up, None);
        assert!(matches!(state.detail, Remote::Failed));
        assert_eq!(state.selected_season, None);
    }

    #[test]
    fn test_similar_failure_degrades_to_empty() {
        // Arrange
        let (mut state, _) = DetailState::open(1396);
        state.resolve_detail(1396, Ok(details(1396, &[1])));

        // Act
        state.resolve_similar(1396, Err(fetch_err("similar")));

        // Assert: the join settles; the detail itself is untouched.
        assert!(!state.header_loading());
        assert_eq!(state.similar.ready().map(Vec::len), Some(0));
        assert!(state.detail.ready().is_some());
    }

    #[test]
    fn test_header_settles_only_when_both_fetches_settle() {
        // Arrange
        let (mut state, _) = DetailState::open(1396);

        // Act & Assert
        state.resolve_detail(1396, Ok(details(1396, &[1])));
        assert!(state.header_loading());
        state.resolve_similar(1396, Ok(vec![show(60059, "Better Call Saul")]));
        assert!(!state.header_loading());
    }

    #[test]
    fn test_superseded_season_response_arriving_last_is_dropped() {
        // Arrange: season 2 selected while season 1 is still in flight.
        let (mut state, _) = DetailState::open(1396);
        state.resolve_detail(1396, Ok(details(1396, &[1, 2])));
        state.select_season(2);

        // Act: the newer selection resolves first, the stale one after.
        assert!(state.resolve_episodes(1396, 2, Ok(vec![episode(2, 1)])));
        let applied = state.resolve_episodes(1396, 1, Ok(vec![episode(1, 1)]));

        // Assert
        assert!(!applied);
        assert_eq!(state.episodes.ready().unwrap()[0].season_number, 2);
    }

    #[test]
    fn test_superseded_season_response_arriving_first_is_dropped() {
        // Arrange
        let (mut state, _) = DetailState::open(1396);
        state.resolve_detail(1396, Ok(details(1396, &[1, 2])));
        state.select_season(2);

        // Act: the stale season 1 response lands while season 2 is
        // still in flight.
        let applied = state.resolve_episodes(1396, 1, Ok(vec![episode(1, 1)]));

        // Assert: the table keeps loading until season 2 settles it.
        assert!(!applied);
        assert!(state.episodes.is_loading());
        assert!(state.resolve_episodes(1396, 2, Ok(vec![episode(2, 1)])));
        assert_eq!(state.episodes.ready().unwrap()[0].season_number, 2);
    }

    #[test]
    fn test_responses_for_a_previous_show_are_discarded() {
        // Arrange: the view moved on to a different show.
        let (mut state, _) = DetailState::open(100088);

        // Act: everything keyed to the old show arrives late.
        let follow_up = state.resolve_detail(1396, Ok(details(1396, &[1])));
        state.resolve_similar(1396, Ok(vec![show(60059, "Better Call Saul")]));
        let episodes_applied = state.resolve_episodes(1396, 1, Ok(vec![episode(1, 1)]));

        // Assert: nothing leaked into the new view.
        assert_eq!(follow_up, None);
        assert!(!episodes_applied);
        assert!(state.detail.is_loading());
        assert!(state.similar.is_loading());
        assert!(state.episodes.is_loading());
    }

    #[test]
    fn test_reselecting_current_season_is_a_noop() {
        // Arrange
        let (mut state, _) = DetailState::open(1396);
        state.resolve_detail(1396, Ok(details(1396, &[1, 2])));
        state.resolve_episodes(1396, 1, Ok(vec![episode(1, 1)]));

        // Act
        let request = state.select_season(1);

        // Assert: no refetch, the loaded table stays.
        assert_eq!(request, None);
        assert_eq!(state.episodes.ready().map(Vec::len), Some(1));
    }

    #[test]
    fn test_episode_failure_degrades_to_empty() {
        // Arrange
        let (mut state, _) = DetailState::open(1396);
        state.resolve_detail(1396, Ok(details(1396, &[1])));

        // Act
        let applied = state.resolve_episodes(1396, 1, Err(fetch_err("season_episodes")));

        // Assert
        assert!(applied);
        assert_eq!(state.episodes.ready().map(Vec::len), Some(0));
    }

    #[test]
    fn test_selector_hides_specials_season() {
        // Arrange
        let (mut state, _) = DetailState::open(1396);
        state.resolve_detail(1396, Ok(details(1396, &[0, 1, 2])));

        // Act
        let seasons = state.selectable_seasons();

        // Assert
        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].season_number, 1);
        assert_eq!(state.season_under_cursor(), Some(1));
    }

    #[test]
    fn test_pane_cycle_and_cursor_clamping() {
        // Arrange
        let (mut state, _) = DetailState::open(1396);
        state.resolve_detail(1396, Ok(details(1396, &[1, 2])));
        state.resolve_episodes(1396, 1, Ok(vec![episode(1, 1), episode(1, 2)]));

        // Act & Assert: season cursor clamps to the selector length.
        state.move_down();
        state.move_down();
        assert_eq!(state.season_cursor, 1);
        assert_eq!(state.season_under_cursor(), Some(2));

        state.focus_next_pane();
        assert_eq!(state.pane, DetailPane::Episodes);
        state.move_down();
        assert_eq!(state.selected_episode().unwrap().episode_number, 2);

        state.focus_next_pane();
        assert_eq!(state.pane, DetailPane::Similar);
        state.focus_next_pane();
        assert_eq!(state.pane, DetailPane::Seasons);
        state.move_up();
        assert_eq!(state.season_cursor, 0);
    }
}
