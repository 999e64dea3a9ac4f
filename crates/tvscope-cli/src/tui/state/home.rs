//! Home screen view state.
//!
//! Four category rails are fetched concurrently on entry. The screen
//! leaves its loading state only once all four have settled, and a
//! failed category degrades to an empty rail without affecting the
//! others.

use tvscope_api::tmdb::{FetchError, TvShow};

use super::remote::Remote;

/// Number of leading backdrop-carrying trending shows eligible for the
/// featured panel.
const FEATURED_POOL: usize = 5;

/// Show categories presented on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Trending this week.
    Trending,
    /// Most popular.
    Popular,
    /// Highest rated.
    TopRated,
    /// Airing today.
    AiringToday,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [
        Self::Trending,
        Self::Popular,
        Self::TopRated,
        Self::AiringToday,
    ];

    /// Display label for the category tab.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trending => "Trending",
            Self::Popular => "Popular",
            Self::TopRated => "Top Rated",
            Self::AiringToday => "Airing Today",
        }
    }
}

/// State for the home screen.
#[derive(Debug)]
pub struct HomeState {
    /// Trending shows this week.
    pub trending: Remote<Vec<TvShow>>,
    /// Popular shows.
    pub popular: Remote<Vec<TvShow>>,
    /// Top rated shows.
    pub top_rated: Remote<Vec<TvShow>>,
    /// Shows airing today.
    pub airing_today: Remote<Vec<TvShow>>,
    /// Selected category tab.
    pub category: Category,
    /// Cursor in the selected category's list.
    pub cursor: usize,
}

impl HomeState {
    /// Creates the state with all four category fetches outstanding and
    /// returns the categories to dispatch, one fetch each.
    #[must_use]
    pub const fn new() -> (Self, [Category; 4]) {
        (
            Self {
                trending: Remote::Loading,
                popular: Remote::Loading,
                top_rated: Remote::Loading,
                airing_today: Remote::Loading,
                category: Category::Trending,
                cursor: 0,
            },
            Category::ALL,
        )
    }

    /// Applies one category result. Failure degrades that category to
    /// an empty ready list; the other rails are unaffected.
    pub fn resolve(&mut self, category: Category, result: Result<Vec<TvShow>, FetchError>) {
        let value = match result {
            Ok(shows) => Remote::Ready(shows),
            Err(error) => {
                tracing::warn!(operation = error.operation(), %error, "category fetch failed");
                Remote::Ready(Vec::new())
            }
        };
        *self.slot_mut(category) = value;
        if category == self.category {
            let last = self.current_shows().len().saturating_sub(1);
            self.cursor = self.cursor.min(last);
        }
    }

    /// `true` until all four category fetches settle.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.trending.is_loading()
            || self.popular.is_loading()
            || self.top_rated.is_loading()
            || self.airing_today.is_loading()
    }

    /// Shows of the selected category, empty until settled.
    #[must_use]
    pub fn current_shows(&self) -> &[TvShow] {
        self.slot(self.category).ready().map_or(&[], Vec::as_slice)
    }

    /// The featured show: the most popular of the first
    /// [`FEATURED_POOL`] trending entries that carry a backdrop,
    /// falling back to the first trending show.
    #[must_use]
    pub fn featured(&self) -> Option<&TvShow> {
        let trending = self.trending.ready()?;
        trending
            .iter()
            .filter(|show| show.backdrop_path.is_some())
            .take(FEATURED_POOL)
            .max_by(|a, b| a.popularity.total_cmp(&b.popularity))
            .or_else(|| trending.first())
    }

    /// Show under the cursor, if any.
    #[must_use]
    pub fn selected_show(&self) -> Option<&TvShow> {
        self.current_shows().get(self.cursor)
    }

    /// Switches to the next category tab and resets the cursor.
    pub const fn next_category(&mut self) {
        self.category = match self.category {
            Category::Trending => Category::Popular,
            Category::Popular => Category::TopRated,
            Category::TopRated => Category::AiringToday,
            Category::AiringToday => Category::Trending,
        };
        self.cursor = 0;
    }

    /// Switches to the previous category tab and resets the cursor.
    pub const fn prev_category(&mut self) {
        self.category = match self.category {
            Category::Trending => Category::AiringToday,
            Category::Popular => Category::Trending,
            Category::TopRated => Category::Popular,
            Category::AiringToday => Category::TopRated,
        };
        self.cursor = 0;
    }

    /// Moves the cursor up one row.
    pub const fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor down one row, clamped to the list length.
    pub fn move_down(&mut self) {
        let last = self.current_shows().len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add(1).min(last);
    }

    const fn slot(&self, category: Category) -> &Remote<Vec<TvShow>> {
        match category {
            Category::Trending => &self.trending,
            Category::Popular => &self.popular,
            Category::TopRated => &self.top_rated,
            Category::AiringToday => &self.airing_today,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Remote<Vec<TvShow>> {
        match category {
            Category::Trending => &mut self.trending,
            Category::Popular => &mut self.popular,
            Category::TopRated => &mut self.top_rated,
            Category::AiringToday => &mut self.airing_today,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn show(id: u64, popularity: f64, backdrop: bool) -> TvShow {
        TvShow {
            id,
            name: format!("Show {id}"),
            overview: String::new(),
            poster_path: Some(String::from("/poster.jpg")),
            backdrop_path: backdrop.then(|| String::from("/backdrop.jpg")),
            vote_average: 8.0,
            first_air_date: Some(String::from("2020-01-01")),
            genre_ids: Vec::new(),
            original_language: String::from("en"),
            popularity,
        }
    }

    fn fetch_err() -> FetchError {
        FetchError::Provider {
            operation: "trending",
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            message: String::from("Internal error"),
        }
    }

    #[test]
    fn test_new_dispatches_all_four_categories() {
        // Arrange & Act
        let (state, categories) = HomeState::new();

        // Assert
        assert_eq!(categories, Category::ALL);
        assert!(state.is_loading());
        assert_eq!(state.category, Category::Trending);
    }

    #[test]
    fn test_loading_clears_only_when_all_categories_settle() {
        // Arrange
        let (mut state, _) = HomeState::new();

        // Act & Assert: three of four settled keeps the screen loading.
        state.resolve(Category::Trending, Ok(vec![show(1, 10.0, true)]));
        state.resolve(Category::Popular, Ok(vec![show(2, 10.0, true)]));
        state.resolve(Category::TopRated, Ok(vec![show(3, 10.0, true)]));
        assert!(state.is_loading());

        state.resolve(Category::AiringToday, Ok(vec![show(4, 10.0, true)]));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failed_category_degrades_without_affecting_others() {
        // Arrange
        let (mut state, _) = HomeState::new();

        // Act
        state.resolve(Category::Trending, Err(fetch_err()));
        state.resolve(Category::Popular, Ok(vec![show(2, 10.0, true)]));
        state.resolve(Category::TopRated, Ok(vec![show(3, 10.0, true)]));
        state.resolve(Category::AiringToday, Ok(vec![show(4, 10.0, true)]));

        // Assert
        assert!(!state.is_loading());
        assert_eq!(state.trending.ready().map(Vec::len), Some(0));
        assert_eq!(state.popular.ready().map(Vec::len), Some(1));
    }

    #[test]
    fn test_featured_picks_most_popular_with_backdrop() {
        // Arrange: the most popular overall has no backdrop and the
        // most popular backdrop sits beyond the leading trending slots.
        let (mut state, _) = HomeState::new();
        state.resolve(
            Category::Trending,
            Ok(vec![
                show(1, 500.0, false),
                show(2, 50.0, true),
                show(3, 80.0, true),
                show(4, 30.0, true),
                show(5, 20.0, true),
                show(6, 10.0, true),
                show(7, 999.0, true),
            ]),
        );

        // Act
        let featured = state.featured().unwrap();

        // Assert: only the first five backdrop carriers are eligible.
        assert_eq!(featured.id, 3);
    }

    #[test]
    fn test_featured_falls_back_to_first_show_without_backdrops() {
        // Arrange
        let (mut state, _) = HomeState::new();
        state.resolve(
            Category::Trending,
            Ok(vec![show(1, 10.0, false), show(2, 99.0, false)]),
        );

        // Act & Assert
        assert_eq!(state.featured().unwrap().id, 1);
    }

    #[test]
    fn test_featured_is_none_while_loading_or_empty() {
        // Arrange
        let (mut state, _) = HomeState::new();

        // Act & Assert
        assert!(state.featured().is_none());
        state.resolve(Category::Trending, Ok(Vec::new()));
        assert!(state.featured().is_none());
    }

    #[test]
    fn test_category_cycle_resets_cursor() {
        // Arrange
        let (mut state, _) = HomeState::new();
        state.resolve(
            Category::Trending,
            Ok(vec![show(1, 10.0, true), show(2, 10.0, true)]),
        );
        state.move_down();

        // Act
        state.next_category();

        // Assert
        assert_eq!(state.category, Category::Popular);
        assert_eq!(state.cursor, 0);
        state.prev_category();
        assert_eq!(state.category, Category::Trending);
    }

    #[test]
    fn test_cursor_clamps_to_current_list() {
        // Arrange
        let (mut state, _) = HomeState::new();
        state.resolve(
            Category::Trending,
            Ok(vec![show(1, 10.0, true), show(2, 10.0, true)]),
        );

        // Act & Assert
        state.move_down();
        state.move_down();
        state.move_down();
        assert_eq!(state.cursor, 1);
        assert_eq!(state.selected_show().unwrap().id, 2);
        state.move_up();
        state.move_up();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_resolving_displayed_category_clamps_cursor() {
        // Arrange: cursor sits on a long list, then the rail re-settles
        // shorter than the cursor position.
        let (mut state, _) = HomeState::new();
        state.resolve(
            Category::Trending,
            Ok(vec![
                show(1, 10.0, true),
                show(2, 10.0, true),
                show(3, 10.0, true),
            ]),
        );
        state.move_down();
        state.move_down();

        // Act
        state.resolve(Category::Trending, Ok(vec![show(9, 10.0, true)]));

        // Assert
        assert_eq!(state.cursor, 0);
        assert_eq!(state.selected_show().unwrap().id, 9);
    }
}
