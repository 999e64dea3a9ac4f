//! TMDB API response types and search parameters.
//!
//! All records are plain immutable values deserialized per response;
//! nothing here is merged or cached across calls.

use serde::Deserialize;

// --- Show lists ---

/// One page of TV shows as returned by the list and search endpoints.
///
/// `trending/tv/week`, `tv/popular`, `tv/top_rated`, `tv/airing_today`,
/// `tv/{id}/similar`, and `search/tv` all share this envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct TvShowPage {
    /// Current page number.
    pub page: u32,
    /// Shows on this page, in provider order.
    pub results: Vec<TvShow>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// A TV show summary as returned by list and search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TvShow {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Overview text (may be empty).
    #[serde(default)]
    pub overview: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Vote average (0.0 to 10.0).
    pub vote_average: f64,
    /// First air date (YYYY-MM-DD or null).
    pub first_air_date: Option<String>,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
}

// --- TV details ---

/// Response from the `tv/{series_id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TvShowDetails {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Overview text (may be empty).
    #[serde(default)]
    pub overview: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Vote average (0.0 to 10.0).
    pub vote_average: f64,
    /// First air date (YYYY-MM-DD or null).
    pub first_air_date: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Total number of seasons.
    pub number_of_seasons: u32,
    /// Total number of episodes.
    pub number_of_episodes: u32,
    /// Season summaries. Season number 0 denotes specials.
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Tagline (may be empty).
    #[serde(default)]
    pub tagline: String,
    /// Status (e.g., "Returning Series", "Ended").
    pub status: Option<String>,
    /// Broadcasting networks.
    #[serde(default)]
    pub networks: Vec<Network>,
    /// Series creators.
    #[serde(default)]
    pub created_by: Vec<Creator>,
}

/// Season summary within TV details.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonSummary {
    /// TMDB season ID.
    pub id: u64,
    /// Season name.
    pub name: String,
    /// Season number (0 = specials).
    pub season_number: u32,
    /// Number of episodes in this season.
    pub episode_count: u32,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Season overview (may be empty).
    #[serde(default)]
    pub overview: String,
    /// Air date of this season.
    pub air_date: Option<String>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Broadcasting network entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Network {
    /// Network ID.
    pub id: u64,
    /// Network name.
    pub name: String,
    /// Logo image path.
    pub logo_path: Option<String>,
}

/// Series creator entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Creator {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Profile image path.
    pub profile_path: Option<String>,
}

// --- TV season details ---

/// Response from the `tv/{series_id}/season/{season_number}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TvSeason {
    /// TMDB season ID.
    pub id: u64,
    /// Season name.
    pub name: Option<String>,
    /// Season number.
    pub season_number: u32,
    /// Season overview.
    pub overview: Option<String>,
    /// Air date.
    pub air_date: Option<String>,
    /// Episodes in this season. A season with no episodes yet is a
    /// valid state and deserializes to an empty list.
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// A single episode within a season.
#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    /// TMDB episode ID.
    pub id: u64,
    /// Episode number within the season (1-based).
    pub episode_number: u32,
    /// Season number this episode belongs to.
    pub season_number: u32,
    /// Episode name.
    #[serde(default)]
    pub name: String,
    /// Episode overview (may be empty).
    #[serde(default)]
    pub overview: String,
    /// Still image path.
    pub still_path: Option<String>,
    /// Air date (YYYY-MM-DD or null).
    pub air_date: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Vote average (0.0 to 10.0).
    #[serde(default)]
    pub vote_average: f64,
}

// --- Error response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    pub success: bool,
}

// --- Search parameters ---

/// Parameters for the `search/tv` endpoint.
#[derive(Debug, Clone)]
pub struct SearchTvParams {
    /// Search query (required, must be non-empty).
    pub query: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
}

impl SearchTvParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}
