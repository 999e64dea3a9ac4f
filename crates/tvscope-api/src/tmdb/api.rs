//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::FetchError;
use super::types::{Episode, SearchTvParams, TvShow, TvShowDetails, TvShowPage};

/// Catalog API trait.
///
/// Abstracts the eight catalog operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches this week's trending TV shows.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP request, the provider status,
    /// or JSON decoding fails.
    async fn trending(&self) -> Result<Vec<TvShow>, FetchError>;

    /// Fetches popular TV shows.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP request, the provider status,
    /// or JSON decoding fails.
    async fn popular(&self) -> Result<Vec<TvShow>, FetchError>;

    /// Fetches top-rated TV shows.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP request, the provider status,
    /// or JSON decoding fails.
    async fn top_rated(&self) -> Result<Vec<TvShow>, FetchError>;

    /// Fetches TV shows airing today.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP request, the provider status,
    /// or JSON decoding fails.
    async fn airing_today(&self) -> Result<Vec<TvShow>, FetchError>;

    /// Fetches TV show details including the season list.
    ///
    /// `series_id` must be a positive provider ID.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP request, the provider status,
    /// or JSON decoding fails.
    async fn tv_details(&self, series_id: u64) -> Result<TvShowDetails, FetchError>;

    /// Fetches the episodes of one season, ordered by episode number.
    ///
    /// `season_number` must be a number reported in the show's season
    /// list. A season with no episodes yet yields an empty list, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP request, the provider status,
    /// or JSON decoding fails.
    async fn season_episodes(
        &self,
        series_id: u64,
        season_number: u32,
    ) -> Result<Vec<Episode>, FetchError>;

    /// Fetches shows similar to the given one.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP request, the provider status,
    /// or JSON decoding fails.
    async fn similar(&self, series_id: u64) -> Result<Vec<TvShow>, FetchError>;

    /// Searches TV shows by free text.
    ///
    /// Callers must not issue a request for an empty query; an empty
    /// query means "no search", not "search for the empty string".
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP request, the provider status,
    /// or JSON decoding fails.
    async fn search_tv(&self, params: &SearchTvParams) -> Result<TvShowPage, FetchError>;
}
