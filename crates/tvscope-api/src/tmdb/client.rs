//! `TmdbClient` - TMDB API client implementation.

use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalCatalogApi;
use super::error::{ClientBuildError, FetchError};
use super::types::{
    Episode, SearchTvParams, TmdbErrorResponse, TvSeason, TvShow, TvShowDetails, TvShowPage,
};

/// Default base URL for TMDB API v3. Must end with a slash so endpoint
/// paths append instead of replacing the version segment.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// TMDB API client.
///
/// Each operation performs exactly one network call. There is no retry,
/// no rate limiting, and no caching; repeated identical calls re-fetch.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests (trailing slash required).
    base_url: Url,
    /// API key, sent as the `api_key` query parameter on every request.
    api_key: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests). Must end with a
    /// slash.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient, ClientBuildError> {
        let api_key = self.api_key.ok_or(ClientBuildError::MissingApiKey)?;
        let user_agent = self.user_agent.ok_or(ClientBuildError::MissingUserAgent)?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http_client = Client::builder().user_agent(&user_agent).gzip(true).build()?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends one GET request with the `api_key` query parameter and
    /// decodes the JSON body.
    ///
    /// The credential rides in the query string, so only the path is
    /// logged, never the full URL.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(operation, path, "TMDB API request");

        let response = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|source| FetchError::Transport { operation, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = serde_json::from_str::<TmdbErrorResponse>(&body)
                .map_or_else(|_| body, |error| error.status_message);
            return Err(FetchError::Provider {
                operation,
                status,
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport { operation, source })?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode { operation, source })
    }

    /// Fetches one page of shows and returns its results.
    async fn get_show_list(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<Vec<TvShow>, FetchError> {
        let page: TvShowPage = self.get_json(operation, path, &[]).await?;
        Ok(page.results)
    }
}

impl LocalCatalogApi for TmdbClient {
    #[instrument(skip_all)]
    async fn trending(&self) -> Result<Vec<TvShow>, FetchError> {
        self.get_show_list("trending", "trending/tv/week").await
    }

    #[instrument(skip_all)]
    async fn popular(&self) -> Result<Vec<TvShow>, FetchError> {
        self.get_show_list("popular", "tv/popular").await
    }

    #[instrument(skip_all)]
    async fn top_rated(&self) -> Result<Vec<TvShow>, FetchError> {
        self.get_show_list("top_rated", "tv/top_rated").await
    }

    #[instrument(skip_all)]
    async fn airing_today(&self) -> Result<Vec<TvShow>, FetchError> {
        self.get_show_list("airing_today", "tv/airing_today").await
    }

    #[instrument(skip_all)]
    async fn tv_details(&self, series_id: u64) -> Result<TvShowDetails, FetchError> {
        let path = format!("tv/{series_id}");
        let mut details: TvShowDetails = self.get_json("tv_details", &path, &[]).await?;
        // Seasons ordered by season number; specials (0) first.
        details.seasons.sort_by_key(|season| season.season_number);
        Ok(details)
    }

    #[instrument(skip_all)]
    async fn season_episodes(
        &self,
        series_id: u64,
        season_number: u32,
    ) -> Result<Vec<Episode>, FetchError> {
        let path = format!("tv/{series_id}/season/{season_number}");
        let mut season: TvSeason = self.get_json("season_episodes", &path, &[]).await?;
        season.episodes.sort_by_key(|episode| episode.episode_number);
        Ok(season.episodes)
    }

    #[instrument(skip_all)]
    async fn similar(&self, series_id: u64) -> Result<Vec<TvShow>, FetchError> {
        let path = format!("tv/{series_id}/similar");
        self.get_show_list("similar", &path).await
    }

    #[instrument(skip_all)]
    async fn search_tv(&self, params: &SearchTvParams) -> Result<TvShowPage, FetchError> {
        let query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("page", params.page.to_string()),
        ];
        self.get_json("search_tv", "search/tv", &query).await
    }
}
