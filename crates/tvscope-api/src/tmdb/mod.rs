//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 TV endpoints and maps the
//! JSON payloads into the catalog record types.

mod api;
mod client;
mod error;
mod images;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use error::{ClientBuildError, FetchError};
pub use images::{IMAGE_PLACEHOLDER, SIZE_ORIGINAL, SIZE_W92, SIZE_W300, SIZE_W500, image_url};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    Creator, Episode, Genre, Network, SearchTvParams, SeasonSummary, TmdbErrorResponse, TvSeason,
    TvShow, TvShowDetails, TvShowPage,
};
