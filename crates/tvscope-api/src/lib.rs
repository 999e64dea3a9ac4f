//! Catalog client library for tvscope.
//!
//! Provides a typed client for the TMDB API v3 TV endpoints and the
//! image URL resolver for the TMDB image CDN.

/// TMDB API client.
pub mod tmdb;
