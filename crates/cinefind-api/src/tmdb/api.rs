//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::MovieListResponse;

/// TMDB API trait.
///
/// Abstracts the two movie list endpoints for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches for movies matching free text (`search/movie`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the response status is
    /// not a success, or JSON parsing fails.
    async fn search_movie(&self, query: &str) -> Result<MovieListResponse>;

    /// Lists currently popular movies (`movie/popular`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the response status is
    /// not a success, or JSON parsing fails.
    async fn popular_movies(&self) -> Result<MovieListResponse>;
}
