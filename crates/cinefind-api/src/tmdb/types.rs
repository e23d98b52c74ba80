//! TMDB API response types.

use serde::Deserialize;

// --- Movie lists ---

/// Response body shared by `search/movie` and `movie/popular`.
///
/// Every field is optional: a logical failure may come back with only
/// `success`, `status_code` and `status_message` set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieListResponse {
    /// Current page number.
    pub page: Option<u32>,
    /// Movies in API order.
    pub results: Option<Vec<Movie>>,
    /// Total number of pages.
    pub total_pages: Option<u32>,
    /// Total number of results.
    pub total_results: Option<u32>,
    /// Success flag (present and `false` on logical failure).
    pub success: Option<bool>,
    /// TMDB error code.
    pub status_code: Option<u32>,
    /// Error message.
    pub status_message: Option<String>,
}

impl MovieListResponse {
    /// Returns `true` when the API reported a logical failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.success == Some(false)
    }

    /// Takes the movies, or an empty list when `results` is absent.
    #[must_use]
    pub fn into_movies(self) -> Vec<Movie> {
        self.results.unwrap_or_default()
    }
}

/// A single movie record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Vote average (0-10).
    pub vote_average: f64,
    /// Poster image path (e.g. `/abc.jpg`).
    pub poster_path: Option<String>,
    /// Release date as sent by TMDB (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: String,
    /// Original language (ISO 639-1).
    pub original_language: String,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}
