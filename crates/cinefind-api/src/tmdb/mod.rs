//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie list endpoints.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, TmdbClient, TmdbClientBuilder};
pub use types::{Movie, MovieListResponse, TmdbErrorResponse};
