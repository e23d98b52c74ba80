//! API client library for cinefind.
//!
//! Provides a client for the TMDB movie search and popular-movie endpoints.

/// TMDB API client.
pub mod tmdb;
