//! The fetch operation: query text in, movie list or user-facing error out.

use std::fmt;

use tracing::instrument;

use cinefind_api::tmdb::{Movie, MovieListResponse, TmdbApi};

/// Shown when no API token is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "API key is not configured. Please check your environment variables.";

/// Shown for transport, HTTP status and decoding failures.
pub const REQUEST_FAILED_MESSAGE: &str = "Error fetching movies. Please try again later.";

/// Shown for a logical API failure without a message.
pub const API_ERROR_FALLBACK_MESSAGE: &str = "Error fetching movies";

/// Shown when the result list is missing or empty.
pub const NO_RESULTS_MESSAGE: &str = "No movies found";

/// Why a fetch produced no movies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No API token is available; no request was made.
    MissingCredential,
    /// Network, HTTP status or decoding failure (details are logged).
    Request,
    /// The API answered with `success: false` and an optional message.
    Api(Option<String>),
    /// The API returned no results.
    NoResults,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => f.write_str(MISSING_CREDENTIAL_MESSAGE),
            Self::Request => f.write_str(REQUEST_FAILED_MESSAGE),
            Self::Api(Some(message)) if !message.is_empty() => f.write_str(message),
            Self::Api(_) => f.write_str(API_ERROR_FALLBACK_MESSAGE),
            Self::NoResults => f.write_str(NO_RESULTS_MESSAGE),
        }
    }
}

impl std::error::Error for FetchError {}

/// Result of one fetch.
pub type FetchOutcome = Result<Vec<Movie>, FetchError>;

/// Which endpoint a query goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `search/movie` with the query text.
    Search,
    /// `movie/popular`.
    Popular,
}

/// Chooses the endpoint: blank queries list popular movies.
#[must_use]
pub fn select_endpoint(query: &str) -> Endpoint {
    if query.trim().is_empty() {
        Endpoint::Popular
    } else {
        Endpoint::Search
    }
}

/// Runs one fetch against the API.
///
/// Never fails: every problem becomes a [`FetchError`]. A `None` client
/// means the credential is missing and no request is made.
#[instrument(skip_all)]
pub async fn fetch_movies<C>(client: Option<&C>, query: &str) -> FetchOutcome
where
    C: TmdbApi + Sync,
{
    let Some(client) = client else {
        tracing::warn!("TMDB API token is not configured; skipping request");
        return Err(FetchError::MissingCredential);
    };

    let endpoint = select_endpoint(query);
    tracing::debug!(?endpoint, query, "fetching movies");

    let result = match endpoint {
        Endpoint::Search => client.search_movie(query).await,
        Endpoint::Popular => client.popular_movies().await,
    };

    match result {
        Ok(response) => classify_response(response),
        Err(err) => {
            tracing::error!("Error fetching movies: {err:#}");
            Err(FetchError::Request)
        }
    }
}

/// Maps a decoded response body onto the fetch outcome.
///
/// # Errors
///
/// - [`FetchError::Api`] when `success` is `false`.
/// - [`FetchError::NoResults`] when `results` is missing or empty.
pub fn classify_response(response: MovieListResponse) -> FetchOutcome {
    if response.is_failure() {
        return Err(FetchError::Api(response.status_message));
    }
    let movies = response.into_movies();
    if movies.is_empty() {
        return Err(FetchError::NoResults);
    }
    Ok(movies)
}
