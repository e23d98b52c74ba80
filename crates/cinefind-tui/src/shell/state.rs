//! Application shell state.

use std::time::Duration;

use tokio::time::Instant;

use cinefind_api::tmdb::Movie;

use super::debounce::Debouncer;
use super::fetch::FetchOutcome;
use crate::card::MovieCard;

/// What the result section shows. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultView<'a> {
    /// A fetch is in flight.
    Loading,
    /// The last fetch failed or found nothing.
    Error(&'a str),
    /// The last fetch returned movies (possibly none yet on start-up).
    Results(&'a [Movie]),
}

/// A fetch that has been dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Sequence number; only the latest ticket's outcome is applied.
    pub id: u64,
    /// Query text to fetch with.
    pub query: String,
}

/// Selection movement within the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Previous card.
    Left,
    /// Next card.
    Right,
    /// Same column, previous row.
    Up,
    /// Same column, next row.
    Down,
}

/// Result count line, annotated with the query when one is set.
#[must_use]
pub fn result_count_label(count: usize, query: &str) -> String {
    if query.is_empty() {
        format!("Found {count} movies")
    } else {
        format!("Found {count} movies for \"{query}\"")
    }
}

/// State owned by the application shell.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ShellState {
    /// Current search text.
    pub query: String,
    /// Set between dispatching the latest fetch and its completion.
    pub loading: bool,
    /// User-facing error of the last fetch.
    pub error_message: Option<String>,
    /// Movies of the last successful fetch, in API order.
    pub movies: Vec<Movie>,
    /// Index of the selected card.
    pub selected: usize,
    /// Image host used for poster URLs.
    image_base_url: String,
    /// Pending fetch trigger.
    debouncer: Debouncer,
    /// Sequence number of the most recently dispatched fetch.
    latest_request: u64,
}

impl ShellState {
    /// Creates the state and schedules the initial (popular movies) fetch.
    #[must_use]
    pub fn new(debounce: Duration, image_base_url: impl Into<String>, now: Instant) -> Self {
        let mut debouncer = Debouncer::new(debounce);
        debouncer.schedule(String::new(), now);
        Self {
            query: String::new(),
            loading: false,
            error_message: None,
            movies: Vec::new(),
            selected: 0,
            image_base_url: image_base_url.into(),
            debouncer,
            latest_request: 0,
        }
    }

    /// Replaces the query and restarts the debounce delay.
    pub fn set_query(&mut self, query: String, now: Instant) {
        if query == self.query {
            return;
        }
        self.debouncer.schedule(query.as_str(), now);
        self.query = query;
    }

    /// Deadline of the pending fetch trigger.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Dispatches the pending fetch if its delay has elapsed.
    pub fn take_due_fetch(&mut self, now: Instant) -> Option<FetchTicket> {
        let query = self.debouncer.fire_if_due(now)?;
        Some(self.begin_fetch(query))
    }

    /// Marks a new fetch as in flight and returns its ticket.
    pub fn begin_fetch(&mut self, query: String) -> FetchTicket {
        self.latest_request = self.latest_request.wrapping_add(1);
        self.loading = true;
        self.error_message = None;
        FetchTicket {
            id: self.latest_request,
            query,
        }
    }

    /// Applies a fetch outcome. Outcomes of superseded fetches are dropped.
    ///
    /// Returns `true` if the outcome was applied.
    pub fn complete_fetch(&mut self, id: u64, outcome: FetchOutcome) -> bool {
        if id != self.latest_request {
            tracing::debug!(
                id,
                latest = self.latest_request,
                "discarding stale fetch outcome"
            );
            return false;
        }

        match outcome {
            Ok(movies) => {
                self.movies = movies;
                self.error_message = None;
            }
            Err(err) => {
                self.movies.clear();
                self.error_message = Some(err.to_string());
            }
        }
        self.selected = 0;
        self.loading = false;
        true
    }

    /// Returns the active result view.
    #[must_use]
    pub fn view(&self) -> ResultView<'_> {
        if self.loading {
            ResultView::Loading
        } else if let Some(message) = self.error_message.as_deref() {
            ResultView::Error(message)
        } else {
            ResultView::Results(&self.movies)
        }
    }

    /// Result count line for the current movies and query.
    #[must_use]
    pub fn result_count_label(&self) -> String {
        result_count_label(self.movies.len(), &self.query)
    }

    /// Builds one card per movie, in order.
    #[must_use]
    pub fn cards(&self) -> Vec<MovieCard> {
        self.movies
            .iter()
            .map(|m| MovieCard::from_movie(m, &self.image_base_url))
            .collect()
    }

    /// Card for the selected movie.
    #[must_use]
    pub fn selected_card(&self) -> Option<MovieCard> {
        self.movies
            .get(self.selected)
            .map(|m| MovieCard::from_movie(m, &self.image_base_url))
    }

    /// Moves the selection within a grid of `columns` cards per row.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_selection(&mut self, direction: Move, columns: usize) {
        let count = self.movies.len();
        if count == 0 {
            return;
        }
        let columns = columns.max(1);
        let current = self.selected.min(count - 1);
        self.selected = match direction {
            Move::Left => current.saturating_sub(1),
            Move::Right => (current + 1).min(count - 1),
            Move::Up => current.checked_sub(columns).unwrap_or(current),
            Move::Down => {
                let next = current + columns;
                if next < count { next } else { current }
            }
        };
    }
}
