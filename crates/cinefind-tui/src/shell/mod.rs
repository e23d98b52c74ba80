//! Application shell: owns the query and result state, schedules fetches,
//! and runs the terminal event loop.

mod debounce;
mod fetch;
/// Shell state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio::time::Instant;

use cinefind_api::tmdb::TmdbApi;

pub use self::debounce::{DEFAULT_DEBOUNCE, Debouncer, ScheduledFetch};
pub use self::fetch::{
    API_ERROR_FALLBACK_MESSAGE, Endpoint, FetchError, FetchOutcome, MISSING_CREDENTIAL_MESSAGE,
    NO_RESULTS_MESSAGE, REQUEST_FAILED_MESSAGE, classify_response, fetch_movies, select_endpoint,
};
use self::state::{FetchTicket, Move, ShellState};
use crate::card::DEFAULT_IMAGE_BASE_URL;
use crate::search_input::apply_key;

/// Terminal input poll interval.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shell settings.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Delay between the last query edit and the fetch.
    pub debounce: Duration,
    /// Image host used for poster URLs.
    pub image_base_url: String,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
        }
    }
}

/// Result of a spawned fetch, tagged with its ticket id.
#[derive(Debug)]
struct FetchCompletion {
    id: u64,
    outcome: FetchOutcome,
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    Continue,
    Quit,
}

/// Runs the movie search TUI until the user quits.
///
/// `client` is `None` when no API credential is configured; every fetch
/// then reports the missing credential without touching the network.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
#[allow(clippy::module_name_repetitions)]
pub async fn run_shell<C>(client: Option<C>, options: ShellOptions) -> Result<()>
where
    C: TmdbApi + Send + Sync + 'static,
{
    let mut state = ShellState::new(options.debounce, options.image_base_url, Instant::now());
    let client = client.map(Arc::new);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, client).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<C>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut ShellState,
    client: Option<Arc<C>>,
) -> Result<()>
where
    C: TmdbApi + Send + Sync + 'static,
{
    let mut input_rx = spawn_input_reader();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<FetchCompletion>();
    let mut columns: usize = 1;

    loop {
        if let Some(ticket) = state.take_due_fetch(Instant::now()) {
            spawn_fetch(client.clone(), ticket, done_tx.clone());
        }

        terminal
            .draw(|frame| {
                columns = ui::draw(frame, state);
            })
            .context("failed to draw TUI")?;

        let deadline = state.next_deadline();
        tokio::select! {
            input = input_rx.recv() => {
                match input {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if handle_key(state, key, columns) == KeyAction::Quit {
                            return Ok(());
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err).context("failed to read event"),
                    None => return Ok(()),
                }
            }
            Some(done) = done_rx.recv() => {
                state.complete_fetch(done.id, done.outcome);
            }
            () = sleep_until_deadline(deadline) => {}
        }
    }
}

/// Sleeps until `deadline`, or forever when nothing is scheduled.
async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Forwards terminal events from a blocking reader until the receiver closes.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<io::Result<Event>> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL_INTERVAL) {
                Ok(true) => {
                    if tx.send(event::read()).is_err() {
                        break;
                    }
                }
                Ok(false) => {}
                Err(err) => {
                    let _ = tx.send(Err(err));
                    break;
                }
            }
        }
    });
    rx
}

/// Runs one fetch in the background and reports its outcome.
fn spawn_fetch<C>(
    client: Option<Arc<C>>,
    ticket: FetchTicket,
    done_tx: mpsc::UnboundedSender<FetchCompletion>,
) where
    C: TmdbApi + Send + Sync + 'static,
{
    tracing::debug!(id = ticket.id, query = %ticket.query, "dispatching fetch");
    tokio::spawn(async move {
        let outcome = fetch_movies(client.as_deref(), &ticket.query).await;
        // The loop may already have exited.
        let _ = done_tx.send(FetchCompletion {
            id: ticket.id,
            outcome,
        });
    });
}

/// Handles a key press.
fn handle_key(state: &mut ShellState, key: KeyEvent, columns: usize) -> KeyAction {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => return KeyAction::Quit,
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => return KeyAction::Quit,
        (KeyCode::Left, _) => state.move_selection(Move::Left, columns),
        (KeyCode::Right, _) => state.move_selection(Move::Right, columns),
        (KeyCode::Up, _) => state.move_selection(Move::Up, columns),
        (KeyCode::Down, _) => state.move_selection(Move::Down, columns),
        (KeyCode::Enter, _) => open_selected(state),
        (code, modifiers) => {
            if let Some(query) = apply_key(&state.query, code, modifiers) {
                state.set_query(query, Instant::now());
            }
        }
    }
    KeyAction::Continue
}

/// Opens the selected movie's TMDB page in the default browser.
fn open_selected(state: &ShellState) {
    let Some(card) = state.selected_card() else {
        return;
    };
    let url = card.page_url();
    if let Err(err) = open::that(&url) {
        tracing::warn!(url, error = %err, "failed to open browser");
    }
}
