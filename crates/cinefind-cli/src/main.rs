//! cinefind - TMDB movie search in the terminal.

/// Application configuration (TOML).
mod config;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, TmdbConfig};
use cinefind_api::tmdb::{TmdbApi, TmdbClient};
use cinefind_tui::card::MovieCard;
use cinefind_tui::shell::fetch_movies;
use cinefind_tui::shell::state::result_count_label;
use cinefind_tui::{ShellOptions, run_shell};

/// Environment variable holding the TMDB API read access token.
const API_TOKEN_VAR: &str = "TMDB_API_TOKEN";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run (default: browse).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search movies interactively.
    Browse,
    /// Run a single search and print the results.
    Search(SearchArgs),
}

impl Commands {
    /// Log filter used when `RUST_LOG` is unset.
    ///
    /// The TUI owns the terminal, so it stays silent by default.
    const fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Browse => "off",
            Self::Search(_) => "info",
        }
    }
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search text; omit to list popular movies.
    query: Option<String>,
}

/// Picks the API token: the runtime environment first, then the value
/// captured at build time.
///
/// A runtime variable that is set always wins, so an empty runtime value
/// disables a build-time token. Blank tokens count as absent.
fn resolve_api_token(runtime: Option<String>, build_time: Option<&str>) -> Option<String> {
    runtime
        .or_else(|| build_time.map(String::from))
        .filter(|token| !token.trim().is_empty())
}

/// Builds a `TmdbClient` from the resolved token and endpoint config.
///
/// Returns `Ok(None)` when no token is configured.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(api_token: Option<String>, tmdb: &TmdbConfig) -> Result<Option<TmdbClient>> {
    let Some(api_token) = api_token else {
        tracing::debug!("{API_TOKEN_VAR} is not set");
        return Ok(None);
    };

    let client = TmdbClient::builder()
        .base_url(tmdb.api_base_url()?)
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")?;

    Ok(Some(client))
}

/// Logs the result count line followed by one line per card.
fn log_cards(query: &str, cards: &[MovieCard]) {
    tracing::info!("{}", result_count_label(cards.len(), query));
    tracing::info!("ID\tTitle\tRating\tReleased\tLang\tPoster");
    for card in cards {
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            card.key,
            card.title,
            card.rating,
            card.release_date,
            card.language,
            card.poster,
        );
    }
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns the user-facing message of any error state.
#[instrument(skip_all)]
async fn run_search<C>(client: Option<&C>, query: &str, image_base_url: &str) -> Result<()>
where
    C: TmdbApi + Sync,
{
    let movies = fetch_movies(client, query)
        .await
        .map_err(|err| anyhow!("{err}"))?;

    let cards: Vec<MovieCard> = movies
        .iter()
        .map(|m| MovieCard::from_movie(m, image_base_url))
        .collect();
    log_cards(query, &cards);

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the TUI fails.
#[instrument(skip_all)]
async fn run_browse(client: Option<TmdbClient>, config: AppConfig) -> Result<()> {
    let options = ShellOptions {
        debounce: config.search.debounce(),
        image_base_url: config.tmdb.image_base_url,
    };
    run_shell(client, options).await.context("search TUI failed")
}

/// Installs the tracing subscriber, writing to stderr.
fn init_tracing(default_filter: &str) {
    let ansi = std::io::stderr().is_terminal();

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
            )
            .with_writer(std::io::stderr)
            .with_ansi(ansi)
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(ansi)
            .with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Browse);
    init_tracing(command.default_log_filter());

    let config_path = AppConfig::resolve_path(cli.dir.as_deref())?;
    let config = AppConfig::load(&config_path)?;

    let api_token = resolve_api_token(
        std::env::var(API_TOKEN_VAR).ok(),
        option_env!("TMDB_API_TOKEN"),
    );
    let client = build_tmdb_client(api_token, &config.tmdb)?;

    match command {
        Commands::Browse => run_browse(client, config).await,
        Commands::Search(args) => {
            run_search(
                client.as_ref(),
                args.query.as_deref().unwrap_or_default(),
                &config.tmdb.image_base_url,
            )
            .await
        }
    }
}
