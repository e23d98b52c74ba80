//! Result card: one movie record rendered as a fixed-layout tile.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use cinefind_api::tmdb::Movie;

/// Default TMDB image host.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org";

/// Poster shown when a movie has no poster path.
pub const POSTER_PLACEHOLDER: &str = "no-movie.png";

/// TMDB movie page prefix.
const MOVIE_PAGE_BASE_URL: &str = "https://www.themoviedb.org/movie";

/// Card width in terminal cells.
pub const CARD_WIDTH: u16 = 36;

/// Card height in terminal cells (3 content lines + borders).
pub const CARD_HEIGHT: u16 = 5;

/// Display-ready fields of a single movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    /// Movie ID, unique within one result list.
    pub key: u64,
    /// Poster image URL or placeholder.
    pub poster: String,
    /// Movie title.
    pub title: String,
    /// Vote average with two decimals.
    pub rating: String,
    /// Release date, verbatim.
    pub release_date: String,
    /// Upper-cased original language code.
    pub language: String,
}

impl MovieCard {
    /// Builds a card from a movie record.
    #[must_use]
    pub fn from_movie(movie: &Movie, image_base_url: &str) -> Self {
        Self {
            key: movie.id,
            poster: poster_url(movie.poster_path.as_deref(), image_base_url),
            title: movie.title.clone(),
            rating: format_rating(movie.vote_average),
            release_date: movie.release_date.clone(),
            language: movie.original_language.to_uppercase(),
        }
    }

    /// Returns the TMDB web page for this movie.
    #[must_use]
    pub fn page_url(&self) -> String {
        format!("{MOVIE_PAGE_BASE_URL}/{}", self.key)
    }
}

/// Builds the `w500` poster URL, or the placeholder when there is no path.
#[must_use]
pub fn poster_url(poster_path: Option<&str>, image_base_url: &str) -> String {
    match poster_path.map(|p| p.trim_start_matches('/')) {
        Some(path) if !path.is_empty() => format!(
            "{}/t/p/w500/{path}",
            image_base_url.trim_end_matches('/')
        ),
        _ => String::from(POSTER_PLACEHOLDER),
    }
}

/// Formats a vote average to two decimal places.
///
/// Exact halves round away from zero (`7.125` shows as `7.13`); every other
/// value takes the nearest two-decimal rendering of its exact binary value.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_rating(vote_average: f64) -> String {
    // A value sits exactly halfway between hundredths only when it is an
    // odd multiple of 1/8. Scaling by 8 and by 100 is exact for those.
    let eighths = vote_average * 8.0;
    if eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0 {
        return format!("{:.2}", (vote_average * 100.0).round() / 100.0);
    }
    format!("{vote_average:.2}")
}

/// Draws one card into `area`.
pub fn draw_card(frame: &mut Frame, area: Rect, card: &MovieCard, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(Span::styled(card.title.as_str(), title_style)),
        Line::from(vec![
            Span::styled("\u{2605} ", Style::default().fg(Color::Yellow)),
            Span::raw(card.rating.as_str()),
            Span::raw("  "),
            Span::styled(card.release_date.as_str(), Style::default().fg(Color::Green)),
            Span::raw("  "),
            Span::styled(
                card.language.as_str(),
                Style::default().fg(Color::White).bg(Color::Red),
            ),
        ]),
        Line::from(Span::styled(
            card.poster.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let tile = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(tile, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn batman() -> Movie {
        serde_json::from_str(
            r#"{"id":1,"title":"Batman","vote_average":7.5,"poster_path":"/x.jpg","release_date":"2005-06-15","original_language":"en"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_card_from_movie() {
        // Arrange
        let movie = batman();

        // Act
        let card = MovieCard::from_movie(&movie, DEFAULT_IMAGE_BASE_URL);

        // Assert
        assert_eq!(card.key, 1);
        assert_eq!(card.title, "Batman");
        assert_eq!(card.rating, "7.50");
        assert_eq!(card.release_date, "2005-06-15");
        assert_eq!(card.language, "EN");
        assert_eq!(card.poster, "https://image.tmdb.org/t/p/w500/x.jpg");
    }

    #[test]
    fn test_poster_placeholder_when_absent() {
        // Arrange & Act & Assert
        assert_eq!(poster_url(None, DEFAULT_IMAGE_BASE_URL), POSTER_PLACEHOLDER);
        assert_eq!(poster_url(Some(""), DEFAULT_IMAGE_BASE_URL), POSTER_PLACEHOLDER);
    }

    #[test]
    fn test_poster_url_with_custom_host() {
        // Arrange & Act
        let url = poster_url(Some("abc.png"), "http://localhost:9000/");

        // Assert
        assert_eq!(url, "http://localhost:9000/t/p/w500/abc.png");
    }

    #[test]
    fn test_format_rating_two_decimals() {
        // Arrange & Act & Assert
        assert_eq!(format_rating(7.703), "7.70");
        assert_eq!(format_rating(0.0), "0.00");
        assert_eq!(format_rating(10.0), "10.00");
    }

    #[test]
    fn test_format_rating_exact_halves_round_up() {
        // Arrange & Act & Assert
        assert_eq!(format_rating(7.125), "7.13");
        assert_eq!(format_rating(8.625), "8.63");
        assert_eq!(format_rating(0.125), "0.13");
        assert_eq!(format_rating(6.375), "6.38");
        assert_eq!(format_rating(9.875), "9.88");
    }

    #[test]
    fn test_format_rating_near_halves_follow_binary_value() {
        // Arrange & Act & Assert
        // 1.115 is stored just below 1.115, so it is not a tie.
        assert_eq!(format_rating(1.115), "1.11");
        assert_eq!(format_rating(7.25), "7.25");
        assert_eq!(format_rating(7.5), "7.50");
    }

    #[test]
    fn test_release_date_is_verbatim() {
        // Arrange
        let mut movie = batman();
        movie.release_date = String::from("not-a-date");

        // Act
        let card = MovieCard::from_movie(&movie, DEFAULT_IMAGE_BASE_URL);

        // Assert
        assert_eq!(card.release_date, "not-a-date");
    }

    #[test]
    fn test_page_url() {
        // Arrange
        let card = MovieCard::from_movie(&batman(), DEFAULT_IMAGE_BASE_URL);

        // Act & Assert
        assert_eq!(card.page_url(), "https://www.themoviedb.org/movie/1");
    }
}
