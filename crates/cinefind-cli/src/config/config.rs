//! `AppConfig` struct and TOML loading.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use cinefind_api::tmdb::DEFAULT_BASE_URL;
use cinefind_tui::card::DEFAULT_IMAGE_BASE_URL;
use cinefind_tui::shell::DEFAULT_DEBOUNCE;

/// Directory name under the user config root.
const APP_DIR: &str = "cinefind";
/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB endpoint settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Search behaviour settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// TMDB endpoint configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// API base URL.
    pub base_url: String,
    /// Poster image host.
    pub image_base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
        }
    }
}

impl TmdbConfig {
    /// Parses the API base URL, appending the trailing `/` that relative
    /// endpoint joins rely on.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn api_base_url(&self) -> Result<Url> {
        let mut raw = self.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).with_context(|| format!("invalid tmdb.base_url: {}", self.base_url))
    }
}

/// Search behaviour configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Delay between the last keystroke and the fetch, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: u64::try_from(DEFAULT_DEBOUNCE.as_millis()).unwrap_or(500),
        }
    }
}

impl SearchConfig {
    /// Debounce delay as a `Duration`.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    /// Resolves the config file path from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is `None` and no config root can be found.
    pub fn resolve_path(dir: Option<&Path>) -> Result<PathBuf> {
        Self::path_from(
            dir,
            std::env::var_os("XDG_CONFIG_HOME"),
            std::env::var_os("HOME"),
        )
    }

    /// Picks `{dir}/config.toml` when `dir` is given, otherwise
    /// `$XDG_CONFIG_HOME/cinefind/config.toml`, falling back to
    /// `$HOME/.config/cinefind/config.toml`.
    ///
    /// A relative or empty `XDG_CONFIG_HOME` is ignored.
    fn path_from(
        dir: Option<&Path>,
        xdg_config_home: Option<OsString>,
        home: Option<OsString>,
    ) -> Result<PathBuf> {
        if let Some(dir) = dir {
            return Ok(dir.join(CONFIG_FILE));
        }
        let root = xdg_config_home
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| {
                home.filter(|h| !h.is_empty())
                    .map(|h| PathBuf::from(h).join(".config"))
            })
            .context("cannot locate config directory: neither XDG_CONFIG_HOME nor HOME is set")?;
        Ok(root.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3/");
        assert_eq!(config.tmdb.image_base_url, "https://image.tmdb.org");
        assert_eq!(config.search.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_empty_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[tmdb]\nbase_url = \"http://localhost:8080/3\"\n\n[search]\ndebounce_ms = 250\n",
        )
        .unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.tmdb.base_url, "http://localhost:8080/3");
        assert_eq!(config.tmdb.image_base_url, "https://image.tmdb.org");
        assert_eq!(config.search.debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_invalid_toml() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\n").unwrap();

        // Act
        let err = AppConfig::load(&path).unwrap_err();

        // Assert
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_path_from_dir_override() {
        // Arrange
        let dir = PathBuf::from("/tmp/cinefind-dir");

        // Act
        let path = AppConfig::path_from(
            Some(dir.as_path()),
            Some(OsString::from("/xdg")),
            Some(OsString::from("/home/u")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/cinefind-dir/config.toml"));
    }

    #[test]
    fn test_path_from_xdg_config_home() {
        // Arrange & Act
        let path = AppConfig::path_from(
            None,
            Some(OsString::from("/xdg")),
            Some(OsString::from("/home/u")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/cinefind/config.toml"));
    }

    #[test]
    fn test_path_from_home_fallback() {
        // Arrange & Act
        let unset = AppConfig::path_from(None, None, Some(OsString::from("/home/u"))).unwrap();
        let relative = AppConfig::path_from(
            None,
            Some(OsString::from("rel/xdg")),
            Some(OsString::from("/home/u")),
        )
        .unwrap();
        let empty =
            AppConfig::path_from(None, Some(OsString::new()), Some(OsString::from("/home/u")))
                .unwrap();

        // Assert
        let expected = PathBuf::from("/home/u/.config/cinefind/config.toml");
        assert_eq!(unset, expected);
        assert_eq!(relative, expected);
        assert_eq!(empty, expected);
    }

    #[test]
    fn test_path_from_without_root_fails() {
        // Arrange & Act
        let err = AppConfig::path_from(None, None, Some(OsString::new())).unwrap_err();

        // Assert
        assert!(err.to_string().contains("cannot locate config directory"));
    }

    #[test]
    fn test_api_base_url_appends_slash() {
        // Arrange
        let config = TmdbConfig {
            base_url: String::from("http://localhost:8080/3"),
            ..TmdbConfig::default()
        };

        // Act
        let url = config.api_base_url().unwrap();

        // Assert
        assert_eq!(url.as_str(), "http://localhost:8080/3/");
        assert_eq!(
            url.join("search/movie").unwrap().as_str(),
            "http://localhost:8080/3/search/movie"
        );
    }

    #[test]
    fn test_api_base_url_invalid() {
        // Arrange
        let config = TmdbConfig {
            base_url: String::from("not a url"),
            ..TmdbConfig::default()
        };

        // Act & Assert
        assert!(config.api_base_url().is_err());
    }
}
