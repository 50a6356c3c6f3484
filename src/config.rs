//! Runtime configuration.
//!
//! Defaults match the production admin surface; environment variables
//! override the pieces operators actually change between deployments.

/// Default base URL of the query API.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default number of rows per page.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Quiet period after the last search keystroke before a fetch fires.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Quiet period after the last scroll event before the visible window is
/// recomputed.
pub const DEFAULT_SCROLL_DEBOUNCE_MS: u64 = 50;

/// Extra rows rendered past the viewport on each window computation.
pub const DEFAULT_BUFFER_ROWS: usize = 10;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the query API.
    pub api_url: String,
    /// Rows requested per page.
    pub per_page: u32,
    /// Search debounce window in milliseconds.
    pub search_debounce_ms: u64,
    /// Scroll debounce window in milliseconds.
    pub scroll_debounce_ms: u64,
    /// Display-surface rows occupied by one item row.
    pub row_height: u32,
    /// Extra rows rendered past the viewport.
    pub buffer_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            scroll_debounce_ms: DEFAULT_SCROLL_DEBOUNCE_MS,
            row_height: 1,
            buffer_rows: DEFAULT_BUFFER_ROWS,
        }
    }
}

impl Config {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the page size. Zero is coerced to 1; the query API requires a
    /// positive `perPage`.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Set the search debounce window.
    pub fn with_search_debounce_ms(mut self, ms: u64) -> Self {
        self.search_debounce_ms = ms;
        self
    }

    /// Set the scroll debounce window.
    pub fn with_scroll_debounce_ms(mut self, ms: u64) -> Self {
        self.scroll_debounce_ms = ms;
        self
    }

    /// Set the rendered buffer size in rows.
    pub fn with_buffer_rows(mut self, rows: usize) -> Self {
        self.buffer_rows = rows;
        self
    }

    /// Build a config from `STASHVIEW_API_URL` and `STASHVIEW_PER_PAGE`,
    /// falling back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("STASHVIEW_API_URL") {
            if !url.is_empty() {
                config.api_url = url;
            }
        }
        if let Ok(per_page) = std::env::var("STASHVIEW_PER_PAGE") {
            if let Ok(n) = per_page.parse::<u32>() {
                config = config.with_per_page(n);
            }
        }
        config
    }
}
