//! Application state and event handling.
//!
//! [`App`] wires terminal events to the page store and the virtual list:
//! pagination keys load pages, search keystrokes reschedule the search
//! debouncer, scroll events reschedule the scroll debouncer, and finished
//! fetches come back through the message channel. All mutation happens on
//! the event-loop turn that receives the event or message.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::api::{ItemApi, SearchParams};
use crate::config::Config;
use crate::events::{AppMessage, Debouncer};
use crate::render::{render_visible, RowDescriptor, TableLayout, VirtualList};
use crate::store::PageStore;

/// Rows of fixed chrome around the list body: search bar (3), status bar
/// (1), table borders (2), header and footer rows (2). Must match the ui
/// module's layout.
pub const CHROME_ROWS: u16 = 8;

/// Lines moved per mouse-wheel notch.
const WHEEL_SCROLL_LINES: u32 = 3;

/// Top-level application state.
pub struct App {
    /// Pagination state and fetch lifecycle.
    pub store: PageStore,
    /// Visible-window tracker.
    pub list: VirtualList,
    /// Descriptors for the currently visible rows.
    pub rows: Vec<RowDescriptor>,
    /// Header/footer layout of the loaded page.
    pub layout: TableLayout,
    /// Search box contents; sent as the `searchtext` field.
    pub search_input: String,
    /// Scroll offset into the loaded page, in display rows.
    pub scroll_offset: u32,
    /// Rows available to the list body, updated on resize.
    pub viewport_height: u32,
    /// Redraw requested.
    pub needs_redraw: bool,
    pub should_quit: bool,
    /// Frame counter for the loading spinner.
    pub tick_count: u64,

    row_height: u32,
    search_debounce: Debouncer,
    scroll_debounce: Debouncer,
    api: Arc<dyn ItemApi>,
    tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the event loop, which needs ownership for `select!`.
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl App {
    pub fn new(config: &Config, api: Arc<dyn ItemApi>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            store: PageStore::new(config.per_page),
            list: VirtualList::new(config.row_height, config.buffer_rows),
            rows: Vec::new(),
            layout: TableLayout::default(),
            search_input: String::new(),
            scroll_offset: 0,
            viewport_height: 0,
            needs_redraw: true,
            should_quit: false,
            tick_count: 0,
            row_height: config.row_height.max(1),
            search_debounce: Debouncer::new(Duration::from_millis(config.search_debounce_ms)),
            scroll_debounce: Debouncer::new(Duration::from_millis(config.scroll_debounce_ms)),
            api,
            tx,
            message_rx: Some(rx),
        }
    }

    /// The search form as it stands right now.
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            text: self.search_input.clone(),
            ..Default::default()
        }
    }

    fn is_searching(&self) -> bool {
        !self.search_input.is_empty()
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Advance the frame counter; animates the loading spinner.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.store.state().is_loading {
            self.mark_dirty();
        }
    }

    /// Kick off the first page fetch.
    pub fn initial_load(&mut self) {
        self.load_page(1);
    }

    /// Request a page with the current search form. Dropped while a fetch
    /// is in flight.
    pub fn load_page(&mut self, page: u64) {
        let search = self.search_params();
        if self.store.load_page(page, &search, &self.api, &self.tx) {
            self.mark_dirty();
        }
    }

    /// Reload the current page.
    pub fn refresh(&mut self) {
        self.load_page(self.store.state().current_page);
    }

    /// Change the page size and reload from page 1.
    pub fn set_per_page(&mut self, per_page: u32) {
        self.store.set_per_page(per_page);
        self.load_page(1);
    }

    /// Apply a message delivered by the event loop.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::PageLoaded { page, result } => {
                let loaded = result.is_ok();
                self.store.apply_loaded(page, result);
                if loaded {
                    self.rebuild_view();
                }
                self.mark_dirty();
            }
            AppMessage::SearchSettled => {
                // A filter change always restarts from page 1
                self.load_page(1);
            }
            AppMessage::ScrollSettled => {
                let count = self.store.state().items.len();
                if self
                    .list
                    .update(self.scroll_offset, self.viewport_height, count)
                    .is_some()
                {
                    self.rebuild_rows();
                    self.mark_dirty();
                }
            }
        }
    }

    /// Recompute layout, window, and rows after a successful load.
    fn rebuild_view(&mut self) {
        self.clamp_scroll();
        let searching = self.is_searching();
        self.layout = TableLayout::for_page(&self.store.state().items, searching);
        let count = self.store.state().items.len();
        self.list
            .update(self.scroll_offset, self.viewport_height, count);
        self.rebuild_rows();
    }

    fn rebuild_rows(&mut self) {
        let searching = self.is_searching();
        self.rows = render_visible(&self.store.state().items, self.list.range(), searching);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Esc => self.quit(),

            KeyCode::Left => {
                if self.store.can_prev() {
                    let page = self.store.state().current_page - 1;
                    self.load_page(page);
                }
            }
            KeyCode::Right => {
                if self.store.can_next() {
                    let page = self.store.state().current_page + 1;
                    self.load_page(page);
                }
            }

            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-(self.viewport_height as i64)),
            KeyCode::PageDown => self.scroll_by(self.viewport_height as i64),
            KeyCode::Home => self.scroll_to(0),
            KeyCode::End => self.scroll_to(self.max_scroll()),

            KeyCode::F(5) => self.refresh(),

            KeyCode::Backspace => {
                if self.search_input.pop().is_some() {
                    self.on_search_edited();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.push(c);
                self.on_search_edited();
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-(WHEEL_SCROLL_LINES as i64)),
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_SCROLL_LINES as i64),
            _ => {}
        }
    }

    /// Record new terminal dimensions and re-window immediately; a resize
    /// is not a scroll event and skips the debounce.
    pub fn set_terminal_size(&mut self, _width: u16, height: u16) {
        self.viewport_height = u32::from(height.saturating_sub(CHROME_ROWS));
        self.clamp_scroll();
        let count = self.store.state().items.len();
        if self
            .list
            .update(self.scroll_offset, self.viewport_height, count)
            .is_some()
        {
            self.rebuild_rows();
        }
        self.mark_dirty();
    }

    fn on_search_edited(&mut self) {
        self.search_debounce
            .reschedule(&self.tx, AppMessage::SearchSettled);
        self.mark_dirty();
    }

    /// Largest scroll offset that still shows a full viewport (or 0 when
    /// everything fits).
    pub fn max_scroll(&self) -> u32 {
        let content = self.store.state().items.len() as u32 * self.row_height;
        content.saturating_sub(self.viewport_height)
    }

    fn scroll_to(&mut self, offset: u32) {
        let clamped = offset.min(self.max_scroll());
        if clamped != self.scroll_offset {
            self.scroll_offset = clamped;
            self.scroll_debounce
                .reschedule(&self.tx, AppMessage::ScrollSettled);
            self.mark_dirty();
        }
    }

    fn scroll_by(&mut self, delta: i64) {
        let target = (i64::from(self.scroll_offset) + delta).clamp(0, i64::from(self.max_scroll()));
        self.scroll_to(target as u32);
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PageRequest;
    use crate::error::ApiError;
    use crate::models::{Item, ItemPage};
    use async_trait::async_trait;

    struct NullApi;

    #[async_trait]
    impl ItemApi for NullApi {
        async fn fetch_page(&self, _request: &PageRequest) -> Result<ItemPage, ApiError> {
            Ok(ItemPage::default())
        }
    }

    fn test_app() -> App {
        let mut app = App::new(&Config::default(), Arc::new(NullApi));
        app.set_terminal_size(120, 38); // 30-row body
        app
    }

    fn loaded_page(count: usize, total: u64, pages: u64) -> AppMessage {
        AppMessage::PageLoaded {
            page: 1,
            result: Ok(ItemPage {
                items: (0..count)
                    .map(|i| Item {
                        item_id: i as i64,
                        item_name: format!("Item {}", i),
                        ..Default::default()
                    })
                    .collect(),
                total,
                pages,
            }),
        }
    }

    #[tokio::test]
    async fn test_successful_load_builds_visible_rows_only() {
        let mut app = test_app();
        app.handle_message(loaded_page(100, 250, 3));

        assert_eq!(app.store.state().current_page, 1);
        assert_eq!(app.store.state().items.len(), 100);
        // 30-row viewport plus the 10-row buffer
        assert_eq!(app.rows.len(), 40);
        assert_eq!(app.rows[0].index, 0);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_rows_and_sets_banner() {
        let mut app = test_app();
        app.handle_message(loaded_page(100, 250, 3));
        let rows_before = app.rows.len();

        app.handle_message(AppMessage::PageLoaded {
            page: 2,
            result: Err(ApiError::Status { status: 500 }),
        });

        assert_eq!(app.store.state().current_page, 1);
        assert_eq!(app.rows.len(), rows_before);
        assert!(app.store.state().last_error.is_some());
    }

    #[tokio::test]
    async fn test_scroll_clamps_to_content() {
        let mut app = test_app();
        app.handle_message(loaded_page(50, 50, 1));

        // 50 rows of content, 30-row viewport: max offset 20
        assert_eq!(app.max_scroll(), 20);
        app.handle_key(KeyEvent::from(KeyCode::End));
        assert_eq!(app.scroll_offset, 20);

        app.handle_key(KeyEvent::from(KeyCode::PageDown));
        assert_eq!(app.scroll_offset, 20);

        app.handle_key(KeyEvent::from(KeyCode::Home));
        assert_eq!(app.scroll_offset, 0);

        app.handle_key(KeyEvent::from(KeyCode::Up));
        assert_eq!(app.scroll_offset, 0);
    }

    #[tokio::test]
    async fn test_scroll_rerenders_only_after_settle() {
        let mut app = test_app();
        app.handle_message(loaded_page(100, 100, 1));
        assert_eq!(app.rows[0].index, 0);

        app.handle_key(KeyEvent::from(KeyCode::PageDown));
        // Rows unchanged until the debounce settles
        assert_eq!(app.rows[0].index, 0);

        app.handle_message(AppMessage::ScrollSettled);
        assert_eq!(app.rows[0].index, 30);
    }

    #[tokio::test]
    async fn test_settled_scroll_with_unchanged_window_skips_rerender() {
        let mut app = test_app();
        app.handle_message(loaded_page(100, 100, 1));
        let before = app.rows.clone();

        // Settle without any scroll movement: range is identical
        app.handle_message(AppMessage::ScrollSettled);
        assert_eq!(app.rows, before);
    }

    #[tokio::test]
    async fn test_typing_edits_search_buffer() {
        let mut app = test_app();
        app.handle_key(KeyEvent::from(KeyCode::Char('s')));
        app.handle_key(KeyEvent::from(KeyCode::Char('o')));
        app.handle_key(KeyEvent::from(KeyCode::Char('j')));
        app.handle_key(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(app.search_input, "so");
        assert_eq!(app.search_params().text, "so");
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = test_app();
        app.handle_key(KeyEvent::from(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = test_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_resize_reclamps_and_rewindows() {
        let mut app = test_app();
        app.handle_message(loaded_page(100, 100, 1));
        app.handle_key(KeyEvent::from(KeyCode::End));
        let offset_before = app.scroll_offset;

        // A taller terminal shrinks max_scroll; offset must follow
        app.set_terminal_size(120, 108); // 100-row body
        assert_eq!(app.max_scroll(), 0);
        assert!(app.scroll_offset <= offset_before);
        assert_eq!(app.scroll_offset, 0);
    }
}
