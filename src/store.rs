//! Pagination state and the single-flight page fetch.
//!
//! [`PageStore`] is the single source of truth for which page of which
//! filtered item set is loaded, and the only issuer of query-API requests.
//! One fetch may be outstanding at a time; `is_loading` is the sole guard
//! and a load requested while it is set is dropped, not queued.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{ItemApi, PageRequest, SearchParams};
use crate::error::ApiError;
use crate::events::AppMessage;
use crate::models::{Item, ItemPage};

/// Ephemeral pagination/search state for the loaded page.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    /// 1-based page number of the loaded page.
    pub current_page: u64,
    /// Rows requested per page.
    pub per_page: u32,
    /// Total pages for the active filter, as reported by the server.
    pub total_pages: u64,
    /// Total matching items for the active filter.
    pub total_items: u64,
    /// The loaded page's rows, in server order.
    pub items: Vec<Item>,
    /// True while a fetch is outstanding.
    pub is_loading: bool,
    /// User-facing message of the last failed fetch; cleared on success.
    pub last_error: Option<String>,
}

/// Owner of [`PageState`] and of the fetch lifecycle.
pub struct PageStore {
    state: PageState,
}

impl PageStore {
    /// Create a store positioned on page 1 with nothing loaded yet.
    pub fn new(per_page: u32) -> Self {
        Self {
            state: PageState {
                current_page: 1,
                per_page: per_page.max(1),
                total_pages: 1,
                ..Default::default()
            },
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Request `page` with the given search fields.
    ///
    /// Returns false without side effects while a fetch is outstanding —
    /// the caller's click is dropped, not queued. Otherwise exactly one
    /// request is issued; the spawned task always posts
    /// [`AppMessage::PageLoaded`] back to the loop, where
    /// [`PageStore::apply_loaded`] picks it up.
    ///
    /// The page number is sent as-is. Control enablement is the caller's
    /// business; the server decides what an out-of-range page returns.
    ///
    /// There is no client-side timeout: a request that never resolves keeps
    /// `is_loading` set and blocks all further loads.
    pub fn load_page(
        &mut self,
        page: u64,
        search: &SearchParams,
        api: &Arc<dyn ItemApi>,
        tx: &mpsc::UnboundedSender<AppMessage>,
    ) -> bool {
        if self.state.is_loading {
            tracing::debug!(page, "load dropped, fetch already in flight");
            return false;
        }
        self.state.is_loading = true;

        let request = PageRequest {
            page,
            per_page: self.state.per_page,
            search: search.clone(),
        };
        let api = Arc::clone(api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_page(&request).await;
            let _ = tx.send(AppMessage::PageLoaded { page, result });
        });
        true
    }

    /// Apply a finished fetch.
    ///
    /// Success replaces the page wholesale and clears any prior error;
    /// failure records the banner message and leaves the previous page
    /// intact. Both arms clear `is_loading`.
    pub fn apply_loaded(&mut self, page: u64, result: Result<ItemPage, ApiError>) {
        self.state.is_loading = false;
        match result {
            Ok(loaded) => {
                tracing::info!(
                    page,
                    items = loaded.items.len(),
                    total = loaded.total,
                    "page loaded"
                );
                self.state.items = loaded.items;
                self.state.total_items = loaded.total;
                self.state.total_pages = loaded.pages;
                self.state.current_page = page;
                self.state.last_error = None;
            }
            Err(err) => {
                tracing::warn!(page, error = %err, "page load failed");
                self.state.last_error = Some(err.user_message());
            }
        }
    }

    /// Change the page size. Takes effect on the next load.
    pub fn set_per_page(&mut self, per_page: u32) {
        self.state.per_page = per_page.max(1);
    }

    /// Whether the "previous page" control is enabled.
    pub fn can_prev(&self) -> bool {
        self.state.current_page > 1
    }

    /// Whether the "next page" control is enabled.
    pub fn can_next(&self) -> bool {
        self.state.current_page < self.state.total_pages
    }

    /// Pagination summary for the status bar.
    pub fn page_info(&self) -> String {
        format!(
            "Page {} of {} ({} items)",
            self.state.current_page, self.state.total_pages, self.state.total_items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    fn page_of(count: usize, total: u64, pages: u64) -> ItemPage {
        ItemPage {
            items: (0..count)
                .map(|i| Item {
                    item_id: i as i64,
                    ..Default::default()
                })
                .collect(),
            total,
            pages,
        }
    }

    #[test]
    fn test_new_store_starts_on_page_one() {
        let store = PageStore::new(100);
        assert_eq!(store.state().current_page, 1);
        assert_eq!(store.state().per_page, 100);
        assert!(!store.state().is_loading);
        assert!(store.state().items.is_empty());
    }

    #[test]
    fn test_apply_success_replaces_page() {
        let mut store = PageStore::new(100);
        store.state.is_loading = true;
        store.state.last_error = Some("old error".to_string());

        store.apply_loaded(2, Ok(page_of(100, 250, 3)));

        let state = store.state();
        assert!(!state.is_loading);
        assert_eq!(state.current_page, 2);
        assert_eq!(state.items.len(), 100);
        assert_eq!(state.total_items, 250);
        assert_eq!(state.total_pages, 3);
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn test_apply_failure_keeps_prior_page() {
        let mut store = PageStore::new(100);
        store.apply_loaded(1, Ok(page_of(100, 250, 3)));

        store.state.is_loading = true;
        store.apply_loaded(2, Err(ApiError::Status { status: 500 }));

        let state = store.state();
        assert!(!state.is_loading);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.items.len(), 100);
        assert!(state.last_error.is_some());
    }

    #[test]
    fn test_pagination_controls() {
        let mut store = PageStore::new(100);
        store.apply_loaded(1, Ok(page_of(100, 250, 3)));
        assert!(!store.can_prev());
        assert!(store.can_next());

        store.apply_loaded(3, Ok(page_of(50, 250, 3)));
        assert!(store.can_prev());
        assert!(!store.can_next());
    }

    #[test]
    fn test_page_info_label() {
        let mut store = PageStore::new(100);
        store.apply_loaded(2, Ok(page_of(100, 250, 3)));
        assert_eq!(store.page_info(), "Page 2 of 3 (250 items)");
    }

    #[test]
    fn test_set_per_page_floors_at_one() {
        let mut store = PageStore::new(100);
        store.set_per_page(0);
        assert_eq!(store.state().per_page, 1);
    }
}
