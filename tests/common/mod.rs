//! Common test utilities for integration tests.
//!
//! Provides item/page fixtures and a scripted mock of the query API seam.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use stashview::api::{ItemApi, PageRequest};
use stashview::error::ApiError;
use stashview::models::{Item, ItemPage};

/// Build a plain item with the given id.
pub fn item(id: i64) -> Item {
    Item {
        item_id: id,
        item_quality: 4,
        item_classid: 100,
        item_name: format!("Item {}", id),
        item_image: format!("img{}", id),
        item_description: format!("Description {}", id),
        account_login: "operator".to_string(),
        account_realm: 1,
        char_name: format!("Char{}", id),
        ..Default::default()
    }
}

/// Build a page of `count` plain items.
pub fn page(count: usize, total: u64, pages: u64) -> ItemPage {
    ItemPage {
        items: (0..count).map(|i| item(i as i64)).collect(),
        total,
        pages,
    }
}

/// Scripted [`ItemApi`] mock.
///
/// Pops one queued response per fetch (an empty page once the script runs
/// dry) and records every request it saw.
pub struct MockItemApi {
    responses: Mutex<VecDeque<Result<ItemPage, ApiError>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl MockItemApi {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue the next response.
    pub fn push_response(&self, response: Result<ItemPage, ApiError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockItemApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemApi for MockItemApi {
    async fn fetch_page(&self, request: &PageRequest) -> Result<ItemPage, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ItemPage::default()))
    }
}
