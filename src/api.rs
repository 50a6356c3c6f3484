//! Query API client.
//!
//! The engine talks to the item database through the [`ItemApi`] trait so
//! tests can substitute mocks; [`HttpItemApi`] is the production adapter,
//! posting the search form to `api.php?action=get_items` exactly as the
//! admin page's form submission does.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::ItemPage;

/// Search/filter form values, passed through to the query API unchanged.
///
/// The client does not interpret these beyond `is_searching`; filtering and
/// sorting are entirely the server's business.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchParams {
    /// Free-text search over item and character names.
    pub text: String,
    /// Quality ordinal filter.
    pub quality: Option<u8>,
    /// Realm ordinal filter.
    pub realm: Option<u8>,
}

impl SearchParams {
    /// Whether a text search is active. Drives the char-name column.
    pub fn is_searching(&self) -> bool {
        !self.text.is_empty()
    }
}

/// One page fetch against the query API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number. Sent as-is; the client never clamps it.
    pub page: u64,
    /// Positive page size.
    pub per_page: u32,
    pub search: SearchParams,
}

impl PageRequest {
    /// Encode the request as form fields.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("page".to_string(), self.page.to_string()),
            ("perPage".to_string(), self.per_page.to_string()),
            ("searchtext".to_string(), self.search.text.clone()),
        ];
        if let Some(quality) = self.search.quality {
            fields.push(("quality".to_string(), quality.to_string()));
        }
        if let Some(realm) = self.search.realm {
            fields.push(("realm".to_string(), realm.to_string()));
        }
        fields
    }
}

/// The query API seam.
///
/// Implementations include the production [`HttpItemApi`] and mock clients
/// in tests.
#[async_trait]
pub trait ItemApi: Send + Sync {
    /// Fetch one page of the filtered item collection.
    async fn fetch_page(&self, request: &PageRequest) -> Result<ItemPage, ApiError>;
}

/// Production query API client backed by reqwest.
///
/// No request timeout is configured beyond the transport default: a request
/// that never resolves keeps the loader busy until the process restarts.
#[derive(Debug, Clone)]
pub struct HttpItemApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpItemApi {
    /// Create a client against the given base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client with a preconfigured `reqwest::Client`.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// The page-fetch endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/api.php?action=get_items", self.base_url)
    }
}

#[async_trait]
impl ItemApi for HttpItemApi {
    async fn fetch_page(&self, request: &PageRequest) -> Result<ItemPage, ApiError> {
        let url = self.endpoint();
        tracing::debug!(page = request.page, per_page = request.per_page, %url, "fetching page");

        let response = self
            .client
            .post(&url)
            .form(&request.form_fields())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "page fetch rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let page: ItemPage = serde_json::from_slice(&body)?;
        tracing::debug!(
            items = page.items.len(),
            total = page.total,
            pages = page.pages,
            "page fetched"
        );
        Ok(page)
    }
}
