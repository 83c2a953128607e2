use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::api::{endpoints, Gateway};
use crate::error::ApiError;
use crate::models::{Entity, EntityKind, Page};

/// Anything that can hand a list view one page of entities
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, kind: EntityKind, page: u32, limit: u32) -> Result<Page, ApiError>;
}

#[async_trait]
impl PageSource for Gateway {
    async fn fetch_page(&self, kind: EntityKind, page: u32, limit: u32) -> Result<Page, ApiError> {
        endpoints::list_page(self, kind, page, limit).await
    }
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for &S {
    async fn fetch_page(&self, kind: EntityKind, page: u32, limit: u32) -> Result<Page, ApiError> {
        (**self).fetch_page(kind, page, limit).await
    }
}

/// Result of a single load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// The fetch failed; the held page is untouched
    Failed(String),
    /// The caller tore the view down before the fetch finished
    Cancelled,
    /// Target page outside `[1, total_pages]`; nothing was fetched
    OutOfRange,
}

/// A paginated, searchable table over one entity kind.
///
/// Holds exactly one server page at a time. Search filters that page in
/// place and never goes back to the server.
pub struct ListView<S> {
    source: S,
    kind: EntityKind,
    page_size: u32,
    page: Page,
    query: String,
    last_error: Option<String>,
    teardown: CancellationToken,
}

impl<S: PageSource> ListView<S> {
    pub fn new(source: S, kind: EntityKind, page_size: u32) -> Self {
        Self {
            source,
            kind,
            page_size: page_size.max(1),
            page: Page::empty(),
            query: String::new(),
            last_error: None,
            teardown: CancellationToken::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn current_page(&self) -> u32 {
        self.page.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.page.total_pages
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Token cancelled when the view is torn down; child tokens guard each load
    pub fn teardown_token(&self) -> CancellationToken {
        self.teardown.clone()
    }

    pub fn teardown(&self) {
        self.teardown.cancel();
    }

    /// Fetch `page` and replace the held page with it
    pub async fn load(&mut self, page: u32) -> LoadOutcome {
        let cancel = self.teardown.child_token();
        self.load_with(page, &cancel).await
    }

    /// Fetch `page`, abandoning the request if `cancel` fires first.
    ///
    /// On success the held page is replaced and the search text cleared. On
    /// failure or cancellation the held page stays as it was.
    pub async fn load_with(&mut self, page: u32, cancel: &CancellationToken) -> LoadOutcome {
        let page = page.max(1);

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("{} page {} load cancelled", self.kind, page);
                return LoadOutcome::Cancelled;
            }
            result = self.source.fetch_page(self.kind, page, self.page_size) => result,
        };

        match fetched {
            Ok(new_page) => {
                tracing::debug!(
                    "{} page {}/{}: {} rows",
                    self.kind,
                    new_page.current_page,
                    new_page.total_pages,
                    new_page.len()
                );
                self.page = new_page;
                self.query.clear();
                self.last_error = None;
                LoadOutcome::Loaded
            }
            Err(e) => {
                tracing::error!("Failed to fetch {} page {}: {}", self.kind, page, e);
                let message = e.message();
                self.last_error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Navigate to `page`; a no-op outside `[1, total_pages]`
    pub async fn go_to(&mut self, page: u32) -> LoadOutcome {
        if !self.page.contains_page(page) {
            return LoadOutcome::OutOfRange;
        }
        self.load(page).await
    }

    pub async fn next(&mut self) -> LoadOutcome {
        self.go_to(self.current_page().saturating_add(1)).await
    }

    pub async fn prev(&mut self) -> LoadOutcome {
        self.go_to(self.current_page().saturating_sub(1)).await
    }

    /// Re-fetch the current page, e.g. after a form submitted
    pub async fn refresh(&mut self) -> LoadOutcome {
        self.load(self.current_page()).await
    }

    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn clear_search(&mut self) {
        self.query.clear();
    }

    /// Rows of the held page that match the search text, in page order
    pub fn rows(&self) -> Vec<&Entity> {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return self.page.items.iter().collect();
        }
        self.page.items.iter().filter(|e| e.matches(&needle)).collect()
    }
}

impl<S> Drop for ListView<S> {
    fn drop(&mut self) {
        self.teardown.cancel();
    }
}
