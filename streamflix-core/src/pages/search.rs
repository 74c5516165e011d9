use streamflix_model::CatalogItem;
use tracing::{debug, instrument};

use crate::error::{CatalogError, Result};
use crate::providers::{MetadataProvider, SearchScope};

/// Incrementally paged search results for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    query: String,
    scope: SearchScope,
    results: Vec<CatalogItem>,
    page: u32,
    total_results: u32,
    total_pages: u32,
}

impl SearchSession {
    /// Multi search (movies, shows and people) starting at page 1.
    pub async fn start<P: MetadataProvider + ?Sized>(
        provider: &P,
        query: &str,
    ) -> Result<Self> {
        Self::start_in(provider, SearchScope::Multi, query).await
    }

    #[instrument(skip(provider))]
    pub async fn start_in<P: MetadataProvider + ?Sized>(
        provider: &P,
        scope: SearchScope,
        query: &str,
    ) -> Result<Self> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidQuery(
                "search query is empty".to_string(),
            ));
        }

        let page = provider.search(scope, query, 1).await?;
        debug!(total = page.total_results, "search started");
        Ok(Self {
            query: query.to_string(),
            scope,
            page: page.page.max(1),
            total_results: page.total_results,
            total_pages: page.total_pages,
            results: page.results,
        })
    }

    /// Appends the next page. Returns how many results were added; zero once
    /// everything has been loaded.
    #[instrument(skip_all, fields(query = %self.query, page = self.page + 1))]
    pub async fn load_more<P: MetadataProvider + ?Sized>(
        &mut self,
        provider: &P,
    ) -> Result<usize> {
        if !self.has_more() {
            return Ok(0);
        }
        let next = self.page + 1;
        let page = provider.search(self.scope, &self.query, next).await?;

        let added = page.results.len();
        self.results.extend(page.results);
        self.page = next;
        self.total_results = page.total_results;
        self.total_pages = page.total_pages;
        Ok(added)
    }

    pub fn has_more(&self) -> bool {
        let short = self.results.len() < self.total_results as usize;
        // Guard against totals that overstate what the pages deliver.
        short && (self.total_pages == 0 || self.page < self.total_pages)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    pub fn results(&self) -> &[CatalogItem] {
        &self.results
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_results(&self) -> u32 {
        self.total_results
    }
}
