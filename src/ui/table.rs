use tracing::{debug, warn};
use crate::error::Result;
use crate::models::{Vendor, VendorPage};
use crate::services::{VendorBackend, PAGE_SIZE};
use super::search::ListingQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    NoData,
    Ready,
}

/// Listing screen state: current location, loaded data and the cursor
/// history used to walk back through a forward-only backend.
#[derive(Debug, Clone, Default)]
pub struct VendorTable {
    location: ListingQuery,
    page_index: usize,
    cursor_history: Vec<String>,
    listing: Option<VendorPage>,
    search_results: Option<Vec<Vendor>>,
    failed: bool,
}

impl VendorTable {
    pub fn new(location: ListingQuery) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    pub fn location(&self) -> &ListingQuery {
        &self.location
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn cursor_history(&self) -> &[String] {
        &self.cursor_history
    }

    pub fn listing(&self) -> Option<&VendorPage> {
        self.listing.as_ref()
    }

    pub fn is_searching(&self) -> bool {
        self.location.is_searching()
    }

    pub fn set_listing(&mut self, page: VendorPage) {
        self.listing = Some(page);
    }

    pub fn set_search_results(&mut self, vendors: Vec<Vendor>) {
        self.search_results = Some(vendors);
    }

    /// Moves to a location chosen outside the pager (search box, back/forward).
    /// Page position restarts since the cursor trail no longer applies.
    pub fn set_location(&mut self, location: ListingQuery) {
        if location == self.location {
            return;
        }
        self.location = location;
        self.page_index = 0;
        self.cursor_history.clear();
        self.listing = None;
        self.search_results = None;
        self.failed = false;
    }

    /// Loads the listing for the current cursor and, when a search is active,
    /// the search results. A failed load leaves the view in "No Data"
    /// until the next refresh or move.
    pub async fn refresh<B>(&mut self, backend: &B) -> Result<()>
    where
        B: VendorBackend + ?Sized,
    {
        self.failed = false;
        let result = self.load(backend).await;
        if let Err(e) = &result {
            warn!(error = %e, location = %self.location.to_query_string(), "Listing load failed");
            self.failed = true;
        }
        result
    }

    async fn load<B>(&mut self, backend: &B) -> Result<()>
    where
        B: VendorBackend + ?Sized,
    {
        let page = backend.list_vendors(self.location.cursor.as_deref()).await?;
        debug!(
            vendors = page.vendors.len(),
            has_next = page.has_next(),
            "Listing loaded"
        );
        self.listing = Some(page);

        if self.is_searching() {
            let results = backend.search_vendors(self.location.search()).await?;
            debug!(results = results.len(), query = self.location.search(), "Search loaded");
            self.search_results = Some(results);
        } else {
            self.search_results = None;
        }

        Ok(())
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn view_state(&self) -> ViewState {
        if self.failed {
            return ViewState::NoData;
        }
        match (&self.listing, self.is_searching(), &self.search_results) {
            (None, _, _) => ViewState::Loading,
            (Some(_), true, None) => ViewState::Loading,
            (Some(_), true, Some(results)) if results.is_empty() => ViewState::NoData,
            _ => ViewState::Ready,
        }
    }

    /// Search results while searching, otherwise the current listing page.
    pub fn rows(&self) -> &[Vendor] {
        if self.is_searching() {
            if let Some(results) = &self.search_results {
                return results;
            }
        }
        self.listing
            .as_ref()
            .map(|page| page.vendors.as_slice())
            .unwrap_or(&[])
    }

    pub fn can_next_page(&self) -> bool {
        !self.is_searching()
            && self
                .listing
                .as_ref()
                .is_some_and(|page| page.cursor.is_some())
    }

    /// Enabled from the third page on; the first two pages share the guard.
    pub fn can_previous_page(&self) -> bool {
        !self.is_searching() && self.page_index > 1
    }

    /// Approximation from the rows on hand; the backend reports no total.
    pub fn page_count(&self) -> usize {
        let count = self.rows().len();
        if count == 0 {
            1
        } else {
            count.div_ceil(PAGE_SIZE)
        }
    }

    /// Pushes the trailing row id and returns the location of the next page.
    /// `None` when disabled.
    pub fn next_page(&mut self) -> Option<ListingQuery> {
        if !self.can_next_page() {
            return None;
        }
        let cursor = self.listing.as_ref()?.cursor.clone()?;
        let trailing = self
            .rows()
            .last()
            .map(|vendor| vendor.id.clone())
            .unwrap_or_else(|| cursor.clone());

        debug!(trailing = %trailing, cursor = %cursor, page = self.page_index + 1, "Next page");
        self.cursor_history.push(trailing);
        self.page_index += 1;
        self.location = ListingQuery::with_cursor(Some(cursor));
        self.listing = None;
        self.failed = false;
        Some(self.location.clone())
    }

    /// Pops the cursor history and returns the location to load. `None` when
    /// disabled or the history is empty.
    pub fn previous_page(&mut self) -> Option<ListingQuery> {
        if !self.can_previous_page() {
            return None;
        }
        let cursor = self.cursor_history.pop()?;

        debug!(cursor = %cursor, page = self.page_index - 1, "Previous page");
        self.page_index -= 1;
        self.location = ListingQuery::with_cursor(Some(cursor));
        self.listing = None;
        self.failed = false;
        Some(self.location.clone())
    }

    /// Id of the vendor shown at `row`, for navigating to its detail view.
    pub fn open(&self, row: usize) -> Option<&str> {
        self.rows().get(row).map(|vendor| vendor.id.as_str())
    }
}
