use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use http::Method;
use tracing::{info, error, debug};
use url::form_urlencoded;
use crate::clients::{FetchRequest, HttpClient, RequestOptions, ResponseBody, ResponseType};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::models::{Vendor, VendorPage};
use crate::storage::QueryCache;

pub const PAGE_SIZE: usize = 10;

/// Cache key of the unfiltered first page. The only key mutations invalidate.
pub const LISTING_KEY: &str = "/vendor?limit=10";

pub fn listing_url(cursor: Option<&str>) -> String {
    match cursor {
        Some(cursor) => format!("{}&cursor={}", LISTING_KEY, encode(cursor)),
        None => LISTING_KEY.to_string(),
    }
}

pub fn search_url(query: &str) -> String {
    format!("/vendor/search?q={}", encode(query))
}

pub fn vendor_url(id: &str) -> String {
    format!("/vendor/{}", id)
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Everything the screens need from the vendor backend.
#[async_trait]
pub trait VendorBackend: Send + Sync {
    async fn list_vendors(&self, cursor: Option<&str>) -> Result<VendorPage>;
    async fn get_vendor(&self, id: &str) -> Result<Vendor>;
    /// Returns an empty list without a request when `query` is empty.
    async fn search_vendors(&self, query: &str) -> Result<Vec<Vendor>>;
    async fn delete_vendor(&self, id: &str) -> Result<()>;
    async fn approve_vendor(&self, id: &str) -> Result<()>;
    async fn reject_vendor(&self, id: &str) -> Result<()>;
    async fn suspend_vendor(&self, id: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct VendorService {
    client: HttpClient,
    cache: Arc<QueryCache>,
    stale_time: Duration,
}

impl VendorService {
    /// A service whose reads always go to the backend. The last answer per
    /// URL is still kept in the cache.
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            cache: Arc::new(QueryCache::new()),
            stale_time: Duration::ZERO,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let service = Self::new(HttpClient::new(settings)?);
        Ok(service.with_stale_time(Duration::from_secs(settings.api.stale_time_secs)))
    }

    /// Serve cached reads younger than `stale_time` without a request.
    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Downloads a vendor document. `url` is absolute, so the base URL is
    /// bypassed. Not cached.
    pub async fn fetch_document(&self, url: &str) -> Result<Vec<u8>> {
        let body = self
            .client
            .fetch(FetchRequest {
                url,
                base_url: Some(""),
                response_type: ResponseType::Blob,
                ..FetchRequest::default()
            })
            .await?;

        match body {
            ResponseBody::Blob(bytes) => {
                debug!(url = url, size = bytes.len(), "Document downloaded");
                Ok(bytes)
            }
            ResponseBody::Text(text) => Ok(text.into_bytes()),
            ResponseBody::Json(value) => Ok(value.to_string().into_bytes()),
        }
    }

    async fn query<T>(&self, url: String) -> Result<T>
    where
        T: serde::de::DeserializeOwned + Clone + Send + Sync + 'static,
    {
        self.cache
            .get_or_fetch(&url, self.stale_time, || {
                self.client.fetch_json::<T>(FetchRequest::get(&url))
            })
            .await
    }

    async fn mutate(&self, url: String, method: Method, action: &'static str) -> Result<()> {
        let result = self
            .client
            .fetch(FetchRequest {
                url: &url,
                response_type: ResponseType::Text,
                options: RequestOptions::method(method),
                ..FetchRequest::default()
            })
            .await;

        match result {
            Ok(_) => {
                self.cache.invalidate(LISTING_KEY).await;
                info!(url = url, action = action, "Vendor mutation succeeded");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                error!(url = url, action = action, "Vendor not found");
                Err(Error::VendorNotFound)
            }
            Err(e) => {
                error!(error = %e, url = url, action = action, "Vendor mutation failed");
                Err(e)
            }
        }
    }
}

#[async_trait]
impl VendorBackend for VendorService {
    async fn list_vendors(&self, cursor: Option<&str>) -> Result<VendorPage> {
        self.query(listing_url(cursor)).await
    }

    async fn get_vendor(&self, id: &str) -> Result<Vendor> {
        self.query(vendor_url(id)).await
    }

    async fn search_vendors(&self, query: &str) -> Result<Vec<Vendor>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.query(search_url(query)).await
    }

    async fn delete_vendor(&self, id: &str) -> Result<()> {
        self.mutate(vendor_url(id), Method::DELETE, "delete").await
    }

    async fn approve_vendor(&self, id: &str) -> Result<()> {
        self.mutate(format!("{}/approve", vendor_url(id)), Method::PATCH, "approve")
            .await
    }

    async fn reject_vendor(&self, id: &str) -> Result<()> {
        self.mutate(format!("{}/deny", vendor_url(id)), Method::PATCH, "reject")
            .await
    }

    async fn suspend_vendor(&self, id: &str) -> Result<()> {
        self.mutate(format!("{}/suspend", vendor_url(id)), Method::PATCH, "suspend")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_urls() {
        assert_eq!(listing_url(None), "/vendor?limit=10");
        assert_eq!(listing_url(Some("abc")), "/vendor?limit=10&cursor=abc");
        assert_eq!(listing_url(Some("a b&c")), "/vendor?limit=10&cursor=a+b%26c");
    }

    #[test]
    fn search_query_is_encoded() {
        assert_eq!(search_url("ada fabrics"), "/vendor/search?q=ada+fabrics");
    }
}
