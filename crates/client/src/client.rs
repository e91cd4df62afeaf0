//! HTTP implementation of the catalog contract.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::source::{
    CatalogSource, Envelope, ProductDetailsData, ProductDetailsPayload, ProductPage, ProductsData,
};

/// Client for the remote product catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    page_size: u32,
}

impl CatalogClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| ClientError::Config(format!("base_url: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("http client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            page_size: config.page_size,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{segments...}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Config(format!("base_url cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn products_url(&self, page: u32) -> Result<Url, ClientError> {
        let mut url = self.endpoint(&["products"])?;
        let skip = u64::from(page) * u64::from(self.page_size);
        url.query_pairs_mut()
            .append_pair("skip", &skip.to_string())
            .append_pair("take", &self.page_size.to_string());
        Ok(url)
    }

    pub(crate) fn details_url(&self, slug: &str) -> Result<Url, ClientError> {
        self.endpoint(&["product", slug])
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        not_found: &str,
    ) -> Result<T, ClientError> {
        tracing::debug!(%url, "catalog request");

        let resp = self.http.get(url.clone()).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "catalog request failed");
            ClientError::Network(e.to_string())
        })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(not_found.to_string()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "catalog returned an error status");
            return Err(ClientError::Api(status.as_u16(), body));
        }

        resp.json::<T>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_products(&self, page: u32) -> Result<ProductPage, ClientError> {
        let url = self.products_url(page)?;
        let envelope: Envelope<ProductsData> = self.get_json(url, "products").await?;
        let items = envelope.into_data()?.unwrap_or_default().products;

        // A short page is the last one.
        let has_more = items.len() >= self.page_size as usize;
        tracing::info!(page, items = items.len(), has_more, "fetched product page");

        Ok(ProductPage {
            page,
            items,
            has_more,
        })
    }

    async fn fetch_product_details(
        &self,
        slug: &str,
    ) -> Result<ProductDetailsPayload, ClientError> {
        let url = self.details_url(slug)?;
        let envelope: Envelope<ProductDetailsData> = self.get_json(url, slug).await?;
        let payload = envelope
            .into_data()?
            .ok_or_else(|| ClientError::NotFound(slug.to_string()))?
            .into_payload(slug)?;

        tracing::info!(
            slug,
            product_id = %payload.product_details.id,
            reviews = payload.reviews.len(),
            related = payload.related_products.len(),
            "fetched product details"
        );
        Ok(payload)
    }
}
