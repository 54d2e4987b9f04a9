//! Access to the remote collection: id search and per-object metadata.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::CatalogConfig;
use crate::error::{PipelineError, RemoteError};
use crate::model::{ObjectId, ObjectRecord, SearchResponse};

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Ids matching `query`, in the order the catalog returned them.
    async fn search_ids(
        &self,
        query: &str,
        has_images: bool,
    ) -> Result<Vec<ObjectId>, RemoteError>;

    async fn fetch_object(&self, id: ObjectId) -> Result<ObjectRecord, RemoteError>;
}

/// [`CatalogSource`] backed by the HTTP collection API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl HttpCatalog {
    pub fn new(config: CatalogConfig) -> Result<Self, PipelineError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|err| PipelineError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, RemoteError> {
        let response = request.send().await.map_err(|source| RemoteError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| RemoteError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| RemoteError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn search_ids(
        &self,
        query: &str,
        has_images: bool,
    ) -> Result<Vec<ObjectId>, RemoteError> {
        let url = self.config.search_url.as_str();
        let has_images = if has_images { "true" } else { "false" };
        debug!(url, query, has_images, "searching catalog");

        let request = self
            .client
            .get(url)
            .query(&[("q", query), ("hasImages", has_images)]);
        let response: SearchResponse = self.get_json(request, url).await?;

        Ok(response.into_ids())
    }

    async fn fetch_object(&self, id: ObjectId) -> Result<ObjectRecord, RemoteError> {
        let url = self.config.object_endpoint(id);
        debug!(url = %url, object_id = %id, "fetching object");

        // Only a body that is not a JSON object fails the fetch.
        let request = self.client.get(&url);
        let body: Map<String, Value> = self.get_json(request, &url).await?;
        serde_json::from_value(Value::Object(body))
            .map_err(|source| RemoteError::Decode { url, source })
    }
}
