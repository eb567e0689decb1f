//! Meilisearch HTTP client / HTTP 客户端
//!
//! Speaks the engine's REST API over reqwest. All protocol details live
//! here; the adapter only sees the [`EngineClient`]/[`EngineIndex`]
//! contracts. Timeouts are this client's responsibility - the adapter
//! carries no retry policy of its own.

pub mod types;

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{Map, Value};

use crate::config::SearchConfig;
use crate::engine::{EngineClient, EngineIndex, IndexBox, SearchHits, SearchOptions};
use types::{ApiError, CreateIndexRequest, IndexInfo, SearchRequest, UpdateResponse};

/// Meilisearch client / Meilisearch 客户端
pub struct MeiliClient {
    http: Client,
    host: String,
    api_key: Option<String>,
}

impl MeiliClient {
    pub fn new(host: impl Into<String>, api_key: Option<String>, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        let host = host.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            host,
            api_key,
        })
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Self::new(config.host.as_str(), config.api_key.clone(), config.timeout_secs)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    fn with_key(&self, builder: RequestBuilder) -> RequestBuilder {
        with_key(builder, &self.api_key)
    }

    /// Engine reachability probe / 引擎可达性探测
    pub async fn health(&self) -> Result<()> {
        let resp = self.with_key(self.http.get(self.url("/health"))).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Create an index / 创建索引
    pub async fn create_index(&self, uid: &str, primary_key: Option<&str>) -> Result<IndexInfo> {
        let body = CreateIndexRequest { uid, primary_key };
        let resp = self
            .with_key(self.http.post(self.url("/indexes")))
            .json(&body)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Delete an index and everything in it / 删除索引
    pub async fn delete_index(&self, uid: &str) -> Result<()> {
        let url = format!("{}/{}", self.url("/indexes"), urlencoding::encode(uid));
        let resp = self.with_key(self.http.delete(url)).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Fetch an index descriptor / 查询索引信息
    pub async fn get_index(&self, uid: &str) -> Result<IndexInfo> {
        let url = format!("{}/{}", self.url("/indexes"), urlencoding::encode(uid));
        let resp = self.with_key(self.http.get(url)).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }
}

impl EngineClient for MeiliClient {
    fn index(&self, uid: &str) -> IndexBox {
        Box::new(MeiliIndex {
            http: self.http.clone(),
            host: self.host.clone(),
            api_key: self.api_key.clone(),
            uid: uid.to_string(),
        })
    }
}

/// Handle for one index / 单个索引的句柄
pub struct MeiliIndex {
    http: Client,
    host: String,
    api_key: Option<String>,
    uid: String,
}

impl MeiliIndex {
    fn url(&self, suffix: &str) -> String {
        format!(
            "{}/indexes/{}{}",
            self.host,
            urlencoding::encode(&self.uid),
            suffix
        )
    }

    fn with_key(&self, builder: RequestBuilder) -> RequestBuilder {
        with_key(builder, &self.api_key)
    }
}

#[async_trait]
impl EngineIndex for MeiliIndex {
    fn uid(&self) -> &str {
        &self.uid
    }

    async fn add_documents(
        &self,
        documents: Vec<Map<String, Value>>,
        primary_key: &str,
    ) -> Result<()> {
        let url = format!(
            "{}?primaryKey={}",
            self.url("/documents"),
            urlencoding::encode(primary_key)
        );
        let resp = self.with_key(self.http.post(url)).json(&documents).send().await?;
        let resp = check_status(resp).await?;
        let _receipt: UpdateResponse = resp.json().await?;
        Ok(())
    }

    async fn delete_documents(&self, keys: &[Value]) -> Result<()> {
        let resp = self
            .with_key(self.http.post(self.url("/documents/delete-batch")))
            .json(&keys)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let _receipt: UpdateResponse = resp.json().await?;
        Ok(())
    }

    async fn delete_all_documents(&self) -> Result<()> {
        let resp = self.with_key(self.http.delete(self.url("/documents"))).send().await?;
        let resp = check_status(resp).await?;
        let _receipt: UpdateResponse = resp.json().await?;
        Ok(())
    }

    async fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchHits> {
        let body = SearchRequest { q: query, options };
        let resp = self
            .with_key(self.http.post(self.url("/search")))
            .json(&body)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }
}

fn with_key(builder: RequestBuilder, api_key: &Option<String>) -> RequestBuilder {
    match api_key {
        Some(key) => builder.header("X-Meili-API-Key", key),
        None => builder,
    }
}

/// Map non-2xx responses to errors carrying the engine's own message
async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    if let Ok(error) = serde_json::from_str::<ApiError>(&body) {
        return Err(anyhow!(
            "Meilisearch responded {}: {} [{}]",
            status,
            error.message,
            error.error_code
        ));
    }
    Err(anyhow!("Meilisearch responded {}: {}", status, body))
}
