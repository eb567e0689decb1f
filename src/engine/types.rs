//! Engine request and response payload types / 引擎请求与响应类型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One search hit: the document exactly as the engine returned it.
/// Field order is preserved (serde_json `preserve_order`).
pub type Hit = Map<String, Value>;

/// Options attached to one search request / 搜索请求选项
///
/// Unset fields are left off the request body entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = Some(filters.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Raw engine response for one search call / 单次搜索的原始响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHits {
    #[serde(default)]
    pub hits: Vec<Hit>,
    /// Engine-reported total match count; may exceed the page returned
    #[serde(rename = "nbHits", default)]
    pub total_hits: u64,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(rename = "exhaustiveNbHits", default)]
    pub exhaustive_total: bool,
    #[serde(rename = "processingTimeMs", default)]
    pub processing_time_ms: u64,
    #[serde(default)]
    pub query: String,
}
